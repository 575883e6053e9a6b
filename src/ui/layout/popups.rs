use super::{center_vertically, centered_popup, muted_center};
use crate::app::EmptyState;
use crate::ui::theme::Theme;
use crate::utils::{file_name_of, shorten_path};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::Path;

pub(super) fn draw_grid_placeholder(f: &mut Frame, area: Rect, theme: &Theme) {
    f.render_widget(muted_center("(popup active)", theme), center_vertically(area, 1));
}

pub(super) fn draw_empty_state(f: &mut Frame, state: &EmptyState, area: Rect, theme: &Theme) {
    let (title, body, tip): (&str, String, Option<&str>) = match state {
        EmptyState::NoFolders => (
            "No Folders Added",
            "Go to Settings to add your wallpaper directory".to_string(),
            Some("Tip: Press ',' for Settings"),
        ),
        EmptyState::NoFavorites => (
            "No Favorites Yet",
            "Star your best wallpapers to see them here".to_string(),
            Some("Tip: Press 'f' to Star"),
        ),
        EmptyState::NoImages(dirs) => {
            let dirs: Vec<String> = dirs.iter().map(|d| shorten_path(d)).collect();
            (
                "No Wallpapers Found",
                format!("No valid images found in:\n{}", dirs.join("\n")),
                None,
            )
        }
        EmptyState::NoResults => ("No Matches", "Try a different search term".to_string(), None),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        body.lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.fg_secondary)))),
    );
    if let Some(tip) = tip {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            tip,
            Style::default().fg(theme.fg_muted),
        )));
    }

    let height = lines.len() as u16;
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, center_vertically(area, height));
}

pub(super) fn draw_delete_popup(f: &mut Frame, path: &Path, area: Rect, theme: &Theme) {
    let popup_area = centered_popup(area, 50, 7);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Delete Wallpaper ")
        .title_style(Style::default().fg(theme.danger).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.danger))
        .style(Style::default().bg(theme.bg1));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let text = vec![
        Line::from(Span::styled(
            file_name_of(path),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "The file will be removed from disk.",
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.danger)),
            Span::styled(" delete  ", Style::default().fg(theme.fg_muted)),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::styled(" keep", Style::default().fg(theme.fg_muted)),
        ]),
    ];

    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("h/j/k/l", "Move in the grid"),
            ("arrows", "Move in the grid"),
            ("/", "Search by filename"),
            ("s", "Cycle sort mode"),
        ],
    ),
    (
        "Actions",
        &[
            ("Enter", "Apply wallpaper"),
            ("r", "Random from visible"),
            ("f", "Star / unstar"),
            ("d", "Delete file"),
            ("o", "Open containing folder"),
            ("R", "Rescan folders"),
        ],
    ),
    (
        "General",
        &[
            (",", "Settings"),
            ("?", "Toggle this help"),
            ("q/Esc", "Quit"),
        ],
    ),
];

pub(super) fn draw_help_popup(f: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_popup(area, 46, 22);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" wallpick Help ")
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent_dim))
        .style(Style::default().bg(theme.bg1));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let mut lines = Vec::new();
    for (i, (section, keys)) in HELP_SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            *section,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<9}"), Style::default().fg(theme.info)),
                Span::styled(*desc, Style::default().fg(theme.fg_secondary)),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
