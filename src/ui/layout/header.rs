use crate::app::{App, Page};
use crate::ui::theme::Theme;
use crate::wallpaper::image_info;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use ratatui_image::picker::ProtocolType;

pub(super) fn draw_status(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    if let Some(message) = &app.ui.status_message {
        let line = Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(theme.accent_dim),
        ));
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

pub(super) fn draw_header(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let sep = Span::styled(" │ ", Style::default().fg(theme.fg_muted));
    let mut spans = vec![Span::styled(
        " wallpick ",
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )];

    if app.ui.page == Page::Settings {
        spans.push(sep);
        spans.push(Span::styled(
            "Settings",
            Style::default().fg(theme.fg_primary),
        ));
    } else {
        let total = app.selection.filtered.len();
        let count = if total == 0 {
            "0/0".to_string()
        } else {
            format!("{}/{}", app.selection.idx.min(total - 1) + 1, total)
        };

        spans.extend([
            sep.clone(),
            Span::styled(count, Style::default().fg(theme.info)),
            sep.clone(),
            Span::styled(
                format!("[⇅ {}]", app.filters.sort_mode.display_name()),
                Style::default().fg(theme.fg_secondary),
            ),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", app.config.picture_mode.display_name()),
                Style::default().fg(theme.fg_secondary),
            ),
        ]);

        if app.filters.search_mode || !app.filters.query.is_empty() {
            spans.push(sep);
            spans.push(Span::styled("/", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                app.filters.query.as_str(),
                Style::default().fg(theme.fg_primary),
            ));
            if app.filters.search_mode {
                spans.push(Span::styled("█", Style::default().fg(theme.accent)));
            }
        }
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

pub(super) fn draw_footer(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if app.ui.page == Page::Grid {
        if let Some(path) = app.selected_path() {
            let info = Paragraph::new(image_info(path))
                .style(Style::default().fg(theme.fg_secondary))
                .alignment(Alignment::Center);
            f.render_widget(info, rows[0]);
        }
    }

    let hints: &[(&str, &str)] = match app.ui.page {
        Page::Settings if app.settings.prompt.is_some() => {
            &[("Enter", "add"), ("Esc", "cancel")]
        }
        Page::Settings => &[
            ("↑/↓", "select"),
            ("←/→", "change"),
            ("Enter", "activate"),
            ("d", "remove"),
            ("Esc", "back"),
        ],
        Page::Grid if app.filters.search_mode => {
            &[("type", "filter"), ("Enter", "keep"), ("Esc", "clear")]
        }
        Page::Grid => &[
            ("←↑↓→", "move"),
            ("Enter", "apply"),
            ("f", "star"),
            ("s", "sort"),
            ("/", "search"),
            (",", "settings"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans = vec![Span::styled(
        format!("img:{}", thumbnail_protocol_label(app)),
        Style::default().fg(theme.fg_muted),
    )];
    for (key, action) in hints {
        spans.push(Span::styled(" │ ", Style::default().fg(theme.bg4)));
        spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(theme.fg_muted),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        rows[1],
    );
}

fn thumbnail_protocol_label(app: &App) -> &'static str {
    app.thumbnails
        .image_picker
        .as_ref()
        .map(|p| match p.protocol_type {
            ProtocolType::Halfblocks => "HB",
            ProtocolType::Sixel => "SIX",
            ProtocolType::Kitty => "KTY",
            ProtocolType::Iterm2 => "IT2",
        })
        .unwrap_or("N/A")
}
