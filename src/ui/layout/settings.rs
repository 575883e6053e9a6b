use crate::app::{App, SettingsRow};
use crate::ui::theme::Theme;
use crate::utils::shorten_path;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub(super) fn draw_settings(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.bg3))
        .title(Span::styled(
            " Settings ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.bg1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (lines, selected_line) = settings_lines(app, theme);

    // Keep the selected row on screen.
    let scroll = selected_line.saturating_sub(inner.height.saturating_sub(2) as usize) as u16;
    let paragraph = Paragraph::new(lines).scroll((scroll, 0));
    f.render_widget(paragraph, inner);
}

fn section(title: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(theme.accent_dim).add_modifier(Modifier::BOLD),
    ))
}

fn note(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!("    {text}"),
        Style::default().fg(theme.fg_muted),
    ))
}

/// One row: marker, label, value. Selected rows are highlighted.
fn row(label: String, value: Option<String>, selected: bool, theme: &Theme) -> Line<'static> {
    let (marker, label_style) = if selected {
        (
            Span::styled("  ▶ ", Style::default().fg(theme.accent)),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )
    } else {
        (Span::raw("    "), Style::default().fg(theme.fg_secondary))
    };

    let mut spans = vec![marker, Span::styled(label, label_style)];
    if let Some(value) = value {
        let arrows = if selected { ("◀ ", " ▶") } else { ("  ", "  ") };
        spans.push(Span::styled(": ", Style::default().fg(theme.fg_muted)));
        spans.push(Span::styled(arrows.0, Style::default().fg(theme.accent_dim)));
        spans.push(Span::styled(value, Style::default().fg(theme.info)));
        spans.push(Span::styled(arrows.1, Style::default().fg(theme.accent_dim)));
    }
    Line::from(spans)
}

/// All lines of the page and the index of the selected one.
fn settings_lines(app: &App, theme: &Theme) -> (Vec<Line<'static>>, usize) {
    let selected = app.selected_setting();
    let mut lines = Vec::new();
    let mut selected_line = 0;

    lines.push(section("WALLPAPER FOLDERS", theme));
    lines.push(note("Images are pulled from all folders below.", theme));

    for setting in app.settings_rows() {
        let is_selected = setting == selected;
        if is_selected {
            selected_line = lines.len();
        }

        match setting {
            SettingsRow::Folder(idx) => {
                let dir = app
                    .config
                    .wall_dirs
                    .get(idx)
                    .map(|d| shorten_path(d))
                    .unwrap_or_default();
                let mut line = row(format!("📁 {dir}"), None, is_selected, theme);
                if is_selected {
                    line.spans.push(Span::styled(
                        "   d remove",
                        Style::default().fg(theme.danger),
                    ));
                }
                lines.push(line);
            }
            SettingsRow::AddFolder => {
                if app.config.wall_dirs.is_empty() {
                    lines.push(note("(no folders yet)", theme));
                    if is_selected {
                        selected_line = lines.len();
                    }
                }
                match &app.settings.prompt {
                    Some(text) => lines.push(Line::from(vec![
                        Span::styled("  ▶ ", Style::default().fg(theme.accent)),
                        Span::styled("Folder path: ", Style::default().fg(theme.fg_secondary)),
                        Span::styled(text.clone(), Style::default().fg(theme.fg_primary)),
                        Span::styled("█", Style::default().fg(theme.accent)),
                    ])),
                    None => lines.push(row("+ Add Folder".to_string(), None, is_selected, theme)),
                }
                lines.push(Line::from(""));
                lines.push(section("DISPLAY", theme));
            }
            SettingsRow::MaxImages => {
                let value = match app.config.max_images {
                    0 => "All".to_string(),
                    n => n.to_string(),
                };
                lines.push(row("Max images to show".to_string(), Some(value), is_selected, theme));
                lines.push(note("0 = show all images (no limit)", theme));
            }
            SettingsRow::PictureMode => lines.push(row(
                "Wallpaper display mode".to_string(),
                Some(app.config.picture_mode.display_name().to_string()),
                is_selected,
                theme,
            )),
            SettingsRow::Columns => lines.push(row(
                "Grid columns".to_string(),
                Some(app.config.columns.to_string()),
                is_selected,
                theme,
            )),
            SettingsRow::Rows => {
                lines.push(row(
                    "Grid rows".to_string(),
                    Some(app.config.rows.to_string()),
                    is_selected,
                    theme,
                ));
                lines.push(Line::from(""));
                lines.push(section("STORAGE & PERFORMANCE", theme));
                lines.push(Line::from(Span::styled(
                    format!("    {}", app.settings.cache_label),
                    Style::default().fg(theme.fg_secondary),
                )));
            }
            SettingsRow::ClearCache => {
                lines.push(row("Clear Cache".to_string(), None, is_selected, theme));
            }
        }
    }

    (lines, selected_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::app_with_images;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[tokio::test]
    async fn selected_line_points_at_highlighted_row() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with_images(root.path(), &["a.png"]);
        app.open_settings();
        let theme = Theme::gruvbox();

        app.settings.row = app
            .settings_rows()
            .iter()
            .position(|r| *r == SettingsRow::Columns)
            .unwrap();
        let (lines, selected) = settings_lines(&app, &theme);
        assert!(text(&lines[selected]).contains("Grid columns"));
        assert!(text(&lines[selected]).contains('▶'));

        let labels: Vec<String> = lines.iter().map(text).collect();
        assert!(labels.iter().any(|l| l.contains("Cache: ")));
        assert!(labels.iter().any(|l| l.contains("+ Add Folder")));
    }
}
