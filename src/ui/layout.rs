use crate::app::{App, Page};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

mod grid;
mod header;
mod popups;
mod settings;

use grid::draw_grid;
use header::{draw_footer, draw_header, draw_status};
use popups::{draw_delete_popup, draw_empty_state, draw_grid_placeholder, draw_help_popup};
use settings::draw_settings;

pub fn draw(f: &mut Frame, app: &mut App) {
    let theme = app.ui.theme.clone();
    let area = f.area();

    // ratatui-image writes straight to the terminal, so images would paint
    // over any popup. Hide the grid while one is open.
    let popup_active = app.ui.show_help || app.ui.confirm_delete.is_some();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.bg4))
        .style(Style::default().bg(theme.bg0));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let has_status = app.ui.status_message.is_some();
    let constraints = if has_status {
        vec![
            Constraint::Length(2), // Header
            Constraint::Length(1), // Status
            Constraint::Min(5),    // Body
            Constraint::Length(2), // Footer
        ]
    } else {
        vec![
            Constraint::Length(2), // Header
            Constraint::Min(6),    // Body
            Constraint::Length(2), // Footer
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut chunk_idx = 0;

    draw_header(f, app, chunks[chunk_idx], &theme);
    chunk_idx += 1;

    if has_status {
        draw_status(f, app, chunks[chunk_idx], &theme);
        chunk_idx += 1;
    }

    let body = chunks[chunk_idx];
    match app.ui.page {
        Page::Settings => draw_settings(f, app, body, &theme),
        Page::Grid => match app.empty_state() {
            Some(state) => draw_empty_state(f, &state, body, &theme),
            None if popup_active => draw_grid_placeholder(f, body, &theme),
            None => draw_grid(f, app, body, &theme),
        },
    }
    chunk_idx += 1;

    draw_footer(f, app, chunks[chunk_idx], &theme);

    if app.ui.show_help {
        draw_help_popup(f, area, &theme);
    } else if let Some(path) = &app.ui.confirm_delete {
        draw_delete_popup(f, path, area, &theme);
    }
}

fn center_vertically(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x, y, area.width, height)
}

/// Popup rectangle centered in `area`, shrunk to fit.
fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn muted_center(text: &str, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(text.to_string())
        .style(Style::default().fg(theme.fg_muted))
        .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_keeps_rect_inside_area() {
        let area = Rect::new(2, 3, 40, 10);
        let mid = center_vertically(area, 2);
        assert_eq!(mid, Rect::new(2, 7, 40, 2));

        let tall = center_vertically(area, 50);
        assert_eq!(tall.height, 10);
        assert_eq!(tall.y, 3);
    }

    #[test]
    fn popup_shrinks_on_small_terminals() {
        let area = Rect::new(0, 0, 30, 12);
        let popup = centered_popup(area, 60, 40);
        assert_eq!(popup.width, 26);
        assert_eq!(popup.height, 8);
        assert_eq!(popup.x, 2);
        assert_eq!(popup.y, 2);
    }
}
