use super::center_vertically;
use crate::app::App;
use crate::ui::theme::Theme;
use crate::utils::{display_name, file_name_of};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use ratatui_image::StatefulImage;

/// Split `area` into `rows × cols` equal cells, row-major.
fn card_areas(area: Rect, cols: usize, rows: usize) -> Vec<Rect> {
    let cols = cols.max(1) as u16;
    let rows = rows.max(1) as u16;
    let card_w = area.width / cols;
    let card_h = area.height / rows;
    if card_w < 4 || card_h < 3 {
        return Vec::new();
    }

    (0..rows)
        .flat_map(|r| {
            (0..cols).map(move |c| Rect::new(area.x + c * card_w, area.y + r * card_h, card_w, card_h))
        })
        .collect()
}

pub(super) fn draw_grid(f: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    let visible = app.visible_range();
    let total = app.selection.filtered.len();

    // Visible cards first, then one page ahead.
    let preload_end = (visible.end + app.config.page_size()).min(total);
    for pos in visible.start..preload_end {
        let cache_idx = app.selection.filtered[pos];
        app.request_thumbnail(cache_idx);
    }

    let cards = card_areas(area, app.config.columns, app.config.rows);
    for (card, pos) in cards.into_iter().zip(visible) {
        let cache_idx = app.selection.filtered[pos];
        let Some(path) = app.paths.get(cache_idx).cloned() else {
            continue;
        };

        let name = file_name_of(&path);
        let is_selected = pos == app.selection.idx;
        let is_current = path == app.current;
        let is_favorite = app.favorites.contains(&name);
        let is_loading = app.is_loading(cache_idx);

        let border_color = if is_selected {
            theme.accent
        } else if is_current {
            theme.success
        } else {
            theme.bg3
        };

        let mut title = vec![Span::raw(" ")];
        if is_favorite {
            title.push(Span::styled("★ ", Style::default().fg(theme.accent)));
        }
        title.push(Span::styled(
            display_name(&name),
            if is_selected {
                Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_secondary)
            },
        ));
        title.push(Span::raw(" "));

        // Kitty keeps old placements around until overwritten.
        f.render_widget(Clear, card);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Line::from(title))
            .style(Style::default().bg(if is_selected { theme.bg2 } else { theme.bg1 }));
        if is_current {
            block = block.title_bottom(
                Line::from(Span::styled(" ● current ", Style::default().fg(theme.success)))
                    .alignment(Alignment::Center),
            );
        }

        let inner = block.inner(card);
        f.render_widget(block, card);

        if let Some(protocol) = app.get_thumbnail(cache_idx) {
            f.render_stateful_widget(StatefulImage::new(None), inner, protocol);
        } else {
            let label = if is_loading { "..." } else { "no preview" };
            let text = Paragraph::new(label)
                .style(Style::default().fg(theme.fg_muted))
                .alignment(Alignment::Center);
            f.render_widget(text, center_vertically(inner, 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_tile_the_area_row_major() {
        let cards = card_areas(Rect::new(1, 1, 90, 30), 3, 2);
        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0], Rect::new(1, 1, 30, 15));
        assert_eq!(cards[2], Rect::new(61, 1, 30, 15));
        assert_eq!(cards[3], Rect::new(1, 16, 30, 15));
    }

    #[test]
    fn tiny_areas_get_no_cards() {
        assert!(card_areas(Rect::new(0, 0, 6, 4), 3, 3).is_empty());
    }
}
