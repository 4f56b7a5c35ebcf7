use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use glide_core::slider::SliderControl;

use super::carousel::vertically_centered;
use crate::app::App;

pub struct SliderWidget;

impl SliderWidget {
    /// Render the card strip at `offset` (the animated, drawn offset)
    pub fn render(frame: &mut Frame, app: &App, offset: f32) {
        let theme = &app.theme;
        let layout = &app.layout;

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Screens ")
            .border_style(Style::default().fg(theme.grey0));
        frame.render_widget(block, layout.slider);

        render_control(frame, app, SliderControl::Prev, layout.slider_prev, "◀");
        render_control(frame, app, SliderControl::Next, layout.slider_next, "▶");

        let track = layout.track;
        let units = app.units_per_column();
        let config = &app.config.slider;
        let pitch = config.card_width + config.card_gap;

        for (i, caption) in config.cards.iter().enumerate() {
            let start = (i as f32 * pitch - offset) / units;
            let end = start + config.card_width / units;
            let Some((area, clipped_left, clipped_right)) = card_area(track, start, end) else {
                continue;
            };

            let mut borders = Borders::ALL;
            if clipped_left {
                borders.remove(Borders::LEFT);
            }
            if clipped_right {
                borders.remove(Borders::RIGHT);
            }
            let card = Block::default()
                .borders(borders)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.grey1));
            let inner = card.inner(area);
            frame.render_widget(card, area);
            frame.render_widget(
                Paragraph::new(caption.as_str())
                    .style(Style::default().fg(theme.fg0))
                    .alignment(Alignment::Center),
                vertically_centered(inner, 1),
            );
        }
    }
}

fn render_control(frame: &mut Frame, app: &App, control: SliderControl, area: Rect, symbol: &str) {
    let style = app.slider.view().style(control);
    let mut text_style = Style::default().fg(app.theme.fade(app.theme.fg1, style.opacity));
    if style.enabled {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }
    frame.render_widget(
        Paragraph::new(symbol)
            .style(text_style)
            .alignment(Alignment::Center),
        vertically_centered(area, 1),
    );
}

/// Columns `[start, end)` relative to the track, clipped to it.
/// Returns the clipped area and which edges were cut off.
fn card_area(track: Rect, start: f32, end: f32) -> Option<(Rect, bool, bool)> {
    let width = f32::from(track.width);
    if end <= 0.0 || start >= width || track.height == 0 {
        return None;
    }
    let left = start.max(0.0).round();
    let right = end.min(width).round();
    if right <= left {
        return None;
    }
    let area = Rect {
        x: track.x + left as u16,
        y: track.y,
        width: (right - left) as u16,
        height: track.height,
    };
    Some((area, start < 0.0, end > width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_fully_visible() {
        let track = Rect::new(10, 2, 70, 5);
        let (area, left, right) = card_area(track, 0.0, 30.0).unwrap();
        assert_eq!(area, Rect::new(10, 2, 30, 5));
        assert!(!left && !right);
    }

    #[test]
    fn test_card_clipped_at_edges() {
        let track = Rect::new(10, 2, 70, 5);

        let (area, left, right) = card_area(track, -12.0, 18.0).unwrap();
        assert_eq!(area, Rect::new(10, 2, 18, 5));
        assert!(left && !right);

        let (area, left, right) = card_area(track, 64.0, 94.0).unwrap();
        assert_eq!(area, Rect::new(74, 2, 6, 5));
        assert!(!left && right);
    }

    #[test]
    fn test_card_outside_track() {
        let track = Rect::new(10, 2, 70, 5);
        assert!(card_area(track, -40.0, -10.0).is_none());
        assert!(card_area(track, 70.0, 100.0).is_none());
    }
}
