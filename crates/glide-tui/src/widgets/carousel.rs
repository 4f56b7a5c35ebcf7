use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let layout = &app.layout;

        let Some(carousel) = app.carousel.as_ref() else {
            let block = Block::bordered()
                .title(" Slides ")
                .border_style(Style::default().fg(theme.grey0));
            let paragraph = Paragraph::new("No slides configured")
                .style(Style::default().fg(theme.grey1))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, layout.carousel);
            return;
        };

        let border_color = if carousel.is_hovered() {
            theme.accent
        } else {
            theme.grey0
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Slides ")
            .title(
                Line::from(format!(" {}/{} ", carousel.cursor() + 1, carousel.slide_count()))
                    .right_aligned(),
            )
            .border_style(Style::default().fg(border_color));
        frame.render_widget(block, layout.carousel);

        render_arrow(frame, layout.carousel_prev, "‹", app);
        render_arrow(frame, layout.carousel_next, "›", app);

        // The active flag comes from the view, the content from config
        let deck = carousel.view();
        let shown = deck.slides.iter().position(|active| *active);
        if let Some(slide) = shown.and_then(|i| app.config.carousel.slides.get(i)) {
            let lines = vec![
                Line::from(Span::styled(
                    slide.title.clone(),
                    Style::default()
                        .fg(theme.highlight)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    slide.body.clone(),
                    Style::default().fg(theme.fg0),
                )),
            ];
            let area = vertically_centered(layout.slide, lines.len() as u16 + 1);
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }

        for (i, area) in layout.dots.iter().enumerate() {
            let active = deck.dots.get(i).copied().unwrap_or(false);
            let (symbol, color) = if active {
                ("●", theme.accent)
            } else if app.hovered_dot == Some(i) {
                ("○", theme.fg1)
            } else {
                ("○", theme.grey1)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(symbol, Style::default().fg(color))),
                *area,
            );
        }

        // Hovered dot shows its accessible label on the bottom border
        if let Some(label) = app.hovered_dot.and_then(|i| deck.labels.get(i)) {
            let width = (label.chars().count() as u16 + 2).min(layout.carousel.width);
            let area = Rect {
                x: layout.carousel.x + layout.carousel.width.saturating_sub(width) / 2,
                y: layout.carousel.bottom().saturating_sub(1),
                width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(format!(" {} ", label)).style(Style::default().fg(theme.fg1)),
                area,
            );
        }
    }
}

fn render_arrow(frame: &mut Frame, area: Rect, symbol: &str, app: &App) {
    let area = vertically_centered(area, 1);
    let paragraph = Paragraph::new(symbol)
        .style(
            Style::default()
                .fg(app.theme.fg1)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

pub(super) fn vertically_centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}
