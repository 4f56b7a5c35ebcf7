use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::input::Action;
use crate::keymap::Keymap;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, keymap: &Keymap) {
        let theme = &app.theme;

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(" {} | {} | {}", slide_text(app), autoplay_text(app), strip_text(app)),
        };

        let help_hint = help_hint(keymap);
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn slide_text(app: &App) -> String {
    match app.carousel.as_ref() {
        Some(carousel) => format!("Slide {}/{}", carousel.cursor() + 1, carousel.slide_count()),
        None => "No slides".to_string(),
    }
}

fn autoplay_text(app: &App) -> String {
    let Some(carousel) = app.carousel.as_ref() else {
        return "Autoplay off".to_string();
    };
    match app.time_until_advance() {
        Some(left) => format!("Autoplay: next in {:.1}s", left.as_secs_f32()),
        None if carousel.is_autoplay() && carousel.is_hovered() => {
            "Autoplay paused".to_string()
        }
        None => "Autoplay off".to_string(),
    }
}

fn strip_text(app: &App) -> String {
    format!(
        "Strip {:.0}/{:.0}",
        app.slider.offset(),
        app.slider.max_offset()
    )
}

fn help_hint(keymap: &Keymap) -> String {
    let key = |action| keymap.describe(action).unwrap_or_else(|| "-".to_string());
    format!(
        " {}:quit {}/{}:slide {}/{}:strip {}:autoplay ",
        key(Action::Quit),
        key(Action::CarouselPrev),
        key(Action::CarouselNext),
        key(Action::SliderPrev),
        key(Action::SliderNext),
        key(Action::ToggleAutoplay),
    )
}
