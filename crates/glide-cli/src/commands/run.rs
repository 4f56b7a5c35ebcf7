use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use glide_core::AppConfig;
use glide_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    layout::AppLayout,
    scroll::ScrollConfigExt,
    widgets::{CarouselWidget, SliderWidget, StatusBarWidget},
    Theme,
};

pub fn run(config: Arc<AppConfig>) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("glide"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), Theme::default());
    let event_handler = EventHandler::with_animation_tick(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_tick_duration(),
    );
    info!("Terminal host started ({} slides)", app.slide_count());

    let result = main_loop(&mut terminal, &mut app, &event_handler, &keymap);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    keymap: &Keymap,
) -> Result<()> {
    // Checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = false;

    loop {
        app.on_tick();
        let offset = app.update_animation();

        terminal.draw(|frame| {
            let layout = AppLayout::compute(frame.area(), app.slide_count());
            app.set_layout(layout);

            CarouselWidget::render(frame, app);
            SliderWidget::render(frame, app, offset);
            StatusBarWidget::render(frame, app.layout.status, app, keymap);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    app.clear_status();
                    let action = handle_key_event(key, keymap);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                // The next draw lays out the new size
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
