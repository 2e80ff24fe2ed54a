use zews::app::{App, AppMessage};
use zews::cli::RunOptions;
use zews::config::ViewerConfig;
use zews::logging::init_tracing;
use zews::terminal::{setup_panic_hook, TerminalManager};
use zews::ui;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind, MouseButton, MouseEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use tokio::sync::mpsc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// UI tick, roughly 60 frames per second
const TICK_MS: u64 = 16;

/// Lines per mouse wheel step in the overlay
const WHEEL_STEP: u16 = 3;

fn main() -> Result<()> {
    let options = RunOptions::parse();

    color_eyre::install()?;

    let config = ViewerConfig::from_env()?;
    let config = options.apply_to(config);

    if let Some(path) = init_tracing(&config.log_level) {
        tracing::info!("zews {} logging to {}", VERSION, path.display());
    }

    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config, options))
}

async fn run(config: ViewerConfig, options: RunOptions) -> Result<()> {
    let route = options.initial_route();
    tracing::info!("Starting at {} against {}", route, config.publications_url());

    let mut app = App::from_config(config, route)?;

    let mut manager = TerminalManager::new()?;
    let result = run_app(manager.terminal(), &mut app).await;
    manager.restore()?;

    if let Err(err) = &result {
        tracing::error!("Exited with error: {}", err);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    app.start();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        let timeout = tokio::time::sleep(std::time::Duration::from_millis(TICK_MS));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if app.handle_key_event(key) {
                            app.mark_dirty();
                        }
                    }
                    Some(Ok(Event::Mouse(mouse_event))) => match mouse_event.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            if let Some(action) = app
                                .hit_registry
                                .hit_test(mouse_event.column, mouse_event.row)
                            {
                                ui::handle_click_action(app, action);
                            }
                        }
                        MouseEventKind::ScrollDown => {
                            if app.is_overlay_open() {
                                app.scroll_overlay_down(WHEEL_STEP);
                            } else {
                                app.select_down();
                            }
                        }
                        MouseEventKind::ScrollUp => {
                            if app.is_overlay_open() {
                                app.scroll_overlay_up(WHEEL_STEP);
                            } else {
                                app.select_up();
                            }
                        }
                        _ => {}
                    },
                    Some(Ok(Event::Resize(width, height))) => {
                        app.update_terminal_dimensions(width, height);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::warn!("Terminal event error: {}", err);
                    }
                    None => {
                        app.quit();
                    }
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }
    }
}
