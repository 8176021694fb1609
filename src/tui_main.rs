use anyhow::Result;
use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tokio::sync::Mutex;

use standx_estimator::{
    config::Settings,
    network::{GlobalPointsEstimator, PointsEstimate, RankApiClient},
    tui::{app::Screen, ui, App, Event as TuiEvent, EventHandler},
};

pub async fn run_tui(settings: Settings, offline: bool) -> Result<()> {
    // Disable logging to prevent screen corruption
    disable_logging_output();

    // Resolve the network estimate before taking over the terminal.
    let estimator = if offline {
        None
    } else {
        Some(build_estimator(&settings)?)
    };
    let estimate = match &estimator {
        Some(estimator) => estimator.current_estimate().await,
        None => PointsEstimate::fallback(settings.api.fallback_global_points),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let start_date = chrono::Utc::now().date_naive();
    let app = Arc::new(Mutex::new(App::new(&settings, estimate, start_date)));
    let events = EventHandler::new(250);

    terminal.clear()?;

    let res = run_app(&mut terminal, app, events, estimator.map(Arc::new)).await;

    // Always restore terminal state, even if there was an error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Application error: {}", err);
        Err(err)
    } else {
        Ok(())
    }
}

fn build_estimator(settings: &Settings) -> Result<GlobalPointsEstimator> {
    let client = RankApiClient::new(settings.api.clone())?;
    Ok(GlobalPointsEstimator::new(
        Arc::new(client),
        std::time::Duration::from_secs(settings.api.cache_ttl_seconds),
        settings.api.fallback_global_points,
    ))
}

fn disable_logging_output() {
    // Redirect tracing output to a null writer to prevent screen corruption
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let null_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::sink)
        .with_filter(tracing_subscriber::filter::LevelFilter::OFF);

    let _ = tracing_subscriber::registry().with(null_layer).try_init();
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    events: EventHandler,
    estimator: Option<Arc<GlobalPointsEstimator>>,
) -> Result<()> {
    loop {
        {
            let app_guard = app.lock().await;
            if app_guard.should_quit {
                return Ok(());
            }
        }

        {
            let app_guard = app.lock().await;
            terminal.draw(|f| ui::draw(f, &app_guard))?;
        }

        let event = match events.next() {
            Ok(event) => event,
            Err(_) => return Ok(()),
        };

        let TuiEvent::Key(key) = event else {
            continue;
        };

        let mut app_guard = app.lock().await;
        match app_guard.screen {
            Screen::Dashboard => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    app_guard.should_quit = true;
                }
                KeyCode::Tab | KeyCode::Right => {
                    app_guard.focus_next();
                }
                KeyCode::BackTab | KeyCode::Left => {
                    app_guard.focus_prev();
                }
                KeyCode::Up | KeyCode::Char('+') => {
                    app_guard.increment();
                }
                KeyCode::Down | KeyCode::Char('-') => {
                    app_guard.decrement();
                }
                KeyCode::Char('b') | KeyCode::Char(' ') => {
                    app_guard.toggle_bonus();
                }
                KeyCode::Char('d') | KeyCode::Enter => {
                    app_guard.toggle_screen();
                }
                KeyCode::Char('r') => {
                    if let Some(estimator) = &estimator {
                        if !app_guard.refreshing {
                            app_guard.refreshing = true;
                            drop(app_guard);

                            let app_clone = Arc::clone(&app);
                            let estimator = Arc::clone(estimator);
                            tokio::spawn(async move {
                                let estimate = estimator.refresh().await;
                                let mut app = app_clone.lock().await;
                                app.set_estimate(estimate);
                            });
                        }
                    }
                }
                _ => {}
            },
            Screen::Breakdown => match key.code {
                KeyCode::Char('q') => {
                    app_guard.should_quit = true;
                }
                KeyCode::Char('d') | KeyCode::Esc | KeyCode::Enter => {
                    app_guard.toggle_screen();
                }
                KeyCode::Up => {
                    app_guard.scroll_up();
                }
                KeyCode::Down => {
                    app_guard.scroll_down();
                }
                _ => {}
            },
        }
    }
}
