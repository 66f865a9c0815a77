use black_market::app::App;
use black_market::clock::SystemClock;
use black_market::prefs::Prefs;
use black_market::state::AppResult;
use black_market::storage::{JsonFileStore, SharedStore};
use black_market::{handlers, logging, ui};
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{env, error::Error, io, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::{info, warn};

const STATE_FILE_NAME: &str = "state.json";

/// Application events
enum AppEvent {
    Terminal(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mut prefs = Prefs::load();

    // First argument overrides the data directory
    if let Some(dir) = env::args().nth(1) {
        prefs.data_dir = Some(PathBuf::from(dir));
    }
    let data_dir = prefs.data_dir();

    if let Err(e) = logging::init_logging(&logging::log_path(&data_dir)) {
        eprintln!("logging disabled: {e}");
    }
    info!(data_dir = %data_dir.display(), "starting");

    let storage: SharedStore = Arc::new(JsonFileStore::open(data_dir.join(STATE_FILE_NAME)));
    let mut app = App::new(prefs, Arc::new(SystemClock), storage);
    let tick_rate = app.config.tick_rate;

    // Enable terminal raw mode
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event loop channels
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    // Spawn terminal event handler
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;

            // Check for terminal events (non-blocking)
            while event::poll(Duration::from_millis(0)).unwrap_or(false) {
                match event::read() {
                    Ok(event) => {
                        if event_tx.send(AppEvent::Terminal(event)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to read terminal event");
                        break;
                    }
                }
            }

            // Send tick event
            if event_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Main application loop
    let result = run(&mut terminal, &mut app, &mut event_rx).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("shutting down");

    Ok(result?)
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> AppResult<()> {
    while !app.ui.should_quit {
        // Render UI
        terminal.draw(|f| ui::ui(f, app))?;

        // Handle events
        match event_rx.recv().await {
            Some(AppEvent::Terminal(CEvent::Key(key))) => handlers::handle_key_event(key, app),
            Some(AppEvent::Terminal(_)) => {}
            Some(AppEvent::Tick) => app.on_tick(),
            None => break,
        }
    }
    Ok(())
}
