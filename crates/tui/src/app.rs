//! TUI application loop: owns the terminal and writes changes to the store.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{debug, info};

use petcare_persistence::{PetStore, SharedStore};

use crate::render::draw;
use crate::state::{AppCommand, PetCareApp};
use crate::theme::TuiTheme;

/// Carry out a command returned by `PetCareApp::handle_key`.
///
/// Returns `false` once the session should end.
pub async fn apply_command(app: &mut PetCareApp, store: &SharedStore, command: AppCommand) -> bool {
    match command {
        AppCommand::None => true,
        AppCommand::Persist => {
            match store.save(app.registry().pets()).await {
                Ok(()) => debug!(pets = app.registry().len(), "saved to {}", store.location()),
                Err(e) => app.report_save_error(&e),
            }
            true
        }
        AppCommand::Refresh => {
            app.refresh(petcare_core::today());
            true
        }
        AppCommand::Quit => false,
    }
}

pub async fn run_tui(app: &mut PetCareApp, store: SharedStore, tick_rate: Duration) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    info!(store = %store.location(), "tui session started");
    let result = event_loop(&mut terminal, app, &store, tick_rate).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("tui session ended");
    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut PetCareApp,
    store: &SharedStore,
    tick_rate: Duration,
) -> io::Result<()> {
    let theme = TuiTheme::default_dark();
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| draw(f, app, &theme))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Windows terminals also report releases.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let command = app.handle_key(&key);
                if !apply_command(app, store, command).await {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            let today = petcare_core::today();
            if today != app.today() {
                debug!(%today, "date changed, refreshing");
                app.refresh(today);
            }
            last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use async_trait::async_trait;
    use crossterm::event::KeyCode;
    use petcare_core::Pet;
    use petcare_persistence::{MemoryStore, Snapshot, StorageError};
    use std::sync::Arc;

    struct ReadOnlyStore;

    #[async_trait]
    impl PetStore for ReadOnlyStore {
        async fn load(&self) -> petcare_persistence::Result<Snapshot> {
            Ok(Snapshot::default())
        }

        async fn save(&self, _pets: &[Pet]) -> petcare_persistence::Result<()> {
            Err(StorageError::LockFailed("read-only".to_string()))
        }

        fn location(&self) -> String {
            "read-only".to_string()
        }
    }

    #[tokio::test]
    async fn test_persist_writes_registry() {
        let memory = Arc::new(MemoryStore::new());
        let store: SharedStore = memory.clone();
        let mut app = sample_app();

        app.handle_key(&ch('x'));
        let command = app.handle_key(&ch('y'));
        assert_eq!(command, AppCommand::Persist);
        assert!(apply_command(&mut app, &store, command).await);

        let snapshot = memory.load().await.unwrap();
        let names: Vec<_> = snapshot.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Tom"]);
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let store: SharedStore = Arc::new(ReadOnlyStore);
        let mut app = sample_app();
        app.handle_key(&ch('x'));
        let command = app.handle_key(&ch('y'));
        assert!(apply_command(&mut app, &store, command).await);
        let status = app.status().unwrap();
        assert!(status.text.starts_with("Error saving data:"));
        // the in-memory change is kept
        assert_eq!(app.registry().len(), 1);
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut app = sample_app();
        let command = app.handle_key(&key(KeyCode::Char('q')));
        assert!(!apply_command(&mut app, &store, command).await);
        assert!(apply_command(&mut app, &store, AppCommand::None).await);
    }
}
