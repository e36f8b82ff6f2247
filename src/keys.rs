use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Teams),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Players),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Scoreboard),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Standings),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Row navigation
        (_, Char('j') | KeyCode::Down, _) => guard.select_next(),
        (_, Char('k') | KeyCode::Up, _) => guard.select_prev(),

        // Players tab: cycle the team filter
        (MenuItem::Players, Char('t'), _) => guard.cycle_team_filter(),

        // Manual refresh of the current tab (cache-bounded) and the scoreboard
        (_, Char('r'), _) => {
            let dataset = guard.active_dataset();
            drop(guard);
            if let Some(kind) = dataset {
                let _ = network_requests
                    .send(NetworkRequest::LoadDataset { kind })
                    .await;
            }
            let _ = network_requests.send(NetworkRequest::RefreshScoreboard).await;
            return;
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
