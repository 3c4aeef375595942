pub mod action;
pub mod handler;
pub mod network;
pub mod state;
pub mod view;
pub mod widgets;

use crate::client::ApiClient;
use crate::config::Config;
use crate::route::Route;
use action::{Action, AppEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use state::AppState;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

const TICK_RATE: Duration = Duration::from_millis(50);

/// Runs the terminal UI starting at `route` until the user quits.
pub async fn run(config: Config, route: Route) -> Result<()> {
    let client = ApiClient::from_config(&config).context("Could not set up the API client")?;

    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let worker = tokio::spawn(network::run(client, action_rx, event_tx));

    let (mut state, initial) = AppState::new(&config, route);
    action_tx
        .send(Action::Fetch(initial))
        .context("Network worker exited early")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut state, &action_tx, event_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let _ = action_tx.send(Action::Quit);
    if let Err(e) = worker.await {
        log::warn!("Network worker panicked: {}", e);
    }
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    actions: &UnboundedSender<Action>,
    mut events: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    while !state.should_quit {
        while let Ok(AppEvent::Response(response)) = events.try_recv() {
            state.on_response(response);
        }

        terminal.draw(|f| view::draw(f, state))?;

        if event::poll(TICK_RATE)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            for action in handler::handle_key_event(state, key) {
                if let Action::Fetch(req) = &action {
                    log::debug!("Request #{} queued", req.ticket().value());
                }
                // Quit is handled after the loop.
                if !matches!(action, Action::Quit) {
                    actions
                        .send(action)
                        .context("Network worker exited early")?;
                }
            }
        }
    }
    Ok(())
}
