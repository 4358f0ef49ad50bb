// fleet-core/src/controller/event_loop.rs
// Multiplexes terminal input, settled search terms, ticks and shutdown

use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{Terminal, backend::Backend};
use tokio::sync::{mpsc, watch};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::controller::Action;
use crate::controller::action_dispatcher::{ActionDispatcher, DispatchResult};
use crate::controller::key_map::{KeyContext, map_key};
use crate::error::AppError;
use crate::model::app_state::AppState;
use crate::view::ui::View;

pub struct EventLoop {
    event_stream: EventStream,
    search_rx: mpsc::UnboundedReceiver<String>,
    tick: Interval,
    shutdown_rx: watch::Receiver<bool>,
    dispatcher: ActionDispatcher,
    event_count: u64,
}

impl EventLoop {
    pub fn new(
        search_rx: mpsc::UnboundedReceiver<String>,
        tick_rate: Duration,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        info!(
            marker = "EVENT_LOOP_INIT",
            tick_ms = tick_rate.as_millis(),
            "Initializing event loop"
        );

        let mut tick = tokio::time::interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            event_stream: EventStream::new(),
            search_rx,
            tick,
            shutdown_rx,
            dispatcher: ActionDispatcher::new(),
            event_count: 0,
        }
    }

    /// Wait for the next thing to do. `None` once every source is closed.
    pub async fn next_action(&mut self, ctx: KeyContext) -> Option<Action> {
        let action = tokio::select! {
            maybe_event = self.event_stream.next() => match maybe_event {
                Some(Ok(event)) => Self::handle_terminal_event(event, ctx),
                Some(Err(e)) => {
                    warn!(
                        marker = "TERMINAL_EVENT_ERROR",
                        error = %e,
                        "Failed to read terminal event"
                    );
                    Action::NoOp
                }
                None => {
                    info!(marker = "EVENT_STREAM_CLOSED", "Terminal event stream ended");
                    return None;
                }
            },

            Some(term) = self.search_rx.recv() => {
                debug!(marker = "SEARCH_SETTLED", "Debounced search term received");
                Action::SearchSettled(term)
            }

            _ = self.tick.tick() => Action::Tick,

            Ok(()) = self.shutdown_rx.changed() => {
                info!(marker = "SHUTDOWN_SIGNAL", "Shutdown requested");
                Action::Quit
            }
        };

        self.event_count += 1;
        Some(action)
    }

    fn handle_terminal_event(event: TermEvent, ctx: KeyContext) -> Action {
        match event {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => map_key(key, ctx),

            TermEvent::Resize(width, height) => {
                info!(marker = "TERMINAL_RESIZE", width, height, "Terminal resized");
                Action::Resize(width, height)
            }

            other => {
                trace!(event = ?other, "Unhandled terminal event");
                Action::NoOp
            }
        }
    }

    /// Draw when needed, wait for an action, dispatch it; until quit.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        state: &mut AppState,
    ) -> Result<(), AppError> {
        let size = terminal.size()?;
        self.dispatcher
            .handle(state, Action::Resize(size.width, size.height))
            .await;

        loop {
            if state.ui.needs_redraw() {
                terminal.draw(|frame| View::redraw(frame, state))?;
                state.ui.clear_redraw();
                state.ui.increment_frame();
            }

            let ctx = KeyContext::from(&state.ui);
            let Some(action) = self.next_action(ctx).await else {
                break;
            };

            if self.dispatcher.handle(state, action).await == DispatchResult::Terminate {
                break;
            }
        }

        info!(marker = "EVENT_LOOP_EXIT", events = self.event_count, "Event loop finished");
        Ok(())
    }
}
