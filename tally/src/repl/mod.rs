pub mod handler;
pub mod key_action;
pub mod state;
pub mod view;

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::config::Config;
use crate::errors::TallyError;
use crate::repl::key_action::{KeyContext, determine_key_action};
use crate::repl::state::{Advisory, Selection};
use crate::terminal::TerminalGuard;
use crate::terminal::renderer::TerminalRenderer;
use crate::time_input::TimeInput;
use anyhow::{Context as _, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tally_core::{Clock, SessionState, SystemClock};
use tokio::time::{Instant as TokioInstant, MissedTickBehavior, interval_at};
use tracing::{debug, warn};

/// How often expired advisories are checked for.
const TICK_MS: u64 = 250;

pub struct Repl<C: Clock = SystemClock, K: ClipboardSink = SystemClipboard> {
    pub session: SessionState<C>,
    pub selection: Selection,
    pub time_input: TimeInput,
    pub editing_time: bool,
    pub help_visible: bool,
    pub should_quit: bool,
    advisory: Option<Advisory>,
    message_timeout: Duration,
    clipboard: K,
}

impl<C: Clock, K: ClipboardSink> Repl<C, K> {
    pub fn new(config: &Config, clock: C, clipboard: K) -> Self {
        let time_input = TimeInput::initial(&clock.now());
        Self {
            session: SessionState::new(clock),
            selection: Selection::from_ids(&config.selection),
            time_input,
            editing_time: false,
            help_visible: false,
            should_quit: false,
            advisory: None,
            message_timeout: Duration::from_millis(config.message_timeout_ms),
            clipboard,
        }
    }

    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            editing_time: self.editing_time,
            help_visible: self.help_visible,
        }
    }

    pub fn summary(&self) -> String {
        self.session.summary(&self.selection.ids())
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_ref().map(|a| a.text.as_str())
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.advisory = Some(Advisory::new(text, self.message_timeout));
    }

    /// Drop the advisory if it has expired. Returns true when the screen
    /// needs repainting.
    pub fn expire_advisory(&mut self, now: Instant) -> bool {
        if self.advisory.as_ref().is_some_and(|a| a.is_expired(now)) {
            self.advisory = None;
            return true;
        }
        false
    }

    fn copy_to_clipboard(&mut self, text: &str, done: &str) {
        match self.clipboard.copy(text) {
            Ok(()) => self.notify(done),
            Err(err) => {
                warn!("clipboard copy failed: {err}");
                self.notify(format!("Copy failed: {err}"));
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<(), TallyError> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = determine_key_action(&key, &self.key_context());
                debug!("key {:?} -> {:?}", key.code, action);
                handler::handle_key_action(self, action);
                self.redraw()
            }
            Event::Resize(_, _) => self.redraw(),
            _ => Ok(()),
        }
    }

    fn redraw(&self) -> Result<(), TallyError> {
        let (width, height) = terminal::size()?;
        let mut renderer = TerminalRenderer::stdout();
        view::paint(&mut renderer, &view::compose(self, width, height))?;
        renderer.present()
    }

    pub async fn run_interactive(&mut self) -> Result<()> {
        let mut reader = EventStream::new();
        let _guard = TerminalGuard::enter().context("failed to prepare terminal")?;
        self.redraw().context("failed to draw screen")?;

        let mut tick = interval_at(
            TokioInstant::now() + Duration::from_millis(TICK_MS),
            Duration::from_millis(TICK_MS),
        );
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if self.expire_advisory(Instant::now()) {
                        self.redraw().context("failed to draw screen")?;
                    }
                }
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self
                            .handle_event(event)
                            .context("failed to update screen")?,
                        Some(Err(err)) => {
                            return Err(err).context("failed to read terminal event");
                        }
                        None => break,
                    }
                    if self.should_quit {
                        debug!("quit requested");
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
