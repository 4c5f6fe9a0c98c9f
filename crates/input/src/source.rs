//! [`InputSource`] backed by the real terminal.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

use crate::core::{InputSource, PressedKeys, StopToken};
use crate::handler::KeyTracker;
use crate::map::{key_from_event, should_quit};

/// Reads crossterm key events without blocking the tick.
///
/// Raw mode is enabled for the lifetime of the value so single key presses
/// arrive without Enter; it is restored on drop.
pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self {
            tracker: KeyTracker::new(),
        })
    }

    pub fn with_tracker(mut self, tracker: KeyTracker) -> Self {
        self.tracker = tracker;
        self
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            log::warn!("failed to restore terminal mode: {err}");
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, keys: &mut PressedKeys, stop: &StopToken) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Release && should_quit(key) {
                log::info!("quit key pressed");
                stop.request_stop();
                continue;
            }
            let Some(k) = key_from_event(key) else {
                continue;
            };
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => self.tracker.press(k, Instant::now()),
                KeyEventKind::Release => self.tracker.release(k),
            }
        }
        self.tracker.expire(Instant::now());
        self.tracker.fill(keys);
        Ok(())
    }

    fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(());
                }
            }
        }
    }
}
