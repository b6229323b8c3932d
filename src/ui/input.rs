//! Key reader thread and the bounded input queue
//!
//! A background thread turns key presses into `InputAction`s and pushes them
//! onto a bounded channel. The frame loop drains the channel at the top of
//! every tick, so actions are applied in arrival order.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{Receiver, Sender};

use crate::core::error::{Result, RingError};
use crate::core::types::{InputAction, Timestamp};
use crate::session::SessionController;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Map a key to the action it triggers, if any
pub fn action_for_key(code: KeyCode) -> Option<InputAction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(InputAction::DodgeLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(InputAction::DodgeRight),
        KeyCode::Char(' ') => Some(InputAction::Punch),
        KeyCode::Enter => Some(InputAction::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => Some(InputAction::Exit),
        _ => None,
    }
}

fn action_for_event(event: &Event) -> Option<InputAction> {
    match event {
        Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => action_for_key(*code),
        _ => None,
    }
}

/// Spawn the key reader
///
/// The thread exits once the receiving side is dropped, after sending
/// `Exit`, or when the terminal stops delivering events.
pub fn spawn_key_reader(tx: Sender<InputAction>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "input poll failed");
                    break;
                }
            }

            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "input read failed");
                    break;
                }
            };

            let Some(action) = action_for_event(&event) else {
                continue;
            };

            tracing::trace!(?action, "key");
            // Blocks only while the queue is full
            if tx.blocking_send(action).is_err() || action == InputAction::Exit {
                break;
            }
        }
    })
}

/// Apply every queued action to the session, oldest first
///
/// Returns how many actions were applied. A disconnected queue with nothing
/// left in it is reported as `InputClosed`.
pub fn drain_into(
    rx: &mut Receiver<InputAction>,
    session: &mut SessionController,
    now: Timestamp,
) -> Result<usize> {
    let mut applied = 0;
    loop {
        match rx.try_recv() {
            Ok(action) => {
                session.handle_input(action, now);
                applied += 1;
            }
            Err(TryRecvError::Empty) => return Ok(applied),
            Err(TryRecvError::Disconnected) => {
                if applied > 0 {
                    return Ok(applied);
                }
                return Err(RingError::InputClosed);
            }
        }
    }
}
