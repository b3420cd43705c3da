//! Headless animation: step a search with a fixed pause between steps.

use std::thread;
use std::time::Duration;

use pathlab_paths::{Outcome, Step};

use crate::session::Session;

/// Start a search on `session` and drive it to the end, calling `render`
/// after every step and sleeping `delay` between non-terminal steps.
///
/// Returns `None` when the search cannot start (already running, or start
/// or end missing).
pub fn animate<F>(session: &mut Session, delay: Duration, mut render: F) -> Option<Outcome>
where
    F: FnMut(&Session, Step),
{
    if !session.run() {
        return None;
    }
    while let Some(step) = session.advance() {
        render(session, step);
        if step.is_terminal() {
            break;
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    session.outcome().cloned()
}
