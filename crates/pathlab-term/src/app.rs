//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! Besides input, the loop owns a single one-shot timer. A model asks for it
//! with [`Effect::Tick`]; once due, the loop delivers [`Msg::Tick`]. Models
//! animate by answering each tick with the next one.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::messages::Msg;
use crate::screen::{Frame, Screen, compute_frame};

/// Upper bound on a single driver poll, so timers fire close to schedule.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Deliver [`Msg::Tick`] after the delay. Replaces any pending tick.
    Tick(Duration),
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `screen`.
    fn draw(&self, screen: &mut Screen);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait at most `timeout` for input, sending any messages through `tx`.
    fn poll_msgs(
        &mut self,
        tx: &Sender<Msg>,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Write a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Restore the terminal. Called once on every exit path, including a
    /// failed [`init`](Driver::init).
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    timer: Option<Instant>,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
            timer: None,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run the Model-View-Update loop until the model returns
    /// [`Effect::End`]: poll → (tick) → update → draw → diff → flush.
    ///
    /// The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let result = self.driver.init().and_then(|()| self.event_loop());
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev = Screen::new(self.width, self.height);
        let mut curr = Screen::new(self.width, self.height);
        let mut done = self.process_pending(&rx, &mut prev, &mut curr)?;

        while !done {
            let timeout = self.timer.map_or(POLL_INTERVAL, |due| {
                due.saturating_duration_since(Instant::now())
                    .min(POLL_INTERVAL)
            });
            self.driver.poll_msgs(&tx, timeout)?;

            if self.timer.is_some_and(|due| Instant::now() >= due) {
                self.timer = None;
                tx.send(Msg::Tick).ok();
            }
            done = self.process_pending(&rx, &mut prev, &mut curr)?;
        }
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    /// Returns `true` once the model asked to stop.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        prev: &mut Screen,
        curr: &mut Screen,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if matches!(msg, Msg::Screen { .. }) {
                prev.invalidate();
            }
            match self.model.update(msg) {
                Some(Effect::End) => return Ok(true),
                Some(Effect::Tick(delay)) => self.timer = Some(Instant::now() + delay),
                None => {}
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev.copy_from(curr);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use pathlab_core::Point;

    use super::*;
    use crate::messages::Key;
    use crate::screen::ScreenCell;

    /// Feeds one scripted batch per poll, waiting out the timeout on empty
    /// batches; sends `Quit` once the script runs out. Records every flushed
    /// frame.
    #[derive(Default)]
    struct ScriptDriver {
        script: VecDeque<Vec<Msg>>,
        frames: Vec<Frame>,
        polls: usize,
        inited: bool,
        closed: bool,
    }

    impl Driver for ScriptDriver {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            self.inited = true;
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            tx: &Sender<Msg>,
            timeout: Duration,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.polls += 1;
            if self.polls > 10_000 {
                return Err("script driver polled too often".into());
            }
            match self.script.pop_front() {
                Some(batch) if batch.is_empty() => std::thread::sleep(timeout),
                Some(batch) => batch.into_iter().for_each(|m| {
                    tx.send(m).ok();
                }),
                None => {
                    tx.send(Msg::Quit).ok();
                }
            }
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    /// Counts ticks; `t` starts a three-tick animation.
    #[derive(Default)]
    struct Counter {
        ticks: u32,
        seen: Vec<Msg>,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            self.seen.push(msg.clone());
            match msg {
                Msg::KeyDown {
                    key: Key::Char('t'),
                } => Some(Effect::Tick(Duration::ZERO)),
                Msg::Tick => {
                    self.ticks += 1;
                    (self.ticks % 3 != 0).then_some(Effect::Tick(Duration::from_millis(1)))
                }
                Msg::Quit => Some(Effect::End),
                _ => None,
            }
        }

        fn draw(&self, screen: &mut Screen) {
            screen.fill(ScreenCell::default());
            screen.print(Point::ZERO, &self.ticks.to_string(), Default::default());
        }
    }

    fn app(script: Vec<Vec<Msg>>) -> App<Counter, ScriptDriver> {
        App::new(AppConfig {
            model: Counter::default(),
            driver: ScriptDriver {
                script: script.into(),
                ..Default::default()
            },
            width: 4,
            height: 1,
        })
    }

    #[test]
    fn init_first_then_end_closes_driver() {
        let mut a = app(vec![]);
        a.run().unwrap();
        assert_eq!(a.model().seen.first(), Some(&Msg::Init));
        assert_eq!(a.model().seen.last(), Some(&Msg::Quit));
        assert!(a.driver().inited);
        assert!(a.driver().closed);
    }

    #[test]
    fn ticks_are_rescheduled_until_the_model_stops() {
        // Empty batches keep the loop polling while ticks come due.
        let mut script = vec![vec![Msg::key(Key::Char('t'))]];
        script.extend(std::iter::repeat_n(vec![], 8));
        let mut a = app(script);
        a.run().unwrap();
        assert_eq!(a.model().ticks, 3);
        let ticks = a.model().seen.iter().filter(|m| **m == Msg::Tick).count();
        assert_eq!(ticks, 3);
    }

    #[test]
    fn tick_redraws_changed_cells_only() {
        let mut script = vec![vec![Msg::key(Key::Char('t'))]];
        script.extend(std::iter::repeat_n(vec![], 8));
        let mut a = app(script);
        a.run().unwrap();
        let frames = &a.driver().frames;
        // Init draws "0"; each tick rewrites only the digit.
        assert_eq!(frames[0].cells.len(), 1);
        assert!(frames[1..].iter().all(|f| f.cells.len() == 1));
        assert_eq!(frames.last().unwrap().cells[0].cell.ch, '3');
    }

    #[test]
    fn a_later_tick_request_replaces_the_pending_one() {
        struct Rearm(Vec<Msg>);
        impl Model for Rearm {
            fn update(&mut self, msg: Msg) -> Option<Effect> {
                self.0.push(msg.clone());
                match msg {
                    Msg::Init => Some(Effect::Tick(Duration::from_secs(3600))),
                    Msg::KeyDown { .. } => Some(Effect::Tick(Duration::ZERO)),
                    Msg::Quit => Some(Effect::End),
                    _ => None,
                }
            }
            fn draw(&self, _: &mut Screen) {}
        }
        let mut a = App::new(AppConfig {
            model: Rearm(Vec::new()),
            driver: ScriptDriver {
                script: vec![vec![Msg::key(Key::Enter)], vec![], vec![]].into(),
                ..Default::default()
            },
            width: 1,
            height: 1,
        });
        a.run().unwrap();
        let ticks = a.model().0.iter().filter(|m| **m == Msg::Tick).count();
        assert_eq!(ticks, 1);
    }

    #[test]
    fn resize_repaints_whole_screen() {
        let mut a = app(vec![vec![Msg::Screen {
            width: 4,
            height: 1,
        }]]);
        a.run().unwrap();
        let frames = &a.driver().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].cells.len(), 4);
    }

    #[test]
    fn driver_errors_propagate_and_close() {
        struct Failing(bool);
        impl Driver for Failing {
            fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
                Ok(())
            }
            fn poll_msgs(
                &mut self,
                _: &Sender<Msg>,
                _: Duration,
            ) -> Result<(), Box<dyn std::error::Error>> {
                Err("boom".into())
            }
            fn flush(&mut self, _: Frame) -> Result<(), Box<dyn std::error::Error>> {
                Ok(())
            }
            fn close(&mut self) {
                self.0 = true;
            }
        }
        let mut a = App::new(AppConfig {
            model: Counter::default(),
            driver: Failing(false),
            width: 1,
            height: 1,
        });
        let err = a.run().unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(a.driver().0);
    }

    #[test]
    fn failed_init_still_closes() {
        #[derive(Default)]
        struct NoTerminal {
            polled: bool,
            closed: bool,
        }
        impl Driver for NoTerminal {
            fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
                Err("not a terminal".into())
            }
            fn poll_msgs(
                &mut self,
                _: &Sender<Msg>,
                _: Duration,
            ) -> Result<(), Box<dyn std::error::Error>> {
                self.polled = true;
                Ok(())
            }
            fn flush(&mut self, _: Frame) -> Result<(), Box<dyn std::error::Error>> {
                Ok(())
            }
            fn close(&mut self) {
                self.closed = true;
            }
        }
        let mut a = App::new(AppConfig {
            model: Counter::default(),
            driver: NoTerminal::default(),
            width: 1,
            height: 1,
        });
        let err = a.run().unwrap_err();
        assert_eq!(err.to_string(), "not a terminal");
        assert!(a.driver().closed);
        assert!(!a.driver().polled);
        assert!(a.model().seen.is_empty());
    }
}
