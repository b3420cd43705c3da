//! **pathlab-term** — the frontend plumbing shared by pathlab drivers.
//!
//! A styled character [`Screen`], input [`Msg`]s, and the Elm-architecture
//! application loop ([`Model`], [`Driver`], [`Effect`], [`App`]) with
//! one-shot timer ticks for animation.

pub mod app;
pub mod messages;
pub mod screen;
pub mod style;

pub use app::{App, AppConfig, Driver, Effect, Model};
pub use messages::{Key, MouseAction, Msg};
pub use screen::{Frame, FrameCell, Screen, ScreenCell, compute_frame};
pub use style::{AttrMask, Color, Style};
