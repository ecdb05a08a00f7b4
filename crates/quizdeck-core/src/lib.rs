//! quizdeck-core — Quiz data model, loader, and session state machine.
//!
//! This crate defines the fundamental types and the session controller that
//! the quizdeck player builds on. Presentation (rendering, sound, confetti)
//! lives in the CLI crate and subscribes through [`session::SessionObserver`].

pub mod countdown;
pub mod error;
pub mod loader;
pub mod model;
pub mod report;
pub mod session;
