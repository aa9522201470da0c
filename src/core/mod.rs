//! Core roast components
//!
//! File validation, the session state machine and the timed effects that
//! decorate it.

pub mod effects;
pub mod session;
pub mod upload;

pub use session::{Completion, Session, SessionError, SessionStatus};
