//! Roast My Resume
//!
//! Validates a resume (PDF or image), sends it to Gemini with a persona
//! picked from the roast intensity and language, and presents the
//! structured critique.

pub mod cli;
pub mod config;
pub mod core;
pub mod presenter;
pub mod providers;
pub mod roast;
