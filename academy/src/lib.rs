//! Browser front end for the academic mentor.
//!
//! Serves a single page plus a small JSON API. Each browser tab starts its own
//! session, so emotion counters are never shared between students.

pub mod config;
pub mod logging;
pub mod web;

pub use config::{Backend, Config};
pub use logging::init_logging;
pub use web::{ApiError, AppState, app, index};
