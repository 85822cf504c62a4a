//! A waitlist service: `POST /api/subscribe` records an email and the time it signed up
//! into a key-value store.

mod app;
pub mod config;
mod error;
pub mod store;
mod telemetry;
pub mod web;

pub use app::{App, AppState, InternalState};
pub use error::{Error, Result};
pub use telemetry::{init_dbg_tracing, init_production_tracing};
pub use web::serve;
