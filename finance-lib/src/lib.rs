pub mod auth;
pub mod config;
mod error;
pub mod export;
pub mod report;
pub mod session;
pub mod tracing;
pub mod transaction;

pub use error::{TrackerError, ValidationError};
pub use session::{Session, Tracker};
