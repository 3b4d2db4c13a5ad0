//! logroll: move a log file aside and recreate it with a rollover marker.

pub mod activity_log;
pub mod cli;
pub mod config;
pub mod error;
pub mod mover;
pub mod output;
pub mod recreate;
pub mod rotator;
pub mod theme;

pub use error::RotationError;
pub use rotator::{rotate, RotationReport, Rotator};
