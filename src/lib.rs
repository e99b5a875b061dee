#![allow(dead_code)]

//! Webscribe: records user interactions in a live page (and every
//! nested frame) as a structured, replayable, deduplicated action log.
//!
//! The kernel crates under `crates/` do the work; this crate wires
//! them into a recording session and exposes the host-facing surface:
//! dispatch events, attach frames, poll the control bridge, harvest
//! the log.

pub mod config;
pub mod session;
pub mod trace;

pub use config::RecorderConfig;
pub use session::RecorderSession;
pub use trace::{TraceRunner, TraceStep};
