#![allow(dead_code)]

//! Frame relay
//!
//! Runs once per browsing context. Capturing-phase listeners turn raw
//! DOM events into action records; rapid keystrokes are coalesced by a
//! per-selector debounce bank; records captured inside nested frames
//! are forwarded to the parent context through a typed, serialized
//! envelope since the two contexts share no heap. The relay itself
//! persists nothing.

pub mod capture;
pub mod debounce;
pub mod errors;
pub mod model;
pub mod policy;
pub mod ports;
pub mod registry;
pub mod relay;
pub mod transport;

pub use capture::{EventCapture, FrameScope};
pub use debounce::DebounceBank;
pub use errors::RelayError;
pub use model::{now_ms, DomEvent};
pub use policy::RelayPolicyView;
pub use ports::ActionSink;
pub use registry::InstallRegistry;
pub use relay::FrameRelay;
pub use transport::{RelayMessage, RelaySink};
