#![allow(dead_code)]

//! Control signal bridge
//!
//! The floating panel cannot call into the host directly; it writes a
//! shared start-signal flag that the host polls. The bridge also owns
//! the drag bookkeeping that keeps a dragged panel from spuriously
//! starting a recording.

pub mod bridge;
pub mod drag;
pub mod policy;

pub use bridge::{ControlBridge, StartSignal, START_ACTION};
pub use drag::DragTracker;
pub use policy::BridgePolicyView;
