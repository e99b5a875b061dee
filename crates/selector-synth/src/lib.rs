#![allow(dead_code)]

//! Selector synthesis
//!
//! Turns a detached element snapshot into a `{css, xpath}` pair using a
//! fixed priority order: id, then name attribute, then tag with an
//! optional first class token. Optimized for stability under markup
//! churn rather than uniqueness; downstream replay tolerates ambiguity.

pub mod snapshot;
pub mod synth;

pub use snapshot::{ElementSnapshot, SelectedOption};
pub use synth::{synthesize, SelectorPair, SENTINEL_TAG, SENTINEL_XPATH};
