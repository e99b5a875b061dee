#![allow(dead_code)]

//! Session-scoped persistence for the recorded action log.
//!
//! The buffer mirrors browser sessionStorage semantics: one fixed key
//! holding the JSON-serialized ordered array of records, rewritten in
//! full on every mutation, surviving page navigation within the same
//! browsing session. Storage failures are logged and swallowed; the
//! in-memory log stays authoritative until the next successful flush.

pub mod buffer;
pub mod errors;
pub mod store;

pub use buffer::{ActionBuffer, ACTIONS_KEY};
pub use errors::StoreError;
pub use store::{MemorySessionStore, SessionStore};
