#![allow(dead_code)]

//! Action reconciliation
//!
//! Raw captured actions arrive once per DOM event; typing a five
//! character value would otherwise leave five near-duplicate records in
//! the log. The reconciler decides, against the tail of the log, whether
//! an incoming candidate is appended, merged into the last record, or
//! discarded, and writes through to the session buffer on every change.

pub mod policy;
pub mod reconciler;

pub use policy::ReconcilerPolicyView;
pub use reconciler::{Reconciler, Verdict};
