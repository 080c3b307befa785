//! Input/output helpers.
//!
//! - raw series snapshots, JSON read/write (`snapshot`)
//! - plotted pairs export, CSV (`export`)

pub mod export;
pub mod snapshot;

pub use export::*;
pub use snapshot::*;
