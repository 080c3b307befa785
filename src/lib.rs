//! `milk-stats` library crate.
//!
//! The binary (`milk-stats`) is a thin wrapper around this library so that:
//!
//! - the fetch/transform pass is testable without spawning processes
//! - presentation (printing, SVG, TUI) stays separate from the data pipeline

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod series;
pub mod tui;
