//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - date keys and exclusive date windows (`DateKey`, `DateWindow`)
//! - presentation modes (`Mode`)
//! - plotted output pairs (`ChartPoint`) and run settings (`PlotConfig`)

pub mod types;

pub use types::*;
