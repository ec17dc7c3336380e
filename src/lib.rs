//! Blox - dataflow block graphs executed in rounds until quiescence
//!
//! This crate bundles [`blox_core`] (graph, scheduler, built-in blocks,
//! persistence) with the serializable types of [`blox_types`].
//!
//! # Example
//!
//! ```rust,ignore
//! use blox::prelude::*;
//!
//! let mut blox = Blox::load("graph.json", BlockRegistry::global())?;
//! let report = blox.run()?;
//! println!("{} rounds", report.rounds);
//! ```

pub use blox_core::*;
pub use blox_types as types;
