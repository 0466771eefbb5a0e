//! Proportion trick generator for Source engine playermodels.
//!
//! Reads the `$definebone` block of a decompiled QC and produces two single
//! frame, skeleton-only SMDs plus a QC snippet. Both SMDs carry the model's
//! rotations; one uses the model's bone positions and the other the stock HL2
//! female positions, so studiomdl's `subtract` leaves a pure translation
//! delta that is then played as an always-on additive sequence.

mod core;
mod data;
mod emit;
mod generator;
mod matcher;
mod parser;
mod pose;

pub mod config;
pub mod export;

pub use crate::config::*;
pub use crate::core::*;
pub use crate::data::*;
pub use crate::emit::*;
pub use crate::generator::*;
pub use crate::matcher::*;
pub use crate::parser::*;
pub use crate::pose::*;

pub use anyhow;
pub use serde;
pub use serde_derive;
pub use serde_json;
pub use glam;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
