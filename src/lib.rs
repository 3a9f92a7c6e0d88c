//! ClipShelf: the state core of a clipboard history list.
//!
//! The heavy lifting lives in the workspace crates (`cs-core`, `cs-app`,
//! `cs-infra`); this crate wires them together and hosts the probe binary.

pub mod bootstrap;
pub mod probe;
