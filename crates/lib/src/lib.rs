//! workbench-lib: core types and logic for workbench
//!
//! This crate provides the fundamental types used throughout workbench:
//! - `Platform`: OS + architecture identifier selecting environment overlays
//! - `PackageRef`: opaque reference to an externally resolvable package
//! - `EnvironmentDescriptor`: the composed shell environment record
//! - `compose`: merges the base definition with platform overlays
//!
//! Package locations are not known at composition time; descriptor values
//! embed `$${pkg:...}` placeholders that the consuming package manager
//! resolves through the [`placeholder::Resolver`] trait.

pub mod compose;
pub mod descriptor;
pub mod package;
pub mod placeholder;
pub mod platform;
pub mod script;
