//! The composed environment descriptor.
//!
//! An [`EnvironmentDescriptor`] is the output of composition: the full set of
//! libraries, tools, variables, and activation statements for one platform.
//! It is constructed once per composition request and handed to the external
//! package manager, which resolves each [`PackageRef`], exports `variables`
//! into the shell process, and runs `activation_script` in order at entry.
//!
//! # Ordering
//!
//! Input sequences keep insertion order (base first, then overlays) so the
//! descriptor is reproducible for a given platform. `variables` uses
//! [`BTreeMap`] for deterministic serialization order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::package::PackageRef;

/// A fully composed shell environment for one platform.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentDescriptor {
  /// Libraries the shell's builds link or compile against.
  pub library_inputs: Vec<PackageRef>,

  /// Build-time-only tools.
  pub tool_inputs: Vec<PackageRef>,

  /// Shell statements executed in order when the environment is entered.
  pub activation_script: Vec<String>,

  /// Environment variables exported into the shell process.
  pub variables: BTreeMap<String, String>,
}

impl EnvironmentDescriptor {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a library input unless one with the same name is already present.
  pub fn push_library(&mut self, package: PackageRef) {
    if !self.has_library(&package.name) {
      self.library_inputs.push(package);
    }
  }

  /// Append a tool input unless one with the same name is already present.
  pub fn push_tool(&mut self, package: PackageRef) {
    if !self.has_tool(&package.name) {
      self.tool_inputs.push(package);
    }
  }

  /// Append a statement to the activation script.
  pub fn push_statement(&mut self, statement: impl Into<String>) {
    self.activation_script.push(statement.into());
  }

  /// Set an environment variable. Later writes win; keys stay unique.
  pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.variables.insert(name.into(), value.into());
  }

  /// Look up a library input by name.
  pub fn library(&self, name: &str) -> Option<&PackageRef> {
    self.library_inputs.iter().find(|p| p.name == name)
  }

  /// Look up a tool input by name.
  pub fn tool(&self, name: &str) -> Option<&PackageRef> {
    self.tool_inputs.iter().find(|p| p.name == name)
  }

  pub fn has_library(&self, name: &str) -> bool {
    self.library(name).is_some()
  }

  pub fn has_tool(&self, name: &str) -> bool {
    self.tool(name).is_some()
  }
}
