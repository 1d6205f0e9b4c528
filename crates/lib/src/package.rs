//! Opaque package references.
//!
//! A [`PackageRef`] names a toolchain or library artifact that the external
//! package manager resolves to a concrete build. workbench never inspects a
//! reference beyond its identity; the optional version pin is carried along
//! verbatim for the consumer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named package, optionally pinned to a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRef {
  /// Package name as known to the external package manager.
  pub name: String,

  /// Optional version pin. `None` means "whatever the consumer resolves".
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
}

impl PackageRef {
  /// Create an unpinned package reference
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      version: None,
    }
  }

  /// Create a package reference pinned to a specific version
  pub fn pinned(name: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      version: Some(version.into()),
    }
  }

  /// Whether this reference carries a version pin
  pub fn is_pinned(&self) -> bool {
    self.version.is_some()
  }
}

impl fmt::Display for PackageRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.version {
      Some(version) => write!(f, "{}@{}", self.name, version),
      None => write!(f, "{}", self.name),
    }
  }
}
