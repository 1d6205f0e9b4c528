//! Shell detection and activation script rendering.
//!
//! A descriptor on its own is just data. Once the consumer knows the
//! concrete package locations, [`render_script`] turns it into a script for
//! a specific shell: variable exports first (placeholders substituted),
//! then the activation statements in order.
//!
//! Activation statements are POSIX and pass through untranslated; only the
//! export syntax differs per shell.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::descriptor::EnvironmentDescriptor;
use crate::placeholder::{self, PlaceholderError, Resolver};

/// Supported shell types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
  Bash,
  Zsh,
  Fish,
  Sh,
}

impl Shell {
  /// Detect the current shell from `$SHELL`, falling back to `sh`.
  pub fn detect() -> Self {
    if let Ok(shell) = env::var("SHELL") {
      let shell_name = PathBuf::from(&shell)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

      return Self::from_name(&shell_name).unwrap_or_else(|| {
        if shell_name.contains("zsh") {
          Shell::Zsh
        } else if shell_name.contains("bash") {
          Shell::Bash
        } else if shell_name.contains("fish") {
          Shell::Fish
        } else {
          Shell::Sh
        }
      });
    }

    Shell::Sh
  }

  /// Look up a shell by name
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "bash" => Some(Shell::Bash),
      "zsh" => Some(Shell::Zsh),
      "fish" => Some(Shell::Fish),
      "sh" => Some(Shell::Sh),
      _ => None,
    }
  }

  /// Get the shell name as a string
  pub fn as_str(&self) -> &'static str {
    match self {
      Shell::Bash => "bash",
      Shell::Zsh => "zsh",
      Shell::Fish => "fish",
      Shell::Sh => "sh",
    }
  }

  /// Generate an export statement for setting an environment variable
  pub fn export_var(&self, name: &str, value: &str) -> String {
    match self {
      Shell::Fish => format!("set -gx {} {:?}", name, value),
      Shell::Bash | Shell::Zsh | Shell::Sh => format!("export {}={:?}", name, value),
    }
  }

  /// Generate a comment line
  pub fn comment(&self, text: &str) -> String {
    format!("# {}", text)
  }

  /// Generate the script header/shebang
  pub fn header(&self) -> &'static str {
    match self {
      Shell::Bash => "#!/usr/bin/env bash",
      Shell::Zsh => "#!/usr/bin/env zsh",
      Shell::Fish => "# Fish shell environment",
      Shell::Sh => "#!/bin/sh",
    }
  }
}

impl fmt::Display for Shell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Render a descriptor into an activation script for the given shell.
///
/// Variables are exported in key order, then activation statements run in
/// descriptor order. Every value is substituted through `resolver` first.
///
/// # Errors
///
/// Fails if any embedded placeholder is malformed or cannot be resolved.
pub fn render_script(
  desc: &EnvironmentDescriptor,
  shell: Shell,
  resolver: &impl Resolver,
) -> Result<String, PlaceholderError> {
  let mut script = String::new();

  script.push_str(shell.header());
  script.push('\n');
  script.push_str(&shell.comment("workbench development shell"));
  script.push('\n');

  for (name, value) in &desc.variables {
    let resolved = placeholder::substitute(value, resolver)?;
    script.push_str(&shell.export_var(name, &resolved));
    script.push('\n');
  }

  for statement in &desc.activation_script {
    let resolved = placeholder::substitute(statement, resolver)?;
    script.push_str(&resolved);
    script.push('\n');
  }

  Ok(script)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::package::PackageRef;
  use crate::placeholder::PackageLocations;

  fn sample_descriptor() -> EnvironmentDescriptor {
    let mut desc = EnvironmentDescriptor::new();
    desc.push_library(PackageRef::new("libclang"));
    desc.set_var("LIBCLANG_PATH", "$${pkg:libclang:lib}/lib");
    desc.set_var("RUST_BACKTRACE", "1");
    desc.push_statement(r#"export DYLD_FALLBACK_LIBRARY_PATH="$(rustc --print sysroot)/lib""#);
    desc
  }

  #[test]
  fn bash_export_format() {
    let export = Shell::Bash.export_var("RUST_BACKTRACE", "1");
    assert_eq!(export, r#"export RUST_BACKTRACE="1""#);
  }

  #[test]
  fn fish_export_format() {
    let export = Shell::Fish.export_var("RUST_BACKTRACE", "1");
    assert_eq!(export, r#"set -gx RUST_BACKTRACE "1""#);
  }

  #[test]
  fn from_name_rejects_unknown_shell() {
    assert_eq!(Shell::from_name("powershell"), None);
    assert_eq!(Shell::from_name(""), None);
  }

  #[test]
  fn detect_never_panics() {
    let shell = Shell::detect();
    assert!(!shell.as_str().is_empty());
  }

  #[test]
  fn render_substitutes_variables_and_keeps_statement_order() {
    let mut locations = PackageLocations::new();
    locations.insert_output("libclang", "lib", "/pkgstore/libclang-lib");

    let script = render_script(&sample_descriptor(), Shell::Bash, &locations).unwrap();

    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines[0], "#!/usr/bin/env bash");
    assert_eq!(lines[1], "# workbench development shell");
    // BTreeMap ordering: LIBCLANG_PATH before RUST_BACKTRACE
    assert_eq!(lines[2], r#"export LIBCLANG_PATH="/pkgstore/libclang-lib/lib""#);
    assert_eq!(lines[3], r#"export RUST_BACKTRACE="1""#);
    // Activation statements come last, verbatim
    assert_eq!(
      lines[4],
      r#"export DYLD_FALLBACK_LIBRARY_PATH="$(rustc --print sysroot)/lib""#
    );
  }

  #[test]
  fn render_fails_on_unresolved_package() {
    let empty = PackageLocations::new();
    let result = render_script(&sample_descriptor(), Shell::Bash, &empty);
    assert!(matches!(
      result,
      Err(PlaceholderError::UnresolvedPackage { ref name, .. }) if name == "libclang"
    ));
  }
}
