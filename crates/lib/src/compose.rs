//! Environment composition: base definition plus platform overlays.
//!
//! [`compose`] is the single entry point. It starts from the common base
//! (libraries, tools, variables, activation statements) and applies the
//! platform-conditional overlays in a fixed order, so the same identifier
//! always yields a structurally identical [`EnvironmentDescriptor`].
//!
//! Composition is pure: no I/O, no detection, no package resolution. The
//! descriptor carries `$${pkg:...}` placeholders wherever an on-disk
//! location would be needed; resolving those is the consumer's job.

use thiserror::Error;
use tracing::debug;

use crate::descriptor::EnvironmentDescriptor;
use crate::package::PackageRef;
use crate::placeholder;
use crate::platform::Platform;

/// Libraries every platform links or compiles against.
const BASE_LIBRARIES: [&str; 4] = ["libclang", "openssl", "libiconv", "zlib"];

/// Build-time tools every platform gets.
const BASE_TOOLS: [&str; 5] = ["rustup", "cmake", "pkg-config", "protobuf", "python3"];

/// Frameworks linked on Apple silicon instead of the extra debug tooling.
const APPLE_FRAMEWORKS: [&str; 6] = [
  "CoreFoundation",
  "CoreServices",
  "Security",
  "SystemConfiguration",
  "Metal",
  "QuartzCore",
];

/// Debug tooling appended everywhere except Apple silicon, where neither is
/// packaged and Xcode provides the equivalents. These are the only pinned
/// refs in the whole environment.
const DEBUG_TOOLS: [(&str, &str); 2] = [("gdb", "14.2"), ("valgrind", "3.22.0")];

/// Errors that can occur during composition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
  #[error("unsupported platform: {0}")]
  UnsupportedPlatform(String),
}

/// Compose the shell environment for a platform identifier.
///
/// # Errors
///
/// Returns [`ComposeError::UnsupportedPlatform`] if `id` is not one of the
/// supported platform identifiers. No partial descriptor is produced.
pub fn compose(id: &str) -> Result<EnvironmentDescriptor, ComposeError> {
  let platform =
    Platform::parse(id).ok_or_else(|| ComposeError::UnsupportedPlatform(id.to_string()))?;
  Ok(descriptor_for(platform))
}

/// Compose the shell environment for an already-validated platform.
pub fn descriptor_for(platform: Platform) -> EnvironmentDescriptor {
  let mut desc = base();

  if platform.is_apple_silicon() {
    debug!(platform = %platform, "applying Apple framework overlay");
    for framework in APPLE_FRAMEWORKS {
      desc.push_library(PackageRef::new(framework));
    }
  } else {
    debug!(platform = %platform, "applying debug tooling overlay");
    for (name, version) in DEBUG_TOOLS {
      desc.push_tool(PackageRef::pinned(name, version));
    }
  }

  // LIBCLANG_PATH follows the composed package set, not the platform branch.
  if let Some(libclang) = desc.library("libclang") {
    let lib_output = placeholder::package_output_ref(&libclang.name, "lib");
    desc.set_var("LIBCLANG_PATH", format!("{lib_output}/lib"));
  }

  // Resolved by the shell at activation time, never during composition.
  desc.push_statement(r#"export DYLD_FALLBACK_LIBRARY_PATH="$(rustc --print sysroot)/lib""#);

  desc
}

/// The platform-independent base definition.
fn base() -> EnvironmentDescriptor {
  let mut desc = EnvironmentDescriptor::new();

  for name in BASE_LIBRARIES {
    desc.push_library(PackageRef::new(name));
  }
  for name in BASE_TOOLS {
    desc.push_tool(PackageRef::new(name));
  }

  desc.set_var("RUST_BACKTRACE", "1");
  desc.push_statement(r#"export CARGO_HOME="${CARGO_HOME:-$PWD/.cargo}""#);

  desc
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::SUPPORTED;

  #[test]
  fn compose_accepts_every_supported_platform() {
    for platform in SUPPORTED {
      assert!(compose(&platform.id()).is_ok());
    }
  }

  #[test]
  fn compose_rejects_unknown_platform() {
    let err = compose("unknown-platform").unwrap_err();
    assert_eq!(
      err,
      ComposeError::UnsupportedPlatform("unknown-platform".to_string())
    );
    assert!(err.to_string().contains("unknown-platform"));
  }

  #[test]
  fn compose_is_referentially_transparent() {
    for platform in SUPPORTED {
      let id = platform.id();
      assert_eq!(compose(&id).unwrap(), compose(&id).unwrap());
    }
  }

  #[test]
  fn no_duplicate_input_names_on_any_platform() {
    for platform in SUPPORTED {
      let desc = descriptor_for(platform);

      for inputs in [&desc.library_inputs, &desc.tool_inputs] {
        let mut names: Vec<&str> = inputs.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len(), "duplicate input on {platform}");
      }
    }
  }

  #[test]
  fn libclang_path_present_and_nonempty_everywhere() {
    for platform in SUPPORTED {
      let desc = descriptor_for(platform);
      let value = desc.variables.get("LIBCLANG_PATH").unwrap();
      assert!(!value.is_empty());
      assert_eq!(value, "$${pkg:libclang:lib}/lib");
    }
  }

  #[test]
  fn sysroot_fallback_is_last_statement_and_stays_lazy() {
    for platform in SUPPORTED {
      let desc = descriptor_for(platform);
      let last = desc.activation_script.last().unwrap();
      // A literal command substitution, to be evaluated at shell entry
      assert_eq!(
        last,
        r#"export DYLD_FALLBACK_LIBRARY_PATH="$(rustc --print sysroot)/lib""#
      );
    }
  }
}
