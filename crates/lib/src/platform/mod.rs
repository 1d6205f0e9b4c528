pub mod arch;
pub mod os;

use std::fmt;

use arch::Arch;
use os::Os;

/// Platform identifier combining OS and architecture (e.g., "darwin-aarch64")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
}

/// Every platform workbench can compose an environment for, in canonical order.
pub const SUPPORTED: [Platform; 4] = [
  Platform::new(Os::Linux, Arch::X86_64),
  Platform::new(Os::Linux, Arch::Aarch64),
  Platform::new(Os::MacOs, Arch::X86_64),
  Platform::new(Os::MacOs, Arch::Aarch64),
];

impl Platform {
  /// Create a new platform identifier
  pub const fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      os: Os::current()?,
      arch: Arch::current()?,
    })
  }

  /// Parse a platform identifier string (e.g., "linux-x86_64")
  ///
  /// Returns `None` if the identifier is not one of the supported platforms
  pub fn parse(id: &str) -> Option<Self> {
    let (os, arch) = id.split_once('-')?;
    Some(Self {
      os: Os::parse(os)?,
      arch: Arch::parse(arch)?,
    })
  }

  /// Returns the platform identifier string (e.g., "linux-x86_64")
  pub fn id(&self) -> String {
    format!("{}-{}", self.os, self.arch)
  }

  /// Whether this platform is macOS on Apple silicon
  pub fn is_apple_silicon(&self) -> bool {
    self.os == Os::MacOs && self.arch == Arch::Aarch64
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.os, self.arch)
  }
}
