mod env;
mod platforms;
mod show;

pub use env::cmd_env;
pub use platforms::cmd_platforms;
pub use show::cmd_show;

use anyhow::{Context, Result};
use tracing::debug;
use workbench_lib::compose::{self, ComposeError};
use workbench_lib::descriptor::EnvironmentDescriptor;
use workbench_lib::platform::Platform;

/// Compose for an explicit identifier, or for the detected host platform.
pub(crate) fn compose_target(id: Option<&str>) -> Result<(Platform, EnvironmentDescriptor)> {
  let platform = match id {
    Some(id) => {
      Platform::parse(id).ok_or_else(|| ComposeError::UnsupportedPlatform(id.to_string()))?
    }
    None => Platform::current()
      .context("could not detect a supported host platform (pass an identifier explicitly)")?,
  };

  debug!(platform = %platform, "composing environment");
  Ok((platform, compose::descriptor_for(platform)))
}
