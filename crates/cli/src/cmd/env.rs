use anyhow::{Context, Result, bail};
use workbench_lib::placeholder::PackageLocations;
use workbench_lib::script::{self, Shell};

use super::compose_target;

pub fn cmd_env(id: Option<&str>, shell: Option<&str>, packages: &[String]) -> Result<()> {
  let (_, desc) = compose_target(id)?;

  let shell = match shell {
    Some(name) => Shell::from_name(name).with_context(|| format!("unknown shell: {name}"))?,
    None => Shell::detect(),
  };

  let mut locations = PackageLocations::new();
  for spec in packages {
    let (name, output, path) = parse_package_location(spec)?;
    match output {
      Some(output) => locations.insert_output(name, output, path),
      None => locations.insert(name, path),
    }
  }

  let script = script::render_script(&desc, shell, &locations)
    .context("failed to render activation script")?;
  print!("{script}");

  Ok(())
}

/// Parse a NAME[:OUTPUT]=PATH package location.
fn parse_package_location(spec: &str) -> Result<(&str, Option<&str>, &str)> {
  let Some((key, path)) = spec.split_once('=') else {
    bail!("invalid package location '{spec}' (expected NAME[:OUTPUT]=PATH)");
  };
  if key.is_empty() || path.is_empty() {
    bail!("invalid package location '{spec}' (expected NAME[:OUTPUT]=PATH)");
  }

  Ok(match key.split_once(':') {
    Some((name, output)) => (name, Some(output), path),
    None => (key, None, path),
  })
}
