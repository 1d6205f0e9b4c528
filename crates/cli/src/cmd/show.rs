use anyhow::Result;

use crate::output::{self, OutputFormat};

use super::compose_target;

pub fn cmd_show(id: Option<&str>, format: OutputFormat) -> Result<()> {
  let (platform, desc) = compose_target(id)?;

  if format.is_json() {
    println!("{}", serde_json::to_string_pretty(&desc)?);
    return Ok(());
  }

  output::print_field("Platform", &platform.id());
  println!();

  output::print_heading("Libraries");
  for package in &desc.library_inputs {
    output::print_item(&package.to_string());
  }
  println!();

  output::print_heading("Tools");
  for package in &desc.tool_inputs {
    output::print_item(&package.to_string());
  }
  println!();

  output::print_heading("Variables");
  for (name, value) in &desc.variables {
    output::print_item(&format!("{name}={value}"));
  }
  println!();

  output::print_heading("Activation");
  for statement in &desc.activation_script {
    output::print_item(statement);
  }

  Ok(())
}
