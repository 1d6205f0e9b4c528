use anyhow::Result;
use workbench_lib::platform::SUPPORTED;

pub fn cmd_platforms() -> Result<()> {
  for platform in SUPPORTED {
    println!("{platform}");
  }
  Ok(())
}
