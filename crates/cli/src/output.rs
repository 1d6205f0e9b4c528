//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output: colored headings,
//! bulleted items, and the text/json format switch.

use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const INFO: &str = "•";
}

pub fn print_field(name: &str, value: &str) {
  println!(
    "{} {}",
    format!("{name}:").if_supports_color(Stream::Stdout, |s| s.bold()),
    value
  );
}

pub fn print_heading(text: &str) {
  println!("{}", text.if_supports_color(Stream::Stdout, |s| s.bold()));
}

pub fn print_item(text: &str) {
  println!(
    "  {} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.cyan()),
    text
  );
}
