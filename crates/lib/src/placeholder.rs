//! Placeholder parsing and substitution for deferred package locations.
//!
//! Composition never knows where the external package manager will place a
//! package on disk. Descriptor values that need those locations embed
//! placeholders instead; the consumer substitutes them once resolution has
//! happened.
//!
//! # Placeholder Formats
//!
//! - `$${pkg:<name>}` - root location of package `<name>`
//! - `$${pkg:<name>:<output>}` - a named output of the package (e.g. `lib`)
//!
//! # Shell Variables
//!
//! Single `$` characters pass through unchanged, so shell variables like
//! `$HOME` and `$PATH` work naturally without any escaping.
//!
//! # Escaping
//!
//! Use `$$$` before `{` to produce a literal `$${` sequence. This is only
//! needed in the rare case where you want literal `$${` in output.
//!
//! # Example
//!
//! ```
//! use workbench_lib::placeholder::{parse, Segment, Placeholder};
//!
//! let segments = parse("$${pkg:libclang:lib}/lib").unwrap();
//! assert_eq!(segments, vec![
//!   Segment::Placeholder(Placeholder::PackageOutput {
//!     name: "libclang".to_string(),
//!     output: "lib".to_string(),
//!   }),
//!   Segment::Literal("/lib".to_string()),
//! ]);
//! ```

use std::collections::HashMap;

use thiserror::Error;

/// A parsed placeholder reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
  /// `$${pkg:<name>}` - root location of a package
  Package { name: String },

  /// `$${pkg:<name>:<output>}` - a named output of a package
  PackageOutput { name: String, output: String },
}

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text (no placeholders)
  Literal(String),

  /// A placeholder to be resolved
  Placeholder(Placeholder),
}

/// Errors that can occur during placeholder parsing or resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  #[error("unknown placeholder type: {0}")]
  UnknownType(String),

  #[error("malformed placeholder: {0}")]
  Malformed(String),

  #[error("unresolved package: {name}{}", .output.as_deref().map(|o| format!(" output '{o}'")).unwrap_or_default())]
  UnresolvedPackage { name: String, output: Option<String> },
}

/// Trait for resolving package locations during consumption.
pub trait Resolver {
  /// Resolve a package location by name, optionally narrowed to an output.
  fn resolve_package(&self, name: &str, output: Option<&str>) -> Result<&str, PlaceholderError>;
}

/// A map-backed [`Resolver`] for consumers that know concrete install roots.
///
/// An output that has no dedicated location falls back to the package root.
#[derive(Debug, Default, Clone)]
pub struct PackageLocations {
  roots: HashMap<String, String>,
  outputs: HashMap<(String, String), String>,
}

impl PackageLocations {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record the root location of a package.
  pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) {
    self.roots.insert(name.into(), path.into());
  }

  /// Record the location of a specific package output.
  pub fn insert_output(
    &mut self,
    name: impl Into<String>,
    output: impl Into<String>,
    path: impl Into<String>,
  ) {
    self.outputs.insert((name.into(), output.into()), path.into());
  }
}

impl Resolver for PackageLocations {
  fn resolve_package(&self, name: &str, output: Option<&str>) -> Result<&str, PlaceholderError> {
    if let Some(output) = output {
      if let Some(path) = self.outputs.get(&(name.to_string(), output.to_string())) {
        return Ok(path);
      }
    }

    self
      .roots
      .get(name)
      .map(|s| s.as_str())
      .ok_or_else(|| PlaceholderError::UnresolvedPackage {
        name: name.to_string(),
        output: output.map(|o| o.to_string()),
      })
  }
}

/// Canonical reference string for a package root, e.g. `$${pkg:rustup}`.
pub fn package_ref(name: &str) -> String {
  format!("$${{pkg:{name}}}")
}

/// Canonical reference string for a package output, e.g. `$${pkg:libclang:lib}`.
pub fn package_output_ref(name: &str, output: &str) -> String {
  format!("$${{pkg:{name}:{output}}}")
}

/// Parse a string containing placeholders into segments.
///
/// # Escaping
///
/// Use `$$$` before `{` to produce a literal `$$` followed by `{`.
/// Single `$` characters pass through unchanged, so shell variables
/// like `$HOME` work naturally without escaping.
///
/// # Errors
///
/// Returns an error if a placeholder is malformed (unclosed, unknown type, etc.)
pub fn parse(input: &str) -> Result<Vec<Segment>, PlaceholderError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    if ch == '$' {
      match chars.peek() {
        Some((_, '$')) => {
          chars.next(); // consume the second $

          match chars.peek() {
            Some((_, '$')) => {
              // "$$$" followed by "{" is the escape for a literal "$${"
              chars.next(); // consume the third $

              match chars.peek() {
                Some((_, '{')) => {
                  literal.push_str("$${");
                  chars.next(); // consume the {
                }
                _ => {
                  literal.push_str("$$$");
                }
              }
            }
            Some((_, '{')) => {
              // "$${" opens a placeholder
              chars.next(); // consume the {

              if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
              }

              let mut content = String::new();
              let mut found_close = false;

              for (_, c) in chars.by_ref() {
                if c == '}' {
                  found_close = true;
                  break;
                }
                content.push(c);
              }

              if !found_close {
                return Err(PlaceholderError::Unclosed(pos));
              }

              segments.push(Segment::Placeholder(parse_placeholder_content(&content)?));
            }
            _ => {
              // "$$" not followed by { stays literal
              literal.push_str("$$");
            }
          }
        }
        _ => {
          // Lone $, shell variables pass through
          literal.push('$');
        }
      }
    } else {
      literal.push(ch);
    }
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

/// Parse the content inside a placeholder (everything between `$${` and `}`).
fn parse_placeholder_content(content: &str) -> Result<Placeholder, PlaceholderError> {
  let (kind, rest) = content
    .split_once(':')
    .ok_or_else(|| PlaceholderError::Malformed(format!("missing colon in '{content}'")))?;

  if kind != "pkg" {
    return Err(PlaceholderError::UnknownType(kind.to_string()));
  }

  let (name, output) = match rest.split_once(':') {
    Some((name, output)) => (name, Some(output)),
    None => (rest, None),
  };

  if name.is_empty() {
    return Err(PlaceholderError::Malformed(format!("empty package name in '{content}'")));
  }
  if output.is_some_and(str::is_empty) {
    return Err(PlaceholderError::Malformed(format!("empty output name in '{content}'")));
  }

  match output {
    Some(output) => Ok(Placeholder::PackageOutput {
      name: name.to_string(),
      output: output.to_string(),
    }),
    None => Ok(Placeholder::Package {
      name: name.to_string(),
    }),
  }
}

/// Substitute all placeholders in a string using the provided resolver.
///
/// This is a convenience function that parses and substitutes in one step.
///
/// # Errors
///
/// Returns an error if parsing fails or if any placeholder cannot be resolved.
pub fn substitute(input: &str, resolver: &impl Resolver) -> Result<String, PlaceholderError> {
  let segments = parse(input)?;
  substitute_segments(&segments, resolver)
}

/// Substitute placeholders in pre-parsed segments.
pub fn substitute_segments(
  segments: &[Segment],
  resolver: &impl Resolver,
) -> Result<String, PlaceholderError> {
  let mut result = String::new();

  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Placeholder(p) => {
        let value = match p {
          Placeholder::Package { name } => resolver.resolve_package(name, None)?,
          Placeholder::PackageOutput { name, output } => {
            resolver.resolve_package(name, Some(output))?
          }
        };
        result.push_str(value);
      }
    }
  }

  Ok(result)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn locations() -> PackageLocations {
    let mut locations = PackageLocations::new();
    locations.insert("libclang", "/pkgstore/libclang-18.1.8");
    locations.insert_output("libclang", "lib", "/pkgstore/libclang-18.1.8-lib");
    locations.insert("rustup", "/pkgstore/rustup-1.27.1");
    locations
  }

  // ==========================================================================
  // Realistic Scenario Tests
  // ==========================================================================

  #[test]
  fn libclang_path_variable_substitution() {
    // The composer emits LIBCLANG_PATH against the libclang lib output;
    // the consumer substitutes once the package is resolved on disk
    let value = "$${pkg:libclang:lib}/lib";
    let result = substitute(value, &locations()).unwrap();
    assert_eq!(result, "/pkgstore/libclang-18.1.8-lib/lib");
  }

  #[test]
  fn path_construction_keeps_shell_variables() {
    let line = r#"export PATH="$${pkg:rustup}/bin:$PATH""#;
    let result = substitute(line, &locations()).unwrap();
    assert_eq!(result, r#"export PATH="/pkgstore/rustup-1.27.1/bin:$PATH""#);
  }

  #[test]
  fn output_falls_back_to_package_root() {
    // rustup has no dedicated "bin" output recorded
    let result = substitute("$${pkg:rustup:bin}", &locations()).unwrap();
    assert_eq!(result, "/pkgstore/rustup-1.27.1");
  }

  #[test]
  fn activation_statement_without_placeholders_passes_through() {
    let line = r#"export DYLD_FALLBACK_LIBRARY_PATH="$(rustc --print sysroot)/lib""#;
    let result = substitute(line, &locations()).unwrap();
    assert_eq!(result, line);
  }

  #[test]
  fn adjacent_placeholders_no_separator() {
    let result = substitute("$${pkg:rustup}$${pkg:libclang}", &locations()).unwrap();
    assert_eq!(result, "/pkgstore/rustup-1.27.1/pkgstore/libclang-18.1.8");
  }

  // ==========================================================================
  // Parsing
  // ==========================================================================

  #[test]
  fn parse_package_root_reference() {
    let segments = parse("$${pkg:zlib}").unwrap();
    assert_eq!(
      segments,
      vec![Segment::Placeholder(Placeholder::Package {
        name: "zlib".to_string()
      })]
    );
  }

  #[test]
  fn parse_mixed_literal_and_placeholder() {
    let segments = parse("-L$${pkg:openssl:lib}/lib -lssl").unwrap();
    assert_eq!(
      segments,
      vec![
        Segment::Literal("-L".to_string()),
        Segment::Placeholder(Placeholder::PackageOutput {
          name: "openssl".to_string(),
          output: "lib".to_string(),
        }),
        Segment::Literal("/lib -lssl".to_string()),
      ]
    );
  }

  #[test]
  fn canonical_reference_helpers_roundtrip() {
    let segments = parse(&package_ref("cmake")).unwrap();
    assert_eq!(
      segments,
      vec![Segment::Placeholder(Placeholder::Package {
        name: "cmake".to_string()
      })]
    );

    let segments = parse(&package_output_ref("libclang", "lib")).unwrap();
    assert_eq!(
      segments,
      vec![Segment::Placeholder(Placeholder::PackageOutput {
        name: "libclang".to_string(),
        output: "lib".to_string(),
      })]
    );
  }

  // ==========================================================================
  // Error Cases
  // ==========================================================================

  #[test]
  fn error_unclosed_placeholder() {
    let result = parse("prefix $${pkg:zlib");
    assert!(matches!(result, Err(PlaceholderError::Unclosed(7))));
  }

  #[test]
  fn error_unknown_placeholder_type() {
    let result = parse("$${build:zlib}");
    assert!(matches!(result, Err(PlaceholderError::UnknownType(ref s)) if s == "build"));
  }

  #[test]
  fn error_missing_colon() {
    let result = parse("$${pkg}");
    assert!(matches!(result, Err(PlaceholderError::Malformed(_))));
  }

  #[test]
  fn error_empty_package_name() {
    let result = parse("$${pkg:}");
    assert!(matches!(result, Err(PlaceholderError::Malformed(_))));
  }

  #[test]
  fn error_empty_output_name() {
    let result = parse("$${pkg:zlib:}");
    assert!(matches!(result, Err(PlaceholderError::Malformed(_))));
  }

  #[test]
  fn error_unresolved_package() {
    let result = substitute("$${pkg:nonexistent}", &locations());
    assert!(
      matches!(result, Err(PlaceholderError::UnresolvedPackage { ref name, ref output })
        if name == "nonexistent" && output.is_none())
    );
  }

  #[test]
  fn error_unresolved_output_names_both_parts() {
    let empty = PackageLocations::new();
    let result = substitute("$${pkg:libclang:lib}", &empty);
    assert!(
      matches!(result, Err(PlaceholderError::UnresolvedPackage { ref name, ref output })
        if name == "libclang" && output.as_deref() == Some("lib"))
    );
  }

  // ==========================================================================
  // Edge Cases
  // ==========================================================================

  #[test]
  fn lone_dollar_preserved() {
    let result = substitute("costs $5 or more$", &locations()).unwrap();
    assert_eq!(result, "costs $5 or more$");
  }

  #[test]
  fn shell_variables_pass_through() {
    let result = substitute("echo $HOME $PATH $1 $?", &locations()).unwrap();
    assert_eq!(result, "echo $HOME $PATH $1 $?");
  }

  #[test]
  fn double_dollar_without_brace_preserved() {
    let result = substitute("echo $$variable", &locations()).unwrap();
    assert_eq!(result, "echo $$variable");
  }

  #[test]
  fn escape_placeholder_syntax() {
    let result = substitute("echo $$${pkg:zlib}", &locations()).unwrap();
    assert_eq!(result, "echo $${pkg:zlib}");
  }

  #[test]
  fn empty_input() {
    let segments = parse("").unwrap();
    assert!(segments.is_empty());
  }
}
