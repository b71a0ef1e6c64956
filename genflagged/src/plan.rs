//! Emission planning: output names, widths and the destination file.
//!
//! The plan is renderer-agnostic data; nothing here formats source text.
//! Two distinct fields can legally trim to the same derived flag name; the
//! collision is not detected here, the generated code simply won't compile.

use std::path::{Path, PathBuf};

use proc_macro2::Span;

use crate::cli::Input;
use crate::error::{Error, Result};
use crate::locate::VariantMatch;
use crate::package::VariantKind;
use crate::sizing::{self, Width};

/// Everything the renderer needs for one output file.
#[derive(Debug)]
pub struct FilePlan {
  pub path: PathBuf,
  /// The invocation arguments, embedded in the generated header.
  pub command_line: String,
  pub types: Vec<TypePlan>,
}

#[derive(Debug)]
pub struct TypePlan {
  pub source: syn::Ident,
  pub out: syn::Ident,
  pub width: Width,
  /// Flags in declaration order; a flag's position is its bit index.
  pub flags: Vec<FlagSpec>,
  /// Whether the flags cover every named field of the source struct.
  pub exhaustive: bool,
}

/// A source field with its finalized flag name.
#[derive(Debug)]
pub struct FlagSpec {
  pub field: syn::Ident,
  pub flag: String,
}

/// Assembles the emission plan for one variant's matches.
pub fn build(matched: &VariantMatch, input: &Input, package_dir: &Path) -> Result<FilePlan> {
  debug_assert!(!matched.resolved.is_empty(), "planning requires at least one resolved type");

  let mut types = Vec::with_capacity(matched.resolved.len());
  for resolved in &matched.resolved {
    let minimal = sizing::minimal_width(&resolved.source, resolved.fields.len())?;
    let width = sizing::reconcile(&resolved.source, minimal, input.size)?;
    let out_name = match &resolved.out {
      Some(name) => name.clone(),
      None => default_out_type_name(&resolved.source),
    };

    let mut flags = Vec::with_capacity(resolved.fields.len());
    for field in &resolved.fields {
      let flag = flag_name(&resolved.source, &field.to_string(), &input.trim_prefix, &input.trim_suffix)?;
      flags.push(FlagSpec { field: field.clone(), flag });
    }

    types.push(TypePlan {
      source: syn::Ident::new(&resolved.source, Span::call_site()),
      out: syn::Ident::new(&out_name, Span::call_site()),
      width,
      flags,
      exhaustive: resolved.exhaustive,
    });
  }

  let path = match &input.out_file {
    Some(path) => path.clone(),
    None => {
      let first = matched.resolved.first().map_or("", |r| r.source.as_str());
      let name = default_file_name(first, matched.kind.is_test());
      match matched.kind {
        VariantKind::ExternalTest => package_dir.join("tests").join(name),
        _ => package_dir.join(name),
      }
    }
  };

  Ok(FilePlan {
    path,
    command_line: input.command_line.clone(),
    types,
  })
}

/// The default generated type name for a source type.
pub fn default_out_type_name(source: &str) -> String {
  format!("{source}BitFlags")
}

/// The default output file name, a deterministic function of the variant's
/// first resolved type and whether the variant holds test-only sources.
pub fn default_file_name(source: &str, test: bool) -> String {
  let suffix = if test { "_flagged_test.rs" } else { "_flagged.rs" };
  format!("{}{suffix}", source.to_lowercase())
}

/// Derives a field's flag name: trim the prefix, then the suffix, then
/// upper-case the first character. Trimming away the whole name is fatal.
pub fn flag_name(type_name: &str, field: &str, trim_prefix: &str, trim_suffix: &str) -> Result<String> {
  let trimmed = field.strip_prefix(trim_prefix).unwrap_or(field);
  let trimmed = trimmed.strip_suffix(trim_suffix).unwrap_or(trimmed);
  let mut chars = trimmed.chars();
  let Some(first) = chars.next() else {
    return Err(Error::EmptyFlagName {
      type_name: type_name.to_owned(),
      field: field.to_owned(),
    });
  };
  let mut flag = String::with_capacity(trimmed.len());
  flag.extend(first.to_uppercase());
  flag.push_str(chars.as_str());
  Ok(flag)
}
