//! Command-line surface and input validation.
//!
//! Everything here is checked before a single source file is read: bad
//! identifiers, mismatched list lengths, an unsupported size literal and the
//! tags/file-list conflict all fail up front.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};
use crate::locate::TypeRequest;
use crate::package::Target;
use crate::sizing::Width;

#[derive(Debug, Parser)]
#[command(
  name = "genflagged",
  version,
  about = "Generates compact bitflags types with named accessors from structs with bool fields",
  after_help = "With no path arguments, the package in the current directory is processed.\n\
                Otherwise the arguments must name a single directory, or a set of source\n\
                files that belong to one package."
)]
pub struct Cli {
  /// Comma-separated list of type names to generate flags for
  #[arg(long = "type", value_name = "T,...")]
  pub types: String,

  /// Comma-separated list of generated type names; `_` picks the default `<T>BitFlags`
  #[arg(long = "outType", value_name = "T,...")]
  pub out_types: Option<String>,

  /// Output file name; default `<t>_flagged.rs` next to the sources
  #[arg(long = "outFile", value_name = "PATH")]
  pub out_file: Option<PathBuf>,

  /// Generated type size; one of 8, 16, 32, 64; default depends on the number of flags
  #[arg(long = "size", value_name = "BITS", default_value_t = 0)]
  pub size: usize,

  /// Trim this prefix from each field name before deriving its flag name
  #[arg(long = "trimPrefix", value_name = "PREFIX")]
  pub trim_prefix: Option<String>,

  /// Trim this suffix from each field name before deriving its flag name
  #[arg(long = "trimSuffix", value_name = "SUFFIX")]
  pub trim_suffix: Option<String>,

  /// Comma-separated list of cfg tags to enable while scanning
  #[arg(long = "tags", value_name = "TAG,...")]
  pub tags: Option<String>,

  /// Enable detailed logging during execution
  #[arg(long, short)]
  pub verbose: bool,

  /// A package directory, or source files of a single package
  #[arg(value_name = "PATH")]
  pub paths: Vec<PathBuf>,
}

/// Validated, ready-to-use run inputs.
#[derive(Clone, Debug)]
pub struct Input {
  pub requests: Vec<TypeRequest>,
  pub trim_prefix: String,
  pub trim_suffix: String,
  pub size: Option<Width>,
  pub out_file: Option<PathBuf>,
  pub tags: Vec<String>,
  pub target: Target,
  /// The invocation arguments, embedded in generated headers.
  pub command_line: String,
}

impl Input {
  pub fn new(cli: Cli, command_line: String) -> Result<Input> {
    let sources: Vec<String> = cli.types.split(',').map(str::to_owned).collect();
    for name in &sources {
      if !is_identifier(name) {
        return Err(Error::InvalidTypeName(name.clone()));
      }
    }

    let outs: Vec<Option<String>> = match &cli.out_types {
      None => vec![None; sources.len()],
      Some(list) => {
        let names: Vec<&str> = list.split(',').collect();
        if names.len() != sources.len() {
          return Err(Error::OutTypeMismatch {
            expected: sources.len(),
            got: names.len(),
          });
        }
        let mut outs = Vec::with_capacity(names.len());
        for name in names {
          if name == "_" {
            outs.push(None);
          } else if is_identifier(name) {
            outs.push(Some(name.to_owned()));
          } else {
            return Err(Error::InvalidTypeName(name.to_owned()));
          }
        }
        outs
      }
    };
    let requests = sources
      .into_iter()
      .zip(outs)
      .map(|(source, out)| TypeRequest { source, out })
      .collect();

    let size = match cli.size {
      0 => None,
      bits => Some(Width::from_bits(bits).ok_or(Error::InvalidSize(bits))?),
    };

    let tags: Vec<String> = cli
      .tags
      .as_deref()
      .unwrap_or_default()
      .split(',')
      .filter(|tag| !tag.is_empty())
      .map(str::to_owned)
      .collect();

    let target = match cli.paths.len() {
      0 => Target::Dir(PathBuf::from(".")),
      1 if cli.paths[0].is_dir() => Target::Dir(cli.paths.into_iter().next().unwrap_or_default()),
      _ => {
        if !tags.is_empty() {
          return Err(Error::TagsWithFiles);
        }
        Target::Files(cli.paths)
      }
    };

    Ok(Input {
      requests,
      trim_prefix: cli.trim_prefix.unwrap_or_default(),
      trim_suffix: cli.trim_suffix.unwrap_or_default(),
      size,
      out_file: cli.out_file,
      tags,
      target,
      command_line,
    })
  }
}

fn is_identifier(name: &str) -> bool {
  syn::parse_str::<syn::Ident>(name).is_ok()
}
