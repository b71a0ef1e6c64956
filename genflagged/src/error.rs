//! Fatal conditions that abort a generator run.
//!
//! Every variant is terminal: the run stops at the first one, nothing is
//! retried, and the binary reports it as a single diagnostic line. Output
//! files already written for earlier package variants stay on disk.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  /// A `--type`/`--outType` element is not a valid identifier.
  #[error("invalid type identifier {0:?}")]
  InvalidTypeName(String),

  /// `--outType` was given with a different element count than `--type`.
  #[error("type argument doesn't match outType argument: expected {expected} names, got {got}")]
  OutTypeMismatch { expected: usize, got: usize },

  /// `--size` is nonzero but not one of the supported widths.
  #[error("invalid size argument {0}; supported values are 8,16,32,64")]
  InvalidSize(usize),

  /// `--tags` only applies when a directory is processed.
  #[error("the tags option applies only to directories, not when files are specified")]
  TagsWithFiles,

  #[error("no source files found in {}", .0.display())]
  EmptyPackage(PathBuf),

  #[error("failed to read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: syn::Error,
  },

  /// A declaration matching a requested name exists but is not a struct with
  /// named bool fields. Finding it stops the search for that name, so this
  /// is fatal rather than skipped.
  #[error("found unsupported declaration for type {type_name}; supported types are structs with named bool fields")]
  UnsupportedType { type_name: String },

  #[error("type {type_name} contains {count} bool fields which is more than supported; maximum supported is 64")]
  TooManyFields { type_name: String, count: usize },

  #[error("type {type_name} flags size is too small; required at least {required}, requested {requested}")]
  SizeTooSmall {
    type_name: String,
    required: usize,
    requested: usize,
  },

  /// A single fixed output file cannot serve emission from more than one
  /// package variant.
  #[error("cannot write to single file ({}) when matching types are found in multiple package variants", .0.display())]
  OutFileConflict(PathBuf),

  /// Trimming the configured affixes left nothing of the field name.
  #[error("field {field} of type {type_name} trims to an empty flag name")]
  EmptyFlagName { type_name: String, field: String },

  /// Names that no package variant declares.
  #[error("no matching types found for names: {}", .0.join(","))]
  UnresolvedTypes(Vec<String>),

  #[error("failed to write {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T> = std::result::Result<T, Error>;
