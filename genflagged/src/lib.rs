//! genflagged — generate typed bit flags from structs with bool fields
//!
//! Given a struct type `T`, genflagged emits a new type with an unsigned
//! integer representation whose bit width is just enough to carry one flag
//! per bool field of `T`, backed by the `flagged` runtime. The generated
//! type gets five accessors per flag, named after the field:
//!
//! - `is_<flag>` reports whether the flag is set.
//! - `set_<flag>` sets the flag to true and returns the old value.
//! - `reset_<flag>` sets the flag to false and returns the old value.
//! - `set_<flag>_to` sets the flag to a new value and returns the old one.
//! - `toggle_<flag>` toggles the flag and returns the new value.
//!
//! Plus, for the whole type: `bit_flags()` (a `&mut dyn flagged::BitFlags`
//! view exposing the full runtime API), `typed_flags()` (a value of the
//! source type rebuilt from the flags), `set_typed_flags()` (bulk overwrite
//! from a source value), `From` conversions in both directions and a
//! delegating `Display`. For example, given:
//!
//! ```ignore
//! pub struct Permissions {
//!   read: bool,
//!   write: bool,
//!   exec: bool,
//! }
//! ```
//!
//! running `genflagged --type=Permissions` in the same directory writes
//! `permissions_flagged.rs`, containing `pub struct PermissionsBitFlags`
//! over `flagged::BitFlags8` with `is_read`, `set_read`, `reset_read`,
//! `set_read_to`, `toggle_read` and so on, each flag at the bit index given
//! by its field's declaration order. Include it as a sibling module of the
//! source type (`mod permissions_flagged;`).
//!
//! The `--type` flag accepts a comma-separated list, so one run can generate
//! several types. The default output file is `<t>_flagged.rs`, `t` being the
//! lower-cased name of the first type listed; `--outFile` overrides it. The
//! default name of each generated type is `<T>BitFlags`; `--outType`
//! overrides them one by one, with `_` keeping the default. `--size` forces
//! the underlying width to 8, 16, 32 or 64 instead of the smallest width
//! that fits the flag count, and `--trimPrefix`/`--trimSuffix` cut the given
//! affixes off each field name before the flag name is derived from it.
//!
//! Types declared inside `#[cfg(test)]` modules, or in files under the
//! package's `tests/` directory, are found too: declarations in the package
//! itself are preferred, the test-compiled form is searched next and the
//! external test files last, each type resolving at its first declaration
//! site. Output generated from test-only declarations lands in
//! `<t>_flagged_test.rs`.

pub mod cli;
pub mod error;
pub mod generator;
pub mod locate;
pub mod package;
pub mod plan;
pub mod resolve;
pub mod sizing;

pub use error::{Error, Result};

use std::fs;
use std::path::PathBuf;

use tracing::debug;

/// Runs the generator end to end: one package variant at a time, resolving,
/// planning, rendering and writing before the next variant is considered.
/// Returns the paths written.
///
/// Any fatal condition aborts the whole run; files already written for
/// earlier variants are not rolled back.
pub fn run(input: &cli::Input) -> Result<Vec<PathBuf>> {
  let package = package::load(&input.target, &input.tags)?;
  let mut remaining = input.requests.clone();
  let mut written = Vec::new();

  for variant in &package.variants {
    debug!(
      variant = variant.kind.describe(),
      remaining = remaining.len(),
      "processing package variant"
    );

    let (matched, rest) = locate::scan_variant(variant, remaining)?;
    remaining = rest;
    if matched.resolved.is_empty() {
      debug!(variant = variant.kind.describe(), "no matching types");
      continue;
    }

    // A single fixed output file cannot serve a second emitting variant.
    if let Some(out_file) = &input.out_file {
      if !remaining.is_empty() {
        return Err(Error::OutFileConflict(out_file.clone()));
      }
    }

    let plan = plan::build(&matched, input, &package.dir)?;
    let text = generator::render(&plan);
    fs::write(&plan.path, text).map_err(|source| Error::Write {
      path: plan.path.clone(),
      source,
    })?;
    debug!(path = %plan.path.display(), "wrote generated file");
    written.push(plan.path);
  }

  if !remaining.is_empty() {
    let names = remaining.into_iter().map(|request| request.source).collect();
    return Err(Error::UnresolvedTypes(names));
  }
  Ok(written)
}
