//! Declaration lookup across the package variants.
//!
//! Each requested name is consumed at its first declaration site, searching
//! the variants in their fixed order, so a type declared both in the package
//! and in a test variant is always emitted from the package. The set of
//! still-unresolved requests is threaded through by value: every scan takes
//! the remaining requests and hands back what is left.

use tracing::debug;

use crate::error::{Error, Result};
use crate::package::{PackageVariant, VariantKind};
use crate::resolve::{self, Found};

/// One requested source type, as given on the command line.
#[derive(Clone, Debug)]
pub struct TypeRequest {
  pub source: String,
  /// Explicit output type name; `None` picks the default.
  pub out: Option<String>,
}

/// A requested type resolved at a declaration site of one variant.
#[derive(Debug)]
pub struct ResolvedType {
  pub source: String,
  pub out: Option<String>,
  /// Qualifying bool fields in declaration order; their position is the
  /// flag's bit index.
  pub fields: Vec<syn::Ident>,
  /// Whether every named field of the declaration qualified.
  pub exhaustive: bool,
}

/// Everything one package variant must emit.
#[derive(Debug)]
pub struct VariantMatch {
  pub kind: VariantKind,
  pub resolved: Vec<ResolvedType>,
}

/// Scans one variant for the remaining requests. Returns the variant's
/// matches together with the requests left for later variants.
///
/// A declaration that matches a request but is not a struct with qualifying
/// bool fields is fatal: it ends the search for that name, and silently
/// skipping it would hide what is almost certainly a naming mistake.
pub fn scan_variant(
  variant: &PackageVariant,
  requests: Vec<TypeRequest>,
) -> Result<(VariantMatch, Vec<TypeRequest>)> {
  let mut resolved = Vec::new();
  let mut remaining = Vec::new();

  'requests: for request in requests {
    for site in &variant.sites {
      match resolve::scan_site(site, &request.source, &variant.aliases) {
        Found::No => {}
        Found::Invalid => {
          return Err(Error::UnsupportedType { type_name: request.source });
        }
        Found::Struct { fields, exhaustive } => {
          debug!(
            variant = variant.kind.describe(),
            flags = fields.len(),
            "resolved type {}",
            request.source
          );
          resolved.push(ResolvedType {
            source: request.source,
            out: request.out,
            fields,
            exhaustive,
          });
          continue 'requests;
        }
      }
    }
    remaining.push(request);
  }

  Ok((VariantMatch { kind: variant.kind, resolved }, remaining))
}
