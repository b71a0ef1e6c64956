//! Type resolution: finding a requested struct declaration inside a
//! declaration site and extracting its qualifying bool fields.
//!
//! A field qualifies when it is named, its name doesn't start with `_`, and
//! its declared type unwraps to the builtin `bool`. Unwrapping is delegated
//! to a [`KindResolver`], so the scan itself never inspects alias chains;
//! the production resolver is an [`AliasTable`] built from the package's
//! `type` items. Fields of any other kind are silently skipped: named
//! bool-based wrapper types are deliberately not supported.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::package::DeclSite;

/// What a field's declared type ultimately is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kind {
  Bool,
  Other,
}

/// The alias-unwrapping capability the scanner consults per field type.
pub trait KindResolver {
  fn underlying_kind(&self, ty: &syn::Type) -> Kind;
}

/// Alias table collected from a package variant's `type Name = …;` items.
/// Chains are followed down to `bool`; anything else, including cycles and
/// names the package doesn't declare, is [`Kind::Other`].
#[derive(Default, Debug)]
pub struct AliasTable {
  aliases: HashMap<String, syn::Type>,
}

impl AliasTable {
  pub fn from_sites<'a, I>(sites: I) -> Self
  where
    I: Iterator<Item = &'a DeclSite>,
  {
    let mut aliases = HashMap::new();
    for site in sites {
      for item in &site.items {
        if let syn::Item::Type(alias) = item {
          aliases.insert(alias.ident.to_string(), (*alias.ty).clone());
        }
      }
    }
    Self { aliases }
  }
}

impl KindResolver for AliasTable {
  fn underlying_kind(&self, ty: &syn::Type) -> Kind {
    let mut current = ty;
    let mut hops = 0;
    loop {
      let Some(name) = bare_path_name(current) else {
        return Kind::Other;
      };
      if name == "bool" {
        return Kind::Bool;
      }
      // A chain longer than the table has revisited an alias.
      match self.aliases.get(&name) {
        Some(next) if hops < self.aliases.len() => {
          current = next;
          hops += 1;
        }
        _ => return Kind::Other,
      }
    }
  }
}

/// The single-segment name of a bare path type, if that's what `ty` is.
fn bare_path_name(ty: &syn::Type) -> Option<String> {
  match ty {
    syn::Type::Path(path) if path.qself.is_none() => path.path.get_ident().map(|ident| ident.to_string()),
    syn::Type::Paren(inner) => bare_path_name(&inner.elem),
    _ => None,
  }
}

/// Outcome of scanning one declaration site for one requested type name.
#[derive(Debug)]
pub enum Found {
  /// No declaration with the requested name at this site.
  No,
  /// A declaration with the requested name exists, but it is not a struct
  /// with named fields, or no field qualifies. Finding it ends the search
  /// for this name, so the caller must treat this as fatal.
  Invalid,
  /// The requested struct, with its qualifying fields in declaration order.
  /// `exhaustive` reports whether every named field qualified; when it did,
  /// the generated conversions can rebuild the struct without defaults.
  Struct { fields: Vec<syn::Ident>, exhaustive: bool },
}

/// Scans the top-level declarations of `site` for `type_name`.
pub fn scan_site(site: &DeclSite, type_name: &str, resolver: &dyn KindResolver) -> Found {
  for item in &site.items {
    match item {
      syn::Item::Struct(decl) if decl.ident == type_name => {
        debug!(site = %site.path.display(), "found matching type {type_name}");
        return scan_struct(decl, resolver);
      }
      // A matching non-struct declaration still counts as found.
      syn::Item::Enum(decl) if decl.ident == type_name => return Found::Invalid,
      syn::Item::Type(decl) if decl.ident == type_name => return Found::Invalid,
      syn::Item::Union(decl) if decl.ident == type_name => return Found::Invalid,
      _ => {}
    }
  }
  Found::No
}

fn scan_struct(decl: &syn::ItemStruct, resolver: &dyn KindResolver) -> Found {
  let syn::Fields::Named(named) = &decl.fields else {
    // Tuple and unit structs have no named fields to turn into flags.
    return Found::Invalid;
  };

  let mut fields = Vec::with_capacity(named.named.len());
  let mut skipped = false;
  for field in &named.named {
    let ident = field.ident.clone().expect("named");
    if ident.to_string().starts_with('_') {
      trace!(field = %ident, "skipping deliberately unused field");
      skipped = true;
      continue;
    }
    match resolver.underlying_kind(&field.ty) {
      Kind::Bool => fields.push(ident),
      Kind::Other => {
        trace!(field = %ident, "skipping field with non-bool underlying type");
        skipped = true;
      }
    }
  }

  if fields.is_empty() {
    return Found::Invalid;
  }
  Found::Struct { fields, exhaustive: !skipped }
}
