//! Source loading and the package-variant model.
//!
//! A package is one directory of `.rs` files (or an explicit file list). For
//! type lookup it takes three forms, searched in this fixed order: the
//! ordinary package, the package compiled with its tests (items inside
//! `#[cfg(test)]` modules), and the external test package (files under the
//! `tests/` subdirectory). Types found in an earlier variant are never
//! searched for again in a later one.

use std::fs;
use std::path::{Path, PathBuf};

use syn::Token;
use syn::punctuated::Punctuated;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::resolve::AliasTable;

/// What the positional arguments selected: one package directory, or the
/// source files of a single package.
#[derive(Clone, Debug)]
pub enum Target {
  Dir(PathBuf),
  Files(Vec<PathBuf>),
}

/// One of the three forms a package takes for type lookup.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VariantKind {
  Primary,
  TestCompiled,
  ExternalTest,
}

impl VariantKind {
  /// Test variants name their output file with the `_test` suffix.
  pub fn is_test(self) -> bool {
    !matches!(self, VariantKind::Primary)
  }

  pub fn describe(self) -> &'static str {
    match self {
      VariantKind::Primary => "package",
      VariantKind::TestCompiled => "package compiled for tests",
      VariantKind::ExternalTest => "external test package",
    }
  }
}

/// One parsed source file within a package variant; a declaration site.
#[derive(Debug)]
pub struct DeclSite {
  pub path: PathBuf,
  pub items: Vec<syn::Item>,
}

#[derive(Debug)]
pub struct PackageVariant {
  pub kind: VariantKind,
  pub sites: Vec<DeclSite>,
  pub aliases: AliasTable,
}

#[derive(Debug)]
pub struct Package {
  /// Directory that default output files are written into.
  pub dir: PathBuf,
  /// All three variants, in search order; variants without declarations have
  /// no sites.
  pub variants: Vec<PackageVariant>,
}

/// Reads and parses the target package, splitting its declarations into the
/// three variants. `tags` is the set of enabled cfg names; items gated on a
/// cfg that doesn't hold under them are dropped entirely.
pub fn load(target: &Target, tags: &[String]) -> Result<Package> {
  let (primary_paths, external_paths, dir) = match target {
    Target::Dir(dir) => {
      let primary = rs_files_in(dir)?;
      if primary.is_empty() {
        return Err(Error::EmptyPackage(dir.clone()));
      }
      let tests_dir = dir.join("tests");
      let external = if tests_dir.is_dir() { rs_files_in(&tests_dir)? } else { Vec::new() };
      (primary, external, dir.clone())
    }
    Target::Files(files) => {
      let mut primary = Vec::new();
      let mut external = Vec::new();
      for file in files {
        if in_tests_dir(file) {
          external.push(file.clone());
        } else {
          primary.push(file.clone());
        }
      }
      let dir = files
        .first()
        .and_then(|f| f.parent())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
      (primary, external, dir)
    }
  };

  let mut primary_sites = Vec::new();
  let mut test_sites = Vec::new();
  let mut external_sites = Vec::new();

  for path in primary_paths {
    let file = parse_source(&path)?;
    let (plain, test) = split_items(file.items, tags);
    if !plain.is_empty() {
      primary_sites.push(DeclSite { path: path.clone(), items: plain });
    }
    if !test.is_empty() {
      test_sites.push(DeclSite { path, items: test });
    }
  }
  for path in external_paths {
    let file = parse_source(&path)?;
    let items = external_items(file.items, tags);
    if !items.is_empty() {
      external_sites.push(DeclSite { path, items });
    }
  }

  debug!(
    primary = primary_sites.len(),
    test_compiled = test_sites.len(),
    external_test = external_sites.len(),
    "loaded declaration sites"
  );

  // Alias lookup sees the package's own declarations; the test variants see
  // the primary declarations as well.
  let primary_aliases = AliasTable::from_sites(primary_sites.iter());
  let test_aliases = AliasTable::from_sites(primary_sites.iter().chain(test_sites.iter()));
  let external_aliases = AliasTable::from_sites(primary_sites.iter().chain(external_sites.iter()));

  Ok(Package {
    dir,
    variants: vec![
      PackageVariant {
        kind: VariantKind::Primary,
        sites: primary_sites,
        aliases: primary_aliases,
      },
      PackageVariant {
        kind: VariantKind::TestCompiled,
        sites: test_sites,
        aliases: test_aliases,
      },
      PackageVariant {
        kind: VariantKind::ExternalTest,
        sites: external_sites,
        aliases: external_aliases,
      },
    ],
  })
}

fn in_tests_dir(path: &Path) -> bool {
  path
    .parent()
    .and_then(|p| p.file_name())
    .is_some_and(|name| name == "tests")
}

fn rs_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
  let entries = fs::read_dir(dir).map_err(|source| Error::Read { path: dir.to_path_buf(), source })?;
  let mut files = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|source| Error::Read { path: dir.to_path_buf(), source })?;
    let path = entry.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
      files.push(path);
    }
  }
  // Deterministic scan order regardless of directory iteration order.
  files.sort();
  Ok(files)
}

fn parse_source(path: &Path) -> Result<syn::File> {
  let text = fs::read_to_string(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
  syn::parse_file(&text).map_err(|source| Error::Parse { path: path.to_path_buf(), source })
}

/// Splits a primary file's top-level items into the ordinary package and the
/// package-compiled-for-tests variant. `#[cfg(test)]` inline modules are
/// flattened into the latter; items whose cfg holds under neither form are
/// dropped.
fn split_items(items: Vec<syn::Item>, tags: &[String]) -> (Vec<syn::Item>, Vec<syn::Item>) {
  let mut plain = Vec::new();
  let mut test = Vec::new();
  for item in items {
    let Some(meta) = cfg_meta(&item) else {
      plain.push(item);
      continue;
    };
    if cfg_enabled(&meta, tags, false) {
      plain.push(item);
    } else if cfg_enabled(&meta, tags, true) {
      match item {
        syn::Item::Mod(module) => {
          if let Some((_, inner)) = module.content {
            test.extend(inner);
          }
        }
        other => test.push(other),
      }
    } else {
      trace!("dropping declaration disabled under the active tags");
    }
  }
  (plain, test)
}

/// Collects the top-level items of an external test file. The whole file
/// belongs to the test build, so cfg is evaluated with `test` enabled and
/// test-gated inline modules are flattened into the same site.
fn external_items(items: Vec<syn::Item>, tags: &[String]) -> Vec<syn::Item> {
  let mut out = Vec::new();
  for item in items {
    let Some(meta) = cfg_meta(&item) else {
      out.push(item);
      continue;
    };
    if !cfg_enabled(&meta, tags, true) {
      trace!("dropping declaration disabled under the active tags");
      continue;
    }
    match item {
      syn::Item::Mod(module) if !cfg_enabled(&meta, tags, false) => {
        if let Some((_, inner)) = module.content {
          out.extend(inner);
        }
      }
      other => out.push(other),
    }
  }
  out
}

fn item_attrs(item: &syn::Item) -> &[syn::Attribute] {
  use syn::Item::*;
  match item {
    Const(i) => &i.attrs,
    Enum(i) => &i.attrs,
    ExternCrate(i) => &i.attrs,
    Fn(i) => &i.attrs,
    ForeignMod(i) => &i.attrs,
    Impl(i) => &i.attrs,
    Macro(i) => &i.attrs,
    Mod(i) => &i.attrs,
    Static(i) => &i.attrs,
    Struct(i) => &i.attrs,
    Trait(i) => &i.attrs,
    TraitAlias(i) => &i.attrs,
    Type(i) => &i.attrs,
    Union(i) => &i.attrs,
    Use(i) => &i.attrs,
    _ => &[],
  }
}

fn cfg_meta(item: &syn::Item) -> Option<syn::Meta> {
  item_attrs(item)
    .iter()
    .find(|attr| attr.path().is_ident("cfg"))
    .and_then(|attr| attr.parse_args::<syn::Meta>().ok())
}

/// Evaluates a cfg predicate against the enabled tag set. `test` holds only
/// in the test forms of the package; unknown predicates are false.
fn cfg_enabled(meta: &syn::Meta, tags: &[String], in_tests: bool) -> bool {
  match meta {
    syn::Meta::Path(path) => match path.get_ident() {
      Some(ident) if ident == "test" => in_tests,
      Some(ident) => tags.iter().any(|tag| ident == tag.as_str()),
      None => false,
    },
    syn::Meta::List(list) => {
      let Ok(nested) = list.parse_args_with(Punctuated::<syn::Meta, Token![,]>::parse_terminated) else {
        return false;
      };
      if list.path.is_ident("any") {
        nested.iter().any(|m| cfg_enabled(m, tags, in_tests))
      } else if list.path.is_ident("all") {
        nested.iter().all(|m| cfg_enabled(m, tags, in_tests))
      } else if list.path.is_ident("not") {
        nested.first().is_some_and(|m| !cfg_enabled(m, tags, in_tests))
      } else {
        false
      }
    }
    syn::Meta::NameValue(nv) => {
      if !nv.path.is_ident("feature") {
        return false;
      }
      match &nv.value {
        syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(value), .. }) => tags.iter().any(|tag| tag == &value.value()),
        _ => false,
      }
    }
  }
}
