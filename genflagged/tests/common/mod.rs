#![allow(dead_code)]

use std::path::PathBuf;

use genflagged::package::{DeclSite, PackageVariant, VariantKind};
use genflagged::resolve::AliasTable;

pub fn site(name: &str, source: &str) -> DeclSite {
  let file = syn::parse_file(source).expect("test source should parse");
  DeclSite {
    path: PathBuf::from(name),
    items: file.items,
  }
}

pub fn variant(kind: VariantKind, sites: Vec<DeclSite>) -> PackageVariant {
  let aliases = AliasTable::from_sites(sites.iter());
  PackageVariant { kind, sites, aliases }
}
