mod common;

use common::{site, variant};
use genflagged::Error;
use genflagged::locate::{self, TypeRequest};
use genflagged::package::VariantKind;

fn request(name: &str) -> TypeRequest {
  TypeRequest {
    source: name.to_owned(),
    out: None,
  }
}

#[test]
fn first_declaration_site_wins() {
  let primary = variant(
    VariantKind::Primary,
    vec![
      site("a.rs", "pub struct Options { pub early: bool }"),
      site("b.rs", "pub struct Options { pub late: bool, pub other: bool }"),
    ],
  );

  let (matched, remaining) = locate::scan_variant(&primary, vec![request("Options")]).expect("scan succeeds");
  assert!(remaining.is_empty());
  assert_eq!(matched.resolved.len(), 1);
  let fields: Vec<String> = matched.resolved[0].fields.iter().map(|f| f.to_string()).collect();
  assert_eq!(fields, ["early"]);
}

#[test]
fn consumed_names_never_reach_later_variants() {
  // The same type name declared in the package and in the external test
  // variant: the package declaration is the one that resolves, and the
  // request is gone before the test variant is ever scanned.
  let primary = variant(VariantKind::Primary, vec![site("a.rs", "pub struct T { pub a: bool }")]);
  let external = variant(
    VariantKind::ExternalTest,
    vec![site("tests/t.rs", "pub struct T { pub shadow: bool }")],
  );

  let (matched, remaining) = locate::scan_variant(&primary, vec![request("T")]).expect("scan succeeds");
  assert_eq!(matched.resolved.len(), 1);
  assert!(remaining.is_empty());

  let (matched, remaining) = locate::scan_variant(&external, remaining).expect("scan succeeds");
  assert!(matched.resolved.is_empty());
  assert!(remaining.is_empty());
}

#[test]
fn unresolved_requests_are_handed_back() {
  let primary = variant(VariantKind::Primary, vec![site("a.rs", "pub struct T { pub a: bool }")]);

  let requests = vec![request("T"), request("Missing"), request("AlsoMissing")];
  let (matched, remaining) = locate::scan_variant(&primary, requests).expect("scan succeeds");
  assert_eq!(matched.resolved.len(), 1);
  let names: Vec<&str> = remaining.iter().map(|r| r.source.as_str()).collect();
  assert_eq!(names, ["Missing", "AlsoMissing"]);
}

#[test]
fn matching_unsupported_declaration_is_fatal() {
  let primary = variant(VariantKind::Primary, vec![site("a.rs", "pub enum Options { On, Off }")]);

  let err = locate::scan_variant(&primary, vec![request("Options")]).expect_err("enum match is fatal");
  match err {
    Error::UnsupportedType { type_name } => assert_eq!(type_name, "Options"),
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn request_order_is_preserved_in_matches() {
  let primary = variant(
    VariantKind::Primary,
    vec![site(
      "a.rs",
      "pub struct First { pub a: bool }\npub struct Second { pub b: bool }",
    )],
  );

  let requests = vec![request("Second"), request("First")];
  let (matched, remaining) = locate::scan_variant(&primary, requests).expect("scan succeeds");
  assert!(remaining.is_empty());
  let names: Vec<&str> = matched.resolved.iter().map(|r| r.source.as_str()).collect();
  assert_eq!(names, ["Second", "First"]);
}
