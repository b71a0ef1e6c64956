use clap::Parser;
use genflagged::Error;
use genflagged::cli::{Cli, Input};
use genflagged::package::Target;
use genflagged::sizing::Width;

fn parse(args: &[&str]) -> Cli {
  Cli::try_parse_from(std::iter::once("genflagged").chain(args.iter().copied())).expect("args should parse")
}

fn validate(args: &[&str]) -> genflagged::Result<Input> {
  Input::new(parse(args), args.join(" "))
}

#[test]
fn type_flag_is_required() {
  assert!(Cli::try_parse_from(["genflagged"]).is_err());
  assert!(Cli::try_parse_from(["genflagged", "--type=Options"]).is_ok());
}

#[test]
fn type_names_must_be_identifiers() {
  let err = validate(&["--type=9bad"]).expect_err("leading digit");
  assert!(matches!(err, Error::InvalidTypeName(name) if name == "9bad"));

  let err = validate(&["--type=Options,Has Space"]).expect_err("space in name");
  assert!(matches!(err, Error::InvalidTypeName(_)));
}

#[test]
fn out_type_count_must_match() {
  let err = validate(&["--type=A,B", "--outType=OnlyOne"]).expect_err("length mismatch");
  match err {
    Error::OutTypeMismatch { expected, got } => {
      assert_eq!(expected, 2);
      assert_eq!(got, 1);
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn underscore_defers_to_the_default_out_type() {
  let input = validate(&["--type=A,B", "--outType=CustomFlags,_"]).expect("valid input");
  assert_eq!(input.requests[0].out.as_deref(), Some("CustomFlags"));
  assert_eq!(input.requests[1].out, None);
}

#[test]
fn size_must_be_a_supported_width() {
  let err = validate(&["--type=Options", "--size=12"]).expect_err("unsupported width");
  assert!(matches!(err, Error::InvalidSize(12)));

  let input = validate(&["--type=Options", "--size=16"]).expect("valid input");
  assert_eq!(input.size, Some(Width::W16));

  let input = validate(&["--type=Options"]).expect("valid input");
  assert_eq!(input.size, None);
}

#[test]
fn tags_are_rejected_with_file_arguments() {
  let err = validate(&["--type=Options", "--tags=extra", "a.rs", "b.rs"]).expect_err("tags with files");
  assert!(matches!(err, Error::TagsWithFiles));
}

#[test]
fn no_paths_defaults_to_the_current_directory() {
  let input = validate(&["--type=Options"]).expect("valid input");
  match &input.target {
    Target::Dir(dir) => assert_eq!(dir.as_os_str(), "."),
    other => panic!("unexpected target: {other:?}"),
  }
}

#[test]
fn explicit_files_become_a_file_target() {
  let input = validate(&["--type=Options", "a.rs", "b.rs"]).expect("valid input");
  match &input.target {
    Target::Files(files) => assert_eq!(files.len(), 2),
    other => panic!("unexpected target: {other:?}"),
  }
}

#[test]
fn trim_flags_and_out_file_are_carried_through() {
  let input = validate(&[
    "--type=Options",
    "--trimPrefix=opt",
    "--trimSuffix=Enabled",
    "--outFile=custom.rs",
  ])
  .expect("valid input");
  assert_eq!(input.trim_prefix, "opt");
  assert_eq!(input.trim_suffix, "Enabled");
  assert_eq!(input.out_file, Some(std::path::PathBuf::from("custom.rs")));
  assert_eq!(
    input.command_line,
    "--type=Options --trimPrefix=opt --trimSuffix=Enabled --outFile=custom.rs"
  );
}
