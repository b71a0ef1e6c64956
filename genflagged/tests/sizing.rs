use genflagged::Error;
use genflagged::sizing::{self, MAX_FLAGS, Width};

#[test]
fn minimal_width_is_smallest_fitting() {
  for count in 1..=MAX_FLAGS {
    let want = match count {
      1..=8 => 8,
      9..=16 => 16,
      17..=32 => 32,
      _ => 64,
    };
    let got = sizing::minimal_width("T", count).expect("count within range");
    assert_eq!(got.bits(), want, "count {count}");
  }
}

#[test]
fn counts_above_the_ceiling_are_fatal() {
  for count in [65, 100, 1000] {
    let err = sizing::minimal_width("Huge", count).expect_err("count above 64");
    match &err {
      Error::TooManyFields { type_name, count: got } => {
        assert_eq!(type_name, "Huge");
        assert_eq!(*got, count);
      }
      other => panic!("unexpected error: {other}"),
    }
    // The diagnostic names both the count and the 64-bit ceiling.
    let message = err.to_string();
    assert!(message.contains(&count.to_string()));
    assert!(message.contains("64"));
  }
}

#[test]
fn reconcile_without_override_keeps_minimal() {
  for width in [Width::W8, Width::W16, Width::W32, Width::W64] {
    assert_eq!(sizing::reconcile("T", width, None).expect("no override"), width);
  }
}

#[test]
fn reconcile_accepts_wider_and_equal_overrides() {
  assert_eq!(
    sizing::reconcile("T", Width::W8, Some(Width::W32)).expect("wider override"),
    Width::W32
  );
  assert_eq!(
    sizing::reconcile("T", Width::W16, Some(Width::W16)).expect("equal override"),
    Width::W16
  );
}

#[test]
fn reconcile_rejects_narrow_overrides() {
  let err = sizing::reconcile("Options", Width::W16, Some(Width::W8)).expect_err("narrow override");
  match &err {
    Error::SizeTooSmall {
      type_name,
      required,
      requested,
    } => {
      assert_eq!(type_name, "Options");
      assert_eq!(*required, 16);
      assert_eq!(*requested, 8);
    }
    other => panic!("unexpected error: {other}"),
  }
  let message = err.to_string();
  assert!(message.contains("Options"));
  assert!(message.contains("16"));
  assert!(message.contains("8"));
}

#[test]
fn width_from_bits() {
  assert_eq!(Width::from_bits(8), Some(Width::W8));
  assert_eq!(Width::from_bits(64), Some(Width::W64));
  assert_eq!(Width::from_bits(0), None);
  assert_eq!(Width::from_bits(12), None);
  assert_eq!(Width::from_bits(128), None);
}
