use flagged::{BitFlags, BitFlags32};

fn main() {
  let mut flags = BitFlags32::default();

  // Any of the four widths can sit behind the trait.
  let view: &mut dyn BitFlags = &mut flags;
  view.set(1);
  view.set(5);
  view.toggle(1);

  println!("{view}"); // 00000000000000000000000000100000
}
