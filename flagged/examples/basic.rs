use flagged::{BitFlags8, BitIndex};

const READ: BitIndex = 0;
const WRITE: BitIndex = 1;
const EXEC: BitIndex = 2;

fn main() {
  let mut perms = BitFlags8::default();
  perms.set(READ);
  perms.set(EXEC);

  println!("{}", perms.is(READ)); // true
  println!("{}", perms.is(WRITE)); // false

  perms.toggle(WRITE);
  println!("{}", perms.is(WRITE)); // true

  println!("{perms}"); // 00000111
  println!("{}", perms.pretty()); // O|O|O|O|O|I|I|I
}
