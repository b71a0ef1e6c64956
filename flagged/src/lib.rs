//! flagged — minimal, allocation-free typed bit flags
//!
//! [`BitFlags8`], [`BitFlags16`], [`BitFlags32`] and [`BitFlags64`] wrap the matching
//! unsigned integer and expose one boolean per bit position through bounds-checked,
//! index-addressed accessors. The [`BitFlags`] trait covers all four widths, so
//! flag-aware code can stay generic over the underlying size.
//!
//! - Index-addressed operations: [`is`](BitFlags8::is), [`set`](BitFlags8::set),
//!   [`reset`](BitFlags8::reset), [`set_to`](BitFlags8::set_to), [`toggle`](BitFlags8::toggle).
//!   Mutating accessors return the old value (`toggle` returns the new one).
//! - Whole-value operations: [`set_all`](BitFlags8::set_all), [`reset_all`](BitFlags8::reset_all),
//!   [`any_set`](BitFlags8::any_set), [`all_set`](BitFlags8::all_set), and the list forms
//!   [`any_of`](BitFlags8::any_of) / [`all_of`](BitFlags8::all_of).
//! - Every index-taking operation panics when the index is `size()` or above; the
//!   allowed range is `[0, size() - 1]`.
//! - `Display` prints the full-width binary form, most-significant bit first, with
//!   leading zeros. [`pretty`](BitFlags8::pretty) yields a readable variant with `I`/`O`
//!   per bit, `|` between bits and `_` every 8 bits.
//!
//! The crate is `no_std` and performs no allocation; both renderings stream straight
//! into the formatter.
//!
//! ```
//! use flagged::{BitFlags8, BitIndex};
//!
//! const READ: BitIndex = 0;
//! const WRITE: BitIndex = 1;
//! const EXEC: BitIndex = 2;
//!
//! let mut perms = BitFlags8::default();
//! perms.set(READ);
//! perms.set(EXEC);
//! assert!(perms.is(READ));
//! assert!(!perms.is(WRITE));
//!
//! perms.toggle(WRITE);
//! assert!(perms.is(WRITE));
//! assert_eq!(perms.to_string(), "00000111");
//! ```

#![no_std]

use core::fmt;

/// Marker alias for values used as bit indexes.
///
/// Values outside `[0, size - 1]` make the index-taking [`BitFlags`] methods panic.
pub type BitIndex = usize;

/// The operations shared by the typed bit flags wrappers ([`BitFlags8`],
/// [`BitFlags16`], [`BitFlags32`], [`BitFlags64`]), for generic flag-aware code.
pub trait BitFlags: fmt::Display {
  /// Reports whether the bit at `idx` is set.
  fn is(&self, idx: BitIndex) -> bool;

  /// Sets the bit at `idx` to true, returning its old value.
  fn set(&mut self, idx: BitIndex) -> bool;

  /// Sets the bit at `idx` to false, returning its old value.
  fn reset(&mut self, idx: BitIndex) -> bool;

  /// Sets the bit at `idx` to `value`, returning its old value.
  fn set_to(&mut self, idx: BitIndex, value: bool) -> bool;

  /// Toggles the bit at `idx`, returning its new value.
  fn toggle(&mut self, idx: BitIndex) -> bool;

  /// Sets all bits to true.
  fn set_all(&mut self);

  /// Sets all bits to false.
  fn reset_all(&mut self);

  /// Reports whether any bit is set.
  fn any_set(&self) -> bool;

  /// Reports whether all bits are set.
  fn all_set(&self) -> bool;

  /// Reports whether any of the bits at `idxs` is set.
  ///
  /// Every listed index is bounds-checked, even after a set bit has been seen.
  /// An empty list acts as [`any_set`](BitFlags::any_set).
  fn any_of(&self, idxs: &[BitIndex]) -> bool;

  /// Reports whether all of the bits at `idxs` are set.
  ///
  /// Every listed index is bounds-checked, even after an unset bit has been seen.
  /// An empty list acts as [`all_set`](BitFlags::all_set).
  fn all_of(&self, idxs: &[BitIndex]) -> bool;

  /// The number of bits carried by this value: one of 8, 16, 32, 64.
  fn size(&self) -> usize;

  /// Writes the pretty rendering; use [`Pretty`] for a `Display` handle.
  fn fmt_pretty(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// `Display` adapter for the readable bit rendering: `I` for a set bit, `O` for an
/// unset one, `|` between bits and `_` every 8 bits, most-significant bit first.
///
/// ```
/// use flagged::BitFlags16;
///
/// let flags = BitFlags16::new(0b0000_0100_0100_0100);
/// assert_eq!(flags.to_string(), "0000010001000100");
/// assert_eq!(flags.pretty().to_string(), "O|O|O|O|O|I|O|O_O|I|O|O|O|I|O|O");
/// ```
pub struct Pretty<'a, T: BitFlags + ?Sized>(pub &'a T);

impl<T: BitFlags + ?Sized> fmt::Display for Pretty<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt_pretty(f)
  }
}

#[cold]
#[track_caller]
fn index_out_of_range(idx: BitIndex, size: usize) -> ! {
  panic!("index {idx} out of range [0..{}]", size - 1)
}

macro_rules! impl_bitflags {
  ($name:ident, $uint:ty, $size:expr, $doc:expr) => {
    #[doc = $doc]
    #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    #[repr(transparent)]
    pub struct $name($uint);

    impl $name {
      /// The bit width of the underlying integer.
      pub const SIZE: usize = $size;

      /// Wraps raw bits, bit 0 being the least-significant one.
      pub const fn new(bits: $uint) -> Self {
        Self(bits)
      }

      /// Returns the raw underlying bits.
      pub const fn into_inner(self) -> $uint {
        self.0
      }

      #[track_caller]
      fn check(idx: BitIndex) {
        if idx >= $size {
          index_out_of_range(idx, $size);
        }
      }

      /// Reports whether the bit at `idx` is set.
      /// Panics if `idx` is outside `[0, SIZE - 1]`.
      #[track_caller]
      pub fn is(&self, idx: BitIndex) -> bool {
        Self::check(idx);
        self.0 & (1 << idx) != 0
      }

      /// Sets the bit at `idx` to true, returning its old value.
      /// Panics if `idx` is outside `[0, SIZE - 1]`.
      #[track_caller]
      pub fn set(&mut self, idx: BitIndex) -> bool {
        self.set_to(idx, true)
      }

      /// Sets the bit at `idx` to false, returning its old value.
      /// Panics if `idx` is outside `[0, SIZE - 1]`.
      #[track_caller]
      pub fn reset(&mut self, idx: BitIndex) -> bool {
        self.set_to(idx, false)
      }

      /// Sets the bit at `idx` to `value`, returning its old value.
      /// Panics if `idx` is outside `[0, SIZE - 1]`.
      #[track_caller]
      pub fn set_to(&mut self, idx: BitIndex, value: bool) -> bool {
        Self::check(idx);
        let old = self.0 & (1 << idx) != 0;
        if value {
          self.0 |= 1 << idx;
        } else {
          self.0 &= !(1 << idx);
        }
        old
      }

      /// Toggles the bit at `idx`, returning its new value.
      /// Panics if `idx` is outside `[0, SIZE - 1]`.
      #[track_caller]
      pub fn toggle(&mut self, idx: BitIndex) -> bool {
        Self::check(idx);
        self.0 ^= 1 << idx;
        self.0 & (1 << idx) != 0
      }

      /// Sets all bits to true.
      pub fn set_all(&mut self) {
        self.0 = <$uint>::MAX;
      }

      /// Sets all bits to false.
      pub fn reset_all(&mut self) {
        self.0 = 0;
      }

      /// Reports whether any bit is set.
      pub const fn any_set(&self) -> bool {
        self.0 != 0
      }

      /// Reports whether all bits are set.
      pub const fn all_set(&self) -> bool {
        self.0 == <$uint>::MAX
      }

      /// Reports whether any of the bits at `idxs` is set; an empty list acts
      /// as [`any_set`](Self::any_set). Every listed index is bounds-checked.
      #[track_caller]
      pub fn any_of(&self, idxs: &[BitIndex]) -> bool {
        if idxs.is_empty() {
          return self.any_set();
        }
        let mut found = false;
        for &idx in idxs {
          if self.is(idx) {
            found = true;
          }
        }
        found
      }

      /// Reports whether all of the bits at `idxs` are set; an empty list acts
      /// as [`all_set`](Self::all_set). Every listed index is bounds-checked.
      #[track_caller]
      pub fn all_of(&self, idxs: &[BitIndex]) -> bool {
        if idxs.is_empty() {
          return self.all_set();
        }
        let mut all = true;
        for &idx in idxs {
          if !self.is(idx) {
            all = false;
          }
        }
        all
      }

      /// The number of bits carried by this value.
      pub const fn size(&self) -> usize {
        $size
      }

      /// A `Display` handle for the readable rendering; see [`Pretty`].
      pub fn pretty(&self) -> Pretty<'_, Self> {
        Pretty(self)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0w$b}", self.0, w = $size)
      }
    }

    impl From<$uint> for $name {
      fn from(bits: $uint) -> Self {
        Self(bits)
      }
    }

    impl From<$name> for $uint {
      fn from(flags: $name) -> $uint {
        flags.0
      }
    }

    impl BitFlags for $name {
      fn is(&self, idx: BitIndex) -> bool {
        $name::is(self, idx)
      }
      fn set(&mut self, idx: BitIndex) -> bool {
        $name::set(self, idx)
      }
      fn reset(&mut self, idx: BitIndex) -> bool {
        $name::reset(self, idx)
      }
      fn set_to(&mut self, idx: BitIndex, value: bool) -> bool {
        $name::set_to(self, idx, value)
      }
      fn toggle(&mut self, idx: BitIndex) -> bool {
        $name::toggle(self, idx)
      }
      fn set_all(&mut self) {
        $name::set_all(self)
      }
      fn reset_all(&mut self) {
        $name::reset_all(self)
      }
      fn any_set(&self) -> bool {
        $name::any_set(self)
      }
      fn all_set(&self) -> bool {
        $name::all_set(self)
      }
      fn any_of(&self, idxs: &[BitIndex]) -> bool {
        $name::any_of(self, idxs)
      }
      fn all_of(&self, idxs: &[BitIndex]) -> bool {
        $name::all_of(self, idxs)
      }
      fn size(&self) -> usize {
        $size
      }
      fn fmt_pretty(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..$size).rev() {
          f.write_str(if self.0 & (1 << i) != 0 { "I" } else { "O" })?;
          if i != 0 {
            f.write_str(if i % 8 == 0 { "_" } else { "|" })?;
          }
        }
        Ok(())
      }
    }
  };
}

impl_bitflags!(BitFlags8, u8, 8, "Wrapper for `u8` bit flags, carrying 8 flags at max.");
impl_bitflags!(BitFlags16, u16, 16, "Wrapper for `u16` bit flags, carrying 16 flags at max.");
impl_bitflags!(BitFlags32, u32, 32, "Wrapper for `u32` bit flags, carrying 32 flags at max.");
impl_bitflags!(BitFlags64, u64, 64, "Wrapper for `u64` bit flags, carrying 64 flags at max.");
