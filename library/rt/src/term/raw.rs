//! The packed representation of a runtime integer is a single 64-bit word
//! whose least-significant bit is the tag:
//!
//! * tag `0` — the *inline* form. The upper 63 bits are the value shifted
//!   left by one, so decoding is one arithmetic shift right and the usable
//!   range is `[-(2^62), 2^62 - 1]`: one bit is spent on the tag, and the
//!   top bit keeps its job as the sign.
//! * tag `1` — the *boxed* form. Clearing the tag yields a non-null pointer
//!   to a reference-counted `BigInteger`. Allocations always carry at least
//!   8-byte alignment, so the tag bit of a real pointer is always free.
//!
//! The tag placement makes the hot question cheap: "are both operands
//! inline" is `(a | b) & 1 == 0`, one test before any arithmetic fast path.
//! Results that no longer fit the inline range are promoted to the boxed
//! form silently; no operation here wraps or truncates.
//!
//! A boxed word owns one strong reference to its payload. Cloning a word
//! takes another reference, dropping it releases one, and the raw-word
//! conversions (`into_raw`/`try_from_raw`) move that ownership across a
//! generated-code boundary without touching the count.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, ManuallyDrop};
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};

use log::trace;
use static_assertions::{assert_eq_size, const_assert_eq};

use tern_alloc::RcBox;
use tern_number::{BigInt, DivisionError, Int};

use super::{BigInteger, DecodeError, Integer, RangeError};

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        const TAG_MASK: u64 = 0x01;
        const BOXED_TAG: u64 = 0x01;
    } else {
        compile_error!("the packed integer encoding requires a 64-bit target");
    }
}

/// A runtime integer packed into one machine word.
///
/// See the module documentation for the encoding. All access goes through
/// the operations here; the raw word leaves this module only via `raw` and
/// `into_raw`, and re-enters only via the checked `try_from_raw` or the
/// debug-asserted unchecked constructors.
#[derive(Debug)]
#[repr(transparent)]
pub struct TaggedInt(u64);

assert_eq_size!(TaggedInt, *const ());

// The inline ranges of the word encoding and of the by-value Int union are
// the same boundary; neither may drift without the other
const_assert_eq!(TaggedInt::MAX_SMALL, Int::MAX_SMALL);
const_assert_eq!(TaggedInt::MIN_SMALL, Int::MIN_SMALL);

// A boxed word shares its payload, and the payload's count is atomic
unsafe impl Send for TaggedInt {}
unsafe impl Sync for TaggedInt {}

impl TaggedInt {
    /// The largest value the inline form can hold
    pub const MAX_SMALL: i64 = i64::MAX >> 1;
    /// The smallest value the inline form can hold
    pub const MIN_SMALL: i64 = i64::MIN >> 1;

    /// The constant zero, encoded inline
    pub const ZERO: Self = Self(0);

    /// Create an inline word from a value already known to fit it, returning
    /// `Err` if the value is out of range.
    #[inline]
    pub fn new(i: i64) -> Result<Self, RangeError> {
        if i > Self::MAX_SMALL || i < Self::MIN_SMALL {
            return Err(RangeError);
        }
        Ok(unsafe { Self::new_unchecked(i) })
    }

    /// Same as `new`, but the range precondition is the caller's problem.
    ///
    /// # Safety
    ///
    /// `i` must lie within `[MIN_SMALL, MAX_SMALL]`; the shift below simply
    /// discards the top bit otherwise and the word decodes to the wrong
    /// value.
    #[inline]
    pub unsafe fn new_unchecked(i: i64) -> Self {
        debug_assert!(
            i <= Self::MAX_SMALL,
            "invalid inline integer value ({}), larger than MAX_SMALL ({})",
            i,
            Self::MAX_SMALL
        );
        debug_assert!(
            i >= Self::MIN_SMALL,
            "invalid inline integer value ({}), less than MIN_SMALL ({})",
            i,
            Self::MIN_SMALL
        );
        Self((i << 1) as u64)
    }

    /// The checked inline constructor for the unsigned word width used at
    /// size/index call sites; semantics are those of `new`.
    #[inline]
    pub fn from_usize(u: usize) -> Result<Self, RangeError> {
        match i64::try_from(u) {
            Ok(i) => Self::new(i),
            Err(_) => Err(RangeError),
        }
    }

    /// Box a value directly, regardless of magnitude.
    ///
    /// The word takes over the strong reference held by `boxed`.
    pub fn from_big(boxed: RcBox<BigInteger>) -> Self {
        let raw = RcBox::into_raw(boxed) as u64;
        debug_assert_eq!(
            raw & TAG_MASK,
            0,
            "expected pointer to have at least 8-byte alignment"
        );
        Self(raw | BOXED_TAG)
    }

    /// Returns true if this word holds its value inline
    #[inline(always)]
    pub fn is_small(&self) -> bool {
        self.0 & TAG_MASK == 0
    }

    /// Returns true if this word holds a reference to a boxed payload
    #[inline(always)]
    pub fn is_boxed(&self) -> bool {
        self.0 & TAG_MASK == BOXED_TAG
    }

    /// Extracts the value of an inline word.
    ///
    /// Only defined when `is_small`; the shift is arithmetic, so the sign
    /// survives decoding.
    #[inline]
    pub fn as_small(&self) -> i64 {
        debug_assert!(self.is_small(), "decoded a boxed word as an inline value");
        (self.0 as i64) >> 1
    }

    /// Borrows the boxed payload, or `None` for an inline word
    #[inline]
    pub fn as_big(&self) -> Option<&BigInteger> {
        if self.is_boxed() {
            Some(unsafe { &*self.as_big_ptr() })
        } else {
            None
        }
    }

    /// Returns an owned reference to this value as a boxed payload.
    ///
    /// An inline value is boxed fresh, and the caller owns the only new
    /// reference. An already-boxed value is never re-boxed: the existing
    /// payload's count goes up by one and the caller shares it.
    pub fn to_big(&self) -> RcBox<BigInteger> {
        match self.as_big() {
            None => RcBox::new(BigInteger::from(self.as_small())),
            Some(_) => {
                let existing =
                    ManuallyDrop::new(unsafe { RcBox::from_raw(self.as_big_ptr()) });
                RcBox::clone(&existing)
            }
        }
    }

    /// The by-value view used for arithmetic outside the fast path
    pub fn value(&self) -> Int {
        match self.as_big() {
            None => Int::new(self.as_small()),
            Some(big) => Int::from(big.value().clone()),
        }
    }

    /// Decodes into the pattern-matchable view; boxed payloads are shared,
    /// not copied
    pub fn decode(&self) -> Integer {
        if self.is_small() {
            Integer::Small(self.as_small())
        } else {
            Integer::Big(self.to_big())
        }
    }

    /// This word as a raw u64, ownership untouched
    #[inline(always)]
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Consumes the word, leaving its strong reference (if any) outstanding
    /// for whoever later reconstructs it from the raw value
    pub fn into_raw(self) -> u64 {
        ManuallyDrop::new(self).0
    }

    /// Reconstructs a word from `into_raw`, resuming ownership of the
    /// outstanding reference.
    ///
    /// A boxed-tagged word with a null or misaligned pointer is a checked
    /// error: that word cannot have come from a live encoding, and blindly
    /// adopting it would corrupt a count on first use.
    ///
    /// # Safety
    ///
    /// A well-formed boxed word must still carry an outstanding reference
    /// produced by `into_raw`, not yet resumed elsewhere.
    pub unsafe fn try_from_raw(raw: u64) -> Result<Self, DecodeError> {
        if raw & TAG_MASK == BOXED_TAG {
            let ptr = (raw & !TAG_MASK) as *mut BigInteger;
            let boxed = RcBox::try_from_raw(ptr)?;
            // Ownership stays with the raw word until the new value takes it
            mem::forget(boxed);
        }
        Ok(Self(raw))
    }

    /// `try_from_raw` without the checks, for words that never left the
    /// runtime's custody.
    ///
    /// # Safety
    ///
    /// Same contract as `try_from_raw`, and the word must be well-formed.
    pub unsafe fn from_raw_unchecked(raw: u64) -> Self {
        debug_assert!(
            raw & TAG_MASK == 0 || raw & !TAG_MASK != 0,
            "boxed word holds a null reference"
        );
        Self(raw)
    }

    #[inline]
    unsafe fn as_big_ptr(&self) -> *mut BigInteger {
        debug_assert!(self.is_boxed());
        (self.0 & !TAG_MASK) as *mut BigInteger
    }
}

impl Clone for TaggedInt {
    fn clone(&self) -> Self {
        if self.is_boxed() {
            let existing = ManuallyDrop::new(unsafe { RcBox::from_raw(self.as_big_ptr()) });
            RcBox::increment_strong_count(&existing);
        }
        Self(self.0)
    }
}

impl Drop for TaggedInt {
    fn drop(&mut self) {
        if self.is_boxed() {
            drop(unsafe { RcBox::from_raw(self.as_big_ptr()) });
        }
    }
}

impl From<i64> for TaggedInt {
    /// The total encoding: values beyond the inline range promote to the
    /// boxed form rather than failing
    fn from(i: i64) -> Self {
        match Self::new(i) {
            Ok(t) => t,
            Err(RangeError) => {
                trace!("promoting {} to the boxed representation", i);
                Self::from_big(RcBox::new(BigInteger::from(i)))
            }
        }
    }
}
impl From<i32> for TaggedInt {
    #[inline]
    fn from(i: i32) -> Self {
        unsafe { Self::new_unchecked(i.into()) }
    }
}
impl From<u32> for TaggedInt {
    #[inline]
    fn from(i: u32) -> Self {
        unsafe { Self::new_unchecked(i.into()) }
    }
}
impl From<i16> for TaggedInt {
    #[inline]
    fn from(i: i16) -> Self {
        unsafe { Self::new_unchecked(i.into()) }
    }
}
impl From<u16> for TaggedInt {
    #[inline]
    fn from(i: u16) -> Self {
        unsafe { Self::new_unchecked(i.into()) }
    }
}
impl From<i8> for TaggedInt {
    #[inline]
    fn from(i: i8) -> Self {
        unsafe { Self::new_unchecked(i.into()) }
    }
}
impl From<u8> for TaggedInt {
    #[inline]
    fn from(i: u8) -> Self {
        unsafe { Self::new_unchecked(i.into()) }
    }
}
impl From<BigInt> for TaggedInt {
    fn from(i: BigInt) -> Self {
        Int::from(i).into()
    }
}
impl From<Int> for TaggedInt {
    fn from(i: Int) -> Self {
        match i {
            Int::Small(i) => i.into(),
            Int::Big(i) => Self::from_big(RcBox::new(i.into())),
        }
    }
}
impl From<Integer> for TaggedInt {
    fn from(i: Integer) -> Self {
        match i {
            Integer::Small(i) => i.into(),
            // Re-check the payload so a small value smuggled into a box
            // comes back out inline
            Integer::Big(big) => match big.to_i64() {
                Some(i) if i <= Self::MAX_SMALL && i >= Self::MIN_SMALL => unsafe {
                    Self::new_unchecked(i)
                },
                _ => Self::from_big(big),
            },
        }
    }
}
impl From<TaggedInt> for Integer {
    /// Decoding by ownership transfer: the reference held by a boxed word
    /// moves into the `Big` variant without touching the count
    fn from(t: TaggedInt) -> Integer {
        if t.is_small() {
            Integer::Small(t.as_small())
        } else {
            let ptr = unsafe { t.as_big_ptr() };
            mem::forget(t);
            Integer::Big(unsafe { RcBox::from_raw(ptr) })
        }
    }
}

impl Eq for TaggedInt {}
impl PartialEq for TaggedInt {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_big(), other.as_big()) {
            (None, None) => self.0 == other.0,
            (Some(lhs), Some(rhs)) => lhs == rhs,
            (None, Some(big)) | (Some(big), None) => {
                // Equal only for a denormalized box holding an inline-range
                // value; the encoders never produce one, but raw words can
                let small = if self.is_small() { self } else { other };
                *big == small.as_small()
            }
        }
    }
}
impl PartialEq<i64> for TaggedInt {
    fn eq(&self, rhs: &i64) -> bool {
        match self.as_big() {
            None => self.as_small() == *rhs,
            Some(big) => *big == *rhs,
        }
    }
}

impl Ord for TaggedInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_big(), other.as_big()) {
            (None, None) => self.as_small().cmp(&other.as_small()),
            (Some(lhs), Some(rhs)) => lhs.cmp(rhs),
            (None, Some(big)) => big
                .partial_cmp(&self.as_small())
                .unwrap_or(Ordering::Equal)
                .reverse(),
            (Some(big), None) => big
                .partial_cmp(&other.as_small())
                .unwrap_or(Ordering::Equal),
        }
    }
}
impl PartialOrd for TaggedInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for TaggedInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Numerically equal words must hash alike whether inline or boxed
        match self.as_big() {
            None => self.as_small().hash(state),
            Some(big) => match big.to_i64() {
                Some(i) => i.hash(state),
                None => big.value().hash(state),
            },
        }
    }
}

impl fmt::Display for TaggedInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_big() {
            None => self.as_small().fmt(f),
            Some(big) => big.fmt(f),
        }
    }
}
impl fmt::Binary for TaggedInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

macro_rules! tagged_binop_impl {
    ($trait:ident, $fn:ident, $checked:ident) => {
        impl $trait<&TaggedInt> for &TaggedInt {
            type Output = TaggedInt;

            fn $fn(self, rhs: &TaggedInt) -> TaggedInt {
                // Both operands inline is one mask test on the raw words
                if (self.0 | rhs.0) & TAG_MASK == 0 {
                    match self.as_small().$checked(rhs.as_small()) {
                        Some(result) => TaggedInt::from(result),
                        None => TaggedInt::from(
                            BigInt::from(self.as_small()).$fn(BigInt::from(rhs.as_small())),
                        ),
                    }
                } else {
                    TaggedInt::from(self.value().$fn(rhs.value()))
                }
            }
        }
        impl $trait for TaggedInt {
            type Output = TaggedInt;

            #[inline]
            fn $fn(self, rhs: TaggedInt) -> TaggedInt {
                (&self).$fn(&rhs)
            }
        }
    };
}

tagged_binop_impl!(Add, add, checked_add);
tagged_binop_impl!(Sub, sub, checked_sub);
tagged_binop_impl!(Mul, mul, checked_mul);

macro_rules! tagged_divop_impl {
    ($trait:ident, $fn:ident, $checked:ident) => {
        impl $trait<&TaggedInt> for &TaggedInt {
            type Output = Result<TaggedInt, DivisionError>;

            fn $fn(self, rhs: &TaggedInt) -> Self::Output {
                if (self.0 | rhs.0) & TAG_MASK == 0 {
                    if rhs.as_small() == 0 {
                        return Err(DivisionError);
                    }
                    match self.as_small().$checked(rhs.as_small()) {
                        Some(result) => Ok(TaggedInt::from(result)),
                        // Inline operands cannot overflow an i64 quotient,
                        // but keep the wide path total anyway
                        None => Ok(TaggedInt::from(
                            BigInt::from(self.as_small()).$fn(BigInt::from(rhs.as_small())),
                        )),
                    }
                } else {
                    self.value().$fn(rhs.value()).map(TaggedInt::from)
                }
            }
        }
        impl $trait for TaggedInt {
            type Output = Result<TaggedInt, DivisionError>;

            #[inline]
            fn $fn(self, rhs: TaggedInt) -> Self::Output {
                (&self).$fn(&rhs)
            }
        }
    };
}

tagged_divop_impl!(Div, div, checked_div);
tagged_divop_impl!(Rem, rem, checked_rem);

impl Neg for &TaggedInt {
    type Output = TaggedInt;

    fn neg(self) -> TaggedInt {
        if self.is_small() {
            // -MIN_SMALL is MAX_SMALL + 1; it escapes the inline range but
            // not the i64, so plain negation plus the total encoding suffices
            TaggedInt::from(-self.as_small())
        } else {
            TaggedInt::from(self.value().neg())
        }
    }
}
impl Neg for TaggedInt {
    type Output = TaggedInt;

    #[inline]
    fn neg(self) -> TaggedInt {
        (&self).neg()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use tern_alloc::NullReferenceError;

    use super::*;

    #[test]
    fn tagged_inline_round_trip() {
        for i in [0i64, 1, -1, 5, -3, 1234567, TaggedInt::MAX_SMALL, TaggedInt::MIN_SMALL] {
            let t = TaggedInt::new(i).unwrap();
            assert!(t.is_small());
            assert!(!t.is_boxed());
            assert_eq!(t.as_small(), i);
        }
    }

    #[test]
    fn tagged_five_is_the_word_ten() {
        let t = TaggedInt::new(5).unwrap();
        assert_eq!(t.raw(), 0b1010);
    }

    #[test]
    fn tagged_negative_decode_preserves_sign() {
        let t = TaggedInt::new(-3).unwrap();
        assert_eq!(t.as_small(), -3);
        // The tag bit of the shifted negative is still zero
        assert!(t.is_small());
    }

    #[test]
    fn tagged_new_rejects_out_of_range() {
        assert_eq!(TaggedInt::new(TaggedInt::MAX_SMALL + 1), Err(RangeError));
        assert_eq!(TaggedInt::new(TaggedInt::MIN_SMALL - 1), Err(RangeError));
        assert_eq!(TaggedInt::new(i64::MAX), Err(RangeError));
    }

    #[test]
    fn tagged_from_usize_widths() {
        let t = TaggedInt::from_usize(4096).unwrap();
        assert_eq!(t.as_small(), 4096);
        assert_eq!(
            TaggedInt::from_usize(TaggedInt::MAX_SMALL as usize + 1),
            Err(RangeError)
        );
        assert_eq!(TaggedInt::from_usize(usize::MAX), Err(RangeError));
    }

    #[test]
    fn tagged_total_encoding_promotes_out_of_range() {
        let t = TaggedInt::from(TaggedInt::MAX_SMALL + 1);
        assert!(t.is_boxed());
        assert!(!t.is_small());
        assert_eq!(t.decode().to_int(), Int::new(TaggedInt::MAX_SMALL) + Int::new(1));
    }

    #[test]
    fn tagged_boxing_an_inline_value_round_trips() {
        let t = TaggedInt::new(42).unwrap();
        let big = t.to_big();
        assert_eq!(RcBox::strong_count(&big), 1);
        assert_eq!(*big, 42i64);
    }

    #[test]
    fn tagged_boxing_a_boxed_value_shares_the_payload() {
        let t = TaggedInt::from(TaggedInt::MAX_SMALL + 1);
        let b1 = t.to_big();
        // The word itself holds one reference
        assert_eq!(RcBox::strong_count(&b1), 2);
        let b2 = t.to_big();
        assert_eq!(RcBox::strong_count(&b1), 3);
        assert_eq!(b1, b2);
        drop(b2);
        assert_eq!(RcBox::strong_count(&b1), 2);
        drop(t);
        assert_eq!(RcBox::strong_count(&b1), 1);
    }

    #[test]
    fn tagged_clone_and_drop_adjust_the_count() {
        let t = TaggedInt::from(TaggedInt::MIN_SMALL - 1);
        let probe = t.to_big();
        assert_eq!(RcBox::strong_count(&probe), 2);

        let u = t.clone();
        assert_eq!(RcBox::strong_count(&probe), 3);
        drop(t);
        assert_eq!(RcBox::strong_count(&probe), 2);
        drop(u);
        assert_eq!(RcBox::strong_count(&probe), 1);
    }

    #[test]
    fn tagged_clone_of_inline_is_free() {
        let t = TaggedInt::new(7).unwrap();
        let u = t.clone();
        assert_eq!(t, u);
        assert_eq!(u.as_small(), 7);
    }

    #[test]
    fn tagged_raw_round_trip_moves_ownership() {
        let t = TaggedInt::from(TaggedInt::MAX_SMALL + 1);
        let probe = t.to_big();
        assert_eq!(RcBox::strong_count(&probe), 2);

        let raw = t.into_raw();
        assert_eq!(RcBox::strong_count(&probe), 2);

        let t = unsafe { TaggedInt::try_from_raw(raw) }.unwrap();
        assert_eq!(RcBox::strong_count(&probe), 2);
        drop(t);
        assert_eq!(RcBox::strong_count(&probe), 1);
    }

    #[test]
    fn tagged_try_from_raw_rejects_damaged_words() {
        // A boxed tag over a null pointer is the double-release shape
        assert_eq!(
            unsafe { TaggedInt::try_from_raw(0b1) },
            Err(DecodeError(NullReferenceError::Null))
        );
        assert_eq!(
            unsafe { TaggedInt::try_from_raw(0x1003) },
            Err(DecodeError(NullReferenceError::Misaligned))
        );
        // Inline words are always well-formed
        let t = unsafe { TaggedInt::try_from_raw(0b1010) }.unwrap();
        assert_eq!(t.as_small(), 5);
    }

    #[test]
    fn tagged_decode_matches_encoding() {
        assert_eq!(TaggedInt::new(9).unwrap().decode(), Integer::Small(9));

        let t = TaggedInt::from(TaggedInt::MAX_SMALL + 1);
        match t.decode() {
            Integer::Big(big) => assert_eq!(*big.value(), BigInt::from(TaggedInt::MAX_SMALL) + 1),
            Integer::Small(_) => panic!("expected the boxed form"),
        }
    }

    #[test]
    fn tagged_decode_by_ownership_transfer() {
        let t = TaggedInt::from(TaggedInt::MAX_SMALL + 1);
        let probe = t.to_big();
        assert_eq!(RcBox::strong_count(&probe), 2);

        let decoded: Integer = t.into();
        // The word's reference moved into the decoded view; no traffic
        assert_eq!(RcBox::strong_count(&probe), 2);
        drop(decoded);
        assert_eq!(RcBox::strong_count(&probe), 1);
    }

    #[test]
    fn tagged_encode_normalizes_denormal_boxes() {
        let denormal = Integer::Big(RcBox::new(BigInteger::from(11)));
        let t = TaggedInt::from(denormal);
        assert!(t.is_small());
        assert_eq!(t.as_small(), 11);
    }

    #[test]
    fn tagged_add_fast_path_and_promotion() {
        let a = TaggedInt::new(2).unwrap();
        let b = TaggedInt::new(3).unwrap();
        assert_eq!((&a + &b).as_small(), 5);

        let max = TaggedInt::new(TaggedInt::MAX_SMALL).unwrap();
        let one = TaggedInt::new(1).unwrap();
        let sum = &max + &one;
        assert!(sum.is_boxed());
        assert_eq!(sum, TaggedInt::from(TaggedInt::MAX_SMALL + 1));
    }

    #[test]
    fn tagged_sub_result_returns_inline() {
        let big = TaggedInt::from(TaggedInt::MAX_SMALL + 1);
        let one = TaggedInt::new(1).unwrap();
        let diff = &big - &one;
        assert!(diff.is_small());
        assert_eq!(diff.as_small(), TaggedInt::MAX_SMALL);
    }

    #[test]
    fn tagged_mul_promotes_through_i64_overflow() {
        let a = TaggedInt::new(i64::MAX >> 2).unwrap();
        let b = TaggedInt::new(8).unwrap();
        let product = &a * &b;
        assert!(product.is_boxed());
        assert_eq!(
            product,
            TaggedInt::from(BigInt::from(i64::MAX >> 2) * 8)
        );
    }

    #[test]
    fn tagged_neg_at_the_boundary() {
        let t = -TaggedInt::new(TaggedInt::MIN_SMALL).unwrap();
        assert!(t.is_boxed());
        assert_eq!(t, TaggedInt::from(TaggedInt::MAX_SMALL + 1));

        let back = -&t;
        assert!(back.is_small());
        assert_eq!(back.as_small(), TaggedInt::MIN_SMALL);
    }

    #[test]
    fn tagged_division() {
        let a = TaggedInt::new(7).unwrap();
        let b = TaggedInt::new(2).unwrap();
        assert_eq!((&a / &b).unwrap().as_small(), 3);
        assert_eq!((&a % &b).unwrap().as_small(), 1);

        let zero = TaggedInt::ZERO;
        assert_eq!(&a / &zero, Err(DivisionError));
        assert_eq!(&a % &zero, Err(DivisionError));
    }

    #[test]
    fn tagged_mixed_arithmetic_falls_back_to_the_wide_path() {
        let big = TaggedInt::from(TaggedInt::MAX_SMALL + 1);
        let small = TaggedInt::new(1).unwrap();
        let sum = &big + &small;
        assert!(sum.is_boxed());
        assert_eq!(sum, TaggedInt::from(BigInt::from(TaggedInt::MAX_SMALL) + 2));
    }

    #[test]
    fn tagged_equality_and_ordering_across_forms() {
        let small = TaggedInt::new(10).unwrap();
        let big = TaggedInt::from(TaggedInt::MAX_SMALL + 1);
        let neg_big = TaggedInt::from(TaggedInt::MIN_SMALL - 1);

        assert_eq!(small, TaggedInt::new(10).unwrap());
        assert_ne!(small, big);
        assert!(small < big);
        assert!(neg_big < small);
        assert!(neg_big < big);
        assert!(big > small);

        // A denormalized box still compares equal numerically
        let denormal = TaggedInt::from_big(RcBox::new(BigInteger::from(10)));
        assert_eq!(small, denormal);
        assert_eq!(denormal, small);
    }

    #[test]
    fn tagged_zero_constant() {
        assert!(TaggedInt::ZERO.is_small());
        assert_eq!(TaggedInt::ZERO.as_small(), 0);
        assert_eq!(TaggedInt::ZERO.raw(), 0);
    }
}
