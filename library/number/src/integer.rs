use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Rem, Shl, Shr, Sub};
use core::str::FromStr;

use num_bigint::{BigInt, ParseBigIntError};
use num_integer::Integer as _;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

use crate::DivisionError;

/// A signed integer of unbounded range, stored without allocation while the
/// value fits the inline range of the word encoding.
///
/// The `Small` variant holds values in `[MIN_SMALL, MAX_SMALL]`; everything
/// else lives in a `Big`. Operations never wrap: a result that leaves the
/// inline range is promoted to `Big`, and any `BigInt` result that fits is
/// shrunk back down, so `Big` never holds a value `Small` could.
#[derive(Debug, Clone)]
pub enum Int {
    Small(i64),
    Big(BigInt),
}
impl Int {
    // NOTE: See TaggedInt in tern_rt for the authoritative derivation of
    // these constants. One bit of the word is the tag, one is the sign.
    pub const MAX_SMALL: i64 = (1 << 62) - 1;
    pub const MIN_SMALL: i64 = -(1 << 62);

    /// Create an `Int` from an `i64`, choosing the cheapest representation
    /// that preserves the value.
    #[inline]
    pub fn new(i: i64) -> Self {
        if i < Self::MIN_SMALL || i > Self::MAX_SMALL {
            Self::Big(i.into())
        } else {
            Self::Small(i)
        }
    }

    #[inline]
    pub fn is_small(&self) -> bool {
        match self {
            Self::Small(_) => true,
            Self::Big(_) => false,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Small(i) => *i == 0,
            Self::Big(i) => i.is_zero(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Self::Small(i) => *i < 0,
            Self::Big(i) => i.is_negative(),
        }
    }

    pub fn abs(&self) -> Self {
        match self {
            Self::Small(i) => match i.checked_abs() {
                Some(i) => Self::new(i),
                None => Self::Big(BigInt::from(*i).abs()),
            },
            Self::Big(i) => i.abs().into(),
        }
    }

    /// The fewest bits needed to express this value, sign excluded
    pub fn bits(&self) -> u64 {
        match self {
            Self::Big(i) => i.bits(),
            Self::Small(i) => {
                let i = *i;
                if i >= 0 {
                    (64 - i.leading_zeros()) as u64
                } else {
                    (64 - i.leading_ones()) as u64
                }
            }
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Small(i) => *i as f64,
            // Values beyond f64 range saturate to the infinities
            Self::Big(i) => i.to_f64().unwrap_or_else(|| {
                if i.is_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }),
        }
    }

    pub fn to_usize(&self) -> Option<usize> {
        match self {
            Self::Small(i) => (*i).try_into().ok(),
            Self::Big(i) => i.to_usize(),
        }
    }

    pub fn from_string_radix(string: &str, radix: u32) -> Option<Self> {
        if let Ok(i) = i64::from_str_radix(string, radix) {
            return Some(Self::new(i));
        }
        let i = BigInt::parse_bytes(string.as_bytes(), radix)?;
        Some(i.into())
    }

    /// Flooring division, i.e. the quotient is rounded towards negative
    /// infinity rather than towards zero.
    pub fn div_floor(&self, rhs: &Self) -> Result<Self, DivisionError> {
        if rhs.is_zero() {
            return Err(DivisionError);
        }
        match (self, rhs) {
            (Self::Small(lhs), Self::Small(rhs)) => {
                // i64::MIN / -1 is the one quotient an i64 cannot hold
                match (*lhs, *rhs) {
                    (i64::MIN, -1) => Ok(Self::Big(-BigInt::from(i64::MIN))),
                    (lhs, rhs) => Ok(Self::new(lhs.div_floor(&rhs))),
                }
            }
            (lhs, rhs) => Ok(lhs.to_bigint().div_floor(&rhs.to_bigint()).into()),
        }
    }

    /// The remainder paired with `div_floor`; takes the sign of the divisor
    pub fn mod_floor(&self, rhs: &Self) -> Result<Self, DivisionError> {
        if rhs.is_zero() {
            return Err(DivisionError);
        }
        match (self, rhs) {
            (Self::Small(i64::MIN), Self::Small(-1)) => Ok(Self::Small(0)),
            (Self::Small(lhs), Self::Small(rhs)) => Ok(Self::new(lhs.mod_floor(rhs))),
            (lhs, rhs) => Ok(lhs.to_bigint().mod_floor(&rhs.to_bigint()).into()),
        }
    }

    fn to_bigint(&self) -> BigInt {
        match self {
            Self::Small(i) => BigInt::from(*i),
            Self::Big(i) => i.clone(),
        }
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Small(i) => i.fmt(f),
            Self::Big(i) => i.fmt(f),
        }
    }
}

impl FromStr for Int {
    type Err = ParseBigIntError;
    fn from_str(s: &str) -> Result<Self, ParseBigIntError> {
        match s.parse::<i64>() {
            Ok(i) => Ok(Self::new(i)),
            Err(_) => s.parse::<BigInt>().map(Self::from),
        }
    }
}

impl Eq for Int {}
impl PartialEq for Int {
    fn eq(&self, rhs: &Self) -> bool {
        match (self, rhs) {
            (Self::Small(lhs), Self::Small(rhs)) => lhs == rhs,
            (Self::Big(lhs), Self::Big(rhs)) => lhs == rhs,
            (Self::Small(lhs), Self::Big(rhs)) | (Self::Big(rhs), Self::Small(lhs)) => {
                rhs.to_i64().map(|i| i == *lhs).unwrap_or(false)
            }
        }
    }
}
impl PartialEq<i64> for Int {
    fn eq(&self, rhs: &i64) -> bool {
        match self {
            Self::Small(lhs) => lhs == rhs,
            Self::Big(lhs) => lhs.to_i64().map(|i| i == *rhs).unwrap_or(false),
        }
    }
}
impl PartialEq<Int> for i64 {
    fn eq(&self, rhs: &Int) -> bool {
        rhs.eq(self)
    }
}
impl PartialEq<BigInt> for Int {
    fn eq(&self, rhs: &BigInt) -> bool {
        match self {
            Self::Small(lhs) => rhs.to_i64().map(|i| i == *lhs).unwrap_or(false),
            Self::Big(lhs) => lhs == rhs,
        }
    }
}
impl PartialEq<f64> for Int {
    fn eq(&self, rhs: &f64) -> bool {
        self.to_f64() == *rhs
    }
}

impl Hash for Int {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Values representable as Small must hash identically regardless of
        // which variant currently holds them
        match self {
            Self::Small(i) => i.hash(state),
            Self::Big(i) => match i.to_i64() {
                Some(i) => i.hash(state),
                None => i.hash(state),
            },
        }
    }
}

impl Ord for Int {
    fn cmp(&self, rhs: &Self) -> Ordering {
        match (self, rhs) {
            (Self::Small(lhs), Self::Small(rhs)) => lhs.cmp(rhs),
            (Self::Big(lhs), Self::Big(rhs)) => lhs.cmp(rhs),
            // A normalized Big is out of Small range and its sign decides,
            // but a denormalized one still has to compare exactly
            (Self::Small(lhs), Self::Big(rhs)) => match rhs.to_i64() {
                Some(rhs) => lhs.cmp(&rhs),
                None if rhs.is_negative() => Ordering::Greater,
                None => Ordering::Less,
            },
            (Self::Big(lhs), Self::Small(rhs)) => match lhs.to_i64() {
                Some(lhs) => lhs.cmp(rhs),
                None if lhs.is_negative() => Ordering::Less,
                None => Ordering::Greater,
            },
        }
    }
}
impl PartialOrd for Int {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}
impl PartialOrd<i64> for Int {
    fn partial_cmp(&self, rhs: &i64) -> Option<Ordering> {
        match self {
            Self::Small(lhs) => lhs.partial_cmp(rhs),
            Self::Big(lhs) => lhs.partial_cmp(&BigInt::from(*rhs)),
        }
    }
}
impl PartialOrd<f64> for Int {
    fn partial_cmp(&self, rhs: &f64) -> Option<Ordering> {
        self.to_f64().partial_cmp(rhs)
    }
}

macro_rules! int_binop_impl {
    ($trait:ident, $fn:ident, $checked:ident) => {
        impl $trait<&Int> for &Int {
            type Output = Int;

            fn $fn(self, rhs: &Int) -> Int {
                match (self, rhs) {
                    (Int::Small(lhs), Int::Small(rhs)) => match lhs.$checked(*rhs) {
                        Some(result) => Int::new(result),
                        None => (BigInt::from(*lhs).$fn(BigInt::from(*rhs))).into(),
                    },
                    (lhs, rhs) => lhs.to_bigint().$fn(rhs.to_bigint()).into(),
                }
            }
        }
        impl $trait for Int {
            type Output = Int;

            #[inline]
            fn $fn(self, rhs: Int) -> Int {
                (&self).$fn(&rhs)
            }
        }
        impl $trait<i64> for &Int {
            type Output = Int;

            #[inline]
            fn $fn(self, rhs: i64) -> Int {
                self.$fn(&Int::new(rhs))
            }
        }
    };
}

int_binop_impl!(Add, add, checked_add);
int_binop_impl!(Sub, sub, checked_sub);
int_binop_impl!(Mul, mul, checked_mul);

macro_rules! int_divop_impl {
    ($trait:ident, $fn:ident, $checked:ident) => {
        impl $trait<&Int> for &Int {
            type Output = Result<Int, DivisionError>;

            fn $fn(self, rhs: &Int) -> Self::Output {
                if rhs.is_zero() {
                    return Err(DivisionError);
                }
                match (self, rhs) {
                    (Int::Small(lhs), Int::Small(rhs)) => match lhs.$checked(*rhs) {
                        Some(result) => Ok(Int::new(result)),
                        // The divisor is known non-zero, so the only miss is
                        // i64::MIN / -1 overflowing
                        None => Ok((BigInt::from(*lhs).$fn(BigInt::from(*rhs))).into()),
                    },
                    (lhs, rhs) => Ok(lhs.to_bigint().$fn(rhs.to_bigint()).into()),
                }
            }
        }
        impl $trait for Int {
            type Output = Result<Int, DivisionError>;

            #[inline]
            fn $fn(self, rhs: Int) -> Self::Output {
                (&self).$fn(&rhs)
            }
        }
    };
}

int_divop_impl!(Div, div, checked_div);
int_divop_impl!(Rem, rem, checked_rem);

macro_rules! int_bitop_impl {
    ($trait:ident, $fn:ident) => {
        impl $trait<&Int> for &Int {
            type Output = Int;

            fn $fn(self, rhs: &Int) -> Int {
                match (self, rhs) {
                    (Int::Small(lhs), Int::Small(rhs)) => Int::new(lhs.$fn(rhs)),
                    (lhs, rhs) => lhs.to_bigint().$fn(rhs.to_bigint()).into(),
                }
            }
        }
        impl $trait for Int {
            type Output = Int;

            #[inline]
            fn $fn(self, rhs: Int) -> Int {
                (&self).$fn(&rhs)
            }
        }
    };
}

int_bitop_impl!(BitAnd, bitand);
int_bitop_impl!(BitOr, bitor);
int_bitop_impl!(BitXor, bitxor);

impl Neg for &Int {
    type Output = Int;

    fn neg(self) -> Int {
        match self {
            Int::Small(i) => match i.checked_neg() {
                Some(i) => Int::new(i),
                None => (-BigInt::from(*i)).into(),
            },
            Int::Big(i) => (-i).into(),
        }
    }
}
impl Neg for Int {
    type Output = Int;

    #[inline]
    fn neg(self) -> Int {
        (&self).neg()
    }
}

impl Shl<u32> for &Int {
    type Output = Int;

    fn shl(self, rhs: u32) -> Int {
        match self {
            Int::Small(lhs) => match lhs.checked_shl(rhs) {
                // checked_shl only guards the shift amount, so the result can
                // still have walked off the end of the word
                Some(result) if result >> rhs == *lhs => Int::new(result),
                _ => (BigInt::from(*lhs) << rhs).into(),
            },
            Int::Big(lhs) => (lhs << rhs).into(),
        }
    }
}
impl Shl<u32> for Int {
    type Output = Int;

    #[inline]
    fn shl(self, rhs: u32) -> Int {
        (&self).shl(rhs)
    }
}
impl Shr<u32> for &Int {
    type Output = Int;

    fn shr(self, rhs: u32) -> Int {
        match self {
            Int::Small(lhs) => Int::new(lhs >> rhs.min(63)),
            Int::Big(lhs) => (lhs >> rhs).into(),
        }
    }
}
impl Shr<u32> for Int {
    type Output = Int;

    #[inline]
    fn shr(self, rhs: u32) -> Int {
        (&self).shr(rhs)
    }
}

impl ToPrimitive for Int {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Small(i) => Some(*i),
            Self::Big(i) => i.to_i64(),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match self {
            Self::Small(i) => i.to_u64(),
            Self::Big(i) => i.to_u64(),
        }
    }
}

impl FromPrimitive for Int {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::new(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        match i64::try_from(n) {
            Ok(n) => Some(Self::new(n)),
            Err(_) => Some(Self::Big(n.into())),
        }
    }
}

impl From<i8> for Int {
    #[inline(always)]
    fn from(i: i8) -> Self {
        Self::Small(i.into())
    }
}
impl From<i16> for Int {
    #[inline(always)]
    fn from(i: i16) -> Self {
        Self::Small(i.into())
    }
}
impl From<i32> for Int {
    #[inline(always)]
    fn from(i: i32) -> Self {
        Self::Small(i.into())
    }
}
impl From<u8> for Int {
    #[inline(always)]
    fn from(i: u8) -> Self {
        Self::Small(i.into())
    }
}
impl From<u16> for Int {
    #[inline(always)]
    fn from(i: u16) -> Self {
        Self::Small(i.into())
    }
}
impl From<u32> for Int {
    #[inline(always)]
    fn from(i: u32) -> Self {
        Self::Small(i.into())
    }
}
impl From<i64> for Int {
    #[inline(always)]
    fn from(i: i64) -> Self {
        Self::new(i)
    }
}
impl From<u64> for Int {
    #[inline(always)]
    fn from(i: u64) -> Self {
        Self::from_u64(i).unwrap()
    }
}
impl From<usize> for Int {
    #[inline(always)]
    fn from(i: usize) -> Self {
        Self::from(i as u64)
    }
}
impl From<i128> for Int {
    fn from(i: i128) -> Self {
        if i > Self::MAX_SMALL as i128 || i < Self::MIN_SMALL as i128 {
            Self::Big(i.into())
        } else {
            Self::Small(i as i64)
        }
    }
}
impl From<BigInt> for Int {
    fn from(i: BigInt) -> Self {
        match i.to_i64() {
            Some(n) if (Self::MIN_SMALL..=Self::MAX_SMALL).contains(&n) => Self::Small(n),
            Some(_) | None => Self::Big(i),
        }
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn int_new_picks_cheapest_representation() {
        assert!(Int::new(0).is_small());
        assert!(Int::new(Int::MAX_SMALL).is_small());
        assert!(Int::new(Int::MIN_SMALL).is_small());
        assert!(!Int::new(Int::MAX_SMALL + 1).is_small());
        assert!(!Int::new(Int::MIN_SMALL - 1).is_small());
    }

    #[test]
    fn int_from_bigint_shrinks_when_in_range() {
        let i = Int::from(BigInt::from(42));
        assert!(i.is_small());
        assert_eq!(i, 42i64);

        let i = Int::from(BigInt::from(Int::MAX_SMALL) + 1);
        assert!(!i.is_small());
    }

    #[test]
    fn int_add_promotes_on_overflow() {
        let max = Int::new(Int::MAX_SMALL);
        let sum = &max + 1;
        assert!(!sum.is_small());
        assert_eq!(sum, Int::Big(BigInt::from(Int::MAX_SMALL) + 1));

        // i64 overflow in the checked path also promotes, not panics
        let sum = &Int::new(i64::MAX) + &Int::new(i64::MAX);
        assert_eq!(sum, Int::Big(BigInt::from(i64::MAX) * 2));
    }

    #[test]
    fn int_sub_result_shrinks_back_to_small() {
        let big = Int::new(Int::MAX_SMALL) + Int::new(1);
        assert!(!big.is_small());
        let back = &big - 1;
        assert!(back.is_small());
        assert_eq!(back, Int::MAX_SMALL);
    }

    #[test]
    fn int_mul_promotes_on_overflow() {
        let product = &Int::new(Int::MAX_SMALL) * &Int::new(2);
        assert!(!product.is_small());
        assert_eq!(product, Int::Big(BigInt::from(Int::MAX_SMALL) * 2));
    }

    #[test]
    fn int_neg_at_the_boundary_promotes() {
        // -MIN_SMALL == MAX_SMALL + 1, which is out of inline range
        let neg = -Int::new(Int::MIN_SMALL);
        assert!(!neg.is_small());
        assert_eq!(neg, Int::Big(-BigInt::from(Int::MIN_SMALL)));

        let neg = -Int::new(i64::MIN);
        assert_eq!(neg, Int::Big(-BigInt::from(i64::MIN)));
    }

    #[test]
    fn int_division_by_zero_is_an_error() {
        assert_eq!(Int::new(1) / Int::new(0), Err(DivisionError));
        assert_eq!(Int::new(1) % Int::new(0), Err(DivisionError));
        assert_eq!(
            Int::new(1).div_floor(&Int::new(0)),
            Err(DivisionError)
        );
    }

    #[test]
    fn int_division_min_over_negative_one() {
        let q = (Int::new(i64::MIN) / Int::new(-1)).unwrap();
        assert_eq!(q, Int::Big(-BigInt::from(i64::MIN)));
    }

    #[test]
    fn int_div_floor_rounds_down() {
        let q = Int::new(-7).div_floor(&Int::new(2)).unwrap();
        assert_eq!(q, -4i64);
        let r = Int::new(-7).mod_floor(&Int::new(2)).unwrap();
        assert_eq!(r, 1i64);
    }

    #[test]
    fn int_parses_both_representations() {
        let small: Int = "123456".parse().unwrap();
        assert!(small.is_small());
        assert_eq!(small, 123456i64);

        let big: Int = "170141183460469231731687303715884105728".parse().unwrap();
        assert!(!big.is_small());
        assert_eq!(big, Int::Big("170141183460469231731687303715884105728".parse().unwrap()));

        let hex = Int::from_string_radix("ff", 16).unwrap();
        assert_eq!(hex, 255i64);
    }

    #[test]
    fn int_ordering_across_variants() {
        let small = Int::new(1);
        let big_pos = Int::new(Int::MAX_SMALL) + Int::new(1);
        let big_neg = Int::new(Int::MIN_SMALL) - Int::new(1);
        assert!(small < big_pos);
        assert!(big_neg < small);
        assert!(big_neg < big_pos);
    }

    #[test]
    fn int_shl_promotes_when_bits_fall_off() {
        let shifted = Int::new(1) << 62;
        assert!(!shifted.is_small());
        assert_eq!(shifted, Int::Big(BigInt::from(1) << 62));

        let shifted = Int::new(1) << 3;
        assert!(shifted.is_small());
        assert_eq!(shifted, 8i64);
    }

    #[test]
    fn int_bits() {
        assert_eq!(Int::new(0).bits(), 0);
        assert_eq!(Int::new(5).bits(), 3);
        assert_eq!(Int::new(-1).bits(), 0);
        assert_eq!((Int::new(1) << 100).bits(), 101);
    }
}
