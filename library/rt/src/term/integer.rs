use core::cmp::Ordering;
use core::fmt::{self, Debug, Display};

use tern_number::{BigInt, Int, ToPrimitive};

/// The heap payload behind a boxed tagged integer.
///
/// Nothing here is width-limited; the word encoding decides when a value
/// lands in one of these rather than inline.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    pub(crate) value: BigInt,
}
impl BigInteger {
    #[inline]
    pub fn new(value: BigInt) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.value.to_i64()
    }
}

impl From<i64> for BigInteger {
    #[inline]
    fn from(i: i64) -> Self {
        Self::new(BigInt::from(i))
    }
}
impl From<BigInt> for BigInteger {
    #[inline]
    fn from(i: BigInt) -> Self {
        Self::new(i)
    }
}
impl From<Int> for BigInteger {
    fn from(i: Int) -> Self {
        match i {
            Int::Small(i) => i.into(),
            Int::Big(i) => i.into(),
        }
    }
}

impl PartialEq<i64> for BigInteger {
    #[inline]
    fn eq(&self, other: &i64) -> bool {
        self.value == BigInt::from(*other)
    }
}
impl Ord for BigInteger {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}
impl PartialOrd for BigInteger {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialOrd<i64> for BigInteger {
    #[inline]
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.value.partial_cmp(&BigInt::from(*other))
    }
}

impl Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("BigInteger").field(&self.value).finish()
    }
}
impl Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.value, f)
    }
}
