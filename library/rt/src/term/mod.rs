mod integer;
mod raw;

pub use self::integer::BigInteger;
pub use self::raw::TaggedInt;

use core::fmt;

use tern_alloc::{NullReferenceError, RcBox};
use tern_number::Int;

/// Produced by the checked inline constructors when the value does not fit
/// the inline range; use the total `From<i64>` conversion when promotion to
/// the boxed representation is acceptable instead
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value out of range for the inline representation")]
pub struct RangeError;

/// Produced when reconstructing a tagged word whose boxed reference is
/// absent or damaged
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid boxed integer word: {0}")]
pub struct DecodeError(#[from] NullReferenceError);

/// The decoded view of a tagged integer word.
///
/// Pattern-matching code works with this; the packed `TaggedInt` exists so
/// that storage and generated code can carry the same value in one word.
#[derive(Debug, Clone)]
pub enum Integer {
    Small(i64),
    Big(RcBox<BigInteger>),
}
impl Integer {
    #[inline]
    pub fn is_small(&self) -> bool {
        match self {
            Self::Small(_) => true,
            Self::Big(_) => false,
        }
    }

    /// The by-value view used for arithmetic outside the fast path
    pub fn to_int(&self) -> Int {
        match self {
            Self::Small(i) => Int::new(*i),
            Self::Big(big) => Int::from(big.value().clone()),
        }
    }
}

impl Eq for Integer {}
impl PartialEq for Integer {
    fn eq(&self, rhs: &Self) -> bool {
        match (self, rhs) {
            (Self::Small(lhs), Self::Small(rhs)) => lhs == rhs,
            (Self::Big(lhs), Self::Big(rhs)) => lhs == rhs,
            (Self::Small(small), Self::Big(big)) | (Self::Big(big), Self::Small(small)) => {
                **big == *small
            }
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Small(i) => i.fmt(f),
            Self::Big(i) => i.fmt(f),
        }
    }
}

impl From<i64> for Integer {
    fn from(i: i64) -> Self {
        if (TaggedInt::MIN_SMALL..=TaggedInt::MAX_SMALL).contains(&i) {
            Self::Small(i)
        } else {
            Self::Big(RcBox::new(i.into()))
        }
    }
}
impl From<RcBox<BigInteger>> for Integer {
    #[inline]
    fn from(big: RcBox<BigInteger>) -> Self {
        Self::Big(big)
    }
}
impl From<Int> for Integer {
    fn from(i: Int) -> Self {
        match i {
            Int::Small(i) => Self::Small(i),
            Int::Big(i) => Self::Big(RcBox::new(i.into())),
        }
    }
}
