pub mod term;

pub use self::term::{BigInteger, DecodeError, Integer, RangeError, TaggedInt};
