mod integer;

pub use self::integer::Int;

pub use num_bigint as bigint;
pub use num_bigint::{BigInt, ToBigInt};
pub use num_integer::Integer as IntegerOps;
pub use num_traits as traits;
pub use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

/// Produced by division/remainder operations when the divisor is zero
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("division by zero")]
pub struct DivisionError;
