mod rcbox;

pub use self::rcbox::RcBox;

/// Produced when reconstructing an `RcBox` from a raw pointer that is null
/// or lacks the alignment every live allocation is guaranteed to have
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NullReferenceError {
    #[error("expected a live reference, got null")]
    Null,
    #[error("expected an 8-byte aligned reference")]
    Misaligned,
}
