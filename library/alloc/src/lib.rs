pub mod rc;

pub use self::rc::{NullReferenceError, RcBox};
