mod core;
mod field;

pub use self::core::*;
pub use field::{Field, FromValue, RemainderRef, RepeatedRef, ValueRef};
