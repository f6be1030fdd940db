//! The ObjectHash engine
//!
//! Data flows top-down: [`ObjectHasher`] walks a message tree, dispatching
//! well-known types to their special forms and everything else through the
//! structural rules, with every leaf eventually reaching the tagged
//! [`BasicHasher`] primitives. All of it is pure: same tree plus same
//! [`Options`] always yields the same digest.

mod basic;
mod digest;
mod error;
mod float;
mod object;
mod options;
mod wellknown;

pub use basic::{BasicHashFunction, BasicHasher};
pub use digest::Digest;
pub use error::{HashError, HashResult};
pub use object::ObjectHasher;
pub use options::{FieldKeyStyle, IntegerMapKeyStyle, Options};
