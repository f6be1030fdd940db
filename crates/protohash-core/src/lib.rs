//! Canonical ObjectHash digests for Protocol Buffer message trees.
//!
//! Two messages with equal logical content hash identically, regardless of
//! wire encoding, field order, proto2-vs-proto3 flavor, or 32-bit vs 64-bit
//! float width denoting the same value. The digest is computed by
//! recursively hashing typed leaves under single-byte tags and combining
//! children with order-independent rules for maps and order-significant
//! rules for lists.
//!
//! The crate consumes an already-materialized reflection tree (the
//! [`message`] module); schema parsing, descriptor loading, and wire
//! decoding live with producers such as the `protohash-prost` bridge.
//!
//! # Example
//!
//! ```rust
//! use protohash_core::{MessageBuilder, ObjectHasher, Options};
//!
//! let message = MessageBuilder::proto3("example.Greeting")
//!     .string(1, "text", "hello")
//!     .build();
//!
//! let hasher = ObjectHasher::new(Options::string_preferring());
//! let digest = hasher.hash_message(&message).unwrap();
//! assert_eq!(digest.as_bytes().len(), 32);
//! ```

pub mod hash;
pub mod message;

// Re-export main types at crate root
pub use hash::{
    BasicHashFunction, BasicHasher, Digest, FieldKeyStyle, HashError, HashResult,
    IntegerMapKeyStyle, ObjectHasher, Options,
};
pub use message::{
    Field, FieldValue, MapEntry, MapKey, MapValue, Message, MessageBuilder, Syntax, Value,
};
