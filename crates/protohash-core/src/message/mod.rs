//! Reflection data model - the message trees the hasher consumes
//!
//! A [`Message`] is a materialized, read-only view of one protobuf message:
//! its fully-qualified type name, the syntax flavor of its declaring file,
//! and the fields reported as set. Producers (generated-code bindings,
//! dynamic-message bridges, test fixtures) build these trees; the hasher
//! never touches a protobuf runtime itself.
//!
//! # Example
//!
//! ```rust
//! use protohash_core::message::{MessageBuilder, Syntax};
//!
//! let message = MessageBuilder::proto3("example.Simple")
//!     .string(1, "string_field", "foo")
//!     .build();
//!
//! assert_eq!(message.syntax, Syntax::Proto3);
//! assert_eq!(message.fields.len(), 1);
//! ```

mod types;

pub use types::{
    Field, FieldValue, MapEntry, MapKey, MapValue, Message, MessageBuilder, Syntax, Value,
};
