//! Option set selecting the primitive hash function and key canonicalization.

use serde::{Deserialize, Serialize};

use crate::hash::basic::BasicHashFunction;

/// How message field keys are hashed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKeyStyle {
    /// Hash the field number as an integer (the default).
    #[default]
    FieldNumber,
    /// Hash the field name as a string.
    FieldName,
}

/// How integer map keys are hashed. Only consulted in field-name mode;
/// under field-number keys integer map keys always stay integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerMapKeyStyle {
    /// Hash integer keys as integers (the default).
    #[default]
    Integer,
    /// Render integer keys as decimal strings before hashing, matching
    /// JSON ObjectHash where object keys are necessarily strings. Bool and
    /// string keys are never affected.
    DecimalString,
}

/// Configuration for an [`ObjectHasher`](crate::ObjectHasher).
///
/// Options are captured by value at hasher construction; every digest a
/// hasher produces is pinned to one option set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub hash_function: BasicHashFunction,
    pub field_key_style: FieldKeyStyle,
    pub integer_map_keys: IntegerMapKeyStyle,
}

impl Options {
    /// Field names as keys; integer map keys stay integers.
    pub fn field_names_as_keys() -> Self {
        Self {
            field_key_style: FieldKeyStyle::FieldName,
            ..Self::default()
        }
    }

    /// Field names as keys with integer map keys rendered as decimal
    /// strings, for digest compatibility with JSON ObjectHash.
    pub fn string_preferring() -> Self {
        Self {
            field_key_style: FieldKeyStyle::FieldName,
            integer_map_keys: IntegerMapKeyStyle::DecimalString,
            ..Self::default()
        }
    }

    /// Replace the basic hash function.
    pub fn with_hash_function(mut self, function: BasicHashFunction) -> Self {
        self.hash_function = function;
        self
    }
}
