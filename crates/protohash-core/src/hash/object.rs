//! Recursive object hasher over the reflection tree.
//!
//! Messages hash as canonical maps of field keys to field values, repeated
//! fields as ordered lists, map fields as canonical unordered collections.
//! Absence rules differ by syntax flavor: proto3 zero scalars and empty
//! collections read as unset, proto2 explicit defaults do not.

use std::collections::HashSet;

use crate::hash::basic::{BasicHasher, LIST_TAG, MAP_TAG};
use crate::hash::digest::Digest;
use crate::hash::error::{HashError, HashResult};
use crate::hash::options::{FieldKeyStyle, IntegerMapKeyStyle, Options};
use crate::hash::wellknown;
use crate::message::{Field, FieldValue, MapEntry, MapKey, MapValue, Message, Syntax, Value};

/// Hashes message trees and loose scalar values under a fixed option set.
///
/// The hasher is a pure function of its inputs and options: it holds no
/// mutable state, retains no references to user data, and may be shared
/// across threads freely.
#[derive(Debug, Clone, Copy)]
pub struct ObjectHasher {
    options: Options,
    basic: BasicHasher,
}

impl ObjectHasher {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            basic: BasicHasher::new(options.hash_function),
        }
    }

    /// The options this hasher was constructed with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub(crate) fn basic(&self) -> &BasicHasher {
        &self.basic
    }

    /// Hash a message tree.
    ///
    /// Well-known `google.protobuf` types take their special forms; every
    /// other message hashes as the canonical map of its set fields.
    pub fn hash_message(&self, message: &Message) -> HashResult<Digest> {
        if wellknown::is_well_known(message) {
            return wellknown::hash_well_known(self, message);
        }
        self.hash_fields(message)
    }

    /// Hash a loose scalar leaf.
    pub fn hash_value(&self, value: &Value) -> HashResult<Digest> {
        match value {
            Value::Nil => Ok(self.basic.hash_nil()),
            Value::Bool(v) => Ok(self.basic.hash_bool(*v)),
            Value::Int(v) => Ok(self.basic.hash_int64(*v)),
            Value::Uint(v) => Ok(self.basic.hash_uint64(*v)),
            Value::Float(v) => self.basic.hash_float(*v),
            Value::Enum(v) => Ok(self.basic.hash_int64(i64::from(*v))),
            Value::String(v) => Ok(self.basic.hash_unicode(v)),
            Value::Bytes(v) => Ok(self.basic.hash_bytes(v)),
        }
    }

    fn hash_fields(&self, message: &Message) -> HashResult<Digest> {
        let mut pairs = Vec::with_capacity(message.fields.len());
        let mut seen = HashSet::with_capacity(message.fields.len());
        for field in &message.fields {
            if !seen.insert(field.number) {
                return Err(HashError::Reflection(format!(
                    "duplicate field number {} in {}",
                    field.number, message.type_name
                )));
            }
            if self.field_is_absent(message.syntax, field) {
                continue;
            }
            let key = self.hash_field_key(field);
            let value = self.hash_field_value(&field.value)?;
            pairs.push(pair_bytes(&key, &value));
        }
        Ok(self.hash_pair_set(pairs))
    }

    /// Absence rules. Proto3 cannot distinguish zero scalars from unset
    /// ones, except for oneof members which have explicit presence. Empty
    /// repeated and map fields read as unset under both flavors.
    fn field_is_absent(&self, syntax: Syntax, field: &Field) -> bool {
        match &field.value {
            FieldValue::Scalar(value) => {
                syntax == Syntax::Proto3 && !field.oneof && value.is_zero()
            }
            FieldValue::Message(_) => false,
            FieldValue::ScalarList(items) => items.is_empty(),
            FieldValue::MessageList(items) => items.is_empty(),
            FieldValue::Map(entries) => entries.is_empty(),
        }
    }

    fn hash_field_key(&self, field: &Field) -> Digest {
        match self.options.field_key_style {
            FieldKeyStyle::FieldNumber => self.basic.hash_uint64(u64::from(field.number)),
            FieldKeyStyle::FieldName => self.basic.hash_unicode(&field.name),
        }
    }

    fn hash_field_value(&self, value: &FieldValue) -> HashResult<Digest> {
        match value {
            FieldValue::Scalar(v) => self.hash_value(v),
            FieldValue::Message(m) => self.hash_message(m),
            FieldValue::ScalarList(items) => {
                let mut body = Vec::new();
                for item in items {
                    body.extend_from_slice(self.hash_value(item)?.as_bytes());
                }
                Ok(self.basic.hash(LIST_TAG, &body))
            }
            FieldValue::MessageList(items) => {
                let mut body = Vec::new();
                for item in items {
                    body.extend_from_slice(self.hash_message(item)?.as_bytes());
                }
                Ok(self.basic.hash(LIST_TAG, &body))
            }
            FieldValue::Map(entries) => self.hash_map(entries),
        }
    }

    fn hash_map(&self, entries: &[MapEntry]) -> HashResult<Digest> {
        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            let key = self.hash_map_key(&entry.key);
            let value = match &entry.value {
                MapValue::Scalar(v) => self.hash_value(v)?,
                MapValue::Message(m) => self.hash_message(m)?,
            };
            pairs.push(pair_bytes(&key, &value));
        }
        Ok(self.hash_pair_set(pairs))
    }

    fn hash_map_key(&self, key: &MapKey) -> Digest {
        let prefer_strings = self.options.field_key_style == FieldKeyStyle::FieldName
            && self.options.integer_map_keys == IntegerMapKeyStyle::DecimalString;
        match key {
            MapKey::Bool(v) => self.basic.hash_bool(*v),
            MapKey::Int(v) if prefer_strings => self.basic.hash_unicode(&v.to_string()),
            MapKey::Int(v) => self.basic.hash_int64(*v),
            MapKey::Uint(v) if prefer_strings => self.basic.hash_unicode(&v.to_string()),
            MapKey::Uint(v) => self.basic.hash_uint64(*v),
            MapKey::String(v) => self.basic.hash_unicode(v),
        }
    }

    /// Canonical unordered collection: sort the concatenated
    /// `key_digest || value_digest` pairs byte-lexicographically and hash
    /// the concatenation under the map tag. Sorting on the whole pair keeps
    /// the output stable even if two distinct keys collide on their key
    /// digest.
    fn hash_pair_set(&self, mut pairs: Vec<Vec<u8>>) -> Digest {
        pairs.sort();
        let mut body = Vec::with_capacity(pairs.iter().map(Vec::len).sum());
        for pair in &pairs {
            body.extend_from_slice(pair);
        }
        self.basic.hash(MAP_TAG, &body)
    }
}

impl Default for ObjectHasher {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

fn pair_bytes(key: &Digest, value: &Digest) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(key.as_bytes().len() + value.as_bytes().len());
    bytes.extend_from_slice(key.as_bytes());
    bytes.extend_from_slice(value.as_bytes());
    bytes
}
