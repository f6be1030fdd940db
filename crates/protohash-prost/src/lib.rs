//! Bridge from `prost-reflect` dynamic messages to the `protohash-core`
//! reflection model.
//!
//! The core hasher consumes an owned message tree; this crate materializes
//! that tree from a [`DynamicMessage`], carrying over field presence, oneof
//! membership, and the proto2/proto3 flavor of the enclosing file. It
//! performs no hashing of its own.
//!
//! Presence semantics come straight from the descriptor-driven
//! `has_field`: proto2 explicit defaults are set, proto3 implicit scalars
//! are set only when non-zero, and proto3 `optional` fields (synthetic
//! oneofs) keep their explicit presence.

use prost_reflect::{DynamicMessage, FieldDescriptor, Kind, ReflectMessage, Syntax as ProstSyntax};
use protohash_core::{
    Digest, Field, FieldValue, HashError, HashResult, MapEntry, MapKey, MapValue, Message,
    ObjectHasher, Syntax, Value,
};

/// Hash a dynamic message under the given hasher.
pub fn hash_dynamic(hasher: &ObjectHasher, message: &DynamicMessage) -> HashResult<Digest> {
    hasher.hash_message(&from_dynamic(message)?)
}

/// Materialize the reflection tree for a dynamic message.
pub fn from_dynamic(message: &DynamicMessage) -> HashResult<Message> {
    let descriptor = message.descriptor();

    let syntax = match descriptor.parent_file().syntax() {
        ProstSyntax::Proto2 => Syntax::Proto2,
        ProstSyntax::Proto3 => Syntax::Proto3,
        other => {
            return Err(HashError::Reflection(format!(
                "unsupported syntax {other:?} in file declaring {}",
                descriptor.full_name()
            )))
        }
    };

    let mut fields = Vec::new();
    for field_descriptor in descriptor.fields() {
        if !message.has_field(&field_descriptor) {
            continue;
        }
        let value = message.get_field(&field_descriptor);
        fields.push(Field {
            number: field_descriptor.number(),
            name: field_descriptor.name().to_string(),
            oneof: field_descriptor.containing_oneof().is_some(),
            value: convert_field(&field_descriptor, value.as_ref())?,
        });
    }

    Ok(Message {
        type_name: descriptor.full_name().to_string(),
        syntax,
        fields,
    })
}

fn convert_field(
    field_descriptor: &FieldDescriptor,
    value: &prost_reflect::Value,
) -> HashResult<FieldValue> {
    if field_descriptor.is_map() {
        let entries = match value {
            prost_reflect::Value::Map(entries) => entries,
            other => return Err(shape_error(field_descriptor, other)),
        };
        let mut converted = Vec::with_capacity(entries.len());
        for (key, entry_value) in entries {
            converted.push(MapEntry {
                key: convert_map_key(key),
                value: convert_map_value(entry_value)?,
            });
        }
        return Ok(FieldValue::Map(converted));
    }

    if field_descriptor.is_list() {
        let items = match value {
            prost_reflect::Value::List(items) => items,
            other => return Err(shape_error(field_descriptor, other)),
        };
        if matches!(field_descriptor.kind(), Kind::Message(_)) {
            let mut messages = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    prost_reflect::Value::Message(m) => messages.push(from_dynamic(m)?),
                    other => return Err(shape_error(field_descriptor, other)),
                }
            }
            return Ok(FieldValue::MessageList(messages));
        }
        let mut scalars = Vec::with_capacity(items.len());
        for item in items {
            scalars.push(convert_scalar(item)?);
        }
        return Ok(FieldValue::ScalarList(scalars));
    }

    match value {
        prost_reflect::Value::Message(m) => Ok(FieldValue::Message(from_dynamic(m)?)),
        scalar => Ok(FieldValue::Scalar(convert_scalar(scalar)?)),
    }
}

fn convert_scalar(value: &prost_reflect::Value) -> HashResult<Value> {
    Ok(match value {
        prost_reflect::Value::Bool(v) => Value::Bool(*v),
        prost_reflect::Value::I32(v) => Value::Int(i64::from(*v)),
        prost_reflect::Value::I64(v) => Value::Int(*v),
        prost_reflect::Value::U32(v) => Value::Uint(u64::from(*v)),
        prost_reflect::Value::U64(v) => Value::Uint(*v),
        prost_reflect::Value::F32(v) => Value::Float(f64::from(*v)),
        prost_reflect::Value::F64(v) => Value::Float(*v),
        prost_reflect::Value::EnumNumber(v) => Value::Enum(*v),
        prost_reflect::Value::String(v) => Value::String(v.clone()),
        prost_reflect::Value::Bytes(v) => Value::Bytes(v.to_vec()),
        other => {
            return Err(HashError::Reflection(format!(
                "expected a scalar value, got {other:?}"
            )))
        }
    })
}

fn convert_map_key(key: &prost_reflect::MapKey) -> MapKey {
    match key {
        prost_reflect::MapKey::Bool(v) => MapKey::Bool(*v),
        prost_reflect::MapKey::I32(v) => MapKey::Int(i64::from(*v)),
        prost_reflect::MapKey::I64(v) => MapKey::Int(*v),
        prost_reflect::MapKey::U32(v) => MapKey::Uint(u64::from(*v)),
        prost_reflect::MapKey::U64(v) => MapKey::Uint(*v),
        prost_reflect::MapKey::String(v) => MapKey::String(v.clone()),
    }
}

fn convert_map_value(value: &prost_reflect::Value) -> HashResult<MapValue> {
    match value {
        prost_reflect::Value::Message(m) => Ok(MapValue::Message(from_dynamic(m)?)),
        scalar => Ok(MapValue::Scalar(convert_scalar(scalar)?)),
    }
}

fn shape_error(field_descriptor: &FieldDescriptor, value: &prost_reflect::Value) -> HashError {
    HashError::Reflection(format!(
        "field {} has unexpected shape {value:?}",
        field_descriptor.full_name()
    ))
}
