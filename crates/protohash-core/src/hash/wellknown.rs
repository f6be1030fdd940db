//! Special-case hashing for the supported `google.protobuf` types.
//!
//! Well-known messages carry externally-defined semantics, so their
//! canonical forms differ from plain structural hashing. Only the types
//! whose rules are frozen are supported; everything else under the
//! `google.protobuf` package is rejected rather than silently hashed
//! structurally.

use crate::hash::basic::LIST_TAG;
use crate::hash::digest::Digest;
use crate::hash::error::{HashError, HashResult};
use crate::hash::object::ObjectHasher;
use crate::message::{FieldValue, Message, Value};

const WELL_KNOWN_PREFIX: &str = "google.protobuf.";

pub(crate) fn is_well_known(message: &Message) -> bool {
    message.type_name.starts_with(WELL_KNOWN_PREFIX)
}

pub(crate) fn hash_well_known(hasher: &ObjectHasher, message: &Message) -> HashResult<Digest> {
    let short_name = &message.type_name[WELL_KNOWN_PREFIX.len()..];
    match short_name {
        "Timestamp" => hash_timestamp(hasher, message),
        "Int32Value" | "Int64Value" | "UInt32Value" | "UInt64Value" | "FloatValue"
        | "DoubleValue" => hash_number_wrapper(hasher, message, short_name),
        _ => Err(HashError::UnsupportedWellKnownType(
            message.type_name.clone(),
        )),
    }
}

/// A timestamp hashes as the list of two integers: UTC seconds since epoch,
/// then nanoseconds.
///
/// The unset/zero distinction lives at the message level: an absent
/// timestamp is one whose field is unset in the parent, while a present
/// timestamp with unset inner fields reads as explicitly zero. This differs
/// from plain proto3 messages, where zero inner fields would read as unset.
fn hash_timestamp(hasher: &ObjectHasher, message: &Message) -> HashResult<Digest> {
    let seconds = int_component(message, 1, "seconds")?;
    let nanos = int_component(message, 2, "nanos")?;

    let basic = hasher.basic();
    let mut body = Vec::new();
    body.extend_from_slice(basic.hash_int64(seconds).as_bytes());
    body.extend_from_slice(basic.hash_int64(nanos).as_bytes());
    Ok(basic.hash(LIST_TAG, &body))
}

fn int_component(message: &Message, number: u32, name: &str) -> HashResult<i64> {
    let field = message
        .fields
        .iter()
        .find(|f| f.number == number || f.name == name);
    match field.map(|f| &f.value) {
        None => Ok(0),
        Some(FieldValue::Scalar(Value::Int(v))) => Ok(*v),
        Some(_) => Err(HashError::MalformedWellKnownType {
            type_name: message.type_name.clone(),
            reason: format!("expected integer '{name}' field"),
        }),
    }
}

/// A numeric wrapper hashes as the bare scalar digest of its `value` field.
///
/// As with timestamps, the unset/zero distinction lives at the message
/// level: a present wrapper with an unset inner field is an explicit zero
/// of the wrapper's numeric type.
fn hash_number_wrapper(
    hasher: &ObjectHasher,
    message: &Message,
    short_name: &str,
) -> HashResult<Digest> {
    let basic = hasher.basic();
    let field = message
        .fields
        .iter()
        .find(|f| f.number == 1 || f.name == "value");
    match field.map(|f| &f.value) {
        Some(FieldValue::Scalar(Value::Int(v))) => Ok(basic.hash_int64(*v)),
        Some(FieldValue::Scalar(Value::Uint(v))) => Ok(basic.hash_uint64(*v)),
        Some(FieldValue::Scalar(Value::Float(v))) => basic.hash_float(*v),
        None => match short_name {
            "Int32Value" | "Int64Value" => Ok(basic.hash_int64(0)),
            "UInt32Value" | "UInt64Value" => Ok(basic.hash_uint64(0)),
            // FloatValue | DoubleValue
            _ => basic.hash_float(0.0),
        },
        Some(_) => Err(HashError::MalformedWellKnownType {
            type_name: message.type_name.clone(),
            reason: "expected numeric 'value' field".to_string(),
        }),
    }
}
