//! Message tree type definitions

use serde::{Deserialize, Serialize};

/// Protobuf syntax flavor of the file declaring a message.
///
/// The flavor decides whether a scalar field set to its zero value is
/// distinguishable from an unset field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    Proto2,
    Proto3,
}

/// A scalar leaf in the reflection tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Explicit nil, for loose-leaf hashing. A materialized protobuf field
    /// never carries it.
    Nil,
    Bool(bool),
    /// Any signed integer width (int32, int64, sint*, sfixed*).
    Int(i64),
    /// Any unsigned integer width (uint32, uint64, fixed*).
    Uint(u64),
    /// A float64, or a float32 widened exactly.
    Float(f64),
    /// An enum number.
    Enum(i32),
    String(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Whether this is the zero value for the scalar's type, the value
    /// proto3 cannot distinguish from unset.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(v) => !*v,
            Value::Int(v) => *v == 0,
            Value::Uint(v) => *v == 0,
            Value::Float(v) => *v == 0.0,
            Value::Enum(v) => *v == 0,
            Value::String(v) => v.is_empty(),
            Value::Bytes(v) => v.is_empty(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

/// Key of a map entry. Protobuf restricts map keys to bool, integer, and
/// string types; floats and bytes are never keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Uint(u64),
    String(String),
}

impl From<bool> for MapKey {
    fn from(v: bool) -> Self {
        MapKey::Bool(v)
    }
}

impl From<i64> for MapKey {
    fn from(v: i64) -> Self {
        MapKey::Int(v)
    }
}

impl From<u64> for MapKey {
    fn from(v: u64) -> Self {
        MapKey::Uint(v)
    }
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        MapKey::String(v.to_string())
    }
}

/// Value of a map entry: a scalar or a nested message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapValue {
    Scalar(Value),
    Message(Message),
}

impl From<Value> for MapValue {
    fn from(v: Value) -> Self {
        MapValue::Scalar(v)
    }
}

impl From<Message> for MapValue {
    fn from(v: Message) -> Self {
        MapValue::Message(v)
    }
}

impl From<bool> for MapValue {
    fn from(v: bool) -> Self {
        MapValue::Scalar(Value::Bool(v))
    }
}

impl From<i64> for MapValue {
    fn from(v: i64) -> Self {
        MapValue::Scalar(Value::Int(v))
    }
}

impl From<u64> for MapValue {
    fn from(v: u64) -> Self {
        MapValue::Scalar(Value::Uint(v))
    }
}

impl From<f64> for MapValue {
    fn from(v: f64) -> Self {
        MapValue::Scalar(Value::Float(v))
    }
}

impl From<&str> for MapValue {
    fn from(v: &str) -> Self {
        MapValue::Scalar(Value::String(v.to_string()))
    }
}

impl From<String> for MapValue {
    fn from(v: String) -> Self {
        MapValue::Scalar(Value::String(v))
    }
}

/// One entry of a map field. Entry order in the containing list is
/// irrelevant to the hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: MapKey,
    pub value: MapValue,
}

/// The payload of a set field, one variant per field kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Scalar(Value),
    Message(Message),
    /// A repeated scalar field. Element order is significant.
    ScalarList(Vec<Value>),
    /// A repeated message field. Element order is significant.
    MessageList(Vec<Message>),
    Map(Vec<MapEntry>),
}

/// One set field of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field number, unique within the message.
    pub number: u32,
    /// Field name, unique within the message.
    pub name: String,
    /// Whether the field is a member of a oneof. Set oneof members have
    /// explicit presence in both syntax flavors, so their zero values are
    /// hashed even under proto3.
    pub oneof: bool,
    pub value: FieldValue,
}

/// A materialized reflection view of one message: its fully-qualified type
/// name, syntax flavor, and the fields the producer reports as set.
///
/// The tree is a read-only input to the hasher. Producers decide set-ness:
/// under proto2 an explicitly assigned default value is set, under proto3
/// assignment of a zero value is indistinguishable from unset and the
/// hasher treats it accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Fully-qualified type name, e.g. `google.protobuf.Timestamp`.
    pub type_name: String,
    pub syntax: Syntax,
    pub fields: Vec<Field>,
}

/// Builder for message trees
#[derive(Debug)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn new(syntax: Syntax, type_name: impl Into<String>) -> Self {
        Self {
            message: Message {
                type_name: type_name.into(),
                syntax,
                fields: Vec::new(),
            },
        }
    }

    pub fn proto2(type_name: impl Into<String>) -> Self {
        Self::new(Syntax::Proto2, type_name)
    }

    pub fn proto3(type_name: impl Into<String>) -> Self {
        Self::new(Syntax::Proto3, type_name)
    }

    /// Append a set field with an arbitrary payload.
    pub fn field(mut self, number: u32, name: impl Into<String>, value: FieldValue) -> Self {
        self.message.fields.push(Field {
            number,
            name: name.into(),
            oneof: false,
            value,
        });
        self
    }

    /// Append the set member of a oneof.
    pub fn oneof_field(mut self, number: u32, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.message.fields.push(Field {
            number,
            name: name.into(),
            oneof: true,
            value: FieldValue::Scalar(value.into()),
        });
        self
    }

    pub fn bool(self, number: u32, name: impl Into<String>, value: bool) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::Bool(value)))
    }

    pub fn int32(self, number: u32, name: impl Into<String>, value: i32) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::Int(i64::from(value))))
    }

    pub fn int64(self, number: u32, name: impl Into<String>, value: i64) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::Int(value)))
    }

    pub fn uint32(self, number: u32, name: impl Into<String>, value: u32) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::Uint(u64::from(value))))
    }

    pub fn uint64(self, number: u32, name: impl Into<String>, value: u64) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::Uint(value)))
    }

    /// A float32 value, widened exactly.
    pub fn float(self, number: u32, name: impl Into<String>, value: f32) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::Float(f64::from(value))))
    }

    pub fn double(self, number: u32, name: impl Into<String>, value: f64) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::Float(value)))
    }

    pub fn enum_number(self, number: u32, name: impl Into<String>, value: i32) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::Enum(value)))
    }

    pub fn string(self, number: u32, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::String(value.into())))
    }

    pub fn bytes(self, number: u32, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.field(number, name, FieldValue::Scalar(Value::Bytes(value.into())))
    }

    pub fn message(self, number: u32, name: impl Into<String>, value: Message) -> Self {
        self.field(number, name, FieldValue::Message(value))
    }

    pub fn scalar_list(
        self,
        number: u32,
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.field(number, name, FieldValue::ScalarList(values))
    }

    pub fn message_list(
        self,
        number: u32,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Message>,
    ) -> Self {
        self.field(number, name, FieldValue::MessageList(values.into_iter().collect()))
    }

    pub fn map(
        self,
        number: u32,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (impl Into<MapKey>, impl Into<MapValue>)>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, value)| MapEntry {
                key: key.into(),
                value: value.into(),
            })
            .collect();
        self.field(number, name, FieldValue::Map(entries))
    }

    pub fn build(self) -> Message {
        self.message
    }
}
