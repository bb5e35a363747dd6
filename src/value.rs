//! The tagged-variant value tree.
//!
//! A [`Value`] is one node of the tree: a kind tag and at most one live
//! payload. Arrays and objects own their payloads directly, so dropping a
//! root value recursively releases every descendant and every owned key
//! copy — there is no manual payload bookkeeping.
//!
//! Typed accessors never coerce (except [`Value::as_number`], which accepts
//! either integer or float); using one against the wrong kind is a
//! [`TypeMismatch`](crate::Error::TypeMismatch) error. Indexing with
//! [`Value::at`] / [`Value::entry`] follows the get-or-insert-on-read
//! contract of the underlying containers: reading index 5 of an empty array
//! grows it, and reading a missing object key inserts an `Empty` entry.
//! [`Value::lookup`] and [`Value::contains`] are the read-only companions.

use crate::dict::Dict;
use crate::dynarray::DynArray;
use crate::error::Error;
use crate::ser::Serializer;
use std::any::Any;
use std::fmt;

/// The sequence type backing array-kind values.
pub type JsonArray = DynArray<Value>;
/// The map type backing object-kind values.
pub type JsonObject = Dict<Value>;

/// Lowest tag number available to custom-kind values.
pub const MIN_CUSTOM_TAG: u32 = 0x100;

/// The discriminator selecting which payload interpretation is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Empty,
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
    Custom,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Empty => "empty",
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// An opaque caller-defined payload with a tag of at least
/// [`MIN_CUSTOM_TAG`].
///
/// The default serializer cannot render these; register a per-tag callback
/// on [`Serializer`](crate::Serializer) to make them printable.
pub struct Custom {
    /// Caller-defined tag, `>= 0x100`.
    pub tag: u32,
    /// The opaque payload.
    pub data: Box<dyn Any>,
}

impl Custom {
    /// Wrap `data` under `tag`. The tag must be at least `0x100`.
    pub fn new(tag: u32, data: impl Any) -> Self {
        debug_assert!(tag >= MIN_CUSTOM_TAG);
        Custom {
            tag,
            data: Box::new(data),
        }
    }

    /// Borrow the payload as a concrete type.
    pub fn downcast_ref<U: Any>(&self) -> Option<&U> {
        self.data.downcast_ref()
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").field("tag", &self.tag).finish()
    }
}

/// One node of the value tree.
///
/// Created as `Empty`; each setter replaces the kind and drops the previous
/// payload. A value exclusively owns its string/array/object payload — the
/// tree is a strict tree, never a graph.
#[derive(Debug, Default)]
pub enum Value {
    /// Freshly constructed, no payload yet.
    #[default]
    Empty,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(JsonArray),
    Object(JsonObject),
    Custom(Custom),
}

impl Value {
    /// The active kind tag.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Empty => Kind::Empty,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Int(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Custom(_) => Kind::Custom,
        }
    }

    fn mismatch(&self, expected: Kind) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// True for the `Null` kind.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for the `Empty` kind.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    // --- Typed Accessors ---

    pub fn as_bool(&self) -> Result<bool, Error> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch(Kind::Boolean)),
        }
    }

    pub fn as_int(&self) -> Result<i64, Error> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(other.mismatch(Kind::Integer)),
        }
    }

    pub fn as_float(&self) -> Result<f64, Error> {
        match self {
            Value::Float(f) => Ok(*f),
            other => Err(other.mismatch(Kind::Float)),
        }
    }

    /// The one coercing accessor: integers and floats both read as `f64`.
    pub fn as_number(&self) -> Result<f64, Error> {
        match self {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            other => Err(other.mismatch(Kind::Float)),
        }
    }

    pub fn as_str(&self) -> Result<&str, Error> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(other.mismatch(Kind::String)),
        }
    }

    pub fn as_array(&self) -> Result<&JsonArray, Error> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch(Kind::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut JsonArray, Error> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch(Kind::Array)),
        }
    }

    pub fn as_object(&self) -> Result<&JsonObject, Error> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.mismatch(Kind::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut JsonObject, Error> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.mismatch(Kind::Object)),
        }
    }

    pub fn as_custom(&self) -> Result<&Custom, Error> {
        match self {
            Value::Custom(c) => Ok(c),
            other => Err(other.mismatch(Kind::Custom)),
        }
    }

    pub fn as_custom_mut(&mut self) -> Result<&mut Custom, Error> {
        match self {
            Value::Custom(c) => Ok(c),
            other => Err(other.mismatch(Kind::Custom)),
        }
    }

    /// Length of an array-kind value.
    pub fn array_len(&self) -> Result<usize, Error> {
        self.as_array().map(DynArray::len)
    }

    /// Length of an object-kind value.
    pub fn object_len(&self) -> Result<usize, Error> {
        self.as_object().map(Dict::len)
    }

    // --- Setters ---
    // Each replaces the kind and drops whatever payload was stored before.

    pub fn set_null(&mut self) {
        *self = Value::Null;
    }

    pub fn set_bool(&mut self, b: bool) {
        *self = Value::Bool(b);
    }

    pub fn set_int(&mut self, i: i64) {
        *self = Value::Int(i);
    }

    pub fn set_float(&mut self, f: f64) {
        *self = Value::Float(f);
    }

    pub fn set_string(&mut self, s: impl Into<String>) {
        *self = Value::Str(s.into());
    }

    pub fn set_array(&mut self, a: JsonArray) {
        *self = Value::Array(a);
    }

    pub fn set_object(&mut self, o: JsonObject) {
        *self = Value::Object(o);
    }

    /// Store an opaque payload under a caller-defined tag (`>= 0x100`).
    pub fn set_custom(&mut self, tag: u32, data: impl Any) {
        *self = Value::Custom(Custom::new(tag, data));
    }

    // --- Indexing ---

    /// Index an array-kind value by position.
    ///
    /// Delegates to [`DynArray::get_or_extend`]: reading index 5 of an empty
    /// array grows it to length 6, with `Empty` values in the new slots.
    /// `WrongKind` on anything that is not an array.
    pub fn at(&mut self, i: usize) -> Result<&mut Value, Error> {
        match self {
            Value::Array(a) => Ok(a.get_or_extend(i)),
            other => Err(Error::WrongKind {
                found: other.kind(),
                wanted: Kind::Array,
            }),
        }
    }

    /// Index an object-kind value by key.
    ///
    /// Delegates to [`Dict::entry`]: reading a missing key inserts an
    /// `Empty` entry as a side effect. `WrongKind` on anything that is not
    /// an object. Use [`Value::lookup`] for a read-only probe.
    pub fn entry(&mut self, key: &str) -> Result<&mut Value, Error> {
        match self {
            Value::Object(o) => Ok(o.entry(key)),
            other => Err(Error::WrongKind {
                found: other.kind(),
                wanted: Kind::Object,
            }),
        }
    }

    /// Read-only key lookup. `None` for a missing key or a non-object.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(o) => o.get(key),
            _ => None,
        }
    }

    /// Read-only existence check; `false` on non-objects.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Value::Object(o) => o.contains_key(key),
            _ => false,
        }
    }

    /// The i-th key of an object-kind value, in the map's bucket-grouped
    /// enumeration order.
    pub fn key_at(&self, i: usize) -> Result<&str, Error> {
        let o = self.as_object()?;
        o.key_at(i).ok_or(Error::OutOfRange { index: i, len: o.len() })
    }

    /// The i-th value of an object-kind value, in the map's bucket-grouped
    /// enumeration order.
    pub fn value_at(&self, i: usize) -> Result<&Value, Error> {
        let o = self.as_object()?;
        o.value_at(i).ok_or(Error::OutOfRange { index: i, len: o.len() })
    }

    /// Render this value as text with a default (renderer-less)
    /// [`Serializer`].
    pub fn serialize(&self) -> Result<String, Error> {
        Serializer::new().serialize(self)
    }
}

/// Structural equality. Two `Custom` values compare equal only when they
/// share the same tag and the same payload allocation, which distinct trees
/// never do.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Empty, Value::Empty) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => {
                a.tag == b.tag
                    && std::ptr::eq(
                        &*a.data as *const dyn Any as *const u8,
                        &*b.data as *const dyn Any as *const u8,
                    )
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<JsonArray> for Value {
    fn from(a: JsonArray) -> Self {
        Value::Array(a)
    }
}

impl From<JsonObject> for Value {
    fn from(o: JsonObject) -> Self {
        Value::Object(o)
    }
}
