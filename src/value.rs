use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::shape::{RecordShape, Shape};

/// A node in a value tree that can be overwritten by key paths.
///
/// Scalars describe themselves. Containers carry their declared element or
/// member shapes, so a container sitting in a dynamic slot still knows what
/// it may hold.
///
/// # Examples
///
/// ```
/// use overwrite::{Mapping, Shape, Value};
///
/// // A fully dynamic document: {"name": "Alice", "tags": ["a", "b"]}
/// let mut doc = Mapping::new(Shape::Any);
/// doc.insert("name", Value::from("Alice"));
/// doc.insert(
///     "tags",
///     Value::dynamic_array(vec![Value::from("a"), Value::from("b")]),
/// );
/// let root = Value::Object(doc);
///
/// assert_eq!(root.to_string(), r#"{"name":"Alice","tags":["a","b"]}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An empty dynamic slot
    Null,

    Boolean(bool),

    Float(f64),

    Integer(i64),

    String(String),

    /// Growable sequence
    Array(Sequence),

    /// Fixed-length array
    FixedArray(FixedArray),

    /// String-keyed mapping
    Object(Mapping),

    /// Fixed-schema record
    Record(Record),

    /// Optional indirection
    Pointer(Pointer),
}

impl Value {
    /// An empty mapping whose values may be anything.
    pub fn dynamic_object() -> Self {
        Value::Object(Mapping::new(Shape::Any))
    }

    /// A growable sequence whose elements may be anything.
    pub fn dynamic_array(items: Vec<Value>) -> Self {
        Value::Array(Sequence::from_values(Shape::Any, items))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The concrete shape of what this value currently holds.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Null => Shape::Any,
            Value::Boolean(_) => Shape::Boolean,
            Value::Float(_) => Shape::Float,
            Value::Integer(_) => Shape::Integer,
            Value::String(_) => Shape::String,
            Value::Array(seq) => Shape::array(seq.elem.clone()),
            Value::FixedArray(arr) => Shape::fixed_array(arr.elem.clone(), arr.items.len()),
            Value::Object(map) => Shape::object(map.elem.clone()),
            Value::Record(record) => Shape::Record(record.shape.clone()),
            Value::Pointer(pointer) => Shape::pointer(pointer.target.clone()),
        }
    }

    /// Returns a human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Float(_) => "float",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::FixedArray(_) => "fixed array",
            Value::Object(_) => "object",
            Value::Record(_) => "record",
            Value::Pointer(_) => "pointer",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Mapping> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Object(map)
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Array(seq)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::output::to_json(self))
    }
}

/// An ordered, growable sequence of `elem`-shaped values.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub(crate) elem: Shape,
    pub(crate) items: Vec<Value>,
}

impl Sequence {
    pub fn new(elem: Shape) -> Self {
        Sequence {
            elem,
            items: Vec::new(),
        }
    }

    pub fn from_values(elem: Shape, items: Vec<Value>) -> Self {
        Sequence { elem, items }
    }

    pub fn elem(&self) -> &Shape {
        &self.elem
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Extend with zero values of the element shape until `len` slots exist.
    /// Never shrinks.
    pub fn grow_to(&mut self, len: usize) {
        while self.items.len() < len {
            self.items.push(self.elem.zero());
        }
    }
}

/// A fixed-length array of `elem`-shaped values.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedArray {
    pub(crate) elem: Shape,
    pub(crate) items: Box<[Value]>,
}

impl FixedArray {
    pub fn zeroed(elem: Shape, len: usize) -> Self {
        let items = (0..len).map(|_| elem.zero()).collect();
        FixedArray { elem, items }
    }

    pub fn from_values(elem: Shape, items: Vec<Value>) -> Self {
        FixedArray {
            elem,
            items: items.into_boxed_slice(),
        }
    }

    pub fn elem(&self) -> &Shape {
        &self.elem
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A string-keyed mapping with `elem`-shaped values.
///
/// Keys are stored exactly as given; lookups through [`Mapping::find_key`]
/// ignore case.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub(crate) elem: Shape,
    pub(crate) entries: BTreeMap<String, Value>,
}

impl Mapping {
    pub fn new(elem: Shape) -> Self {
        Mapping {
            elem,
            entries: BTreeMap::new(),
        }
    }

    pub fn elem(&self) -> &Shape {
        &self.elem
    }

    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stored key matching `name` case-insensitively, first in key order.
    pub fn find_key(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        self.entries
            .keys()
            .find(|k| k.to_lowercase() == wanted)
            .map(String::as_str)
    }
}

/// An instance of a fixed-schema record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub(crate) shape: Arc<RecordShape>,
    pub(crate) values: Vec<Value>,
}

impl Record {
    /// A record with every member set to its zero value.
    pub fn zeroed(shape: Arc<RecordShape>) -> Self {
        let values = shape.fields().iter().map(|f| f.shape.zero()).collect();
        Record { shape, values }
    }

    pub fn shape(&self) -> &Arc<RecordShape> {
        &self.shape
    }

    pub fn type_name(&self) -> &str {
        self.shape.name()
    }

    /// Member value by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.shape.position(name).map(|i| &self.values[i])
    }

    /// Mutable member value by exact name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.shape.position(name).map(|i| &mut self.values[i])
    }

    /// Builder-style member assignment, ignoring unknown names.
    pub fn with(mut self, name: &str, value: Value) -> Self {
        if let Some(slot) = self.get_mut(name) {
            *slot = value;
        }
        self
    }

    /// Members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.shape
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .zip(self.values.iter())
    }
}

/// An optional indirection to a `target`-shaped value.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointer {
    pub(crate) target: Shape,
    pub(crate) value: Option<Box<Value>>,
}

impl Pointer {
    /// An absent indirection.
    pub fn null(target: Shape) -> Self {
        Pointer {
            target,
            value: None,
        }
    }

    pub fn to(target: Shape, value: Value) -> Self {
        Pointer {
            target,
            value: Some(Box::new(value)),
        }
    }

    pub fn target(&self) -> &Shape {
        &self.target
    }

    pub fn get(&self) -> Option<&Value> {
        self.value.as_deref()
    }

    /// The pointee, allocating a zero value of the target shape if absent.
    pub fn get_or_alloc(&mut self) -> &mut Value {
        if self.value.is_none() {
            tracing::trace!(target_shape = %self.target, "allocating pointer target");
        }
        let target = &self.target;
        self.value.get_or_insert_with(|| Box::new(target.zero()))
    }
}
