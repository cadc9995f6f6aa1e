use std::{fmt, sync::Arc};

use crate::value::{FixedArray, Mapping, Pointer, Record, Sequence, Value};

/// The declared type of a slot in a value tree.
///
/// A `Value` says what a slot currently holds; a `Shape` says what it is
/// allowed to hold. The two differ for [`Shape::Any`] slots, which accept any
/// value, and for [`Shape::Pointer`] slots, which may be absent.
///
/// # Examples
///
/// ```
/// use overwrite::{RecordShape, Shape, Value};
///
/// let person = RecordShape::new("Person")
///     .field("Name", Shape::String)
///     .field("Tags", Shape::array(Shape::String))
///     .build();
///
/// let zero = Shape::Record(person).zero();
/// assert!(matches!(zero, Value::Record(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A dynamic slot: any value, including nothing at all
    Any,

    Boolean,

    /// Signed 64-bit integer
    Integer,

    /// 64-bit floating point
    Float,

    String,

    /// Growable sequence of `elem`
    Array(Box<Shape>),

    /// Fixed-length array of `elem`
    FixedArray(Box<Shape>, usize),

    /// String-keyed mapping with values of `elem`
    Object(Box<Shape>),

    /// Fixed-schema record
    Record(Arc<RecordShape>),

    /// Optional indirection to `target`, allocated on first write
    Pointer(Box<Shape>),
}

impl Shape {
    pub fn array(elem: Shape) -> Self {
        Shape::Array(Box::new(elem))
    }

    pub fn fixed_array(elem: Shape, len: usize) -> Self {
        Shape::FixedArray(Box::new(elem), len)
    }

    pub fn object(elem: Shape) -> Self {
        Shape::Object(Box::new(elem))
    }

    pub fn pointer(target: Shape) -> Self {
        Shape::Pointer(Box::new(target))
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Shape::Any)
    }

    /// Build the zero value of this shape.
    ///
    /// `Any` slots start out as [`Value::Null`]; every other shape gets an
    /// empty or zeroed value of its own kind.
    pub fn zero(&self) -> Value {
        match self {
            Shape::Any => Value::Null,
            Shape::Boolean => Value::Boolean(false),
            Shape::Integer => Value::Integer(0),
            Shape::Float => Value::Float(0.0),
            Shape::String => Value::String(String::new()),
            Shape::Array(elem) => Value::Array(Sequence::new((**elem).clone())),
            Shape::FixedArray(elem, len) => {
                Value::FixedArray(FixedArray::zeroed((**elem).clone(), *len))
            }
            Shape::Object(elem) => Value::Object(Mapping::new((**elem).clone())),
            Shape::Record(record) => Value::Record(Record::zeroed(record.clone())),
            Shape::Pointer(target) => Value::Pointer(Pointer::null((**target).clone())),
        }
    }

    /// Short human-readable name of the kind of slot, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Any => "any",
            Shape::Boolean => "boolean",
            Shape::Integer => "integer",
            Shape::Float => "float",
            Shape::String => "string",
            Shape::Array(_) => "array",
            Shape::FixedArray(..) => "fixed array",
            Shape::Object(_) => "object",
            Shape::Record(_) => "record",
            Shape::Pointer(_) => "pointer",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Array(elem) => write!(f, "[]{}", elem),
            Shape::FixedArray(elem, len) => write!(f, "[{}]{}", len, elem),
            Shape::Object(elem) => write!(f, "map[string]{}", elem),
            Shape::Record(record) => write!(f, "{}", record.name),
            Shape::Pointer(target) => write!(f, "*{}", target),
            other => write!(f, "{}", other.kind_name()),
        }
    }
}

/// A named member of a [`RecordShape`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    pub name: String,
    pub shape: Shape,
}

/// The schema of a fixed-schema record: a type name and its members in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    name: String,
    fields: Vec<FieldShape>,
}

impl RecordShape {
    /// Start describing a record type. Finish with [`RecordShapeBuilder::build`].
    pub fn new(name: impl Into<String>) -> RecordShapeBuilder {
        RecordShapeBuilder {
            shape: RecordShape {
                name: name.into(),
                fields: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }

    /// Exact (case-sensitive) position of a member.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Case-insensitive position of a member; the first declared match wins.
    pub fn find(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.fields
            .iter()
            .position(|f| f.name.to_lowercase() == wanted)
    }
}

pub struct RecordShapeBuilder {
    shape: RecordShape,
}

impl RecordShapeBuilder {
    pub fn field(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.shape.fields.push(FieldShape {
            name: name.into(),
            shape,
        });
        self
    }

    pub fn build(self) -> Arc<RecordShape> {
        Arc::new(self.shape)
    }
}
