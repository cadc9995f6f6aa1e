//! Walks a value tree along a compiled key path and writes a scalar at the end.
//!
//! Missing structure is created on the way down:
//!
//! - absent pointers are allocated with the zero value of their target,
//! - growable sequences are extended up to the requested index,
//! - missing mapping keys are inserted,
//! - empty dynamic slots become whatever the next step needs: a mapping for a
//!   field, a sequence for an index, a string for the terminal write.
//!
//! Values bound to mapping keys are copied out, updated, and written back
//! under the same key once the rest of the walk has succeeded.

use tracing::trace;

use crate::{
    error::ApplyError,
    path::{KeyPath, PathSegment, render},
    shape::Shape,
    value::{FixedArray, Mapping, Pointer, Record, Sequence, Value},
};

/// Overwrite the slot addressed by `path` inside `root` with `value`, coerced
/// to the slot's declared type.
///
/// The root's own declared type is taken to be its current shape. There is no
/// rollback: on failure, containers above the failing step may already have
/// been created or grown, but a mapping value is only replaced once everything
/// below it succeeded.
///
/// # Examples
///
/// ```
/// use overwrite::{Value, compile, mutator::apply};
///
/// let mut root = Value::dynamic_object();
/// let path = compile("a.b[1]").unwrap();
/// apply(&mut root, &path, "v").unwrap();
///
/// assert_eq!(root.to_string(), r#"{"a":{"b":[null,"v"]}}"#);
/// ```
pub fn apply(root: &mut Value, path: &KeyPath, value: &str) -> Result<(), ApplyError> {
    let declared = root.shape();
    Mutator {
        segments: path.segments(),
        raw: value,
    }
    .apply(root, &declared, 0)
}

/// Largest length a growable sequence may be extended to by a single write.
pub const MAX_SEQUENCE_LEN: usize = 1 << 20;

struct Mutator<'a> {
    segments: &'a [PathSegment],
    raw: &'a str,
}

impl Mutator<'_> {
    /// Apply the steps from `pos` onwards to `slot`, whose declared type is
    /// `declared`.
    fn apply(&self, slot: &mut Value, declared: &Shape, pos: usize) -> Result<(), ApplyError> {
        if let Shape::Pointer(target) = declared {
            if !matches!(slot, Value::Pointer(_)) {
                *slot = Value::Pointer(Pointer::null((**target).clone()));
            }
            if let Value::Pointer(pointer) = slot {
                return self.apply(pointer.get_or_alloc(), target, pos);
            }
        }

        let Some(segment) = self.segments.get(pos) else {
            return self.assign(slot, declared);
        };

        if declared.is_any() {
            if slot.is_null() {
                trace!(path = %self.rendered(pos), "inferring container for empty slot");
                *slot = empty_container_for(segment);
            }
            if let Value::Pointer(pointer) = slot {
                let target = pointer.target.clone();
                return self.apply(pointer.get_or_alloc(), &target, pos);
            }
        } else if slot.is_null() {
            *slot = declared.zero();
        }

        match segment {
            PathSegment::Field(name) => self.apply_field(slot, name, pos),
            PathSegment::Index(index) => self.apply_index(slot, *index, pos),
        }
    }

    /// Terminal step: coerce the raw string into the slot's type.
    fn assign(&self, slot: &mut Value, declared: &Shape) -> Result<(), ApplyError> {
        let raw = self.raw;
        *slot = match declared {
            Shape::Any | Shape::String => Value::String(raw.to_string()),
            Shape::Integer => Value::Integer(
                raw.parse::<i64>()
                    .map_err(|_| self.parse_error("integer"))?,
            ),
            Shape::Float => Value::Float(
                raw.parse::<f64>()
                    .map_err(|_| self.parse_error("float"))?,
            ),
            Shape::Boolean => {
                Value::Boolean(parse_bool(raw).ok_or_else(|| self.parse_error("boolean"))?)
            }
            other => {
                return Err(ApplyError::UnsupportedTarget {
                    path: self.rendered(self.segments.len()),
                    found: other.to_string(),
                });
            }
        };
        Ok(())
    }

    fn apply_field(&self, slot: &mut Value, name: &str, pos: usize) -> Result<(), ApplyError> {
        match slot {
            Value::Object(map) => self.apply_to_object(map, name, pos),
            Value::Record(record) => self.apply_to_record(record, name, pos),
            other => Err(ApplyError::TypeMismatch {
                path: self.rendered(pos + 1),
                expected: "object or record",
                found: other.type_name(),
            }),
        }
    }

    fn apply_to_object(&self, map: &mut Mapping, name: &str, pos: usize) -> Result<(), ApplyError> {
        if let Some(key) = map.find_key(name).map(str::to_owned) {
            let bound = &map.entries[&key];
            // A dynamic mapping continues with the concrete type of what it holds.
            let declared = if map.elem.is_any() {
                bound.shape()
            } else {
                map.elem.clone()
            };
            let mut copy = bound.clone();
            self.apply(&mut copy, &declared, pos + 1)?;
            map.entries.insert(key, copy);
            return Ok(());
        }

        trace!(path = %self.rendered(pos + 1), "inserting new key");
        let mut fresh = map.elem.zero();
        self.apply(&mut fresh, &map.elem, pos + 1)?;
        map.entries.insert(name.to_string(), fresh);
        Ok(())
    }

    fn apply_to_record(&self, record: &mut Record, name: &str, pos: usize) -> Result<(), ApplyError> {
        let Record { shape, values } = record;
        let Some(index) = shape.find(name) else {
            return Err(ApplyError::NoSuchField {
                path: self.rendered(pos + 1),
                field: name.to_string(),
                type_name: shape.name().to_string(),
            });
        };
        self.apply(&mut values[index], &shape.fields()[index].shape, pos + 1)
    }

    fn apply_index(&self, slot: &mut Value, index: usize, pos: usize) -> Result<(), ApplyError> {
        match slot {
            Value::Array(seq) => {
                if index >= seq.items.len() {
                    let len = index
                        .checked_add(1)
                        .filter(|len| *len <= MAX_SEQUENCE_LEN)
                        .ok_or_else(|| ApplyError::GrowthLimit {
                            path: self.rendered(pos + 1),
                            index,
                            limit: MAX_SEQUENCE_LEN,
                        })?;
                    trace!(path = %self.rendered(pos + 1), from = seq.items.len(), to = len, "growing sequence");
                    seq.grow_to(len);
                }
                let Sequence { elem, items } = seq;
                self.apply(&mut items[index], elem, pos + 1)
            }
            Value::FixedArray(arr) => {
                let FixedArray { elem, items } = arr;
                let len = items.len();
                let Some(item) = items.get_mut(index) else {
                    return Err(ApplyError::IndexOutOfRange {
                        path: self.rendered(pos + 1),
                        index,
                        len,
                    });
                };
                self.apply(item, elem, pos + 1)
            }
            other => Err(ApplyError::TypeMismatch {
                path: self.rendered(pos + 1),
                expected: "array",
                found: other.type_name(),
            }),
        }
    }

    fn rendered(&self, upto: usize) -> String {
        render(&self.segments[..upto])
    }

    fn parse_error(&self, expected: &'static str) -> ApplyError {
        ApplyError::Parse {
            path: self.rendered(self.segments.len()),
            value: self.raw.to_string(),
            expected,
        }
    }
}

/// The container an empty dynamic slot turns into when `segment` is applied
/// to it.
fn empty_container_for(segment: &PathSegment) -> Value {
    match segment {
        PathSegment::Field(_) => Value::dynamic_object(),
        PathSegment::Index(_) => Value::Array(Sequence::new(Shape::Any)),
    }
}

/// Boolean literals accepted for boolean slots.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
