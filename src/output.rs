//! JSON rendering of value trees.
//!
//! Output is deterministic: mapping keys come out sorted, record members in
//! declaration order. Absent pointers and empty dynamic slots render as
//! `null`; present pointers render as their target.
//!
//! # Examples
//!
//! ```
//! use overwrite::Value;
//! use overwrite::output::{to_json, to_json_pretty};
//!
//! let value = Value::Integer(42);
//!
//! assert_eq!(to_json(&value), "42");
//! assert_eq!(to_json_pretty(&value), "42");
//! ```

use crate::value::Value;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) if n.is_finite() => n.to_string(),
            // JSON has no representation for NaN or infinities
            Value::Float(_) => "null".to_string(),
            Value::String(s) => format!("\"{}\"", self.escape_string(s)),
            Value::Array(seq) => self.print_array(seq.items(), indent),
            Value::FixedArray(arr) => self.print_array(arr.items(), indent),
            Value::Object(map) => self.print_object(
                map.entries().iter().map(|(k, v)| (k.as_str(), v)),
                indent,
            ),
            Value::Record(record) => self.print_object(record.iter(), indent),
            Value::Pointer(pointer) => match pointer.get() {
                Some(target) => self.print_value(target, indent),
                None => "null".to_string(),
            },
        }
    }

    fn print_array(&self, arr: &[Value], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        if self.pretty {
            let items: Vec<String> = arr
                .iter()
                .map(|v| {
                    format!(
                        "{}{}",
                        self.indent(indent + 1),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            format!("[\n{}\n{}]", items.join(",\n"), self.indent(indent))
        } else {
            let items: Vec<String> = arr.iter().map(|v| self.print_value(v, indent)).collect();
            format!("[{}]", items.join(","))
        }
    }

    fn print_object<'a>(
        &self,
        members: impl Iterator<Item = (&'a str, &'a Value)>,
        indent: usize,
    ) -> String {
        let items: Vec<String> = if self.pretty {
            members
                .map(|(k, v)| {
                    format!(
                        "{}\"{}\": {}",
                        self.indent(indent + 1),
                        self.escape_string(k),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect()
        } else {
            members
                .map(|(k, v)| {
                    format!(
                        "\"{}\":{}",
                        self.escape_string(k),
                        self.print_value(v, indent)
                    )
                })
                .collect()
        };

        if items.is_empty() {
            "{}".to_string()
        } else if self.pretty {
            format!("{{\n{}\n{}}}", items.join(",\n"), self.indent(indent))
        } else {
            format!("{{{}}}", items.join(","))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c if c.is_control() => {
                    // Unicode escape for control chars
                    format!("\\u{:04x}", c as u32).chars().collect()
                }
                c => vec![c],
            })
            .collect()
    }
}

/// Converts a Value to compact JSON string representation.
///
/// # Examples
///
/// ```
/// use overwrite::{Mapping, Shape, Value};
/// use overwrite::output::to_json;
///
/// let mut obj = Mapping::new(Shape::Any);
/// obj.insert("name", Value::from("Alice"));
/// obj.insert("age", Value::Integer(30));
///
/// assert_eq!(to_json(&Value::Object(obj)), r#"{"age":30,"name":"Alice"}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a Value to pretty-printed JSON with 2-space indentation.
///
/// # Examples
///
/// ```
/// use overwrite::{Mapping, Shape, Value};
/// use overwrite::output::to_json_pretty;
///
/// let mut obj = Mapping::new(Shape::Any);
/// obj.insert("name", Value::from("Alice"));
/// obj.insert("age", Value::Integer(30));
///
/// assert_eq!(
///     to_json_pretty(&Value::Object(obj)),
///     "{\n  \"age\": 30,\n  \"name\": \"Alice\"\n}"
/// );
/// ```
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}
