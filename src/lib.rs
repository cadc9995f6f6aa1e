pub mod error;
pub mod mutator;
pub mod output;
pub mod path;
pub mod shape;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{ApplyError, CompileError, Error};
pub use output::{to_json, to_json_pretty};
pub use path::{KeyPath, PathSegment, compile};
pub use shape::{FieldShape, RecordShape, Shape};
pub use value::{FixedArray, Mapping, Pointer, Record, Sequence, Value};

/// Compile `key` and overwrite the slot it addresses inside `root` with
/// `value`.
///
/// # Examples
///
/// ```
/// use overwrite::{Value, overwrite};
///
/// let mut root = Value::dynamic_object();
/// overwrite(&mut root, "a.b.c", "v").unwrap();
/// assert_eq!(root.to_string(), r#"{"a":{"b":{"c":"v"}}}"#);
/// ```
pub fn overwrite(root: &mut Value, key: &str, value: &str) -> Result<(), Error> {
    let path = compile(key)?;
    tracing::debug!(%path, value, "overwriting");
    mutator::apply(root, &path, value)?;
    Ok(())
}
