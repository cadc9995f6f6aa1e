use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::error::CompileError;

/// A single step of a compiled key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named member of a record or key of a mapping
    ///
    /// # Examples
    /// - `name` → `Field("name")`
    /// - `user.email` → `[Field("user"), Field("email")]`
    Field(String),

    /// Position in a sequence or fixed-length array
    ///
    /// # Examples
    /// - `[0]` → `Index(0)`
    /// - `items[2].price` → `[Field("items"), Index(2), Field("price")]`
    Index(usize),
}

/// A compiled key path: the ordered steps leading from a root value to the
/// slot being overwritten. The end of the path is the terminal step, where
/// the new value is written.
///
/// # Examples
///
/// ```
/// use overwrite::{KeyPath, PathSegment};
///
/// let path: KeyPath = "x[2].y".parse().unwrap();
/// assert_eq!(
///     path.segments(),
///     &[
///         PathSegment::Field("x".into()),
///         PathSegment::Index(2),
///         PathSegment::Field("y".into()),
///     ]
/// );
/// assert_eq!(path.to_string(), "x[2].y");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<PathSegment>,
}

impl KeyPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for KeyPath {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.segments))
    }
}

// A segment followed by an optional remainder that must start with '.' or '['.
static FIELD_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.?([a-zA-Z][a-zA-Z0-9]*)((?:\.|\[).+)?$").expect("field key pattern")
});
static INDEX_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([0-9]+)\]((?:\.|\[).+)?$").expect("index key pattern")
});

/// Compile a key path such as `"x"`, `"x.y[2].z"` or `"[2]"`.
///
/// A field name starts with an ASCII letter followed by letters or digits and
/// may be preceded by a `.`; an index is a non-negative decimal number in
/// brackets. On failure nothing is returned but the error, which quotes the
/// part of the input that could not be translated.
pub fn compile(path: &str) -> Result<KeyPath, CompileError> {
    let mut segments = Vec::new();
    let mut rest = path;

    loop {
        let (segment, remainder) = next_segment(rest)?;
        segments.push(segment);
        match remainder {
            Some(remainder) => rest = remainder,
            None => break,
        }
    }

    Ok(KeyPath { segments })
}

fn next_segment(input: &str) -> Result<(PathSegment, Option<&str>), CompileError> {
    if let Some(caps) = FIELD_KEY.captures(input) {
        let name = caps[1].to_string();
        return Ok((PathSegment::Field(name), caps.get(2).map(|m| m.as_str())));
    }

    if let Some(caps) = INDEX_KEY.captures(input) {
        let digits = &caps[1];
        let index = digits
            .parse::<usize>()
            .map_err(|_| CompileError::IndexTooLarge {
                remainder: input.to_string(),
                digits: digits.to_string(),
            })?;
        return Ok((PathSegment::Index(index), caps.get(2).map(|m| m.as_str())));
    }

    Err(CompileError::InvalidKey {
        remainder: input.to_string(),
    })
}

/// Render segments back to key path syntax. Fields after the first segment
/// are introduced with `.`; indices follow their predecessor directly.
pub fn render(segments: &[PathSegment]) -> String {
    let mut s = String::new();
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            PathSegment::Field(name) => {
                if i > 0 {
                    s.push('.');
                }
                s.push_str(name);
            }
            PathSegment::Index(index) => {
                s.push('[');
                s.push_str(&index.to_string());
                s.push(']');
            }
        }
    }
    s
}
