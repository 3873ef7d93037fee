//! Display helpers for user provided values and type names.

use std::{any, fmt};

/// Displays `null` for `None`, and the value itself otherwise.
///
/// ```
/// use diagtree::value::DisplayNullable;
///
/// assert_eq!(DisplayNullable(Some(42)).to_string(), "42");
/// assert_eq!(DisplayNullable(None::<i32>).to_string(), "null");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DisplayNullable<T>(pub Option<T>);

impl<T: fmt::Display> fmt::Display for DisplayNullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("null"),
        }
    }
}

/// Displays a sequence of values as `[a, b, c]`.
///
/// ```
/// use diagtree::value::DisplayValues;
///
/// assert_eq!(DisplayValues::new(&[1, 2]).to_string(), "[1, 2]");
/// assert_eq!(DisplayValues::new(Vec::<u8>::new()).to_string(), "[]");
/// ```
#[derive(Debug, Clone)]
pub struct DisplayValues<I> {
    /// Values.
    values: I,
}

impl<I> DisplayValues<I>
where
    I: IntoIterator + Clone,
    I::Item: fmt::Display,
{
    /// Creates a new `DisplayValues`.
    pub fn new(values: I) -> Self {
        Self { values }
    }
}

impl<I> fmt::Display for DisplayValues<I>
where
    I: IntoIterator + Clone,
    I::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.values.clone().into_iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

/// Returns the string with its first character in upper case.
///
/// ```
/// use diagtree::value::capitalize;
///
/// assert_eq!(capitalize("configuration"), "Configuration");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns a human readable label for the type: its full path, capitalized.
///
/// ```
/// use diagtree::value::type_label;
///
/// assert_eq!(type_label::<u32>(), "U32");
/// assert_eq!(type_label::<str>(), "Str");
/// ```
pub fn type_label<T: ?Sized>() -> String {
    capitalize(any::type_name::<T>())
}
