//! Config types.

use std::fmt;

/// Line separator written between rendered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LineSeparator {
    /// `"\n"`.
    Lf,
    /// `"\r\n"`.
    CrLf,
}

impl LineSeparator {
    /// Returns the line separator of the target platform.
    ///
    /// ```
    /// use diagtree::LineSeparator;
    ///
    /// if cfg!(windows) {
    ///     assert_eq!(LineSeparator::native(), LineSeparator::CrLf);
    /// } else {
    ///     assert_eq!(LineSeparator::native(), LineSeparator::Lf);
    /// }
    /// ```
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    /// Returns the separator as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Writes the separator.
    pub(crate) fn write_to<W: fmt::Write>(self, writer: &mut W) -> fmt::Result {
        writer.write_str(self.as_str())
    }
}

impl Default for LineSeparator {
    fn default() -> Self {
        Self::Lf
    }
}

impl fmt::Display for LineSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `FormatterConfig` builder.
#[derive(Default, Debug, Clone, Copy)]
pub struct FormatterConfigBuilder {
    /// Current config.
    config: FormatterConfig,
}

impl FormatterConfigBuilder {
    /// Creates a new `FormatterConfigBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets the formatter put the label of a sole child on the same line as its parent.
    ///
    /// The value is `true` by default.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagtree::{FormatterConfigBuilder, TreeFormatter};
    ///
    /// let opts = FormatterConfigBuilder::new()
    ///     .collapse_first_child(false)
    ///     .build();
    ///
    /// let mut formatter = TreeFormatter::with_config(opts);
    /// formatter.node("Broken")?;
    /// formatter.start_children()?;
    /// formatter.node("reason")?;
    /// formatter.end_children()?;
    ///
    /// // With collapsing enabled this would be "Broken: reason".
    /// assert_eq!(formatter.to_string(), "Broken:\n  - reason");
    /// # diagtree::Result::Ok(())
    /// ```
    pub fn collapse_first_child(&mut self, v: bool) -> &mut Self {
        self.config.collapse_first_child = v;
        self
    }

    /// Sets the line separator written between lines.
    ///
    /// The value is [`LineSeparator::Lf`] by default.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagtree::{FormatterConfigBuilder, LineSeparator, TreeFormatter};
    ///
    /// let opts = FormatterConfigBuilder::new()
    ///     .line_separator(LineSeparator::CrLf)
    ///     .build();
    ///
    /// let mut formatter = TreeFormatter::with_config(opts);
    /// formatter.node("first")?;
    /// formatter.node("second")?;
    ///
    /// assert_eq!(formatter.to_string(), "first\r\nsecond");
    /// # diagtree::Result::Ok(())
    /// ```
    pub fn line_separator(&mut self, v: LineSeparator) -> &mut Self {
        self.config.line_separator = v;
        self
    }

    /// Builds a `FormatterConfig`.
    pub fn build(self) -> FormatterConfig {
        self.config
    }
}

/// Options common for a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Whether a sole child may be rendered on its parent's line.
    ///
    /// Default is `true`.
    collapse_first_child: bool,
    /// Line separator.
    ///
    /// Default is `LineSeparator::Lf`.
    line_separator: LineSeparator,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            collapse_first_child: true,
            line_separator: LineSeparator::default(),
        }
    }
}

impl FormatterConfig {
    /// Creates a new default `FormatterConfig`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a sole child may be rendered on its parent's line.
    pub fn collapse_first_child(self) -> bool {
        self.collapse_first_child
    }

    /// Returns the line separator.
    pub fn line_separator(self) -> LineSeparator {
        self.line_separator
    }
}
