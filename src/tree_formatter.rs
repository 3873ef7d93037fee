//! Diagnostic tree builder.

use std::fmt::{self, Write};

use crate::{
    config::FormatterConfig,
    tree::{NodeId, NodeState, Tree},
    value::{self, DisplayNullable, DisplayValues},
};

/// Tree formatter result.
pub type Result<T> = std::result::Result<T, Error>;

/// Tree formatter error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A builder call was made in a state where it is not allowed.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),
    /// Backend formatter error.
    #[error("backend formatter error: {0}")]
    Format(#[from] fmt::Error),
}

impl Error {
    /// Returns whether the error was caused by an illegal call order.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

/// Illegal builder call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ProtocolViolation {
    /// Text was appended while the current node is not collecting its label.
    #[error("cannot append text to node")]
    AppendOutsideValue,
    /// Children were started for a node that is not collecting its label.
    #[error("cannot start children again")]
    ChildrenAlreadyStarted,
    /// Children were ended while no node is being visited.
    #[error("not visiting any node")]
    NotVisitingNode,
    /// Children were ended for a node whose children were never started.
    #[error("cannot end children")]
    CannotEndChildren,
}

/// Builds a tree of diagnostic messages and renders it as indented text.
///
/// The calls replay a depth-first visit: [`node`][Self::node] opens a node (a sibling of the
/// previous one unless [`start_children`][Self::start_children] was called in between), and
/// [`end_children`][Self::end_children] closes the children of the enclosing node.
///
/// Top-level labels are written to the writer as soon as they are opened, and the subtree of a
/// top-level node is written when its children are ended.
///
/// ```
/// use diagtree::TreeFormatter;
///
/// let mut formatter = TreeFormatter::new();
/// formatter.node("Cannot build")?;
/// formatter.start_children()?;
/// formatter.node("missing file ")?;
/// formatter.append_value(Some("a.txt"))?;
/// formatter.end_children()?;
///
/// assert_eq!(formatter.to_string(), "Cannot build: missing file a.txt");
/// # diagtree::Result::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeFormatter<W = String> {
    /// Writer.
    writer: W,
    /// Options.
    opts: FormatterConfig,
    /// Nodes.
    tree: Tree,
    /// The node open for mutation.
    current: NodeId,
}

impl TreeFormatter<String> {
    /// Creates a new `TreeFormatter` writing to a `String`, with the default config.
    pub fn new() -> Self {
        Self::with_config(FormatterConfig::new())
    }

    /// Creates a new `TreeFormatter` writing to a `String`.
    pub fn with_config(opts: FormatterConfig) -> Self {
        Self::with_writer(String::new(), opts)
    }
}

impl Default for TreeFormatter<String> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: fmt::Write> TreeFormatter<W> {
    /// Creates a new `TreeFormatter` writing to the given writer.
    pub fn with_writer(writer: W, opts: FormatterConfig) -> Self {
        Self {
            writer,
            opts,
            tree: Tree::new(opts.collapse_first_child()),
            current: NodeId::ROOT,
        }
    }

    /// Returns a reference to the writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Starts a new node with the given text.
    pub fn node(&mut self, text: impl fmt::Display) -> Result<()> {
        let parent = if self.tree[self.current].state == NodeState::TraversingChildren {
            // First child node.
            self.current
        } else {
            // A sibling node.
            self.tree[self.current].state = NodeState::Done;
            self.tree.parent(self.current)
        };
        self.current = self.tree.push_child(parent, text.to_string());
        tracing::trace!(node = ?self.current, parent = ?parent, "opened node");

        if self.tree.is_top_level(self.current) {
            if self.tree[parent].first_child != Some(self.current) {
                // Not the first top level node.
                self.opts.line_separator().write_to(&mut self.writer)?;
            }
            let node = &mut self.tree[self.current];
            self.writer.write_str(&node.value)?;
            node.value_written = true;
        }

        Ok(())
    }

    /// Starts a new node labeled with the capitalized name of the type.
    pub fn node_type<T: ?Sized>(&mut self) -> Result<()> {
        self.node(value::type_label::<T>())
    }

    /// Appends text to the current node.
    pub fn append(&mut self, text: impl fmt::Display) -> Result<()> {
        let node = &mut self.tree[self.current];
        if node.state != NodeState::CollectingValue {
            return Err(self.violation(ProtocolViolation::AppendOutsideValue));
        }

        if node.value_written {
            write!(self.writer, "{}", text)?;
        } else {
            write!(node.value, "{}", text)?;
        }

        Ok(())
    }

    /// Appends the name of the type to the current node.
    pub fn append_type<T: ?Sized>(&mut self) -> Result<()> {
        self.append(std::any::type_name::<T>())
    }

    /// Appends a user provided value to the current node, `null` for `None`.
    pub fn append_value<T: fmt::Display>(&mut self, value: Option<T>) -> Result<()> {
        self.append(DisplayNullable(value))
    }

    /// Appends user provided values to the current node, as `[a, b, c]`.
    pub fn append_values<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator + Clone,
        I::Item: fmt::Display,
    {
        self.append(DisplayValues::new(values))
    }

    /// Starts the children of the current node.
    pub fn start_children(&mut self) -> Result<()> {
        let node = &mut self.tree[self.current];
        if node.state != NodeState::CollectingValue {
            return Err(self.violation(ProtocolViolation::ChildrenAlreadyStarted));
        }
        node.state = NodeState::TraversingChildren;

        Ok(())
    }

    /// Ends the children of the enclosing node.
    ///
    /// When the enclosing node is a top-level node, its whole subtree is written.
    pub fn end_children(&mut self) -> Result<()> {
        if self.current == NodeId::ROOT {
            return Err(self.violation(ProtocolViolation::NotVisitingNode));
        }

        if self.tree[self.current].state == NodeState::CollectingValue {
            // A top-level leaf has no enclosing node whose children could end.
            if self.tree.is_top_level(self.current) {
                return Err(self.violation(ProtocolViolation::CannotEndChildren));
            }
            self.tree[self.current].state = NodeState::Done;
            self.current = self.tree.parent(self.current);
        }
        if self.tree[self.current].state != NodeState::TraversingChildren {
            return Err(self.violation(ProtocolViolation::CannotEndChildren));
        }

        if self.tree.is_top_level(self.current) {
            tracing::trace!(node = ?self.current, "rendering top-level subtree");
            let separator = self.opts.line_separator();
            self.tree.render(self.current, &mut self.writer, separator)?;
        }
        self.tree[self.current].state = NodeState::Done;
        self.current = self.tree.parent(self.current);

        Ok(())
    }

    /// Closes all open nodes and returns the writer.
    ///
    /// Unlike [`end_children`][Self::end_children], a top-level node without children may
    /// be left open.
    ///
    /// ```
    /// use diagtree::TreeFormatter;
    ///
    /// let mut formatter = TreeFormatter::new();
    /// formatter.node("Broken")?;
    /// formatter.start_children()?;
    /// formatter.node("first")?;
    /// formatter.node("second")?;
    ///
    /// assert_eq!(formatter.finish()?, "Broken:\n  - first\n  - second");
    /// # diagtree::Result::Ok(())
    /// ```
    pub fn finish(mut self) -> Result<W> {
        self.close_all()?;
        Ok(self.writer)
    }

    /// Closes all open nodes.
    fn close_all(&mut self) -> Result<()> {
        while self.current != NodeId::ROOT {
            let state = self.tree[self.current].state;
            if state == NodeState::CollectingValue && self.tree.is_top_level(self.current) {
                self.tree[self.current].state = NodeState::Done;
                self.current = NodeId::ROOT;
            } else {
                self.end_children()?;
            }
        }

        Ok(())
    }

    /// Logs the violation and wraps it into an error.
    fn violation(&self, violation: ProtocolViolation) -> Error {
        tracing::debug!(node = ?self.current, %violation, "protocol violation");
        violation.into()
    }
}

impl fmt::Display for TreeFormatter<String> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{FormatterConfigBuilder, LineSeparator};

    fn assert_violation<T: fmt::Debug>(res: Result<T>, expected: ProtocolViolation) {
        match res {
            Err(Error::Protocol(got)) => assert_eq!(got, expected),
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }

    fn assert_all_done<W>(formatter: &TreeFormatter<W>) {
        assert!(formatter
            .tree
            .nodes()
            .all(|node| node.state == NodeState::Done));
    }

    #[test]
    fn single_top_level_node() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("Some thing.")?;

        assert_eq!(formatter.to_string(), "Some thing.");
        Ok(())
    }

    #[test]
    fn top_level_nodes_are_separated_by_one_newline() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("First")?;
        formatter.start_children()?;
        formatter.node("a")?;
        formatter.node("b")?;
        formatter.end_children()?;
        formatter.node("Second")?;
        formatter.node("Third")?;

        assert_eq!(
            formatter.to_string(),
            "First:\n  - a\n  - b\n\
             Second\n\
             Third"
        );
        Ok(())
    }

    #[test]
    fn multiple_children() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("Some things")?;
        formatter.start_children()?;
        formatter.node("First")?;
        formatter.node("Second")?;
        formatter.end_children()?;

        assert_eq!(formatter.to_string(), "Some things:\n  - First\n  - Second");
        assert_all_done(&formatter);
        Ok(())
    }

    #[test]
    fn single_child_is_collapsed() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("Some thing")?;
        formatter.start_children()?;
        formatter.node("child")?;
        formatter.end_children()?;

        assert_eq!(formatter.to_string(), "Some thing: child");
        Ok(())
    }

    #[test]
    fn single_child_chain() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("A")?;
        formatter.start_children()?;
        formatter.node("B")?;
        formatter.start_children()?;
        formatter.node("C")?;
        formatter.end_children()?;
        formatter.end_children()?;

        assert_eq!(formatter.to_string(), "A:\n  - B: C");
        assert_all_done(&formatter);
        Ok(())
    }

    #[test]
    fn nested_children() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("Some thing")?;
        formatter.start_children()?;
        formatter.node("Parent")?;
        formatter.start_children()?;
        formatter.node("Child1")?;
        formatter.node("Child2")?;
        formatter.end_children()?;
        formatter.node("Parent2")?;
        formatter.end_children()?;

        let expected = "Some thing:\n  \
                        - Parent:\n      \
                        - Child1\n      \
                        - Child2\n  \
                        - Parent2";
        assert_eq!(formatter.to_string(), expected);
        assert_all_done(&formatter);
        Ok(())
    }

    #[test]
    fn collapsing_disabled() -> Result<()> {
        let opts = FormatterConfigBuilder::new()
            .collapse_first_child(false)
            .build();
        let mut formatter = TreeFormatter::with_config(opts);
        formatter.node("A")?;
        formatter.start_children()?;
        formatter.node("B")?;
        formatter.start_children()?;
        formatter.node("C")?;
        formatter.end_children()?;
        formatter.end_children()?;

        assert_eq!(formatter.to_string(), "A:\n  - B:\n      - C");
        Ok(())
    }

    #[test]
    fn crlf_separator() -> Result<()> {
        let opts = FormatterConfigBuilder::new()
            .line_separator(LineSeparator::CrLf)
            .build();
        let mut formatter = TreeFormatter::with_config(opts);
        formatter.node("A")?;
        formatter.start_children()?;
        formatter.node("b")?;
        formatter.node("c")?;
        formatter.end_children()?;
        formatter.node("D")?;

        assert_eq!(formatter.to_string(), "A:\r\n  - b\r\n  - c\r\nD");
        Ok(())
    }

    #[test]
    fn top_level_is_streamed() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("Top")?;
        assert_eq!(formatter.get_ref(), "Top");

        // Written straight through, since the label is already out.
        formatter.append(" level")?;
        assert_eq!(formatter.get_ref(), "Top level");

        formatter.start_children()?;
        formatter.node("child")?;
        formatter.append(" text")?;
        assert_eq!(formatter.get_ref(), "Top level");

        formatter.end_children()?;
        assert_eq!(formatter.get_ref(), "Top level: child text");
        Ok(())
    }

    #[test]
    fn append_values() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("Values: ")?;
        formatter.append_value(None::<i32>)?;
        formatter.append(" ")?;
        formatter.append_values(&[1, 2])?;
        formatter.append(" ")?;
        formatter.append_values(Vec::<String>::new())?;

        assert_eq!(formatter.to_string(), "Values: null [1, 2] []");
        Ok(())
    }

    #[test]
    fn type_labels() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node_type::<u8>()?;
        formatter.append(" is not ")?;
        formatter.append_type::<u16>()?;

        assert_eq!(formatter.to_string(), "U8 is not u16");
        Ok(())
    }

    #[test]
    fn multi_line_child_labels() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("Failed")?;
        formatter.start_children()?;
        formatter.node("first line\nsecond line")?;
        formatter.start_children()?;
        formatter.node("x")?;
        formatter.node("y\n\nz")?;
        formatter.end_children()?;
        formatter.node("other")?;
        formatter.end_children()?;

        let expected = "Failed:\n  \
                        - first line\n    \
                        second line:\n      \
                        - x\n      \
                        - y\n\n        \
                        z\n  \
                        - other";
        assert_eq!(formatter.to_string(), expected);
        Ok(())
    }

    #[test]
    fn append_before_node_fails() {
        let mut formatter = TreeFormatter::new();
        assert_violation(formatter.append("text"), ProtocolViolation::AppendOutsideValue);
        assert_violation(
            formatter.append_value(Some(1)),
            ProtocolViolation::AppendOutsideValue,
        );
    }

    #[test]
    fn append_after_start_children_fails() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("A")?;
        formatter.start_children()?;
        assert_violation(formatter.append("text"), ProtocolViolation::AppendOutsideValue);
        Ok(())
    }

    #[test]
    fn start_children_twice_fails() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        assert_violation(
            formatter.start_children(),
            ProtocolViolation::ChildrenAlreadyStarted,
        );
        formatter.node("A")?;
        formatter.start_children()?;
        assert_violation(
            formatter.start_children(),
            ProtocolViolation::ChildrenAlreadyStarted,
        );
        Ok(())
    }

    #[test]
    fn end_children_without_node_fails() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        assert_violation(formatter.end_children(), ProtocolViolation::NotVisitingNode);

        formatter.node("A")?;
        formatter.start_children()?;
        formatter.node("b")?;
        formatter.end_children()?;
        assert_violation(formatter.end_children(), ProtocolViolation::NotVisitingNode);
        Ok(())
    }

    #[test]
    fn end_children_of_top_level_leaf_fails() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("A")?;
        assert_violation(formatter.end_children(), ProtocolViolation::CannotEndChildren);
        assert_eq!(formatter.tree[formatter.current].state, NodeState::CollectingValue);
        Ok(())
    }

    #[test]
    fn error_classification() {
        let err = Error::from(ProtocolViolation::NotVisitingNode);
        assert!(err.is_protocol_violation());
        assert_eq!(err.to_string(), "protocol violation: not visiting any node");
        assert!(!Error::from(fmt::Error).is_protocol_violation());
    }

    #[test]
    fn finish_closes_open_nodes() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("A")?;
        formatter.start_children()?;
        formatter.node("b")?;
        formatter.start_children()?;
        formatter.node("c")?;
        formatter.node("d")?;
        formatter.close_all()?;
        assert_all_done(&formatter);
        assert_eq!(formatter.current, NodeId::ROOT);

        assert_eq!(formatter.finish()?, "A: b:\n  - c\n  - d");
        Ok(())
    }

    #[test]
    fn finish_leaves_top_level_leaf() -> Result<()> {
        let mut formatter = TreeFormatter::new();
        formatter.node("A")?;
        formatter.node("B")?;
        assert_eq!(formatter.finish()?, "A\nB");
        Ok(())
    }

    /// Writer that refuses everything.
    struct Refuse;

    impl fmt::Write for Refuse {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn writer_error_is_propagated() {
        let mut formatter = TreeFormatter::with_writer(Refuse, FormatterConfig::new());
        match formatter.node("A") {
            Err(Error::Format(_)) => {}
            other => panic!("expected format error, got {:?}", other),
        }
    }
}
