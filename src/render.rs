//! Subtree renderer.

use std::fmt::{self, Write};

use crate::{
    config::LineSeparator,
    line_writer::LineWriter,
    tree::{NodeId, Tree},
};

/// Indentation added for each nest level.
const INDENT: &str = "    ";

/// Marker put before the label of a non top-level node.
const BULLET: &str = "  - ";

impl Tree {
    /// Writes the node, its descendants, and its following siblings.
    pub(crate) fn render<W: fmt::Write>(
        &mut self,
        id: NodeId,
        writer: &mut W,
        separator: LineSeparator,
    ) -> fmt::Result {
        let mut id = id;
        loop {
            self.render_node(id, writer, separator)?;
            match self[id].next_sibling {
                Some(next) => {
                    separator.write_to(writer)?;
                    id = next;
                }
                None => return Ok(()),
            }
        }
    }

    /// Writes the node and its descendants.
    fn render_node<W: fmt::Write>(
        &mut self,
        id: NodeId,
        writer: &mut W,
        separator: LineSeparator,
    ) -> fmt::Result {
        let prefix = self.prefix(id);
        let collapsed = if self.can_collapse_first_child(id) {
            self.only_child(id)
        } else {
            None
        };

        {
            let mut line = LineWriter::new(writer, &prefix);
            if !self[id].value_written {
                let parent = self.parent(id);
                line.write_str(self[parent].prefix.as_deref().unwrap_or_default())?;
                line.write_str(BULLET)?;
                line.write_str(&self[id].value)?;
                self[id].value_written = true;
            }
            if let Some(child) = collapsed {
                line.write_str(": ")?;
                line.write_str(&self[child].value)?;
            }
        }

        if let Some(child) = collapsed {
            let child_node = &mut self[child];
            child_node.value_written = true;
            child_node.prefix = Some(prefix);
            self.render(child, writer, separator)?;
        } else if let Some(first) = self[id].first_child {
            writer.write_char(':')?;
            separator.write_to(writer)?;
            self.render(first, writer, separator)?;
        }

        Ok(())
    }

    /// Returns the prefix of the node, assigning it on the first call.
    fn prefix(&mut self, id: NodeId) -> String {
        if let Some(prefix) = &self[id].prefix {
            return prefix.clone();
        }

        let prefix = if self.is_top_level(id) {
            String::new()
        } else {
            let parent = self.parent(id);
            let mut prefix = self[parent].prefix.clone().unwrap_or_default();
            prefix.push_str(INDENT);
            prefix
        };
        self[id].prefix = Some(prefix.clone());
        prefix
    }

    /// Returns whether the sole child of the node goes on the node's line.
    ///
    /// A child that would itself collapse keeps its own line, so along a chain of sole
    /// children collapsing alternates level by level.
    pub(crate) fn can_collapse_first_child(&self, id: NodeId) -> bool {
        self[id].collapse_first_child
            && self
                .only_child(id)
                .map_or(false, |child| !self.can_collapse_first_child(child))
    }
}
