//! Node arena.

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// The synthetic root.
    pub(crate) const ROOT: Self = Self(0);
}

/// Node building state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeState {
    /// The label is still being authored.
    CollectingValue,
    /// Children are being added.
    TraversingChildren,
    /// Sealed.
    Done,
}

/// A single diagnostic entry.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Label.
    pub(crate) value: String,
    /// Parent, `None` for the root.
    pub(crate) parent: Option<NodeId>,
    /// First child.
    pub(crate) first_child: Option<NodeId>,
    /// Last child.
    pub(crate) last_child: Option<NodeId>,
    /// Next sibling under the same parent.
    pub(crate) next_sibling: Option<NodeId>,
    /// Indentation of continuation lines, assigned on first render.
    pub(crate) prefix: Option<String>,
    /// Whether the label has already been written to the sink.
    pub(crate) value_written: bool,
    /// Whether a sole child may share this node's line.
    pub(crate) collapse_first_child: bool,
    /// Building state.
    pub(crate) state: NodeState,
}

/// Arena of nodes, rooted at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub(crate) struct Tree {
    /// Nodes. The root lives at index 0.
    nodes: Vec<Node>,
}

impl Tree {
    /// Creates a tree with only the root.
    pub(crate) fn new(collapse_first_child: bool) -> Self {
        let root = Node {
            value: String::new(),
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            prefix: Some(String::new()),
            value_written: false,
            collapse_first_child,
            state: NodeState::TraversingChildren,
        };
        Self { nodes: vec![root] }
    }

    /// Appends a new child with the given label to `parent` and returns its id.
    pub(crate) fn push_child(&mut self, parent: NodeId, value: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        let collapse_first_child = self[parent].collapse_first_child;
        self.nodes.push(Node {
            value,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            next_sibling: None,
            prefix: None,
            value_written: false,
            collapse_first_child,
            state: NodeState::CollectingValue,
        });

        let last_child = self[parent].last_child;
        match last_child {
            Some(last) => self[last].next_sibling = Some(id),
            None => self[parent].first_child = Some(id),
        }
        self[parent].last_child = Some(id);

        id
    }

    /// Returns the parent of the node.
    ///
    /// The root is its own parent here; callers check for the root first.
    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self[id].parent.unwrap_or(NodeId::ROOT)
    }

    /// Returns whether the node is a direct child of the root.
    pub(crate) fn is_top_level(&self, id: NodeId) -> bool {
        self[id].parent == Some(NodeId::ROOT)
    }

    /// Returns the sole child of the node, if it has exactly one.
    pub(crate) fn only_child(&self, id: NodeId) -> Option<NodeId> {
        let first = self[id].first_child?;
        match self[first].next_sibling {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// Returns an iterator of all nodes except the root.
    #[cfg(test)]
    pub(crate) fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().skip(1)
    }
}

impl std::ops::Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl std::ops::IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}
