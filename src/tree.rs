/// Block-level document tree with parent links and lazy ancestor walks.
///
/// Paragraph content (runs, hyperlinks, ...) is owned by the paragraphs
/// themselves; the tree only records block structure so that ancestry
/// questions ("is this paragraph inside a structured block?") can be
/// answered without parent pointers inside the content types. Nodes are
/// arena indices, so references into the tree are plain copyable ids
/// rather than owning links.
use smallvec::SmallVec;

/// Identifier of a node within a [`DocumentTree`].
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// The kind of a block-level node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The document body root.
    Body,
    /// A paragraph (`<w:p>`).
    Paragraph,
    /// A table (`<w:tbl>`).
    Table,
    /// A table row (`<w:tr>`).
    TableRow,
    /// A table cell (`<w:tc>`).
    TableCell,
    /// A block-level structured document tag (`<w:sdt>`).
    StructuredDocumentBlock,
    /// A footnote body.
    Footnote,
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 8]>,
}

/// Arena of block-level nodes.
///
/// # Examples
///
/// ```
/// use longan::tree::{DocumentTree, NodeKind};
///
/// let mut tree = DocumentTree::new();
/// let body = tree.add_root(NodeKind::Body);
/// let sdt = tree.add_child(body, NodeKind::StructuredDocumentBlock);
/// let para = tree.add_child(sdt, NodeKind::Paragraph);
///
/// let mut ancestors = tree.ancestors(para);
/// assert_eq!(ancestors.next(), Some(sdt));
/// assert_eq!(ancestors.next(), Some(body));
/// assert_eq!(ancestors.next(), None);
/// ```
#[derive(Debug, Default)]
pub struct DocumentTree {
    nodes: Vec<Node>,
}

impl DocumentTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a parentless node (a body or footnote root).
    pub fn add_root(&mut self, kind: NodeKind) -> NodeId {
        self.push_node(kind, None)
    }

    /// Add a node below `parent`.
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.push_node(kind, Some(parent));
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    fn push_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent,
            children: SmallVec::new(),
        });
        id
    }

    /// Get the number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the tree has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the kind of a node.
    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0 as usize].kind
    }

    /// Get the parent of a node, if it has one.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0 as usize].parent
    }

    /// Get the children of a node, in document order.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0 as usize].children
    }

    /// Walk the ancestors of a node, nearest first.
    ///
    /// The walk is lazy: each step follows one parent link only when the
    /// iterator is pulled, so peeking at the first element never
    /// materializes the full chain.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Walk the ancestors of a node that are of the given kind, nearest
    /// first.
    pub fn nearest_ancestors(
        &self,
        id: NodeId,
        kind: NodeKind,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.ancestors(id).filter(move |&a| self.kind(a) == kind)
    }
}

/// Lazy iterator over the ancestors of a node, nearest first.
pub struct Ancestors<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_nearest_first() {
        let mut tree = DocumentTree::new();
        let body = tree.add_root(NodeKind::Body);
        let table = tree.add_child(body, NodeKind::Table);
        let row = tree.add_child(table, NodeKind::TableRow);
        let cell = tree.add_child(row, NodeKind::TableCell);
        let para = tree.add_child(cell, NodeKind::Paragraph);

        let chain: Vec<_> = tree.ancestors(para).collect();
        assert_eq!(chain, vec![cell, row, table, body]);
    }

    #[test]
    fn test_nearest_ancestors_filters_by_kind() {
        let mut tree = DocumentTree::new();
        let body = tree.add_root(NodeKind::Body);
        let outer = tree.add_child(body, NodeKind::StructuredDocumentBlock);
        let inner = tree.add_child(outer, NodeKind::StructuredDocumentBlock);
        let para = tree.add_child(inner, NodeKind::Paragraph);

        let blocks: Vec<_> = tree
            .nearest_ancestors(para, NodeKind::StructuredDocumentBlock)
            .collect();
        assert_eq!(blocks, vec![inner, outer]);

        let tables: Vec<_> = tree.nearest_ancestors(para, NodeKind::Table).collect();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_root_has_no_ancestors() {
        let mut tree = DocumentTree::new();
        let body = tree.add_root(NodeKind::Body);
        assert_eq!(tree.ancestors(body).next(), None);
    }

    #[test]
    fn test_children_in_document_order() {
        let mut tree = DocumentTree::new();
        let body = tree.add_root(NodeKind::Body);
        let a = tree.add_child(body, NodeKind::Paragraph);
        let b = tree.add_child(body, NodeKind::Table);
        assert_eq!(tree.children(body), &[a, b]);
        assert_eq!(tree.kind(b), NodeKind::Table);
    }
}
