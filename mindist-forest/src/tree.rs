//! Parse trees stored in an arena.

use std::ops::Range;

use mindist_grammar::{Role, SymbolName};

/// Index of a node in its tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node stands for.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Nonterminal { name: SymbolName, role: Role },
    /// A terminal, labelled with its character.
    Leaf(char),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TreeNode {
    pub kind: NodeKind,
    /// Input positions covered by the node.
    pub span: Range<usize>,
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub fn role(&self) -> Option<Role> {
        match self.kind {
            NodeKind::Nonterminal { role, .. } => Some(role),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn name(&self) -> Option<&SymbolName> {
        match &self.kind {
            NodeKind::Nonterminal { name, .. } => Some(name),
            NodeKind::Leaf(_) => None,
        }
    }
}

/// A derivation tree.
///
/// Nodes live in a flat vector and refer to their children by index, so trees of any depth
/// can be built, walked and dropped without recursion. The root is the first node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseTree {
    nodes: Vec<TreeNode>,
}

impl ParseTree {
    /// Creates a tree with a single root node.
    pub fn new(kind: NodeKind, span: Range<usize>) -> Self {
        ParseTree {
            nodes: vec![TreeNode {
                kind,
                span,
                children: vec![],
            }],
        }
    }

    /// Appends a node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind, span: Range<usize>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode {
            kind,
            span,
            children: vec![],
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children[..]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the subtree of `id` in depth-first order, parents before children.
    pub fn preorder(&self, id: NodeId) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![id],
        }
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root(), 1)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self.children(id).iter().map(|&child| (child, depth + 1)));
        }
        max_depth
    }

    /// Concatenates the leaves of the subtree of `id`.
    pub fn yield_of(&self, id: NodeId) -> String {
        self.preorder(id)
            .filter_map(|node| match node.kind {
                NodeKind::Leaf(c) => Some(c),
                NodeKind::Nonterminal { .. } => None,
            })
            .collect()
    }

    /// Concatenates the leaves of the tree.
    pub fn yield_string(&self) -> String {
        self.yield_of(self.root())
    }

    /// Maps a tree of a covering grammar back to the grammar it covers.
    ///
    /// The start wrapper and trailing junk are dropped, and every match of an expected
    /// character becomes a leaf with that character, whatever the input held. The yield of
    /// the result is the repaired input.
    pub fn strip_covering(&self) -> ParseTree {
        let mut root = self.root();
        let root_node = self.node(root);
        if root_node.role() == Some(Role::CoveringStart) {
            if let Some(&inner) = root_node.children.first() {
                root = inner;
            }
        }
        let root_node = self.node(root);
        let mut result = ParseTree::new(root_node.kind.clone(), root_node.span.clone());
        let mut stack = vec![(root, result.root())];
        while let Some((source, destination)) = stack.pop() {
            for &child in self.children(source).iter() {
                let node = self.node(child);
                match node.role() {
                    Some(Role::Match(c)) => {
                        result.add_child(destination, NodeKind::Leaf(c), node.span.clone());
                    }
                    _ => {
                        let copy =
                            result.add_child(destination, node.kind.clone(), node.span.clone());
                        stack.push((child, copy));
                    }
                }
            }
        }
        result
    }
}

/// Depth-first iterator over a subtree.
pub struct Preorder<'a> {
    tree: &'a ParseTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack.extend(node.children.iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nonterminal(name: &str, role: Role) -> NodeKind {
        NodeKind::Nonterminal {
            name: name.into(),
            role,
        }
    }

    #[test]
    fn test_build_and_walk() {
        let mut tree = ParseTree::new(nonterminal("<E>", Role::Plain), 0..3);
        let root = tree.root();
        let t = tree.add_child(root, nonterminal("<T>", Role::Plain), 0..1);
        tree.add_child(t, NodeKind::Leaf('1'), 0..1);
        tree.add_child(root, NodeKind::Leaf('+'), 1..2);
        let e = tree.add_child(root, nonterminal("<E>", Role::Plain), 2..3);
        tree.add_child(e, NodeKind::Leaf('1'), 2..3);
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.children(root).len(), 3);
        assert_eq!(tree.yield_string(), "1+1");
        assert_eq!(tree.yield_of(e), "1");
        assert_eq!(tree.depth(), 3);
        let labels = tree
            .preorder(root)
            .map(|node| node.name().map_or("leaf".to_string(), |n| n.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(labels, ["<E>", "<T>", "leaf", "leaf", "<E>", "leaf"]);
    }

    #[test]
    fn test_deep_tree_drops() {
        let mut tree = ParseTree::new(nonterminal("<L>", Role::Plain), 0..100_000);
        let mut parent = tree.root();
        for i in 0..100_000 {
            parent = tree.add_child(parent, nonterminal("<L>", Role::Plain), i..100_000);
        }
        assert_eq!(tree.depth(), 100_001);
        drop(tree);
    }
}
