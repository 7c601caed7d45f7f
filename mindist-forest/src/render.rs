//! Textual forms of parse trees.

use std::fmt;

use crate::tree::{NodeId, NodeKind, ParseTree};

const VERTICAL: &str = "│";
const HORIZONTAL: &str = "─";
const LAST: &str = "└";
const JUNCTION: &str = "├";

impl NodeKind {
    /// Nonterminals are labelled with their name, leaves with their quoted character.
    pub fn label(&self) -> String {
        match self {
            NodeKind::Nonterminal { name, .. } => name.to_string(),
            NodeKind::Leaf(c) => format!("{:?}", c),
        }
    }
}

enum Visit {
    Open(NodeId),
    Close,
}

impl ParseTree {
    /// Formats the tree as an S-expression, with leaves written as bare characters.
    ///
    /// ```
    /// use mindist_forest::{NodeKind, ParseTree};
    /// use mindist_grammar::Role;
    ///
    /// let kind = NodeKind::Nonterminal { name: "<T>".into(), role: Role::Plain };
    /// let mut tree = ParseTree::new(kind, 0..1);
    /// tree.add_child(tree.root(), NodeKind::Leaf('1'), 0..1);
    /// assert_eq!(tree.to_sexpr(), "(<T> 1)");
    /// ```
    pub fn to_sexpr(&self) -> String {
        let mut result = String::new();
        let mut stack = vec![Visit::Open(self.root())];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Open(id) => {
                    if !result.is_empty() {
                        result.push(' ');
                    }
                    match &self.node(id).kind {
                        NodeKind::Leaf(c) => result.push(*c),
                        NodeKind::Nonterminal { name, .. } => {
                            result.push('(');
                            result.push_str(name);
                            stack.push(Visit::Close);
                            stack.extend(self.children(id).iter().rev().map(|&c| Visit::Open(c)));
                        }
                    }
                }
                Visit::Close => result.push(')'),
            }
        }
        result
    }
}

/// Draws the tree with box-drawing characters, one node per line.
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.node(self.root()).kind.label())?;
        // Lines of the current path, shared by all entries on the stack.
        let mut prefix = String::new();
        // (parent, index of its next child, length of the prefix of its children's lines)
        let mut stack = vec![(self.root(), 0, 0)];
        while let Some(frame) = stack.last_mut() {
            let (parent, next, level) = *frame;
            let children = self.children(parent);
            if next == children.len() {
                stack.pop();
                continue;
            }
            frame.1 += 1;
            let child = children[next];
            let last = next + 1 == children.len();
            prefix.truncate(level);
            let sep = if last { LAST } else { JUNCTION };
            writeln!(
                f,
                "{}{}{} {}",
                prefix,
                sep,
                HORIZONTAL,
                self.node(child).kind.label()
            )?;
            if !self.children(child).is_empty() {
                if last {
                    prefix.push_str("    ");
                } else {
                    prefix.push_str(VERTICAL);
                    prefix.push_str("   ");
                }
                stack.push((child, 0, prefix.len()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mindist_grammar::Role;

    use super::*;

    fn sample() -> ParseTree {
        let nonterminal = |name: &str| NodeKind::Nonterminal {
            name: name.into(),
            role: Role::Plain,
        };
        let mut tree = ParseTree::new(nonterminal("<E>"), 0..3);
        let root = tree.root();
        let t = tree.add_child(root, nonterminal("<T>"), 0..1);
        tree.add_child(t, NodeKind::Leaf('1'), 0..1);
        tree.add_child(root, NodeKind::Leaf('+'), 1..2);
        let e = tree.add_child(root, nonterminal("<E>"), 2..3);
        let t = tree.add_child(e, nonterminal("<T>"), 2..3);
        tree.add_child(t, NodeKind::Leaf('1'), 2..3);
        tree
    }

    #[test]
    fn test_sexpr() {
        assert_eq!(sample().to_sexpr(), "(<E> (<T> 1) + (<E> (<T> 1)))");
    }

    #[test]
    fn test_display() {
        let expected = "\
<E>
├─ <T>
│   └─ '1'
├─ '+'
└─ <E>
    └─ <T>
        └─ '1'
";
        assert_eq!(sample().to_string(), expected);
    }

    #[test]
    fn test_display_deep_tree() {
        let nonterminal = |name: &str| NodeKind::Nonterminal {
            name: name.into(),
            role: Role::Plain,
        };
        let mut tree = ParseTree::new(nonterminal("<R>"), 0..1);
        let mut parent = tree.root();
        for _ in 0..2_000 {
            parent = tree.add_child(parent, nonterminal("<L>"), 0..1);
        }
        tree.add_child(tree.root(), NodeKind::Leaf('b'), 0..1);
        let drawn = tree.to_string();
        let lines = drawn.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2_002);
        assert_eq!(lines[1], "├─ <L>");
        assert_eq!(lines[2], "│   └─ <L>");
        assert_eq!(lines[2_000], format!("│{}└─ <L>", " ".repeat(3 + 4 * 1_998)));
        assert_eq!(lines[2_001], "└─ 'b'");
    }
}
