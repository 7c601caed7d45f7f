//! Reading corrections off covering-grammar trees.

use std::fmt::Write;

use mindist_grammar::Role;

use crate::tree::{NodeKind, ParseTree};

/// A single-character correction, or the deletion of a run of junk.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum EditKind {
    /// Characters that fit nowhere.
    Delete(String),
    /// A character that stands where another was expected.
    Substitute { found: char, expected: char },
    /// An expected character that is missing.
    Insert(char),
}

/// A correction at an input position.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Edit {
    pub position: usize,
    pub kind: EditKind,
}

enum Piece {
    Keep(char),
    Edit(Edit),
}

impl ParseTree {
    /// Walks the leaves in order, folding every correction into a single piece.
    fn pieces(&self) -> Vec<Piece> {
        let mut pieces = vec![];
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            let position = node.span.start;
            let role = match node.kind {
                NodeKind::Leaf(c) => {
                    pieces.push(Piece::Keep(c));
                    continue;
                }
                NodeKind::Nonterminal { role, .. } => role,
            };
            let kind = match role {
                Role::AnyPlus | Role::AnyOne => EditKind::Delete(self.yield_of(id)),
                Role::AnyExcept(expected) => {
                    let found = self.yield_of(id).chars().next().unwrap_or(expected);
                    EditKind::Substitute { found, expected }
                }
                Role::Match(expected)
                    if node
                        .children
                        .first()
                        .map_or(false, |&child| self.node(child).role() == Some(Role::Empty)) =>
                {
                    EditKind::Insert(expected)
                }
                Role::Empty => continue,
                _ => {
                    stack.extend(node.children.iter().rev().copied());
                    continue;
                }
            };
            pieces.push(Piece::Edit(Edit { position, kind }));
        }
        pieces
    }

    /// Returns the corrections, ordered by position.
    pub fn edits(&self) -> Vec<Edit> {
        self.pieces()
            .into_iter()
            .filter_map(|piece| match piece {
                Piece::Edit(edit) => Some(edit),
                Piece::Keep(_) => None,
            })
            .collect()
    }

    /// Returns the input with all corrections applied.
    pub fn repaired(&self) -> String {
        let mut result = String::new();
        for piece in self.pieces() {
            match piece {
                Piece::Keep(c) => result.push(c),
                Piece::Edit(Edit { kind, .. }) => match kind {
                    EditKind::Delete(_) => {}
                    EditKind::Substitute { expected, .. } => result.push(expected),
                    EditKind::Insert(c) => result.push(c),
                },
            }
        }
        result
    }

    /// Returns the input with corrections marked inline, as in `1+{s/'x'/1/}` for a
    /// substitution, `{s/'xy'//}` for a deletion and `{missing '1'}` for an insertion.
    pub fn delta(&self) -> String {
        let mut result = String::new();
        for piece in self.pieces() {
            match piece {
                Piece::Keep(c) => result.push(c),
                Piece::Edit(Edit { kind, .. }) => {
                    match kind {
                        EditKind::Delete(junk) => write!(result, "{{s/'{}'//}}", junk),
                        EditKind::Substitute { found, expected } => {
                            write!(result, "{{s/'{}'/{}/}}", found, expected)
                        }
                        EditKind::Insert(c) => write!(result, "{{missing '{}'}}", c),
                    }
                    .expect("writing to String failed");
                }
            }
        }
        result
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

    /// A tree for `x+` under `<E> ::= <T> + <E> | <T>` with `x` substituted, a missing
    /// `1` at the end and trailing junk `yy`.
    fn corrected() -> ParseTree {
        let mut tree = ParseTree::new(nonterminal("<@# E>", Role::CoveringStart), 0..4);
        let root = tree.root();
        let e = tree.add_child(root, nonterminal("<E>", Role::Plain), 0..2);
        let t = tree.add_child(e, nonterminal("<T>", Role::Plain), 0..1);
        let one = tree.add_child(t, nonterminal("<$ [1]>", Role::Match('1')), 0..1);
        let except = tree.add_child(one, nonterminal("<$![1]>", Role::AnyExcept('1')), 0..1);
        tree.add_child(except, NodeKind::Leaf('x'), 0..1);
        let plus = tree.add_child(e, nonterminal("<$ [+]>", Role::Match('+')), 1..2);
        tree.add_child(plus, NodeKind::Leaf('+'), 1..2);
        let e2 = tree.add_child(e, nonterminal("<E>", Role::Plain), 2..2);
        let t2 = tree.add_child(e2, nonterminal("<T>", Role::Plain), 2..2);
        let one2 = tree.add_child(t2, nonterminal("<$ [1]>", Role::Match('1')), 2..2);
        tree.add_child(one2, nonterminal("<$>", Role::Empty), 2..2);
        let junk = tree.add_child(root, nonterminal("<$.+>", Role::AnyPlus), 2..4);
        let junk_head = tree.add_child(junk, nonterminal("<$.+>", Role::AnyPlus), 2..3);
        let any = tree.add_child(junk_head, nonterminal("<$.>", Role::AnyOne), 2..3);
        tree.add_child(any, NodeKind::Leaf('y'), 2..3);
        let any = tree.add_child(junk, nonterminal("<$.>", Role::AnyOne), 3..4);
        tree.add_child(any, NodeKind::Leaf('y'), 3..4);
        tree
    }

    #[test]
    fn test_edits() {
        let tree = corrected();
        assert_eq!(
            tree.edits(),
            vec![
                Edit {
                    position: 0,
                    kind: EditKind::Substitute {
                        found: 'x',
                        expected: '1'
                    }
                },
                Edit {
                    position: 2,
                    kind: EditKind::Insert('1')
                },
                Edit {
                    position: 2,
                    kind: EditKind::Delete("yy".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_repaired_and_delta() {
        let tree = corrected();
        assert_eq!(tree.yield_string(), "x+yy");
        assert_eq!(tree.repaired(), "1+1");
        assert_eq!(tree.delta(), "{s/'x'/1/}+{missing '1'}{s/'yy'//}");
        assert_eq!(tree.strip_covering().yield_string(), "1+1");
        assert_eq!(
            tree.strip_covering().to_sexpr(),
            "(<E> (<T> 1) + (<E> (<T> 1)))"
        );
    }
}
