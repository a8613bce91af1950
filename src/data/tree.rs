//! Dependency tree structures.
//!
//! A `DependencyTree` is the terminal output of decoding one sentence. It is
//! constructed atomically from a full edge set, validated against the tree
//! invariants (exactly one root-headed token, one head per non-root token,
//! no cycles, all indices in range) and immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A directed dependency relation between two tokens.
///
/// `head` is `None` for the single arc out of the synthetic root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub head: Option<usize>,
    pub dependent: usize,
    pub label: String,
    pub score: f64,
}

impl Edge {
    pub fn new(head: Option<usize>, dependent: usize, label: impl Into<String>, score: f64) -> Self {
        Self {
            head,
            dependent,
            label: label.into(),
            score,
        }
    }

    pub fn is_root(&self) -> bool {
        self.head.is_none()
    }
}

/// A validated single-root dependency tree over one sentence's token indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyTree {
    heads: Vec<Option<usize>>,
    labels: Vec<String>,
    scores: Vec<f64>,
    children: Vec<Vec<usize>>,
    root: usize,
}

impl DependencyTree {
    /// Build and validate a tree over `len` tokens from a complete edge set.
    ///
    /// Fails with `ParseError::InvalidTree` when the edges do not form a
    /// well-formed single-root arborescence. No partially constructed tree
    /// is ever observable.
    pub fn from_edges(len: usize, edges: &[Edge]) -> Result<Self, ParseError> {
        if len == 0 {
            return Err(ParseError::InvalidTree(
                "a tree must cover at least one token".to_string(),
            ));
        }
        if edges.len() != len {
            return Err(ParseError::InvalidTree(format!(
                "expected {} edges for {} tokens, got {}",
                len,
                len,
                edges.len()
            )));
        }

        let mut heads: Vec<Option<Option<usize>>> = vec![None; len];
        let mut labels = vec![String::new(); len];
        let mut scores = vec![0.0; len];
        let mut children = vec![Vec::new(); len];
        let mut root = None;

        for edge in edges {
            if edge.dependent >= len {
                return Err(ParseError::InvalidTree(format!(
                    "dependent index {} out of range for {} tokens",
                    edge.dependent, len
                )));
            }
            if heads[edge.dependent].is_some() {
                return Err(ParseError::InvalidTree(format!(
                    "token {} has more than one head",
                    edge.dependent
                )));
            }
            match edge.head {
                None => {
                    if root.is_some() {
                        return Err(ParseError::InvalidTree(
                            "more than one root-headed token".to_string(),
                        ));
                    }
                    root = Some(edge.dependent);
                }
                Some(head) => {
                    if head >= len {
                        return Err(ParseError::InvalidTree(format!(
                            "head index {} out of range for {} tokens",
                            head, len
                        )));
                    }
                    if head == edge.dependent {
                        return Err(ParseError::InvalidTree(format!(
                            "token {} cannot head itself",
                            head
                        )));
                    }
                    children[head].push(edge.dependent);
                }
            }
            heads[edge.dependent] = Some(edge.head);
            labels[edge.dependent] = edge.label.clone();
            scores[edge.dependent] = edge.score;
        }

        let root = root.ok_or_else(|| {
            ParseError::InvalidTree("no token is headed by the root".to_string())
        })?;
        let heads: Vec<Option<usize>> = heads
            .into_iter()
            .map(|h| h.expect("every token was assigned exactly once"))
            .collect();

        // Acyclicity: following head pointers from any token must reach the
        // root within len steps.
        for start in 0..len {
            let mut current = start;
            let mut steps = 0;
            while let Some(head) = heads[current] {
                current = head;
                steps += 1;
                if steps > len {
                    return Err(ParseError::InvalidTree(format!(
                        "cycle detected following heads from token {}",
                        start
                    )));
                }
            }
        }

        // Deterministic child order
        for child_list in &mut children {
            child_list.sort_unstable();
        }

        Ok(Self {
            heads,
            labels,
            scores,
            children,
            root,
        })
    }

    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// Index of the single root-headed token
    pub fn root(&self) -> usize {
        self.root
    }

    /// Head of a token, `None` if the token is the root
    pub fn head_of(&self, index: usize) -> Option<usize> {
        self.heads[index]
    }

    pub fn label_of(&self, index: usize) -> &str {
        &self.labels[index]
    }

    pub fn score_of(&self, index: usize) -> f64 {
        self.scores[index]
    }

    /// Dependents of a token, ascending by index
    pub fn children_of(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    /// Sum of all edge scores in the tree
    pub fn total_score(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// The edges of the tree in dependent order
    pub fn edges(&self) -> Vec<Edge> {
        (0..self.len())
            .map(|i| Edge::new(self.heads[i], i, self.labels[i].clone(), self.scores[i]))
            .collect()
    }

    /// Head-chain from a token up to the root, starting with the token itself
    pub fn path_to_root(&self, index: usize) -> Vec<usize> {
        let mut path = vec![index];
        let mut current = index;
        while let Some(head) = self.heads[current] {
            path.push(head);
            current = head;
        }
        path
    }
}
