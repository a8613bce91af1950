//! Parse search: maximum spanning arborescence decoding.
//!
//! Finds the highest-scoring dependency tree over the complete candidate
//! graph produced by the scorer, using the Chu-Liu/Edmonds algorithm:
//! greedily select the best incoming arc per node, contract any cycle into
//! a super-node with adjusted arc weights, recurse, and expand. The single
//! designated root is enforced by re-decoding with all but one root arc
//! disabled whenever the unconstrained optimum attaches multiple tokens to
//! the root. Ties always resolve toward the smaller head index.

use std::sync::Arc;

use crate::data::{DependencyTree, Edge, Sentence};
use crate::engine::constants::PUNCT_LABEL;
use crate::error::ParseError;
use crate::model::ParserModel;
use crate::pipeline::scorer::ScoreMatrix;
use crate::types::TaggedToken;

/// Internal node id of the synthetic root in the working matrices
const ROOT: usize = 0;

/// Decodes a score matrix into a validated dependency tree
#[derive(Debug, Clone)]
pub struct Decoder {
    model: Arc<ParserModel>,
}

impl Decoder {
    pub fn new(model: Arc<ParserModel>) -> Self {
        Self { model }
    }

    /// Find the maximum spanning arborescence and label its arcs.
    ///
    /// Fails with `InvalidScore` if the matrix contains a non-finite
    /// candidate arc; a default edge is never substituted.
    pub fn decode(
        &self,
        sentence: &Sentence,
        scores: &ScoreMatrix,
    ) -> Result<DependencyTree, ParseError> {
        let n = sentence.len();
        if n == 0 {
            return Err(ParseError::InvalidTree(
                "cannot decode an empty sentence".to_string(),
            ));
        }
        scores.validate_finite()?;

        if n == 1 {
            let edge = Edge::new(None, 0, self.model.labels.root_label.clone(), scores.get(None, 0));
            return DependencyTree::from_edges(1, &[edge]);
        }

        // Working matrix over internal ids: node 0 is the root, node i+1 is
        // token i. No arc may enter the root.
        let mut matrix = vec![vec![f64::NEG_INFINITY; n + 1]; n + 1];
        for dependent in 0..n {
            matrix[ROOT][dependent + 1] = scores.get(None, dependent);
            for head in 0..n {
                if head != dependent {
                    matrix[head + 1][dependent + 1] = scores.get(Some(head), dependent);
                }
            }
        }

        let heads = self.decode_single_root(&matrix, n);

        let edges: Vec<Edge> = (0..n)
            .map(|j| {
                let head_id = heads[j + 1];
                if head_id == ROOT {
                    Edge::new(
                        None,
                        j,
                        self.model.labels.root_label.clone(),
                        scores.get(None, j),
                    )
                } else {
                    let head = head_id - 1;
                    let label = self.label_for(
                        sentence.get(head).expect("head index in range"),
                        sentence.get(j).expect("dependent index in range"),
                    );
                    Edge::new(Some(head), j, label, scores.get(Some(head), j))
                }
            })
            .collect();

        DependencyTree::from_edges(n, &edges)
    }

    /// Run the arborescence search, then enforce the single-root
    /// constraint: if the unconstrained optimum attaches more than one
    /// token to the root, re-decode once per candidate root child with the
    /// other root arcs disabled and keep the best total.
    fn decode_single_root(&self, matrix: &[Vec<f64>], n: usize) -> Vec<usize> {
        let heads = max_arborescence(matrix);
        let root_children = (1..=n).filter(|&j| heads[j] == ROOT).count();
        if root_children <= 1 {
            return heads;
        }

        let mut best_heads = None;
        let mut best_total = f64::NEG_INFINITY;
        for root_child in 1..=n {
            let mut constrained = matrix.to_vec();
            for j in 1..=n {
                if j != root_child {
                    constrained[ROOT][j] = f64::NEG_INFINITY;
                }
            }
            let candidate = max_arborescence(&constrained);
            let total: f64 = (1..=n).map(|j| constrained[candidate[j]][j]).sum();
            if total > best_total {
                best_total = total;
                best_heads = Some(candidate);
            }
        }
        best_heads.expect("at least one constrained decode succeeds")
    }

    /// Dependency label for an attachment, from the model's rule table.
    /// Punctuation dependents are always labeled as such.
    fn label_for(&self, head: &TaggedToken, dependent: &TaggedToken) -> String {
        if matches!(dependent.tag.as_str(), "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-") {
            return PUNCT_LABEL.to_string();
        }
        let direction = if dependent.index() < head.index() { "L" } else { "R" };
        let key = format!(
            "{} {} {}",
            ParserModel::coarse_tag(&head.tag),
            ParserModel::coarse_tag(&dependent.tag),
            direction
        );
        self.model
            .labels
            .rules
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.model.labels.default_label.clone())
    }
}

/// Chu-Liu/Edmonds over a dense matrix.
///
/// `matrix[i][j]` is the score of the arc `i -> j`; node 0 is the root and
/// has no incoming arcs. Returns the chosen head per node (entry 0 is
/// unused). Heads are scanned in ascending order and replaced only on a
/// strictly greater score, so equal-scoring heads resolve to the smaller
/// index at every level of contraction.
fn max_arborescence(matrix: &[Vec<f64>]) -> Vec<usize> {
    let n = matrix.len();

    // Greedy best incoming arc per non-root node
    let mut heads = vec![usize::MAX; n];
    for j in 1..n {
        let mut best = f64::NEG_INFINITY;
        let mut arg = usize::MAX;
        for (i, row) in matrix.iter().enumerate() {
            if i != j && row[j] > best {
                best = row[j];
                arg = i;
            }
        }
        heads[j] = arg;
    }

    let Some(cycle) = find_cycle(&heads) else {
        return heads;
    };

    let in_cycle = vec_to_mask(n, &cycle);
    let cycle_score: f64 = cycle.iter().map(|&v| matrix[heads[v]][v]).sum();

    // Contract: kept nodes in ascending order (root stays id 0), the
    // super-node takes the last id.
    let kept: Vec<usize> = (0..n).filter(|&v| !in_cycle[v]).collect();
    let m = kept.len() + 1;
    let super_node = m - 1;

    let mut new_id = vec![usize::MAX; n];
    for (id, &old) in kept.iter().enumerate() {
        new_id[old] = id;
    }

    let mut contracted = vec![vec![f64::NEG_INFINITY; m]; m];
    // For each external node, the cycle member its entering arc attaches to
    let mut entry_point = vec![usize::MAX; m];
    // For each external node, the cycle member that heads its leaving arc
    let mut exit_point = vec![usize::MAX; m];

    for &a in &kept {
        for &b in &kept {
            if a != b {
                contracted[new_id[a]][new_id[b]] = matrix[a][b];
            }
        }

        // Arc from `a` into the contracted cycle: best entry adjusted by
        // the cost of breaking the cycle at that member.
        let mut best_in = f64::NEG_INFINITY;
        for &v in &cycle {
            if matrix[a][v].is_finite() {
                let adjusted = cycle_score + matrix[a][v] - matrix[heads[v]][v];
                if adjusted > best_in {
                    best_in = adjusted;
                    entry_point[new_id[a]] = v;
                }
            }
        }
        contracted[new_id[a]][super_node] = best_in;

        // Arc from the contracted cycle out to `a`: best leaving member
        let mut best_out = f64::NEG_INFINITY;
        for &v in &cycle {
            if matrix[v][a] > best_out {
                best_out = matrix[v][a];
                exit_point[new_id[a]] = v;
            }
        }
        contracted[super_node][new_id[a]] = best_out;
    }

    let contracted_heads = max_arborescence(&contracted);

    // Expand the contracted solution back to the original node ids
    let mut result = vec![usize::MAX; n];
    for (id, &old) in kept.iter().enumerate() {
        if id == ROOT {
            continue;
        }
        let head = contracted_heads[id];
        result[old] = if head == super_node {
            exit_point[id]
        } else {
            kept[head]
        };
    }

    // Cycle members keep their internal heads, except the entered member
    let super_head = contracted_heads[super_node];
    debug_assert!(super_head != super_node);
    let entered = entry_point[super_head];
    for &v in &cycle {
        result[v] = heads[v];
    }
    result[entered] = kept[super_head];

    result
}

/// Find a cycle in the head assignment, if any. Nodes are visited in
/// ascending order so the first cycle found is deterministic; the returned
/// member list starts from its smallest node.
fn find_cycle(heads: &[usize]) -> Option<Vec<usize>> {
    let n = heads.len();
    // 0 = unvisited, 1 = on current path, 2 = done
    let mut state = vec![0u8; n];
    state[ROOT] = 2;

    for start in 1..n {
        if state[start] != 0 {
            continue;
        }
        let mut path = Vec::new();
        let mut v = start;
        while state[v] == 0 {
            state[v] = 1;
            path.push(v);
            v = heads[v];
        }
        if state[v] == 1 {
            // walked into the current path: extract the cycle
            let pos = path.iter().position(|&p| p == v).expect("cycle entry on path");
            let mut cycle: Vec<usize> = path[pos..].to_vec();
            let min_pos = cycle
                .iter()
                .enumerate()
                .min_by_key(|(_, &node)| node)
                .map(|(i, _)| i)
                .expect("cycle is non-empty");
            cycle.rotate_left(min_pos);
            return Some(cycle);
        }
        for p in path {
            state[p] = 2;
        }
    }
    None
}

fn vec_to_mask(n: usize, nodes: &[usize]) -> Vec<bool> {
    let mut mask = vec![false; n];
    for &v in nodes {
        mask[v] = true;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Scorer, Tagger, Tokenizer};

    fn parse(text: &str) -> (Sentence, DependencyTree) {
        let model = Arc::new(ParserModel::builtin());
        let tokens = Tokenizer::new().tokenize(text);
        let sentence = Sentence::new(Tagger::new(model.clone()).tag(&tokens).unwrap());
        let scores = Scorer::new(model.clone()).score(&sentence).unwrap();
        let tree = Decoder::new(model).decode(&sentence, &scores).unwrap();
        (sentence, tree)
    }

    #[test]
    fn test_golden_the_cat_sleeps() {
        let (_, tree) = parse("The cat sleeps .");

        // sleeps is the root, cat its subject, The the determiner of cat
        assert_eq!(tree.root(), 2);
        assert_eq!(tree.head_of(1), Some(2));
        assert_eq!(tree.label_of(1), "nsubj");
        assert_eq!(tree.head_of(0), Some(1));
        assert_eq!(tree.label_of(0), "det");
        assert_eq!(tree.head_of(3), Some(2));
        assert_eq!(tree.label_of(3), "punct");
    }

    #[test]
    fn test_transitive_sentence() {
        let (_, tree) = parse("John eats pizza .");

        assert_eq!(tree.root(), 1);
        assert_eq!(tree.head_of(0), Some(1));
        assert_eq!(tree.label_of(0), "nsubj");
        assert_eq!(tree.head_of(2), Some(1));
        assert_eq!(tree.label_of(2), "dobj");
    }

    #[test]
    fn test_prepositional_attachment() {
        let (_, tree) = parse("John works at Microsoft .");

        assert_eq!(tree.root(), 1);
        assert_eq!(tree.head_of(2), Some(1)); // at <- works
        assert_eq!(tree.label_of(2), "prep");
        assert_eq!(tree.head_of(3), Some(2)); // Microsoft <- at
        assert_eq!(tree.label_of(3), "pobj");
    }

    #[test]
    fn test_single_token() {
        let (_, tree) = parse("Hello");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), 0);
        assert_eq!(tree.head_of(0), None);
        assert_eq!(tree.label_of(0), "root");
    }

    #[test]
    fn test_every_tree_is_well_formed() {
        let texts = [
            "The quick brown fox jumps over the lazy dog .",
            "She sees the small cat .",
            "Dogs and cats sleep .",
            "I like pizza",
            "a b c d e",
        ];
        for text in texts {
            let (sentence, tree) = parse(text);
            assert_eq!(tree.len(), sentence.len());

            // exactly one root-headed token
            let roots = (0..tree.len()).filter(|&i| tree.head_of(i).is_none()).count();
            assert_eq!(roots, 1, "text: {}", text);

            // every head chain reaches the root within n steps
            for i in 0..tree.len() {
                let path = tree.path_to_root(i);
                assert!(path.len() <= tree.len(), "text: {}", text);
                assert_eq!(*path.last().unwrap(), tree.root(), "text: {}", text);
            }
        }
    }

    #[test]
    fn test_rejects_non_finite_scores() {
        let model = Arc::new(ParserModel::builtin());
        let tokens = Tokenizer::new().tokenize("The cat sleeps .");
        let sentence = Sentence::new(Tagger::new(model.clone()).tag(&tokens).unwrap());
        let mut scores = Scorer::new(model.clone()).score(&sentence).unwrap();
        scores.set(Some(0), 1, f64::INFINITY);

        let err = Decoder::new(model).decode(&sentence, &scores).unwrap_err();
        assert!(matches!(err, ParseError::InvalidScore { .. }));
    }

    #[test]
    fn test_determinism() {
        let (_, a) = parse("The quick brown fox jumps over the lazy dog .");
        let (_, b) = parse("The quick brown fox jumps over the lazy dog .");
        assert_eq!(a, b);
    }

    // Direct algorithm tests on hand-built matrices

    fn matrix(rows: &[&[f64]]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    const NEG: f64 = f64::NEG_INFINITY;

    #[test]
    fn test_arborescence_no_cycle() {
        // root -> 1 -> 2
        let m = matrix(&[
            &[NEG, 10.0, 1.0],
            &[NEG, NEG, 9.0],
            &[NEG, 2.0, NEG],
        ]);
        let heads = max_arborescence(&m);
        assert_eq!(heads[1], 0);
        assert_eq!(heads[2], 1);
    }

    #[test]
    fn test_arborescence_breaks_cycle() {
        // 1 and 2 prefer each other; the best tree must break the cycle
        // through the root.
        let m = matrix(&[
            &[NEG, 5.0, 1.0],
            &[NEG, NEG, 10.0],
            &[NEG, 10.0, NEG],
        ]);
        let heads = max_arborescence(&m);
        // root -> 1 -> 2 (total 15) beats root -> 2 -> 1 (total 11)
        assert_eq!(heads[1], 0);
        assert_eq!(heads[2], 1);
    }

    #[test]
    fn test_arborescence_tie_prefers_smaller_head() {
        let m = matrix(&[
            &[NEG, 5.0, 3.0],
            &[NEG, NEG, 3.0],
            &[NEG, 5.0, NEG],
        ]);
        let heads = max_arborescence(&m);
        // node 2's candidates (root: 3.0, node 1: 3.0) tie; the smaller
        // head index wins
        assert_eq!(heads[2], 0);
    }

    #[test]
    fn test_arborescence_three_node_cycle() {
        let m = matrix(&[
            &[NEG, 4.0, 1.0, 1.0],
            &[NEG, NEG, 8.0, 1.0],
            &[NEG, 1.0, NEG, 8.0],
            &[NEG, 8.0, 1.0, NEG],
        ]);
        let heads = max_arborescence(&m);
        // greedy picks the 1->2->3->1 cycle; optimum enters at 1:
        // root -> 1 -> 2 -> 3, total 20
        assert_eq!(heads[1], 0);
        assert_eq!(heads[2], 1);
        assert_eq!(heads[3], 2);
    }
}
