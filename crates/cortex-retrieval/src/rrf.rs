//! Reciprocal Rank Fusion: `score(id) = w_v/(C+rank_v) + w_l/(C+rank_l)`.
//!
//! Combines two ranked lists into one without needing to normalize
//! BM25 and cosine-similarity scores onto a common scale.

use std::collections::HashMap;

/// A fused candidate with per-source rank provenance, used both for
/// scoring and for the deterministic tie-break chain (§4.3).
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    pub id: String,
    pub score: f64,
    pub vector_rank: Option<usize>,
    pub lexical_rank: Option<usize>,
}

/// `vector_ranked`/`lexical_ranked` are 0-indexed `(id, raw_score)` pairs in
/// descending-relevance order, as returned by `IMemoryStorage`. Rank used in
/// the RRF formula is 1-indexed position within each list.
pub fn fuse(
    vector_ranked: &[(String, f64)],
    lexical_ranked: &[(String, f64)],
    c: f64,
    weight_vector: f64,
    weight_lexical: f64,
) -> Vec<FusedCandidate> {
    let mut vector_ranks: HashMap<&str, usize> = HashMap::new();
    for (i, (id, _)) in vector_ranked.iter().enumerate() {
        vector_ranks.insert(id.as_str(), i + 1);
    }
    let mut lexical_ranks: HashMap<&str, usize> = HashMap::new();
    for (i, (id, _)) in lexical_ranked.iter().enumerate() {
        lexical_ranks.insert(id.as_str(), i + 1);
    }

    let mut ids: Vec<&str> = vector_ranks.keys().copied().collect();
    for id in lexical_ranks.keys() {
        if !vector_ranks.contains_key(id) {
            ids.push(id);
        }
    }

    let mut candidates: Vec<FusedCandidate> = ids
        .into_iter()
        .map(|id| {
            let vr = vector_ranks.get(id).copied();
            let lr = lexical_ranks.get(id).copied();
            let v_term = vr.map(|r| weight_vector / (c + r as f64)).unwrap_or(0.0);
            let l_term = lr.map(|r| weight_lexical / (c + r as f64)).unwrap_or(0.0);
            FusedCandidate {
                id: id.to_string(),
                score: v_term + l_term,
                vector_rank: vr,
                lexical_rank: lr,
            }
        })
        .collect();

    candidates
}

/// Sort by the full deterministic chain from §4.3: score desc, vector_rank
/// asc (missing = worst), lexical_rank asc (missing = worst), `created_at`
/// desc, id asc. `created_at_of` looks up an entry's timestamp by id; a
/// missing lookup sorts as oldest.
pub fn sort_deterministic<F>(candidates: &mut [FusedCandidate], created_at_of: F)
where
    F: Fn(&str) -> chrono::DateTime<chrono::Utc>,
{
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| rank_or_worst(a.vector_rank).cmp(&rank_or_worst(b.vector_rank)))
            .then_with(|| rank_or_worst(a.lexical_rank).cmp(&rank_or_worst(b.lexical_rank)))
            .then_with(|| created_at_of(&b.id).cmp(&created_at_of(&a.id)))
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn rank_or_worst(rank: Option<usize>) -> usize {
    rank.unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_in_both_lists_outranks_single_list_entry() {
        let vector = vec![("a".to_string(), 0.9), ("b".to_string(), 0.8)];
        let lexical = vec![("a".to_string(), 5.0), ("c".to_string(), 4.0)];
        let mut fused = fuse(&vector, &lexical, 60.0, 1.0, 0.7);
        sort_deterministic(&mut fused, |_| chrono::Utc::now());
        assert_eq!(fused[0].id, "a");
    }

    #[test]
    fn ties_break_by_vector_rank_then_lexical_rank_then_id() {
        // "x" and "y" both appear only in lexical at rank 1 -> identical score.
        let vector: Vec<(String, f64)> = vec![];
        let lexical = vec![("y".to_string(), 1.0), ("x".to_string(), 1.0)];
        let mut fused = fuse(&vector, &lexical, 60.0, 1.0, 0.7);
        sort_deterministic(&mut fused, |_| chrono::Utc::now());
        // Both rank 1 in lexical (first position wins ties via id only if
        // lexical_rank differs). Here "y" got lexical_rank 1, "x" got 2.
        assert_eq!(fused[0].id, "y");
    }

    #[test]
    fn deterministic_across_repeated_runs() {
        let vector = vec![("a".to_string(), 0.5), ("b".to_string(), 0.4)];
        let lexical = vec![("b".to_string(), 2.0), ("a".to_string(), 1.0)];
        let first = {
            let mut f = fuse(&vector, &lexical, 60.0, 1.0, 0.7);
            sort_deterministic(&mut f, |_| chrono::Utc::now());
            f.into_iter().map(|c| c.id).collect::<Vec<_>>()
        };
        let second = {
            let mut f = fuse(&vector, &lexical, 60.0, 1.0, 0.7);
            sort_deterministic(&mut f, |_| chrono::Utc::now());
            f.into_iter().map(|c| c.id).collect::<Vec<_>>()
        };
        assert_eq!(first, second);
    }

    proptest::proptest! {
        /// Fusion never drops or duplicates an id: the fused set is exactly
        /// the union of the two input lists' ids.
        #[test]
        fn fuse_preserves_id_union(
            vector in proptest::collection::vec((0u32..12, 0.0f64..1.0), 0..10),
            lexical in proptest::collection::vec((0u32..12, 0.0f64..10.0), 0..10),
        ) {
            let vector: Vec<(String, f64)> = vector.into_iter().map(|(id, s)| (id.to_string(), s)).collect();
            let lexical: Vec<(String, f64)> = lexical.into_iter().map(|(id, s)| (id.to_string(), s)).collect();

            let mut expected: std::collections::BTreeSet<String> =
                vector.iter().map(|(id, _)| id.clone()).collect();
            expected.extend(lexical.iter().map(|(id, _)| id.clone()));

            let fused = fuse(&vector, &lexical, 60.0, 1.0, 0.7);
            let actual: std::collections::BTreeSet<String> = fused.into_iter().map(|c| c.id).collect();
            proptest::prop_assert_eq!(actual, expected);
        }

        /// Re-sorting an already-sorted candidate list is a no-op: the
        /// ordering is a stable total order over (score, ranks, id).
        #[test]
        fn sort_deterministic_is_idempotent(
            vector in proptest::collection::vec((0u32..8, 0.0f64..1.0), 0..8),
            lexical in proptest::collection::vec((0u32..8, 0.0f64..10.0), 0..8),
        ) {
            let vector: Vec<(String, f64)> = vector.into_iter().map(|(id, s)| (id.to_string(), s)).collect();
            let lexical: Vec<(String, f64)> = lexical.into_iter().map(|(id, s)| (id.to_string(), s)).collect();

            let mut fused = fuse(&vector, &lexical, 60.0, 1.0, 0.7);
            sort_deterministic(&mut fused, |_| chrono::Utc::now());
            let once: Vec<String> = fused.iter().map(|c| c.id.clone()).collect();

            sort_deterministic(&mut fused, |_| chrono::Utc::now());
            let twice: Vec<String> = fused.iter().map(|c| c.id.clone()).collect();

            proptest::prop_assert_eq!(once, twice);
        }
    }
}
