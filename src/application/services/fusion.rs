use std::collections::HashMap;

use crate::domain::entities::{ChunkLocator, ScoredChunk, SearchHit, SourceMode};

/// RRF constant; dampens the weight of low ranks.
pub const RRF_K: f32 = 60.0;

/// Merges the lexical and semantic result lists with Reciprocal Rank Fusion.
///
/// Each result contributes `1 / (k + rank)` with 1-based ranks in its source
/// list; a result present in both lists sums both partial scores under its
/// locator identity. The merged list is sorted by combined score descending
/// and truncated to `limit`. The sort is stable, so ties keep insertion
/// order: lexical results are inserted before semantic ones.
pub fn reciprocal_rank_fusion(
    lexical: &[ScoredChunk],
    semantic: &[ScoredChunk],
    limit: usize,
) -> Vec<SearchHit> {
    struct Fused {
        chunk: ScoredChunk,
        score: f32,
        in_lexical: bool,
        in_semantic: bool,
    }

    let mut order: Vec<Fused> = Vec::with_capacity(lexical.len() + semantic.len());
    let mut index: HashMap<ChunkLocator, usize> = HashMap::new();

    let mut merge = |results: &[ScoredChunk], from_lexical: bool| {
        for (position, chunk) in results.iter().enumerate() {
            let rank = (position + 1) as f32;
            let partial = 1.0 / (RRF_K + rank);
            let locator = chunk.locator();

            match index.get(&locator) {
                Some(&slot) => {
                    let fused = &mut order[slot];
                    // The same locator twice in one list keeps its best rank.
                    if (from_lexical && fused.in_lexical)
                        || (!from_lexical && fused.in_semantic)
                    {
                        continue;
                    }
                    fused.score += partial;
                    fused.in_lexical |= from_lexical;
                    fused.in_semantic |= !from_lexical;
                }
                None => {
                    index.insert(locator, order.len());
                    order.push(Fused {
                        chunk: chunk.clone(),
                        score: partial,
                        in_lexical: from_lexical,
                        in_semantic: !from_lexical,
                    });
                }
            }
        }
    };

    merge(lexical, true);
    merge(semantic, false);

    let mut fused = order;
    // Stable: equal scores retain insertion order.
    fused.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    fused.truncate(limit);

    fused
        .into_iter()
        .map(|entry| {
            let source_mode = match (entry.in_lexical, entry.in_semantic) {
                (true, true) => SourceMode::Hybrid,
                (true, false) => SourceMode::Lexical,
                _ => SourceMode::Semantic,
            };
            SearchHit {
                document_id: entry.chunk.document_id,
                file_name: entry.chunk.file_name,
                chunk_index: entry.chunk.chunk_index,
                page_start: entry.chunk.page_start,
                page_end: entry.chunk.page_end,
                score: entry.score,
                source_mode,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(document_id: &str, chunk_index: i32, score: f32) -> ScoredChunk {
        ScoredChunk {
            document_id: document_id.to_string(),
            file_name: format!("{}.pdf", document_id),
            chunk_index,
            page_start: 1,
            page_end: 1,
            score,
        }
    }

    #[test]
    fn result_in_both_lists_sums_both_partial_scores() {
        // Lexical [A, B, C], semantic [B, D]: B collects 1/62 + 1/61 and must
        // outrank A's single 1/61.
        let lexical = vec![scored("a", 0, 9.0), scored("b", 0, 7.0), scored("c", 0, 5.0)];
        let semantic = vec![scored("b", 0, 0.9), scored("d", 0, 0.8)];

        let hits = reciprocal_rank_fusion(&lexical, &semantic, 10);

        assert_eq!(hits[0].document_id, "b");
        assert_eq!(hits[0].source_mode, SourceMode::Hybrid);

        let expected_b = 1.0 / (RRF_K + 2.0) + 1.0 / (RRF_K + 1.0);
        assert!((hits[0].score - expected_b).abs() < 1e-6);

        let a = hits.iter().find(|h| h.document_id == "a").unwrap();
        let expected_a = 1.0 / (RRF_K + 1.0);
        assert!((a.score - expected_a).abs() < 1e-6);
        assert!(hits[0].score > a.score);
    }

    #[test]
    fn symmetric_ranks_tie_and_keep_lexical_insertion_order() {
        // A at ranks (1, 2) and B at ranks (2, 1) score identically; the
        // stable sort keeps A first because lexical results insert first.
        let lexical = vec![scored("a", 0, 9.0), scored("b", 0, 7.0)];
        let semantic = vec![scored("b", 0, 0.9), scored("a", 0, 0.8)];

        let hits = reciprocal_rank_fusion(&lexical, &semantic, 10);

        assert_eq!(hits.len(), 2);
        assert!((hits[0].score - hits[1].score).abs() < 1e-6);
        assert_eq!(hits[0].document_id, "a");
        assert_eq!(hits[1].document_id, "b");
    }

    #[test]
    fn single_source_results_keep_their_source_mode() {
        let lexical = vec![scored("a", 0, 9.0)];
        let semantic = vec![scored("b", 0, 0.9)];

        let hits = reciprocal_rank_fusion(&lexical, &semantic, 10);

        let a = hits.iter().find(|h| h.document_id == "a").unwrap();
        let b = hits.iter().find(|h| h.document_id == "b").unwrap();
        assert_eq!(a.source_mode, SourceMode::Lexical);
        assert_eq!(b.source_mode, SourceMode::Semantic);
    }

    #[test]
    fn merged_list_is_truncated_to_limit() {
        let lexical: Vec<ScoredChunk> =
            (0..20).map(|i| scored("doc", i, 20.0 - i as f32)).collect();
        let semantic: Vec<ScoredChunk> =
            (20..40).map(|i| scored("doc", i, 40.0 - i as f32)).collect();

        let hits = reciprocal_rank_fusion(&lexical, &semantic, 5);
        assert_eq!(hits.len(), 5);
    }

    #[test]
    fn empty_inputs_fuse_to_empty() {
        assert!(reciprocal_rank_fusion(&[], &[], 10).is_empty());
    }

    #[test]
    fn duplicate_locator_within_one_list_keeps_best_rank() {
        let lexical = vec![scored("a", 0, 9.0), scored("a", 0, 8.0)];

        let hits = reciprocal_rank_fusion(&lexical, &[], 10);

        assert_eq!(hits.len(), 1);
        let expected = 1.0 / (RRF_K + 1.0);
        assert!((hits[0].score - expected).abs() < 1e-6);
    }

    #[test]
    fn fusion_is_deterministic() {
        let lexical = vec![scored("a", 0, 9.0), scored("b", 1, 7.0)];
        let semantic = vec![scored("b", 1, 0.9), scored("c", 2, 0.8)];

        let first = reciprocal_rank_fusion(&lexical, &semantic, 10);
        let second = reciprocal_rank_fusion(&lexical, &semantic, 10);
        assert_eq!(first, second);
    }
}
