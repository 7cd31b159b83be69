use std::collections::HashMap;

use beacon_core::config::RetrievalConfig;
use beacon_core::models::{Chunk, RetrievalContext};
use beacon_retrieval::search::rrf_fusion::fuse;
use beacon_retrieval::HybridRetriever;
use proptest::prelude::*;
use test_fixtures::{chunk, HashEmbedder, InMemorySearch};

const TENANTS: [&str; 3] = ["acme", "globex", "initech"];
const WORDS: [&str; 8] = ["ppo", "dental", "vision", "deductible", "claim", "leave", "plan", "hsa"];

fn arb_chunk(i: usize) -> impl Strategy<Value = Chunk> {
    (0usize..3, prop::collection::vec(0usize..8, 1..6)).prop_map(move |(t, words)| {
        let content: Vec<&str> = words.into_iter().map(|w| WORDS[w]).collect();
        chunk(&format!("c{i}"), &format!("d{i}"), TENANTS[t], 0, &content.join(" "))
    })
}

fn arb_corpus() -> impl Strategy<Value = Vec<Chunk>> {
    (1usize..25).prop_flat_map(|n| (0..n).map(arb_chunk).collect::<Vec<_>>())
}

fn ranked_list(ids: Vec<usize>) -> Vec<Chunk> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen.into_iter()
        .map(|i| chunk(&format!("c{i}"), &format!("d{i}"), "acme", 0, "x"))
        .collect()
}

proptest! {
    #[test]
    fn results_only_contain_the_requesting_tenant(
        corpus in arb_corpus(),
        tenant in 0usize..3,
        leaky in any::<bool>(),
        query_words in prop::collection::vec(0usize..8, 1..4),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let search = InMemorySearch::new(corpus);
        search.set_ignore_tenant(leaky);
        let embedder = HashEmbedder::new();
        let config = RetrievalConfig::default();
        let retriever = HybridRetriever::new(&search, &embedder, &config);
        let query: Vec<&str> = query_words.into_iter().map(|w| WORDS[w]).collect();
        let company = TENANTS[tenant];

        let outcome = rt.block_on(retriever.retrieve(&query.join(" "), &RetrievalContext::new(company, "p")));
        if let Ok(result) = outcome {
            prop_assert!(result.chunks.iter().all(|c| c.company_id == company));
        }
    }

    #[test]
    fn agreement_outranks_single_list_chunks(
        vector_ids in prop::collection::vec(0usize..20, 0..15),
        lexical_ids in prop::collection::vec(0usize..20, 0..15),
    ) {
        let vector = ranked_list(vector_ids);
        let lexical = ranked_list(lexical_ids);
        let fused = fuse(&vector, &lexical, 60);

        let position: HashMap<&str, usize> = fused
            .iter()
            .enumerate()
            .map(|(i, c)| (c.chunk.id.as_str(), i))
            .collect();
        let best_rank = |c: &beacon_retrieval::search::rrf_fusion::FusedCandidate| {
            c.scores.vector_rank.into_iter().chain(c.scores.lexical_rank).min().unwrap_or(usize::MAX)
        };

        for both in fused.iter().filter(|c| c.scores.in_both()) {
            for single in fused.iter().filter(|c| !c.scores.in_both()) {
                if best_rank(both) <= best_rank(single) {
                    prop_assert!(position[both.chunk.id.as_str()] < position[single.chunk.id.as_str()]);
                }
            }
        }

        for pair in fused.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
