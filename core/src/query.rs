use crate::error::{Error, Result};
use crate::index::Index;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One ranked hit: a document id and its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDoc {
    pub doc_id: String,
    pub score: f64,
}

/// Rank documents against a tokenized query by cosine similarity in TF-IDF
/// space, most relevant first.
///
/// Tokens absent from the corpus are valid, zero-weighted query terms. A
/// query made entirely of such tokens has a zero-norm vector and yields an
/// empty ranking rather than a division error. Only documents sharing at
/// least one weighted token with the query are ranked.
///
/// Read-only over the index; callers may share it across threads freely.
pub fn answer(index: &Index, query_tokens: &[String]) -> Result<Vec<ScoredDoc>> {
    if query_tokens.is_empty() {
        return Err(Error::EmptyQuery);
    }

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for token in query_tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let max_q = f64::from(counts.values().copied().max().unwrap_or(1));

    let mut query_norm_sq = 0.0;
    let mut dot: HashMap<&str, f64> = HashMap::new();
    for (token, count) in &counts {
        let tf_q = f64::from(*count) / max_q;
        let idf = index.idf.get(*token).copied().unwrap_or(0.0);
        if idf == 0.0 {
            // Contributes nothing to the query norm or to any document's
            // score; touching its postings would only drag in documents at
            // score zero (and a document whose every term has idf zero has
            // norm zero, which must never reach the division below).
            continue;
        }
        let weight = tf_q * idf;
        query_norm_sq += weight * weight;

        if let Some(posting) = index.tf.get(*token) {
            for (doc_id, tf_doc) in posting {
                // Inner product term (tf_q*idf) * (tf_doc*idf).
                *dot.entry(doc_id.as_str()).or_insert(0.0) += weight * idf * tf_doc;
            }
        }
    }

    let query_norm = query_norm_sq.sqrt();
    if query_norm == 0.0 {
        // Degenerate query: nothing it contains exists in the corpus.
        return Ok(Vec::new());
    }

    let mut ranked = Vec::with_capacity(dot.len());
    for (doc_id, inner) in dot {
        let Some(&length) = index.documents_length.get(doc_id) else {
            return Err(Error::MalformedIndex {
                reason: format!("document {doc_id} has postings but no length"),
            });
        };
        ranked.push(ScoredDoc { doc_id: doc_id.to_string(), score: inner / (query_norm * length) });
    }

    // Descending by cosine; ties broken by doc id ascending for determinism.
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });

    Ok(ranked)
}
