use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Raw per-token accumulation state, only meaningful while building.
#[derive(Debug, Default)]
struct RawPosting {
    /// Number of distinct documents containing the token.
    df: u32,
    /// Document id -> raw occurrence count.
    tf: HashMap<String, u32>,
}

/// A finalized TF-IDF index over a static corpus snapshot. Immutable once
/// built; queries only read it.
///
/// The field names are the persisted representation: serializing this value
/// yields the on-disk index. `BTreeMap` keys give deterministic ordering, so
/// building the same corpus twice persists byte-identical files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Token -> document id -> normalized term frequency in (0, 1].
    pub tf: BTreeMap<String, BTreeMap<String, f64>>,
    /// Token -> log2(num_documents / document frequency).
    pub idf: BTreeMap<String, f64>,
    /// Document id -> Euclidean norm of the document's TF-IDF weight vector.
    pub documents_length: BTreeMap<String, f64>,
    /// Total document count, fixed at build time.
    pub num_documents: u32,
}

/// Accumulates a corpus one document at a time and finalizes it into an
/// [`Index`].
///
/// Each `ingest` call must carry a whole document: normalized term
/// frequencies divide by the document's maximum token occurrence count, which
/// has to span the entire document. Document ids are opaque strings and must
/// be unique within a corpus.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    postings: HashMap<String, RawPosting>,
    /// Document id -> running maximum raw occurrence count of any token.
    max_occurrences: HashMap<String, u32>,
    num_documents: u32,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one whole document's token sequence.
    pub fn ingest(&mut self, doc_id: &str, tokens: &[String]) {
        self.num_documents += 1;
        // Record the document even when it has no tokens, so an all-stopword
        // document still appears in documents_length (with norm zero).
        let max_occurrences = self.max_occurrences.entry(doc_id.to_string()).or_insert(0);

        for token in tokens {
            let posting = self.postings.entry(token.clone()).or_default();
            let count = posting.tf.entry(doc_id.to_string()).or_insert(0);
            if *count == 0 {
                posting.df += 1;
            }
            *count += 1;
            *max_occurrences = (*max_occurrences).max(*count);
        }

        tracing::debug!(doc_id, tokens = tokens.len(), "ingested document");
    }

    /// Derive idf scores, normalize term frequencies, and compute document
    /// vector norms, producing the immutable index.
    ///
    /// Runs in three strict corpus-wide phases: postings are final on entry
    /// (the builder is consumed); idf is derived from the final document
    /// frequencies; only then are frequencies normalized and lengths
    /// accumulated from the final idf.
    pub fn finalize(self) -> Result<Index> {
        let IndexBuilder { postings, max_occurrences, num_documents } = self;
        if num_documents == 0 {
            return Err(Error::EmptyCorpus);
        }

        let n = f64::from(num_documents);
        // df >= 1 by construction: every posting was created by a document.
        let idf: BTreeMap<String, f64> = postings
            .iter()
            .map(|(token, posting)| (token.clone(), (n / f64::from(posting.df)).log2()))
            .collect();

        let mut documents_length: BTreeMap<String, f64> =
            max_occurrences.keys().map(|doc_id| (doc_id.clone(), 0.0)).collect();

        let mut tf: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (token, posting) in postings {
            let idf_score = idf[&token];
            let mut normalized: BTreeMap<String, f64> = BTreeMap::new();
            for (doc_id, raw_count) in posting.tf {
                // max_occurrences >= 1 for any document that produced a posting.
                let tf_normalized = f64::from(raw_count) / f64::from(max_occurrences[&doc_id]);
                let weight = idf_score * tf_normalized;
                *documents_length.get_mut(&doc_id).expect("doc recorded at ingest") +=
                    weight * weight;
                normalized.insert(doc_id, tf_normalized);
            }
            tf.insert(token, normalized);
        }

        for length in documents_length.values_mut() {
            *length = length.sqrt();
        }

        tracing::info!(num_documents, num_terms = tf.len(), "finalized index");
        Ok(Index { tf, idf, documents_length, num_documents })
    }
}
