use crate::tokenizer::tokenize;
use crate::{DocId, SearchBundle, SearchDocument, TermId};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

/// A matched document and its cosine score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f32,
}

/// Read-only query front end over a loaded `SearchBundle`.
///
/// A searcher built with [`Searcher::unavailable`] answers every query with
/// an empty result so pages keep rendering when the index failed to load.
#[derive(Clone, Default)]
pub struct Searcher {
    bundle: Option<Arc<SearchBundle>>,
}

impl Searcher {
    pub fn new(bundle: SearchBundle) -> Self {
        Self { bundle: Some(Arc::new(bundle)) }
    }

    pub fn unavailable() -> Self { Self { bundle: None } }

    pub fn from_result(loaded: anyhow::Result<SearchBundle>) -> Self {
        match loaded {
            Ok(bundle) => Self::new(bundle),
            Err(err) => {
                tracing::warn!(error = %err, "search index unavailable, serving empty results");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool { self.bundle.is_some() }

    pub fn bundle(&self) -> Option<&SearchBundle> { self.bundle.as_deref() }

    /// Number of searchable documents; zero when unavailable.
    pub fn doc_count(&self) -> usize {
        self.bundle().map_or(0, |b| b.store().len())
    }

    /// Every document in store order.
    pub fn documents(&self) -> impl Iterator<Item = &SearchDocument> {
        self.bundle().into_iter().flat_map(|b| b.store().iter())
    }

    /// Documents matching `query`, best first.
    pub fn search(&self, query: &str) -> Vec<SearchDocument> {
        let Some(bundle) = self.bundle() else { return Vec::new() };
        self.hits(query)
            .into_iter()
            .filter_map(|hit| bundle.store().get(hit.doc_id).cloned())
            .collect()
    }

    /// Scored hits ordered by score descending, then doc id ascending.
    pub fn hits(&self, query: &str) -> Vec<SearchHit> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let Some(bundle) = self.bundle() else { return Vec::new() };
        let index = bundle.index();

        let mut tf_q_raw: HashMap<TermId, u32> = HashMap::new();
        for tok in tokenize(query) {
            match index.term(&tok.term) {
                Some(tid) => *tf_q_raw.entry(tid).or_insert(0) += 1,
                None => {
                    for tid in index.terms_with_prefix(&tok.term) {
                        *tf_q_raw.entry(tid).or_insert(0) += 1;
                    }
                }
            }
        }
        if tf_q_raw.is_empty() {
            tracing::debug!(query, "no query terms in dictionary");
            return Vec::new();
        }

        let mut q_weights: HashMap<TermId, f32> = tf_q_raw
            .into_iter()
            .map(|(tid, tf_raw)| {
                let tf = 1.0 + (tf_raw as f32).ln();
                (tid, tf * index.idf(tid))
            })
            .collect();
        let mut norm = q_weights.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm == 0.0 { norm = 1.0; }
        for w in q_weights.values_mut() { *w /= norm; }

        let mut scores: HashMap<DocId, f32> = HashMap::new();
        for (tid, q_w) in &q_weights {
            for p in index.postings(*tid) {
                *scores.entry(p.doc_id).or_insert(0.0) += p.weight * q_w;
            }
        }

        let mut hits: Vec<SearchHit> = scores.into_iter().map(|(doc_id, score)| SearchHit { doc_id, score }).collect();
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.doc_id.cmp(&b.doc_id))
        });
        tracing::debug!(query, total_hits = hits.len(), "search");
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_empty() {
        let s = Searcher::unavailable();
        assert!(s.search("anything").is_empty());
        assert_eq!(s.doc_count(), 0);
    }

    #[test]
    fn failed_load_degrades() {
        let s = Searcher::from_result(Err(anyhow::anyhow!("missing index.bin")));
        assert!(!s.is_available());
        assert!(s.search("rust").is_empty());
    }
}
