use crate::tokenizer::tokenize;
use crate::{DocId, DocumentStore, IdfMode, Posting, SearchBundle, SearchDocument, SearchIndex, TermId};
use anyhow::{bail, Result};
use std::collections::HashMap;

/// Title and tag terms count this many times per occurrence.
pub const HEADLINE_BOOST: u32 = 2;

/// Accumulates documents and produces a normalized tf-idf `SearchBundle`.
#[derive(Default)]
pub struct IndexBuilder {
    store: DocumentStore,
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    postings_raw: Vec<Vec<(DocId, u32)>>,
    idf_mode: IdfMode,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn idf_mode(mut self, mode: IdfMode) -> Self {
        self.idf_mode = mode;
        self
    }

    pub fn len(&self) -> usize { self.store.len() }

    pub fn is_empty(&self) -> bool { self.store.is_empty() }

    /// Index `doc`; `body` is searchable text that is not kept in the store.
    pub fn add(&mut self, doc: SearchDocument, body: &str) -> Result<DocId> {
        if self.store.contains_url(&doc.url) {
            bail!("duplicate document url {:?}", doc.url);
        }

        let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
        let headline = format!("{} {}", doc.title, doc.tags.join(" "));
        for tok in tokenize(&headline) {
            *tf_counts.entry(self.term_id(tok.term)).or_insert(0) += HEADLINE_BOOST;
        }
        let text = format!("{} {} {}", doc.description.as_deref().unwrap_or(""), doc.excerpt, body);
        for tok in tokenize(&text) {
            *tf_counts.entry(self.term_id(tok.term)).or_insert(0) += 1;
        }

        let doc_id = self.store.push(doc);
        for (tid, tf_raw) in tf_counts {
            self.df[tid as usize] += 1;
            self.postings_raw[tid as usize].push((doc_id, tf_raw));
        }
        Ok(doc_id)
    }

    fn term_id(&mut self, term: String) -> TermId {
        let next = self.dictionary.len() as TermId;
        let tid = *self.dictionary.entry(term).or_insert(next);
        if tid == next {
            self.df.push(0);
            self.postings_raw.push(Vec::new());
        }
        tid
    }

    pub fn finish(self) -> Result<SearchBundle> {
        let num_docs = self.store.len() as u32;

        // First pass: tf-idf per posting and per-document norms
        let mut doc_norms = vec![0.0f32; num_docs as usize];
        let mut weighted: Vec<Vec<(DocId, f32)>> = Vec::with_capacity(self.postings_raw.len());
        for (tid, plist) in self.postings_raw.into_iter().enumerate() {
            let idf = self.idf_mode.idf(num_docs, self.df[tid]);
            let list = plist
                .into_iter()
                .map(|(doc_id, tf_raw)| {
                    let tf = if tf_raw > 0 { 1.0 + (tf_raw as f32).ln() } else { 0.0 };
                    let tfidf = tf * idf;
                    doc_norms[doc_id as usize] += tfidf * tfidf;
                    (doc_id, tfidf)
                })
                .collect();
            weighted.push(list);
        }
        for dn in doc_norms.iter_mut() {
            *dn = dn.sqrt();
            if *dn == 0.0 { *dn = 1.0; }
        }

        // Second pass: normalize
        let postings = weighted
            .into_iter()
            .map(|list| {
                let mut out: Vec<Posting> = list
                    .into_iter()
                    .map(|(doc_id, tfidf)| Posting { doc_id, weight: tfidf / doc_norms[doc_id as usize] })
                    .collect();
                out.sort_by_key(|p| p.doc_id);
                out
            })
            .collect();

        let index = SearchIndex { dictionary: self.dictionary, df: self.df, postings, num_docs, idf_mode: self.idf_mode };
        tracing::debug!(num_docs, num_terms = index.dictionary.len(), "built search index");
        SearchBundle::new(index, self.store)
    }
}
