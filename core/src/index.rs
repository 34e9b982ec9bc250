use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

/// Pixel dimensions of an image already resized by the content pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedImage {
    pub src: String,
    #[serde(default, rename = "srcSet")]
    pub src_set: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Inline low-resolution placeholder shown while `src` loads.
    #[serde(default)]
    pub base64: Option<String>,
}

/// A post cover is either a plain URL or a processed fixed-size image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoverImage {
    Url(String),
    Processed(FixedImage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub cover: Option<CoverImage>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SearchDocument {
    /// The description when present and non-empty, else the excerpt.
    pub fn summary_text(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => &self.excerpt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: f32, // normalized tf-idf weight
}

/// How inverse document frequency is computed. Both forms stay positive
/// when a term occurs in every document, so such terms still rank by tf.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdfMode {
    /// ln(1 + (N - df + 0.5) / (df + 0.5))
    #[default]
    Probabilistic,
    /// ln(1 + N / df)
    Smoothed,
}

impl IdfMode {
    pub fn idf(self, num_docs: u32, df: u32) -> f32 {
        let n = num_docs as f32;
        let df = df.min(num_docs) as f32;
        match self {
            IdfMode::Probabilistic => (1.0 + (n - df + 0.5) / (df + 0.5)).ln(),
            IdfMode::Smoothed => (1.0 + n / df.max(1.0)).ln(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchIndex {
    pub dictionary: HashMap<String, TermId>,
    pub df: Vec<u32>,
    /// Indexed by term id; each list sorted by doc_id.
    pub postings: Vec<Vec<Posting>>,
    pub num_docs: u32,
    pub idf_mode: IdfMode,
}

impl SearchIndex {
    pub fn new() -> Self { Self::default() }

    pub fn term(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    pub fn postings(&self, term_id: TermId) -> &[Posting] {
        self.postings.get(term_id as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn doc_freq(&self, term_id: TermId) -> u32 {
        self.df.get(term_id as usize).copied().unwrap_or(0)
    }

    /// Inverse document frequency of `term_id` under this index's mode.
    pub fn idf(&self, term_id: TermId) -> f32 {
        self.idf_mode.idf(self.num_docs, self.doc_freq(term_id))
    }

    /// Dictionary terms starting with `prefix`, excluding `prefix` itself.
    pub fn terms_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = TermId> + 'a {
        self.dictionary
            .iter()
            .filter(move |(t, _)| t.len() > prefix.len() && t.starts_with(prefix))
            .map(|(_, &tid)| tid)
    }
}

/// Documents in insertion order; a document's position is its `DocId`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<SearchDocument>", into = "Vec<SearchDocument>")]
pub struct DocumentStore {
    docs: Vec<SearchDocument>,
    by_url: HashMap<String, DocId>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    pub fn from_docs(docs: Vec<SearchDocument>) -> Self {
        let mut store = Self { docs, by_url: HashMap::new() };
        store.reindex();
        store
    }

    /// Appends a document and returns its id.
    pub fn push(&mut self, doc: SearchDocument) -> DocId {
        let id = self.docs.len() as DocId;
        self.by_url.insert(doc.url.clone(), id);
        self.docs.push(doc);
        id
    }

    pub fn get(&self, id: DocId) -> Option<&SearchDocument> {
        self.docs.get(id as usize)
    }

    pub fn by_url(&self, url: &str) -> Option<&SearchDocument> {
        self.by_url.get(url).and_then(|&id| self.get(id))
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.by_url.contains_key(url)
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &SearchDocument> {
        self.docs.iter()
    }

    fn reindex(&mut self) {
        self.by_url = self
            .docs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.url.clone(), i as DocId))
            .collect();
    }
}

impl From<Vec<SearchDocument>> for DocumentStore {
    fn from(docs: Vec<SearchDocument>) -> Self { Self::from_docs(docs) }
}

impl From<DocumentStore> for Vec<SearchDocument> {
    fn from(store: DocumentStore) -> Self { store.docs }
}

/// The index and the store it points into, always handled as one unit.
#[derive(Debug, Clone)]
pub struct SearchBundle {
    index: SearchIndex,
    store: DocumentStore,
}

impl SearchBundle {
    /// Pairs an index with its store, rejecting any pair that disagrees.
    pub fn new(index: SearchIndex, store: DocumentStore) -> Result<Self> {
        ensure!(
            index.num_docs as usize == store.len(),
            "index covers {} documents but store holds {}",
            index.num_docs,
            store.len()
        );
        ensure!(
            index.df.len() == index.dictionary.len() && index.postings.len() == index.dictionary.len(),
            "dictionary has {} terms but df has {} and postings {}",
            index.dictionary.len(),
            index.df.len(),
            index.postings.len()
        );
        for (term, &tid) in &index.dictionary {
            ensure!((tid as usize) < index.postings.len(), "term {term:?} has out-of-range id {tid}");
        }
        for (tid, list) in index.postings.iter().enumerate() {
            for p in list {
                ensure!(
                    store.get(p.doc_id).is_some(),
                    "postings for term {tid} reference missing document {}",
                    p.doc_id
                );
            }
        }
        ensure!(store.by_url.len() == store.len(), "document urls are not unique");
        Ok(Self { index, store })
    }

    pub fn index(&self) -> &SearchIndex { &self.index }

    pub fn store(&self) -> &DocumentStore { &self.store }
}
