//! Search index, result shaping and layout decisions for the folio blog.
//!
//! The indexer writes a [`SearchBundle`] with [`persist::save_bundle`]; the
//! server loads it once with [`persist::load_bundle`] and answers queries
//! through a [`search::Searcher`].

pub mod builder;
pub mod cardinal;
pub mod compose;
pub mod display;
pub mod index;
pub mod nav;
pub mod persist;
pub mod search;
pub mod slug;
pub mod tokenizer;

pub use index::{
    CoverImage, DocId, DocumentStore, FixedImage, IdfMode, Posting, SearchBundle, SearchDocument, SearchIndex, TermId,
};
