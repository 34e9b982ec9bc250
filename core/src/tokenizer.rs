use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    // Same list the browser-side index filters, so queries and posts agree.
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","able","about","across","after","all","almost","also","am","among","an","and","any","are","as","at",
            "be","because","been","but","by",
            "can","cannot","could",
            "dear","did","do","does",
            "either","else","ever","every",
            "for","from",
            "get","got",
            "had","has","have","he","her","hers","him","his","how","however",
            "i","if","in","into","is","it","its",
            "just","least","let","like","likely",
            "may","me","might","most","must","my",
            "neither","no","nor","not",
            "of","off","often","on","only","or","other","our","own",
            "rather","said","say","says","she","should","since","so","some",
            "than","that","the","their","them","then","there","these","they","this","tis","to","too","twas",
            "us","wants","was","we","were","what","when","where","which","while","who","whom","why","will","with","would",
            "yet","you","your"
        ];
        words.iter().copied().collect()
    };
}

/// A stemmed term and the ordinal of the word it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    pub position: usize,
}

fn is_stopword(word: &str) -> bool { STOPWORDS.contains(word) }

/// NFKC-normalize, lowercase, drop stop words, and stem.
pub fn tokenize(text: &str) -> Vec<Token> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    WORD.find_iter(&normalized)
        .enumerate()
        .filter_map(|(position, m)| {
            let word = m.as_str().trim_end_matches('\'');
            if word.is_empty() || is_stopword(word) {
                return None;
            }
            let word = word.strip_suffix("'s").unwrap_or(word);
            Some(Token { term: STEMMER.stem(word).into_owned(), position })
        })
        .collect()
}

/// Terms only, in order, duplicates kept.
pub fn terms(text: &str) -> Vec<String> {
    tokenize(text).into_iter().map(|t| t.term).collect()
}
