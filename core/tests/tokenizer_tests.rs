use folio_core::tokenizer::{terms, tokenize};

#[test]
fn it_normalizes_and_stems() {
    let words = terms("Running Runners RUN! Ｒｅａｃｔ hooks");
    assert!(words.contains(&"run".to_string()));
    // NFKC folds full-width letters
    assert!(words.contains(&"react".to_string()));
    assert!(words.contains(&"hook".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = terms("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox".to_string()));
}

#[test]
fn possessives_match_the_bare_word() {
    assert_eq!(terms("Gatsby's"), terms("Gatsby"));
}

#[test]
fn positions_count_dropped_words() {
    let toks = tokenize("a tour of the borrow checker");
    let positions: Vec<usize> = toks.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 4, 5]);
}
