use vsm_core::{answer, Error, Index, IndexBuilder};

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn fruit_index() -> Index {
    let mut builder = IndexBuilder::new();
    builder.ingest("beta", &toks(&["apple", "apple", "banana"]));
    builder.ingest("alpha", &toks(&["apple", "cherry"]));
    builder.ingest("gamma", &toks(&["banana", "banana", "cherry"]));
    builder.finalize().unwrap()
}

#[test]
fn empty_query_is_an_error() {
    let index = fruit_index();
    assert!(matches!(answer(&index, &[]), Err(Error::EmptyQuery)));
}

#[test]
fn out_of_corpus_query_yields_empty_ranking() {
    let index = fruit_index();
    let ranked = answer(&index, &toks(&["zeppelin"])).unwrap();
    assert!(ranked.is_empty());
}

#[test]
fn worked_example_query_dog() {
    let mut builder = IndexBuilder::new();
    builder.ingest("1", &toks(&["cat", "dog"]));
    builder.ingest("2", &toks(&["cat", "cat", "bird"]));
    let index = builder.finalize().unwrap();

    let ranked = answer(&index, &toks(&["dog"])).unwrap();
    // Only doc 1 contains "dog"; doc 2 never appears in the result.
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].doc_id, "1");
    assert!((ranked[0].score - 1.0).abs() < 1e-12);
}

#[test]
fn ranking_is_descending_by_cosine() {
    let index = fruit_index();
    // "apple" dominates beta (tf 1.0 against a short vector) more than alpha.
    let ranked = answer(&index, &toks(&["apple"])).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].doc_id, "beta");
    assert_eq!(ranked[1].doc_id, "alpha");
    assert!(ranked[0].score > ranked[1].score);

    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score, "ranking not descending");
    }
}

#[test]
fn ties_break_by_document_id_ascending() {
    let mut builder = IndexBuilder::new();
    builder.ingest("y", &toks(&["zebra"]));
    builder.ingest("x", &toks(&["zebra"]));
    builder.ingest("w", &toks(&["okapi"]));
    let index = builder.finalize().unwrap();

    // x and y are identical documents, so their cosines tie exactly.
    let ranked = answer(&index, &toks(&["zebra"])).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].doc_id, "x");
    assert_eq!(ranked[1].doc_id, "y");
    assert_eq!(ranked[0].score, ranked[1].score);
}

#[test]
fn no_zero_overlap_document_is_ranked() {
    let index = fruit_index();
    // beta shares no token with "cherry".
    let ranked = answer(&index, &toks(&["cherry"])).unwrap();
    assert!(ranked.iter().all(|hit| hit.doc_id != "beta"));
    assert_eq!(ranked.len(), 2);
}

#[test]
fn zero_idf_tokens_carry_no_weight() {
    let mut builder = IndexBuilder::new();
    builder.ingest("1", &toks(&["cat"]));
    builder.ingest("2", &toks(&["cat", "dog"]));
    let index = builder.finalize().unwrap();

    // "cat" appears everywhere, so its idf is zero; alone it is degenerate.
    let ranked = answer(&index, &toks(&["cat"])).unwrap();
    assert!(ranked.is_empty());

    // Mixed with a weighted token it neither errors nor drags doc 1 in.
    let ranked = answer(&index, &toks(&["cat", "dog"])).unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].doc_id, "2");
}

#[test]
fn repeated_query_tokens_normalize_by_query_maximum() {
    let mut builder = IndexBuilder::new();
    builder.ingest("1", &toks(&["dog"]));
    builder.ingest("2", &toks(&["bird"]));
    let index = builder.finalize().unwrap();

    // Scaling every query term frequency by the same factor cancels out of
    // the cosine, so repeating the whole query must not change scores.
    let once = answer(&index, &toks(&["dog", "bird"])).unwrap();
    let twice = answer(&index, &toks(&["dog", "bird", "dog", "bird"])).unwrap();
    assert_eq!(once.len(), twice.len());
    for (a, b) in once.iter().zip(twice.iter()) {
        assert_eq!(a.doc_id, b.doc_id);
        assert!((a.score - b.score).abs() < 1e-12);
    }
}

#[test]
fn cosine_of_identical_document_is_one() {
    let mut builder = IndexBuilder::new();
    builder.ingest("1", &toks(&["salt", "chloride"]));
    builder.ingest("2", &toks(&["membrane", "transport"]));
    let index = builder.finalize().unwrap();

    // Query equal to doc 1's token sequence: cosine with itself is 1.
    let ranked = answer(&index, &toks(&["salt", "chloride"])).unwrap();
    assert_eq!(ranked[0].doc_id, "1");
    assert!((ranked[0].score - 1.0).abs() < 1e-12);
}
