use super::*;

const BASE: [u64; 3] = [12, 34, 56];
// One digit away from BASE: "123457" vs "123456".
const NEAR: [u64; 3] = [57, 34, 12];
const FAR: [u64; 3] = [7, 8, 9];

fn corpus(cfg: MatchConfig) -> Matcher {
    let mut matcher = Matcher::new(cfg).expect("valid config");
    matcher.insert("base.c", &BASE).unwrap();
    matcher.insert("far.c", &FAR).unwrap();
    matcher.insert("near.c", &NEAR).unwrap();
    matcher
}

#[test]
fn render_symbols_sorts_then_concatenates() {
    assert_eq!(render_symbols(&[]), "");
    assert_eq!(render_symbols(&[3, 1, 2]), "123");
    assert_eq!(render_symbols(&[4_294_967_295, 0]), "04294967295");
}

#[test]
fn identical_fingerprints_score_one() {
    assert_eq!(similarity(&BASE, &BASE), 1.0);
    assert_eq!(similarity_with(&BASE, &BASE, SymbolMode::Hashes), 1.0);
}

#[test]
fn empty_fingerprint_conventions() {
    assert_eq!(similarity(&[], &[]), 1.0);
    assert_eq!(similarity(&[], &BASE), 0.0);
    assert_eq!(similarity_with(&BASE, &[], SymbolMode::Hashes), 0.0);
    assert_eq!(similarity_with(&[], &[], SymbolMode::Hashes), 1.0);
}

#[test]
fn order_of_values_is_ignored() {
    let shuffled = [56, 12, 34];
    assert_eq!(similarity(&BASE, &shuffled), 1.0);
    assert_eq!(similarity(&NEAR, &BASE), similarity(&[12, 34, 57], &[12, 34, 56]));
}

#[test]
fn digits_mode_credits_partial_numbers() {
    let digits = similarity_with(&BASE, &NEAR, SymbolMode::Digits);
    let hashes = similarity_with(&BASE, &NEAR, SymbolMode::Hashes);
    assert!((digits - 10.0 / 12.0).abs() < 1e-12);
    assert!((hashes - 4.0 / 6.0).abs() < 1e-12);
    assert_eq!(similarity(&BASE, &FAR), 0.0);
}

#[test]
fn similarity_is_symmetric() {
    let samples: [&[u64]; 6] = [
        &BASE,
        &NEAR,
        &FAR,
        &[],
        &[1_234_567, 7_654_321, 1_122_334_455],
        &[90_909, 11, 2_024_101_800, 42, 42],
    ];
    for mode in [SymbolMode::Digits, SymbolMode::Hashes] {
        for a in samples {
            for b in samples {
                assert_eq!(similarity_with(a, b, mode), similarity_with(b, a, mode));
            }
        }
    }
}

#[test]
fn threshold_is_inclusive() {
    assert!(is_similar(0.8, 0.8));
    assert!(is_similar(1.0, 0.8));
    assert!(!is_similar(0.799, 0.8));
}

#[test]
fn invalid_config_rejected_on_construction() {
    let err = Matcher::new(MatchConfig::new().with_threshold(2.0)).unwrap_err();
    assert!(matches!(err, MatchError::InvalidConfig(_)));
}

#[test]
fn duplicate_ids_rejected() {
    let mut matcher = corpus(MatchConfig::default());
    let err = matcher.insert("base.c", &FAR).unwrap_err();
    assert_eq!(err, MatchError::DuplicateDocument("base.c".into()));
    assert_eq!(matcher.len(), 3);
}

#[test]
fn unknown_ids_reported() {
    let matcher = corpus(MatchConfig::default());
    assert_eq!(
        matcher.score("base.c", "missing.c"),
        Err(MatchError::UnknownDocument("missing.c".into()))
    );
    assert!(matcher.similar_to("missing.c").is_err());
}

#[test]
fn corpus_accessors() {
    let matcher = corpus(MatchConfig::default());
    assert_eq!(matcher.len(), 3);
    assert!(!matcher.is_empty());
    assert!(matcher.contains("far.c"));
    assert!(!matcher.contains("other.c"));
    assert_eq!(matcher.doc_ids().collect::<Vec<_>>(), ["base.c", "far.c", "near.c"]);
}

#[test]
fn score_matches_free_function() {
    let matcher = corpus(MatchConfig::default());
    assert_eq!(matcher.score("base.c", "near.c").unwrap(), similarity(&BASE, &NEAR));
    assert_eq!(matcher.score("near.c", "base.c").unwrap(), similarity(&NEAR, &BASE));
    assert_eq!(matcher.score("base.c", "base.c").unwrap(), 1.0);

    let matcher = corpus(MatchConfig::new().with_symbols(SymbolMode::Hashes));
    assert_eq!(
        matcher.score("base.c", "near.c").unwrap(),
        similarity_with(&BASE, &NEAR, SymbolMode::Hashes)
    );
}

#[test]
fn all_pairs_is_upper_triangle_in_order() {
    let matcher = corpus(MatchConfig::default());
    let pairs: Vec<(String, String)> = matcher
        .all_pairs()
        .into_iter()
        .map(|p| (p.left, p.right))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("base.c".to_string(), "far.c".to_string()),
            ("base.c".to_string(), "near.c".to_string()),
            ("far.c".to_string(), "near.c".to_string()),
        ]
    );
}

#[test]
fn parallel_and_sequential_agree() {
    let mut par = Matcher::new(MatchConfig::default()).unwrap();
    let mut seq = Matcher::new(MatchConfig::new().with_parallel(false)).unwrap();
    for i in 0..25u64 {
        let fp: Vec<u64> = (0..12).map(|j| (i * 7919 + j * 104_729) % 1000).collect();
        par.insert(format!("doc{i}"), &fp).unwrap();
        seq.insert(format!("doc{i}"), &fp).unwrap();
    }
    assert_eq!(par.all_pairs(), seq.all_pairs());
    assert_eq!(par.report(), seq.report());
    assert_eq!(par.all_pairs().len(), 25 * 24 / 2);
}

#[test]
fn similar_pairs_filtered_by_threshold() {
    let matcher = corpus(MatchConfig::default());
    let pairs = matcher.similar_pairs();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].left, "base.c");
    assert_eq!(pairs[0].right, "near.c");
    assert!(pairs[0].score >= 0.8);

    // Whole-hash comparison is stricter for the same pair.
    let strict = corpus(MatchConfig::new().with_symbols(SymbolMode::Hashes));
    assert!(strict.similar_pairs().is_empty());

    let everything = corpus(MatchConfig::new().with_threshold(0.0));
    assert_eq!(everything.similar_pairs().len(), 3);
}

#[test]
fn similar_to_lists_neighbours() {
    let matcher = corpus(MatchConfig::default());
    let near = matcher.similar_to("near.c").unwrap();
    assert_eq!(near.len(), 1);
    assert_eq!(near[0].left, "near.c");
    assert_eq!(near[0].right, "base.c");
    assert!(matcher.similar_to("far.c").unwrap().is_empty());
}

#[test]
fn report_has_row_per_document() {
    let matcher = corpus(MatchConfig::default());
    let report = matcher.report();
    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.rows[0].doc_id, "base.c");
    assert_eq!(report.rows[0].similar, vec!["near.c".to_string()]);
    assert!(report.rows[1].similar.is_empty());
    assert_eq!(report.rows[2].similar, vec!["base.c".to_string()]);
}

#[test]
fn report_rows_follow_insertion_order() {
    let mut matcher = Matcher::new(MatchConfig::default()).unwrap();
    for id in ["c", "a", "b"] {
        matcher.insert(id, &BASE).unwrap();
    }
    let report = matcher.report();
    let ids: Vec<&str> = report.rows.iter().map(|r| r.doc_id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);
    assert_eq!(report.rows[1].similar, vec!["c".to_string(), "b".to_string()]);
}

#[test]
fn empty_and_single_corpus() {
    let matcher = Matcher::new(MatchConfig::default()).unwrap();
    assert!(matcher.is_empty());
    assert!(matcher.all_pairs().is_empty());
    assert!(matcher.report().rows.is_empty());

    let mut single = Matcher::new(MatchConfig::default()).unwrap();
    single.insert("only.c", &BASE).unwrap();
    assert!(single.all_pairs().is_empty());
    assert_eq!(single.report().rows.len(), 1);
}

#[test]
fn empty_documents_match_each_other() {
    let mut matcher = Matcher::new(MatchConfig::default()).unwrap();
    matcher.insert("blank1.c", &[]).unwrap();
    matcher.insert("blank2.c", &[]).unwrap();
    matcher.insert("base.c", &BASE).unwrap();
    assert_eq!(matcher.score("blank1.c", "blank2.c").unwrap(), 1.0);
    assert_eq!(matcher.score("blank1.c", "base.c").unwrap(), 0.0);
}
