// psi-core/tests/psi_integration_tests.rs
use psi_core::{
    compute_psi, BinningMode, Bins, Category, DataKind, DriftSeverity, PsiEngine, PsiError,
    PsiOptions, Table, Value,
};

fn x1() -> Vec<Option<f64>> {
    [1., 2., 3., 3., 5., 4., 2., 2., 3., 2., 3., 4., 2., 2., 2., 5., 4., 5., 7., f64::NAN, 7.]
        .iter()
        .map(|&v| if v.is_nan() { None } else { Some(v) })
        .collect()
}

fn x2() -> Vec<Option<f64>> {
    vec![
        Some(1.), Some(2.), Some(2.), Some(3.), Some(5.), Some(4.), Some(2.), None, Some(3.),
        Some(2.), None, Some(4.), Some(2.), Some(2.), Some(2.), Some(5.), Some(3.), Some(5.),
        Some(6.), None,
    ]
}

fn labels(table: &psi_core::FrequencyTable) -> Vec<String> {
    table.categories().map(ToString::to_string).collect()
}

#[test_log::test]
fn test_identical_samples_score_zero() {
    let equidistant = PsiOptions::default().with_bins(Bins::Count(3));
    let (psi, table) = compute_psi(x1(), x1(), &equidistant).unwrap();
    assert_eq!(psi, 0.0);
    for row in &table {
        assert_eq!(row.expected, row.actual);
    }

    let categorical = PsiOptions::default().categorical();
    let (psi, _) = compute_psi(x1(), x1(), &categorical).unwrap();
    assert_eq!(psi, 0.0);
}

#[test_log::test]
fn test_equidistant_bins_and_missing_category() {
    let options = PsiOptions::default().with_bins(Bins::Count(3));
    let (psi, table) = compute_psi(x1(), x2(), &options).unwrap();

    assert_eq!(
        labels(&table),
        vec!["[1.000, 3.000]", "(3.000, 5.000]", "(5.000, 7.000]", "<missing>"]
    );
    let missing = table.get(&Category::Missing).unwrap();
    assert!((missing.expected - 1.0 / 21.0).abs() < 1e-12);
    assert!((missing.actual - 3.0 / 20.0).abs() < 1e-12);
    assert!((table.expected_total() - 1.0).abs() < 1e-12);
    assert!((table.actual_total() - 1.0).abs() < 1e-12);
    assert!(psi > 0.0);
}

#[test_log::test]
fn test_quantile_and_equidistant_differ_in_categories() {
    let quantile = PsiOptions::default()
        .with_mode(Some(BinningMode::Quantile))
        .with_bins(Bins::Count(3));
    let equidistant = PsiOptions::default().with_bins(Bins::Count(3));

    let (q_psi, q_table) = compute_psi(x1(), x1(), &quantile).unwrap();
    let (e_psi, e_table) = compute_psi(x1(), x1(), &equidistant).unwrap();

    assert_eq!(q_psi, 0.0);
    assert_eq!(e_psi, 0.0);
    assert_eq!(
        labels(&q_table),
        vec!["[1.000, 2.000]", "(2.000, 4.000]", "(4.000, 7.000]", "<missing>"]
    );
    assert_ne!(labels(&q_table), labels(&e_table));
}

#[test_log::test]
fn test_force_categorical_uses_raw_values() {
    let options = PsiOptions::default().categorical();
    let (psi, table) = compute_psi(x1(), x2(), &options).unwrap();

    // 1..7 observed across both samples, plus missing
    assert_eq!(labels(&table), vec!["1", "2", "3", "4", "5", "6", "7", "<missing>"]);
    let six = table.get_by_label("6").unwrap();
    assert_eq!(six.expected, 0.0);
    assert!(psi > 0.0);
}

#[test]
fn test_regularisation_replaces_zero_frequencies() {
    let options = PsiOptions::default().categorical();
    let (psi, table) = compute_psi(
        vec![1.0, 1.0, 1.0, 2.0, 2.0],
        vec![1.0, 1.0, 1.0, 1.0, 1.0],
        &options,
    )
    .unwrap();

    let two = table.get_by_label("2").unwrap();
    assert_eq!(two.actual, 0.0);
    assert!((two.expected - 0.4).abs() < 1e-12);

    let r = 0.0001_f64;
    let manual = (1.0 - 0.6) * (1.0_f64 / 0.6).ln() + (r - 0.4) * (r / 0.4).ln();
    assert!((psi - manual).abs() < 1e-9);
}

#[test]
fn test_empty_sample_gives_nan_and_empty_table() {
    let (psi, table) =
        compute_psi(Vec::<f64>::new(), vec![1.0, 2.0, 3.0], &PsiOptions::default()).unwrap();
    assert!(psi.is_nan());
    assert!(table.is_empty());

    let report = PsiEngine::default()
        .evaluate(vec!["a"], Vec::<Value>::new())
        .unwrap();
    assert_eq!(report.severity, DriftSeverity::Undefined);
}

#[test]
fn test_actual_values_outside_expected_range() {
    let options = PsiOptions::default().with_bins(Bins::Count(3));
    let (_, table) = compute_psi(vec![1.0, 4.0, 7.0], vec![0.0, 4.0, 10.0], &options).unwrap();

    let out = table.get(&Category::OutOfRange).unwrap();
    assert_eq!(out.expected, 0.0);
    assert!((out.actual - 2.0 / 3.0).abs() < 1e-12);
    // edges come from the expected sample only
    assert_eq!(
        labels(&table),
        vec!["[1.000, 3.000]", "(3.000, 5.000]", "(5.000, 7.000]", "<out of range>"]
    );
}

#[test]
fn test_equidistant_bins_over_range_wider_than_f64_max() {
    let options = PsiOptions::default().with_bins(Bins::Count(3));

    let sample = vec![-1e308, 0.0, 1e308];
    let report = PsiEngine::new(options.clone()).evaluate(sample.clone(), sample).unwrap();
    let edges = report.edges.unwrap();
    assert_eq!(edges.bin_count(), 3);
    assert_eq!(edges.edges()[0], -1e308);
    assert!(edges.edges().windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(report.psi, 0.0);

    let (_, table) = compute_psi(vec![-1e308, 1e308], vec![-1e308, 5.0, 1e308], &options).unwrap();
    assert_eq!(table.len(), 3);
    assert!(table.iter().all(|row| !row.category.to_string().contains("NaN")));
    assert!(table.get(&Category::OutOfRange).is_none());

    let err = compute_psi(vec![f64::MAX], vec![1.0], &options).unwrap_err();
    assert!(matches!(err, PsiError::ConfigurationError(_)));
}

#[test]
fn test_disjoint_distributions_score_high() {
    let expected: Vec<f64> = [0.0, 0.1].repeat(100);
    let actual: Vec<f64> = [1.0, 1.1].repeat(120);
    let options = PsiOptions::default().with_bins(Bins::Count(3));

    let report = PsiEngine::new(options).evaluate(expected, actual).unwrap();
    assert!(report.psi > 10.0);
    assert_eq!(report.severity, DriftSeverity::Significant);
    assert_eq!(report.table.get(&Category::OutOfRange).unwrap().actual, 1.0);
}

#[test]
fn test_swapping_samples_rebuilds_bins_from_new_expected() {
    let a = vec![1.0, 2.0, 3.0, 4.0, 10.0];
    let b = vec![1.0, 1.5, 2.0, 2.5, 3.0];
    let options = PsiOptions::default().with_bins(Bins::Count(2));

    let forward = PsiEngine::new(options.clone()).evaluate(a.clone(), b.clone()).unwrap();
    let backward = PsiEngine::new(options).evaluate(b, a).unwrap();
    assert_ne!(forward.edges, backward.edges);
    assert_ne!(forward.psi, backward.psi);
}

#[test]
fn test_psi_is_non_negative() {
    let cases: Vec<(Vec<f64>, Vec<f64>)> = vec![
        (vec![1.0, 2.0, 3.0], vec![3.0, 3.0, 3.0]),
        (vec![0.5, 0.5, 9.0, 9.0], vec![0.5, 9.0, 9.0, 9.0, 9.0]),
        (vec![-3.0, -1.0, 2.0, 8.0], vec![100.0]),
    ];
    for (expected, actual) in cases {
        for options in [
            PsiOptions::default().with_bins(Bins::Count(4)),
            PsiOptions::default().with_mode(Some(BinningMode::Quantile)).with_bins(Bins::Count(2)),
            PsiOptions::default().categorical(),
        ] {
            let (psi, _) = compute_psi(expected.clone(), actual.clone(), &options).unwrap();
            assert!(psi >= 0.0, "psi {} for {:?} vs {:?}", psi, expected, actual);
        }
    }
}

#[test]
fn test_categorical_labels() {
    let engine = PsiEngine::new(PsiOptions::default().without_bins());
    let report = engine
        .evaluate(vec!["red", "red", "blue"], vec!["red", "green"])
        .unwrap();
    assert_eq!(report.data_kind, Some(DataKind::Categorical));
    assert_eq!(labels(&report.table), vec!["blue", "green", "red"]);
}

#[test]
fn test_explicit_breaks() {
    let options = PsiOptions::default()
        .with_mode(None)
        .with_bins(Bins::Breaks(vec![0.0, 5.0, 10.0]));
    let (_, table) = compute_psi(vec![1.0, 6.0, 9.0], vec![2.0, 3.0, 11.0], &options).unwrap();
    assert_eq!(
        labels(&table),
        vec!["[0.000, 5.000]", "(5.000, 10.000]", "<out of range>"]
    );
}

#[test]
fn test_single_column_table_input() {
    let table = Table::single_column("score", vec![Value::from(1.0), Value::from(2.0)]);
    let (psi, _) =
        compute_psi(table, vec![1.0, 2.0], &PsiOptions::default().with_bins(Bins::Count(2))).unwrap();
    assert_eq!(psi, 0.0);
}

#[test]
fn test_multi_column_table_is_rejected() {
    let table = Table::new(
        vec!["a".into(), "b".into()],
        vec![vec![Value::from(1.0), Value::from(2.0)]],
    );
    let err = compute_psi(table, vec![1.0], &PsiOptions::default()).unwrap_err();
    assert!(matches!(err, PsiError::InvalidInputShape(_)));
}

#[test]
fn test_numeric_against_labels_is_a_type_mismatch() {
    let err = compute_psi(vec![1.0, 2.0], vec!["a", "b"], &PsiOptions::default()).unwrap_err();
    assert!(matches!(err, PsiError::TypeMismatch(_)));

    // forcing categorical treatment makes any pair comparable
    let forced = PsiOptions::default().categorical();
    assert!(compute_psi(vec![1.0, 2.0], vec!["a", "b"], &forced).is_ok());
}

#[test]
fn test_configuration_errors() {
    let numeric = || vec![1.0, 2.0, 3.0];
    let cases = [
        PsiOptions::default().with_bins(Bins::Count(0)),
        PsiOptions::default().without_bins(),
        PsiOptions::default().with_mode(None).with_bins(Bins::Count(3)),
        PsiOptions::default()
            .with_mode(Some(BinningMode::Quantile))
            .with_bins(Bins::Breaks(vec![0.0, 5.0])),
        PsiOptions::default().with_bins(Bins::Breaks(vec![5.0, 1.0])),
        PsiOptions::default().with_regulariser(0.0),
    ];
    for options in cases {
        let err = compute_psi(numeric(), numeric(), &options).unwrap_err();
        assert!(
            matches!(err, PsiError::ConfigurationError(_)),
            "{:?} gave {:?}",
            options,
            err
        );
    }
}
