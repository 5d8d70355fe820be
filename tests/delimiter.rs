use approx::assert_relative_eq;
use kpi_assoc::{
    associate_delimiters, delimiter::delimiter_distance, score_delimiter_pair, Delimiter, Error, EvaluationParams,
    Evaluator,
};

fn line(id: i64, start: (f64, f64), end: (f64, f64)) -> Delimiter {
    Delimiter::new(id, 10, start, end).unwrap()
}

#[test]
fn distance_ignores_endpoint_order() {
    let a = line(0, (0.0, 0.0), (5.0, 0.0));
    let b = line(1, (5.0, 0.2), (0.0, 0.2));
    assert_relative_eq!(delimiter_distance(&a, &b), 0.2, epsilon = 1e-12);
    assert_relative_eq!(delimiter_distance(&a, &b), delimiter_distance(&b, &a), epsilon = 1e-12);
}

#[test]
fn delimiters_match_one_to_one() {
    let gt = vec![line(0, (0.0, 0.0), (5.0, 0.0)), line(1, (0.0, 3.0), (5.0, 3.0))];
    let pred = vec![
        line(0, (5.0, 3.1), (0.0, 3.1)),
        line(1, (0.0, -0.2), (5.0, -0.2)),
        line(2, (40.0, 0.0), (45.0, 0.0)),
    ];
    let matched = associate_delimiters(&gt, &pred, 1.0).unwrap();
    assert_eq!(
        matched.iter().map(|r| (r.gt_index, r.pred_index)).collect::<Vec<_>>(),
        vec![(0, 1), (1, 0)]
    );
    assert!(associate_delimiters(&gt, &[], 1.0).unwrap().is_empty());
}

#[test]
fn delimiters_from_different_frames_are_rejected() {
    let gt = vec![line(0, (0.0, 0.0), (5.0, 0.0))];
    let pred = vec![Delimiter::new(0, 11, (0.0, 0.1), (5.0, 0.1)).unwrap()];
    assert!(matches!(
        associate_delimiters(&gt, &pred, 1.0),
        Err(Error::MixedTimestamps { expected: 10, got: 11 })
    ));
}

#[test]
fn evaluator_scores_delimiters_at_configured_threshold() {
    let gt = vec![line(0, (0.0, 0.0), (5.0, 0.0)), line(1, (0.0, 3.0), (5.0, 3.0))];
    let pred = vec![line(0, (5.0, 3.4), (0.0, 3.4)), line(1, (0.0, 0.1), (5.0, 0.1))];

    let scored = Evaluator::new(EvaluationParams::default())
        .unwrap()
        .evaluate_delimiters(&gt, &pred)
        .unwrap();
    assert_eq!(
        scored.iter().map(|(r, _)| (r.gt_index, r.pred_index)).collect::<Vec<_>>(),
        vec![(0, 1), (1, 0)]
    );
    assert_relative_eq!(scored[0].1.endpoint_error, 0.1, epsilon = 1e-12);
    assert_relative_eq!(scored[1].1.endpoint_error, 0.4, epsilon = 1e-12);
    assert_relative_eq!(scored[1].1.orientation_deg.unwrap(), 0.0, epsilon = 1e-5);

    let strict = EvaluationParams {
        delimiter_threshold: 0.2,
        ..Default::default()
    };
    let scored = Evaluator::new(strict).unwrap().evaluate_delimiters(&gt, &pred).unwrap();
    assert_eq!(scored.len(), 1);
    assert_eq!((scored[0].0.gt_index, scored[0].0.pred_index), (0, 1));
}

#[test]
fn delimiter_error_folds_orientation() {
    let gt = line(0, (0.0, 0.0), (1.0, 0.0));
    let pred = line(1, (0.0, 0.0), (-1.0, 1.0));
    let error = score_delimiter_pair(&gt, &pred).unwrap();
    assert_relative_eq!(error.orientation_deg.unwrap(), 45.0, epsilon = 1e-9);

    let reversed = line(2, (1.0, 0.1), (0.0, 0.1));
    let error = score_delimiter_pair(&gt, &reversed).unwrap();
    assert_relative_eq!(error.orientation_deg.unwrap(), 0.0, epsilon = 1e-5);
    assert_relative_eq!(error.endpoint_error, 0.1, epsilon = 1e-12);
}

#[test]
fn zero_length_delimiter_has_no_orientation() {
    let gt = line(0, (0.0, 0.0), (1.0, 0.0));
    let dot = line(1, (0.5, 0.5), (0.5, 0.5));
    let error = score_delimiter_pair(&gt, &dot).unwrap();
    assert_eq!(error.orientation_deg, None);
    assert!(error.endpoint_error > 0.0);
}

#[test]
fn non_finite_endpoint_is_rejected() {
    assert!(Delimiter::new(0, 0, (f64::NAN, 0.0), (1.0, 0.0)).is_err());
}
