use approx::assert_relative_eq;
use kpi_assoc::{classify, AssociationRecord, Error};

fn records(n: usize) -> Vec<AssociationRecord> {
    (0..n)
        .map(|i| AssociationRecord {
            gt_index: i,
            pred_index: i,
            distance: 0.1,
        })
        .collect()
}

#[test]
fn missing_prediction_is_a_false_negative() {
    let kpi = classify(100, 1, 0, &[]).unwrap();
    assert_eq!((kpi.true_positives, kpi.false_positives, kpi.false_negatives), (0, 0, 1));
    assert_eq!(kpi.tpr, 0.0);
    assert_eq!(kpi.fpr, 0.0);
    assert_eq!(kpi.fnr, 100.0);
    assert_eq!(kpi.precision, 0.0);
    assert_eq!(kpi.recall, 0.0);
}

#[test]
fn mixed_frame_rates_are_percentages() {
    let kpi = classify(7, 4, 3, &records(2)).unwrap();
    assert_eq!((kpi.true_positives, kpi.false_positives, kpi.false_negatives), (2, 1, 2));
    assert_relative_eq!(kpi.tpr, 40.0, epsilon = 1e-12);
    assert_relative_eq!(kpi.fpr, 20.0, epsilon = 1e-12);
    assert_relative_eq!(kpi.fnr, 40.0, epsilon = 1e-12);
    assert_relative_eq!(kpi.precision, 200.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(kpi.recall, 50.0, epsilon = 1e-12);
    assert_eq!(kpi.ts, 7);
}

#[test]
fn empty_frame_has_zero_rates() {
    let kpi = classify(0, 0, 0, &[]).unwrap();
    assert!(!kpi.has_objects());
    assert_eq!(
        [kpi.tpr, kpi.fpr, kpi.fnr, kpi.precision, kpi.recall],
        [0.0; 5]
    );
}

#[test]
fn only_predictions_are_false_positives() {
    let kpi = classify(0, 0, 3, &[]).unwrap();
    assert_eq!((kpi.true_positives, kpi.false_positives, kpi.false_negatives), (0, 3, 0));
    assert_eq!(kpi.fpr, 100.0);
    assert_eq!(kpi.recall, 0.0);
}

#[test]
fn counts_stay_consistent() {
    for num_gt in 0..5 {
        for num_pred in 0..5 {
            for matched in 0..=num_gt.min(num_pred) {
                let kpi = classify(0, num_gt, num_pred, &records(matched)).unwrap();
                assert_eq!(kpi.true_positives + kpi.false_negatives, num_gt);
                assert_eq!(kpi.true_positives + kpi.false_positives, num_pred);
                if kpi.has_objects() {
                    assert_relative_eq!(kpi.tpr + kpi.fpr + kpi.fnr, 100.0, epsilon = 1e-9);
                }
            }
        }
    }
}

#[test]
fn more_matches_than_objects_is_an_error() {
    assert!(matches!(
        classify(0, 1, 3, &records(2)),
        Err(Error::InconsistentCounts { matched: 2, .. })
    ));
}
