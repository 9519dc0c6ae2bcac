use crate::workflows::placements::domain::{Branch, Month};
use crate::workflows::placements::statistics::{record_offer, StatisticsError};

const TOLERANCE: f64 = 1e-9;

fn record_sequence(ctcs: &[f64]) -> crate::workflows::placements::BranchStatistics {
    let mut stats = None;
    for &ctc in ctcs {
        stats = Some(
            record_offer(stats, Branch::ComputerScience, ctc, Month::March)
                .expect("offer records"),
        );
    }
    stats.expect("at least one offer recorded")
}

#[test]
fn first_offer_seeds_every_aggregate() {
    let stats = record_offer(None, Branch::ComputerScience, 10.0, Month::March)
        .expect("first offer records");

    assert_eq!(stats.branch, Branch::ComputerScience);
    assert!((stats.avg_package - 10.0).abs() < TOLERANCE);
    assert!((stats.median_package - 10.0).abs() < TOLERANCE);
    assert!((stats.max_package - 10.0).abs() < TOLERANCE);
    assert_eq!(stats.placed_students, 1);
    assert_eq!(stats.ctc_values.len(), 1);
}

#[test]
fn second_offer_updates_average_median_and_max() {
    let stats = record_sequence(&[10.0, 20.0]);

    assert!((stats.avg_package - 15.0).abs() < TOLERANCE);
    assert!((stats.median_package - 15.0).abs() < TOLERANCE);
    assert!((stats.max_package - 20.0).abs() < TOLERANCE);
    assert_eq!(stats.placed_students, 2);
}

#[test]
fn even_count_median_averages_the_middle_pair() {
    let stats = record_sequence(&[10.0, 20.0, 30.0, 25.0]);

    let sorted: Vec<f64> = stats.ctc_values.iter().map(|r| r.ctc_lpa).collect();
    assert_eq!(sorted, vec![10.0, 20.0, 25.0, 30.0]);
    assert!((stats.median_package - 22.5).abs() < TOLERANCE);
}

#[test]
fn aggregates_match_full_recomputation_after_every_insert() {
    let offers = [12.5, 6.0, 44.0, 18.0, 18.0, 7.25, 30.0, 9.9];
    let mut stats = None;
    let mut seen: Vec<f64> = Vec::new();

    for &ctc in &offers {
        seen.push(ctc);
        let updated = record_offer(stats.take(), Branch::Electronics, ctc, Month::November)
            .expect("offer records");

        let mean = seen.iter().sum::<f64>() / seen.len() as f64;
        let mut sorted = seen.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let expected_median = if sorted.len() % 2 == 1 {
            sorted[sorted.len() / 2]
        } else {
            (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
        };
        let expected_max = sorted.last().copied().expect("non-empty");

        assert!((updated.avg_package - mean).abs() < TOLERANCE);
        assert!((updated.median_package - expected_median).abs() < TOLERANCE);
        assert!((updated.max_package - expected_max).abs() < TOLERANCE);
        assert_eq!(updated.placed_students as usize, seen.len());

        stats = Some(updated);
    }
}

#[test]
fn repeat_offers_are_distinct_events() {
    let stats = record_sequence(&[10.0, 10.0]);

    assert_eq!(stats.placed_students, 2);
    assert_eq!(stats.ctc_values.len(), 2);
    assert!((stats.avg_package - 10.0).abs() < TOLERANCE);
}

#[test]
fn rejects_non_positive_compensation() {
    for ctc in [0.0, -4.5, f64::NAN, f64::INFINITY] {
        let result = record_offer(None, Branch::Mechanical, ctc, Month::June);
        assert!(matches!(
            result,
            Err(StatisticsError::NonPositiveCompensation { .. })
        ));
    }
}

#[test]
fn rejects_offers_routed_to_the_wrong_branch() {
    let stats = record_offer(None, Branch::Civil, 11.0, Month::January).expect("offer records");
    let result = record_offer(Some(stats), Branch::Chemical, 12.0, Month::January);

    assert!(matches!(
        result,
        Err(StatisticsError::BranchMismatch {
            expected: Branch::Civil,
            actual: Branch::Chemical,
        })
    ));
}

#[test]
fn month_codes_parse_to_english_names() {
    assert_eq!(Month::from_two_digit("01"), Some(Month::January));
    assert_eq!(Month::from_two_digit("09"), Some(Month::September));
    assert_eq!(Month::from_two_digit("12"), Some(Month::December));
    assert_eq!(Month::from_two_digit("13"), None);
    assert_eq!(Month::from_two_digit("3"), None);
    assert_eq!(Month::from_two_digit("march"), None);
    assert_eq!(Month::March.label(), "March");
}
