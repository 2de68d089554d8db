//! Zonation Scenario Tests
//!
//! End-to-end checks of `filled()`, hole detection and zone interval
//! segmentation through the public API, plus seeded randomized invariants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wellzone::types::{SEGMENT_ID, UNDEF, UNDEF_INT, X_UTME, Z_TVDSS};
use wellzone::zonation::change_point_ids;
use wellzone::{
    find_zonation_holes, report_holes_batch, FilledColumn, LogTable, LogType, Well, WellImport,
};

const NAN: f64 = f64::NAN;

fn zoned_well(name: &str, zones: &[f64]) -> Well {
    let n = zones.len();
    let mut t = LogTable::new(
        (0..n).map(|i| 460_000.0 + i as f64).collect(),
        vec![6_780_000.0; n],
        (0..n).map(|i| 1500.0 + i as f64 * 0.5).collect(),
    )
    .unwrap();
    t.add_log("MDepth", LogType::Continuous, (0..n).map(|i| 1600.0 + i as f64 * 0.5).collect())
        .unwrap();
    t.add_log("Zonelog", LogType::Discrete, zones.to_vec()).unwrap();
    Well::from_import(WellImport {
        name: name.to_string(),
        xpos: None,
        ypos: None,
        rkb: None,
        table: t,
        mdlog: Some("MDepth".to_string()),
        zonelog: Some("Zonelog".to_string()),
        strict: true,
    })
    .unwrap()
}

/// Random zonelog: runs of codes 1..=4 mixed with undefined runs.
fn random_zonelog(rng: &mut StdRng, len: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        let run = rng.gen_range(1..8);
        let value = if rng.gen_bool(0.3) {
            NAN
        } else {
            f64::from(rng.gen_range(1..=4_i32))
        };
        out.extend(std::iter::repeat(value).take(run));
    }
    out.truncate(len);
    out
}

// ============================================================================
// Hole Scenarios
// ============================================================================

#[test]
fn single_hole_reported_at_closing_row() {
    let w = zoned_well("A-1", &[1.0, 1.0, NAN, NAN, 2.0, 2.0, 2.0]);
    let report = w.report_zonation_holes(None, None, 2).unwrap();
    assert_eq!(report.len(), 1);
    let hole = &report.holes[0];
    assert_eq!(hole.index, 4);
    assert_eq!(hole.hole_length, 2);
    assert_eq!(hole.zone, 2);
    assert_eq!(hole.md, Some(1602.0));
    assert_eq!(hole.well, "A-1");
    assert_eq!(report.zonelog, "Zonelog");
    assert_eq!(report.mdlog, "MDepth");
}

#[test]
fn leading_undefined_run_is_not_a_hole() {
    let w = zoned_well("A-2", &[NAN, NAN, 1.0, 1.0, 1.0]);
    assert!(w.report_zonation_holes(None, None, 1).is_none());
}

#[test]
fn over_long_run_is_abandoned() {
    let spans = find_zonation_holes(&[1.0, NAN, NAN, NAN, 2.0, NAN, 3.0], 2);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].index, 6);
    assert_eq!(spans[0].length, 1);
}

#[test]
fn batch_keeps_input_order_and_skips_missing_logs() {
    let a = zoned_well("A", &[1.0, NAN, 1.0]);
    let t = LogTable::new(vec![0.0], vec![0.0], vec![0.0]).unwrap();
    let bare = Well::new("BARE", t);
    let c = zoned_well("C", &[1.0, 1.0]);

    let results = report_holes_batch([&a, &bare, &c], 3);
    let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["A", "BARE", "C"]);
    assert_eq!(results[0].1.as_ref().map(|r| r.len()), Some(1));
    assert!(results[1].1.is_none());
    assert!(results[2].1.is_none());
}

#[test]
fn random_holes_respect_threshold() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let len = rng.gen_range(0..120);
        let zones = random_zonelog(&mut rng, len);
        let threshold = rng.gen_range(1..6);
        let first_defined = zones.iter().position(|v| !v.is_nan());

        for span in find_zonation_holes(&zones, threshold) {
            assert!(span.length >= 1 && span.length <= threshold);
            // closing row is defined and preceded by exactly `length` NaNs
            assert!(!zones[span.index].is_nan());
            let gap = &zones[span.index - span.length..span.index];
            assert!(gap.iter().all(|v| v.is_nan()));
            assert!(!zones[span.index - span.length - 1].is_nan());
            assert!(first_defined.is_some_and(|f| f < span.index - span.length));
        }
    }
}

// ============================================================================
// Filled Table
// ============================================================================

#[test]
fn random_filled_preserves_shape_and_values() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let n = rng.gen_range(1..60);
        let coord = |rng: &mut StdRng| -> Vec<f64> {
            (0..n)
                .map(|_| if rng.gen_bool(0.2) { NAN } else { rng.gen_range(-1e4..1e4) })
                .collect()
        };
        let mut t = LogTable::new(coord(&mut rng), coord(&mut rng), coord(&mut rng)).unwrap();
        t.add_log("PHIT", LogType::Continuous, coord(&mut rng)).unwrap();
        t.add_log("FACIES", LogType::Discrete, random_zonelog(&mut rng, n)).unwrap();

        let filled = t.filled();
        assert_eq!(filled.nrow(), t.nrow());
        assert_eq!(filled.ncol(), t.ncol());

        for name in t.log_names(true) {
            let raw = t.get(name).unwrap();
            match filled.get(name).unwrap() {
                FilledColumn::Continuous(values) => {
                    for (r, f) in raw.iter().zip(values) {
                        if r.is_nan() {
                            assert_eq!(f.to_bits(), UNDEF.to_bits());
                        } else {
                            assert_eq!(f.to_bits(), r.to_bits());
                        }
                    }
                }
                FilledColumn::Discrete(values) => {
                    for (r, f) in raw.iter().zip(values) {
                        if r.is_nan() {
                            assert_eq!(*f, UNDEF_INT);
                        } else {
                            assert_eq!(f64::from(*f), *r);
                        }
                    }
                }
            }
        }
        // receiver untouched
        assert!(t.get("PHIT").unwrap().len() == n);
    }
}

// ============================================================================
// Zone Interval
// ============================================================================

#[test]
fn ten_row_table_gives_two_segments() {
    let zones = [1.0, 1.0, 3.0, 3.0, 3.0, 2.0, 2.0, 3.0, 3.0, 2.0];
    let w = zoned_well("B-1", &zones);
    let zi = w.zone_interval(3, 1, &[]).unwrap().unwrap();
    assert_eq!(zi.nrow(), 5);
    assert_eq!(zi.segment_ids(), &[0, 0, 0, 1, 1]);
    let z = zi.table.get(Z_TVDSS).unwrap().as_continuous().unwrap();
    assert_eq!(z, &[1501.0, 1501.5, 1502.0, 1503.5, 1504.0]);
}

#[test]
fn random_intervals_never_merge_or_leak() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..100 {
        let n = rng.gen_range(1..150);
        let zones = random_zonelog(&mut rng, n);
        let w = zoned_well("R", &zones);
        let zone: i32 = rng.gen_range(1..=4);

        let expected_segments = {
            let flags: Vec<bool> = zones.iter().map(|&v| v == f64::from(zone)).collect();
            let ids = change_point_ids(&flags);
            let mut hits: Vec<usize> =
                ids.iter().zip(&flags).filter(|&(_, &f)| f).map(|(&id, _)| id).collect();
            hits.dedup();
            hits.len()
        };

        let Some(zi) = w.zone_interval(zone, 1, &["Zonelog"]).unwrap() else {
            assert_eq!(expected_segments, 0);
            continue;
        };

        let codes = zi.table.get("Zonelog").unwrap().as_discrete().unwrap();
        assert!(codes.iter().all(|&c| c == zone));

        let seg_flags: Vec<bool> = zi.segment_ids().iter().map(|&s| s % 2 == 0).collect();
        let runs = change_point_ids(&seg_flags);
        assert_eq!(runs.last().map_or(0, |r| r + 1), expected_segments);
        assert_eq!(zi.segment_count(), expected_segments);
    }
}

#[test]
fn resample_one_matches_unsampled_rows() {
    let mut rng = StdRng::seed_from_u64(99);
    let zones = random_zonelog(&mut rng, 200);
    let w = zoned_well("S", &zones);
    let zi = w.zone_interval(2, 1, &[]).unwrap().unwrap();

    let expected_x: Vec<f64> = zones
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == 2.0)
        .map(|(i, _)| 460_000.0 + i as f64)
        .collect();
    assert_eq!(zi.table.get(X_UTME).unwrap().as_continuous().unwrap(), &expected_x[..]);
    assert_eq!(zi.table.get(SEGMENT_ID).unwrap().len(), expected_x.len());
}

#[test]
fn resampled_segments_keep_first_and_last_rows() {
    let zones: Vec<f64> = (0..30).map(|i| if (10..23).contains(&i) { 5.0 } else { 1.0 }).collect();
    let w = zoned_well("T", &zones);
    let zi = w.zone_interval(5, 5, &[]).unwrap().unwrap();
    let x = zi.table.get(X_UTME).unwrap().as_continuous().unwrap();
    let rows: Vec<usize> = x.iter().map(|v| (v - 460_000.0) as usize).collect();
    assert_eq!(rows, vec![10, 15, 20, 22]);
}
