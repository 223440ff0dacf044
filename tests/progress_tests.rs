// Host-side tests for download progress reporting.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod progress {
        include!("../src/core/progress.rs");
    }
}

use crate::core::progress::*;

#[test]
fn reports_each_percent_once_across_chunks() {
    let mut p = LoadProgress::new(Some(1000));
    assert_eq!(p.report(), Some(0));
    assert_eq!(p.report(), None);

    // Chunks below half a percent don't move the rounded value.
    assert_eq!(p.advance(4), None);
    assert_eq!(p.advance(6), Some(1));
    assert_eq!(p.advance(240), Some(25));
    assert_eq!(p.advance(1), None);

    let mut reported = Vec::new();
    while p.loaded() < 1000 {
        if let Some(pct) = p.advance(50) {
            reported.push(pct);
        }
    }
    assert_eq!(reported.last(), Some(&100));
    assert!(reported.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn intermediate_progress_is_reported_for_a_single_large_body() {
    let mut p = LoadProgress::new(Some(4 * 1024 * 1024));
    let _ = p.report();
    let mut reports = 0;
    for _ in 0..64 {
        if p.advance(64 * 1024).is_some() {
            reports += 1;
        }
    }
    assert_eq!(p.percent(), Some(100));
    assert!(reports > 10, "only {reports} reports");
}

#[test]
fn overshooting_the_advertised_size_caps_at_100() {
    // content-length can describe the compressed body.
    let mut p = LoadProgress::new(Some(100));
    assert_eq!(p.advance(100), Some(100));
    assert_eq!(p.advance(300), None);
    assert_eq!(p.percent(), Some(100));
    assert_eq!(p.loaded(), 400);
}

#[test]
fn unknown_total_only_counts_bytes() {
    for total in [None, Some(0)] {
        let mut p = LoadProgress::new(total);
        assert_eq!(p.total(), None);
        assert_eq!(p.report(), None);
        assert_eq!(p.advance(512), None);
        assert_eq!(p.loaded(), 512);
        assert_eq!(p.percent(), None);
    }
}
