/// Height of a sheet that is fully collapsed.
pub const CLOSED_HEIGHT: f64 = 0.0;

/// Height of a sheet covering the whole viewport.
pub const FULL_HEIGHT: f64 = 100.0;

/// Returns the snap point closest to `value`.
///
/// The candidates are reduced left to right, starting from the first one, and a
/// later candidate only wins when it is strictly closer. Ties therefore resolve
/// to the earlier snap point.
///
/// # Panics
///
/// `snaps` must not be empty.
pub fn nearest_snap(snaps: &[f64], value: f64) -> f64 {
    let first = snaps[0];
    snaps[1..].iter().copied().fold(first, |closest, candidate| {
        if (candidate - value).abs() < (closest - value).abs() {
            candidate
        } else {
            closest
        }
    })
}

/// Whether a sheet resting at `height` is visible at all.
pub fn is_shown(height: f64) -> bool {
    height != CLOSED_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_minimal_distance() {
        let snaps = [0.0, 50.0, 100.0];
        assert_eq!(nearest_snap(&snaps, 80.0), 100.0);
        assert_eq!(nearest_snap(&snaps, 10.0), 0.0);
        assert_eq!(nearest_snap(&snaps, 49.0), 50.0);
    }

    #[test]
    fn ties_keep_earlier_element() {
        assert_eq!(nearest_snap(&[0.0, 50.0, 100.0], 25.0), 0.0);
        assert_eq!(nearest_snap(&[100.0, 50.0, 0.0], 25.0), 50.0);
        assert_eq!(nearest_snap(&[60.0, 40.0], 50.0), 60.0);
    }

    #[test]
    fn unordered_snaps_are_scanned_fully() {
        let snaps = [90.0, 10.0, 55.0, 30.0];
        assert_eq!(nearest_snap(&snaps, 33.0), 30.0);
        assert_eq!(nearest_snap(&snaps, 200.0), 90.0);
        assert_eq!(nearest_snap(&snaps, -5.0), 10.0);
    }

    #[test]
    fn result_is_always_a_member() {
        let snaps = [0.0, 12.5, 37.0, 64.0, 100.0];
        for i in 0..=400 {
            let value = i as f64 * 0.25;
            let resolved = nearest_snap(&snaps, value);
            assert!(snaps.contains(&resolved));
            let best = snaps
                .iter()
                .map(|snap| (snap - value).abs())
                .fold(f64::INFINITY, f64::min);
            assert_eq!((resolved - value).abs(), best, "value {value}");
        }
    }

    #[test]
    fn single_snap_always_wins() {
        assert_eq!(nearest_snap(&[42.0], 0.0), 42.0);
        assert_eq!(nearest_snap(&[42.0], 100.0), 42.0);
    }

    #[test]
    #[should_panic]
    fn empty_snaps_violate_precondition() {
        nearest_snap(&[], 10.0);
    }

    #[test]
    fn shown_is_derived_from_height() {
        assert!(!is_shown(CLOSED_HEIGHT));
        assert!(is_shown(0.5));
        assert!(is_shown(FULL_HEIGHT));
    }
}
