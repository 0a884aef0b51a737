// Phase conditioning: unwrapping, adjacent-sample normalization, and
// cleanup of the ±180° edge for charting.

/// Tolerance around ±180° used by the edge-flutter and polarity cleanups.
pub const EDGE_EPSILON: f64 = 1e-4;

/// Unwrap a single phase value, in degrees, into [-180, 180].
///
/// Adds or subtracts full turns until the value lands in range; total and
/// idempotent.
pub fn unwrap_degrees(phase_deg: f64) -> f64 {
    let mut unwrapped = phase_deg;
    while unwrapped < -180.0 {
        unwrapped += 360.0;
    }
    while unwrapped > 180.0 {
        unwrapped -= 360.0;
    }
    unwrapped
}

/// Unwrap a phase vector element-wise into [-180, 180].
pub fn unwrap_phase(phase_deg: &mut [f64]) {
    for phase in phase_deg.iter_mut() {
        *phase = unwrap_degrees(*phase);
    }
}

/// Remove spurious jumps between neighboring samples.
///
/// Each `phase[i+1]` is rotated by whole turns until it sits within 180° of
/// `phase[i]`, searching upward first, then downward. Unlike
/// [`unwrap_phase`] this does not bound individual samples: charting
/// artifacts come from inter-sample jumps, not absolute magnitude, so both
/// operations are needed.
pub fn normalize_adjacent(phase_deg: &mut [f64]) {
    if phase_deg.len() < 2 {
        return;
    }

    // Stop one shy of the last index: each step conditions the next sample.
    for i in 0..phase_deg.len() - 1 {
        let phase = phase_deg[i];
        let mut next_phase = phase_deg[i + 1];

        while phase - next_phase > 180.0 {
            next_phase += 360.0;
        }
        while next_phase - phase > 180.0 {
            next_phase -= 360.0;
        }

        phase_deg[i + 1] = next_phase;
    }
}

/// Suppress flip-flopping between the equivalent -180° and +180°
/// representations across adjacent samples.
///
/// A sample within `epsilon` of either edge is forced to the sign
/// consistent with its predecessor: -180 when the previous sample is at or
/// below zero, +180 otherwise. Downstream charting clients draw connecting
/// lines between neighbors, and alternating edge signs read as wrapping.
pub fn cleanup_edge_flutter(phase_deg: &mut [f64], epsilon: f64) {
    if phase_deg.len() < 2 {
        return;
    }

    for i in 0..phase_deg.len() - 1 {
        let phase = phase_deg[i];
        let next_phase = phase_deg[i + 1];

        if (next_phase - 180.0).abs() < epsilon || (next_phase + 180.0).abs() < epsilon {
            phase_deg[i + 1] = if phase <= 0.0 { -180.0 } else { 180.0 };
        }
    }
}

/// Canonicalize full polarity inversion: samples within `epsilon` of +180°
/// become exactly -180°, independent of their neighbors. Both values denote
/// the same rotation; -180 is the convention for polarity reversed.
pub fn cleanup_polarity(phase_deg: &mut [f64], epsilon: f64) {
    for phase in phase_deg.iter_mut() {
        if (*phase - 180.0).abs() < epsilon {
            *phase = -180.0;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_degrees_lands_in_range() {
        for raw in [-1234.5, -540.0, -181.0, -180.0, 0.0, 179.9, 180.0, 365.0, 9000.0] {
            let unwrapped = unwrap_degrees(raw);
            assert!(
                (-180.0..=180.0).contains(&unwrapped),
                "{raw} unwrapped to {unwrapped}"
            );
        }
    }

    #[test]
    fn unwrap_degrees_is_idempotent() {
        for raw in [-1234.5, -170.0, 0.0, 190.0, 725.0] {
            let once = unwrap_degrees(raw);
            assert_eq!(unwrap_degrees(once), once);
        }
    }

    #[test]
    fn unwrap_degrees_preserves_turn_count() {
        assert!((unwrap_degrees(370.0) - 10.0).abs() < 1e-12);
        assert!((unwrap_degrees(-370.0) + 10.0).abs() < 1e-12);
        assert!((unwrap_degrees(725.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn unwrap_phase_is_element_wise() {
        let mut v = vec![370.0, -370.0, 90.0];
        unwrap_phase(&mut v);
        assert!((v[0] - 10.0).abs() < 1e-12);
        assert!((v[1] + 10.0).abs() < 1e-12);
        assert!((v[2] - 90.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_adjacent_minimizes_jump_through_wraparound() {
        let mut v = vec![0.0, 190.0];
        normalize_adjacent(&mut v);
        assert!((v[0] - 0.0).abs() < 1e-12);
        assert!((v[1] + 170.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_adjacent_rotates_upward_first() {
        // next is far below: rotated up by a full turn.
        let mut v = vec![170.0, -170.0];
        normalize_adjacent(&mut v);
        assert!((v[1] - 190.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_adjacent_leaves_small_jumps_alone() {
        let mut v = vec![10.0, 100.0, -70.0];
        let original = v.clone();
        normalize_adjacent(&mut v);
        assert_eq!(v, original);
    }

    #[test]
    fn normalize_adjacent_chains_through_vector() {
        // Unwrapped ramp: each neighbor should end within 180° of the last,
        // without bounding absolute values.
        let mut v = vec![0.0, 170.0, -160.0, 30.0];
        normalize_adjacent(&mut v);
        for pair in v.windows(2) {
            assert!(
                (pair[0] - pair[1]).abs() <= 180.0,
                "jump {} -> {}",
                pair[0],
                pair[1]
            );
        }
        assert!((v[2] - 200.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_adjacent_is_idempotent() {
        let mut v = vec![0.0, 190.0, 350.0, -20.0];
        normalize_adjacent(&mut v);
        let conditioned = v.clone();
        normalize_adjacent(&mut v);
        assert_eq!(v, conditioned);
    }

    #[test]
    fn edge_flutter_follows_predecessor_sign() {
        let mut v = vec![-10.0, 180.0, 10.0, -180.0];
        cleanup_edge_flutter(&mut v, EDGE_EPSILON);
        assert_eq!(v[1], -180.0); // previous <= 0
        assert_eq!(v[3], 180.0); // previous > 0
    }

    #[test]
    fn edge_flutter_tolerates_near_edge_values() {
        let mut v = vec![5.0, 179.99995, -179.99995];
        cleanup_edge_flutter(&mut v, EDGE_EPSILON);
        assert_eq!(v[1], 180.0);
        assert_eq!(v[2], 180.0); // previous is now +180 > 0
    }

    #[test]
    fn edge_flutter_ignores_interior_values() {
        let mut v = vec![0.0, 179.0, -179.0, 90.0];
        let original = v.clone();
        cleanup_edge_flutter(&mut v, EDGE_EPSILON);
        assert_eq!(v, original);
    }

    #[test]
    fn edge_flutter_is_idempotent() {
        let mut v = vec![-10.0, 180.0, -180.0, 179.99999];
        cleanup_edge_flutter(&mut v, EDGE_EPSILON);
        let conditioned = v.clone();
        cleanup_edge_flutter(&mut v, EDGE_EPSILON);
        assert_eq!(v, conditioned);
    }

    #[test]
    fn polarity_cleanup_forces_plus_180_negative() {
        let mut v = vec![180.0, 179.99999, -180.0, 90.0, 179.9];
        cleanup_polarity(&mut v, EDGE_EPSILON);
        assert_eq!(v[0], -180.0);
        assert_eq!(v[1], -180.0);
        assert_eq!(v[2], -180.0); // already canonical
        assert_eq!(v[3], 90.0);
        assert_eq!(v[4], 179.9); // outside epsilon
    }

    #[test]
    fn polarity_cleanup_is_idempotent() {
        let mut v = vec![180.0, -180.0, 45.0];
        cleanup_polarity(&mut v, EDGE_EPSILON);
        let conditioned = v.clone();
        cleanup_polarity(&mut v, EDGE_EPSILON);
        assert_eq!(v, conditioned);
    }

    #[test]
    fn empty_and_single_sample_vectors() {
        let mut empty: Vec<f64> = vec![];
        unwrap_phase(&mut empty);
        normalize_adjacent(&mut empty);
        cleanup_edge_flutter(&mut empty, EDGE_EPSILON);
        cleanup_polarity(&mut empty, EDGE_EPSILON);
        assert!(empty.is_empty());

        let mut single = vec![270.0];
        normalize_adjacent(&mut single);
        cleanup_edge_flutter(&mut single, EDGE_EPSILON);
        assert_eq!(single, vec![270.0]); // pairwise ops need a neighbor
    }
}
