//! Spin-to-win wheel outcomes.
//!
//! The wheel is divided into equal angular sectors (the segment
//! `probability` field is stored for the builder but not consulted here -
//! every segment wins uniformly). The winning segment is chosen first, and
//! the visual rotation is derived from it, so the wheel always comes to
//! rest on the prize that is actually granted.
//!
//! Angle convention: the pointer is fixed at the top (0 degrees) and the
//! wheel rotates clockwise beneath it. Segment `i` is painted clockwise
//! from `i * segment_angle`.

use rand::Rng;

/// Duration of the CSS spin transition, in seconds.
pub const SPIN_DURATION_SECONDS: f64 = 5.0;

/// Pause between the wheel stopping and the success step, in seconds.
pub const REVEAL_DELAY_SECONDS: f64 = 1.5;

/// Full revolutions before the wheel settles.
pub const BASE_ROTATIONS: u32 = 6;

/// Fraction of a segment kept clear of its edges when picking the resting
/// angle, so the pointer never lands ambiguously on a boundary.
const EDGE_MARGIN: f64 = 0.1;

/// The result of a spin: which segment won and the rotation that lands on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinOutcome {
    /// Index into the campaign's segment list.
    pub index: usize,
    /// Total rotation to animate, in degrees (several full revolutions plus
    /// the resting angle).
    pub rotation_degrees: f64,
}

/// Angular size of each sector, in degrees.
#[must_use]
#[allow(clippy::cast_precision_loss)] // segment counts are tiny
pub fn segment_angle(segment_count: usize) -> f64 {
    360.0 / segment_count as f64
}

/// Choose the winning segment: uniformly random in `[0, segment_count)`.
///
/// Deliberately independent of each segment's `probability` field, which is
/// persisted and editable but unused by selection.
pub fn winning_index<R: Rng>(rng: &mut R, segment_count: usize) -> usize {
    rng.random_range(0..segment_count)
}

/// The segment the pointer indicates for a given total rotation.
///
/// Normalizes the rotation mod 360 and inverts the clockwise motion:
/// `floor(((360 - normalized) mod 360) / segment_angle)`. Pure, so the
/// renderer and the tests agree on what the wheel shows.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn segment_at_rotation(segment_count: usize, rotation_degrees: f64) -> usize {
    let normalized = rotation_degrees.rem_euclid(360.0);
    let pointed_at = (360.0 - normalized).rem_euclid(360.0);
    let index = (pointed_at / segment_angle(segment_count)) as usize;
    // Guard the exact-boundary float case
    index.min(segment_count.saturating_sub(1))
}

/// A rotation that visually lands on `index`.
///
/// [`BASE_ROTATIONS`] full revolutions plus a resting angle inside the
/// winning segment, jittered away from the sector edges so consecutive
/// wins on the same segment still look different.
#[allow(clippy::cast_precision_loss)]
pub fn rotation_for_segment<R: Rng>(rng: &mut R, segment_count: usize, index: usize) -> f64 {
    let angle = segment_angle(segment_count);
    let jitter = rng.random_range(EDGE_MARGIN..(1.0 - EDGE_MARGIN));
    let pointed_at = (index as f64).mul_add(angle, jitter * angle);
    let resting = (360.0 - pointed_at).rem_euclid(360.0);

    f64::from(BASE_ROTATIONS * 360) + resting
}

/// Run a complete spin: pick the winner, derive the matching rotation.
///
/// Returns `None` for an empty wheel (config validation rejects those
/// before publish; this guards unvalidated input).
pub fn spin<R: Rng>(rng: &mut R, segment_count: usize) -> Option<SpinOutcome> {
    if segment_count == 0 {
        return None;
    }

    let index = winning_index(rng, segment_count);
    let rotation_degrees = rotation_for_segment(rng, segment_count, index);

    Some(SpinOutcome {
        index,
        rotation_degrees,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn test_segment_angle() {
        assert!((segment_angle(6) - 60.0).abs() < f64::EPSILON);
        assert!((segment_angle(4) - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_segment_at_rotation_zero_is_first_segment() {
        assert_eq!(segment_at_rotation(6, 0.0), 0);
    }

    #[test]
    fn test_segment_at_rotation_small_clockwise_turn_wraps_to_last() {
        // Just past zero, the last-painted segment rotates under the pointer
        assert_eq!(segment_at_rotation(6, 1.0), 5);
        assert_eq!(segment_at_rotation(6, 59.0), 5);
        assert_eq!(segment_at_rotation(6, 61.0), 4);
    }

    #[test]
    fn test_segment_at_rotation_normalizes_full_revolutions() {
        let with_revs = segment_at_rotation(6, 2160.0 + 125.0);
        let without = segment_at_rotation(6, 125.0);
        assert_eq!(with_revs, without);
    }

    #[test]
    fn test_segment_at_rotation_single_segment() {
        for rotation in [0.0, 90.0, 359.9, 720.0] {
            assert_eq!(segment_at_rotation(1, rotation), 0);
        }
    }

    #[test]
    fn test_winning_index_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(winning_index(&mut rng, 6) < 6);
        }
    }

    #[test]
    fn test_winning_index_hits_every_segment() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut hit = [false; 6];
        for _ in 0..500 {
            hit[winning_index(&mut rng, 6)] = true;
        }
        assert!(hit.iter().all(|h| *h));
    }

    #[test]
    fn test_rotation_lands_on_chosen_segment() {
        // The unification property: the visual landing always matches the
        // granted prize, for any wheel size and any winner.
        let mut rng = SmallRng::seed_from_u64(3);
        for segment_count in 1..=12 {
            for index in 0..segment_count {
                for _ in 0..20 {
                    let rotation = rotation_for_segment(&mut rng, segment_count, index);
                    assert_eq!(
                        segment_at_rotation(segment_count, rotation),
                        index,
                        "count={segment_count} index={index} rotation={rotation}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_rotation_includes_base_revolutions() {
        let mut rng = SmallRng::seed_from_u64(5);
        let rotation = rotation_for_segment(&mut rng, 6, 2);
        assert!(rotation >= f64::from(BASE_ROTATIONS * 360));
        assert!(rotation < f64::from((BASE_ROTATIONS + 1) * 360));
    }

    #[test]
    fn test_spin_outcome_consistent() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..100 {
            let outcome = spin(&mut rng, 8).unwrap();
            assert_eq!(segment_at_rotation(8, outcome.rotation_degrees), outcome.index);
        }
    }

    #[test]
    fn test_spin_empty_wheel_is_none() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(spin(&mut rng, 0).is_none());
    }
}
