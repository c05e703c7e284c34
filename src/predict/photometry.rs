//! Apparent magnitude of a constellation satellite from its phase angle.
//!
//! Third-order polynomial fit of observed magnitudes against Sun-satellite-
//! observer phase angle (Mallama 2024, arXiv:2401.01546).

/// First catalog number of the dimmer (post November 2021) hardware generation.
pub const NEW_GENERATION_FIRST_NORAD: u32 = 49752;

/// How much brighter the older generation appears, in magnitudes.
pub const OLD_GENERATION_OFFSET: f64 = 1.3;

/// Fainter than this is invisible to the unaided eye under suburban skies.
pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 5.5;

pub fn apparent_magnitude(phase_angle_deg: f64, norad_id: u32) -> f64 {
    let phi = phase_angle_deg;
    let mag = 6.657 - 0.05474 * phi + 0.001438 * phi * phi - 0.000008061 * phi * phi * phi;
    if norad_id < NEW_GENERATION_FIRST_NORAD {
        mag - OLD_GENERATION_OFFSET
    } else {
        mag
    }
}

/// One decimal, rounding the exact binary value with ties to even.
pub fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_phase_is_constant_term() {
        assert!((apparent_magnitude(0.0, 50000) - 6.657).abs() < 1e-12);
    }

    #[test]
    fn older_generation_is_brighter_by_fixed_offset() {
        for phi in [0.0, 30.0, 90.0, 140.0, 175.5] {
            assert_eq!(
                apparent_magnitude(phi, 10000),
                apparent_magnitude(phi, 50000) - OLD_GENERATION_OFFSET
            );
        }
    }

    #[test]
    fn generation_boundary() {
        let phi = 120.0;
        assert_eq!(
            apparent_magnitude(phi, NEW_GENERATION_FIRST_NORAD),
            apparent_magnitude(phi, 60000)
        );
        assert!(
            apparent_magnitude(phi, NEW_GENERATION_FIRST_NORAD - 1)
                < apparent_magnitude(phi, NEW_GENERATION_FIRST_NORAD)
        );
    }

    #[test]
    fn high_phase_angles_are_bright() {
        assert!(apparent_magnitude(150.0, 50000) < DEFAULT_MAGNITUDE_LIMIT);
        assert!(apparent_magnitude(60.0, 50000) > DEFAULT_MAGNITUDE_LIMIT);
    }

    #[test]
    fn is_continuous() {
        let a = apparent_magnitude(100.0, 50000);
        let b = apparent_magnitude(100.0 + 1e-6, 50000);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round1(4.249), 4.2);
        assert_eq!(round1(4.26), 4.3);
        assert_eq!(round1(-0.04), -0.0);
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round1(4.25), 4.2);
        assert_eq!(round1(0.75), 0.8);
        assert_eq!(round1(-2.25), -2.2);
    }

    #[test]
    fn near_ties_follow_the_binary_value() {
        // 4.35 is stored just below the tie
        assert_eq!(round1(4.35), 4.3);
        assert_eq!(round1(5.45), 5.5);
    }
}
