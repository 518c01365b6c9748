//! Mechanical derivation: pure functions turning module state into the
//! quantities ship motion and gunnery consume. Nothing here is cached;
//! callers evaluate every tick.

use glam::DVec2;

use brigantine_core::constants::*;

/// Angle between the wind and the sail's face normal, in degrees (0..=180).
///
/// The sail normal is the ship heading plus the yard angle plus a quarter
/// turn. The dot product is clamped before `acos` so rounding can never
/// leave its domain.
pub fn wind_angle_to_sail(sail_angle_deg: f64, wind_direction: f64, ship_heading: f64) -> f64 {
    let normal = ship_heading + sail_angle_deg.to_radians() + std::f64::consts::FRAC_PI_2;
    let dot = DVec2::from_angle(wind_direction).dot(DVec2::from_angle(normal));
    dot.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Fraction of the wind a sail turns into drive, before openness.
///
/// Linear from 1.0 with the wind square on the sail down to the 0.35 floor
/// at 90°, flat beyond.
pub fn sail_base_efficiency(angle_diff_deg: f64) -> f64 {
    let base = if angle_diff_deg <= 90.0 {
        1.0 - (1.0 - SAIL_MIN_EFFICIENCY) * angle_diff_deg / 90.0
    } else {
        SAIL_MIN_EFFICIENCY
    };
    base.clamp(SAIL_MIN_EFFICIENCY, 1.0)
}

/// Efficiency of a sail with `openness` (0..=100) and yard angle
/// `sail_angle_deg`, on a ship heading `ship_heading`, in wind blowing toward
/// `wind_direction` (radians).
pub fn sail_efficiency(
    openness: f64,
    sail_angle_deg: f64,
    wind_direction: f64,
    ship_heading: f64,
) -> f64 {
    let angle_diff = wind_angle_to_sail(sail_angle_deg, wind_direction, ship_heading);
    sail_base_efficiency(angle_diff) * (openness.clamp(0.0, SAIL_MAX_OPENNESS) / SAIL_MAX_OPENNESS)
}

/// Rudder authority of a wheel deflection, 0..=1.
pub fn wheel_effectiveness(wheel_angle_deg: f64) -> f64 {
    (wheel_angle_deg.abs() / WHEEL_MAX_ANGLE).min(1.0)
}

/// Signed rudder input: effectiveness with the sign of the deflection.
pub fn wheel_steering(wheel_angle_deg: f64) -> f64 {
    wheel_effectiveness(wheel_angle_deg) * wheel_angle_deg.signum()
}

/// Muzzle speed of a shot with the given damage.
pub fn projectile_speed(damage: f64) -> f64 {
    PROJECTILE_BASE_SPEED + damage * PROJECTILE_DAMAGE_SPEED_FACTOR
}

/// Height of the fiber sensor for a sail at `openness`.
pub fn fiber_height(openness: f64) -> f64 {
    SAIL_FIBER_BASE_HEIGHT * openness.clamp(0.0, SAIL_MAX_OPENNESS) / SAIL_MAX_OPENNESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    /// Wind direction that meets a square sail on a heading-0 ship at `deg`.
    fn wind_at(deg: f64) -> f64 {
        FRAC_PI_2 + deg.to_radians()
    }

    #[test]
    fn closed_sail_gives_nothing() {
        for heading in [0.0, 1.0, -2.5, PI] {
            for wind in [0.0, 0.7, PI, -1.2] {
                assert_eq!(sail_efficiency(0.0, 30.0, wind, heading), 0.0);
            }
        }
    }

    #[test]
    fn square_wind_full_sail_is_exactly_one() {
        assert_eq!(sail_efficiency(100.0, 0.0, FRAC_PI_2, 0.0), 1.0);
        // Same geometry with the yard and ship rotated together.
        let heading = 0.4;
        let yard = -20.0_f64;
        let wind = heading + yard.to_radians() + FRAC_PI_2;
        assert!((sail_efficiency(100.0, yard, wind, heading) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn beam_and_aft_winds_hit_the_floor() {
        assert!((sail_efficiency(100.0, 0.0, wind_at(90.0), 0.0) - 0.35).abs() < 1e-9);
        assert!((sail_efficiency(100.0, 0.0, wind_at(180.0), 0.0) - 0.35).abs() < 1e-9);
        assert!((sail_efficiency(50.0, 0.0, wind_at(135.0), 0.0) - 0.175).abs() < 1e-9);
    }

    #[test]
    fn linear_falloff_midpoint() {
        // 45° → 1 - 0.65 * 0.5
        assert!((sail_base_efficiency(45.0) - 0.675).abs() < 1e-12);
    }

    #[test]
    fn continuous_at_ninety_degrees() {
        let below = sail_base_efficiency(90.0 - 1e-9);
        let at = sail_base_efficiency(90.0);
        let above = sail_base_efficiency(90.0 + 1e-9);
        assert!((below - at).abs() < 1e-9);
        assert!((above - at).abs() < 1e-9);
    }

    #[test]
    fn acos_domain_is_guarded() {
        // Wind exactly along the normal, where rounding may push dot past 1.
        for k in 0..64 {
            let heading = k as f64 * 0.37;
            let wind = heading + FRAC_PI_2;
            let diff = wind_angle_to_sail(0.0, wind, heading);
            assert!(diff.is_finite());
            assert!((0.0..=180.0).contains(&diff));
        }
    }

    #[test]
    fn wheel_effectiveness_scales_with_deflection() {
        assert_eq!(wheel_effectiveness(0.0), 0.0);
        assert_eq!(wheel_effectiveness(15.0), 0.5);
        assert_eq!(wheel_effectiveness(-30.0), 1.0);
        assert_eq!(wheel_steering(-15.0), -0.5);
    }

    #[test]
    fn heavier_shot_flies_faster() {
        assert_eq!(projectile_speed(0.0), PROJECTILE_BASE_SPEED);
        assert!(projectile_speed(20.0) > projectile_speed(10.0));
    }

    #[test]
    fn fiber_height_is_linear_in_openness() {
        assert_eq!(fiber_height(0.0), 0.0);
        assert_eq!(fiber_height(100.0), SAIL_FIBER_BASE_HEIGHT);
        assert!((fiber_height(50.0) - SAIL_FIBER_BASE_HEIGHT / 2.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn efficiency_non_increasing_up_to_ninety(a in 0.0..90.0f64, b in 0.0..90.0f64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(sail_base_efficiency(lo) >= sail_base_efficiency(hi));
        }

        #[test]
        fn efficiency_stays_in_range(
            openness in 0.0..=100.0f64,
            yard in -75.0..=75.0f64,
            wind in -10.0..10.0f64,
            heading in -10.0..10.0f64,
        ) {
            let e = sail_efficiency(openness, yard, wind, heading);
            prop_assert!(e >= 0.0 && e <= 1.0);
            prop_assert!(e >= 0.35 * openness / 100.0 - 1e-12);
        }
    }
}
