//! Wind state and its slow random drift.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use brigantine_core::state::WindView;

#[derive(Debug, Clone, Copy)]
pub struct Wind {
    /// Direction the wind blows toward (radians, `0..TAU`).
    pub direction: f64,
    pub speed: f64,
    /// Largest direction change per second.
    pub drift_rate: f64,
}

impl Wind {
    pub fn new(direction: f64, speed: f64, drift_rate: f64) -> Self {
        Self {
            direction: direction.rem_euclid(std::f64::consts::TAU),
            speed: speed.max(0.0),
            drift_rate: drift_rate.max(0.0),
        }
    }

    pub fn view(&self) -> WindView {
        WindView {
            direction: self.direction,
            speed: self.speed,
        }
    }
}

/// Nudge the wind direction by at most `drift_rate * dt`. Speed is constant.
pub fn run(wind: &mut Wind, rng: &mut ChaCha8Rng, dt: f64) {
    if dt <= 0.0 || wind.drift_rate <= 0.0 {
        return;
    }
    let delta = rng.gen_range(-1.0..=1.0) * wind.drift_rate * dt;
    wind.direction = (wind.direction + delta).rem_euclid(std::f64::consts::TAU);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn drift_is_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut wind = Wind::new(1.0, 10.0, 0.05);
        for _ in 0..1_000 {
            let before = wind.direction;
            run(&mut wind, &mut rng, 0.1);
            let mut step = (wind.direction - before).abs();
            if step > std::f64::consts::PI {
                step = std::f64::consts::TAU - step;
            }
            assert!(step <= 0.005 + 1e-12);
            assert_eq!(wind.speed, 10.0);
        }
    }

    #[test]
    fn calm_wind_never_moves() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut wind = Wind::new(-1.0, 5.0, 0.0);
        let start = wind.direction;
        run(&mut wind, &mut rng, 1.0);
        assert_eq!(wind.direction, start);
        assert!(start >= 0.0);
    }
}
