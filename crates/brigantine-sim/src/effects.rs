//! Transient visual effects. Effects hold no physics bodies: dropping one
//! from its [`EphemeralSet`](crate::ephemeral::EphemeralSet) is its whole
//! teardown.

use glam::DVec2;
use rand::Rng;

use brigantine_core::constants::*;
use brigantine_core::enums::EffectType;

use crate::ephemeral::Ephemeral;
use crate::render::{self, palette, ColorStop, Gradient, Paint, Rgba, Surface};

/// A single particle, positioned relative to the effect origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub offset: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectKind {
    /// Ring growing from nothing to `size`.
    Impact,
    /// Burst of particles slowing under drag.
    Explosion { particles: Vec<Particle> },
    /// Droplets thrown up and pulled back down.
    Splash { droplets: Vec<Particle> },
    /// Full-frame fade in screen space; position is ignored.
    Flash { color: Rgba },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub position: DVec2,
    pub size: f64,
    elapsed: f64,
    duration: f64,
    kind: EffectKind,
}

impl Effect {
    fn new(position: DVec2, size: f64, duration: f64, kind: EffectKind) -> Self {
        Self {
            position,
            size,
            elapsed: 0.0,
            duration: duration.max(0.0),
            kind,
        }
    }

    pub fn impact(position: DVec2, size: f64) -> Self {
        Self::new(position, size, IMPACT_DURATION, EffectKind::Impact)
    }

    pub fn explosion(position: DVec2, size: f64, rng: &mut impl Rng) -> Self {
        let particles = (0..EXPLOSION_PARTICLES)
            .map(|_| {
                let heading: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
                let speed = size * rng.gen_range(2.0..5.0);
                Particle {
                    offset: DVec2::ZERO,
                    velocity: DVec2::from_angle(heading) * speed,
                    radius: size * rng.gen_range(0.1..0.25),
                }
            })
            .collect();
        Self::new(
            position,
            size,
            EXPLOSION_DURATION,
            EffectKind::Explosion { particles },
        )
    }

    pub fn splash(position: DVec2, size: f64, rng: &mut impl Rng) -> Self {
        let droplets = (0..SPLASH_PARTICLES)
            .map(|_| Particle {
                offset: DVec2::ZERO,
                velocity: DVec2::new(
                    size * rng.gen_range(-2.0..2.0),
                    -size * rng.gen_range(3.0..6.0),
                ),
                radius: size * rng.gen_range(0.06..0.14),
            })
            .collect();
        Self::new(position, size, SPLASH_DURATION, EffectKind::Splash { droplets })
    }

    pub fn flash(color: Rgba, duration: f64) -> Self {
        Self::new(DVec2::ZERO, 0.0, duration, EffectKind::Flash { color })
    }

    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    pub fn effect_type(&self) -> EffectType {
        match self.kind {
            EffectKind::Impact => EffectType::Impact,
            EffectKind::Explosion { .. } => EffectType::Explosion,
            EffectKind::Splash { .. } => EffectType::Splash,
            EffectKind::Flash { .. } => EffectType::Flash,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Completion in `0.0..=1.0`. A zero duration is complete immediately.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    fn render_impact(&self, surface: &mut dyn Surface, progress: f64) {
        let fade = 1.0 - progress;
        surface.begin_path();
        surface.arc(
            self.position,
            (self.size * progress).max(0.5),
            0.0,
            std::f64::consts::TAU,
        );
        surface.stroke(&palette::IMPACT.fade(fade).into(), 1.0 + 3.0 * fade);
    }

    fn render_explosion(&self, surface: &mut dyn Surface, particles: &[Particle], progress: f64) {
        let fade = 1.0 - progress;
        if progress < 0.5 {
            let core = Gradient::Radial {
                center: self.position,
                inner_radius: 0.0,
                outer_radius: self.size * (1.0 - progress),
                stops: vec![
                    ColorStop {
                        offset: 0.0,
                        color: palette::FIRE.fade(fade),
                    },
                    ColorStop {
                        offset: 1.0,
                        color: palette::FIRE.fade(0.0),
                    },
                ],
            };
            render::fill_circle(
                surface,
                self.position,
                self.size * (1.0 - progress),
                &Paint::Gradient(core),
            );
        }
        let color = if progress < 0.4 {
            palette::FIRE
        } else {
            palette::SMOKE
        };
        let paint: Paint = color.fade(fade).into();
        for p in particles {
            render::fill_circle(
                surface,
                self.position + p.offset,
                p.radius * (1.0 - 0.5 * progress),
                &paint,
            );
        }
    }

    fn render_splash(&self, surface: &mut dyn Surface, droplets: &[Particle], progress: f64) {
        let fade = 1.0 - progress;
        let half = self.size * (0.5 + progress);
        surface.begin_path();
        surface.move_to(self.position - DVec2::new(half, 0.0));
        surface.quadratic_curve_to(
            self.position - DVec2::new(0.0, self.size * 0.6 * fade),
            self.position + DVec2::new(half, 0.0),
        );
        surface.stroke(&palette::FOAM.fade(fade).into(), 2.0);

        let paint: Paint = palette::FOAM.fade(fade).into();
        for d in droplets {
            render::fill_circle(surface, self.position + d.offset, d.radius, &paint);
        }
    }

    fn render_flash(&self, surface: &mut dyn Surface, color: Rgba, progress: f64) {
        let viewport = surface.viewport();
        surface.save();
        surface.begin_path();
        surface.rect(DVec2::ZERO, viewport);
        surface.fill(&color.fade(1.0 - progress).into());
        surface.restore();
    }
}

impl Ephemeral for Effect {
    fn tick(&mut self, dt: f64) {
        // Integrate particles only over the time the effect has left.
        let step = dt.min(self.duration - self.elapsed).max(0.0);
        self.elapsed = (self.elapsed + dt).min(self.duration);

        match &mut self.kind {
            EffectKind::Explosion { particles } => {
                let drag = (-PARTICLE_DRAG * step).exp();
                for p in particles.iter_mut() {
                    p.offset += p.velocity * step;
                    p.velocity *= drag;
                }
            }
            EffectKind::Splash { droplets } => {
                for d in droplets.iter_mut() {
                    d.velocity.y += SPLASH_GRAVITY * step;
                    d.offset += d.velocity * step;
                }
            }
            EffectKind::Impact | EffectKind::Flash { .. } => {}
        }
    }

    fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    fn render(&self, surface: &mut dyn Surface) {
        let progress = self.progress();
        match &self.kind {
            EffectKind::Impact => self.render_impact(surface, progress),
            EffectKind::Explosion { particles } => {
                self.render_explosion(surface, particles, progress)
            }
            EffectKind::Splash { droplets } => self.render_splash(surface, droplets, progress),
            EffectKind::Flash { color } => self.render_flash(surface, *color, progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeral::EphemeralSet;
    use crate::physics::KinematicWorld;
    use crate::render::{DrawCommand, DrawList};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn large_step_clamps_progress() {
        let mut effect = Effect::flash(palette::FLASH, 0.5);
        effect.tick(0.6);
        assert_eq!(effect.progress(), 1.0);
        assert!(effect.is_finished());
        assert_eq!(effect.elapsed(), 0.5);
    }

    #[test]
    fn zero_duration_is_already_finished() {
        let effect = Effect::flash(palette::FLASH, 0.0);
        assert_eq!(effect.progress(), 1.0);
        assert!(effect.is_finished());
    }

    #[test]
    fn progress_is_linear_before_completion() {
        let mut effect = Effect::impact(DVec2::ZERO, 20.0);
        effect.tick(IMPACT_DURATION / 4.0);
        assert!((effect.progress() - 0.25).abs() < 1e-12);
        assert!(!effect.is_finished());
    }

    #[test]
    fn set_removes_effect_on_the_finishing_tick() {
        let mut physics = KinematicWorld::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut effects = EphemeralSet::new();
        effects.push(Effect::explosion(DVec2::ZERO, 10.0, &mut rng));
        effects.push(Effect::impact(DVec2::ZERO, 10.0));

        // Impact (0.5s) finishes first, explosion (0.8s) after.
        assert_eq!(effects.tick(0.5, &mut physics), 1);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.tick(0.5, &mut physics), 1);
        assert!(effects.is_empty());
    }

    #[test]
    fn explosion_particles_spread_and_slow() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut effect = Effect::explosion(DVec2::new(50.0, 50.0), 10.0, &mut rng);
        let initial: Vec<f64> = match effect.kind() {
            EffectKind::Explosion { particles } => {
                particles.iter().map(|p| p.velocity.length()).collect()
            }
            _ => unreachable!(),
        };
        effect.tick(0.2);
        match effect.kind() {
            EffectKind::Explosion { particles } => {
                assert_eq!(particles.len(), EXPLOSION_PARTICLES);
                for (p, v0) in particles.iter().zip(initial) {
                    assert!(p.offset.length() > 0.0);
                    assert!(p.velocity.length() < v0);
                }
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn splash_droplets_fall_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut effect = Effect::splash(DVec2::ZERO, 10.0, &mut rng);
        let vy0 = match effect.kind() {
            EffectKind::Splash { droplets } => droplets[0].velocity.y,
            _ => unreachable!(),
        };
        assert!(vy0 < 0.0, "droplets start upward");
        effect.tick(0.1);
        match effect.kind() {
            EffectKind::Splash { droplets } => assert!(droplets[0].velocity.y > vy0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let a = Effect::explosion(DVec2::ZERO, 5.0, &mut ChaCha8Rng::seed_from_u64(9));
        let b = Effect::explosion(DVec2::ZERO, 5.0, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn flash_covers_the_viewport() {
        let effect = Effect::flash(palette::FLASH, 1.0);
        let mut list = DrawList::new(DVec2::new(640.0, 480.0));
        effect.render(&mut list);
        assert!(list.commands.contains(&DrawCommand::Rect {
            x: 0.0,
            y: 0.0,
            width: 640.0,
            height: 480.0
        }));
        assert_eq!(list.depth(), 0);
    }

    #[test]
    fn effect_types() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(Effect::impact(DVec2::ZERO, 1.0).effect_type(), EffectType::Impact);
        assert_eq!(
            Effect::splash(DVec2::ZERO, 1.0, &mut rng).effect_type(),
            EffectType::Splash
        );
        assert_eq!(Effect::flash(palette::FLASH, 1.0).effect_type(), EffectType::Flash);
    }
}
