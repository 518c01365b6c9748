//! Simulation constants and tuning parameters.
//!
//! Distances are in world units (one unit renders as one pixel at zoom 1),
//! times in seconds, angles in degrees unless the name says otherwise.

/// Nominal frame rate the frontend drives `tick` at (Hz).
pub const TICK_RATE: u32 = 60;

/// Nominal seconds per frame.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest single physics integration step (seconds). Longer frames are
/// sub-stepped.
pub const MAX_PHYSICS_STEP: f64 = 1.0 / 30.0;

/// Upper bound on physics sub-steps per frame.
pub const MAX_PHYSICS_SUBSTEPS: u32 = 8;

// --- World ---

/// Radius of the playable sea around the origin.
pub const WORLD_RADIUS: f64 = 2_000.0;

// --- Hull ---

/// Hull length along the ship's heading.
pub const HULL_LENGTH: f64 = 200.0;

/// Hull width across the beam.
pub const HULL_BEAM: f64 = 80.0;

/// Hull density (mass per square unit).
pub const HULL_DENSITY: f64 = 0.001;

/// Linear damping of the hull in water (1/s).
pub const HULL_LINEAR_DAMPING: f64 = 0.5;

/// Angular damping of the hull (1/s).
pub const HULL_ANGULAR_DAMPING: f64 = 2.0;

/// Radius used for ship-vs-treasure pickup checks.
pub const SHIP_PICKUP_RADIUS: f64 = HULL_LENGTH / 2.0;

// --- Ship motion ---

/// Forward force per unit of summed sail efficiency per unit of wind speed.
pub const SAIL_THRUST: f64 = 20.0;

/// Turn rate at full rudder and full steerage (rad/s).
pub const TURN_RATE: f64 = 0.6;

/// Speed at which the rudder reaches full authority.
pub const STEERAGE_SPEED: f64 = 20.0;

// --- Sail ---

/// Fully deployed openness (percent).
pub const SAIL_MAX_OPENNESS: f64 = 100.0;

/// Maximum yard angle either side of square (degrees).
pub const SAIL_MAX_ANGLE: f64 = 75.0;

/// Efficiency floor once the wind is at or beyond the sail's beam.
pub const SAIL_MIN_EFFICIENCY: f64 = 0.35;

/// Radius of the solid mast body.
pub const SAIL_MAST_RADIUS: f64 = 8.0;

/// Mast body density.
pub const SAIL_MAST_DENSITY: f64 = 0.002;

/// Thickness of the fiber sensor along the ship's heading.
pub const SAIL_FIBER_THICKNESS: f64 = 6.0;

/// Span of the fiber sensor across the beam at full openness.
pub const SAIL_FIBER_BASE_HEIGHT: f64 = 90.0;

// --- Wheel ---

/// Wheel deflection limit either side of centre (degrees).
pub const WHEEL_MAX_ANGLE: f64 = 30.0;

/// Largest deflection change a single turn call may apply (degrees).
pub const WHEEL_MAX_STEP: f64 = 5.0;

/// Largest change a single centre call may apply (degrees).
pub const WHEEL_CENTER_STEP: f64 = 3.0;

/// Side length of the square wheel sensor.
pub const WHEEL_BODY_SIZE: f64 = 20.0;

// --- Cannon ---

/// Default reload time (seconds).
pub const CANNON_MAX_COOLDOWN: f64 = 2.0;

/// Default damage per shot.
pub const CANNON_DAMAGE: f64 = 10.0;

/// Cannon mount body length (along the barrel).
pub const CANNON_BODY_LENGTH: f64 = 24.0;

/// Cannon mount body width.
pub const CANNON_BODY_WIDTH: f64 = 12.0;

/// Cannon mount density.
pub const CANNON_DENSITY: f64 = 0.004;

// --- Projectile ---

/// Muzzle speed before the damage bonus.
pub const PROJECTILE_BASE_SPEED: f64 = 300.0;

/// Extra muzzle speed per point of damage.
pub const PROJECTILE_DAMAGE_SPEED_FACTOR: f64 = 5.0;

/// Seconds a projectile flies before it drops into the sea.
pub const PROJECTILE_MAX_LIFETIME: f64 = 2.0;

/// Projectile body radius.
pub const PROJECTILE_RADIUS: f64 = 4.0;

/// Projectile body density.
pub const PROJECTILE_DENSITY: f64 = 0.01;

// --- Effects ---

pub const IMPACT_DURATION: f64 = 0.5;
pub const EXPLOSION_DURATION: f64 = 0.8;
pub const SPLASH_DURATION: f64 = 0.7;
pub const FLASH_DURATION: f64 = 0.25;

/// Particles in an explosion burst.
pub const EXPLOSION_PARTICLES: usize = 24;

/// Droplets in a splash.
pub const SPLASH_PARTICLES: usize = 16;

/// Velocity decay of explosion particles (1/s).
pub const PARTICLE_DRAG: f64 = 2.5;

/// Downward pull on splash droplets (units/s²).
pub const SPLASH_GRAVITY: f64 = 240.0;

/// Size of the muzzle burst spawned on every shot.
pub const MUZZLE_BURST_SIZE: f64 = 14.0;

/// Size of the splash where a projectile drops into the sea.
pub const SPLASH_SIZE: f64 = 18.0;

// --- Treasure ---

/// Bobbing animation rate of floating treasure (rad/s).
pub const TREASURE_BOB_RATE: f64 = 2.0;

/// Bobbing amplitude (units).
pub const TREASURE_BOB_AMPLITUDE: f64 = 2.5;

/// Default number of treasures scattered at voyage start.
pub const TREASURE_DEFAULT_COUNT: usize = 12;

// --- Wind ---

/// Default wind speed.
pub const WIND_DEFAULT_SPEED: f64 = 10.0;

/// Largest wind direction change per second (rad/s).
pub const WIND_MAX_DRIFT_RATE: f64 = 0.05;
