//! Headless physics demo
//!
//! Spawns a seeded field of spheres, boxes and capsules drifting towards the
//! origin, runs them through the fixed-tick loop and logs every hit payload
//! the way a script bridge would receive it.
//!
//! Usage: `physics_demo [config.ron|config.toml]`

use std::process::ExitCode;

use rand::{rngs::StdRng, Rng, SeedableRng};
use scene_physics::events::{DispatchError, ScriptBridge};
use scene_physics::foundation::{logging, time::Stopwatch};
use scene_physics::prelude::*;

// Scene configuration
const SEED: u64 = 0x5eed;
const BODY_COUNT: u32 = 96;
const SPAWN_RADIUS: f32 = 24.0;
const MAX_SPEED: f32 = 6.0;
const FRAMES: u32 = 600;
const FRAME_DT: f32 = 1.0 / 60.0;

/// Bridge that logs payloads instead of running scripts
#[derive(Default)]
struct LoggingBridge {
    delivered: usize,
}

impl ScriptBridge for LoggingBridge {
    fn on_hit(&mut self, entity: Entity, hit: &serde_json::Value) -> Result<(), DispatchError> {
        self.delivered += 1;
        log::debug!("onHit {} {}", entity, hit);
        Ok(())
    }
}

struct Scene {
    transforms: ComponentArray<TransformComponent>,
    physics: ComponentArray<PhysicsComponent>,
    colliders: ComponentArray<ColliderComponent>,
}

impl Scene {
    fn spawn(rng: &mut StdRng) -> Self {
        let mut scene = Self {
            transforms: ComponentArray::with_capacity(BODY_COUNT as usize),
            physics: ComponentArray::with_capacity(BODY_COUNT as usize),
            colliders: ComponentArray::with_capacity(BODY_COUNT as usize),
        };

        for id in 1..=BODY_COUNT {
            let entity = Entity::new(id);
            let position = random_vec(rng, SPAWN_RADIUS);
            let rotation = Quat::from_euler_angles(
                rng.gen_range(0.0..std::f32::consts::TAU),
                rng.gen_range(0.0..std::f32::consts::TAU),
                rng.gen_range(0.0..std::f32::consts::TAU),
            );
            let shape = match id % 4 {
                0 => ColliderShape::aabb(Vec3::new(0.5, 0.5, 0.5)),
                1 => ColliderShape::oriented_box(Vec3::new(1.0, 0.5, 0.25)),
                2 => ColliderShape::capsule(0.4, 0.8),
                _ => ColliderShape::sphere(rng.gen_range(0.5..1.5)),
            };
            // Aim loosely at the origin so bodies meet
            let velocity = (random_vec(rng, 2.0) - position).normalize() * rng.gen_range(1.0..MAX_SPEED);

            scene
                .transforms
                .insert(TransformComponent::from_position(entity, position).with_rotation(rotation));
            scene
                .physics
                .insert(PhysicsComponent::new(entity).with_velocity(velocity).with_mass(rng.gen_range(1.0..10.0)));
            scene.colliders.insert(ColliderComponent::new(entity, shape));
        }

        scene
    }

    fn step(&mut self, system: &mut PhysicsSystem, dt: f32) -> Result<Vec<HitInfo>, PhysicsError> {
        system.update_physics(
            self.transforms.as_mut_slice(),
            self.physics.as_mut_slice(),
            self.colliders.as_mut_slice(),
            dt,
        )
    }
}

fn random_vec(rng: &mut StdRng, extent: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

fn load_config() -> Result<EngineConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("physics_demo: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init_with_level(&config.log_level);

    let mut rng = StdRng::seed_from_u64(SEED);
    let mut scene = Scene::spawn(&mut rng);
    let mut clock = FixedTimestep::new(config.physics.tick_rate_hz, config.physics.max_ticks_per_frame);
    let mut system = PhysicsSystem::new(config.physics.clone());
    let mut queue = HitEventQueue::new();
    let mut bridge = LoggingBridge::default();
    let mut physics_time = Stopwatch::new();

    log::info!(
        "Simulating {} bodies for {} frames ({} broad phase, {} Hz)",
        BODY_COUNT,
        FRAMES,
        system.broad_phase_name(),
        config.physics.tick_rate_hz
    );

    for frame in 0..FRAMES {
        for _ in 0..clock.advance(FRAME_DT) {
            physics_time.start();
            let result = scene.step(&mut system, clock.tick_dt());
            physics_time.stop();
            match result {
                Ok(hits) => queue.extend(hits),
                Err(e) => {
                    log::error!("Physics tick {} failed: {}", clock.tick_count(), e);
                    return ExitCode::FAILURE;
                }
            }
        }

        let pending = queue.len();
        if let Err(e) = queue.dispatch(&mut bridge) {
            log::warn!("Frame {}: dropped hits after dispatch error: {}", frame, e);
        } else if pending > 0 {
            log::trace!("Frame {}: {} hits dispatched", frame, pending);
        }
    }

    log::info!(
        "Done: {} ticks in {:.2} ms of physics, {} hits delivered",
        clock.tick_count(),
        physics_time.elapsed_millis(),
        bridge.delivered
    );
    ExitCode::SUCCESS
}
