//! The per-tick orchestrator and command surface (spec.md §4.6, §6).
//!
//! `World` is an explicit simulation handle rather than a global singleton
//! — spec.md §9's design note. `G` and `C` live as fields on `self.config`
//! (behind a lock, since they're read/written at runtime per spec.md §6),
//! not as process-wide statics.
//!
//! Body storage is a `RwLock<Vec<Option<Body>>>`. The reference tolerates
//! a renderer reading body positions without taking any lock at all; Rust
//! can't make that sound without unsafe code, so readers here take a
//! (normally uncontended, since a tick only holds the write lock for its
//! own duration) read lock instead — the safe alternative spec.md §9
//! explicitly allows ("a per-tick double-buffered position array is a
//! clean alternative to the reference's lock-skipping read").
//!
//! `spawn` is the validating boundary for spec.md §7's precondition
//! violation (negative mass, non-finite coordinate): it's the one place
//! outside the preset generators where a caller-supplied body reaches the
//! world, so it's the one that rejects bad input and leaves state
//! unchanged rather than trusting it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

use crate::body::Body;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::octree::Octree;
use crate::parallel::ParallelHarness;
use crate::rng::Prng;
use crate::systems::{self, SystemType};
use crate::vec3::Vec3;

/// Camera position/velocity along the simulation's Z axis, with easing.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub z: f64,
    pub vz: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { z: 1., vz: 0. }
    }
}

/// A body's render-facing state: position and visual radius.
#[derive(Clone, Copy, Debug)]
pub struct RenderBody {
    pub position: Vec3,
    pub radius: f64,
}

pub struct World {
    bodies: RwLock<Vec<Option<Body>>>,
    config: RwLock<SimConfig>,
    active: AtomicBool,
    frame_counter: AtomicU64,
    fps: Mutex<f64>,
    camera: Mutex<Camera>,
    rng: Mutex<Prng>,
    harness: ParallelHarness,
}

impl World {
    pub fn new(config: SimConfig) -> Self {
        let capacity = config.capacity;
        Self {
            bodies: RwLock::new((0..capacity).map(|_| None).collect()),
            config: RwLock::new(config),
            active: AtomicBool::new(false),
            frame_counter: AtomicU64::new(0),
            fps: Mutex::new(0.),
            camera: Mutex::new(Camera::default()),
            rng: Mutex::new(Prng::from_entropy()),
            harness: ParallelHarness::new(),
        }
    }

    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        let w = Self::new(config);
        *w.rng.lock().unwrap() = Prng::seeded(seed);
        w
    }

    /// Construct a world from a caller-provided body vector, bypassing the
    /// capacity-driven slot allocation of `new`. Intended for deterministic
    /// tests that need exact starting positions/velocities.
    pub fn with_bodies(config: SimConfig, bodies: Vec<Option<Body>>) -> Self {
        let config = SimConfig { capacity: bodies.len(), ..config };
        let w = Self::new(config);
        *w.bodies.write().unwrap() = bodies;
        w
    }

    // ---- commands (spec.md §6) ----------------------------------------

    pub fn generate(&self, kind: SystemType) -> Result<(), SimError> {
        let mut bodies = self.bodies.write().map_err(|_| SimError::LockPoisoned)?;
        let mut rng = self.rng.lock().map_err(|_| SimError::LockPoisoned)?;
        let g = self.config.read().map_err(|_| SimError::LockPoisoned)?.g;
        systems::generate(kind, &mut bodies, &mut rng, g);
        log::debug!("generated system {kind:?} across {} slots", bodies.len());
        Ok(())
    }

    /// Place a single body at `position` with `mass` in the first empty
    /// slot, validating through `Body::new_checked` (spec.md §7's
    /// precondition violation: rejected, world state unchanged). A no-op
    /// if every slot is already occupied.
    pub fn spawn(&self, position: Vec3, mass: f64) -> Result<(), SimError> {
        let body = Body::new_checked(position, mass)?;
        let mut bodies = self.bodies.write().map_err(|_| SimError::LockPoisoned)?;
        if let Some(slot) = bodies.iter_mut().find(|s| s.is_none()) {
            *slot = Some(body);
        }
        Ok(())
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub fn toggle_active(&self) {
        self.active.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn rotate(&self, base: Vec3, axis: Vec3, angle: f64) -> Result<(), SimError> {
        if !base.is_finite() || !axis.is_finite() || !angle.is_finite() {
            return Err(SimError::NonFiniteCoordinate);
        }
        let mut bodies = self.bodies.write().map_err(|_| SimError::LockPoisoned)?;
        for slot in bodies.iter_mut().flatten() {
            slot.rotate(base, axis, angle);
        }
        Ok(())
    }

    pub fn move_camera(&self, delta: f64) {
        let mut camera = self.camera.lock().unwrap();
        camera.vz += delta;
    }

    pub fn reset_camera(&self) {
        *self.camera.lock().unwrap() = Camera::default();
    }

    pub fn camera(&self) -> Camera {
        *self.camera.lock().unwrap()
    }

    /// Resize the body vector's fixed capacity. Rare; acquires the body
    /// lock (spec.md §4.6, "Concurrency on mutation").
    pub fn resize(&self, new_capacity: i64) -> Result<(), SimError> {
        if new_capacity <= 0 {
            return Err(SimError::InvalidCapacity(new_capacity));
        }
        let new_capacity = new_capacity as usize;
        let mut bodies = self.bodies.write().map_err(|_| SimError::LockPoisoned)?;
        bodies.resize_with(new_capacity, || None);
        self.config.write().map_err(|_| SimError::LockPoisoned)?.capacity = new_capacity;
        Ok(())
    }

    // ---- observers (spec.md §6) ----------------------------------------

    pub fn body_count(&self) -> usize {
        self.bodies.read().unwrap().iter().flatten().count()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.read().unwrap().iter().flatten().map(|b| b.mass).sum()
    }

    pub fn frames(&self) -> u64 {
        self.frame_counter.load(Ordering::SeqCst)
    }

    pub fn fps(&self) -> f64 {
        *self.fps.lock().unwrap()
    }

    pub fn g(&self) -> f64 {
        self.config.read().unwrap().g
    }

    pub fn set_g(&self, g: f64) {
        self.config.write().unwrap().g = g;
    }

    pub fn c(&self) -> f64 {
        self.config.read().unwrap().c
    }

    pub fn set_c(&self, c: f64) {
        self.config.write().unwrap().c = c;
    }

    /// Snapshot of every live body's position and visual radius, for an
    /// external renderer. Torn-read tolerant callers may call this
    /// frequently without coordinating with the simulation thread.
    pub fn snapshot(&self) -> Vec<RenderBody> {
        self.bodies
            .read()
            .unwrap()
            .iter()
            .flatten()
            .map(|b| RenderBody {
                position: b.position,
                radius: b.radius(),
            })
            .collect()
    }

    // ---- the tick (spec.md §4.6) ----------------------------------------

    /// Advance the simulation by one tick: size the root, rebuild the
    /// tree, accelerate every body in parallel, integrate motion, then run
    /// housekeeping (camera, frame pacing, FPS) regardless of whether the
    /// physics ran this tick.
    pub fn tick(&self) -> Result<(), SimError> {
        let tick_start = Instant::now();

        if !self.active.load(Ordering::SeqCst) {
            self.housekeeping(tick_start);
            return Ok(());
        }

        let config = *self.config.read().map_err(|_| SimError::LockPoisoned)?;

        let root_count = {
            let mut bodies = self.bodies.write().map_err(|_| SimError::LockPoisoned)?;

            // Step 2: update every live body first, tracking the sizing
            // bound H as we go (spec.md §4.6 step 2's parenthetical: both
            // orders converge, we pick update-first).
            let mut h: f64 = 0.;
            for slot in bodies.iter_mut() {
                if let Some(body) = slot {
                    body.update(config.c);
                    if !body.is_finite() {
                        log::warn!("non-finite body state detected; quarantining acceleration");
                        body.acceleration = Vec3::new_zero();
                    }
                    h = h
                        .max(body.position.x.abs())
                        .max(body.position.y.abs())
                        .max(body.position.z.abs());
                }
            }

            // Steps 3-4: fresh root sized to 2.1*H, every live body inserted.
            let width = if h > 0. { 2.1 * h } else { 2.1 };
            let octree_config = config.octree_config();
            let positions = bodies.iter().flatten().map(|b| (b.position, b.mass));
            let tree = Octree::build(positions, Vec3::new_zero(), width, octree_config, config.g);
            let root_count = tree.body_count();
            log::trace!("tick: H={h}, root_width={width}, root_count={root_count}");

            // Step 5: parallel accelerate, one worker write per body.
            self.harness.for_each_indexed_mut(&mut bodies, |_, slot| {
                if let Some(body) = slot {
                    let acc = tree.accelerate(body.position);
                    body.acceleration += acc;
                }
            })?;

            root_count
        };

        self.housekeeping(tick_start);

        if root_count > 0 {
            self.frame_counter.fetch_add(1, Ordering::SeqCst);
        }

        Ok(())
    }

    fn housekeeping(&self, tick_start: Instant) {
        let config = *self.config.read().unwrap();

        {
            let mut camera = self.camera.lock().unwrap();
            camera.z += camera.vz * camera.z;
            camera.z = camera.z.max(1.);
            camera.vz *= config.camera_easing;
        }

        let target = Duration::from_secs_f64(config.frame_interval_ms / 1000.);
        let elapsed = tick_start.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }

        let actual_ms = tick_start.elapsed().as_secs_f64() * 1000.;
        if actual_ms > 0. {
            let mut fps = self.fps.lock().unwrap();
            *fps += (1000. / actual_ms - *fps) * 0.2;
            *fps = fps.min(config.fps_max);
        }
    }
}
