//! `grav_hut`: a real-time gravitational N-body simulator using a
//! Barnes-Hut octree for approximate force evaluation.
//!
//! The simulation core is an explicit `World` handle (see [`world`]) built
//! from a fixed-size body vector, a per-tick octree, a small parallel
//! harness, and a set of preset initial-condition generators. There is no
//! renderer here; this crate produces and evolves simulation state, and a
//! caller (a GUI, a headless runner, a test) drives it through `World`'s
//! command surface.

pub mod body;
pub mod config;
pub mod error;
pub mod octree;
pub mod parallel;
pub mod rng;
pub mod systems;
pub mod vec3;
pub mod world;

pub use body::Body;
pub use config::SimConfig;
pub use error::SimError;
pub use octree::{Octree, OctreeConfig};
pub use parallel::ParallelHarness;
pub use rng::Prng;
pub use systems::SystemType;
pub use vec3::Vec3;
pub use world::{Camera, RenderBody, World};
