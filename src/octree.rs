//! The Barnes-Hut octree: insertion, aggregate bookkeeping, and the
//! acceleration query (spec.md §4.4).
//!
//! Nodes live in a flat arena (`Vec<Node>`) indexed by `usize`, following
//! the design note in spec.md §9 ("prefer a single backing arena... to
//! eliminate pointer chasing"). A tree is built fresh every tick and
//! dropped at the end of it; it never outlives the tick that built it.

use crate::vec3::Vec3;

/// Tunable constants for tree construction and the acceptance criterion.
/// Defaults match spec.md §4.4.
#[derive(Clone, Copy, Debug)]
pub struct OctreeConfig {
    /// Multipole acceptance criterion threshold (cell width / distance).
    pub theta: f64,
    /// Softening length in the force denominator.
    pub epsilon: f64,
    /// Halt subdivision when a child's width would fall below this.
    pub minimum_width: f64,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            theta: 0.5,
            epsilon: 700.,
            minimum_width: 1.0,
        }
    }
}

#[derive(Debug)]
struct Node {
    center: Vec3,
    width: f64,
    mass: f64,
    center_of_mass: Vec3,
    count: usize,
    /// Remembered while `count <= 1`; descended into a child on the 1→2
    /// transition (spec.md §4.4, `Insert` steps 2–3).
    first_body: Option<(Vec3, f64)>,
    children: Option<Box<[Option<usize>; 8]>>,
}

impl Node {
    fn new(center: Vec3, width: f64) -> Self {
        Self {
            center,
            width,
            mass: 0.,
            center_of_mass: Vec3::new_zero(),
            count: 0,
            first_body: None,
            children: None,
        }
    }
}

/// A recursive spatial index over bodies present during one tick.
pub struct Octree {
    nodes: Vec<Node>,
    config: OctreeConfig,
    g: f64,
}

impl Octree {
    /// An empty tree rooted at `center` with the given `width`.
    pub fn new(center: Vec3, width: f64, config: OctreeConfig, g: f64) -> Self {
        Self {
            nodes: vec![Node::new(center, width)],
            config,
            g,
        }
    }

    /// Build a tree from an iterator of `(position, mass)` pairs.
    pub fn build(
        bodies: impl IntoIterator<Item = (Vec3, f64)>,
        center: Vec3,
        width: f64,
        config: OctreeConfig,
        g: f64,
    ) -> Self {
        let mut tree = Self::new(center, width, config, g);
        for (pos, mass) in bodies {
            tree.insert(pos, mass);
        }
        tree
    }

    /// Total mass at the root (`Σ body.mass` over everything inserted).
    pub fn mass(&self) -> f64 {
        self.nodes[0].mass
    }

    /// Center of mass at the root.
    pub fn center_of_mass(&self) -> Vec3 {
        self.nodes[0].center_of_mass
    }

    /// Number of bodies inserted at the root.
    pub fn body_count(&self) -> usize {
        self.nodes[0].count
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert one body's `(position, mass)` starting at the root.
    pub fn insert(&mut self, pos: Vec3, mass: f64) {
        self.insert_at(0, pos, mass);
    }

    fn insert_at(&mut self, node_idx: usize, pos: Vec3, mass: f64) {
        let (center, width, became_first, became_second);
        {
            let node = &mut self.nodes[node_idx];
            let old_mass = node.mass;
            let new_mass = old_mass + mass;
            node.center_of_mass = if new_mass.abs() > f64::EPSILON {
                (node.center_of_mass * old_mass + pos * mass) / new_mass
            } else {
                Vec3::new_zero()
            };
            node.mass = new_mass;
            node.count += 1;

            center = node.center;
            width = node.width;
            became_first = node.count == 1;
            became_second = node.count == 2;

            if became_first {
                node.first_body = Some((pos, mass));
            }
        }

        if became_first {
            return;
        }

        if became_second {
            let (first_pos, first_mass) = self.nodes[node_idx].first_body.take().unwrap();
            self.descend(node_idx, first_pos, first_mass, center, width);
        }

        self.descend(node_idx, pos, mass, center, width);
    }

    /// Route `(pos, mass)` into the appropriate child of `node_idx`, whose
    /// center/width are `center`/`width`. Does nothing (contributes only
    /// to the parent's aggregates) once the child width would fall below
    /// `MinimumWidth`.
    fn descend(&mut self, node_idx: usize, pos: Vec3, mass: f64, center: Vec3, width: f64) {
        let child_width = width / 2.;
        if child_width < self.config.minimum_width {
            return;
        }

        let octant = Self::octant_index(pos, center);

        if self.nodes[node_idx].children.is_none() {
            self.nodes[node_idx].children = Some(Box::new([None; 8]));
        }

        let existing = self.nodes[node_idx].children.as_ref().unwrap()[octant];
        let child_idx = match existing {
            Some(idx) => idx,
            None => {
                let child_center = Self::child_center(center, width, octant);
                let idx = self.nodes.len();
                self.nodes.push(Node::new(child_center, child_width));
                self.nodes[node_idx].children.as_mut().unwrap()[octant] = Some(idx);
                idx
            }
        };

        self.insert_at(child_idx, pos, mass);
    }

    /// Octant index by sign of `pos` relative to `center`, per axis. A
    /// position exactly on a split plane (`==`) routes to the positive
    /// side — spec.md §9 open question 1, resolved as `≥`.
    fn octant_index(pos: Vec3, center: Vec3) -> usize {
        let mut idx = 0;
        if pos.x >= center.x {
            idx |= 0b001;
        }
        if pos.y >= center.y {
            idx |= 0b010;
        }
        if pos.z >= center.z {
            idx |= 0b100;
        }
        idx
    }

    fn child_center(center: Vec3, width: f64, octant: usize) -> Vec3 {
        let off = width / 4.;
        let signed = |bit: usize| if octant & bit != 0 { off } else { -off };
        center + Vec3::new(signed(0b001), signed(0b010), signed(0b100))
    }

    /// Accumulated gravitational acceleration this tree imparts on a body
    /// at `target`. A body co-located with the only body in a leaf is
    /// never double-counted (spec.md §4.4's leaf-miss rule): self-force
    /// between a body and the tree it's a member of is geometrically
    /// impossible to trigger, since the body's own leaf always contains
    /// its own position.
    pub fn accelerate(&self, target: Vec3) -> Vec3 {
        let mut acc = Vec3::new_zero();
        self.accelerate_at(0, target, &mut acc);
        acc
    }

    fn accelerate_at(&self, node_idx: usize, target: Vec3, acc: &mut Vec3) {
        let node = &self.nodes[node_idx];
        if node.mass <= 0. {
            return;
        }

        if node.count == 1 {
            let half = node.width / 2.;
            let outside = (target.x - node.center.x).abs() > half
                || (target.y - node.center.y).abs() > half
                || (target.z - node.center.z).abs() > half;
            if outside {
                Self::apply(node, target, acc, self.g, self.config.epsilon);
            }
            return;
        }

        let d = node.center_of_mass - target;
        let dist_sq = d.magnitude_squared();
        let width_sq = node.width * node.width;

        if width_sq < self.config.theta * self.config.theta * dist_sq {
            Self::apply(node, target, acc, self.g, self.config.epsilon);
            return;
        }

        if let Some(children) = &node.children {
            for child in children.iter().flatten() {
                self.accelerate_at(*child, target, acc);
            }
        }
    }

    fn apply(node: &Node, target: Vec3, acc: &mut Vec3, g: f64, epsilon: f64) {
        let d = node.center_of_mass - target;
        let r_sq = d.magnitude_squared() + epsilon * epsilon;
        let r = r_sq.sqrt();
        let k = g * node.mass / (r * r * r);
        *acc += d * k;
    }
}
