// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Detecting atoms of different molecules that sit inside each other, and
//! pushing a molecule clear of its neighbours.

use bevy::{log::debug, math::Vec3, transform::components::Transform};
use common::BoundingBox;
use periodic_table::PeriodicTable;
use rand::Rng;

use crate::Molecule;

/// An atom reduced to the volume it occupies, in world coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

pub fn spheres(
    molecule: &Molecule,
    transform: &Transform,
    periodic_table: &PeriodicTable,
    scale: f32,
) -> Vec<Sphere> {
    molecule
        .atoms
        .iter()
        .map(|atom| Sphere {
            center: transform.transform_point(atom.position),
            radius: periodic_table.repr_for_symbol(&atom.symbol).radius * scale,
        })
        .collect()
}

fn bounds(spheres: &[Sphere]) -> BoundingBox {
    let mut bb = BoundingBox::empty();
    for sphere in spheres {
        bb.enclose_sphere(sphere.center, sphere.radius);
    }
    bb
}

fn centroid(spheres: &[Sphere]) -> Option<Vec3> {
    if spheres.is_empty() {
        return None;
    }
    let sum: Vec3 = spheres.iter().map(|sphere| sphere.center).sum();
    Some(sum / spheres.len() as f32)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    /// How far the two spheres interpenetrate.
    pub depth: f32,
    /// Unit vector from the fixed atom toward the moving atom.  `None` when
    /// the two centres coincide.
    pub normal: Option<Vec3>,
}

/// The most deeply interpenetrating pair between `moving` and `fixed`.
///
/// Two spheres are in contact when their centres are closer than the sum of
/// their radii times `tolerance`.
pub fn deepest_contact(moving: &[Sphere], fixed: &[Sphere], tolerance: f32) -> Option<Contact> {
    let grow = |bb: BoundingBox| {
        // Radii are scaled by the tolerance, so the broad phase must be too.
        let margin = bb.half_extents() * (tolerance - 1.0).max(0.0);
        BoundingBox::from_corners(bb.min - margin, bb.max + margin)
    };
    let (moving_bb, fixed_bb) = (bounds(moving), bounds(fixed));
    if moving_bb.is_empty() || fixed_bb.is_empty() {
        return None;
    }
    if !grow(moving_bb).intersects(&grow(fixed_bb)) {
        return None;
    }

    let mut deepest: Option<Contact> = None;
    for a in moving {
        for b in fixed {
            let offset = a.center - b.center;
            let distance = offset.length();
            let depth = (a.radius + b.radius) * tolerance - distance;
            if depth <= 0.0 {
                continue;
            }
            if deepest.map_or(true, |contact| depth > contact.depth) {
                deepest = Some(Contact {
                    depth,
                    normal: offset.try_normalize(),
                });
            }
        }
    }
    deepest
}

pub fn molecules_overlap(a: &[Sphere], b: &[Sphere], tolerance: f32) -> bool {
    deepest_contact(a, b, tolerance).is_some()
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlapConfig {
    pub tolerance: f32,
    /// Extra clearance added to every push, in ångströms.
    pub padding: f32,
    pub max_iterations: usize,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            padding: 0.1,
            max_iterations: 64,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Translation to apply to the moving molecule.
    pub offset: Vec3,
    pub iterations: usize,
    /// False if contacts remained after `max_iterations` pushes.
    pub resolved: bool,
}

/// Finds a translation that moves `moving` clear of every obstacle.
///
/// Each step pushes the moving set out of its deepest contact along the
/// contact normal.  Coincident atoms fall back to the direction between the
/// two molecules' centroids, and then to a random direction.
pub fn resolve_overlap(
    moving: &[Sphere],
    obstacles: &[Vec<Sphere>],
    config: &OverlapConfig,
    rng: &mut impl Rng,
) -> Resolution {
    let mut offset = Vec3::ZERO;
    let mut shifted = moving.to_vec();

    for iteration in 0..config.max_iterations {
        let deepest = obstacles
            .iter()
            .filter_map(|obstacle| {
                deepest_contact(&shifted, obstacle, config.tolerance)
                    .map(|contact| (contact, obstacle))
            })
            .max_by(|(a, _), (b, _)| a.depth.total_cmp(&b.depth));

        let Some((contact, obstacle)) = deepest else {
            return Resolution {
                offset,
                iterations: iteration,
                resolved: true,
            };
        };

        let direction = contact
            .normal
            .or_else(|| match (centroid(&shifted), centroid(obstacle)) {
                (Some(ours), Some(theirs)) => (ours - theirs).try_normalize(),
                _ => None,
            })
            .unwrap_or_else(|| random_direction(rng));

        let step = direction * (contact.depth + config.padding);
        offset += step;
        for sphere in &mut shifted {
            sphere.center += step;
        }
    }

    let resolved = obstacles
        .iter()
        .all(|obstacle| !molecules_overlap(&shifted, obstacle, config.tolerance));
    if !resolved {
        debug!(
            "overlap unresolved after {} iterations, offset {:?}",
            config.max_iterations, offset
        );
    }
    Resolution {
        offset,
        iterations: config.max_iterations,
        resolved,
    }
}

fn random_direction(rng: &mut impl Rng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let length_squared = candidate.length_squared();
        if length_squared > 1e-6 && length_squared <= 1.0 {
            return candidate / length_squared.sqrt();
        }
    }
}


// End of File
