// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Keeps molecules from sitting inside one another.
//!
//! Newly added molecules are pushed clear of everything already in the scene.
//! The whole scene can also be settled on request, in which case each
//! molecule is moved clear of the ones listed before it.

use app_config::EditorSettings;
use bevy::prelude::*;
use molecule::overlap::{molecules_overlap, resolve_overlap, spheres, OverlapConfig, Sphere};
use periodic_table::PeriodicTable;

use crate::world_space::{
    local_molecule, AtomObject, AtomQuery, MoleculeObject, WorldSpace, WorldSpaceSet,
};

pub struct OverlapPlugin;

impl Plugin for OverlapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlapReport>()
            .add_event::<ResolveOverlaps>()
            .add_systems(
                Update,
                (resolve_new_molecules, resolve_all_molecules, update_overlap_report)
                    .chain()
                    .after(WorldSpaceSet),
            );
    }
}

/// Marks a molecule that has not yet been moved clear of the others.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PendingOverlapCheck;

/// Move every molecule clear of the ones before it in the molecule list.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct ResolveOverlaps;

/// Names of the molecule pairs currently overlapping, in scene order.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct OverlapReport {
    pub pairs: Vec<(String, String)>,
}

impl OverlapReport {
    pub fn is_clear(&self) -> bool {
        self.pairs.is_empty()
    }
}

type MoleculeTransforms<'w, 's> = Query<
    'w,
    's,
    (
        &'static MoleculeObject,
        &'static mut Transform,
        Option<&'static Children>,
        Has<PendingOverlapCheck>,
    ),
    Without<AtomObject>,
>;

fn overlap_config(settings: &EditorSettings) -> OverlapConfig {
    OverlapConfig {
        tolerance: settings.overlap_tolerance,
        padding: settings.overlap_padding,
        ..default()
    }
}

type MoleculePlacements<'w, 's> = Query<
    'w,
    's,
    (
        &'static MoleculeObject,
        Ref<'static, Transform>,
        Option<&'static Children>,
    ),
    Without<AtomObject>,
>;

/// Each molecule in scene order, with its atoms as world-space spheres and
/// whether it still awaits its first check.
fn scene_spheres(
    world_space: &WorldSpace,
    molecules: &MoleculeTransforms,
    atoms: &AtomQuery,
    periodic_table: &PeriodicTable,
    atom_scale: f32,
) -> Vec<(Entity, bool, Vec<Sphere>)> {
    world_space
        .molecules
        .iter()
        .filter_map(|&entity| {
            let (object, transform, children, pending) = molecules.get(entity).ok()?;
            let local = local_molecule(object, children, atoms);
            Some((
                entity,
                pending,
                spheres(&local, transform, periodic_table, atom_scale),
            ))
        })
        .collect()
}

/// Moves one molecule clear of `obstacles`, returning its new spheres.
fn settle(
    entity: Entity,
    moving: Vec<Sphere>,
    obstacles: &[Vec<Sphere>],
    config: &OverlapConfig,
    molecules: &mut MoleculeTransforms,
) -> Vec<Sphere> {
    let resolution = resolve_overlap(&moving, obstacles, config, &mut rand::thread_rng());
    let Ok((object, mut transform, _, _)) = molecules.get_mut(entity) else {
        return moving;
    };
    if resolution.offset != Vec3::ZERO {
        transform.translation += resolution.offset;
        debug!(
            "Moved {} by {:?} after {} steps",
            object.name, resolution.offset, resolution.iterations
        );
    }
    if !resolution.resolved {
        warn!("Could not move {} clear of its neighbours", object.name);
    }
    moving
        .into_iter()
        .map(|sphere| Sphere {
            center: sphere.center + resolution.offset,
            ..sphere
        })
        .collect()
}

fn resolve_new_molecules(
    mut commands: Commands,
    world_space: Res<WorldSpace>,
    pending_checks: Query<(), With<PendingOverlapCheck>>,
    mut molecules: MoleculeTransforms,
    atoms: AtomQuery,
    periodic_table: Res<PeriodicTable>,
    settings: Res<EditorSettings>,
) {
    if pending_checks.is_empty() {
        return;
    }
    let scene = scene_spheres(
        &world_space,
        &molecules,
        &atoms,
        &periodic_table,
        settings.atom_scale,
    );
    if !scene.iter().any(|(_, pending, _)| *pending) {
        return;
    }

    let config = overlap_config(&settings);
    let (pending, placed): (Vec<_>, Vec<_>) =
        scene.into_iter().partition(|(_, pending, _)| *pending);
    let mut obstacles: Vec<Vec<Sphere>> = placed.into_iter().map(|(_, _, s)| s).collect();

    for (entity, _, moving) in pending {
        let settled = settle(entity, moving, &obstacles, &config, &mut molecules);
        obstacles.push(settled);
        commands.entity(entity).remove::<PendingOverlapCheck>();
    }
}

fn resolve_all_molecules(
    mut events: EventReader<ResolveOverlaps>,
    world_space: Res<WorldSpace>,
    mut molecules: MoleculeTransforms,
    atoms: AtomQuery,
    periodic_table: Res<PeriodicTable>,
    settings: Res<EditorSettings>,
) {
    if events.read().count() == 0 {
        return;
    }
    let config = overlap_config(&settings);
    let scene = scene_spheres(
        &world_space,
        &molecules,
        &atoms,
        &periodic_table,
        settings.atom_scale,
    );

    let mut obstacles: Vec<Vec<Sphere>> = Vec::with_capacity(scene.len());
    for (entity, _, moving) in scene {
        let settled = settle(entity, moving, &obstacles, &config, &mut molecules);
        obstacles.push(settled);
    }
    info!("Resolved overlaps between {} molecules", obstacles.len());
}

#[allow(clippy::too_many_arguments)]
fn update_overlap_report(
    mut report: ResMut<OverlapReport>,
    world_space: Res<WorldSpace>,
    molecules: MoleculePlacements,
    atoms: AtomQuery,
    moved_atoms: Query<(), (Changed<Transform>, With<AtomObject>)>,
    mut removed: RemovedComponents<AtomObject>,
    periodic_table: Res<PeriodicTable>,
    settings: Res<EditorSettings>,
) {
    let removed_any = removed.read().count() > 0;
    let moved_any = !moved_atoms.is_empty()
        || molecules.iter().any(|(_, transform, _)| transform.is_changed());
    if !world_space.is_changed() && !settings.is_changed() && !moved_any && !removed_any {
        return;
    }

    let scene: Vec<(&str, Vec<Sphere>)> = world_space
        .molecules
        .iter()
        .filter_map(|&entity| {
            let (object, transform, children) = molecules.get(entity).ok()?;
            let local = local_molecule(object, children, &atoms);
            Some((
                object.name.as_str(),
                spheres(&local, &transform, &periodic_table, settings.atom_scale),
            ))
        })
        .collect();

    let mut pairs = Vec::new();
    for (i, (first, a)) in scene.iter().enumerate() {
        for (second, b) in &scene[i + 1..] {
            if molecules_overlap(a, b, settings.overlap_tolerance) {
                pairs.push((first.to_string(), second.to_string()));
            }
        }
    }

    if report.pairs != pairs {
        if !pairs.is_empty() {
            debug!("{} overlapping molecule pairs", pairs.len());
        }
        report.pairs = pairs;
    }
}

// End of File
