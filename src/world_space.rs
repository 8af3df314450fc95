// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! The molecules in the scene, and the events that add, remove, merge and
//! export them.
//!
//! Every molecule is a root entity placed at its centroid, with one child
//! entity per atom at the atom's offset from that centroid.  Atom children
//! keep the order they were read in, which is also the order they are
//! written back out.

use std::path::PathBuf;

use app_config::EditorSettings;
use bevy::{
    prelude::*,
    utils::{HashMap, HashSet},
};
use bevy_mod_picking::prelude::*;
use molecule::{read_xyz_file, write_xyz_file, Atom, Molecule};
use periodic_table::PeriodicTable;

use crate::{overlap::PendingOverlapCheck, Transforms};

pub struct WorldSpacePlugin;

impl Plugin for WorldSpacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldSpace>()
            .init_resource::<PeriodicTable>()
            .init_resource::<EditorSettings>()
            .init_resource::<Transforms>()
            .init_resource::<AtomAssets>()
            .add_event::<ImportRequest>()
            .add_event::<SpawnMolecule>()
            .add_event::<RemoveObject>()
            .add_event::<BundleMolecules>()
            .add_event::<SaveStructure>()
            .add_event::<FileDragAndDrop>()
            .add_systems(
                Update,
                (
                    import_dropped_files,
                    import_files,
                    bundle_molecules,
                    remove_objects,
                    spawn_molecules,
                    save_structure,
                )
                    .chain()
                    .in_set(WorldSpaceSet),
            );
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldSpaceSet;

/// The molecules in the scene, in the order they were added.
#[derive(Resource, Debug, Default)]
pub struct WorldSpace {
    pub molecules: Vec<Entity>,
}

impl WorldSpace {
    /// One line per molecule, in scene order, for the molecule list panel.
    pub fn molecule_list<'a>(&self, lookup: impl Fn(Entity) -> Option<(&'a str, Vec3)>) -> Vec<String> {
        self.molecules
            .iter()
            .filter_map(|&entity| lookup(entity))
            .map(|(name, position)| molecule_line(name, position))
            .collect()
    }
}

pub fn molecule_line(name: &str, position: Vec3) -> String {
    format!(
        "{}   ({:.3}, {:.3}, {:.3})",
        name, position.x, position.y, position.z
    )
}

#[derive(Component, Debug, Clone)]
pub struct MoleculeObject {
    pub name: String,
}

#[derive(Component, Debug, Clone)]
pub struct AtomObject {
    pub symbol: String,
    /// Position of the atom in the file it was read from.
    pub index: usize,
}

/// Read a structure file and add it to the scene.
#[derive(Event, Debug, Clone)]
pub struct ImportRequest(pub PathBuf);

#[derive(Event, Debug, Clone)]
pub struct SpawnMolecule {
    /// Atom positions are in world coordinates.
    pub molecule: Molecule,
}

/// Remove a molecule, or a single atom from its molecule.
#[derive(Event, Debug, Clone, Copy)]
pub struct RemoveObject(pub Entity);

/// Replace every molecule in the scene with a single one holding all atoms.
#[derive(Event, Debug, Clone)]
pub struct BundleMolecules {
    pub name: String,
}

/// Write every atom in the scene to one structure file.
#[derive(Event, Debug, Clone)]
pub struct SaveStructure {
    pub path: PathBuf,
    pub name: String,
}

/// Shared rendering resources for atoms.
#[derive(Resource)]
pub struct AtomAssets {
    pub sphere: Handle<Mesh>,
    materials: HashMap<String, Handle<StandardMaterial>>,
}

impl FromWorld for AtomAssets {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        Self {
            sphere: meshes.add(Sphere::new(1.0).mesh().uv(32, 18)),
            materials: HashMap::new(),
        }
    }
}

impl AtomAssets {
    fn material(
        &mut self,
        symbol: &str,
        periodic_table: &PeriodicTable,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.materials
            .entry(symbol.to_ascii_uppercase())
            .or_insert_with(|| {
                let color = periodic_table.repr_for_symbol(symbol).color;
                materials.add(StandardMaterial {
                    base_color: Color::rgb(color.x, color.y, color.z),
                    perceptual_roughness: 0.6,
                    ..default()
                })
            })
            .clone()
    }
}

pub type MoleculeQuery<'w, 's> = Query<
    'w,
    's,
    (&'static MoleculeObject, &'static Transform, Option<&'static Children>),
    Without<AtomObject>,
>;

pub type AtomQuery<'w, 's> =
    Query<'w, 's, (&'static AtomObject, &'static Transform), Without<MoleculeObject>>;

/// A molecule's atoms in its own coordinate frame, in file order.
pub fn local_molecule(object: &MoleculeObject, children: Option<&Children>, atoms: &AtomQuery) -> Molecule {
    let atoms = children
        .into_iter()
        .flat_map(|children| children.iter())
        .filter_map(|&child| atoms.get(child).ok())
        .map(|(atom, transform)| Atom::new(atom.symbol.clone(), transform.translation))
        .collect();
    Molecule::new(object.name.clone(), atoms)
}

/// Every atom in the scene in world coordinates, molecules in scene order.
pub fn combined_structure(
    name: &str,
    world_space: &WorldSpace,
    molecules: &MoleculeQuery,
    atoms: &AtomQuery,
) -> Molecule {
    let parts: Vec<(Transform, Molecule)> = world_space
        .molecules
        .iter()
        .filter_map(|&entity| molecules.get(entity).ok())
        .map(|(object, transform, children)| (*transform, local_molecule(object, children, atoms)))
        .collect();
    Molecule::combine(name, parts.iter().map(|(transform, molecule)| (*transform, molecule)))
}

/// Composes an entity's transform with its ancestors'.  `local` returns an
/// entity's own transform and parent.
pub fn world_transform(
    entity: Entity,
    local: impl Fn(Entity) -> Option<(Transform, Option<Entity>)>,
) -> Option<Transform> {
    let (mut result, mut parent) = local(entity)?;
    while let Some(ancestor) = parent {
        let (transform, next) = local(ancestor)?;
        result = transform.mul_transform(result);
        parent = next;
    }
    Some(result)
}

/// Expresses a world transform relative to a parent's world transform.
pub fn to_local(world: Transform, parent_world: Option<Transform>) -> Transform {
    match parent_world {
        Some(parent) => {
            Transform::from_matrix(parent.compute_matrix().inverse() * world.compute_matrix())
        }
        None => world,
    }
}

fn import_dropped_files(
    mut drops: EventReader<FileDragAndDrop>,
    mut imports: EventWriter<ImportRequest>,
) {
    for event in drops.read() {
        if let FileDragAndDrop::DroppedFile { path_buf, .. } = event {
            imports.send(ImportRequest(path_buf.clone()));
        }
    }
}

fn import_files(mut requests: EventReader<ImportRequest>, mut spawns: EventWriter<SpawnMolecule>) {
    for ImportRequest(path) in requests.read() {
        match read_xyz_file(path) {
            Ok(mut molecule) => {
                if molecule.name.is_empty() {
                    molecule.name = path
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "molecule".to_owned());
                }
                info!(
                    "Imported {} ({} atoms) from {}",
                    molecule.name,
                    molecule.len(),
                    path.display()
                );
                spawns.send(SpawnMolecule { molecule });
            }
            Err(err) => error!("Failed to import {}: {}", path.display(), err),
        }
    }
}

fn forget_molecule(
    transforms: &mut Transforms,
    entity: Entity,
    children: Option<&Children>,
) {
    transforms.forget(entity);
    for &child in children.into_iter().flat_map(|children| children.iter()) {
        transforms.forget(child);
    }
}

fn remove_molecule(
    commands: &mut Commands,
    transforms: &mut Transforms,
    world_space: &mut WorldSpace,
    entity: Entity,
    children: Option<&Children>,
) {
    forget_molecule(transforms, entity, children);
    commands.entity(entity).despawn_recursive();
    world_space.molecules.retain(|&e| e != entity);
}

fn bundle_molecules(
    mut commands: Commands,
    mut events: EventReader<BundleMolecules>,
    mut world_space: ResMut<WorldSpace>,
    mut transforms: ResMut<Transforms>,
    molecules: MoleculeQuery,
    atoms: AtomQuery,
    mut spawns: EventWriter<SpawnMolecule>,
) {
    let Some(BundleMolecules { name }) = events.read().last().cloned() else {
        return;
    };
    if world_space.molecules.is_empty() {
        warn!("Nothing to bundle");
        return;
    }

    let combined = combined_structure(&name, &world_space, &molecules, &atoms);
    for entity in world_space.molecules.drain(..) {
        if let Ok((_, _, children)) = molecules.get(entity) {
            forget_molecule(&mut transforms, entity, children);
            commands.entity(entity).despawn_recursive();
        }
    }
    info!("Bundled {} atoms into {}", combined.len(), name);
    spawns.send(SpawnMolecule { molecule: combined });
}

fn remove_objects(
    mut commands: Commands,
    mut events: EventReader<RemoveObject>,
    mut world_space: ResMut<WorldSpace>,
    mut transforms: ResMut<Transforms>,
    molecules: Query<(&MoleculeObject, Option<&Children>)>,
    atoms: Query<(&AtomObject, &Parent)>,
) {
    let mut removed = HashSet::new();

    for &RemoveObject(entity) in events.read() {
        if !removed.insert(entity) {
            continue;
        }
        if let Ok((object, children)) = molecules.get(entity) {
            info!("Removed molecule {}", object.name);
            remove_molecule(&mut commands, &mut transforms, &mut world_space, entity, children);
        } else if let Ok((atom, parent)) = atoms.get(entity) {
            let molecule = parent.get();
            transforms.forget(entity);
            commands.entity(entity).despawn_recursive();
            info!("Removed atom {} ({})", atom.index, atom.symbol);

            let Ok((object, children)) = molecules.get(molecule) else {
                continue;
            };
            let remaining = children
                .into_iter()
                .flat_map(|children| children.iter())
                .filter(|child| !removed.contains(*child))
                .count();
            if remaining == 0 && removed.insert(molecule) {
                info!("Removed empty molecule {}", object.name);
                remove_molecule(
                    &mut commands,
                    &mut transforms,
                    &mut world_space,
                    molecule,
                    children,
                );
            }
        } else {
            debug!("Ignoring removal of {:?}, which is not a molecule or atom", entity);
        }
    }
}

fn spawn_molecules(
    mut commands: Commands,
    mut events: EventReader<SpawnMolecule>,
    mut world_space: ResMut<WorldSpace>,
    mut atom_assets: ResMut<AtomAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    periodic_table: Res<PeriodicTable>,
    settings: Res<EditorSettings>,
) {
    for SpawnMolecule { molecule } in events.read() {
        if molecule.is_empty() {
            warn!("Not adding {}: it has no atoms", molecule.name);
            continue;
        }
        let (centroid, local) = molecule.recentered();

        let entity = commands
            .spawn((
                SpatialBundle::from_transform(Transform::from_translation(centroid)),
                MoleculeObject {
                    name: local.name.clone(),
                },
                PendingOverlapCheck,
                Name::new(local.name.clone()),
            ))
            .with_children(|parent| {
                for (index, atom) in local.atoms.iter().enumerate() {
                    let radius =
                        periodic_table.repr_for_symbol(&atom.symbol).radius * settings.atom_scale;
                    parent.spawn((
                        PbrBundle {
                            mesh: atom_assets.sphere.clone(),
                            material: atom_assets.material(
                                &atom.symbol,
                                &periodic_table,
                                &mut materials,
                            ),
                            transform: Transform::from_translation(atom.position)
                                .with_scale(Vec3::splat(radius)),
                            ..default()
                        },
                        AtomObject {
                            symbol: atom.symbol.clone(),
                            index,
                        },
                        PickableBundle::default(),
                        Name::new(format!("{} {}", atom.symbol, index)),
                    ));
                }
            })
            .id();

        debug!("Spawned {} as {:?}", local.name, entity);
        world_space.molecules.push(entity);
    }
}

fn save_structure(
    mut events: EventReader<SaveStructure>,
    world_space: Res<WorldSpace>,
    molecules: MoleculeQuery,
    atoms: AtomQuery,
) {
    for SaveStructure { path, name } in events.read() {
        let combined = combined_structure(name, &world_space, &molecules, &atoms);
        match write_xyz_file(path, &combined) {
            Ok(()) => info!("Saved {} atoms to {}", combined.len(), path.display()),
            Err(err) => error!("Failed to save {}: {}", path.display(), err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn molecule_lines_show_name_and_position() {
        assert_eq!(
            molecule_line("water", Vec3::new(1.0, -0.5, 2.25)),
            "water   (1.000, -0.500, 2.250)"
        );
    }

    #[test]
    fn world_transform_composes_ancestors() {
        let parent = Entity::from_raw(1);
        let child = Entity::from_raw(2);
        let lookup = |entity: Entity| {
            if entity == parent {
                Some((
                    Transform::from_translation(Vec3::new(10.0, 0.0, 0.0))
                        .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
                    None,
                ))
            } else if entity == child {
                Some((Transform::from_translation(Vec3::X), Some(parent)))
            } else {
                None
            }
        };
        let world = world_transform(child, lookup).unwrap();
        assert!((world.translation - Vec3::new(10.0, 1.0, 0.0)).length() < 1e-5);
        assert!(world_transform(Entity::from_raw(3), lookup).is_none());

        let back = to_local(world, Some(lookup(parent).unwrap().0));
        assert!((back.translation - Vec3::X).length() < 1e-5);
    }
}

// End of File
