// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use app_config::EditorSettings;
use bevy::prelude::*;
use molecule::{read_xyz_file, write_xyz_file, Atom, Molecule};
use xyzcombiner::{
    ActionsPlugin, AppState, AtomObject, BundleMolecules, EditorAction, ImportRequest, MoleculeObject,
    OverlapPlugin, OverlapReport, RemoveObject, ResolveOverlaps, SaveStructure, SpawnMolecule,
    Transforms, WorldSpace, WorldSpacePlugin,
};

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .init_resource::<EditorSettings>()
        .init_state::<AppState>()
        .add_plugins((WorldSpacePlugin, OverlapPlugin, ActionsPlugin));
    app
}

fn settle(app: &mut App) {
    for _ in 0..3 {
        app.update();
    }
}

fn molecule(name: &str, atoms: &[(&str, Vec3)]) -> Molecule {
    Molecule::new(
        name,
        atoms
            .iter()
            .map(|(symbol, position)| Atom::new(*symbol, *position))
            .collect(),
    )
}

fn spawn(app: &mut App, molecule: Molecule) {
    app.world.send_event(SpawnMolecule { molecule });
    settle(app);
}

fn molecules(app: &App) -> Vec<Entity> {
    app.world.resource::<WorldSpace>().molecules.clone()
}

fn atom_children(app: &App, entity: Entity) -> Vec<Entity> {
    app.world
        .get::<Children>(entity)
        .map(|children| children.to_vec())
        .unwrap_or_default()
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn import_places_molecule_at_its_centroid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("co.xyz");
    std::fs::write(&path, "2\ncarbon monoxide\nC 1.0 2.0 3.0\nO 3.0 2.0 3.0\n").unwrap();

    let mut app = test_app();
    app.world.send_event(ImportRequest(path));
    settle(&mut app);

    let molecules = molecules(&app);
    assert_eq!(molecules.len(), 1);
    let root = molecules[0];
    assert_eq!(
        app.world.get::<MoleculeObject>(root).unwrap().name,
        "carbon monoxide"
    );
    let transform = app.world.get::<Transform>(root).unwrap();
    assert!(close(transform.translation, Vec3::new(2.0, 2.0, 3.0)));

    let atoms = atom_children(&app, root);
    assert_eq!(atoms.len(), 2);
    let first = app.world.get::<AtomObject>(atoms[0]).unwrap();
    assert_eq!((first.symbol.as_str(), first.index), ("C", 0));
    let offset = app.world.get::<Transform>(atoms[0]).unwrap().translation;
    assert!(close(offset, Vec3::new(-1.0, 0.0, 0.0)));
}

#[test]
fn failed_import_leaves_scene_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app();
    app.world
        .send_event(ImportRequest(dir.path().join("missing.xyz")));
    let bad = dir.path().join("bad.xyz");
    std::fs::write(&bad, "3\nshort\nH 0 0 0\n").unwrap();
    app.world.send_event(ImportRequest(bad));
    settle(&mut app);
    assert!(molecules(&app).is_empty());
}

#[test]
fn bundle_replaces_every_molecule() {
    let mut app = test_app();
    spawn(&mut app, molecule("a", &[("H", Vec3::ZERO), ("H", Vec3::X)]));
    spawn(
        &mut app,
        molecule("b", &[("O", Vec3::new(20.0, 0.0, 0.0))]),
    );
    assert_eq!(molecules(&app).len(), 2);

    app.world.send_event(BundleMolecules {
        name: "combined".to_owned(),
    });
    settle(&mut app);

    let molecules = molecules(&app);
    assert_eq!(molecules.len(), 1);
    assert_eq!(
        app.world.get::<MoleculeObject>(molecules[0]).unwrap().name,
        "combined"
    );
    let symbols: Vec<String> = atom_children(&app, molecules[0])
        .into_iter()
        .map(|atom| app.world.get::<AtomObject>(atom).unwrap().symbol.clone())
        .collect();
    assert_eq!(symbols, ["H", "H", "O"]);
}

#[test]
fn removing_last_atom_removes_molecule() {
    let mut app = test_app();
    spawn(&mut app, molecule("pair", &[("H", Vec3::ZERO), ("H", Vec3::X)]));
    let root = molecules(&app)[0];
    let atoms = atom_children(&app, root);

    app.world.send_event(RemoveObject(atoms[0]));
    settle(&mut app);
    assert_eq!(atom_children(&app, root), vec![atoms[1]]);
    assert!(app.world.get_entity(atoms[0]).is_none());

    app.world.send_event(RemoveObject(atoms[1]));
    settle(&mut app);
    assert!(molecules(&app).is_empty());
    assert!(app.world.get_entity(root).is_none());
}

#[test]
fn removing_selected_molecule_clears_selection() {
    let mut app = test_app();
    spawn(&mut app, molecule("neon", &[("Ne", Vec3::ZERO)]));
    let root = molecules(&app)[0];
    app.world.resource_mut::<Transforms>().select(root);

    app.world.send_event(EditorAction::RemoveSelected);
    settle(&mut app);

    assert!(molecules(&app).is_empty());
    assert_eq!(app.world.resource::<Transforms>().selected(), None);
}

#[test]
fn move_to_origin_recenters_selection() {
    let mut app = test_app();
    spawn(&mut app, molecule("argon", &[("Ar", Vec3::new(5.0, 5.0, 5.0))]));
    let root = molecules(&app)[0];
    app.world.resource_mut::<Transforms>().select(root);

    app.world.send_event(EditorAction::MoveToOrigin);
    settle(&mut app);

    let transform = app.world.get::<Transform>(root).unwrap();
    assert!(close(transform.translation, Vec3::ZERO));
}

#[test]
fn save_writes_world_coordinates_in_list_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xyz");

    let mut app = test_app();
    spawn(
        &mut app,
        molecule("a", &[("C", Vec3::new(10.0, 0.0, 0.0)), ("O", Vec3::new(12.0, 0.0, 0.0))]),
    );
    spawn(&mut app, molecule("b", &[("N", Vec3::new(-10.0, 1.0, 0.0))]));

    app.world.send_event(SaveStructure {
        path: path.clone(),
        name: "scene".to_owned(),
    });
    settle(&mut app);

    let saved = read_xyz_file(&path).unwrap();
    assert_eq!(saved.name, "scene");
    assert_eq!(saved.len(), 3);
    assert_eq!(saved.atoms[0].symbol, "C");
    assert!(close(saved.atoms[0].position, Vec3::new(10.0, 0.0, 0.0)));
    assert!(close(saved.atoms[1].position, Vec3::new(12.0, 0.0, 0.0)));
    assert!(close(saved.atoms[2].position, Vec3::new(-10.0, 1.0, 0.0)));
}

#[test]
fn new_molecules_are_pushed_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("methane.xyz");
    write_xyz_file(
        &path,
        &molecule(
            "methane",
            &[
                ("C", Vec3::ZERO),
                ("H", Vec3::new(0.63, 0.63, 0.63)),
                ("H", Vec3::new(-0.63, -0.63, 0.63)),
                ("H", Vec3::new(-0.63, 0.63, -0.63)),
                ("H", Vec3::new(0.63, -0.63, -0.63)),
            ],
        ),
    )
    .unwrap();

    let mut app = test_app();
    app.world.send_event(ImportRequest(path.clone()));
    settle(&mut app);
    app.world.send_event(ImportRequest(path));
    settle(&mut app);

    let molecules = molecules(&app);
    assert_eq!(molecules.len(), 2);
    let a = app.world.get::<Transform>(molecules[0]).unwrap().translation;
    let b = app.world.get::<Transform>(molecules[1]).unwrap().translation;
    assert!(close(a, Vec3::ZERO));
    assert!(a.distance(b) > 0.5);
    assert!(app.world.resource::<OverlapReport>().is_clear());
}

#[test]
fn resolve_overlaps_reports_clear_scene() {
    let mut app = test_app();
    spawn(&mut app, molecule("a", &[("C", Vec3::ZERO)]));
    spawn(&mut app, molecule("b", &[("C", Vec3::new(20.0, 0.0, 0.0))]));
    let second = molecules(&app)[1];

    // Drop the second molecule straight onto the first.
    app.world.get_mut::<Transform>(second).unwrap().translation = Vec3::new(0.1, 0.0, 0.0);
    settle(&mut app);
    assert_eq!(
        app.world.resource::<OverlapReport>().pairs,
        vec![("a".to_owned(), "b".to_owned())]
    );

    app.world.send_event(ResolveOverlaps);
    settle(&mut app);
    assert!(app.world.resource::<OverlapReport>().is_clear());
    let first = molecules(&app)[0];
    assert!(close(
        app.world.get::<Transform>(first).unwrap().translation,
        Vec3::ZERO
    ));
}

/// World position of a molecule or atom, composed from its parent's frame.
fn world_position(app: &App, entity: Entity) -> Vec3 {
    let local = *app.world.get::<Transform>(entity).unwrap();
    match app.world.get::<Parent>(entity) {
        Some(parent) => {
            let parent = *app.world.get::<Transform>(parent.get()).unwrap();
            parent.mul_transform(local).translation
        }
        None => local.translation,
    }
}

fn act(app: &mut App, action: EditorAction) {
    app.world.send_event(action);
    settle(app);
}

fn select(app: &mut App, entity: Entity) {
    app.world.resource_mut::<Transforms>().select(entity);
}

#[test]
fn align_vectors_snaps_molecule_head_to_tail() {
    let mut app = test_app();
    spawn(&mut app, molecule("fixed", &[("C", Vec3::ZERO), ("O", Vec3::X)]));
    spawn(
        &mut app,
        molecule(
            "moving",
            &[("N", Vec3::new(20.0, 0.0, 0.0)), ("N", Vec3::new(20.0, 1.0, 0.0))],
        ),
    );
    let [fixed, moving] = molecules(&app)[..] else {
        panic!("expected two molecules");
    };
    let target_atoms = atom_children(&app, fixed);
    let moving_atoms = atom_children(&app, moving);

    select(&mut app, target_atoms[0]);
    select(&mut app, target_atoms[1]);
    act(&mut app, EditorAction::SaveVector);
    select(&mut app, moving_atoms[0]);
    select(&mut app, moving_atoms[1]);
    act(&mut app, EditorAction::SaveVector);
    assert_eq!(app.world.resource::<Transforms>().vectors().len(), 2);

    select(&mut app, moving);
    act(&mut app, EditorAction::AlignVectors);

    let target_start = world_position(&app, target_atoms[0]);
    let target_vec = world_position(&app, target_atoms[1]) - target_start;
    let moving_start = world_position(&app, moving_atoms[0]);
    let moving_vec = world_position(&app, moving_atoms[1]) - moving_start;
    assert!(close(moving_start, target_start));
    assert!(close(moving_vec.normalize(), -target_vec.normalize()));
    assert!(close(world_position(&app, moving_atoms[1]), Vec3::NEG_X));
    // The fixed molecule stays put.
    assert!(close(world_position(&app, fixed), Vec3::new(0.5, 0.0, 0.0)));
}

#[test]
fn move_to_vector_start_places_atom_of_rotated_molecule() {
    let mut app = test_app();
    spawn(&mut app, molecule("anchor", &[("He", Vec3::new(0.0, 10.0, 0.0))]));
    spawn(
        &mut app,
        molecule(
            "pair",
            &[("C", Vec3::new(20.0, 0.0, 0.0)), ("O", Vec3::new(22.0, 0.0, 0.0))],
        ),
    );
    let [anchor, pair] = molecules(&app)[..] else {
        panic!("expected two molecules");
    };
    let rotation = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
    app.world.get_mut::<Transform>(pair).unwrap().rotation = rotation;
    settle(&mut app);
    let oxygen = atom_children(&app, pair)[1];
    assert!(close(world_position(&app, oxygen), Vec3::new(21.0, 1.0, 0.0)));

    select(&mut app, anchor);
    select(&mut app, oxygen);
    act(&mut app, EditorAction::SaveVector);
    act(&mut app, EditorAction::MoveToVectorStart);

    assert!(close(world_position(&app, oxygen), Vec3::new(0.0, 10.0, 0.0)));
    let pair_transform = app.world.get::<Transform>(pair).unwrap();
    assert!(close(pair_transform.translation, Vec3::new(21.0, 0.0, 0.0)));
    assert!(pair_transform.rotation.angle_between(rotation) < 1e-4);
    // The atom keeps its place in the molecule's hierarchy.
    assert_eq!(app.world.get::<Parent>(oxygen).unwrap().get(), pair);
}

#[test]
fn placed_molecules_are_only_moved_on_request() {
    let mut app = test_app();
    spawn(&mut app, molecule("a", &[("C", Vec3::ZERO)]));
    spawn(&mut app, molecule("b", &[("C", Vec3::new(20.0, 0.0, 0.0))]));
    let second = molecules(&app)[1];

    let dropped = Vec3::new(0.1, 0.0, 0.0);
    app.world.get_mut::<Transform>(second).unwrap().translation = dropped;
    settle(&mut app);

    assert!(close(
        app.world.get::<Transform>(second).unwrap().translation,
        dropped
    ));
    assert!(!app.world.resource::<OverlapReport>().is_clear());
}

// End of File
