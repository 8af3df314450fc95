// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use bevy::math::{Quat, Vec3};
use bevy::transform::components::Transform;
use xyzcombiner_molecule::{read_xyz_file, write_xyz_file, Atom, Molecule, XyzError};
use tempfile::tempdir;

fn benzene_ring() -> Molecule {
    let atoms = (0..6)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / 6.0;
            Atom::new("C", Vec3::new(1.39 * angle.cos(), 1.39 * angle.sin(), 0.0))
        })
        .collect();
    Molecule::new("benzene ring", atoms)
}

fn assert_same_structure(expected: &Molecule, actual: &Molecule) {
    assert_eq!(expected.name, actual.name);
    assert_eq!(expected.len(), actual.len());
    for (a, b) in expected.atoms.iter().zip(&actual.atoms) {
        assert_eq!(a.symbol, b.symbol);
        assert!(
            (a.position - b.position).length() < 1e-5,
            "{:?} != {:?}",
            a.position,
            b.position
        );
    }
}

#[test]
fn file_round_trip_preserves_atoms() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("benzene.xyz");

    let original = benzene_ring();
    write_xyz_file(&path, &original).unwrap();
    let loaded = read_xyz_file(&path).unwrap();

    assert_same_structure(&original, &loaded);
}

#[test]
fn combined_structure_round_trips_in_world_coordinates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("combined.xyz");

    let ring = benzene_ring();
    let water = Molecule::new(
        "water",
        vec![
            Atom::new("O", Vec3::ZERO),
            Atom::new("H", Vec3::new(0.96, 0.0, 0.0)),
            Atom::new("H", Vec3::new(-0.24, 0.93, 0.0)),
        ],
    );
    let placed_water = Transform::from_translation(Vec3::new(0.0, 0.0, 4.0))
        .with_rotation(Quat::from_rotation_y(0.5));

    let combined = Molecule::combine(
        "bundle",
        [(Transform::IDENTITY, &ring), (placed_water, &water)],
    );
    write_xyz_file(&path, &combined).unwrap();
    let loaded = read_xyz_file(&path).unwrap();

    assert_eq!(loaded.len(), 9);
    assert_eq!(loaded.name, "bundle");
    assert_same_structure(&combined, &loaded);
    let oxygen = &loaded.atoms[6];
    assert_eq!(oxygen.symbol, "O");
    assert!((oxygen.position - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);
}

#[test]
fn unrecognized_symbols_survive_a_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("odd.xyz");

    let original = Molecule::new("odd", vec![Atom::new("Xx", Vec3::new(1.0, 2.0, 3.0))]);
    write_xyz_file(&path, &original).unwrap();

    assert_same_structure(&original, &read_xyz_file(&path).unwrap());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let result = read_xyz_file(dir.path().join("does-not-exist.xyz"));
    assert!(matches!(result, Err(XyzError::Io(_))));
}

#[test]
fn truncated_file_reports_count_mismatch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("truncated.xyz");
    std::fs::write(&path, "4\ntruncated\nC 0 0 0\nC 1 0 0\n").unwrap();

    match read_xyz_file(&path) {
        Err(XyzError::AtomCountMismatch { expected, found }) => {
            assert_eq!(expected, 4);
            assert_eq!(found, 2);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

// End of File
