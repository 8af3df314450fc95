// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use bevy::prelude::*;
use bevy_mod_picking::prelude::*;
use common::BoundingBox;

use crate::{world_space::WorldSpaceSet, AppState, AtomObject, MoleculeObject, Transforms, UiFocus};

const OUTLINE_COLOR: Color = Color::YELLOW;
const OUTLINE_MARGIN: f32 = 0.1;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (stop_on_primary_press, select_clicked, draw_selection_outline)
                .chain()
                .before(WorldSpaceSet)
                .run_if(in_state(AppState::Editor)),
        );
    }
}

fn vec3_text(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

pub fn atom_info(atom: &AtomObject, local_position: Vec3) -> String {
    format!(" {} : {} : {}", atom.symbol, vec3_text(local_position), atom.index)
}

pub fn molecule_info(molecule: &MoleculeObject, position: Vec3) -> String {
    format!(" {} : {}", molecule.name, vec3_text(position))
}

/// Describes the selected atom or molecule, or `None` when nothing is
/// selected.
pub fn selected_info(
    selected: Option<Entity>,
    objects: &Query<(Option<&MoleculeObject>, Option<&AtomObject>, &Transform)>,
) -> Option<String> {
    let (molecule, atom, transform) = objects.get(selected?).ok()?;
    match (molecule, atom) {
        (_, Some(atom)) => Some(atom_info(atom, transform.translation)),
        (Some(molecule), None) => Some(molecule_info(molecule, transform.translation)),
        (None, None) => None,
    }
}

/// A press of the primary button ends the current transform mode.
fn stop_on_primary_press(
    buttons: Res<ButtonInput<MouseButton>>,
    ui_focus: Res<UiFocus>,
    mut transforms: ResMut<Transforms>,
) {
    if buttons.just_pressed(MouseButton::Left) && !ui_focus.pointer {
        transforms.stop();
    }
}

fn select_clicked(
    mut clicks: EventReader<Pointer<Click>>,
    keys: Res<ButtonInput<KeyCode>>,
    ui_focus: Res<UiFocus>,
    mut transforms: ResMut<Transforms>,
    atoms: Query<(&AtomObject, &Parent)>,
    molecules: Query<&MoleculeObject>,
) {
    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    for click in clicks.read() {
        if click.event.button != PointerButton::Primary || ui_focus.pointer {
            continue;
        }
        let Ok((atom, parent)) = atoms.get(click.target) else {
            continue;
        };
        if shift {
            debug!("Selected atom {} ({})", atom.index, atom.symbol);
            transforms.select(click.target);
        } else if let Ok(molecule) = molecules.get(parent.get()) {
            debug!("Selected molecule {}", molecule.name);
            transforms.select(parent.get());
        }
    }
}

fn draw_selection_outline(
    mut gizmos: Gizmos,
    transforms: Res<Transforms>,
    atoms: Query<&GlobalTransform, With<AtomObject>>,
    molecules: Query<&Children, With<MoleculeObject>>,
) {
    let Some(selected) = transforms.selected() else {
        return;
    };
    let mut bounds = BoundingBox::empty();
    let mut enclose = |entity: Entity| {
        if let Ok(atom) = atoms.get(entity) {
            let (scale, _, center) = atom.to_scale_rotation_translation();
            bounds.enclose_sphere(center, scale.max_element());
        }
    };
    match molecules.get(selected) {
        Ok(children) => children.iter().copied().for_each(&mut enclose),
        Err(_) => enclose(selected),
    }
    if bounds.is_empty() {
        return;
    }
    let size = (bounds.half_extents() + Vec3::splat(OUTLINE_MARGIN)) * 2.0;
    gizmos.cuboid(
        Transform::from_translation(bounds.center()).with_scale(size),
        OUTLINE_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lines_match_the_panel_format() {
        let atom = AtomObject {
            symbol: "O".to_owned(),
            index: 2,
        };
        assert_eq!(
            atom_info(&atom, Vec3::new(0.5, -1.0, 0.25)),
            " O : (0.50, -1.00, 0.25) : 2"
        );
        let molecule = MoleculeObject {
            name: "water".to_owned(),
        };
        assert_eq!(
            molecule_info(&molecule, Vec3::new(1.0, 2.0, 3.0)),
            " water : (1.00, 2.00, 3.00)"
        );
    }
}

// End of File
