// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! The side panel: importing, bundling and saving structures, plus a readout
//! of the scene, the selection and the transform state.

use std::path::{Path, PathBuf};

use app_config::EditorSettings;
use bevy::{ecs::system::SystemParam, prelude::*};
use bevy_egui::{egui, EguiContexts, EguiSet};

use crate::{
    actions::KEY_COMMANDS,
    file_dialog::{DialogClosed, FileDialogPlugin, OpenFileDialog},
    selected_info, AppState, AtomObject, BundleMolecules, ImportRequest,
    MoleculeObject, OverlapReport, ResolveOverlaps, SampleMolecules, SaveStructure,
    SpawnMolecule, Transforms, WorldSpace, XyzAsset,
};

const PANEL_WIDTH: f32 = 300.0;

const MOUSE_HELP: [&str; 5] = [
    "Click: select molecule",
    "Shift + click: select atom",
    "Right drag: orbit",
    "Middle drag: pan",
    "Wheel: zoom",
];

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(FileDialogPlugin)
            .init_resource::<UiFocus>()
            .init_resource::<UiState>()
            .add_systems(PreUpdate, update_ui_focus.after(EguiSet::BeginFrame))
            .add_systems(
                Update,
                (
                    side_panel.run_if(in_state(AppState::Editor)),
                    show_chosen_paths,
                ),
            );
    }
}

/// Whether egui is using the mouse or keyboard this frame.  Scene input is
/// ignored while it is.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiFocus {
    pub pointer: bool,
    pub keyboard: bool,
}

/// Contents of the panel's text fields.
#[derive(Resource, Debug, Clone)]
struct UiState {
    import_path: String,
    bundle_name: String,
    save_path: String,
}

impl FromWorld for UiState {
    fn from_world(world: &mut World) -> Self {
        let settings = world.get_resource::<EditorSettings>().cloned().unwrap_or_default();
        Self {
            import_path: String::new(),
            bundle_name: "combined".to_owned(),
            save_path: settings.export_path,
        }
    }
}

/// A typed path is taken relative to the import directory unless it is
/// absolute.
pub fn resolve_import_path(import_dir: &str, typed: &str) -> PathBuf {
    let typed = Path::new(typed.trim());
    if typed.is_absolute() || import_dir.is_empty() {
        typed.to_path_buf()
    } else {
        Path::new(import_dir).join(typed)
    }
}

fn update_ui_focus(mut contexts: EguiContexts, mut focus: ResMut<UiFocus>) {
    let ctx = contexts.ctx_mut();
    let next = UiFocus {
        pointer: ctx.wants_pointer_input() || ctx.is_pointer_over_area(),
        keyboard: ctx.wants_keyboard_input(),
    };
    if *focus != next {
        *focus = next;
    }
}

/// Mirrors paths picked in a file panel into the text fields.
fn show_chosen_paths(mut closed: EventReader<DialogClosed>, mut state: ResMut<UiState>) {
    for event in closed.read() {
        let path = event.path.to_string_lossy().into_owned();
        match event.purpose {
            OpenFileDialog::Import => state.import_path = path,
            OpenFileDialog::Save { .. } => state.save_path = path,
        }
    }
}

#[derive(SystemParam)]
struct PanelEvents<'w> {
    dialogs: EventWriter<'w, OpenFileDialog>,
    imports: EventWriter<'w, ImportRequest>,
    spawns: EventWriter<'w, SpawnMolecule>,
    bundles: EventWriter<'w, BundleMolecules>,
    saves: EventWriter<'w, SaveStructure>,
    resolves: EventWriter<'w, ResolveOverlaps>,
}

#[derive(SystemParam)]
struct SceneReadout<'w, 's> {
    world_space: Res<'w, WorldSpace>,
    transforms: Res<'w, Transforms>,
    report: Res<'w, OverlapReport>,
    objects: Query<
        'w,
        's,
        (
            Option<&'static MoleculeObject>,
            Option<&'static AtomObject>,
            &'static Transform,
        ),
    >,
    globals: Query<'w, 's, &'static GlobalTransform>,
}

fn side_panel(
    mut contexts: EguiContexts,
    mut state: ResMut<UiState>,
    mut settings: ResMut<EditorSettings>,
    samples: Option<Res<SampleMolecules>>,
    xyz_assets: Res<Assets<XyzAsset>>,
    scene: SceneReadout,
    mut events: PanelEvents,
) {
    let ctx = contexts.ctx_mut();
    egui::SidePanel::left("editor_panel")
        .default_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.heading("Import");
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut state.import_path);
                if ui.button("Import").clicked() && !state.import_path.trim().is_empty() {
                    let path = resolve_import_path(&settings.import_dir, &state.import_path);
                    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                        settings.import_dir = dir.to_string_lossy().into_owned();
                    }
                    events.imports.send(ImportRequest(path));
                }
                if ui.button("Browse...").clicked() {
                    events.dialogs.send(OpenFileDialog::Import);
                }
            });
            if let Some(samples) = &samples {
                ui.horizontal_wrapped(|ui| {
                    for asset in samples.iter().filter_map(|handle| xyz_assets.get(handle)) {
                        if ui.button(asset.molecule.name.as_str()).clicked() {
                            events.spawns.send(SpawnMolecule {
                                molecule: asset.molecule.clone(),
                            });
                        }
                    }
                });
            }

            ui.separator();
            ui.heading("Bundle");
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut state.bundle_name);
                if ui.button("Bundle").clicked() {
                    events.bundles.send(BundleMolecules {
                        name: state.bundle_name.trim().to_owned(),
                    });
                }
            });

            ui.heading("Save");
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut state.save_path);
                if ui.button("Save").clicked() && !state.save_path.trim().is_empty() {
                    let path = state.save_path.trim().to_owned();
                    settings.export_path = path.clone();
                    events.saves.send(SaveStructure {
                        path: PathBuf::from(path),
                        name: state.bundle_name.trim().to_owned(),
                    });
                }
                if ui.button("Save As...").clicked() {
                    events.dialogs.send(OpenFileDialog::Save {
                        name: state.bundle_name.trim().to_owned(),
                    });
                }
            });

            if ui.button("Resolve Overlaps").clicked() {
                events.resolves.send(ResolveOverlaps);
            }

            ui.separator();
            ui.heading("Molecules");
            let lines = scene.world_space.molecule_list(|entity| {
                let (molecule, _, transform) = scene.objects.get(entity).ok()?;
                molecule.map(|molecule| (molecule.name.as_str(), transform.translation))
            });
            egui::ScrollArea::vertical()
                .id_source("molecule_list")
                .max_height(160.0)
                .show(ui, |ui| {
                    for line in lines {
                        ui.label(line);
                    }
                });

            ui.separator();
            ui.heading("Selection");
            ui.label(
                selected_info(scene.transforms.selected(), &scene.objects)
                    .unwrap_or_else(|| "Nothing selected".to_owned()),
            );
            ui.label(format!(
                "Mode: {}   Axis: {}",
                scene.transforms.mode(),
                scene.transforms.axis()
            ));

            ui.label("Saved vectors:");
            let position_of = |entity| {
                scene
                    .globals
                    .get(entity)
                    .ok()
                    .map(GlobalTransform::translation)
            };
            for vector in scene.transforms.vectors().iter() {
                let v = vector.vector(position_of);
                ui.label(format!("  ({:.2}, {:.2}, {:.2})", v.x, v.y, v.z));
            }

            ui.separator();
            ui.heading("Overlaps");
            if scene.report.is_clear() {
                ui.label("No overlapping molecules");
            } else {
                for (first, second) in &scene.report.pairs {
                    ui.label(format!("{} overlaps {}", first, second));
                }
            }

            ui.separator();
            egui::CollapsingHeader::new("Keys").show(ui, |ui| {
                for help in MOUSE_HELP {
                    ui.label(help);
                }
                for command in &KEY_COMMANDS {
                    ui.label(command.help);
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_paths_are_relative_to_the_import_directory() {
        assert_eq!(
            resolve_import_path("molecules", " water.xyz "),
            Path::new("molecules").join("water.xyz")
        );
        assert_eq!(resolve_import_path("", "water.xyz"), PathBuf::from("water.xyz"));
        let absolute = std::env::temp_dir().join("water.xyz");
        assert_eq!(
            resolve_import_path("molecules", &absolute.to_string_lossy()),
            absolute
        );
    }
}

// End of File
