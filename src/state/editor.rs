// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::{ffi::OsString, path::PathBuf};

use crate::{
    ActionsPlugin, AppState, CameraPlugin, ImportRequest, OverlapPlugin, SelectionPlugin,
    TransformControlsPlugin, UiPlugin, WorldSpacePlugin,
};
use bevy::prelude::*;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StartupImports>()
            .add_plugins((
                CameraPlugin,
                WorldSpacePlugin,
                SelectionPlugin,
                ActionsPlugin,
                TransformControlsPlugin,
                OverlapPlugin,
                UiPlugin,
            ))
            .add_systems(OnEnter(AppState::Editor), (setup_lighting, import_startup_files));
    }
}

/// Structure files named on the command line, imported once the editor opens.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct StartupImports(pub Vec<PathBuf>);

impl StartupImports {
    pub fn from_args(args: impl Iterator<Item = OsString>) -> Self {
        Self(
            args.map(PathBuf::from)
                .filter(|path| {
                    path.extension()
                        .is_some_and(|extension| extension.eq_ignore_ascii_case("xyz"))
                })
                .collect(),
        )
    }
}

fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });
    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                illuminance: 4000.0,
                ..default()
            },
            transform: Transform::from_xyz(4.0, 8.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        Name::new("Key light"),
    ));
}

fn import_startup_files(
    mut startup_imports: ResMut<StartupImports>,
    mut imports: EventWriter<ImportRequest>,
) {
    for path in startup_imports.0.drain(..) {
        imports.send(ImportRequest(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_structure_files_are_imported_from_arguments() {
        let args = ["water.xyz", "--verbose", "notes.txt", "dir/Benzene.XYZ"]
            .into_iter()
            .map(OsString::from);
        assert_eq!(
            StartupImports::from_args(args),
            StartupImports(vec![
                PathBuf::from("water.xyz"),
                PathBuf::from("dir/Benzene.XYZ")
            ])
        );
    }
}

// End of File
