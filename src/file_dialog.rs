// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Native open and save panels for XYZ files.  The panels run as background
//! tasks so the scene keeps drawing while one is open.

use std::path::{Path, PathBuf};

use app_config::EditorSettings;
use bevy::{
    prelude::*,
    tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task},
};
use rfd::AsyncFileDialog;

use crate::{ImportRequest, SaveStructure};

pub struct FileDialogPlugin;

impl Plugin for FileDialogPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<OpenFileDialog>()
            .add_event::<DialogClosed>()
            .add_systems(Update, (open_file_dialogs, finish_file_dialogs).chain());
    }
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum OpenFileDialog {
    Import,
    /// `name` pre-fills the file name and becomes the structure's name line.
    Save { name: String },
}

/// Sent with the chosen path once a panel closes with a selection.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct DialogClosed {
    pub purpose: OpenFileDialog,
    pub path: PathBuf,
}

#[derive(Component)]
struct PendingDialog {
    purpose: OpenFileDialog,
    task: Task<Option<PathBuf>>,
}

/// Directory an open panel starts in.
pub fn import_dialog_start(import_dir: &str) -> Option<PathBuf> {
    let dir = Path::new(import_dir);
    (!import_dir.is_empty() && dir.is_dir()).then(|| dir.to_path_buf())
}

/// Directory and file name a save panel starts with: the folder of the last
/// export, and the structure name with an `.xyz` extension.
pub fn save_dialog_start(export_path: &str, name: &str) -> (Option<PathBuf>, String) {
    let dir = Path::new(export_path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty() && dir.is_dir())
        .map(Path::to_path_buf);
    let stem = name.trim();
    let stem = if stem.is_empty() { "structure" } else { stem };
    (dir, format!("{}.xyz", stem))
}

fn open_file_dialogs(
    mut commands: Commands,
    mut requests: EventReader<OpenFileDialog>,
    pending: Query<(), With<PendingDialog>>,
    settings: Res<EditorSettings>,
) {
    let Some(request) = requests.read().last().cloned() else {
        return;
    };
    if !pending.is_empty() {
        debug!("A file panel is already open");
        return;
    }

    let mut dialog = AsyncFileDialog::new().add_filter("XYZ", &["xyz"]);
    let task = match &request {
        OpenFileDialog::Import => {
            if let Some(dir) = import_dialog_start(&settings.import_dir) {
                dialog = dialog.set_directory(dir);
            }
            AsyncComputeTaskPool::get().spawn(async move {
                dialog
                    .set_title("Import XYZ file")
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            })
        }
        OpenFileDialog::Save { name } => {
            let (dir, file_name) = save_dialog_start(&settings.export_path, name);
            if let Some(dir) = dir {
                dialog = dialog.set_directory(dir);
            }
            AsyncComputeTaskPool::get().spawn(async move {
                dialog
                    .set_title("Save XYZ file")
                    .set_file_name(file_name)
                    .save_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            })
        }
    };
    commands.spawn(PendingDialog {
        purpose: request,
        task,
    });
}

fn finish_file_dialogs(
    mut commands: Commands,
    mut dialogs: Query<(Entity, &mut PendingDialog)>,
    mut settings: ResMut<EditorSettings>,
    mut closed: EventWriter<DialogClosed>,
    mut imports: EventWriter<ImportRequest>,
    mut saves: EventWriter<SaveStructure>,
) {
    for (entity, mut dialog) in &mut dialogs {
        let Some(chosen) = block_on(future::poll_once(&mut dialog.task)) else {
            continue;
        };
        commands.entity(entity).despawn();
        let Some(path) = chosen else {
            debug!("File panel cancelled");
            continue;
        };

        match &dialog.purpose {
            OpenFileDialog::Import => {
                if let Some(dir) = path.parent() {
                    settings.import_dir = dir.to_string_lossy().into_owned();
                }
                imports.send(ImportRequest(path.clone()));
            }
            OpenFileDialog::Save { name } => {
                settings.export_path = path.to_string_lossy().into_owned();
                saves.send(SaveStructure {
                    path: path.clone(),
                    name: name.trim().to_owned(),
                });
            }
        }
        closed.send(DialogClosed {
            purpose: dialog.purpose.clone(),
            path,
        });
    }
}


// End of File
