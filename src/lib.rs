// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use bevy::prelude::*;

pub const APP_NAME: &str = "XYZCombiner";

/// Log filter applied on top of the default `info` level.
pub const LOG_FILTER: &str = "wgpu=error,naga=warn,bevy_render=info,xyzcombiner=debug";

mod actions;
pub use actions::{ActionsPlugin, EditorAction};

mod app;
pub use app::AppPlugin;

mod assets;
pub use assets::SampleMolecules;

mod camera;
pub use camera::{CameraPlugin, EditorCamera};

mod file_dialog;
pub use file_dialog::{DialogClosed, FileDialogPlugin, OpenFileDialog};

mod fps;
pub use fps::{FrameLimiter, FrameLimiterPlugin};

pub mod overlap;
pub use overlap::{OverlapPlugin, OverlapReport, PendingOverlapCheck, ResolveOverlaps};

mod selection;
pub use selection::{selected_info, SelectionPlugin};

mod start;
pub use start::start;

mod state;
pub use state::{EditorPlugin, LoadingPlugin, StartupImports};

pub mod transform_controls;
pub use transform_controls::{TransformControlsPlugin, Transforms};

mod ui;
pub use ui::{UiFocus, UiPlugin};

mod window_management;

pub mod world_space;
pub use world_space::{
    AtomObject, BundleMolecules, ImportRequest, MoleculeObject, RemoveObject, SaveStructure,
    SpawnMolecule, WorldSpace, WorldSpacePlugin,
};

mod xyz_asset;
pub use xyz_asset::{XyzAsset, XyzAssetLoader, XyzAssetLoaderError, XyzAssetPlugin};

#[derive(States, Default, Clone, Eq, PartialEq, Debug, Hash)]
pub enum AppState {
    /// Bundled sample structures are being loaded.
    #[default]
    Loading,
    /// The scene is interactive.
    Editor,
}

// End of File
