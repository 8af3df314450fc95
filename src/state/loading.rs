// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::{AppState, SampleMolecules};
use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_loading_state(
            LoadingState::new(AppState::Loading)
                .continue_to_state(AppState::Editor)
                .load_collection::<SampleMolecules>(),
        )
        .add_systems(OnExit(AppState::Loading), report_loaded);
    }
}

fn report_loaded(samples: Option<Res<SampleMolecules>>) {
    match samples {
        Some(samples) => info!(
            "Loaded {} sample molecules, entering the editor",
            samples.iter().count()
        ),
        None => warn!("Sample molecules are unavailable"),
    }
}

// End of File
