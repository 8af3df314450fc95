// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::XyzAsset;
use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

/// Structures shipped with the editor, offered as one-click imports.
#[derive(AssetCollection, Resource)]
pub struct SampleMolecules {
    #[asset(path = "molecules/water.xyz")]
    pub water: Handle<XyzAsset>,
    #[asset(path = "molecules/methane.xyz")]
    pub methane: Handle<XyzAsset>,
    #[asset(path = "molecules/benzene.xyz")]
    pub benzene: Handle<XyzAsset>,
}

impl SampleMolecules {
    pub fn iter(&self) -> impl Iterator<Item = &Handle<XyzAsset>> {
        [&self.water, &self.methane, &self.benzene].into_iter()
    }
}

// End of File
