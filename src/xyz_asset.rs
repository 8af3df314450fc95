// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use bevy::{
    asset::{io::Reader, AssetLoader, AsyncReadExt, LoadContext},
    prelude::*,
    utils::BoxedFuture,
};
use molecule::{parse_xyz, Molecule, XyzError};
use thiserror::Error as ThisError;

/// A structure file bundled with the application.
#[derive(Asset, TypePath, Debug, Clone)]
pub struct XyzAsset {
    pub molecule: Molecule,
}

#[derive(Default)]
pub struct XyzAssetLoader;

#[derive(Debug, ThisError)]
pub enum XyzAssetLoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Malformed XYZ file: {0}")]
    Xyz(#[from] XyzError),
}

/// Parsing shared by the asset loader and its tests.
fn parse_xyz_asset(bytes: &[u8], fallback_name: &str) -> Result<XyzAsset, XyzAssetLoaderError> {
    let content = std::str::from_utf8(bytes)?;
    let mut molecule = parse_xyz(content)?;
    if molecule.name.is_empty() {
        molecule.name = fallback_name.to_owned();
    }
    Ok(XyzAsset { molecule })
}

impl AssetLoader for XyzAssetLoader {
    type Asset = XyzAsset;
    type Settings = ();
    type Error = XyzAssetLoaderError;

    fn load<'a>(
        &'a self,
        reader: &'a mut Reader,
        _settings: &'a Self::Settings,
        load_context: &'a mut LoadContext,
    ) -> BoxedFuture<'a, Result<Self::Asset, Self::Error>> {
        Box::pin(async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let fallback_name = load_context
                .path()
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_owned();
            parse_xyz_asset(&bytes, &fallback_name)
        })
    }

    fn extensions(&self) -> &[&str] {
        &["xyz"]
    }
}

pub struct XyzAssetPlugin;

impl Plugin for XyzAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<XyzAsset>()
            .init_asset_loader::<XyzAssetLoader>();
    }
}


// End of File
