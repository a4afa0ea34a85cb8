//! Asset preloading awaited by `GameEngine::start`

use std::future::Future;
use std::pin::Pin;

use crate::core::error::Result;
use crate::terrain::TerrainType;

pub type PreloadFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

/// Loads whatever the embedding shell needs before the first turn
pub trait AssetPreloader {
    fn preload(&self) -> PreloadFuture<'_>;
}

/// Nothing to load
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetPreloader for NoAssets {
    fn preload(&self) -> PreloadFuture<'_> {
        Box::pin(async { Ok(()) })
    }
}

/// Keys of every terrain sprite a renderer has to load
pub fn terrain_asset_keys() -> Vec<String> {
    TerrainType::all().iter().map(TerrainType::asset_key).collect()
}
