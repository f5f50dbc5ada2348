//! Shadow map caching
//!
//! The shadow map is only re-rendered when something that can change it has
//! changed. The scene bumps its shadow epoch on every such mutation (light
//! pose, node visibility, transform or geometry), so the cache just compares
//! the epoch it last rendered against the current one.

/// Shadow map cache manager
#[derive(Debug, Default)]
pub struct ShadowCache {
    /// Scene epoch the shadow map was last rendered for
    rendered_epoch: Option<u64>,
    /// Number of shadow passes actually rendered
    renders: u64,
    /// Number of frames that reused the cached map
    reuses: u64,
}

impl ShadowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the shadow map needs to be regenerated for `epoch`
    pub fn needs_update(&self, epoch: u64) -> bool {
        self.rendered_epoch != Some(epoch)
    }

    /// Records that the shadow map now reflects `epoch`
    pub fn mark_valid(&mut self, epoch: u64) {
        self.rendered_epoch = Some(epoch);
        self.renders += 1;
    }

    /// Records a frame that skipped the shadow pass
    pub fn mark_reused(&mut self) {
        self.reuses += 1;
    }

    pub fn get_stats(&self) -> ShadowCacheStats {
        ShadowCacheStats {
            rendered_epoch: self.rendered_epoch,
            renders: self.renders,
            reuses: self.reuses,
        }
    }
}

/// Statistics about the shadow cache for debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowCacheStats {
    pub rendered_epoch: Option<u64>,
    pub renders: u64,
    pub reuses: u64,
}
