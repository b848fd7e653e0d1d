//! Visibility Filter: which scenes populate the grid.

use std::sync::Arc;

use crate::scene::host::{SceneHost, SceneId, WeakScene};

/// Pick at most `capacity` candidates, in order, skipping those whose flag is `Some(false)`.
///
/// A missing flag counts as opted in.
pub fn filter_candidates(
    candidates: &[SceneId],
    flag: impl Fn(SceneId) -> Option<bool>,
    capacity: usize,
) -> Vec<SceneId> {
    candidates
        .iter()
        .copied()
        .filter(|&scene| flag(scene).unwrap_or(true))
        .take(capacity)
        .collect()
}

/// Holds one "showing" reference on a scene for as long as it is displayed.
///
/// Acquiring increments the host's count; dropping decrements it if the scene still exists.
/// Rebuilds replace the whole guard list, so increments and decrements stay paired.
pub struct ShowingGuard {
    host: Arc<dyn SceneHost>,
    scene: WeakScene,
}

impl ShowingGuard {
    pub fn acquire(host: Arc<dyn SceneHost>, scene: SceneId) -> Self {
        host.inc_showing(scene);
        Self {
            host,
            scene: WeakScene::new(scene),
        }
    }

    pub fn scene(&self) -> WeakScene {
        self.scene
    }
}

impl Drop for ShowingGuard {
    fn drop(&mut self) {
        if let Some(scene) = self.scene.upgrade(self.host.as_ref()) {
            self.host.dec_showing(scene);
        }
    }
}

impl std::fmt::Debug for ShowingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowingGuard")
            .field("scene", &self.scene)
            .finish()
    }
}

/// Run the filter against the host's current scene list and take a showing reference on each
/// accepted scene.
pub fn select_visible(host: &Arc<dyn SceneHost>, capacity: usize) -> Vec<ShowingGuard> {
    let candidates = host.scenes();
    filter_candidates(&candidates, |s| host.show_in_multiview(s), capacity)
        .into_iter()
        .map(|scene| ShowingGuard::acquire(Arc::clone(host), scene))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/visibility.rs"]
mod tests;
