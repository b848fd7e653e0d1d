use crate::foundation::core::Canvas;

/// Identifier of a scene owned by the composition engine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SceneId(pub u64);

/// The composition engine, as seen from the multiview.
///
/// The multiview never owns scenes. It observes them through [`WeakScene`] handles and keeps a
/// "showing" count raised on every scene it displays so the engine keeps rendering them.
/// Implementations use interior mutability; calls may come from the render thread.
pub trait SceneHost: Send + Sync {
    /// Currently available scenes, in display order.
    fn scenes(&self) -> Vec<SceneId>;

    fn is_alive(&self, scene: SceneId) -> bool;

    fn scene_name(&self, scene: SceneId) -> Option<String>;

    /// Persisted "show in multiview" flag; `None` when it was never set.
    fn show_in_multiview(&self, scene: SceneId) -> Option<bool>;

    fn inc_showing(&self, scene: SceneId);

    fn dec_showing(&self, scene: SceneId);

    /// Base output resolution.
    fn output_size(&self) -> Canvas;

    /// Scene currently on air.
    fn program_scene(&self) -> Option<SceneId>;

    /// Scene staged for the next switch.
    fn preview_scene(&self) -> Option<SceneId>;

    /// Whether preview and program are distinct (split preview/program mode).
    fn preview_program_mode(&self) -> bool;
}

/// Non-owning handle to a scene; every use goes through [`WeakScene::upgrade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WeakScene(SceneId);

impl WeakScene {
    pub fn new(scene: SceneId) -> Self {
        Self(scene)
    }

    /// The id this handle was created for, without a liveness check.
    pub fn id(&self) -> SceneId {
        self.0
    }

    /// Resolve to the scene if the host still has it.
    pub fn upgrade(&self, host: &dyn SceneHost) -> Option<SceneId> {
        host.is_alive(self.0).then_some(self.0)
    }
}
