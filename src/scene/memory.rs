//! In-memory collaborators for tests, tooling and the CLI.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};

use crate::{
    foundation::core::{Canvas, Size},
    scene::host::{SceneHost, SceneId},
    scene::labels::{LabelFactory, LabelId, LabelObject},
};

#[derive(Clone, Debug)]
struct MemoryScene {
    id: SceneId,
    name: String,
    show_in_multiview: Option<bool>,
    showing: i64,
}

#[derive(Debug)]
struct HostState {
    output: Canvas,
    next_id: u64,
    scenes: Vec<MemoryScene>,
    program: Option<SceneId>,
    preview: Option<SceneId>,
    preview_program_mode: bool,
}

/// A [`SceneHost`] backed by a plain list of named scenes.
#[derive(Debug)]
pub struct MemorySceneHost {
    state: Mutex<HostState>,
}

impl MemorySceneHost {
    pub fn new(output: Canvas) -> Self {
        Self {
            state: Mutex::new(HostState {
                output,
                next_id: 1,
                scenes: Vec::new(),
                program: None,
                preview: None,
                preview_program_mode: false,
            }),
        }
    }

    /// Host with `count` scenes named `Scene 1..=count`.
    pub fn with_scenes(output: Canvas, count: usize) -> Self {
        let host = Self::new(output);
        for i in 1..=count {
            host.add_scene(&format!("Scene {i}"));
        }
        host
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_scene(&self, name: &str) -> SceneId {
        let mut st = self.state();
        let id = SceneId(st.next_id);
        st.next_id += 1;
        st.scenes.push(MemoryScene {
            id,
            name: name.to_string(),
            show_in_multiview: None,
            showing: 0,
        });
        id
    }

    /// Destroy a scene; outstanding handles to it go stale.
    pub fn remove_scene(&self, scene: SceneId) {
        let mut st = self.state();
        st.scenes.retain(|s| s.id != scene);
        if st.program == Some(scene) {
            st.program = None;
        }
        if st.preview == Some(scene) {
            st.preview = None;
        }
    }

    pub fn rename_scene(&self, scene: SceneId, name: &str) {
        if let Some(s) = self.state().scenes.iter_mut().find(|s| s.id == scene) {
            s.name = name.to_string();
        }
    }

    pub fn set_show_in_multiview(&self, scene: SceneId, show: bool) {
        if let Some(s) = self.state().scenes.iter_mut().find(|s| s.id == scene) {
            s.show_in_multiview = Some(show);
        }
    }

    pub fn set_output_size(&self, output: Canvas) {
        self.state().output = output;
    }

    pub fn set_program(&self, scene: Option<SceneId>) {
        self.state().program = scene;
    }

    pub fn set_preview(&self, scene: Option<SceneId>) {
        self.state().preview = scene;
    }

    pub fn set_preview_program_mode(&self, enabled: bool) {
        self.state().preview_program_mode = enabled;
    }

    /// Current showing count of a scene (0 for unknown scenes).
    pub fn showing_count(&self, scene: SceneId) -> i64 {
        self.state()
            .scenes
            .iter()
            .find(|s| s.id == scene)
            .map_or(0, |s| s.showing)
    }

    /// Sum of showing counts across all live scenes.
    pub fn total_showing(&self) -> i64 {
        self.state().scenes.iter().map(|s| s.showing).sum()
    }
}

impl SceneHost for MemorySceneHost {
    fn scenes(&self) -> Vec<SceneId> {
        self.state().scenes.iter().map(|s| s.id).collect()
    }

    fn is_alive(&self, scene: SceneId) -> bool {
        self.state().scenes.iter().any(|s| s.id == scene)
    }

    fn scene_name(&self, scene: SceneId) -> Option<String> {
        self.state()
            .scenes
            .iter()
            .find(|s| s.id == scene)
            .map(|s| s.name.clone())
    }

    fn show_in_multiview(&self, scene: SceneId) -> Option<bool> {
        self.state()
            .scenes
            .iter()
            .find(|s| s.id == scene)
            .and_then(|s| s.show_in_multiview)
    }

    fn inc_showing(&self, scene: SceneId) {
        if let Some(s) = self.state().scenes.iter_mut().find(|s| s.id == scene) {
            s.showing += 1;
        }
    }

    fn dec_showing(&self, scene: SceneId) {
        if let Some(s) = self.state().scenes.iter_mut().find(|s| s.id == scene) {
            s.showing -= 1;
        }
    }

    fn output_size(&self) -> Canvas {
        self.state().output
    }

    fn program_scene(&self) -> Option<SceneId> {
        self.state().program
    }

    fn preview_scene(&self) -> Option<SceneId> {
        self.state().preview
    }

    fn preview_program_mode(&self) -> bool {
        self.state().preview_program_mode
    }
}

/// A [`LabelFactory`] with fixed-pitch text metrics; tracks how many labels are alive.
#[derive(Debug, Default)]
pub struct MemoryLabelFactory {
    next_id: AtomicU64,
    live: Arc<AtomicUsize>,
}

impl MemoryLabelFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels created and not yet dropped.
    pub fn live_labels(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl LabelFactory for MemoryLabelFactory {
    fn create_label(&self, text: &str, font_size: u32) -> Box<dyn LabelObject> {
        let id = LabelId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.live.fetch_add(1, Ordering::SeqCst);
        let em = f64::from(font_size.max(1));
        Box::new(MemoryLabel {
            id,
            size: Size::new(
                (text.chars().count() as f64 * em * 0.6).ceil(),
                (em * 1.2).ceil(),
            ),
            live: Arc::clone(&self.live),
        })
    }
}

#[derive(Debug)]
struct MemoryLabel {
    id: LabelId,
    size: Size,
    live: Arc<AtomicUsize>,
}

impl LabelObject for MemoryLabel {
    fn id(&self) -> LabelId {
        self.id
    }

    fn size(&self) -> Size {
        self.size
    }
}

impl Drop for MemoryLabel {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}
