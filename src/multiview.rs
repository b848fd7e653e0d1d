//! The multiview instance: configuration rebuilds, per-frame plans and pointer lookup.

use std::sync::Arc;

use crate::{
    audio::meter::AudioMeter,
    audio::output::AudioOutput,
    config::{MultiviewConfig, Style},
    foundation::core::{Letterbox, Point},
    foundation::error::MultiviewResult,
    layout::geometry::ViewGeometry,
    layout::hit_test,
    render::orchestrator::{FrameInputs, compile_frame},
    render::plan::FramePlan,
    scene::host::{SceneHost, SceneId, WeakScene},
    scene::labels::{LabelFactory, LabelObject, create_label},
    scene::visibility::{ShowingGuard, select_visible},
};

/// The windowing system, as far as hit-testing needs it.
pub trait WindowSystem {
    /// Pixel size of the active window, if there is one.
    fn active_window_size(&self) -> Option<(u32, u32)>;
}

/// Everything derived from one configuration. Rebuilt wholesale, never patched.
struct ViewState {
    config: MultiviewConfig,
    geometry: ViewGeometry,
    showing: Vec<ShowingGuard>,
    scenes: Vec<WeakScene>,
    /// `[preview, program, scene labels...]`; empty when labels are off.
    labels: Vec<Box<dyn LabelObject>>,
}

/// One multiview window.
///
/// Owns the visible-scene list (as showing guards), the label objects and the audio meter.
/// `configure` and `render_frame` must not run concurrently on the same instance.
pub struct Multiview {
    host: Arc<dyn SceneHost>,
    label_factory: Arc<dyn LabelFactory>,
    style: Style,
    meter: AudioMeter,
    view: Option<ViewState>,
}

impl Multiview {
    pub fn new(
        host: Arc<dyn SceneHost>,
        label_factory: Arc<dyn LabelFactory>,
        audio: Arc<dyn AudioOutput>,
        style: Style,
    ) -> Self {
        Self {
            host,
            label_factory,
            meter: AudioMeter::new(audio, style.meter),
            style,
            view: None,
        }
    }

    /// Rebuild all view state for `config`.
    ///
    /// Previous showing references and labels are released before anything new is acquired.
    /// On error the instance is left unconfigured with the meter detached.
    #[tracing::instrument(skip(self), fields(layout = ?config.layout))]
    pub fn configure(&mut self, config: MultiviewConfig) -> MultiviewResult<()> {
        self.view = None;
        self.meter.release_scale_labels();

        let result = self.rebuild(config);
        if result.is_err() {
            self.meter.unsubscribe();
        }
        result
    }

    fn rebuild(&mut self, config: MultiviewConfig) -> MultiviewResult<()> {
        self.style.meter.validate()?;
        let canvas = self.host.output_size();
        let geometry = ViewGeometry::new(config.layout, canvas, self.style.thickness)?;

        let showing = select_visible(&self.host, geometry.spec().capacity);
        let scenes: Vec<WeakScene> = showing.iter().map(ShowingGuard::scene).collect();

        let labels = if config.show_labels {
            self.build_labels(&scenes, canvas.height)
        } else {
            Vec::new()
        };

        if config.show_meter {
            self.meter
                .rebuild_scale_labels(self.label_factory.as_ref(), canvas.height);
        } else {
            self.meter.unsubscribe();
        }
        let tracks_changed = config.selected_tracks != self.meter.selected_tracks();
        if let Err(e) = self.meter.select_tracks(config.selected_tracks) {
            tracing::warn!(error = %e, "audio meter resubscription failed");
        }
        if config.show_meter
            && tracks_changed
            && let Err(e) = self.meter.ensure_subscribed()
        {
            tracing::warn!(error = %e, "audio meter subscription failed");
        }

        tracing::debug!(
            visible = scenes.len(),
            capacity = geometry.spec().capacity,
            labels = labels.len(),
            width = canvas.width,
            height = canvas.height,
            "multiview rebuilt"
        );

        self.view = Some(ViewState {
            config,
            geometry,
            showing,
            scenes,
            labels,
        });
        Ok(())
    }

    fn build_labels(&self, scenes: &[WeakScene], output_height: u32) -> Vec<Box<dyn LabelObject>> {
        let factory = self.label_factory.as_ref();
        let mut labels = Vec::with_capacity(scenes.len() + 2);
        labels.push(create_label(factory, "Preview", output_height / 2));
        labels.push(create_label(factory, "Program", output_height / 2));
        for scene in scenes {
            let name = self
                .host
                .scene_name(scene.id())
                .unwrap_or_default();
            labels.push(create_label(factory, &name, output_height / 3));
        }
        labels
    }

    /// Compile the frame for a window of `window_width` x `window_height` pixels.
    ///
    /// An unconfigured instance yields an empty plan.
    pub fn render_frame(&mut self, window_width: u32, window_height: u32) -> FramePlan {
        let Some(view) = self.view.as_ref() else {
            return FramePlan::empty(self.host.output_size(), Letterbox::default());
        };

        let meter = if view.config.show_meter {
            if let Err(e) = self.meter.ensure_subscribed() {
                tracing::warn!(error = %e, "audio meter subscription failed");
            }
            self.meter.poll();
            Some(&self.meter)
        } else {
            None
        };

        let inputs = FrameInputs {
            geometry: &view.geometry,
            host: self.host.as_ref(),
            scenes: &view.scenes,
            labels: &view.labels,
            meter,
            palette: &self.style.palette,
            show_safe_area: view.config.show_safe_area,
        };
        compile_frame(&inputs, window_width, window_height)
    }

    /// Scene under `pointer` in a window of the given size.
    ///
    /// Empty grid cells and scenes destroyed since the last rebuild are not hit.
    pub fn locate_in(
        &self,
        pointer: Point,
        window_width: u32,
        window_height: u32,
    ) -> Option<SceneId> {
        let view = self.view.as_ref()?;
        let index = hit_test::locate(&view.geometry, pointer, window_width, window_height)?;
        view.scenes.get(index)?.upgrade(self.host.as_ref())
    }

    /// Scene under `pointer` in the windowing system's active window.
    pub fn locate(&self, pointer: Point, windows: &dyn WindowSystem) -> Option<SceneId> {
        let (w, h) = windows.active_window_size()?;
        self.locate_in(pointer, w, h)
    }

    pub fn config(&self) -> Option<&MultiviewConfig> {
        self.view.as_ref().map(|v| &v.config)
    }

    pub fn geometry(&self) -> Option<&ViewGeometry> {
        self.view.as_ref().map(|v| &v.geometry)
    }

    /// Visible scenes in tile order, as of the last rebuild.
    pub fn visible_scenes(&self) -> Vec<SceneId> {
        self.view
            .as_ref()
            .map(|v| v.scenes.iter().map(WeakScene::id).collect())
            .unwrap_or_default()
    }

    pub fn labels(&self) -> &[Box<dyn LabelObject>] {
        match &self.view {
            Some(v) => &v.labels,
            None => &[],
        }
    }

    pub fn meter(&self) -> &AudioMeter {
        &self.meter
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

impl Drop for Multiview {
    fn drop(&mut self) {
        if let Some(view) = self.view.take() {
            tracing::debug!(released = view.showing.len(), "multiview released scenes");
        }
    }
}

impl std::fmt::Debug for Multiview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Multiview")
            .field("config", &self.config())
            .field("visible", &self.visible_scenes())
            .field("meter", &self.meter)
            .finish()
    }
}
