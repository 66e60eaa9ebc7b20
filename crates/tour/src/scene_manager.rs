use catalog::SceneDescriptor;
use foundation::math::Vec3;
use gpu::{RenderBackend, RenderError, Renderer, SurfaceSize};
use runtime::{FrameHandle, FrameScheduler, RenderLoop};
use scene::SceneGraph;
use scene::components::{Color, DecodedImage, Material, Mesh, PerspectiveCamera, SphereGeometry};
use scene::entity::NodeId;
use scene::prefabs::{
    PanoramaShape, fallback_material, panorama_geometry, placeholder_material, spawn_panorama,
    textured_material,
};
use streaming::{Request, RequestTracker, TextureOutcome};
use tracing::{debug, error, info, warn};

use crate::config::TourConfig;
use crate::controller::OrientationController;
use crate::error::TourError;

/// Nominal frame duration handed to the render loop; the browser paces the
/// actual callbacks.
const FRAME_DT_S: f64 = 1.0 / 60.0;

/// A mounted rendering surface: the backend and the frame scheduler bound to
/// it, plus its current size.
#[derive(Debug)]
pub struct ViewSurface<B, S> {
    pub backend: B,
    pub scheduler: S,
    pub size: SurfaceSize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub request: Request,
    /// `None` when the scene has no usable image; the loader then picks a
    /// fallback.
    pub url: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadApplied {
    Textured,
    /// Applied, but with the flat placeholder sphere.
    Placeholder,
    /// Superseded or disposed; nothing changed.
    Stale,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct ActiveSphere {
    node: NodeId,
    mesh: Mesh,
}

/// Renderer state of one mounted view: camera, graph root, backend and the
/// single active panorama sphere.
#[derive(Debug)]
pub struct RenderContext<B> {
    camera: PerspectiveCamera,
    graph: SceneGraph,
    backend: B,
    geometry: SphereGeometry,
    sphere: Option<ActiveSphere>,
}

impl<B: RenderBackend> RenderContext<B> {
    fn new(mut backend: B, size: SurfaceSize, config: &TourConfig) -> Self {
        backend.resize(size);
        Self {
            camera: PerspectiveCamera::new(config.fov_y_deg, size.aspect(), config.near, config.far),
            graph: SceneGraph::new(Color::from_hex(config.background_color)),
            backend,
            geometry: panorama_geometry(PanoramaShape {
                radius: config.sphere_radius,
                width_segments: config.sphere_width_segments,
                height_segments: config.sphere_height_segments,
            }),
            sphere: None,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn active_mesh(&self) -> Option<Mesh> {
        self.sphere.map(|s| s.mesh)
    }

    fn release_sphere(&mut self) {
        let Some(sphere) = self.sphere.take() else {
            return;
        };
        self.graph.remove(sphere.node);
        self.backend.release_mesh(sphere.mesh.geometry);
        self.backend.release_material(sphere.mesh.material);
    }

    /// Swaps in a new sphere drawn with `material`. The previous sphere is
    /// released first so at most one texture is ever resident.
    fn replace_sphere(
        &mut self,
        material: Material,
        image: Option<&DecodedImage>,
    ) -> Result<(), RenderError> {
        self.release_sphere();

        let mesh_id = self.backend.upload_mesh(&self.geometry)?;
        let material_id = match self.backend.upload_material(&material, image) {
            Ok(id) => id,
            Err(e) => {
                self.backend.release_mesh(mesh_id);
                return Err(e);
            }
        };
        let mesh = Mesh::new(mesh_id, material_id, material);
        let node = spawn_panorama(&mut self.graph, mesh);
        self.sphere = Some(ActiveSphere { node, mesh });
        Ok(())
    }

    fn draw(&mut self, look: Vec3, frame_index: u64) {
        self.camera.look_at(self.camera.position + look);
        let frame = Renderer::collect(&self.graph, &self.camera, frame_index);
        if let Err(e) = self.backend.render(&frame) {
            warn!(frame_index, "render failed: {e}");
        }
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.camera.set_aspect_from_size(size.width as f64, size.height as f64);
        self.backend.resize(size);
    }

    fn teardown(&mut self) {
        self.release_sphere();
        for mesh in self.graph.clear() {
            self.backend.release_mesh(mesh.geometry);
            self.backend.release_material(mesh.material);
        }
        self.backend.release();
    }
}

/// Owns the render context, the render loop and the orientation controller
/// of one view, and applies texture loads to it.
#[derive(Debug)]
pub struct SceneManager<B, S> {
    context: RenderContext<B>,
    render_loop: RenderLoop<S>,
    controller: OrientationController,
    tracker: RequestTracker,
    placeholder_color: Color,
    loading: bool,
    disposed: bool,
}

impl<B: RenderBackend, S: FrameScheduler> SceneManager<B, S> {
    /// Sets up camera and backend, shows the wireframe placeholder sphere and
    /// starts the render loop.
    pub fn initialize(surface: ViewSurface<B, S>, config: &TourConfig) -> Result<Self, TourError> {
        let ViewSurface {
            backend,
            scheduler,
            size,
        } = surface;
        let placeholder_color = Color::from_hex(config.placeholder_color);

        let mut context = RenderContext::new(backend, size, config);
        if let Err(e) = context.replace_sphere(placeholder_material(placeholder_color), None) {
            context.teardown();
            return Err(e.into());
        }

        let mut render_loop = RenderLoop::new(scheduler, FRAME_DT_S);
        render_loop.start();
        info!(
            width = size.width,
            height = size.height,
            pixel_ratio = size.pixel_ratio,
            "scene initialised"
        );

        Ok(Self {
            context,
            render_loop,
            controller: OrientationController::new(config.drag_sensitivity, config.latitude_limit),
            tracker: RequestTracker::new(),
            placeholder_color,
            loading: false,
            disposed: false,
        })
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn context(&self) -> &RenderContext<B> {
        &self.context
    }

    pub fn backend(&self) -> &B {
        self.context.backend()
    }

    pub fn controller(&self) -> &OrientationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut OrientationController {
        &mut self.controller
    }

    pub fn render_loop(&self) -> &RenderLoop<S> {
        &self.render_loop
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.render_loop.scheduler_mut()
    }

    /// Starts loading `desc`, superseding any load still in flight.
    pub fn begin_load(&mut self, desc: &SceneDescriptor) -> Option<LoadTicket> {
        if self.disposed {
            return None;
        }
        self.loading = true;
        let request = self.tracker.issue();
        debug!(scene = %desc.id, request = request.0, "load started");
        Some(LoadTicket {
            request,
            url: desc.texture_url().map(str::to_string),
        })
    }

    /// Applies a finished texture load if `request` is still the current one.
    pub fn finish_load(&mut self, request: Request, outcome: TextureOutcome) -> LoadApplied {
        if self.disposed || !self.tracker.complete(request) {
            debug!(request = request.0, "discarding stale texture load");
            return LoadApplied::Stale;
        }

        let applied = match outcome {
            TextureOutcome::Image(image) => {
                match self.context.replace_sphere(textured_material(), Some(&image)) {
                    Ok(()) => LoadApplied::Textured,
                    Err(e) => {
                        warn!("texture upload failed, showing placeholder: {e}");
                        self.apply_placeholder()
                    }
                }
            }
            TextureOutcome::Placeholder => self.apply_placeholder(),
        };

        self.controller.reset();
        self.loading = false;
        applied
    }

    fn apply_placeholder(&mut self) -> LoadApplied {
        if let Err(e) = self
            .context
            .replace_sphere(fallback_material(self.placeholder_color), None)
        {
            error!("placeholder sphere upload failed: {e}");
        }
        LoadApplied::Placeholder
    }

    /// Handles a fired frame. Returns whether a frame was rendered.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.disposed {
            return false;
        }
        let Self {
            context,
            render_loop,
            controller,
            ..
        } = self;
        render_loop.tick(handle, |frame| {
            context.draw(controller.to_look_at_vector(), frame.index)
        })
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        if self.disposed {
            return;
        }
        self.context.resize(size);
    }

    /// Stops the loop, invalidates in-flight loads and releases every GPU
    /// resource. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.render_loop.stop();
        self.tracker.invalidate();
        self.context.teardown();
        self.loading = false;
        self.disposed = true;
        info!("scene disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadApplied, SceneManager, ViewSurface};
    use crate::config::TourConfig;
    use catalog::SceneDescriptor;
    use gpu::{HeadlessBackend, SurfaceSize};
    use runtime::ManualScheduler;
    use scene::components::DecodedImage;
    use streaming::TextureOutcome;

    fn manager() -> SceneManager<HeadlessBackend, ManualScheduler> {
        let size = SurfaceSize::new(400, 300, 2.0);
        let surface = ViewSurface {
            backend: HeadlessBackend::default(),
            scheduler: ManualScheduler::new(),
            size,
        };
        SceneManager::initialize(surface, &TourConfig::default()).expect("initialize")
    }

    fn image(width: u32) -> TextureOutcome {
        let img = DecodedImage::new(width, 1, vec![128; width as usize * 4]).expect("image");
        TextureOutcome::Image(img)
    }

    fn scene(url: &str) -> SceneDescriptor {
        SceneDescriptor::new("s", "Scene", url)
    }

    fn pump(m: &mut SceneManager<HeadlessBackend, ManualScheduler>) -> usize {
        let handles = m.scheduler_mut().take_pending();
        handles.into_iter().filter(|h| m.on_frame(*h)).count()
    }

    #[test]
    fn initialize_shows_wireframe_placeholder() {
        let m = manager();
        let mesh = m.context().active_mesh().expect("sphere");
        assert!(mesh.desc.wireframe);
        assert_eq!(m.backend().mesh_count(), 1);
        assert_eq!(m.backend().size().map(|s| s.physical_width()), Some(800));
        assert!((m.context().camera().aspect - 400.0 / 300.0).abs() < 1e-12);
        assert!(m.render_loop().is_running());
        assert!(!m.loading());
    }

    #[test]
    fn texture_load_replaces_sphere_and_resets_orientation() {
        let mut m = manager();
        m.controller_mut().on_drag_start(0.0, 0.0);
        m.controller_mut().on_drag_move(100.0, 100.0);

        let ticket = m.begin_load(&scene("https://x/a.jpg")).expect("ticket");
        assert!(m.loading());
        assert_eq!(ticket.url.as_deref(), Some("https://x/a.jpg"));

        assert_eq!(m.finish_load(ticket.request, image(4)), LoadApplied::Textured);
        assert!(!m.loading());
        assert_eq!(m.controller().state().longitude, 0.0);

        let mesh = m.context().active_mesh().expect("sphere");
        assert!(mesh.desc.textured);
        assert_eq!(m.context().graph().len(), 1);
        assert_eq!(m.backend().texture_count(), 1);
    }

    #[test]
    fn replacing_scenes_keeps_one_texture_resident() {
        let mut m = manager();
        for w in 1..=5 {
            let ticket = m.begin_load(&scene("https://x/a.jpg")).expect("ticket");
            m.finish_load(ticket.request, image(w));
            assert_eq!(m.backend().mesh_count(), 1);
            assert_eq!(m.backend().material_count(), 1);
            assert_eq!(m.backend().texture_count(), 1);
        }
        let ticket = m.begin_load(&scene("")).expect("ticket");
        assert_eq!(ticket.url, None);
        assert_eq!(m.finish_load(ticket.request, TextureOutcome::Placeholder), LoadApplied::Placeholder);
        assert_eq!(m.backend().texture_count(), 0);
        assert_eq!(m.backend().material_count(), 1);
    }

    #[test]
    fn superseded_load_is_stale() {
        let mut m = manager();
        let a = m.begin_load(&scene("https://x/a.jpg")).expect("a");
        let b = m.begin_load(&scene("https://x/b.jpg")).expect("b");

        assert_eq!(m.finish_load(b.request, image(3)), LoadApplied::Textured);
        assert_eq!(m.finish_load(a.request, image(2)), LoadApplied::Stale);

        let mesh = m.context().active_mesh().expect("sphere");
        let resident = m.backend().material(mesh.material).expect("material");
        assert_eq!(resident.texture, Some((3, 1)));
    }

    #[test]
    fn upload_failure_falls_back_to_placeholder() {
        let mut m = manager();
        let ticket = m.begin_load(&scene("https://x/a.jpg")).expect("ticket");
        // Reach into the backend to simulate a rejected texture upload.
        m.context.backend_mut().set_fail_texture_uploads(true);
        assert_eq!(m.finish_load(ticket.request, image(2)), LoadApplied::Placeholder);
        assert!(!m.loading());
        let mesh = m.context().active_mesh().expect("sphere");
        assert!(!mesh.desc.textured && !mesh.desc.wireframe);
    }

    #[test]
    fn frames_render_until_dispose() {
        let mut m = manager();
        assert_eq!(pump(&mut m), 1);
        assert_eq!(pump(&mut m), 1);
        assert_eq!(m.backend().frames_rendered(), 2);

        let pending = m.render_loop().pending().expect("pending frame");
        m.dispose();
        assert!(!m.on_frame(pending));
        assert_eq!(pump(&mut m), 0);
        assert_eq!(m.backend().frames_rendered(), 2);
        assert!(m.backend().is_released());
    }

    #[test]
    fn dispose_then_late_completion_is_ignored() {
        let mut m = manager();
        let ticket = m.begin_load(&scene("https://x/a.jpg")).expect("ticket");
        m.dispose();
        m.dispose();

        assert!(!m.loading());
        assert_eq!(m.finish_load(ticket.request, image(2)), LoadApplied::Stale);
        assert_eq!(m.backend().mesh_count(), 0);
        assert_eq!(m.backend().material_count(), 0);
        assert!(m.context().graph().is_empty());
        assert!(m.begin_load(&scene("https://x/b.jpg")).is_none());
    }

    #[test]
    fn camera_follows_controller() {
        let mut m = manager();
        m.controller_mut().on_drag_start(0.0, 0.0);
        m.controller_mut().on_drag_move(-900.0, 0.0);
        pump(&mut m);
        let fwd = m.context().camera().forward();
        // longitude +90 looks down +Z.
        assert!((fwd.z - 1.0).abs() < 1e-9, "{fwd:?}");
    }
}
