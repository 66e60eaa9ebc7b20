use std::cell::RefCell;
use std::rc::Rc;

use catalog::{
    CatalogOrigin, DEFAULT_HOUSE_TITLE, SceneCatalog, SceneDescriptor, SceneSource,
    fetch_house_title, load_from_backend,
};
use gpu::{RenderBackend, SurfaceSize};
use runtime::{FrameHandle, FrameScheduler};
use serde::Serialize;
use streaming::{Fetch, RequestTracker, TextureLoader};
use tracing::{debug, error, info, warn};

use crate::config::TourConfig;
use crate::error::TourError;
use crate::scene_manager::{LoadApplied, LoadTicket, SceneManager, ViewSurface};

/// Binds the session to one environment's renderer, frame source and network
/// transports.
pub trait Platform: 'static {
    type Backend: RenderBackend + 'static;
    type Scheduler: FrameScheduler + 'static;
    type Fetcher: Fetch + 'static;
    type Source: SceneSource + 'static;
}

pub type PlatformSurface<P> = ViewSurface<<P as Platform>::Backend, <P as Platform>::Scheduler>;
pub type PlatformManager<P> = SceneManager<<P as Platform>::Backend, <P as Platform>::Scheduler>;

/// Informational messages for the UI; never errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    DemoMode,
    DemoScenes,
    SceneLoaded,
    TextureFallback,
}

/// Snapshot of what the UI shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourView {
    pub loading: bool,
    pub error: Option<String>,
    /// `-1` when nothing is selected.
    pub current_scene_index: i64,
    pub catalog: Vec<SceneDescriptor>,
    pub house_title: Option<String>,
    pub notice: Option<Notice>,
}

struct SessionState<P: Platform> {
    manager: Option<PlatformManager<P>>,
    // Bumped on every mount so loads started against an earlier view are
    // discarded even though the new manager restarts its request counter.
    mount_epoch: u64,
    catalog: SceneCatalog,
    // Only the latest catalog load may replace the catalog; a pending token
    // means a load is in flight.
    catalog_requests: RequestTracker,
    house_title: Option<String>,
    error: Option<String>,
    notice: Option<Notice>,
}

/// Page-level controller of one house tour.
///
/// Cheap to clone; clones share state. Every method runs synchronously
/// except the ones that await the network, and none of them hold the state
/// borrowed across an await point.
pub struct TourSession<P: Platform> {
    state: Rc<RefCell<SessionState<P>>>,
    loader: Rc<TextureLoader<P::Fetcher>>,
    source: Rc<P::Source>,
    config: Rc<TourConfig>,
    house_id: Option<Rc<str>>,
}

impl<P: Platform> Clone for TourSession<P> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            loader: Rc::clone(&self.loader),
            source: Rc::clone(&self.source),
            config: Rc::clone(&self.config),
            house_id: self.house_id.clone(),
        }
    }
}

/// A started scene load. Resolving it fetches the texture and applies it
/// unless a later load or an unmount superseded it in the meantime.
#[must_use = "a pending load does nothing until resolved"]
pub struct PendingLoad<P: Platform> {
    session: TourSession<P>,
    epoch: u64,
    ticket: LoadTicket,
}

impl<P: Platform> PendingLoad<P> {
    pub fn ticket(&self) -> &LoadTicket {
        &self.ticket
    }

    pub async fn resolve(self) -> LoadApplied {
        let Self {
            session,
            epoch,
            ticket,
        } = self;
        let outcome = session.loader.load(ticket.url.as_deref()).await;

        let mut st = session.state.borrow_mut();
        if st.mount_epoch != epoch {
            debug!(request = ticket.request.0, "view remounted, dropping texture");
            return LoadApplied::Stale;
        }
        let Some(manager) = st.manager.as_mut() else {
            return LoadApplied::Stale;
        };
        let applied = manager.finish_load(ticket.request, outcome);
        match applied {
            LoadApplied::Textured => st.notice = Some(Notice::SceneLoaded),
            LoadApplied::Placeholder => st.notice = Some(Notice::TextureFallback),
            LoadApplied::Stale => {}
        }
        applied
    }
}

impl<P: Platform> TourSession<P> {
    pub fn new(
        config: TourConfig,
        house_id: Option<String>,
        fetcher: P::Fetcher,
        source: P::Source,
    ) -> Self {
        let house_id = house_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .map(Rc::from);
        let loader = TextureLoader::new(fetcher, config.fallback_texture_urls.clone(), config.seed());

        Self {
            state: Rc::new(RefCell::new(SessionState {
                manager: None,
                mount_epoch: 0,
                catalog: SceneCatalog::default(),
                catalog_requests: RequestTracker::new(),
                house_title: None,
                error: None,
                notice: None,
            })),
            loader: Rc::new(loader),
            source: Rc::new(source),
            config: Rc::new(config),
            house_id,
        }
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    pub fn house_id(&self) -> Option<&str> {
        self.house_id.as_deref()
    }

    pub fn texture_loader(&self) -> &TextureLoader<P::Fetcher> {
        &self.loader
    }

    /// Binds a freshly created surface. A failed surface is fatal for this
    /// view: the error is shown and nothing loads until the next mount.
    ///
    /// When a scene is already selected (a remount) its load is restarted.
    pub fn on_view_mount(
        &self,
        surface: Result<PlatformSurface<P>, TourError>,
    ) -> Option<PendingLoad<P>> {
        let current = {
            let mut st = self.state.borrow_mut();
            if let Some(old) = st.manager.as_mut() {
                old.dispose();
            }
            st.mount_epoch += 1;

            match surface.and_then(|s| SceneManager::initialize(s, &self.config)) {
                Ok(manager) => {
                    st.manager = Some(manager);
                    st.error = None;
                }
                Err(e) => {
                    error!("view mount failed: {e}");
                    st.manager = None;
                    st.error = Some(e.to_string());
                    return None;
                }
            }
            st.catalog.current_index()
        };
        current.and_then(|index| self.start_load(index))
    }

    pub fn on_view_unmount(&self) {
        if let Some(manager) = self.state.borrow_mut().manager.as_mut() {
            manager.dispose();
        }
    }

    /// Loads the catalog and the initial scene. Returns `None` without
    /// touching the selection when a later catalog load superseded this one.
    pub async fn open(&self) -> Option<LoadApplied> {
        if !self.load_catalog().await {
            return None;
        }
        let pending = self.select_initial_scene()?;
        Some(pending.resolve().await)
    }

    pub async fn on_retry(&self) -> Option<LoadApplied> {
        info!("retrying tour load");
        self.open().await
    }

    /// Replaces the catalog: the demo catalog without a house id, otherwise
    /// the backend's scene list (or the demo catalog when that fails).
    ///
    /// Returns `false` when a newer catalog load started while this one was
    /// waiting; its response is then discarded.
    pub async fn load_catalog(&self) -> bool {
        let request = self.state.borrow_mut().catalog_requests.issue();

        let Some(house_id) = self.house_id.clone() else {
            let mut st = self.state.borrow_mut();
            st.catalog_requests.complete(request);
            st.catalog = SceneCatalog::demo();
            st.house_title = Some(DEFAULT_HOUSE_TITLE.to_string());
            st.notice = Some(Notice::DemoMode);
            info!("no house id, running in demo mode");
            return true;
        };

        let title = match fetch_house_title(self.source.as_ref(), &house_id).await {
            Ok(title) => title,
            Err(e) => {
                warn!(house_id = %house_id, "house info unavailable: {e}");
                DEFAULT_HOUSE_TITLE.to_string()
            }
        };
        let (catalog, origin) =
            load_from_backend(self.source.as_ref(), &house_id, &self.config.file_base_url).await;

        let mut st = self.state.borrow_mut();
        if !st.catalog_requests.complete(request) {
            debug!(request = request.0, "discarding superseded catalog load");
            return false;
        }
        st.house_title = Some(title);
        st.catalog = catalog;
        if origin == CatalogOrigin::Demo {
            st.notice = Some(Notice::DemoScenes);
        }
        true
    }

    /// Selects the main scene (else the first) and starts loading it even if
    /// it is already selected.
    pub fn select_initial_scene(&self) -> Option<PendingLoad<P>> {
        let index = {
            let mut st = self.state.borrow_mut();
            let index = st.catalog.initial_index();
            if !st.catalog.set_current(index) {
                return None;
            }
            index
        };
        self.start_load(index)
    }

    /// Switches to scene `index`. Selecting the current scene or an index
    /// outside the catalog does nothing.
    pub fn select_scene(&self, index: usize) -> Option<PendingLoad<P>> {
        {
            let mut st = self.state.borrow_mut();
            if st.catalog.current_index() == Some(index) {
                debug!(index, "scene already selected");
                return None;
            }
            if !st.catalog.set_current(index) {
                warn!(index, len = st.catalog.len(), "scene index out of range");
                return None;
            }
        }
        self.start_load(index)
    }

    pub fn on_scene_tap(&self, index: usize) -> Option<PendingLoad<P>> {
        self.select_scene(index)
    }

    fn start_load(&self, index: usize) -> Option<PendingLoad<P>> {
        let mut st = self.state.borrow_mut();
        let desc = st.catalog.get(index)?.clone();
        let epoch = st.mount_epoch;
        let ticket = st.manager.as_mut()?.begin_load(&desc)?;
        info!(index, scene = %desc.title, "loading scene");
        Some(PendingLoad {
            session: self.clone(),
            epoch,
            ticket,
        })
    }

    pub fn on_touch_start(&self, x: f64, y: f64) {
        self.with_scene_manager(|m| m.controller_mut().on_drag_start(x, y));
    }

    pub fn on_touch_move(&self, x: f64, y: f64) {
        self.with_scene_manager(|m| m.controller_mut().on_drag_move(x, y));
    }

    pub fn on_touch_end(&self) {
        self.with_scene_manager(|m| m.controller_mut().on_drag_end());
    }

    pub fn on_resize(&self, width: u32, height: u32, pixel_ratio: f64) {
        let size = SurfaceSize::new(width, height, pixel_ratio);
        self.with_scene_manager(|m| m.resize(size));
    }

    /// Delivers a fired frame callback. Returns whether a frame was drawn.
    pub fn on_frame(&self, handle: FrameHandle) -> bool {
        self.with_scene_manager(|m| m.on_frame(handle)).unwrap_or(false)
    }

    pub fn with_scene_manager<R>(&self, f: impl FnOnce(&mut PlatformManager<P>) -> R) -> Option<R> {
        let mut st = self.state.borrow_mut();
        st.manager.as_mut().map(f)
    }

    pub fn with_scheduler<R>(&self, f: impl FnOnce(&mut P::Scheduler) -> R) -> Option<R> {
        self.with_scene_manager(|m| f(m.scheduler_mut()))
    }

    pub fn view(&self) -> TourView {
        let st = self.state.borrow();
        let manager_loading = st.manager.as_ref().is_some_and(|m| m.loading());
        TourView {
            loading: st.catalog_requests.current().is_some() || manager_loading,
            error: st.error.clone(),
            current_scene_index: st.catalog.current_index().map_or(-1, |i| i as i64),
            catalog: st.catalog.scenes().to_vec(),
            house_title: st.house_title.clone(),
            notice: st.notice,
        }
    }
}
