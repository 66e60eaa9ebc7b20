//! Browser front end of the panoramic house tour.
//!
//! The page calls [`open_tour`] once the canvas exists, forwards touch and
//! resize events, and polls [`view_state`] to render its own chrome.

use console_error_panic_hook::set_once;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use gpu::SurfaceSize;
use runtime::FrameHandle;
use tour::{Platform, TourConfig, TourError, TourSession, ViewSurface};

mod frames;
mod logging;
mod net;
mod wgpu;

use frames::RafScheduler;
use net::{GlooFetcher, GlooSceneSource};
use wgpu::{WgpuBackend, init_wgpu_from_canvas_id};

pub struct WebPlatform;

impl Platform for WebPlatform {
    type Backend = WgpuBackend;
    type Scheduler = RafScheduler;
    type Fetcher = GlooFetcher;
    type Source = GlooSceneSource;
}

type WebSession = TourSession<WebPlatform>;

thread_local! {
    static SESSION: RefCell<Option<WebSession>> = const { RefCell::new(None) };
    // Bumped by every mount and unmount; a surface that finishes
    // initialising after a newer call is dropped.
    static MOUNT_GENERATION: Cell<u64> = const { Cell::new(0) };
}

fn session() -> Option<WebSession> {
    SESSION.with(|s| s.borrow().clone())
}

fn bump_generation() -> u64 {
    MOUNT_GENERATION.with(|g| {
        g.set(g.get() + 1);
        g.get()
    })
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[wasm_bindgen(start)]
pub fn start() {
    set_once();
    logging::init("info");
}

/// Creates the session for `house_id` (demo mode when absent), mounts the
/// view on `canvas_id` and starts loading.
#[wasm_bindgen]
pub fn open_tour(
    canvas_id: String,
    house_id: Option<String>,
    config_json: Option<String>,
    width: u32,
    height: u32,
    pixel_ratio: f64,
) -> Result<(), JsValue> {
    let mut config = TourConfig::from_json_str(config_json.as_deref().unwrap_or_default()).map_err(to_js)?;
    config.rng_seed.get_or_insert_with(random_seed);

    if let Some(old) = session() {
        old.on_view_unmount();
    }

    let source = GlooSceneSource::new(
        config.api_base_url.clone(),
        config.scenes_path.clone(),
        config.house_path.clone(),
    );
    let session = WebSession::new(config, house_id, GlooFetcher, source);
    SESSION.with(|s| *s.borrow_mut() = Some(session.clone()));

    let generation = bump_generation();
    spawn_local(async move {
        if !mount(generation, &canvas_id, SurfaceSize::new(width, height, pixel_ratio)).await {
            return;
        }
        session.open().await;
    });
    Ok(())
}

/// Re-creates the view after [`on_view_unmount`], keeping the catalog and
/// reloading the current scene.
#[wasm_bindgen]
pub fn mount_view(canvas_id: String, width: u32, height: u32, pixel_ratio: f64) {
    let generation = bump_generation();
    spawn_local(async move {
        mount(generation, &canvas_id, SurfaceSize::new(width, height, pixel_ratio)).await;
    });
}

async fn mount(generation: u64, canvas_id: &str, size: SurfaceSize) -> bool {
    let surface = init_wgpu_from_canvas_id(canvas_id, size)
        .await
        .map(|backend| ViewSurface {
            backend,
            scheduler: RafScheduler::new(Rc::new(|handle: FrameHandle| {
                if let Some(session) = session() {
                    session.on_frame(handle);
                }
            })),
            size,
        })
        .map_err(TourError::from);

    if MOUNT_GENERATION.with(Cell::get) != generation {
        tracing::debug!(canvas_id, "mount superseded before the surface was ready");
        return false;
    }
    let Some(session) = session() else {
        return false;
    };
    let mounted = surface.is_ok();
    if let Some(pending) = session.on_view_mount(surface) {
        spawn_local(async move {
            pending.resolve().await;
        });
    }
    mounted
}

#[wasm_bindgen]
pub fn on_view_unmount() {
    bump_generation();
    if let Some(session) = session() {
        session.on_view_unmount();
    }
}

#[wasm_bindgen]
pub fn on_scene_tap(index: usize) {
    let Some(pending) = session().and_then(|s| s.on_scene_tap(index)) else {
        return;
    };
    spawn_local(async move {
        pending.resolve().await;
    });
}

#[wasm_bindgen]
pub fn on_touch_start(x: f64, y: f64) {
    if let Some(session) = session() {
        session.on_touch_start(x, y);
    }
}

#[wasm_bindgen]
pub fn on_touch_move(x: f64, y: f64) {
    if let Some(session) = session() {
        session.on_touch_move(x, y);
    }
}

#[wasm_bindgen]
pub fn on_touch_end() {
    if let Some(session) = session() {
        session.on_touch_end();
    }
}

#[wasm_bindgen]
pub fn on_resize(width: u32, height: u32, pixel_ratio: f64) {
    if let Some(session) = session() {
        session.on_resize(width, height, pixel_ratio);
    }
}

#[wasm_bindgen]
pub fn on_retry() {
    let Some(session) = session() else {
        return;
    };
    spawn_local(async move {
        session.on_retry().await;
    });
}

/// JSON snapshot of the UI state, or `null` before [`open_tour`].
#[wasm_bindgen]
pub fn view_state() -> Result<String, JsValue> {
    match session() {
        Some(session) => serde_json::to_string(&session.view()).map_err(to_js),
        None => Ok("null".to_string()),
    }
}
