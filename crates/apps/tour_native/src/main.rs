use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use catalog::HttpSceneSource;
use clap::Parser;
use gpu::{HeadlessBackend, SurfaceSize};
use runtime::ManualScheduler;
use streaming::HttpFetcher;
use tour::{LoadApplied, Platform, TourConfig, TourSession, ViewSurface};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the panoramic house tour")]
struct Args {
    /// House to open; demo mode when omitted
    house_id: Option<String>,

    /// JSON tour config; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the backend base URL (after TOUR_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f64,

    /// Frames to draw after each scene is applied
    #[arg(long, default_value_t = 3)]
    frames: u32,

    /// Scene indices to switch to after the initial scene, in order
    #[arg(long = "visit")]
    visit: Vec<usize>,

    /// Horizontal drag in pixels applied before the final frames
    #[arg(long, default_value_t = 0.0)]
    drag_x: f64,
}

struct NativePlatform;

impl Platform for NativePlatform {
    type Backend = HeadlessBackend;
    type Scheduler = ManualScheduler;
    type Fetcher = HttpFetcher;
    type Source = HttpSceneSource;
}

type NativeSession = TourSession<NativePlatform>;

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn pump_frames(session: &NativeSession, frames: u32) {
    for _ in 0..frames {
        let handles = session
            .with_scheduler(ManualScheduler::take_pending)
            .unwrap_or_default();
        for handle in handles {
            session.on_frame(handle);
        }
    }
}

/// Mounts a headless view and resolves the reload a remount starts, if any.
async fn mount_headless<P>(session: &TourSession<P>, size: SurfaceSize) -> Option<LoadApplied>
where
    P: Platform<Backend = HeadlessBackend, Scheduler = ManualScheduler>,
{
    let reload = session.on_view_mount(Ok(ViewSurface {
        backend: HeadlessBackend::new(size),
        scheduler: ManualScheduler::new(),
        size,
    }))?;
    let applied = reload.resolve().await;
    info!(?applied, "scene reloaded on mount");
    Some(applied)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let raw = match &args.config {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };
    let mut config = TourConfig::from_json_str(&raw)?.with_env_overrides(|key| env::var(key).ok());
    if let Some(api_base) = args.api_base {
        config.api_base_url = api_base;
    }
    config.rng_seed.get_or_insert_with(clock_seed);
    config.validate()?;

    let source = HttpSceneSource::new(
        config.api_base_url.clone(),
        config.scenes_path.clone(),
        config.house_path.clone(),
    );
    let session = NativeSession::new(config, args.house_id, HttpFetcher::new(), source);

    let size = SurfaceSize::new(args.width, args.height, args.pixel_ratio);
    mount_headless(&session, size).await;

    let applied = session.open().await;
    info!(?applied, "initial scene");
    pump_frames(&session, args.frames);

    for index in args.visit {
        match session.on_scene_tap(index) {
            Some(pending) => {
                let applied = pending.resolve().await;
                info!(index, ?applied, "visited scene");
            }
            None => info!(index, "scene not switched"),
        }
        pump_frames(&session, args.frames);
    }

    if args.drag_x != 0.0 {
        session.on_touch_start(0.0, 0.0);
        session.on_touch_move(args.drag_x, 0.0);
        session.on_touch_end();
        pump_frames(&session, 1);
    }

    let drawn = session
        .with_scene_manager(|m| m.backend().frames_rendered())
        .unwrap_or_default();
    session.on_view_unmount();
    info!(frames = drawn, "tour finished");

    println!("{}", serde_json::to_string_pretty(&session.view())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::mount_headless;
    use catalog::{CatalogError, HouseInfoResponse, SceneListResponse, SceneSource};
    use gpu::{HeadlessBackend, SurfaceSize};
    use runtime::ManualScheduler;
    use streaming::{Fetch, FetchError};
    use tour::{LoadApplied, Platform, TourConfig, TourSession};

    struct Offline;

    impl Fetch for Offline {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Transport {
                url: url.to_string(),
                message: "offline".into(),
            })
        }
    }

    impl SceneSource for Offline {
        async fn scene_list(&self, _house_id: &str) -> Result<SceneListResponse, CatalogError> {
            Err(CatalogError::Network("offline".into()))
        }

        async fn house_info(&self, _house_id: &str) -> Result<HouseInfoResponse, CatalogError> {
            Err(CatalogError::Network("offline".into()))
        }
    }

    struct OfflinePlatform;

    impl Platform for OfflinePlatform {
        type Backend = HeadlessBackend;
        type Scheduler = ManualScheduler;
        type Fetcher = Offline;
        type Source = Offline;
    }

    #[tokio::test]
    async fn remount_reloads_current_scene() {
        let session = TourSession::<OfflinePlatform>::new(TourConfig::default(), None, Offline, Offline);
        let size = SurfaceSize::new(320, 240, 1.0);

        assert_eq!(mount_headless(&session, size).await, None);
        assert_eq!(session.open().await, Some(LoadApplied::Placeholder));

        session.on_view_unmount();
        assert_eq!(mount_headless(&session, size).await, Some(LoadApplied::Placeholder));
        let view = session.view();
        assert!(!view.loading);
        assert_eq!(view.current_scene_index, 0);
    }
}
