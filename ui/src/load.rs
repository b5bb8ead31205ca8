use anyhow::Result;
use widgetry::tools::FutureLoader;
use widgetry::{EventCtx, State};

use model::{Model, RawInputs};

use crate::{App, Transition};

/// Each is a URL or a local path
pub struct Sources {
    pub stations: String,
    pub trips: String,
    /// (name, source)
    pub lanes: Vec<(String, String)>,
}

pub struct Loader;

impl Loader {
    /// Fetches everything, then builds the model and starts the viewer. Sources that fail are
    /// logged and left empty.
    pub fn new_state(ctx: &mut EventCtx, sources: Sources) -> Box<dyn State<App>> {
        let (_, outer_progress_rx) = futures_channel::mpsc::channel(1);
        let (_, inner_progress_rx) = futures_channel::mpsc::channel(1);
        FutureLoader::<App, RawInputs>::new_state(
            ctx,
            Box::pin(async move {
                let stations = fetch(&sources.stations).await;
                let trips = fetch(&sources.trips).await;
                let mut lanes = Vec::new();
                for (name, source) in sources.lanes {
                    let bytes = fetch(&source).await;
                    lanes.push((name, bytes));
                }
                let inputs = RawInputs {
                    stations,
                    trips,
                    lanes,
                };
                let wrap: Box<dyn Send + FnOnce(&App) -> RawInputs> =
                    Box::new(move |_: &App| inputs);
                Ok(wrap)
            }),
            outer_progress_rx,
            inner_progress_rx,
            "Loading stations, trips, and bike lanes",
            Box::new(|ctx, app: &mut App, result: Result<RawInputs>| {
                let inputs = match result {
                    Ok(inputs) => inputs,
                    Err(err) => {
                        error!("Loading failed: {err}");
                        RawInputs {
                            stations: Err(anyhow!("not loaded")),
                            trips: Err(anyhow!("not loaded")),
                            lanes: Vec::new(),
                        }
                    }
                };
                let model =
                    ctx.loading_screen("build model", |_, timer| Model::load(inputs, timer));
                *app = App::new(ctx, model, app.controller.filter());
                app.restore_savestate(ctx);
                Transition::Replace(crate::viewer::Viewer::new_state(ctx, app))
            }),
        )
    }
}

async fn fetch(source: &str) -> Result<Vec<u8>> {
    info!("Fetching {source}");
    if source.starts_with("http://") || source.starts_with("https://") {
        return abstio::http_get(source).await;
    }
    // Only works on native
    Ok(fs_err::read(source)?)
}
