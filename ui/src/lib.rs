#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod components;
mod load;
mod scatter;
mod viewer;

use abstutil::Timer;
use geom::Bounds;
use serde::{Deserialize, Serialize};
use structopt::StructOpt;
use widgetry::{Canvas, Color, EventCtx, GfxCtx, Settings, SharedAppState};

use model::{default_center, Controller, Model, TimeFilter};

use self::load::Sources;

const BOSTON_LANES_URL: &str = "https://bostonopendata-boston.opendata.arcgis.com/datasets/boston::existing-bike-network-2022.geojson";
const CAMBRIDGE_LANES_URL: &str = "https://raw.githubusercontent.com/cambridgegis/cambridgegis_data/main/Recreation/Bike_Facilities/RECREATION_BikeFacilities.geojson";

/// Matches the basemap's zoom level at startup
const START_ZOOM: f64 = 12.0;

#[derive(StructOpt)]
struct Args {
    /// A URL or path to the station roster JSON
    #[structopt(
        long,
        default_value = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json"
    )]
    stations: String,
    /// A URL or path to the trip log CSV
    #[structopt(
        long,
        default_value = "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv"
    )]
    trips: String,
    /// A URL or path to bike lane GeoJSON. Repeat for more layers. Boston and Cambridge by
    /// default.
    #[structopt(long)]
    lanes: Vec<String>,
}

impl Args {
    fn into_sources(self) -> Sources {
        let lanes = if self.lanes.is_empty() {
            vec![
                ("Boston".to_string(), BOSTON_LANES_URL.to_string()),
                ("Cambridge".to_string(), CAMBRIDGE_LANES_URL.to_string()),
            ]
        } else {
            self.lanes
                .into_iter()
                .map(|src| (abstutil::basename(&src), src))
                .collect()
        };
        Sources {
            stations: self.stations,
            trips: self.trips,
            lanes,
        }
    }
}

fn run(settings: Settings) {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());

    widgetry::run(settings, move |ctx| {
        let app = App::new(ctx, Model::empty(), TimeFilter::Any);
        let states = vec![load::Loader::new_state(ctx, args.into_sources())];
        (app, states)
    });
}

pub fn main() {
    let settings = Settings::new("Bike Traffic");
    run(settings);
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_wasm() {
    run(Settings::new("Bike Traffic").root_dom_element_id("loading".to_string()));
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = window)]
    fn sync_mapbox_canvas(lon1: f64, lat1: f64, lon2: f64, lat2: f64);
}

pub struct App {
    model: Model,
    // The filter and the traffic it produces
    controller: Controller,

    // Avoid syncing when bounds match
    #[allow(unused)]
    mapbox_bounds: Bounds,
}

impl SharedAppState for App {
    fn draw_default(&self, g: &mut GfxCtx) {
        // On the web, the basemap shows through
        if cfg!(not(target_arch = "wasm32")) {
            g.clear(Color::BLACK);
        }
    }

    fn before_quit(&self, canvas: &Canvas) {
        let ss = Savestate {
            cam_x: canvas.cam_x,
            cam_y: canvas.cam_y,
            cam_zoom: canvas.cam_zoom,
            filter: self.controller.filter(),
        };
        abstio::write_json("data/save.json".to_string(), &ss);
    }
}

pub type Transition = widgetry::Transition<App>;

impl App {
    pub fn new(ctx: &mut EventCtx, model: Model, filter: TimeFilter) -> Self {
        let bounds = &model.bounds;
        ctx.canvas.map_dims = (bounds.max_x, bounds.max_y);
        let center = default_center();
        ctx.canvas.cam_zoom = cam_zoom(START_ZOOM, center.y());
        ctx.canvas.center_on_map_pt(center.to_pt(&model.gps_bounds));

        Self {
            controller: Controller::new(&model, filter),
            model,

            mapbox_bounds: Bounds::new(),
        }
    }

    // This only makes sense on native, with the same data used across different runs.
    // before_quit is never called on web.
    pub fn restore_savestate(&mut self, ctx: &mut EventCtx) {
        if let Ok(savestate) = abstio::maybe_read_json::<Savestate>(
            "data/save.json".to_string(),
            &mut Timer::throwaway(),
        ) {
            ctx.canvas.cam_x = savestate.cam_x;
            ctx.canvas.cam_y = savestate.cam_y;
            ctx.canvas.cam_zoom = savestate.cam_zoom;
            self.controller = Controller::new(&self.model, savestate.filter.clamped());
        }
    }

    #[allow(unused)]
    pub fn sync_mapbox(&mut self, ctx: &mut EventCtx) {
        #[cfg(target_arch = "wasm32")]
        {
            // This method is usually called for every single event, but the camera hasn't always
            // moved
            let bounds = ctx.canvas.get_screen_bounds();
            if self.mapbox_bounds == bounds {
                return;
            }
            self.mapbox_bounds = bounds;

            let pt1 = geom::Pt2D::new(bounds.min_x, bounds.min_y).to_gps(&self.model.gps_bounds);
            let pt2 = geom::Pt2D::new(bounds.max_x, bounds.max_y).to_gps(&self.model.gps_bounds);
            sync_mapbox_canvas(pt1.x(), pt1.y(), pt2.x(), pt2.y());
        }
    }
}

/// Converts a web map zoom level to pixels per meter at some latitude
fn cam_zoom(web_zoom: f64, lat: f64) -> f64 {
    let meters_per_pixel = 156_543.03 * lat.to_radians().cos() / 2.0_f64.powf(web_zoom);
    1.0 / meters_per_pixel
}

#[derive(Serialize, Deserialize)]
pub struct Savestate {
    cam_x: f64,
    cam_y: f64,
    cam_zoom: f64,
    filter: TimeFilter,
}
