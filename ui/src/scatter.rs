use geom::{Circle, Distance, Pt2D};
use widgetry::tools::ColorScale;
use widgetry::{Canvas, Color, Drawable, EventCtx, GeomBatch, GfxCtx, Text};

use model::viewport::{Camera, ScreenPos, OFF_CANVAS};
use model::{Model, Traffic};

use crate::components::describe;

/// One circle per station, drawn in screen-space so the size doesn't change with zoom
pub struct Scatter {
    markers: Vec<Marker>,
    draw: Drawable,
    hovering: Option<usize>,
}

struct Marker {
    station: usize,
    radius: f64,
    color: Color,
    tooltip: Text,
    center: ScreenPos,
}

/// From arrivals at 0 to departures at 1
pub fn ratio_color_scale() -> ColorScale {
    // darkorange, steelblue
    ColorScale(vec![Color::hex("#FF8C00"), Color::hex("#4682B4")])
}

pub fn camera(canvas: &Canvas) -> Camera {
    Camera {
        cam_x: canvas.cam_x,
        cam_y: canvas.cam_y,
        cam_zoom: canvas.cam_zoom,
        window_width: canvas.window_width,
        window_height: canvas.window_height,
    }
}

impl Scatter {
    pub fn new(ctx: &mut EventCtx) -> Self {
        Self {
            markers: Vec::new(),
            draw: Drawable::empty(ctx),
            hovering: None,
        }
    }

    /// Radius, color, and tooltip, from fresh traffic counts. Call `reposition` afterwards.
    pub fn restyle(&mut self, model: &Model, traffic: &[Traffic]) {
        let scale = ratio_color_scale();
        self.markers = model
            .stations
            .iter()
            .zip(traffic.iter())
            .enumerate()
            .map(|(idx, (station, traffic))| Marker {
                station: idx,
                radius: model.radius_scale.eval(traffic.total()),
                color: scale.eval(traffic.departure_ratio()).alpha(0.6),
                tooltip: describe::station(station, *traffic),
                center: OFF_CANVAS,
            })
            .collect();
        // Big circles first, so small ones stay on top and hoverable
        self.markers.sort_by(|a, b| b.radius.total_cmp(&a.radius));
        self.hovering = None;
    }

    /// Only projects positions; counts aren't touched.
    pub fn reposition(&mut self, ctx: &mut EventCtx, model: &Model, camera: Camera) {
        let mut batch = GeomBatch::new();
        for marker in &mut self.markers {
            marker.center = camera.project(model.stations[marker.station].pos);
            if marker.radius <= 0.0 || !camera.is_visible(marker.center, marker.radius) {
                continue;
            }

            let circle = Circle::new(
                Pt2D::new(marker.center.x, marker.center.y),
                Distance::meters(marker.radius),
            );
            batch.push(marker.color, circle.to_polygon());
            if let Ok(outline) = circle.to_outline(Distance::meters(0.5)) {
                batch.push(Color::WHITE, outline);
            }
        }
        self.draw = ctx.upload(batch);
        self.hovering = None;
    }

    pub fn update_hover(&mut self, ctx: &EventCtx) {
        self.hovering = None;
        let cursor = match ctx.canvas.get_cursor_in_screen_space() {
            Some(pt) => ScreenPos { x: pt.x, y: pt.y },
            None => return,
        };
        // Markers are sorted biggest first; the last hit is on top
        for (idx, marker) in self.markers.iter().enumerate() {
            if marker.radius > 0.0 && marker.center.dist_to(cursor) <= marker.radius {
                self.hovering = Some(idx);
            }
        }
    }

    pub fn draw(&self, g: &mut GfxCtx) {
        g.fork_screenspace();
        g.redraw(&self.draw);
        g.unfork();

        if let Some(idx) = self.hovering {
            g.draw_mouse_tooltip(self.markers[idx].tooltip.clone());
        }
    }
}
