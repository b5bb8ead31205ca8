use abstutil::prettyprint_usize;
use geom::Distance;
use widgetry::{Color, Drawable, EventCtx, GeomBatch, GfxCtx, Line, Outcome, Panel, State, Text};

use model::viewport::Camera;
use model::{Event, Update};

use crate::components::{MainMenu, TimeSlider};
use crate::scatter::{self, Scatter};
use crate::{App, Transition};

pub struct Viewer {
    panel: Panel,
    time_slider: TimeSlider,
    lanes: Drawable,
    scatter: Scatter,
    // Compared after every event to notice pans, zooms, and resizes
    camera: Camera,
}

impl Viewer {
    pub fn new_state(ctx: &mut EventCtx, app: &App) -> Box<dyn State<App>> {
        let mut state = Self {
            panel: MainMenu::panel(ctx),
            time_slider: TimeSlider::new(ctx, app.controller.filter()),
            lanes: draw_lanes(ctx, app),
            scatter: Scatter::new(ctx),
            camera: scatter::camera(&ctx.canvas),
        };
        // The controller already has traffic for the current filter
        state.restyle(ctx, app);
        Box::new(state)
    }

    /// Everything the controller decides flows through here
    fn dispatch(&mut self, ctx: &mut EventCtx, app: &mut App, event: Event) {
        match app.controller.handle(&app.model, event) {
            Update::Restyle => self.restyle(ctx, app),
            Update::RepositionOnly => {
                self.scatter.reposition(ctx, &app.model, self.camera);
            }
        }
    }

    fn restyle(&mut self, ctx: &mut EventCtx, app: &App) {
        self.scatter.restyle(&app.model, app.controller.traffic());
        self.scatter.reposition(ctx, &app.model, self.camera);

        let stats = Text::from_multiline(vec![
            Line(format!(
                "Stations: {}",
                prettyprint_usize(app.model.stations.len())
            )),
            Line(format!(
                "Trips: {} / {}",
                prettyprint_usize(app.controller.num_filtered_trips()),
                prettyprint_usize(app.model.trips.len())
            )),
        ])
        .into_widget(ctx);
        self.time_slider.panel.replace(ctx, "stats", stats);
    }
}

impl State<App> for Viewer {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        ctx.canvas_movement();
        app.sync_mapbox(ctx);

        let camera = scatter::camera(&ctx.canvas);
        if camera != self.camera {
            self.camera = camera;
            self.dispatch(ctx, app, Event::ViewportChanged);
        }

        if let Some(filter) = self.time_slider.event(ctx) {
            self.dispatch(ctx, app, Event::FilterChanged(filter));
        }

        self.scatter.update_hover(ctx);

        if let Outcome::Clicked(x) = self.panel.event(ctx) {
            if let Some(t) = MainMenu::on_click(ctx, x.as_ref()) {
                return t;
            }
            unreachable!()
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        g.redraw(&self.lanes);
        self.scatter.draw(g);
        self.panel.draw(g);
        self.time_slider.draw(g);
    }

    fn recreate(&mut self, ctx: &mut EventCtx, app: &mut App) -> Box<dyn State<App>> {
        Self::new_state(ctx, app)
    }
}

// Lanes never change, so draw them once in map-space
fn draw_lanes(ctx: &mut EventCtx, app: &App) -> Drawable {
    let mut batch = GeomBatch::new();
    let color = Color::BLUE.alpha(0.4);
    for layer in &app.model.lanes {
        for pl in &layer.polylines {
            batch.push(color, pl.make_polygons(Distance::meters(5.0)));
        }
    }
    ctx.upload(batch)
}
