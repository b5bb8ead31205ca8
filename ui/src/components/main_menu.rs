use anyhow::Result;
use widgetry::tools::{ColorLegend, PopupMsg};
use widgetry::{EventCtx, HorizontalAlignment, Line, Panel, VerticalAlignment, Widget};

use crate::components::FileLoader;
use crate::scatter;
use crate::{App, Transition};

pub struct MainMenu;

impl MainMenu {
    pub fn panel(ctx: &mut EventCtx) -> Panel {
        Panel::new_builder(Widget::col(vec![
            Line("Bike Traffic").small_heading().into_widget(ctx),
            Line("Bluebikes stations, sized by trips")
                .secondary()
                .into_widget(ctx),
            ColorLegend::gradient(
                ctx,
                &scatter::ratio_color_scale(),
                vec![
                    "More arrivals".to_string(),
                    "Balanced".to_string(),
                    "More departures".to_string(),
                ],
            ),
            ctx.style().btn_outline.text("Load trips").build_def(ctx),
        ]))
        .aligned(HorizontalAlignment::Left, VerticalAlignment::Top)
        .build(ctx)
    }

    pub fn on_click(ctx: &mut EventCtx, x: &str) -> Option<Transition> {
        match x {
            "Load trips" => Some(load_trips(ctx)),
            _ => None,
        }
    }
}

fn load_trips(ctx: &mut EventCtx) -> Transition {
    Transition::Push(FileLoader::new_state(
        ctx,
        "CSV",
        &["csv"],
        Box::new(|ctx, app: &mut App, maybe_bytes: Result<Option<Vec<u8>>>| {
            match maybe_bytes {
                Ok(Some(bytes)) => {
                    match ctx.loading_screen("load trips", |_, timer| {
                        app.model.replace_trips(&bytes, timer)
                    }) {
                        Ok(()) => {
                            app.controller.recalculate(&app.model);
                            Transition::Multi(vec![Transition::Pop, Transition::Recreate])
                        }
                        Err(err) => Transition::Replace(PopupMsg::new_state(
                            ctx,
                            "Error",
                            vec![err.to_string()],
                        )),
                    }
                }
                // User didn't pick a file
                Ok(None) => Transition::Pop,
                Err(err) => {
                    Transition::Replace(PopupMsg::new_state(ctx, "Error", vec![err.to_string()]))
                }
            }
        }),
    ))
}
