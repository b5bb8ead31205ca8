use widgetry::{
    EventCtx, GfxCtx, HorizontalAlignment, Key, Line, Outcome, Panel, Slider, Text, TextExt,
    VerticalAlignment, Widget,
};

use model::{TimeFilter, MINUTES_PER_DAY};

/// Arrow keys move the slider by this much
const STEP_MINUTES: i32 = 10;

pub struct TimeSlider {
    pub panel: Panel,
    filter: TimeFilter,
}

impl TimeSlider {
    pub fn new(ctx: &mut EventCtx, filter: TimeFilter) -> Self {
        let mut slider = Self {
            panel: Panel::new_builder(Widget::col(vec![
                Widget::row(vec![
                    "Filter by time:".text_widget(ctx),
                    Widget::placeholder(ctx, "clock"),
                ]),
                Slider::area(
                    ctx,
                    0.25 * ctx.canvas.window_width,
                    to_percent(filter),
                    "time slider",
                ),
                Widget::placeholder(ctx, "stats"),
            ]))
            .aligned(HorizontalAlignment::Left, VerticalAlignment::Bottom)
            .build(ctx),
            filter,
        };
        slider.on_filter_change(ctx);
        slider
    }

    fn on_filter_change(&mut self, ctx: &mut EventCtx) {
        let clock = match self.filter.label() {
            Some(time) => Text::from(Line(time).big_monospaced()),
            None => Text::from(Line("(any time)").secondary()),
        }
        .into_widget(ctx);
        self.panel.replace(ctx, "clock", clock);
    }

    /// Returns a filter if the user changed it
    pub fn event(&mut self, ctx: &mut EventCtx) -> Option<TimeFilter> {
        let mut value = None;
        if let Outcome::Changed(x) = self.panel.event(ctx) {
            if x == "time slider" {
                value = Some(from_percent(self.panel.slider("time slider").get_percent()));
            }
        }

        // Nudging from "any time" starts at midnight
        if ctx.input.pressed(Key::LeftArrow) {
            value = Some((self.filter.slider_value() - STEP_MINUTES).max(-1));
        }
        if ctx.input.pressed(Key::RightArrow) {
            value = Some(match self.filter {
                TimeFilter::Any => 0,
                TimeFilter::Around(_) => self.filter.slider_value() + STEP_MINUTES,
            });
        }

        let filter = TimeFilter::from_slider_value(value?);
        if filter == self.filter {
            return None;
        }
        self.filter = filter;
        self.on_filter_change(ctx);
        self.panel
            .slider_mut("time slider")
            .set_percent(ctx, to_percent(filter));
        Some(filter)
    }

    pub fn draw(&self, g: &mut GfxCtx) {
        self.panel.draw(g);
    }
}

// The slider covers [-1, 1440), with the leftmost position meaning no filter
fn to_percent(filter: TimeFilter) -> f64 {
    (filter.slider_value() + 1) as f64 / MINUTES_PER_DAY as f64
}

fn from_percent(pct: f64) -> i32 {
    (pct * MINUTES_PER_DAY as f64).round() as i32 - 1
}
