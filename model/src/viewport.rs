use geom::Pt2D;

/// Where stations without a usable position get drawn: far away from any window.
pub const OFF_CANVAS: ScreenPos = ScreenPos {
    x: -1_000_000.0,
    y: -1_000_000.0,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    pub fn dist_to(&self, other: ScreenPos) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A snapshot of the map camera. Comparing two snapshots tells if the view moved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub cam_x: f64,
    pub cam_y: f64,
    pub cam_zoom: f64,
    pub window_width: f64,
    pub window_height: f64,
}

impl Camera {
    /// Map-space to pixels. Missing or broken positions go to `OFF_CANVAS`.
    pub fn project(&self, pos: Option<Pt2D>) -> ScreenPos {
        let pt = match pos {
            Some(pt) => pt,
            None => return OFF_CANVAS,
        };
        let x = pt.x() * self.cam_zoom - self.cam_x;
        let y = pt.y() * self.cam_zoom - self.cam_y;
        if x.is_finite() && y.is_finite() {
            ScreenPos { x, y }
        } else {
            OFF_CANVAS
        }
    }

    /// Could a circle of this radius centered here show up in the window?
    pub fn is_visible(&self, center: ScreenPos, radius: f64) -> bool {
        center.x + radius >= 0.0
            && center.y + radius >= 0.0
            && center.x - radius <= self.window_width
            && center.y - radius <= self.window_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            cam_x: 100.0,
            cam_y: 50.0,
            cam_zoom: 2.0,
            window_width: 800.0,
            window_height: 600.0,
        }
    }

    #[test]
    fn projects_with_zoom_and_offset() {
        let pos = camera().project(Some(Pt2D::new(60.0, 40.0)));
        assert_eq!(pos, ScreenPos { x: 20.0, y: 30.0 });
        assert!(camera().is_visible(pos, 5.0));
    }

    #[test]
    fn panning_moves_the_projection() {
        let mut cam = camera();
        let before = cam.project(Some(Pt2D::new(60.0, 40.0)));
        cam.cam_x += 30.0;
        let after = cam.project(Some(Pt2D::new(60.0, 40.0)));
        assert_eq!(after.x, before.x - 30.0);
        assert_eq!(after.y, before.y);
        assert_ne!(cam, camera());
    }

    #[test]
    fn missing_position_is_off_canvas() {
        let pos = camera().project(None);
        assert_eq!(pos, OFF_CANVAS);
        assert!(!camera().is_visible(pos, 25.0));
    }

    #[test]
    fn broken_camera_doesnt_produce_nan() {
        let mut cam = camera();
        cam.cam_zoom = f64::INFINITY;
        assert_eq!(cam.project(Some(Pt2D::new(60.0, 40.0))), OFF_CANVAS);
    }
}
