//! Coordinate mapping between the background image and the drawing surface.
//! Nothing here is cached: every caller recomputes from the live viewport so a
//! resize is visible on the very next pointer event or frame.

use super::hotspots::Hotspot;

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive on both edges of both axes.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Surface size, background native size and the display scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub surface_width: f64,
    pub surface_height: f64,
    pub image_width: f64,
    pub image_height: f64,
    pub scale: f64,
}

impl Viewport {
    pub fn new(surface_width: f64, surface_height: f64, image_width: f64, image_height: f64, scale: f64) -> Self {
        Self { surface_width, surface_height, image_width, image_height, scale }
    }

    pub fn resize(&mut self, surface_width: f64, surface_height: f64) {
        self.surface_width = surface_width;
        self.surface_height = surface_height;
    }

    /// Displayed background size (`native * scale`).
    pub fn background_size(&self) -> (f64, f64) {
        (self.image_width * self.scale, self.image_height * self.scale)
    }

    /// Top-left of the centered background. Negative when the background
    /// overflows the surface.
    pub fn origin(&self) -> (f64, f64) {
        let (bw, bh) = self.background_size();
        ((self.surface_width - bw) / 2.0, (self.surface_height - bh) / 2.0)
    }

    pub fn background_rect(&self) -> Rect {
        let (ox, oy) = self.origin();
        let (bw, bh) = self.background_size();
        Rect::new(ox, oy, bw, bh)
    }

    /// Absolute rectangle of a hotspot defined in background fractions.
    pub fn hotspot_rect(&self, hotspot: &Hotspot) -> Rect {
        let bg = self.background_rect();
        Rect::new(
            bg.x + hotspot.rel_x * bg.width,
            bg.y + hotspot.rel_y * bg.height,
            hotspot.rel_width * bg.width,
            hotspot.rel_height * bg.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_background_is_centered() {
        let vp = Viewport::new(1000.0, 800.0, 100.0, 80.0, 3.0);
        assert_eq!(vp.background_size(), (300.0, 240.0));
        assert_eq!(vp.origin(), (350.0, 280.0));
    }

    #[test]
    fn test_hotspot_rect_mapping() {
        let vp = Viewport::new(1000.0, 800.0, 100.0, 80.0, 3.0);
        let h = Hotspot::new("desk", 0.5, 0.5, 0.1, 0.1, "desk");
        let r = vp.hotspot_rect(&h);
        assert!(close(r.x, 500.0));
        assert!(close(r.y, 400.0));
        assert!(close(r.width, 30.0));
        assert!(close(r.height, 24.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(15.0, 15.0));
        assert!(!r.contains(15.01, 12.0));
        assert!(!r.contains(9.99, 12.0));
    }

    #[test]
    fn test_oversized_background_has_negative_origin() {
        let vp = Viewport::new(200.0, 100.0, 100.0, 80.0, 3.0);
        let (ox, oy) = vp.origin();
        assert!(ox < 0.0 && oy < 0.0);
    }
}
