//! Viewport geometry in CSS pixels

/// Pointer coordinates relative to the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner applied as `left`/`top`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Edges count as inside
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right() && point.y >= self.top && point.y <= self.bottom()
    }
}

/// Keep a box of `extent` starting at `coord` inside `[0, viewport]` on one axis.
///
/// Identity while `0 <= coord <= viewport - extent`; a box larger than the
/// viewport is pinned to `0`.
pub fn clamp_axis(coord: f64, viewport: f64, extent: f64) -> f64 {
    coord.min(viewport - extent).max(0.0)
}

/// Place a menu of `menu` size at `at`, clamped independently per axis.
pub fn place_within(at: Point, menu: Size, viewport: Size) -> Position {
    Position {
        left: clamp_axis(at.x, viewport.width, menu.width),
        top: clamp_axis(at.y, viewport.height, menu.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_examples() {
        let viewport = Size::new(1024.0, 768.0);
        let menu = Size::new(160.0, 120.0);

        assert_eq!(place_within(Point::new(10.0, 20.0), menu, viewport), Position { left: 10.0, top: 20.0 });
        assert_eq!(place_within(Point::new(1000.0, 700.0), menu, viewport), Position { left: 864.0, top: 648.0 });
        assert_eq!(place_within(Point::new(864.0, 648.0), menu, viewport), Position { left: 864.0, top: 648.0 });
    }

    #[test]
    fn test_oversized_menu_pins_to_origin() {
        let pos = place_within(Point::new(50.0, 50.0), Size::new(400.0, 10.0), Size::new(300.0, 300.0));
        assert_eq!(pos.left, 0.0);
        assert_eq!(pos.top, 50.0);
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(110.0, 60.0)));
        assert!(!rect.contains(Point::new(110.1, 30.0)));
        assert!(!rect.contains(Point::new(50.0, 9.9)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            .. ProptestConfig::default()
        })]

        #[test]
        fn prop_menu_stays_inside_viewport(
            x in -500.0f64..3000.0,
            y in -500.0f64..3000.0,
            w in 0.0f64..800.0,
            h in 0.0f64..800.0,
            extra_w in 0.0f64..2000.0,
            extra_h in 0.0f64..2000.0,
        ) {
            let viewport = Size::new(w + extra_w, h + extra_h);
            let pos = place_within(Point::new(x, y), Size::new(w, h), viewport);

            prop_assert!(pos.left >= 0.0 && pos.left <= viewport.width - w);
            prop_assert!(pos.top >= 0.0 && pos.top <= viewport.height - h);
        }

        #[test]
        fn prop_identity_below_boundary(
            w in 0.0f64..800.0,
            viewport_w in 800.0f64..3000.0,
            frac in 0.0f64..=1.0,
        ) {
            let x = (viewport_w - w) * frac;
            prop_assert_eq!(clamp_axis(x, viewport_w, w), x);
        }
    }
}
