#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are viewport pixels as reported by the host's layout
//! measurement (origin at top-left, `y` grows downward). Values are `f64`
//! because hosts report fractional positions on scaled displays.

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrink by `padding` on every side, never below zero size.
    pub fn inset(&self, padding: f64) -> Rect {
        Rect::new(
            self.left + padding,
            self.top + padding,
            (self.width - 2.0 * padding).max(0.0),
            (self.height - 2.0 * padding).max(0.0),
        )
    }

    /// Replace non-finite components with `0.0`.
    pub fn sanitized(&self) -> Rect {
        Rect::new(
            finite_or_zero(self.left),
            finite_or_zero(self.top),
            finite_or_zero(self.width),
            finite_or_zero(self.height),
        )
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Replace non-finite components with `0.0`.
    pub fn sanitized(&self) -> Size {
        Size::new(finite_or_zero(self.width), finite_or_zero(self.height))
    }
}

/// `value` if finite, otherwise `0.0`.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Clamp `value` into `[min, max]`, letting `min` win when the range is
/// inverted.
///
/// `f64::clamp` panics on `min > max`; layout math routinely produces that
/// case for viewports smaller than the content.
#[inline]
pub fn clamp_floor_first(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::{Rect, Size, clamp_floor_first, finite_or_zero};

    #[test]
    fn rect_edges() {
        let rect = Rect::new(100.0, 500.0, 40.0, 20.0);
        assert_eq!(rect.right(), 140.0);
        assert_eq!(rect.bottom(), 520.0);
        assert_eq!(rect.center_x(), 120.0);
    }

    #[test]
    fn rect_contains_rect_edges_inclusive() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        assert!(!outer.contains_rect(&Rect::new(96.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn rect_inset_saturates() {
        let rect = Rect::new(0.0, 0.0, 15.0, 100.0);
        let inner = rect.inset(10.0);
        assert_eq!(inner, Rect::new(10.0, 10.0, 0.0, 80.0));
    }

    #[test]
    fn sanitized_replaces_nan_and_infinity() {
        let rect = Rect::new(f64::NAN, f64::INFINITY, 3.0, f64::NEG_INFINITY);
        assert_eq!(rect.sanitized(), Rect::new(0.0, 0.0, 3.0, 0.0));
        assert_eq!(Size::new(f64::NAN, 2.0).sanitized(), Size::new(0.0, 2.0));
        assert_eq!(finite_or_zero(-4.5), -4.5);
    }

    #[test]
    fn clamp_floor_first_prefers_min_on_inverted_range() {
        assert_eq!(clamp_floor_first(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_floor_first(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_floor_first(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_floor_first(50.0, 10.0, 2.0), 10.0);
    }
}
