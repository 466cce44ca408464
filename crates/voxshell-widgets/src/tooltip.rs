#![forbid(unsafe_code)]

//! Viewport-aware tooltip placement.
//!
//! [`compute_layout`] positions a tooltip above or below its trigger element,
//! flipping to the other side when the preferred side lacks room, clamping the
//! box inside the viewport, and computing where the pointing arrow goes so it
//! still points at the trigger after clamping.
//!
//! # Placement rules
//!
//! - Preferred side fits: keep it.
//! - Preferred side doesn't fit, opposite side does: flip.
//! - Neither fits: take the side with strictly more room (`Bottom` on ties).
//!
//! # Clamping
//!
//! Every clamp floors at `edge_padding` (`max(edge, min(value, far_edge))`), so
//! a viewport smaller than the tooltip pins it to the top-left padding instead
//! of producing negative or NaN coordinates.
//!
//! # Example
//!
//! ```
//! use voxshell_core::geometry::{Rect, Size};
//! use voxshell_widgets::tooltip::{Placement, Tooltip};
//!
//! let trigger = Rect::new(100.0, 500.0, 40.0, 20.0);
//! let layout = Tooltip::new(trigger, Placement::Top)
//!     .compute(Size::new(200.0, 60.0), Size::new(1000.0, 800.0));
//!
//! assert_eq!(layout.placement, Placement::Top);
//! assert_eq!(layout.top, 430.0);
//! assert_eq!(layout.left, 20.0);
//! assert_eq!(layout.arrow_left, 100.0);
//! ```

use std::fmt;
use std::str::FromStr;

use voxshell_core::geometry::{Rect, Size, clamp_floor_first, finite_or_zero};
use voxshell_core::{debug, trace_span};

/// Default minimum distance between the tooltip and the viewport edge.
pub const DEFAULT_EDGE_PADDING: f64 = 10.0;

/// Default gap between trigger and tooltip along the placement axis.
pub const DEFAULT_OFFSET: f64 = 10.0;

/// Default minimum distance from the arrow to either tooltip side.
pub const DEFAULT_ARROW_PADDING: f64 = 14.0;

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Which side of the trigger the tooltip renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Placement {
    /// Above the trigger.
    #[default]
    Top,
    /// Below the trigger.
    Bottom,
}

impl Placement {
    /// Return the opposite placement for flip logic.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Identifier string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized placement string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlacementError(pub String);

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tooltip placement '{}'", self.0)
    }
}

impl std::error::Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(ParsePlacementError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing configuration
// ---------------------------------------------------------------------------

/// Spacing tunables for tooltip placement.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `VOXSHELL_TOOLTIP_EDGE_PADDING` | f64 | 10 | Minimum distance from viewport edge |
/// | `VOXSHELL_TOOLTIP_OFFSET` | f64 | 10 | Gap between trigger and tooltip |
/// | `VOXSHELL_TOOLTIP_ARROW_PADDING` | f64 | 14 | Minimum arrow distance from tooltip sides |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TooltipSpacing {
    /// Minimum distance from the viewport edge.
    pub edge_padding: f64,
    /// Gap between trigger and tooltip along the placement axis.
    pub offset: f64,
    /// Minimum distance from the arrow to either tooltip side edge.
    pub arrow_padding: f64,
}

impl Default for TooltipSpacing {
    fn default() -> Self {
        Self {
            edge_padding: DEFAULT_EDGE_PADDING,
            offset: DEFAULT_OFFSET,
            arrow_padding: DEFAULT_ARROW_PADDING,
        }
    }
}

impl TooltipSpacing {
    /// Set the edge padding.
    #[must_use]
    pub fn with_edge_padding(mut self, edge_padding: f64) -> Self {
        self.edge_padding = edge_padding;
        self
    }

    /// Set the trigger gap.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the arrow padding.
    #[must_use]
    pub fn with_arrow_padding(mut self, arrow_padding: f64) -> Self {
        self.arrow_padding = arrow_padding;
        self
    }

    /// Load spacing from environment variables.
    ///
    /// Unparseable values are ignored; the result is [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        let mut spacing = Self::default();

        if let Some(v) = env_f64("VOXSHELL_TOOLTIP_EDGE_PADDING") {
            spacing.edge_padding = v;
        }
        if let Some(v) = env_f64("VOXSHELL_TOOLTIP_OFFSET") {
            spacing.offset = v;
        }
        if let Some(v) = env_f64("VOXSHELL_TOOLTIP_ARROW_PADDING") {
            spacing.arrow_padding = v;
        }

        spacing.validated()
    }

    /// Replace negative or non-finite values with their defaults.
    #[must_use]
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        Self {
            edge_padding: valid_or(self.edge_padding, defaults.edge_padding),
            offset: valid_or(self.offset, defaults.offset),
            arrow_padding: valid_or(self.arrow_padding, defaults.arrow_padding),
        }
    }

    /// Check that every value is finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.edge_padding, self.offset, self.arrow_padding]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.trim().parse().ok()
}

fn valid_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        default
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Resolved tooltip position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TooltipLayout {
    /// Top edge of the tooltip in viewport coordinates.
    pub top: f64,
    /// Left edge of the tooltip in viewport coordinates.
    pub left: f64,
    /// Side the tooltip ended up on.
    pub placement: Placement,
    /// Arrow offset from the tooltip's own left edge.
    pub arrow_left: f64,
}

impl TooltipLayout {
    /// The placed tooltip box for a tooltip of `size`.
    #[must_use]
    pub fn rect(&self, size: Size) -> Rect {
        Rect::new(self.left, self.top, size.width, size.height)
    }

    /// Whether the tooltip was moved to the side opposite `preferred`.
    #[must_use]
    pub fn flipped_from(&self, preferred: Placement) -> bool {
        self.placement != preferred
    }
}

/// Compute the tooltip position for a trigger, tooltip size, and viewport.
///
/// Pure and infallible. Non-finite inputs are treated as `0.0`.
#[must_use]
pub fn compute_layout(
    trigger: Rect,
    tooltip: Size,
    preferred: Placement,
    viewport: Size,
    spacing: TooltipSpacing,
) -> TooltipLayout {
    let trigger = trigger.sanitized();
    let tooltip = tooltip.sanitized();
    let viewport = viewport.sanitized();
    let edge = finite_or_zero(spacing.edge_padding);
    let offset = finite_or_zero(spacing.offset);
    let arrow_padding = finite_or_zero(spacing.arrow_padding);

    let placement = resolve_placement(trigger, tooltip, preferred, viewport, edge, offset);

    let anchor_x = trigger.center_x();
    let left = clamp_floor_first(
        anchor_x - tooltip.width / 2.0,
        edge,
        viewport.width - edge - tooltip.width,
    );

    let natural_top = match placement {
        Placement::Top => trigger.top - offset - tooltip.height,
        Placement::Bottom => trigger.bottom() + offset,
    };
    let top = clamp_floor_first(natural_top, edge, viewport.height - edge - tooltip.height);

    let arrow_left = clamp_floor_first(
        anchor_x - left,
        arrow_padding,
        tooltip.width - arrow_padding,
    );

    TooltipLayout {
        top,
        left,
        placement,
        arrow_left,
    }
}

fn resolve_placement(
    trigger: Rect,
    tooltip: Size,
    preferred: Placement,
    viewport: Size,
    edge: f64,
    offset: f64,
) -> Placement {
    let required = tooltip.height + offset;
    let available_above = trigger.top - edge;
    let available_below = viewport.height - trigger.bottom() - edge;
    let fits_above = available_above >= required;
    let fits_below = available_below >= required;

    match preferred {
        Placement::Top if !fits_above && fits_below => Placement::Bottom,
        Placement::Bottom if !fits_below && fits_above => Placement::Top,
        _ if !fits_above && !fits_below => {
            if available_above > available_below {
                Placement::Top
            } else {
                Placement::Bottom
            }
        }
        _ => preferred,
    }
}

// ---------------------------------------------------------------------------
// Tooltip builder
// ---------------------------------------------------------------------------

/// Why the host is recomputing a tooltip position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutTrigger {
    /// The tooltip just opened.
    Open,
    /// The window was resized.
    Resize,
    /// An ancestor scrolled (observed in the capture phase).
    Scroll,
}

impl LayoutTrigger {
    /// Identifier string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resize => "resize",
            Self::Scroll => "scroll",
        }
    }
}

/// A tooltip anchored to a trigger element.
///
/// Holds the trigger rectangle, preferred placement, and spacing; the host
/// calls [`reposition`](Self::reposition) on open, resize, and scroll with
/// freshly measured sizes. Nothing is cached between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tooltip {
    /// The trigger rectangle to position relative to.
    pub trigger: Rect,
    /// Preferred placement.
    pub placement: Placement,
    /// Spacing tunables.
    pub spacing: TooltipSpacing,
}

impl Tooltip {
    /// Create a tooltip anchored to `trigger` with default spacing.
    #[must_use]
    pub fn new(trigger: Rect, placement: Placement) -> Self {
        Self {
            trigger,
            placement,
            spacing: TooltipSpacing::default(),
        }
    }

    /// Replace all spacing values.
    #[must_use]
    pub fn spacing(mut self, spacing: TooltipSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the edge padding.
    #[must_use]
    pub fn edge_padding(mut self, edge_padding: f64) -> Self {
        self.spacing.edge_padding = edge_padding;
        self
    }

    /// Set the gap between trigger and tooltip.
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.spacing.offset = offset;
        self
    }

    /// Set the arrow padding.
    #[must_use]
    pub fn arrow_padding(mut self, arrow_padding: f64) -> Self {
        self.spacing.arrow_padding = arrow_padding;
        self
    }

    /// Update the trigger rectangle after the host re-measures it.
    pub fn set_trigger(&mut self, trigger: Rect) {
        self.trigger = trigger;
    }

    /// Compute the layout for a tooltip of `size` in `viewport`.
    #[must_use]
    pub fn compute(&self, size: Size, viewport: Size) -> TooltipLayout {
        compute_layout(self.trigger, size, self.placement, viewport, self.spacing)
    }

    /// Recompute in response to a host event.
    #[must_use]
    pub fn reposition(&self, reason: LayoutTrigger, size: Size, viewport: Size) -> TooltipLayout {
        let _span = trace_span!("tooltip.layout", reason = reason.as_str()).entered();

        let layout = self.compute(size, viewport);
        if layout.flipped_from(self.placement) {
            debug!(
                message = "tooltip.flip",
                reason = reason.as_str(),
                preferred = self.placement.as_str(),
                resolved = layout.placement.as_str()
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _ = reason;

        layout
    }
}
