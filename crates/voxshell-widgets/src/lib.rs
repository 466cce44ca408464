#![forbid(unsafe_code)]

//! Floating-panel widgets for VoxShell.
//!
//! The host measures its elements and hands the rectangles over; the widgets
//! here only decide where floating content goes.

pub mod tooltip;

pub use tooltip::{
    LayoutTrigger, ParsePlacementError, Placement, Tooltip, TooltipLayout, TooltipSpacing,
    compute_layout,
};
