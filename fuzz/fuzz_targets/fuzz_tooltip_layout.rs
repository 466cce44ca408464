#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use voxshell_core::geometry::{Rect, Size};
use voxshell_widgets::tooltip::{Placement, TooltipSpacing, compute_layout};

#[derive(Debug, Arbitrary)]
struct Input {
    trigger: (f64, f64, f64, f64),
    tooltip: (f64, f64),
    viewport: (f64, f64),
    spacing: (f64, f64, f64),
    bottom: bool,
}

fuzz_target!(|input: Input| {
    let trigger = Rect::new(
        input.trigger.0,
        input.trigger.1,
        input.trigger.2,
        input.trigger.3,
    );
    let tooltip = Size::new(input.tooltip.0, input.tooltip.1);
    let viewport = Size::new(input.viewport.0, input.viewport.1);
    let spacing = TooltipSpacing::default()
        .with_edge_padding(input.spacing.0)
        .with_offset(input.spacing.1)
        .with_arrow_padding(input.spacing.2);
    let preferred = if input.bottom {
        Placement::Bottom
    } else {
        Placement::Top
    };

    let out = compute_layout(trigger, tooltip, preferred, viewport, spacing);

    // Finite in, finite out; NaN and infinity are sanitized to zero.
    let finite = [
        trigger.left,
        trigger.top,
        trigger.width,
        trigger.height,
        tooltip.width,
        tooltip.height,
        viewport.width,
        viewport.height,
    ]
    .iter()
    .all(|v| v.is_finite() && v.abs() < 1.0e12);
    if finite {
        assert!(out.top.is_finite(), "non-finite top");
        assert!(out.left.is_finite(), "non-finite left");
        assert!(out.arrow_left.is_finite(), "non-finite arrow");
    }
    assert!(!out.top.is_nan() && !out.left.is_nan() && !out.arrow_left.is_nan());
});
