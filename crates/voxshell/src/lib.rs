#![forbid(unsafe_code)]

//! VoxShell public facade crate.
//!
//! Re-exports the hotkey and tooltip types from the internal crates and
//! offers a prelude for hosts that wire up the shortcut editor and floating
//! tooltips.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use voxshell_core::capture::{
    BindingUpdate, CancelReason, CaptureConfig, CaptureCoordinator, CaptureOutput, HotkeyCapture,
};
pub use voxshell_core::event::{CaptureEvent, KeyEvent, KeyEventKind};
pub use voxshell_core::geometry::{Rect, Size};
pub use voxshell_core::hotkey::{
    HotkeyCombination, HotkeyError, Modifier, OsType, format_for_display, normalize,
};
pub use voxshell_core::key_name::{ExtractedKey, KeySide, extract_key, extract_key_name};
pub use voxshell_core::store::{HotkeyStore, MemoryHotkeyStore};

// --- Widget re-exports -----------------------------------------------------

pub use voxshell_widgets::tooltip::{
    LayoutTrigger, ParsePlacementError, Placement, Tooltip, TooltipLayout, TooltipSpacing,
    compute_layout,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for VoxShell hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Hotkey parsing, validation, or persistence failure.
    Hotkey(HotkeyError),
    /// Unrecognized tooltip placement in host configuration.
    Placement(ParsePlacementError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hotkey(err) => write!(f, "{err}"),
            Self::Placement(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Hotkey(err) => Some(err),
            Self::Placement(err) => Some(err),
        }
    }
}

impl From<HotkeyError> for Error {
    fn from(err: HotkeyError) -> Self {
        Self::Hotkey(err)
    }
}

impl From<ParsePlacementError> for Error {
    fn from(err: ParsePlacementError) -> Self {
        Self::Placement(err)
    }
}

/// Standard result type for VoxShell APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CaptureConfig, CaptureCoordinator, CaptureEvent, Error, HotkeyCombination, HotkeyStore,
        MemoryHotkeyStore, OsType, Placement, Rect, Result, Size, Tooltip, TooltipLayout,
        TooltipSpacing,
    };

    pub use crate::{core, widgets};
}

pub use voxshell_core as core;
pub use voxshell_widgets as widgets;
