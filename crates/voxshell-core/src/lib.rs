#![forbid(unsafe_code)]

//! Core: geometry, key events, hotkey canonicalization, and capture state.
//!
//! # Role in VoxShell
//! `voxshell-core` holds the framework-independent pieces of the dictation
//! shell's UI layer. The host webview measures elements and forwards
//! keyboard/focus events; everything here is plain data and pure functions
//! on top of that.
//!
//! # Primary responsibilities
//! - **Geometry**: viewport rectangles consumed by `voxshell-widgets`.
//! - **Hotkeys**: token canonicalization, combination normalization, and
//!   OS-aware display labels.
//! - **Key names**: folding host key identifiers (`"ShiftLeft"`,
//!   `"left shift"`) into canonical tokens.
//! - **Capture**: the live record-a-shortcut state machine and the
//!   single-session coordinator.
//! - **Store**: the settings persistence seam for bindings.

pub mod capture;
pub mod event;
pub mod geometry;
pub mod hotkey;
pub mod key_name;
pub mod logging;
pub mod store;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace_span};
