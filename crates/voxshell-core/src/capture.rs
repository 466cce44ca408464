#![forbid(unsafe_code)]

//! Live hotkey capture.
//!
//! [`HotkeyCapture`] records a chord while the user holds keys down and
//! commits it when every key has been released. It is an explicit state
//! machine: the host feeds [`CaptureEvent`]s together with the current
//! [`Instant`], so tests drive it deterministically without real timers.
//!
//! # State Machine
//!
//! ```text
//! ┌──────────┐  begin   ┌─────────────┐  last key up   ┌────────────────┐
//! │   Idle   │────────▶│  Capturing  │───────────────▶│ Committed(combo)│──▶ Idle
//! └──────────┘          └─────────────┘                └────────────────┘
//!      ▲                       │
//!      │   Esc / blur / click outside / empty chord
//!      └───────────────────────┘
//! ```
//!
//! Two collections are tracked while capturing:
//!
//! - **held**: keys currently down. Its emptiness is the only commit trigger.
//! - **recorded**: every distinct key pressed this session, in press order.
//!   The committed combination is `normalize(recorded)`.
//!
//! Cancellation wins over late key-ups: once the session is cancelled the
//! machine is idle and ignores the releases that follow.
//!
//! [`CaptureCoordinator`] sits on top and enforces a single active session
//! application-wide, writing commits through a [`HotkeyStore`].
//!
//! # Example
//!
//! ```
//! use web_time::Instant;
//! use voxshell_core::capture::{CaptureOutput, HotkeyCapture};
//! use voxshell_core::event::CaptureEvent;
//!
//! let mut capture = HotkeyCapture::with_defaults();
//! let now = Instant::now();
//! capture.begin(now);
//! capture.feed(&CaptureEvent::key_down("ControlLeft"), now);
//! capture.feed(&CaptureEvent::key_down("KeyK"), now);
//! capture.feed(&CaptureEvent::key_up("KeyK"), now);
//! let out = capture.feed(&CaptureEvent::key_up("ControlLeft"), now);
//! match out {
//!     CaptureOutput::Committed(combo) => assert_eq!(combo.as_str(), "ctrl+k"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use ahash::AHashSet;
use web_time::{Duration, Instant};

use crate::event::{CaptureEvent, KeyEvent, KeyEventKind};
use crate::hotkey::{DISPLAY_SEPARATOR, HotkeyCombination, HotkeyError, OsType, normalize};
use crate::key_name::{ExtractedKey, extract_key};
use crate::store::{HotkeyStore, validate_binding};

#[cfg(feature = "tracing")]
use crate::logging::debug;
#[cfg(not(feature = "tracing"))]
use crate::debug;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default window in which a second press of the same key is treated as
/// switch chatter or host auto-repeat.
pub const DEFAULT_REPEAT_DEBOUNCE_MS: u64 = 30;

/// Maximum allowed repeat debounce.
pub const MAX_REPEAT_DEBOUNCE_MS: u64 = 250;

/// Configuration for [`HotkeyCapture`].
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `VOXSHELL_CAPTURE_REPEAT_DEBOUNCE_MS` | u64 | 30 | Repeat press window |
/// | `VOXSHELL_CAPTURE_REQUIRE_MAIN_KEY` | bool | false | Reject modifier-only chords |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Presses of the same key closer together than this are ignored.
    pub repeat_debounce: Duration,

    /// Reject modifier-only combinations at commit time.
    ///
    /// Registration backends other than low-level hooks need a main key.
    pub require_main_key: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            repeat_debounce: Duration::from_millis(DEFAULT_REPEAT_DEBOUNCE_MS),
            require_main_key: false,
        }
    }
}

impl CaptureConfig {
    /// Set the repeat debounce window.
    #[must_use]
    pub fn with_repeat_debounce(mut self, debounce: Duration) -> Self {
        self.repeat_debounce = debounce;
        self
    }

    /// Require a non-modifier key in committed combinations.
    #[must_use]
    pub fn require_main_key(mut self, require: bool) -> Self {
        self.require_main_key = require;
        self
    }

    /// Load config from environment variables; values are clamped.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("VOXSHELL_CAPTURE_REPEAT_DEBOUNCE_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.repeat_debounce = Duration::from_millis(ms);
        }

        if let Ok(val) = std::env::var("VOXSHELL_CAPTURE_REQUIRE_MAIN_KEY") {
            config.require_main_key = val == "1" || val.eq_ignore_ascii_case("true");
        }

        config.validated()
    }

    /// Clamp the debounce to `0..=250ms`.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let ms = self.repeat_debounce.as_millis().min(u128::from(u64::MAX)) as u64;
        self.repeat_debounce = Duration::from_millis(ms.min(MAX_REPEAT_DEBOUNCE_MS));
        self
    }

    /// Check if values are within valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.repeat_debounce <= Duration::from_millis(MAX_REPEAT_DEBOUNCE_MS)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Why a capture session ended without a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Escape was pressed.
    Escape,
    /// The window lost focus.
    FocusLost,
    /// A pointer went down outside the capture widget.
    PointerOutside,
    /// Another capture session started.
    Superseded,
    /// Every recorded key normalized away.
    EmptyCombination,
    /// The host cancelled explicitly.
    Aborted,
}

/// Result of feeding an event to [`HotkeyCapture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutput {
    /// Event had no effect (idle, repeat, or unknown key).
    Ignored,
    /// A session started.
    Started,
    /// A key was recorded; `display` is the refreshed live preview.
    Updated { display: String },
    /// A key was released but others are still held.
    Pending { held: usize },
    /// All keys released; the finalized combination.
    Committed(HotkeyCombination),
    /// The session ended without a combination.
    Cancelled(CancelReason),
}

// ---------------------------------------------------------------------------
// Capture state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Session {
    held: AHashSet<String>,
    recorded: Vec<ExtractedKey>,
    last_press: Vec<(String, Instant)>,
}

impl Session {
    fn last_press_of(&self, token: &str) -> Option<Instant> {
        self.last_press
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, at)| *at)
    }

    fn note_press(&mut self, token: &str, now: Instant) {
        match self.last_press.iter_mut().find(|(t, _)| t == token) {
            Some(entry) => entry.1 = now,
            None => self.last_press.push((token.to_string(), now)),
        }
    }
}

#[derive(Debug)]
enum CaptureState {
    Idle,
    Capturing(Session),
}

/// Single-session hotkey capture state machine.
#[derive(Debug)]
pub struct HotkeyCapture {
    config: CaptureConfig,
    os: OsType,
    state: CaptureState,
}

impl HotkeyCapture {
    /// Create a capture machine for the given OS.
    #[must_use]
    pub fn new(config: CaptureConfig, os: OsType) -> Self {
        Self {
            config,
            os,
            state: CaptureState::Idle,
        }
    }

    /// Default configuration for the current OS.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(CaptureConfig::default(), OsType::current())
    }

    /// Start a session, discarding any previous one.
    pub fn begin(&mut self, _now: Instant) -> CaptureOutput {
        debug!(message = "hotkey.capture.begin");
        self.state = CaptureState::Capturing(Session::default());
        CaptureOutput::Started
    }

    /// Cancel the active session. Idle machines ignore the request.
    pub fn cancel(&mut self, reason: CancelReason) -> CaptureOutput {
        if !self.is_capturing() {
            return CaptureOutput::Ignored;
        }
        debug!(message = "hotkey.capture.cancel", reason = ?reason);
        self.state = CaptureState::Idle;
        CaptureOutput::Cancelled(reason)
    }

    /// Process one event.
    pub fn feed(&mut self, event: &CaptureEvent, now: Instant) -> CaptureOutput {
        match event {
            CaptureEvent::FocusLost => self.cancel(CancelReason::FocusLost),
            CaptureEvent::PointerDownOutside => self.cancel(CancelReason::PointerOutside),
            CaptureEvent::Key(key) => self.feed_key(key, now),
        }
    }

    fn feed_key(&mut self, event: &KeyEvent, now: Instant) -> CaptureOutput {
        if !self.is_capturing() {
            return CaptureOutput::Ignored;
        }
        let Some(key) = extract_key(&event.key) else {
            return CaptureOutput::Ignored;
        };
        match event.kind {
            KeyEventKind::Repeat => CaptureOutput::Ignored,
            KeyEventKind::Press => self.key_down(key, now),
            KeyEventKind::Release => self.key_up(&key),
        }
    }

    fn key_down(&mut self, key: ExtractedKey, now: Instant) -> CaptureOutput {
        if key.is_escape() {
            return self.cancel(CancelReason::Escape);
        }
        let debounce = self.config.repeat_debounce;
        let os = self.os;
        let CaptureState::Capturing(session) = &mut self.state else {
            return CaptureOutput::Ignored;
        };

        if session.held.contains(&key.token) {
            return CaptureOutput::Ignored;
        }
        if let Some(prev) = session.last_press_of(&key.token)
            && now.saturating_duration_since(prev) < debounce
        {
            return CaptureOutput::Ignored;
        }
        session.note_press(&key.token, now);
        session.held.insert(key.token.clone());
        if !session.recorded.iter().any(|k| k.token == key.token) {
            session.recorded.push(key);
        }

        CaptureOutput::Updated {
            display: live_display(&session.recorded, os),
        }
    }

    fn key_up(&mut self, key: &ExtractedKey) -> CaptureOutput {
        let CaptureState::Capturing(session) = &mut self.state else {
            return CaptureOutput::Ignored;
        };
        if !session.held.remove(&key.token) {
            return CaptureOutput::Ignored;
        }
        if !session.held.is_empty() {
            return CaptureOutput::Pending {
                held: session.held.len(),
            };
        }
        if session.recorded.is_empty() {
            return CaptureOutput::Pending { held: 0 };
        }

        let canonical = normalize(session.recorded.iter().map(|k| k.token.as_str()));
        match HotkeyCombination::from_parts([canonical.as_str()]) {
            Ok(combo) => {
                debug!(message = "hotkey.capture.commit", combination = %combo);
                self.state = CaptureState::Idle;
                CaptureOutput::Committed(combo)
            }
            Err(_) => self.cancel(CancelReason::EmptyCombination),
        }
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        matches!(self.state, CaptureState::Capturing(_))
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn held_count(&self) -> usize {
        match &self.state {
            CaptureState::Capturing(session) => session.held.len(),
            CaptureState::Idle => 0,
        }
    }

    /// Keys recorded so far, in press order.
    #[must_use]
    pub fn recorded(&self) -> &[ExtractedKey] {
        match &self.state {
            CaptureState::Capturing(session) => &session.recorded,
            CaptureState::Idle => &[],
        }
    }

    /// Live preview of the keys recorded so far (side qualifiers kept).
    #[must_use]
    pub fn live_display(&self) -> String {
        live_display(self.recorded(), self.os)
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// OS used for display labels.
    #[must_use]
    pub fn os(&self) -> OsType {
        self.os
    }
}

fn live_display(recorded: &[ExtractedKey], os: OsType) -> String {
    recorded
        .iter()
        .map(|key| key.live_label(os))
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// What a [`CaptureCoordinator`] did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingUpdate {
    /// Nothing to report.
    None,
    /// The live preview for `id` changed.
    Live { id: String, display: String },
    /// `combination` was stored for `id`.
    Saved {
        id: String,
        combination: HotkeyCombination,
    },
    /// The committed combination was refused; the stored value is unchanged.
    Rejected { id: String, error: HotkeyError },
    /// The session for `id` ended without a change.
    Cancelled { id: String, reason: CancelReason },
}

/// Owns the single active capture session and the binding store.
#[derive(Debug)]
pub struct CaptureCoordinator<S> {
    store: S,
    capture: HotkeyCapture,
    active: Option<String>,
}

impl<S: HotkeyStore> CaptureCoordinator<S> {
    /// Create a coordinator over `store`.
    pub fn new(store: S, capture: HotkeyCapture) -> Self {
        Self {
            store,
            capture,
            active: None,
        }
    }

    /// Start capturing for `binding_id`.
    ///
    /// A session already running for another binding is cancelled first and
    /// reported as [`BindingUpdate::Cancelled`] with
    /// [`CancelReason::Superseded`].
    pub fn begin(&mut self, binding_id: impl Into<String>, now: Instant) -> BindingUpdate {
        let superseded = match self.active.take() {
            Some(prev) => {
                self.capture.cancel(CancelReason::Superseded);
                BindingUpdate::Cancelled {
                    id: prev,
                    reason: CancelReason::Superseded,
                }
            }
            None => BindingUpdate::None,
        };
        self.capture.begin(now);
        self.active = Some(binding_id.into());
        superseded
    }

    /// Feed an event to the active session.
    pub fn feed(&mut self, event: &CaptureEvent, now: Instant) -> BindingUpdate {
        let Some(id) = self.active.clone() else {
            return BindingUpdate::None;
        };
        match self.capture.feed(event, now) {
            CaptureOutput::Ignored | CaptureOutput::Started | CaptureOutput::Pending { .. } => {
                BindingUpdate::None
            }
            CaptureOutput::Updated { display } => BindingUpdate::Live { id, display },
            CaptureOutput::Cancelled(reason) => {
                self.active = None;
                BindingUpdate::Cancelled { id, reason }
            }
            CaptureOutput::Committed(combination) => {
                self.active = None;
                self.save(id, combination)
            }
        }
    }

    /// Cancel the active session, if any.
    pub fn cancel(&mut self) -> BindingUpdate {
        match self.active.take() {
            Some(id) => {
                self.capture.cancel(CancelReason::Aborted);
                BindingUpdate::Cancelled {
                    id,
                    reason: CancelReason::Aborted,
                }
            }
            None => BindingUpdate::None,
        }
    }

    fn save(&mut self, id: String, combination: HotkeyCombination) -> BindingUpdate {
        let result = validate_binding(&combination, self.capture.config().require_main_key)
            .and_then(|()| self.store.set(&id, combination.clone()));
        match result {
            Ok(()) => BindingUpdate::Saved { id, combination },
            Err(error) => BindingUpdate::Rejected { id, error },
        }
    }

    /// Binding currently being captured.
    #[must_use]
    pub fn active_binding(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The underlying capture machine.
    #[must_use]
    pub fn capture(&self) -> &HotkeyCapture {
        &self.capture
    }

    /// The binding store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the coordinator, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> HotkeyCapture {
        HotkeyCapture::new(CaptureConfig::default(), OsType::Windows)
    }

    fn ms(base: Instant, offset: u64) -> Instant {
        base + Duration::from_millis(offset)
    }

    #[test]
    fn idle_ignores_keys() {
        let mut c = capture();
        let now = Instant::now();
        assert_eq!(
            c.feed(&CaptureEvent::key_down("KeyA"), now),
            CaptureOutput::Ignored
        );
        assert!(!c.is_capturing());
    }

    #[test]
    fn commit_after_all_keys_released() {
        let mut c = capture();
        let t = Instant::now();
        assert_eq!(c.begin(t), CaptureOutput::Started);
        assert_eq!(
            c.feed(&CaptureEvent::key_down("AltLeft"), t),
            CaptureOutput::Updated {
                display: "Left Alt".into()
            }
        );
        assert_eq!(
            c.feed(&CaptureEvent::key_down("ControlLeft"), ms(t, 50)),
            CaptureOutput::Updated {
                display: "Left Alt + Left Ctrl".into()
            }
        );
        c.feed(&CaptureEvent::key_down("KeyK"), ms(t, 100));
        assert_eq!(c.held_count(), 3);
        assert_eq!(
            c.feed(&CaptureEvent::key_up("KeyK"), ms(t, 150)),
            CaptureOutput::Pending { held: 2 }
        );
        c.feed(&CaptureEvent::key_up("AltLeft"), ms(t, 160));
        let out = c.feed(&CaptureEvent::key_up("ControlLeft"), ms(t, 170));
        assert_eq!(
            out,
            CaptureOutput::Committed("ctrl+alt+k".parse().expect("combo"))
        );
        assert!(!c.is_capturing());
    }

    #[test]
    fn released_keys_stay_recorded() {
        let mut c = capture();
        let t = Instant::now();
        c.begin(t);
        c.feed(&CaptureEvent::key_down("ShiftLeft"), t);
        c.feed(&CaptureEvent::key_down("KeyA"), ms(t, 40));
        c.feed(&CaptureEvent::key_up("KeyA"), ms(t, 80));
        c.feed(&CaptureEvent::key_down("KeyB"), ms(t, 120));
        c.feed(&CaptureEvent::key_up("KeyB"), ms(t, 160));
        let out = c.feed(&CaptureEvent::key_up("ShiftLeft"), ms(t, 200));
        assert_eq!(
            out,
            CaptureOutput::Committed("shift+a+b".parse().expect("combo"))
        );
    }

    #[test]
    fn left_and_right_variants_collapse() {
        let mut c = capture();
        let t = Instant::now();
        c.begin(t);
        c.feed(&CaptureEvent::key_down("ShiftLeft"), t);
        c.feed(&CaptureEvent::key_down("ShiftRight"), ms(t, 40));
        assert_eq!(c.held_count(), 1);
        assert_eq!(c.recorded().len(), 1);
    }

    #[test]
    fn repeats_are_ignored() {
        let mut c = capture();
        let t = Instant::now();
        c.begin(t);
        c.feed(&CaptureEvent::key_down("KeyA"), t);
        assert_eq!(
            c.feed(&CaptureEvent::Key(KeyEvent::repeat("KeyA")), ms(t, 5)),
            CaptureOutput::Ignored
        );
        assert_eq!(
            c.feed(&CaptureEvent::key_down("KeyA"), ms(t, 500)),
            CaptureOutput::Ignored
        );
    }

    #[test]
    fn chatter_within_debounce_is_ignored() {
        let mut c = capture();
        let t = Instant::now();
        c.begin(t);
        c.feed(&CaptureEvent::key_down("ControlLeft"), t);
        c.feed(&CaptureEvent::key_down("KeyA"), ms(t, 10));
        c.feed(&CaptureEvent::key_up("KeyA"), ms(t, 15));
        assert_eq!(
            c.feed(&CaptureEvent::key_down("KeyA"), ms(t, 20)),
            CaptureOutput::Ignored
        );
        assert!(matches!(
            c.feed(&CaptureEvent::key_down("KeyA"), ms(t, 100)),
            CaptureOutput::Updated { .. }
        ));
    }

    #[test]
    fn escape_cancels_and_wins_over_late_key_up() {
        let mut c = capture();
        let t = Instant::now();
        c.begin(t);
        c.feed(&CaptureEvent::key_down("ControlLeft"), t);
        assert_eq!(
            c.feed(&CaptureEvent::key_down("Escape"), ms(t, 50)),
            CaptureOutput::Cancelled(CancelReason::Escape)
        );
        assert_eq!(
            c.feed(&CaptureEvent::key_up("ControlLeft"), ms(t, 90)),
            CaptureOutput::Ignored
        );
    }

    #[test]
    fn blur_and_outside_click_cancel() {
        let mut c = capture();
        let t = Instant::now();
        c.begin(t);
        c.feed(&CaptureEvent::key_down("KeyA"), t);
        assert_eq!(
            c.feed(&CaptureEvent::FocusLost, t),
            CaptureOutput::Cancelled(CancelReason::FocusLost)
        );
        c.begin(t);
        assert_eq!(
            c.feed(&CaptureEvent::PointerDownOutside, t),
            CaptureOutput::Cancelled(CancelReason::PointerOutside)
        );
        assert_eq!(c.feed(&CaptureEvent::FocusLost, t), CaptureOutput::Ignored);
    }

    #[test]
    fn key_up_of_unheld_key_is_ignored() {
        let mut c = capture();
        let t = Instant::now();
        c.begin(t);
        assert_eq!(
            c.feed(&CaptureEvent::key_up("KeyA"), t),
            CaptureOutput::Ignored
        );
        assert!(c.is_capturing());
    }

    #[test]
    fn blank_key_names_are_ignored() {
        let mut c = capture();
        let t = Instant::now();
        c.begin(t);
        assert_eq!(
            c.feed(&CaptureEvent::key_down("   "), t),
            CaptureOutput::Ignored
        );
        assert!(c.recorded().is_empty());
    }

    #[test]
    fn begin_restarts_session() {
        let mut c = capture();
        let t = Instant::now();
        c.begin(t);
        c.feed(&CaptureEvent::key_down("KeyA"), t);
        c.begin(ms(t, 10));
        assert!(c.recorded().is_empty());
        assert_eq!(c.held_count(), 0);
    }

    #[test]
    fn config_validation() {
        let config = CaptureConfig::default()
            .with_repeat_debounce(Duration::from_millis(5_000))
            .validated();
        assert_eq!(config.repeat_debounce, Duration::from_millis(250));
        assert!(config.is_valid());
        assert!(
            !CaptureConfig::default()
                .with_repeat_debounce(Duration::from_secs(1))
                .is_valid()
        );
    }
}
