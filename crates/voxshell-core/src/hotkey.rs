#![forbid(unsafe_code)]

//! Hotkey canonicalization and display formatting.
//!
//! A hotkey combination is stored and compared as a *canonical string*:
//! lowercase key tokens joined with `+`, modifiers first in the fixed order
//! `ctrl, shift, alt, win`, followed by the remaining keys in the order the
//! user pressed them, with duplicates removed.
//!
//! # Example
//!
//! ```
//! use voxshell_core::hotkey::{OsType, format_for_display, normalize};
//!
//! let canonical = normalize(["alt", "Control", "shift", "k"]);
//! assert_eq!(canonical, "ctrl+shift+alt+k");
//! assert_eq!(
//!     format_for_display(&canonical, OsType::MacOs),
//!     "Ctrl + Shift + Opt + K"
//! );
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator between tokens in a canonical combination string.
pub const TOKEN_SEPARATOR: char = '+';

/// Separator used by [`format_for_display`].
pub const DISPLAY_SEPARATOR: &str = " + ";

/// Tighter separator for compact surfaces (footer meter, sidebar chips).
pub const COMPACT_DISPLAY_SEPARATOR: &str = "+";

/// Aliases folded into a canonical token.
const TOKEN_ALIASES: &[(&str, &str)] = &[
    ("control", "ctrl"),
    ("option", "alt"),
    ("command", "win"),
    ("meta", "win"),
    ("super", "win"),
];

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// A modifier key, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Win,
}

impl Modifier {
    /// All modifiers in canonical order.
    pub const ALL: [Modifier; 4] = [Self::Ctrl, Self::Shift, Self::Alt, Self::Win];

    /// Canonical token for this modifier.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Ctrl => "ctrl",
            Self::Shift => "shift",
            Self::Alt => "alt",
            Self::Win => "win",
        }
    }

    /// Look up a modifier by canonical token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.token() == token)
    }

    /// Label shown to the user on the given OS.
    #[must_use]
    pub const fn display_label(self, os: OsType) -> &'static str {
        match (self, os) {
            (Self::Ctrl, _) => "Ctrl",
            (Self::Shift, _) => "Shift",
            (Self::Alt, OsType::MacOs) => "Opt",
            (Self::Alt, _) => "Alt",
            (Self::Win, OsType::MacOs) => "Cmd",
            (Self::Win, OsType::Windows) => "Win",
            (Self::Win, OsType::Linux | OsType::Unknown) => "Super",
        }
    }
}

// ---------------------------------------------------------------------------
// OS type
// ---------------------------------------------------------------------------

/// Host operating system, used only as a formatting parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum OsType {
    MacOs,
    Windows,
    Linux,
    #[default]
    Unknown,
}

impl OsType {
    /// The OS this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Unknown
        }
    }

    /// Parse the backend's OS identifier. Unrecognized values map to
    /// [`OsType::Unknown`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" | "mac" => Self::MacOs,
            "windows" | "win32" => Self::Windows,
            "linux" => Self::Linux,
            _ => Self::Unknown,
        }
    }

    /// Identifier string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for OsType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for OsType {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<OsType> for String {
    fn from(os: OsType) -> Self {
        os.as_str().to_string()
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// Canonicalize one key token: trim, lowercase, fold aliases.
///
/// Unknown tokens pass through trimmed and lowercased.
#[must_use]
pub fn canonicalize_token(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    TOKEN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or(lowered, |(_, canonical)| (*canonical).to_string())
}

/// Whether a canonical token names a modifier.
#[must_use]
pub fn is_modifier_token(token: &str) -> bool {
    Modifier::from_token(token).is_some()
}

/// Normalize a sequence of key names into a canonical combination string.
///
/// Parts that themselves contain `+` are split first, so an already
/// canonical string round-trips. Empty input yields `""`.
#[must_use]
pub fn normalize<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    canonical_tokens(parts).join("+")
}

fn canonical_tokens<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut unique: Vec<String> = Vec::new();
    for part in parts {
        for piece in part.as_ref().split(TOKEN_SEPARATOR) {
            let token = canonicalize_token(piece);
            if !token.is_empty() && !unique.contains(&token) {
                unique.push(token);
            }
        }
    }

    let mut ordered: Vec<String> = Modifier::ALL
        .iter()
        .map(|m| m.token())
        .filter(|m| unique.iter().any(|t| t == m))
        .map(str::to_string)
        .collect();
    ordered.extend(unique.into_iter().filter(|t| !is_modifier_token(t)));
    ordered
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Format a canonical combination for display, joined with `" + "`.
#[must_use]
pub fn format_for_display(combination: &str, os: OsType) -> String {
    format_for_display_with(combination, os, DISPLAY_SEPARATOR)
}

/// Format a canonical combination for display with a caller-chosen separator.
#[must_use]
pub fn format_for_display_with(combination: &str, os: OsType, separator: &str) -> String {
    combination
        .split(TOKEN_SEPARATOR)
        .map(canonicalize_token)
        .filter(|token| !token.is_empty())
        .map(|token| key_label(&token, os))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Display label for a single canonical token.
#[must_use]
pub fn key_label(token: &str, os: OsType) -> String {
    if let Some(modifier) = Modifier::from_token(token) {
        return modifier.display_label(os).to_string();
    }
    if token.chars().count() == 1 || is_function_key(token) {
        return token.to_uppercase();
    }
    title_case(token)
}

/// `f1` through `f24`.
fn is_function_key(token: &str) -> bool {
    token
        .strip_prefix('f')
        .filter(|digits| !digits.is_empty() && digits.len() <= 2)
        .and_then(|digits| digits.parse::<u8>().ok())
        .is_some_and(|n| (1..=24).contains(&n))
}

fn title_case(token: &str) -> String {
    let titled = token
        .split([' ', '_'])
        .filter(|word| !word.is_empty())
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ");
    if titled.is_empty() {
        token.to_string()
    } else {
        titled
    }
}

/// Title-case a word, splitting hyphenated words. Words that don't start
/// with a letter (`-`, `5`, `/`) are kept verbatim.
fn title_word(word: &str) -> String {
    if !word.chars().next().is_some_and(char::is_alphabetic) {
        return word.to_string();
    }
    word.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors at the hotkey parsing and persistence edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyError {
    /// The input normalized to no tokens.
    Empty,
    /// The combination has no main key and the registration backend needs one.
    ModifierOnly(String),
    /// The combination is already bound to another binding.
    Conflict {
        /// Canonical combination that collided.
        combination: String,
        /// Binding that already owns it.
        existing: String,
    },
}

impl fmt::Display for HotkeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "hotkey combination is empty"),
            Self::ModifierOnly(combo) => {
                write!(f, "hotkey '{combo}' must include a main key besides modifiers")
            }
            Self::Conflict {
                combination,
                existing,
            } => write!(f, "hotkey '{combination}' is already bound to '{existing}'"),
        }
    }
}

impl std::error::Error for HotkeyError {}

// ---------------------------------------------------------------------------
// HotkeyCombination
// ---------------------------------------------------------------------------

/// A validated, canonical hotkey combination.
///
/// Constructed only through normalization, so the canonical-form invariants
/// (non-empty, deduplicated, modifiers first in fixed order) always hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct HotkeyCombination {
    canonical: String,
}

impl HotkeyCombination {
    /// Normalize `parts` into a combination.
    pub fn from_parts<I, S>(parts: I) -> Result<Self, HotkeyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let canonical = normalize(parts);
        if canonical.is_empty() {
            return Err(HotkeyError::Empty);
        }
        Ok(Self { canonical })
    }

    /// The canonical `+`-joined string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Canonical tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.canonical.split(TOKEN_SEPARATOR)
    }

    /// Modifiers present, in canonical order.
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.tokens().filter_map(Modifier::from_token)
    }

    /// Non-modifier tokens in the order they were pressed.
    pub fn main_keys(&self) -> impl Iterator<Item = &str> {
        self.tokens().filter(|t| !is_modifier_token(t))
    }

    /// Whether at least one non-modifier key is present.
    #[must_use]
    pub fn has_main_key(&self) -> bool {
        self.main_keys().next().is_some()
    }

    /// Whether every token is a modifier.
    #[must_use]
    pub fn is_modifier_only(&self) -> bool {
        !self.has_main_key()
    }

    /// Format for display on `os` with `" + "` between keys.
    #[must_use]
    pub fn display(&self, os: OsType) -> String {
        format_for_display(&self.canonical, os)
    }
}

impl fmt::Display for HotkeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for HotkeyCombination {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_parts([s])
    }
}

impl TryFrom<String> for HotkeyCombination {
    type Error = HotkeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HotkeyCombination> for String {
    fn from(combo: HotkeyCombination) -> Self {
        combo.canonical
    }
}
