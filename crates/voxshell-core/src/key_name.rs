#![forbid(unsafe_code)]

//! OS key-name extraction.
//!
//! Hosts report keys in several shapes: DOM-style hardware codes
//! (`"ShiftLeft"`, `"KeyA"`, `"Digit1"`), logical key values (`"Shift"`,
//! `"a"`, `" "`), and backend names with side qualifiers (`"left shift"`,
//! `"shift_left"`). [`extract_key`] folds all of them into a canonical
//! [`KeyToken`](crate::hotkey::canonicalize_token) plus the side it came from,
//! so the live preview can still say "Left Shift" while the committed
//! combination says `shift`.

use crate::hotkey::{Modifier, OsType, canonicalize_token, key_label};

/// Which physical copy of a doubled key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySide {
    Left,
    Right,
}

impl KeySide {
    const fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// A key name extracted from a raw host identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtractedKey {
    /// Canonical token (`"shift"`, `"a"`, `"f5"`, `"numpad 5"`).
    pub token: String,
    /// Side qualifier present in the raw name, if any.
    pub side: Option<KeySide>,
}

impl ExtractedKey {
    /// Label used in the live capture preview, side included.
    #[must_use]
    pub fn live_label(&self, os: OsType) -> String {
        let base = key_label(&self.token, os);
        match self.side {
            Some(side) => format!("{} {base}", side.label()),
            None => base,
        }
    }

    /// Whether this key is a modifier.
    #[must_use]
    pub fn is_modifier(&self) -> bool {
        Modifier::from_token(&self.token).is_some()
    }

    /// Whether this is the Escape key.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.token == "escape"
    }
}

/// Words that name a modifier in any host vocabulary.
const MODIFIER_WORDS: &[(&str, Modifier)] = &[
    ("shift", Modifier::Shift),
    ("ctrl", Modifier::Ctrl),
    ("control", Modifier::Ctrl),
    ("alt", Modifier::Alt),
    ("option", Modifier::Alt),
    ("altgraph", Modifier::Alt),
    ("meta", Modifier::Win),
    ("super", Modifier::Win),
    ("command", Modifier::Win),
    ("cmd", Modifier::Win),
    ("win", Modifier::Win),
    ("os", Modifier::Win),
];

/// Logical key values that need a name of their own.
const NAMED_KEYS: &[(&str, &str)] = &[
    (" ", "space"),
    ("+", "plus"),
    ("esc", "escape"),
    ("return", "enter"),
    ("del", "delete"),
    ("capslock", "caps lock"),
    ("numlock", "num lock"),
    ("scrolllock", "scroll lock"),
    ("pageup", "page up"),
    ("pagedown", "page down"),
    ("printscreen", "print screen"),
    ("contextmenu", "menu"),
];

/// Extract a canonical key from a raw host key identifier.
///
/// Returns `None` for blank input.
#[must_use]
pub fn extract_key(raw: &str) -> Option<ExtractedKey> {
    if raw == " " {
        return Some(plain("space"));
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(key) = extract_hardware_code(trimmed) {
        return Some(key);
    }

    let lowered = trimmed.to_lowercase();
    if let Some(key) = extract_qualified_modifier(&lowered) {
        return Some(key);
    }
    if let Some((_, name)) = NAMED_KEYS.iter().find(|(alias, _)| *alias == lowered) {
        return Some(plain(name));
    }
    if let Some((_, modifier)) = MODIFIER_WORDS.iter().find(|(word, _)| *word == lowered) {
        return Some(plain(modifier.token()));
    }
    Some(plain(&canonicalize_token(&lowered)))
}

/// Canonical token for a raw key name, dropping any side qualifier.
#[must_use]
pub fn extract_key_name(raw: &str) -> String {
    extract_key(raw).map(|key| key.token).unwrap_or_default()
}

/// Whether the raw name is the Escape key.
#[must_use]
pub fn is_escape(raw: &str) -> bool {
    extract_key(raw).is_some_and(|key| key.is_escape())
}

fn plain(token: &str) -> ExtractedKey {
    ExtractedKey {
        token: token.to_string(),
        side: None,
    }
}

/// DOM `KeyboardEvent.code` values (case-sensitive camel case).
fn extract_hardware_code(code: &str) -> Option<ExtractedKey> {
    if let Some(letter) = code.strip_prefix("Key")
        && letter.len() == 1
        && letter.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Some(plain(&letter.to_ascii_lowercase()));
    }
    if let Some(digit) = code.strip_prefix("Digit")
        && digit.len() == 1
        && digit.chars().all(|c| c.is_ascii_digit())
    {
        return Some(plain(digit));
    }
    if let Some(rest) = code.strip_prefix("Numpad")
        && !rest.is_empty()
    {
        return Some(plain(&format!("numpad {}", rest.to_ascii_lowercase())));
    }
    if let Some(dir) = code.strip_prefix("Arrow")
        && matches!(dir, "Up" | "Down" | "Left" | "Right")
    {
        return Some(plain(&dir.to_ascii_lowercase()));
    }

    for (suffix, side) in [("Left", KeySide::Left), ("Right", KeySide::Right)] {
        if let Some(base) = code.strip_suffix(suffix)
            && let Some(modifier) = modifier_word(&base.to_ascii_lowercase())
        {
            return Some(ExtractedKey {
                token: modifier.token().to_string(),
                side: Some(side),
            });
        }
    }
    None
}

/// `"left shift"`, `"shift_left"`, `"right-option"`, `"lctrl"`.
fn extract_qualified_modifier(lowered: &str) -> Option<ExtractedKey> {
    let words: Vec<&str> = lowered
        .split([' ', '_', '-'])
        .filter(|w| !w.is_empty())
        .collect();

    if let [a, b] = words.as_slice() {
        let (side, word) = match (side_word(a), side_word(b)) {
            (Some(side), None) => (side, *b),
            (None, Some(side)) => (side, *a),
            _ => return None,
        };
        let modifier = modifier_word(word)?;
        return Some(ExtractedKey {
            token: modifier.token().to_string(),
            side: Some(side),
        });
    }

    if let [single] = words.as_slice() {
        let (side, rest) = if let Some(rest) = single.strip_prefix('l') {
            (KeySide::Left, rest)
        } else if let Some(rest) = single.strip_prefix('r') {
            (KeySide::Right, rest)
        } else {
            return None;
        };
        if matches!(rest, "shift" | "ctrl" | "alt" | "win" | "cmd") {
            let modifier = modifier_word(rest)?;
            return Some(ExtractedKey {
                token: modifier.token().to_string(),
                side: Some(side),
            });
        }
    }
    None
}

fn side_word(word: &str) -> Option<KeySide> {
    match word {
        "left" | "l" => Some(KeySide::Left),
        "right" | "r" => Some(KeySide::Right),
        _ => None,
    }
}

fn modifier_word(word: &str) -> Option<Modifier> {
    MODIFIER_WORDS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, modifier)| *modifier)
}
