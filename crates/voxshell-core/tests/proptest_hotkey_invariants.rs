//! Property-based invariant tests for hotkey canonicalization.
//!
//! 1. Normalizing a canonical string again is a no-op
//! 2. Canonical strings never contain duplicate or empty tokens
//! 3. Modifiers always precede main keys, in fixed order
//! 4. Main keys keep their first-press order
//! 5. Display formatting never panics and yields one label per token
//! 6. Capture sessions commit exactly `normalize(recorded)`

use proptest::prelude::*;
use voxshell_core::capture::{CaptureConfig, CaptureOutput, HotkeyCapture};
use voxshell_core::event::CaptureEvent;
use voxshell_core::hotkey::{
    HotkeyCombination, Modifier, OsType, canonicalize_token, format_for_display,
    is_modifier_token, normalize,
};
use web_time::{Duration, Instant};

// ── Strategies ──────────────────────────────────────────────────────────

fn key_part() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ctrl".to_string()),
        Just("Control".to_string()),
        Just("shift".to_string()),
        Just("alt".to_string()),
        Just("Option".to_string()),
        Just("win".to_string()),
        Just("command".to_string()),
        Just("META".to_string()),
        Just("super".to_string()),
        Just(" space ".to_string()),
        Just("F5".to_string()),
        "[a-zA-Z0-9 _+-]{0,6}",
    ]
}

fn parts() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(key_part(), 0..8)
}

fn os() -> impl Strategy<Value = OsType> {
    prop_oneof![
        Just(OsType::MacOs),
        Just(OsType::Windows),
        Just(OsType::Linux),
        Just(OsType::Unknown),
    ]
}

fn modifier_rank(token: &str) -> Option<usize> {
    Modifier::ALL.iter().position(|m| m.token() == token)
}

// ═══════════════════════════════════════════════════════════════════════
// Canonical form
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_is_idempotent(parts in parts()) {
        let once = normalize(&parts);
        let twice = normalize(once.split('+'));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn canonical_tokens_are_unique_and_nonempty(parts in parts()) {
        let canonical = normalize(&parts);
        if canonical.is_empty() {
            return Ok(());
        }
        let tokens: Vec<&str> = canonical.split('+').collect();
        for (i, token) in tokens.iter().enumerate() {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token.trim(), *token);
            prop_assert!(!tokens[i + 1..].contains(token), "duplicate {token}");
        }
    }

    #[test]
    fn modifiers_precede_main_keys_in_fixed_order(parts in parts()) {
        let canonical = normalize(&parts);
        let mut last_rank: Option<usize> = None;
        let mut seen_main = false;
        for token in canonical.split('+').filter(|t| !t.is_empty()) {
            match modifier_rank(token) {
                Some(rank) => {
                    prop_assert!(!seen_main, "modifier {token} after main key");
                    if let Some(prev) = last_rank {
                        prop_assert!(rank > prev);
                    }
                    last_rank = Some(rank);
                }
                None => seen_main = true,
            }
        }
    }

    #[test]
    fn main_keys_keep_first_press_order(
        keys in proptest::collection::vec("[a-z][a-z0-9]{0,3}", 1..6),
    ) {
        let mut expected: Vec<String> = Vec::new();
        for key in &keys {
            let token = canonicalize_token(key);
            if !is_modifier_token(&token) && !expected.contains(&token) {
                expected.push(token);
            }
        }
        let mut input = vec!["alt".to_string()];
        input.extend(keys.iter().cloned());
        let canonical = normalize(&input);
        let main: Vec<&str> = canonical.split('+').filter(|t| !is_modifier_token(t)).collect();
        prop_assert_eq!(main, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn display_has_one_label_per_token(parts in parts(), os in os()) {
        let canonical = normalize(&parts);
        let display = format_for_display(&canonical, os);
        if canonical.is_empty() {
            prop_assert!(display.is_empty());
        } else {
            prop_assert_eq!(
                display.split(" + ").count(),
                canonical.split('+').count()
            );
        }
    }

    #[test]
    fn combination_parse_matches_normalize(parts in parts()) {
        let canonical = normalize(&parts);
        match HotkeyCombination::from_parts(&parts) {
            Ok(combo) => prop_assert_eq!(combo.as_str(), canonical.as_str()),
            Err(_) => prop_assert!(canonical.is_empty()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Capture sessions
// ═══════════════════════════════════════════════════════════════════════

fn code() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("ControlLeft"),
        Just("ControlRight"),
        Just("ShiftLeft"),
        Just("AltRight"),
        Just("MetaLeft"),
        Just("KeyA"),
        Just("KeyK"),
        Just("Digit1"),
        Just("F5"),
        Just("Space"),
    ]
}

proptest! {
    #[test]
    fn press_all_then_release_all_commits_normalized(
        codes in proptest::collection::vec(code(), 1..6),
    ) {
        let mut capture = HotkeyCapture::new(
            CaptureConfig::default().with_repeat_debounce(Duration::ZERO),
            OsType::Linux,
        );
        let start = Instant::now();
        capture.begin(start);
        for (i, code) in codes.iter().enumerate() {
            capture.feed(&CaptureEvent::key_down(*code), start + Duration::from_millis(i as u64));
        }
        let expected = normalize(capture.recorded().iter().map(|k| k.token.as_str()));

        let mut committed = None;
        for code in &codes {
            if let CaptureOutput::Committed(combo) =
                capture.feed(&CaptureEvent::key_up(*code), start + Duration::from_secs(1))
            {
                committed = Some(combo);
            }
        }
        let combo = committed.expect("session commits once all keys are up");
        prop_assert_eq!(combo.as_str(), expected.as_str());
        prop_assert!(!capture.is_capturing());
    }

    #[test]
    fn cancellation_always_wins(
        codes in proptest::collection::vec(code(), 1..6),
        blur in any::<bool>(),
    ) {
        let mut capture = HotkeyCapture::new(CaptureConfig::default(), OsType::Windows);
        let start = Instant::now();
        capture.begin(start);
        for code in &codes {
            capture.feed(&CaptureEvent::key_down(*code), start);
        }
        let cancel = if blur { CaptureEvent::FocusLost } else { CaptureEvent::PointerDownOutside };
        let out = capture.feed(&cancel, start);
        prop_assert!(matches!(out, CaptureOutput::Cancelled(_)), "expected cancel, got {:?}", out);
        for code in &codes {
            let late = capture.feed(&CaptureEvent::key_up(*code), start);
            prop_assert_eq!(late, CaptureOutput::Ignored);
        }
    }
}
