#![no_main]

use libfuzzer_sys::fuzz_target;
use voxshell_core::hotkey::{OsType, format_for_display, normalize};
use voxshell_core::key_name::extract_key;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let parts: Vec<&str> = text.split('\n').collect();
    let canonical = normalize(&parts);

    // Post-conditions that must always hold:
    assert_eq!(normalize([canonical.as_str()]), canonical, "not idempotent");
    if !canonical.is_empty() {
        let tokens: Vec<&str> = canonical.split('+').collect();
        assert!(tokens.iter().all(|t| !t.is_empty()), "empty token");
        for os in [OsType::MacOs, OsType::Windows, OsType::Linux, OsType::Unknown] {
            let shown = format_for_display(&canonical, os);
            assert_eq!(shown.split(" + ").count(), tokens.len(), "label count");
        }
    }

    for part in parts {
        if let Some(key) = extract_key(part) {
            assert!(!key.token.is_empty(), "extracted empty key name");
        }
    }
});
