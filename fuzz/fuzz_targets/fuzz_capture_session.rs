#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use voxshell_core::capture::{CaptureConfig, CaptureOutput, HotkeyCapture};
use voxshell_core::event::CaptureEvent;
use voxshell_core::hotkey::{OsType, normalize};
use web_time::{Duration, Instant};

const KEYS: &[&str] = &[
    "ControlLeft",
    "ShiftRight",
    "AltLeft",
    "MetaLeft",
    "KeyA",
    "KeyZ",
    "Digit1",
    "F5",
    "Space",
    "Escape",
    "",
];

#[derive(Debug, Arbitrary)]
enum Step {
    Down(u8, u8),
    Up(u8, u8),
    FocusLost,
    PointerOutside,
    Begin,
}

fuzz_target!(|steps: Vec<Step>| {
    let mut capture = HotkeyCapture::new(CaptureConfig::default(), OsType::Linux);
    let mut now = Instant::now();
    capture.begin(now);

    for step in steps {
        let (event, delay) = match step {
            Step::Down(k, ms) => (CaptureEvent::key_down(KEYS[k as usize % KEYS.len()]), ms),
            Step::Up(k, ms) => (CaptureEvent::key_up(KEYS[k as usize % KEYS.len()]), ms),
            Step::FocusLost => (CaptureEvent::FocusLost, 0),
            Step::PointerOutside => (CaptureEvent::PointerDownOutside, 0),
            Step::Begin => {
                capture.begin(now);
                continue;
            }
        };
        now += Duration::from_millis(u64::from(delay));

        let recorded: Vec<String> = capture.recorded().iter().map(|k| k.token.clone()).collect();
        match capture.feed(&event, now) {
            CaptureOutput::Committed(combo) => {
                assert_eq!(combo.as_str(), normalize(&recorded), "commit mismatch");
                assert!(!capture.is_capturing(), "still capturing after commit");
            }
            CaptureOutput::Cancelled(_) => {
                assert!(!capture.is_capturing(), "still capturing after cancel");
            }
            _ => {}
        }
        if !capture.is_capturing() {
            assert_eq!(capture.held_count(), 0, "idle with held keys");
        }
    }
});
