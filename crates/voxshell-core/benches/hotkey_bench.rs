//! Benchmark: hotkey normalization, display formatting, and capture sessions.
//!
//! Run with: `cargo bench -p voxshell-core --bench hotkey_bench`
//!
//! The capture input re-normalizes on every key transition, so these paths
//! run at keyboard event rate while the shortcut editor is open.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use voxshell_core::capture::{CaptureConfig, HotkeyCapture};
use voxshell_core::event::CaptureEvent;
use voxshell_core::hotkey::{OsType, format_for_display, normalize};
use voxshell_core::key_name::extract_key_name;
use web_time::{Duration, Instant};

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("four_tokens", |b| {
        b.iter(|| normalize(black_box(["alt", "Control", "shift", "k"])))
    });

    group.bench_function("aliases_and_duplicates", |b| {
        b.iter(|| {
            normalize(black_box([
                "command", "option", "meta", "Control", "ctrl", "F5", "space",
            ]))
        })
    });

    group.finish();
}

fn bench_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_for_display");
    for os in [OsType::MacOs, OsType::Windows, OsType::Linux] {
        group.bench_function(os.as_str(), |b| {
            b.iter(|| format_for_display(black_box("ctrl+shift+alt+win+page_up"), os))
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_key_name", |b| {
        b.iter(|| {
            for raw in ["ShiftLeft", "KeyA", "left shift", "Numpad5", "F12"] {
                black_box(extract_key_name(black_box(raw)));
            }
        })
    });
}

fn bench_capture_session(c: &mut Criterion) {
    c.bench_function("capture_session_three_keys", |b| {
        b.iter(|| {
            let mut capture = HotkeyCapture::new(CaptureConfig::default(), OsType::Windows);
            let start = Instant::now();
            capture.begin(start);
            let keys = ["ControlLeft", "ShiftLeft", "KeyK"];
            for (i, key) in keys.iter().enumerate() {
                let t = start + Duration::from_millis(40 * i as u64);
                capture.feed(&CaptureEvent::key_down(*key), t);
            }
            let end = start + Duration::from_millis(500);
            let mut last = None;
            for key in keys {
                last = Some(capture.feed(&CaptureEvent::key_up(key), end));
            }
            black_box(last)
        })
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_display,
    bench_extract,
    bench_capture_session
);
criterion_main!(benches);
