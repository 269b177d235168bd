#![no_main]
use chrono::{Local, TimeZone};
use libfuzzer_sys::fuzz_target;
use linelog::fmt::format_timestamp;

fuzz_target!(|data: &str| {
    // Malformed patterns are echoed, never a panic
    if let Some(instant) = Local.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single() {
        let _ = format_timestamp(data, &instant);
    }
});
