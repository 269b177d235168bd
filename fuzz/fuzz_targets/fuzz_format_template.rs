#![no_main]
use libfuzzer_sys::fuzz_target;
use linelog::fmt::{FormatTemplate, FormatValues};

fuzz_target!(|data: &str| {
    // Must not panic on any template string; rejected templates are fine
    let Ok(template) = FormatTemplate::parse(data) else {
        return;
    };

    let values = FormatValues::new()
        .timestamp("2025-01-01 | 00:00:00.000000")
        .logtype("info")
        .message("test")
        .prefix("pre")
        .postfix("post");
    let _ = template.render(&values);
});
