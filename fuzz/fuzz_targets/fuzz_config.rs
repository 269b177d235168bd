#![no_main]
use libfuzzer_sys::fuzz_target;
use linelog::LoggerConfig;

fuzz_target!(|data: &str| {
    let _ = LoggerConfig::from_toml_str(data);
});
