//! Fuzz target for config parsing and validation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rd_config::validate::validate_config;
use rd_config::DigestConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = DigestConfig::from_toml_str(text) {
        let _ = validate_config(&config);
    }
    if let Ok(config) = DigestConfig::from_json_str(text) {
        let _ = validate_config(&config);
    }
});
