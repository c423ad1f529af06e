//! Fuzz target: configuration loader
//!
//! Parses arbitrary bytes as a JSON configuration and verifies:
//! - No panics on malformed input
//! - Anything `from_json` accepts also passes `validate`
//!
//! cargo fuzz run fuzz_config

#![no_main]

use autonbot::config::AutonConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = AutonConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(config.control_period_secs() > 0.0);
    }
});
