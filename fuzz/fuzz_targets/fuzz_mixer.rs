//! Fuzz target: mecanum mixer
//!
//! Feeds arbitrary finite velocity triples (including far outside
//! [-1, 1]) and any non-negative coupling into `mix_with` and verifies:
//! - No panics
//! - Every wheel is finite and within [-1, 1]
//!
//! cargo fuzz run fuzz_mixer

#![no_main]

use autonbot::drive::{VelocityCommand, mix_with};
use libfuzzer_sys::fuzz_target;

fn f32_at(data: &[u8], i: usize) -> f32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&data[i * 4..i * 4 + 4]);
    f32::from_le_bytes(b)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }
    let [forward, strafe, rotate, coupling] = [0, 1, 2, 3].map(|i| f32_at(data, i));

    // Bound magnitudes so the squared translation stays finite.
    let ok = |v: f32| v.is_finite() && v.abs() < 1e12;
    if ![forward, strafe, rotate, coupling].into_iter().all(ok) || coupling < 0.0 {
        return;
    }

    let wheels = mix_with(VelocityCommand::new(forward, strafe, rotate), coupling);
    for w in wheels.to_array() {
        assert!(w.is_finite(), "non-finite wheel {w}");
        assert!(w.abs() <= 1.0 + 1e-5, "wheel {w} out of range");
    }
});
