#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Malformed sensor payloads must come back as errors, never panics.
    let _ = motion_config::parse_frames_json(data);
});
