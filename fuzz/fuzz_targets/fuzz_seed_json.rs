#![no_main]

use libfuzzer_sys::fuzz_target;
use talentlink::seed::parse_seed_json;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Must never panic, whatever the input.
        let _ = parse_seed_json(text);
    }
});
