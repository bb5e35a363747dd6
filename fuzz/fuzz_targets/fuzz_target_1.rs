#![no_main]
use libfuzzer_sys::fuzz_target;

use json_tree::parse;

fuzz_target!(|data: &[u8]| {
    // The fuzzer gives us raw bytes; only valid UTF-8 is interesting.
    if let Ok(s) = std::str::from_utf8(data) {
        // We are looking for panics: any parse outcome is fine, and any
        // successfully parsed tree must also serialize without panicking.
        if let Ok(value) = parse(s) {
            let _ = value.serialize();
        }
    }
});
