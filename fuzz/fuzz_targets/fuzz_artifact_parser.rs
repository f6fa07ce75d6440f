#![no_main]

use libfuzzer_sys::fuzz_target;
use policy_docs::release::Artifact;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = input.parse::<Artifact>();
    }
});
