#![no_main]

use libfuzzer_sys::fuzz_target;
use policy_docs::catalog::load_from_str;
use policy_docs::docgen::policy::policy_markdown;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        // Any catalog that loads must also render
        if let Ok(catalog) = load_from_str(yaml_str) {
            for (_, platform) in catalog.platforms() {
                for (_, policies) in platform.namespaces() {
                    for policy in policies {
                        let _ = policy_markdown(policy);
                    }
                }
            }
        }
    }
});
