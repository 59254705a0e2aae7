// SPDX-License-Identifier: Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let links = issuerank_core::parse_link_header(s);
        for rel in links.keys() {
            assert_eq!(rel, &rel.to_ascii_lowercase());
        }
    }
});
