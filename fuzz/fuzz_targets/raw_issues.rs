// SPDX-License-Identifier: Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = serde_json::from_slice::<Vec<issuerank_core::RawIssue>>(data) {
        for issue in issuerank_core::issues::assemble(&raw) {
            assert!(issue.priority_score >= 0.0);
            assert!(issue.friendliness_score >= 0.0);
        }
    }
});
