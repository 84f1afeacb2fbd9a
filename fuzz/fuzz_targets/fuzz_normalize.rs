#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut tree) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = mautic::normalize::normalize_list_contacts(&mut tree);
    }
});
