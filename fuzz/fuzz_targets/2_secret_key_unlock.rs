#![no_main]

use libfuzzer_sys::fuzz_target;
use pgpkeys::packet::SecretKey;
use pgpkeys::types::Password;

// locked keys with garbage material must fail cleanly and stay locked
fuzz_target!(|data: &[u8]| {
    if let Ok(mut key) = SecretKey::from_slice(data) {
        let was_locked = key.is_locked();
        if key.decrypt(&Password::from("fuzz")).is_err() {
            assert_eq!(key.is_locked(), was_locked);
        }
    }
});
