#![no_main]

use libfuzzer_sys::fuzz_target;
use pgpkeys::ser::Serialize;
use pgpkeys::types::S2kParams;

fuzz_target!(|data: &[u8]| {
    let mut input = data;
    if let Ok(params) = S2kParams::try_from_buf(&mut input) {
        let out = params.to_bytes().expect("serialize");
        assert_eq!(&out[..], &data[..data.len() - input.len()]);
    }
});
