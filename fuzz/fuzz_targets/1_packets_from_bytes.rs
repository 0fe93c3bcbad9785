#![no_main]

use libfuzzer_sys::fuzz_target;
use pgpkeys::packet::PacketParser;
use pgpkeys::ser::Serialize;

// parse packets and write back everything that parsed
fuzz_target!(|data: &[u8]| {
    for packet in PacketParser::new(data).flatten() {
        let _ = packet.to_bytes();
    }
});
