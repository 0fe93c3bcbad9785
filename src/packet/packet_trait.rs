use std::io;

use crate::errors::Result;
use crate::packet::PacketHeader;
use crate::ser::Serialize;
use crate::types::Tag;

/// Capabilities shared by all packets: a tag and a body that can be written
/// behind a (new format) header.
pub trait PacketTrait: Serialize {
    /// Returns the tag for this packet type.
    fn tag(&self) -> Tag;

    /// The header this packet is written with.
    fn packet_header(&self) -> PacketHeader {
        PacketHeader::new_fixed(self.tag(), self.write_len())
    }

    fn to_writer_with_header<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        self.packet_header().to_writer(writer)?;
        self.to_writer(writer)?;

        Ok(())
    }

    fn write_len_with_header(&self) -> usize {
        self.packet_header().write_len() + self.write_len()
    }

    /// Serializes header and body.
    fn to_bytes_with_header(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.write_len_with_header());
        self.to_writer_with_header(&mut buf)?;

        Ok(buf)
    }
}
