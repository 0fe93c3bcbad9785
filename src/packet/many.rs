use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::packet::{Packet, PacketHeader};

/// Iterates over the packets in a buffer.
///
/// A packet whose body fails to parse is reported and skipped, because its
/// header still tells where the next one starts. Errors in a header end the
/// iteration.
#[derive(Debug)]
pub struct PacketParser<'a> {
    input: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> PacketParser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        PacketParser {
            input,
            offset: 0,
            done: false,
        }
    }

    /// Offset of the next packet in the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn next_packet(&mut self) -> Result<(PacketHeader, Result<Packet>)> {
        let (header, header_len) = PacketHeader::parse(self.input, self.offset)?;
        let start = self.offset + header_len;
        let len = header.packet_length();

        let body = start
            .checked_add(len)
            .and_then(|end| self.input.get(start..end))
            .ok_or(Error::TruncatedInput {
                context: "packet body",
                needed: len,
                remaining: self.input.len() - start,
            })?;
        self.offset = start + len;

        Ok((header, Packet::from_bytes(header.tag(), body)))
    }
}

impl Iterator for PacketParser<'_> {
    type Item = Result<Packet>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.input.len() {
            return None;
        }

        match self.next_packet() {
            Ok((header, Ok(packet))) => {
                debug!("parsed packet {:?} at {:?}", packet.tag(), header.version());
                Some(Ok(packet))
            }
            Ok((header, Err(err))) => {
                warn!("skipping invalid {:?} packet: {}", header.tag(), err);
                Some(Err(err))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
