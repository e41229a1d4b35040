use crate::models::Family;

/// An ICMP echo message held in an owned buffer.
///
/// The buffer is never smaller than the echo header of its family:
///
/// ```
/// use portknock::builder::IcmpPacket;
/// use portknock::models::Family;
///
/// let packet = IcmpPacket::new(Family::IPv6, 2);
/// assert_eq!(packet.len(), 8);
/// assert!(packet.payload().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IcmpPacket {
    buffer: Vec<u8>,
    family: Family,
}

impl IcmpPacket {
    /// Allocate a zeroed packet of `size` bytes, raised to the header size if smaller.
    pub fn new(family: Family, size: usize) -> Self {
        let size = size.max(family.icmp_header_size());
        IcmpPacket {
            buffer: vec![0u8; size],
            family,
        }
    }

    /// The whole message, header and payload.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// A slice over the echo header.
    pub fn header(&self) -> &[u8] {
        &self.buffer[..self.family.icmp_header_size()]
    }

    /// A mutable slice over the echo header.
    pub fn header_mut(&mut self) -> &mut [u8] {
        let end = self.family.icmp_header_size();
        &mut self.buffer[..end]
    }

    /// A slice from the end of the header to the end of the message.
    pub fn payload(&self) -> &[u8] {
        &self.buffer[self.family.icmp_header_size()..]
    }

    /// A mutable slice from the end of the header to the end of the message.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        let start = self.family.icmp_header_size();
        &mut self.buffer[start..]
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns false, `new` never allocates less than a header.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
