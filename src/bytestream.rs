//! Byte-level stream reader and writer.
//!
//! NBFX is byte-aligned throughout; multi-byte integers are little-endian
//! except the MultiByteInt31 form and the leading UUID groups. The reader
//! distinguishes clean EOF in record position (normal termination) from EOF
//! inside a payload (truncation).

use std::io::Read;

use crate::{Error, Result};

/// Reads bytes from an arbitrary source, tracking EOF.
///
/// Der Reader puffert nicht selbst; Aufrufer mit vielen kleinen Reads
/// übergeben eine bereits gepufferte Quelle.
pub struct ByteReader<R: Read> {
    inner: R,
}

impl<R: Read> ByteReader<R> {
    /// Creates a reader over the given byte source.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads one byte in record position. `Ok(None)` means clean EOF, which
    /// terminates decoding normally.
    pub fn read_opcode(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io(e)),
            }
        }
    }

    /// Reads one byte inside a payload. EOF here is [`Error::TruncatedInput`].
    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    /// Liest exakt `buf.len()` Bytes; EOF davor ist `TruncatedInput`.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(Error::TruncatedInput {
                        expected: buf.len(),
                        actual: filled,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io(e)),
            }
        }
        Ok(())
    }

    /// Reads a length-prefixed byte run into a fresh buffer.
    ///
    /// Alloziert in Schritten statt `with_capacity(len)`, damit ein
    /// manipuliertes Längenfeld keine riesige Vorab-Allokation erzwingt.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        const CHUNK: usize = 64 * 1024;
        let mut buf = Vec::with_capacity(len.min(CHUNK));
        let mut remaining = len;
        let mut chunk = [0u8; 4096];
        while remaining > 0 {
            let take = remaining.min(chunk.len());
            match self.inner.read(&mut chunk[..take]) {
                Ok(0) => {
                    return Err(Error::TruncatedInput {
                        expected: len,
                        actual: len - remaining,
                    });
                }
                Ok(n) => {
                    buf.extend_from_slice(&chunk[..n]);
                    remaining -= n;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io(e)),
            }
        }
        Ok(buf)
    }

    /// Little-endian u16 payload read.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Little-endian u32 payload read.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Little-endian u64 payload read.
    pub fn read_u64_le(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// Collects output bytes in a growable buffer.
#[derive(Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one byte.
    #[inline]
    pub fn write_u8(&mut self, b: u8) {
        self.buf.push(b);
    }

    /// Appends a byte run.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Little-endian u16 payload write.
    pub fn write_u16_le(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Little-endian u32 payload write.
    pub fn write_u32_le(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Little-endian u64 payload write.
    pub fn write_u64_le(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Anzahl bisher geschriebener Bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True wenn noch nichts geschrieben wurde.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the accumulated bytes, consuming the writer.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Returns the bytes written so far without consuming the writer.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_read_reports_clean_eof() {
        let mut r = ByteReader::new(&[0x40][..]);
        assert_eq!(r.read_opcode().unwrap(), Some(0x40));
        assert_eq!(r.read_opcode().unwrap(), None);
    }

    #[test]
    fn payload_read_reports_truncation() {
        let mut r = ByteReader::new(&[0x01, 0x02][..]);
        let err = r.read_bytes(4).unwrap_err();
        assert_eq!(err, Error::TruncatedInput { expected: 4, actual: 2 });
    }

    #[test]
    fn exact_read_at_eof_is_truncation() {
        let mut r = ByteReader::new(&[][..]);
        assert!(matches!(r.read_u8(), Err(Error::TruncatedInput { .. })));
    }

    #[test]
    fn little_endian_reads() {
        let mut r = ByteReader::new(&[0x34, 0x12, 0x78, 0x56, 0x34, 0x12][..]);
        assert_eq!(r.read_u16_le().unwrap(), 0x1234);
        assert_eq!(r.read_u32_le().unwrap(), 0x12345678);
    }

    #[test]
    fn writer_round_trip() {
        let mut w = ByteWriter::new();
        w.write_u8(0x40);
        w.write_u16_le(0x1234);
        w.write_bytes(&[0xAA, 0xBB]);
        assert_eq!(w.into_vec(), vec![0x40, 0x34, 0x12, 0xAA, 0xBB]);
    }
}
