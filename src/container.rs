//! Framed output writer for compiled-file containers.
//!
//! The container discipline: before every logical write, zero-pad the stream
//! to a 4-byte boundary; each record is an 8-byte little-endian length
//! followed immediately by its payload. A compiled-file unit is one metadata
//! record plus one raw data record.
//!
//! Individual writes do not report failure. The writer latches a sticky
//! error flag instead; callers check [`ContainerWriter::had_error`] after a
//! logical unit of work and abort the build step if it is set. A failed
//! record is never partially retried, since a torn frame would desynchronize
//! every record after it.

use std::io::Write;

use crate::schema::Record;

/// Stateful wrapper over a byte sink imposing the container's alignment and
/// length-prefix rules. Not synchronized; do not share across threads.
pub struct ContainerWriter<W: Write> {
    inner: W,
    count: u64,
    had_error: bool,
}

impl<W: Write> ContainerWriter<W> {
    pub fn new(inner: W) -> Self {
        ContainerWriter {
            inner,
            count: 0,
            had_error: false,
        }
    }

    /// Total bytes emitted so far, padding included.
    pub fn byte_count(&self) -> u64 {
        self.count
    }

    /// Whether any prior write to the underlying sink failed.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Aligned write of a 4-byte little-endian value.
    pub fn write_u32(&mut self, value: u32) {
        self.align();
        self.write_raw(&value.to_le_bytes());
    }

    /// Aligned write of a length-prefixed serialized record.
    pub fn write_metadata_record<R: Record>(&mut self, record: &R) {
        let bytes = match record.to_bytes() {
            Ok(bytes) => bytes,
            Err(_) => {
                self.had_error = true;
                return;
            }
        };
        self.align();
        self.write_raw(&(bytes.len() as u64).to_le_bytes());
        self.write_raw(&bytes);
    }

    /// Aligned write of a length-prefixed raw payload, copied verbatim.
    pub fn write_data_record(&mut self, data: &[u8]) {
        self.align();
        self.write_raw(&(data.len() as u64).to_le_bytes());
        self.write_raw(data);
    }

    /// Like [`Self::write_data_record`], for a payload held in blocks.
    /// `len` must equal the total size of all chunks.
    pub fn write_data_chunks<'a, I>(&mut self, len: u64, chunks: I)
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        self.align();
        self.write_raw(&len.to_le_bytes());
        let mut written = 0u64;
        for chunk in chunks {
            written += chunk.len() as u64;
            self.write_raw(chunk);
        }
        debug_assert_eq!(written, len, "chunk sizes disagree with length prefix");
    }

    /// Emits one compiled-file unit: the metadata record, then the raw data
    /// record.
    pub fn write_compiled_file<R: Record>(&mut self, metadata: &R, data: &[u8]) {
        self.write_metadata_record(metadata);
        self.write_data_record(data);
    }

    /// Flushes the underlying sink, latching the error flag on failure.
    pub fn flush(&mut self) {
        if self.inner.flush().is_err() {
            self.had_error = true;
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn align(&mut self) {
        let overflow = (self.count % 4) as usize;
        if overflow > 0 {
            let zeros = [0u8; 4];
            self.write_raw(&zeros[..4 - overflow]);
        }
    }

    fn write_raw(&mut self, bytes: &[u8]) {
        if self.had_error {
            return;
        }
        match self.inner.write_all(bytes) {
            Ok(()) => self.count += bytes.len() as u64,
            Err(_) => self.had_error = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CompiledFile, Configuration, Record};
    use std::io;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_u32_is_little_endian() {
        let mut writer = ContainerWriter::new(Vec::new());
        writer.write_u32(0x01020304);
        assert!(!writer.had_error());
        assert_eq!(writer.into_inner(), vec![0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_data_record_framing() {
        let mut writer = ContainerWriter::new(Vec::new());
        writer.write_data_record(b"abcdef");
        assert_eq!(writer.byte_count(), 14);

        let out = writer.into_inner();
        assert_eq!(&out[0..8], &6u64.to_le_bytes());
        assert_eq!(&out[8..14], b"abcdef");
    }

    #[test]
    fn test_alignment_pads_with_zeros_before_length() {
        let mut writer = ContainerWriter::new(Vec::new());
        // First record leaves the stream at offset 14 (8 + 6).
        writer.write_data_record(b"abcdef");
        // Second write must pad 2 zero bytes to offset 16 first.
        writer.write_data_record(b"0123456789");
        assert_eq!(writer.byte_count(), 16 + 8 + 10);

        let out = writer.into_inner();
        assert_eq!(&out[14..16], &[0, 0]);
        assert_eq!(&out[16..24], &10u64.to_le_bytes());
        assert_eq!(&out[24..34], b"0123456789");
    }

    #[test]
    fn test_aligned_offset_needs_no_padding() {
        let mut writer = ContainerWriter::new(Vec::new());
        writer.write_data_record(b"abcd"); // offset 12, already aligned
        writer.write_data_record(b"x");
        let out = writer.into_inner();
        assert_eq!(&out[12..20], &1u64.to_le_bytes());
    }

    #[test]
    fn test_metadata_record_length_matches_payload() {
        let metadata = CompiledFile {
            resource_name: "com.example:drawable/icon".to_string(),
            source_path: "res/drawable/icon.png".to_string(),
            config: Configuration::default(),
            exported_symbols: vec![],
        };
        let expected = metadata.to_bytes().unwrap();

        let mut writer = ContainerWriter::new(Vec::new());
        writer.write_metadata_record(&metadata);
        assert!(!writer.had_error());

        let out = writer.into_inner();
        assert_eq!(&out[0..8], &(expected.len() as u64).to_le_bytes());
        assert_eq!(&out[8..], expected.as_slice());
    }

    #[test]
    fn test_chunked_data_record() {
        let mut writer = ContainerWriter::new(Vec::new());
        writer.write_data_chunks(9, [b"abc".as_slice(), b"defgh", b"i"]);
        let out = writer.into_inner();
        assert_eq!(&out[0..8], &9u64.to_le_bytes());
        assert_eq!(&out[8..], b"abcdefghi");
    }

    #[test]
    fn test_error_flag_latches_and_stops_writes() {
        let mut writer = ContainerWriter::new(FailingSink);
        assert!(!writer.had_error());
        writer.write_data_record(b"doomed");
        assert!(writer.had_error());
        // Counter stays put once the sink failed.
        assert_eq!(writer.byte_count(), 0);
        writer.write_u32(7);
        assert_eq!(writer.byte_count(), 0);
    }

    #[test]
    fn test_compiled_file_unit_is_two_records() {
        let metadata = CompiledFile {
            resource_name: "com.example:layout/main".to_string(),
            source_path: "res/layout/main.xml".to_string(),
            config: Configuration::default(),
            exported_symbols: vec![],
        };
        let payload = b"rawdata";

        let mut writer = ContainerWriter::new(Vec::new());
        writer.write_compiled_file(&metadata, payload);
        assert!(!writer.had_error());

        let out = writer.into_inner();
        let meta_len = u64::from_le_bytes(out[0..8].try_into().unwrap()) as usize;
        let mut offset = 8 + meta_len;
        // Pad to the next 4-byte boundary before the data record.
        offset += (4 - offset % 4) % 4;
        let data_len = u64::from_le_bytes(out[offset..offset + 8].try_into().unwrap()) as usize;
        assert_eq!(data_len, payload.len());
        assert_eq!(&out[offset + 8..offset + 8 + data_len], payload);
    }
}
