//! Compression format detection and transparent decompression.
//!
//! Genomic files arrive in many compressed containers; this module sniffs
//! the magic bytes and hands back a plain [`Read`] whatever the container
//! was. Unknown data passes through untouched, so callers never need to
//! know whether their input was compressed.
//!
//! | Format | Magic bytes |
//! |--------|-------------|
//! | bgzf   | `1f 8b` with flag `FEXTRA` and a `BC` extra subfield |
//! | bzip2  | `42 5a 68` (`BZh`) |
//! | gzip   | `1f 8b` |
//! | lz4    | `04 22 4d 18` |
//! | xz     | `fd 37 7a 58 5a 00` |
//! | zlib   | `78 01` / `78 9c` / `78 da` |
//! | zstd   | `28 b5 2f fd` |

use std::io::{Cursor, Read, Write};
use std::path::Path;

use flate2::read::{MultiGzDecoder, ZlibDecoder};
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::LiftError;

/// Number of bytes sniffed from the head of a stream.
const SNIFF_LEN: usize = 512;

/// A compression container recognized by magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Blocked gzip (bgzip/tabix output), a gzip stream of many members.
    Bgzf,
    Bzip2,
    Gzip,
    Lz4,
    /// No recognized container.
    Plain,
    Xz,
    Zlib,
    Zstd,
}

impl Format {
    /// Detect the container from the first bytes of a stream.
    ///
    /// Inputs shorter than a format's magic simply do not match it; empty
    /// input is [`Format::Plain`].
    pub fn detect(head: &[u8]) -> Format {
        if head.starts_with(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00]) {
            return Format::Xz;
        }
        if head.starts_with(&[0x28, 0xb5, 0x2f, 0xfd]) {
            return Format::Zstd;
        }
        if head.starts_with(&[0x04, 0x22, 0x4d, 0x18]) {
            return Format::Lz4;
        }
        if head.starts_with(b"BZh") {
            return Format::Bzip2;
        }
        if head.starts_with(&[0x1f, 0x8b]) {
            if is_bgzf(head) {
                return Format::Bgzf;
            }
            return Format::Gzip;
        }
        if head.len() >= 2 && head[0] == 0x78 && matches!(head[1], 0x01 | 0x9c | 0xda) {
            return Format::Zlib;
        }
        Format::Plain
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Bgzf => "bgzf",
            Format::Bzip2 => "bzip2",
            Format::Gzip => "gzip",
            Format::Lz4 => "lz4",
            Format::Plain => "plain",
            Format::Xz => "xz",
            Format::Zlib => "zlib",
            Format::Zstd => "zstd",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// BGZF is gzip with the FEXTRA flag set and a two-byte `BC` subfield
/// identifier directly after the ten-byte member header.
fn is_bgzf(head: &[u8]) -> bool {
    head.len() >= 14 && head[3] & 0x04 != 0 && head[12] == b'B' && head[13] == b'C'
}

/// Wrap a reader in the decoder its content calls for.
///
/// Sniffs up to [`SNIFF_LEN`] bytes, stitches them back in front of the
/// remaining stream, and returns a reader producing uncompressed bytes.
/// Plain input passes through unchanged. Corrupt compressed payloads
/// surface as I/O errors on later reads, not here.
pub fn decompress<R: Read + 'static>(mut reader: R) -> Result<Box<dyn Read>, LiftError> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    reader
        .by_ref()
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;

    let format = Format::detect(&head);
    let stitched = Cursor::new(head).chain(reader);

    Ok(match format {
        Format::Plain => Box::new(stitched),
        // MultiGzDecoder reads concatenated members, which is what bgzf is.
        Format::Gzip | Format::Bgzf => Box::new(MultiGzDecoder::new(stitched)),
        Format::Bzip2 => Box::new(bzip2::read::BzDecoder::new(stitched)),
        Format::Lz4 => Box::new(lz4_flex::frame::FrameDecoder::new(stitched)),
        Format::Xz => Box::new(xz2::read::XzDecoder::new(stitched)),
        Format::Zlib => Box::new(ZlibDecoder::new(stitched)),
        Format::Zstd => Box::new(zstd::stream::read::Decoder::new(stitched)?),
    })
}

/// Wrap a writer in the encoder the output path's extension calls for.
///
/// `.lz4`, `.xz` and `.zst`/`.zstd` select their own containers; every
/// other extension writes gzip. Encoders finish their stream when the
/// returned writer is dropped.
pub fn compress<P: AsRef<Path>, W: Write + 'static>(
    path: P,
    writer: W,
) -> Result<Box<dyn Write>, LiftError> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    Ok(match extension.as_deref() {
        Some("lz4") => Box::new(lz4_flex::frame::FrameEncoder::new(writer).auto_finish()),
        Some("xz") => Box::new(xz2::write::XzEncoder::new(writer, 6)),
        Some("zst") | Some("zstd") => {
            Box::new(zstd::stream::write::Encoder::new(writer, 3)?.auto_finish())
        }
        _ => Box::new(GzEncoder::new(writer, Compression::default())),
    })
}
