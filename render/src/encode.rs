//! Bitmap encoders: PNG (8-bit RGB) and binary PPM.

use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::raster::Raster;

/// The eight bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest IDAT payload written per chunk.
const IDAT_CHUNK: usize = 1 << 20;

/// Writes `raster` as a PNG image.
///
/// Rows are stored unfiltered and compressed as one zlib stream, split over
/// as many IDAT chunks as needed.
///
/// # Errors
///
/// Returns any error of the underlying writer or compressor.
pub fn write_png<W: Write>(raster: &Raster, mut out: W) -> io::Result<()> {
    out.write_all(&PNG_SIGNATURE)?;

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&raster.width().to_be_bytes());
    ihdr.extend_from_slice(&raster.height().to_be_bytes());
    // bit depth 8, colour type 2 (RGB), deflate, no filter method, no interlace
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    write_chunk(&mut out, b"IHDR", &ihdr)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    let mut line = Vec::with_capacity(1 + 3 * raster.width() as usize);
    for row in raster.rows() {
        line.clear();
        line.push(0);
        line.extend(row.iter().flat_map(|px| px.channels()));
        encoder.write_all(&line)?;
    }
    let idat = encoder.finish()?;
    for part in idat.chunks(IDAT_CHUNK) {
        write_chunk(&mut out, b"IDAT", part)?;
    }

    write_chunk(&mut out, b"IEND", &[])?;
    out.flush()
}

fn write_chunk<W: Write>(out: &mut W, kind: &[u8; 4], data: &[u8]) -> io::Result<()> {
    let len = u32::try_from(data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "PNG chunk too large"))?;
    out.write_all(&len.to_be_bytes())?;
    out.write_all(kind)?;
    out.write_all(data)?;
    let mut crc = crc32fast::Hasher::new();
    crc.update(kind);
    crc.update(data);
    out.write_all(&crc.finalize().to_be_bytes())
}

/// Writes `raster` as a binary (`P6`) PPM image.
///
/// # Errors
///
/// Returns any error of the underlying writer.
pub fn write_ppm<W: Write>(raster: &Raster, mut out: W) -> io::Result<()> {
    write!(out, "P6\n{} {}\n255\n", raster.width(), raster.height())?;
    for row in raster.rows() {
        let bytes: Vec<u8> = row.iter().flat_map(|px| px.channels()).collect();
        out.write_all(&bytes)?;
    }
    out.flush()
}
