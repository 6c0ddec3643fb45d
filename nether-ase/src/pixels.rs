//! Cel pixel payload decoding
//!
//! Raw cels store `width * height` RGBA pixels back to back. Compressed cels
//! store the same bytes as a zlib stream filling the rest of the chunk.

use miniz_oxide::inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus};

use crate::cursor::ByteCursor;
use crate::document::{CelSize, Color};
use crate::error::AseError;

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Byte length of a cel's decoded RGBA data
pub(crate) fn rgba_byte_len(size: CelSize) -> Result<usize, AseError> {
    size.pixel_count()
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(AseError::CelTooLarge {
            width: size.width,
            height: size.height,
        })
}

/// Reinterpret packed RGBA bytes as pixels
fn to_pixels(bytes: &[u8]) -> Vec<Color> {
    bytemuck::cast_slice::<u8, Color>(bytes).to_vec()
}

/// Read `size.pixel_count()` uncompressed pixels
pub fn read_raw_pixels(cursor: &mut ByteCursor<'_>, size: CelSize) -> Result<Vec<Color>, AseError> {
    let len = rgba_byte_len(size)?;
    let bytes = cursor.read_bytes(len)?;
    Ok(to_pixels(bytes))
}

/// Inflate a zlib stream into exactly `size.pixel_count()` pixels
///
/// Output is capped at the expected size, so an oversized stream is
/// rejected without allocating past it.
pub fn inflate_pixels(compressed: &[u8], size: CelSize) -> Result<Vec<Color>, AseError> {
    let expected = rgba_byte_len(size)?;
    let inflated = match decompress_to_vec_zlib_with_limit(compressed, expected) {
        Ok(bytes) => bytes,
        Err(e) if e.status == TINFLStatus::HasMoreOutput => {
            return Err(AseError::InflateOverflow { expected });
        }
        Err(e) => return Err(AseError::Inflate(format!("{:?}", e.status))),
    };

    if inflated.len() != expected {
        return Err(AseError::InflatedSizeMismatch {
            expected,
            actual: inflated.len(),
        });
    }

    Ok(to_pixels(&inflated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::deflate::compress_to_vec_zlib;

    const SIZE_2X1: CelSize = CelSize {
        width: 2,
        height: 1,
    };

    #[test]
    fn test_raw_pixels_consume_exact_bytes() {
        let data = [255, 0, 0, 255, 0, 255, 0, 128, 0xAA];
        let mut cursor = ByteCursor::new(&data);
        let pixels = read_raw_pixels(&mut cursor, SIZE_2X1).unwrap();
        assert_eq!(
            pixels,
            vec![Color::rgba(255, 0, 0, 255), Color::rgba(0, 255, 0, 128)]
        );
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_raw_pixels_truncated() {
        let data = [1, 2, 3, 4, 5];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            read_raw_pixels(&mut cursor, SIZE_2X1),
            Err(AseError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_inflate_pixels() {
        let raw = [10, 20, 30, 40, 50, 60, 70, 80];
        let compressed = compress_to_vec_zlib(&raw, 6);
        let pixels = inflate_pixels(&compressed, SIZE_2X1).unwrap();
        assert_eq!(
            pixels,
            vec![Color::rgba(10, 20, 30, 40), Color::rgba(50, 60, 70, 80)]
        );
    }

    #[test]
    fn test_inflate_too_short() {
        let compressed = compress_to_vec_zlib(&[1, 2, 3, 4], 6);
        assert_eq!(
            inflate_pixels(&compressed, SIZE_2X1),
            Err(AseError::InflatedSizeMismatch {
                expected: 8,
                actual: 4
            })
        );
    }

    #[test]
    fn test_inflate_too_long() {
        let compressed = compress_to_vec_zlib(&[0u8; 12], 6);
        assert_eq!(
            inflate_pixels(&compressed, SIZE_2X1),
            Err(AseError::InflateOverflow { expected: 8 })
        );
    }

    #[test]
    fn test_inflate_garbage() {
        let result = inflate_pixels(&[0xFF, 0xFF, 0xFF, 0xFF], SIZE_2X1);
        assert!(matches!(result, Err(AseError::Inflate(_))));
    }
}
