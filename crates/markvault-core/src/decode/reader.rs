//! Byte-to-surface decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Tag};
use image::metadata::Orientation;
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::DecodeError;
use crate::surface::ImageSurface;

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes (JPEG, PNG, GIF or WebP)
///
/// # Returns
///
/// An RGBA `ImageSurface` at the image's natural (oriented) size.
///
/// # Errors
///
/// Returns `DecodeError::EmptyInput` for an empty slice.
/// Returns `DecodeError::UnsupportedFormat` for SVG documents.
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if the data is truncated or corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<ImageSurface, DecodeError> {
    let mut img = decode_dynamic(bytes)?;
    let orientation = get_orientation(bytes);
    img.apply_orientation(orientation);

    let surface = ImageSurface::from_rgba_image(img.into_rgba8());
    debug!(
        width = surface.width,
        height = surface.height,
        ?orientation,
        "decoded source image"
    );
    Ok(surface)
}

/// Decode an image from bytes, ignoring any EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<ImageSurface, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(ImageSurface::from_rgba_image(img.into_rgba8()))
}

/// Read the EXIF orientation tag.
///
/// Anything without a readable tag (no EXIF block, out-of-range value,
/// unparsable container) is treated as upright.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .and_then(|value| u8::try_from(value).ok())
        .and_then(Orientation::from_exif)
        .unwrap_or(Orientation::NoTransforms)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    if looks_like_svg(bytes) {
        return Err(DecodeError::UnsupportedFormat("svg".to_string()));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Check for an SVG document (optionally behind an XML prolog).
fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let head = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    let head = &head[start..];

    if head.starts_with(b"<svg") {
        return true;
    }
    head.starts_with(b"<?xml") && head.windows(4).any(|w| w == b"<svg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    /// Encode an image into the given container format.
    fn encode_fixture(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    /// A 16x8 JPEG: red left half, blue right half.
    fn split_jpeg() -> Vec<u8> {
        let img = RgbImage::from_fn(16, 8, |x, _| {
            if x < 8 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        encode_fixture(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
    }

    /// Splice a big-endian EXIF block carrying only an orientation tag into
    /// a JPEG, right after the SOI marker.
    fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
        let mut tiff = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
        tiff.extend_from_slice(&[0x00, 0x01]); // one IFD entry
        tiff.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0x00, 0x00]);
        tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // no next IFD

        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(&tiff);
        let length = (payload.len() + 2) as u16;

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(&payload);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    fn is_reddish(px: [u8; 4]) -> bool {
        px[0] > 150 && px[2] < 100
    }

    fn is_bluish(px: [u8; 4]) -> bool {
        px[2] > 150 && px[0] < 100
    }

    #[test]
    fn test_decode_jpeg() {
        let surface = decode_image(&split_jpeg()).unwrap();
        assert_eq!((surface.width, surface.height), (16, 8));
        assert_eq!(surface.pixels.len(), 16 * 8 * 4);
        // JPEG has no alpha
        assert!(surface.pixels.chunks_exact(4).all(|p| p[3] == 255));
        assert!(is_reddish(surface.pixel(2, 4).unwrap()));
        assert!(is_bluish(surface.pixel(13, 4).unwrap()));
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        let jpeg = with_exif_orientation(&split_jpeg(), 6);
        assert_eq!(get_orientation(&jpeg), Orientation::Rotate90);

        let surface = decode_image(&jpeg).unwrap();
        assert_eq!((surface.width, surface.height), (8, 16));
        // Rotated clockwise, the left half ends up on top
        assert!(is_reddish(surface.pixel(4, 2).unwrap()));
        assert!(is_bluish(surface.pixel(4, 13).unwrap()));

        let raw = decode_image_no_orientation(&jpeg).unwrap();
        assert_eq!((raw.width, raw.height), (16, 8));
    }

    #[test]
    fn test_decode_applies_exif_mirror() {
        let jpeg = with_exif_orientation(&split_jpeg(), 2);
        assert_eq!(get_orientation(&jpeg), Orientation::FlipHorizontal);

        let surface = decode_image(&jpeg).unwrap();
        assert_eq!((surface.width, surface.height), (16, 8));
        assert!(is_bluish(surface.pixel(2, 4).unwrap()));
        assert!(is_reddish(surface.pixel(13, 4).unwrap()));
    }

    #[test]
    fn test_out_of_range_orientation_is_upright() {
        let jpeg = with_exif_orientation(&split_jpeg(), 9);
        assert_eq!(get_orientation(&jpeg), Orientation::NoTransforms);
        assert_eq!(decode_image(&jpeg).unwrap().width, 16);
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(get_orientation(&split_jpeg()), Orientation::NoTransforms);
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::NoTransforms);
    }

    #[test]
    fn test_decode_png_preserves_rgba() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 1, Rgba([10, 20, 30, 40]));

        let png = encode_fixture(DynamicImage::ImageRgba8(img), ImageFormat::Png);
        let surface = decode_image(&png).unwrap();
        assert_eq!((surface.width, surface.height), (3, 2));
        assert_eq!(surface.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(2, 1), Some([10, 20, 30, 40]));
        assert_eq!(surface.pixel(1, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_decode_gif() {
        let img = RgbaImage::from_pixel(4, 5, Rgba([0, 0, 255, 255]));

        let gif = encode_fixture(DynamicImage::ImageRgba8(img), ImageFormat::Gif);
        let surface = decode_image(&gif).unwrap();
        assert_eq!((surface.width, surface.height), (4, 5));
        assert_eq!(surface.pixel(3, 4), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_decode_unrecognized_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::EmptyInput)));
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let jpeg = split_jpeg();
        let result = decode_image(&jpeg[..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_svg_is_unsupported() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;
        assert!(matches!(
            decode_image(svg),
            Err(DecodeError::UnsupportedFormat(_))
        ));

        let with_prolog = b"\xEF\xBB\xBF  <?xml version=\"1.0\"?>\n<svg></svg>";
        assert!(matches!(
            decode_image(with_prolog),
            Err(DecodeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_plain_xml_is_not_svg() {
        assert!(!looks_like_svg(b"<?xml version=\"1.0\"?><note/>"));
        assert!(matches!(
            decode_image(b"<?xml version=\"1.0\"?><note/>"),
            Err(DecodeError::InvalidFormat)
        ));
    }
}
