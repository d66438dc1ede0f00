use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::ExtendedColorType;
use kernel::{DataUrl, ProcessedFile};

use crate::error::Error;

/// Longest image side after reduction. Larger images are downscaled
/// uniformly, smaller ones are never upscaled.
pub const MAX_DIMENSION: u32 = 1200;

/// Fixed quality factor for the JPEG re-encode.
pub const JPEG_QUALITY: u8 = 70;

const TEXT_FACTOR: f64 = 0.4;
const DOCUMENT_FACTOR: f64 = 0.6;
const DEFAULT_FACTOR: f64 = 0.7;

/// One input file as handed over by an upload.
///
/// The declared media type is trusted: a mislabeled file is processed as
/// labeled, no deep validation happens here.
pub struct SourceFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Transforms one input file into a fully populated record.
///
/// Media types starting with `image/` are decoded, downscaled to at most
/// [`MAX_DIMENSION`] on the longer side and re-encoded as JPEG; the reported
/// size is derived from the re-encoded payload length. Every other input
/// keeps its bytes verbatim in the payload while the reported size is a
/// simulated estimate keyed off the media type. The simulation is a
/// documented placeholder, not real compression.
pub fn reduce(source: &SourceFile) -> Result<ProcessedFile, Error> {
    let original_size = source.bytes.len() as u64;
    let (payload, compressed_size) = if source.media_type.starts_with("image/") {
        reduce_image(&source.bytes)?
    } else {
        simulate(&source.media_type, &source.bytes, original_size)
    };
    Ok(ProcessedFile::new(
        &source.name,
        original_size,
        compressed_size,
        payload,
    ))
}

fn reduce_image(bytes: &[u8]) -> Result<(DataUrl, u64), Error> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let (width, height) = (img.width(), img.height());
    let (target_width, target_height) = target_dimensions(width, height);
    let img = if (target_width, target_height) == (width, height) {
        img
    } else {
        img.resize_exact(target_width, target_height, FilterType::Triangle)
    };

    // JPEG carries no alpha channel
    let rgb = img.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| Error::Decode(e.to_string()))?;

    let payload = DataUrl::encode("image/jpeg", &encoded);
    let compressed_size = payload.effective_len();
    Ok((payload, compressed_size))
}

/// Uniform downscale so the longer side fits [`MAX_DIMENSION`].
fn target_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
        return (width, height);
    }
    if width > height {
        let scaled = f64::from(height) * f64::from(MAX_DIMENSION) / f64::from(width);
        (MAX_DIMENSION, (scaled.round() as u32).max(1))
    } else {
        let scaled = f64::from(width) * f64::from(MAX_DIMENSION) / f64::from(height);
        ((scaled.round() as u32).max(1), MAX_DIMENSION)
    }
}

fn simulate(media_type: &str, bytes: &[u8], original_size: u64) -> (DataUrl, u64) {
    let factor = if ["text", "json", "javascript"]
        .iter()
        .any(|m| media_type.contains(m))
    {
        TEXT_FACTOR
    } else if media_type.contains("pdf") || media_type.contains("document") {
        DOCUMENT_FACTOR
    } else {
        DEFAULT_FACTOR
    };
    let payload = DataUrl::encode(media_type, bytes);
    let compressed_size = (original_size as f64 * factor).round() as u64;
    (payload, compressed_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn source(name: &str, media_type: &str, bytes: Vec<u8>) -> SourceFile {
        SourceFile {
            name: name.to_owned(),
            media_type: media_type.to_owned(),
            bytes,
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 30, 200]),
        ));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn reduce_text_file_simulates_size() {
        // Arrange
        let input = source("notes.txt", "text/plain", vec![b'a'; 100_000]);

        // Act
        let record = reduce(&input).unwrap();

        // Assert
        assert_eq!(record.original_size, 100_000);
        assert_eq!(record.compressed_size, 40_000);
        assert_eq!(record.file_type, "Text File");
        assert!((record.compression_ratio - 60.0).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case("text/plain", 1000, 400)]
    #[case("application/json", 1000, 400)]
    #[case("text/javascript", 1000, 400)]
    #[case("application/pdf", 1000, 600)]
    #[case("application/vnd.document", 1000, 600)]
    #[case("application/zip", 1000, 700)]
    #[case("", 1000, 700)]
    #[case("audio/mpeg", 999, 699)]
    #[trace]
    fn simulated_size_follows_factor_table(
        #[case] media_type: &str,
        #[case] size: usize,
        #[case] expected: u64,
    ) {
        // Arrange
        let input = source("file.bin", media_type, vec![0_u8; size]);

        // Act
        let record = reduce(&input).unwrap();

        // Assert
        assert_eq!(record.compressed_size, expected);
    }

    #[test]
    fn reduce_zero_byte_file_has_zero_ratio() {
        // Arrange
        let input = source("empty.txt", "text/plain", Vec::new());

        // Act
        let record = reduce(&input).unwrap();

        // Assert
        assert_eq!(record.original_size, 0);
        assert_eq!(record.compressed_size, 0);
        assert!((record.compression_ratio - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn generic_payload_reconstructs_input() {
        // Arrange
        let bytes = b"%PDF-1.4 not really a pdf but bytes all the same".to_vec();
        let input = source("doc.pdf", "application/pdf", bytes.clone());

        // Act
        let record = reduce(&input).unwrap();

        // Assert
        let (media_type, decoded) = record.payload.decode().unwrap();
        assert_eq!(media_type, "application/pdf");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn reduce_large_image_downscales_to_limit() {
        // Arrange
        let input = source("photo.png", "image/png", png_bytes(2400, 1200));

        // Act
        let record = reduce(&input).unwrap();

        // Assert
        let (media_type, jpeg) = record.payload.decode().unwrap();
        assert_eq!(media_type, "image/jpeg");
        let img = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(img.width(), 1200);
        assert_eq!(img.height(), 600);
        assert_eq!(record.compressed_size, record.payload.effective_len());
    }

    #[test]
    fn reduce_small_image_keeps_dimensions() {
        // Arrange
        let input = source("icon.png", "image/png", png_bytes(640, 480));

        // Act
        let record = reduce(&input).unwrap();

        // Assert
        let (_, jpeg) = record.payload.decode().unwrap();
        let img = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(img.width(), 640);
        assert_eq!(img.height(), 480);
    }

    #[test]
    fn reduce_corrupt_image_fails_with_decode_error() {
        // Arrange
        let input = source("broken.png", "image/png", b"definitely not a png".to_vec());

        // Act
        let result = reduce(&input);

        // Assert
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[rstest]
    #[case(800, 600, 800, 600)]
    #[case(1200, 1200, 1200, 1200)]
    #[case(2400, 1200, 1200, 600)]
    #[case(1200, 2400, 600, 1200)]
    #[case(4800, 100, 1200, 25)]
    #[case(100_000, 1, 1200, 1)]
    #[trace]
    fn target_dimensions_cases(
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected_width: u32,
        #[case] expected_height: u32,
    ) {
        // Arrange

        // Act
        let (w, h) = target_dimensions(width, height);

        // Assert
        assert_eq!((w, h), (expected_width, expected_height));
    }
}
