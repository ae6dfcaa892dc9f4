//! Image and audio uploads: reading, type sniffing, size checks, base64 encoding.
//!
//! Uploads are capped at [`MAX_UPLOAD_BYTES`] before any request is made. The type is
//! taken from the file's magic bytes first and its extension second. Images must also
//! decode, so a renamed text file is never sent as a picture.

use std::fs;
use std::io;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use image::ImageFormat;

/// Largest accepted upload (4 MiB, exclusive).
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Errors when loading an upload from disk.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("could not read '{0}': {1}")]
    Io(String, #[source] io::Error),
    #[error("'{0}' is empty")]
    Empty(String),
    #[error("'{path}' is {size} bytes; uploads must be under 4 MiB")]
    TooLarge { path: String, size: usize },
    #[error("'{0}' is not a readable png, jpeg, gif or webp image")]
    UnsupportedImage(String),
    #[error("unsupported audio format for '{0}' (expected wav, mp3, aiff, aac, ogg or flac)")]
    UnsupportedAudio(String),
}

/// Image ready to be sent as a data URL.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// MIME type, e.g. `"image/png"`.
    pub mime_type: &'static str,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// `data:<mime>;base64,<data>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, B64.encode(&self.bytes))
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Audio clip ready to be sent as an `input_audio` part.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    /// Short format name, e.g. `"wav"`.
    pub format: &'static str,
    bytes: Vec<u8>,
}

impl AudioUpload {
    pub fn to_base64(&self) -> String {
        B64.encode(&self.bytes)
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

fn read_upload(path: &Path) -> Result<Vec<u8>, MediaError> {
    fs::read(path).map_err(|e| MediaError::Io(path.display().to_string(), e))
}

fn check_size(name: &str, bytes: &[u8]) -> Result<(), MediaError> {
    if bytes.is_empty() {
        return Err(MediaError::Empty(name.to_string()));
    }
    if bytes.len() >= MAX_UPLOAD_BYTES {
        return Err(MediaError::TooLarge {
            path: name.to_string(),
            size: bytes.len(),
        });
    }
    Ok(())
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load and validate an image file.
pub fn load_image(path: &Path) -> Result<ImageUpload, MediaError> {
    let bytes = read_upload(path)?;
    image_from_bytes(path, bytes)
}

/// Validate in-memory image bytes. `hint_path` is used for the extension fallback and errors.
pub fn image_from_bytes(hint_path: &Path, bytes: Vec<u8>) -> Result<ImageUpload, MediaError> {
    let name = hint_path.display().to_string();
    check_size(&name, &bytes)?;
    let Some(format) = image::guess_format(&bytes)
        .ok()
        .or_else(|| image_format_from_extension(&extension(hint_path)))
    else {
        return Err(MediaError::UnsupportedImage(name));
    };
    let Some(mime_type) = image_mime(format) else {
        return Err(MediaError::UnsupportedImage(name));
    };
    if let Err(e) = image::load_from_memory_with_format(&bytes, format) {
        log::debug!("Image {} does not decode as {:?}: {}", name, format, e);
        return Err(MediaError::UnsupportedImage(name));
    }
    log::debug!("Image {} ({} bytes, {})", hint_path.display(), bytes.len(), mime_type);
    Ok(ImageUpload { mime_type, bytes })
}

/// Load and validate an audio file.
pub fn load_audio(path: &Path) -> Result<AudioUpload, MediaError> {
    let bytes = read_upload(path)?;
    audio_from_bytes(path, bytes)
}

/// Validate in-memory audio bytes. `hint_path` is used for the extension fallback and errors.
pub fn audio_from_bytes(hint_path: &Path, bytes: Vec<u8>) -> Result<AudioUpload, MediaError> {
    let name = hint_path.display().to_string();
    check_size(&name, &bytes)?;
    let format = sniff_audio(&bytes)
        .or_else(|| audio_format_from_extension(&extension(hint_path)))
        .ok_or(MediaError::UnsupportedAudio(name))?;
    log::debug!("Audio {} ({} bytes, {})", hint_path.display(), bytes.len(), format);
    Ok(AudioUpload { format, bytes })
}

fn image_format_from_extension(ext: &str) -> Option<ImageFormat> {
    match ext {
        "png" => Some(ImageFormat::Png),
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        "gif" => Some(ImageFormat::Gif),
        "webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

/// MIME type for the formats the model accepts; `None` for anything else `guess_format` knows.
fn image_mime(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

fn sniff_audio(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
        return Some("wav");
    }
    if bytes.len() >= 12 && &bytes[..4] == b"FORM" && &bytes[8..11] == b"AIF" {
        return Some("aiff");
    }
    if bytes.starts_with(b"fLaC") {
        return Some("flac");
    }
    if bytes.starts_with(b"OggS") {
        return Some("ogg");
    }
    if bytes.starts_with(b"ID3") {
        return Some("mp3");
    }
    match bytes {
        // ADTS sync word with layer bits 00.
        [0xFF, b, ..] if b & 0xF6 == 0xF0 => Some("aac"),
        // MPEG audio frame sync.
        [0xFF, b, ..] if b & 0xE0 == 0xE0 => Some("mp3"),
        _ => None,
    }
}

fn audio_format_from_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "wav" => Some("wav"),
        "mp3" => Some("mp3"),
        "aif" | "aiff" => Some("aiff"),
        "aac" => Some("aac"),
        "ogg" | "oga" => Some("ogg"),
        "flac" => Some("flac"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([200, 40, 40]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, format)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn png_is_sniffed_regardless_of_extension() {
        let img = image_from_bytes(&PathBuf::from("photo.txt"), encoded(ImageFormat::Png)).unwrap();
        assert_eq!(img.mime_type, "image/png");
    }

    #[test]
    fn jpeg_is_sniffed_under_png_name() {
        let img = image_from_bytes(&PathBuf::from("board.png"), encoded(ImageFormat::Jpeg)).unwrap();
        assert_eq!(img.mime_type, "image/jpeg");
    }

    #[test]
    fn image_extension_does_not_rescue_text() {
        let err = image_from_bytes(&PathBuf::from("board.jpg"), b"this is not an image".to_vec())
            .unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedImage(_)));
    }

    #[test]
    fn truncated_png_is_rejected() {
        let mut bytes = encoded(ImageFormat::Png);
        bytes.truncate(24);
        let err = image_from_bytes(&PathBuf::from("cut.png"), bytes).unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedImage(_)));
    }

    #[test]
    fn unknown_image_is_rejected() {
        let err = image_from_bytes(&PathBuf::from("notes.md"), b"# notes".to_vec()).unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedImage(_)));
    }

    #[test]
    fn empty_upload_is_rejected() {
        let err = image_from_bytes(&PathBuf::from("a.png"), Vec::new()).unwrap_err();
        assert!(matches!(err, MediaError::Empty(_)));
    }

    #[test]
    fn upload_at_limit_is_rejected() {
        let mut bytes = encoded(ImageFormat::Png);
        bytes.resize(MAX_UPLOAD_BYTES, 0);
        let err = image_from_bytes(&PathBuf::from("big.png"), bytes).unwrap_err();
        match err {
            MediaError::TooLarge { size, .. } => assert_eq!(size, MAX_UPLOAD_BYTES),
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn upload_just_under_limit_passes_size_check() {
        assert!(check_size("big.wav", &vec![1; MAX_UPLOAD_BYTES - 1]).is_ok());
    }

    #[test]
    fn data_url_has_mime_prefix() {
        let img = image_from_bytes(&PathBuf::from("x.png"), encoded(ImageFormat::Png)).unwrap();
        assert!(img.data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn wav_and_mp3_are_sniffed() {
        let wav = audio_from_bytes(&PathBuf::from("a.bin"), b"RIFF\0\0\0\0WAVEfmt ".to_vec());
        assert_eq!(wav.unwrap().format, "wav");
        let mp3 = audio_from_bytes(&PathBuf::from("a.bin"), b"ID3\x04\0".to_vec());
        assert_eq!(mp3.unwrap().format, "mp3");
        let adts = audio_from_bytes(&PathBuf::from("a.bin"), vec![0xFF, 0xF1, 0x50]);
        assert_eq!(adts.unwrap().format, "aac");
    }

    #[test]
    fn unknown_audio_is_rejected() {
        let err = audio_from_bytes(&PathBuf::from("clip.xyz"), b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedAudio(_)));
    }

    #[test]
    fn load_image_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let png = encoded(ImageFormat::Png);
        std::fs::write(&path, &png).unwrap();
        let img = load_image(&path).unwrap();
        assert_eq!(img.size_bytes(), png.len());
    }

    #[test]
    fn load_image_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, MediaError::Io(_, _)));
    }
}
