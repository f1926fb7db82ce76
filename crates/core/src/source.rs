//! Image sources: where rendered character bitmaps come from.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use glob::glob;
use image::RgbaImage;
use log::{debug, warn};
use reqwest::blocking::Client;

/// Why a character image could not be acquired.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to read '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The source has no rendering for this character.
    #[error("no image available for {0:?}")]
    Unrenderable(char),
}

/// Supplies one decoded bitmap per character.
///
/// Implementations are called sequentially, one character at a time.
pub trait ImageSource {
    fn fetch(&self, ch: char) -> Result<RgbaImage, SourceError>;
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn fetch(&self, ch: char) -> Result<RgbaImage, SourceError> {
        (**self).fetch(ch)
    }
}

/// Fetches renderings from an HTTP endpoint:
/// `GET <base>?char=<c>&size=<render size>`, answered with an encoded image.
pub struct HttpImageSource {
    client: Client,
    base_url: String,
    render_size: u32,
}

impl HttpImageSource {
    pub fn new(base_url: impl Into<String>, render_size: u32) -> Self {
        Self { client: Client::new(), base_url: base_url.into(), render_size }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for HttpImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpImageSource")
            .field("base_url", &self.base_url)
            .field("render_size", &self.render_size)
            .finish()
    }
}

impl ImageSource for HttpImageSource {
    fn fetch(&self, ch: char) -> Result<RgbaImage, SourceError> {
        let size = self.render_size.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("char", ch.to_string().as_str()), ("size", size.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let bytes = response.bytes()?;
        debug!("Fetched {ch:?} ({} bytes)", bytes.len());
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}

/// Reads pre-rendered PNGs named `U+XXXX.png` from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryImageSource {
    dir: PathBuf,
}

impl DirectoryImageSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a character: upper-case hex, at least four digits.
    pub fn file_name(ch: char) -> String {
        format!("U+{:04X}.png", u32::from(ch))
    }

    pub fn path_for(&self, ch: char) -> PathBuf {
        self.dir.join(Self::file_name(ch))
    }

    /// Every character with an image in the directory, in code point order.
    pub fn charset(&self) -> Result<Vec<char>, SourceError> {
        let pattern = self.dir.join("U+*.png");
        let mut chars = Vec::new();

        for entry in glob(&pattern.to_string_lossy())? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            let parsed = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.strip_prefix("U+"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .and_then(char::from_u32);
            match parsed {
                Some(ch) => chars.push(ch),
                None => warn!("Ignoring {}: not a code point file name", path.display()),
            }
        }

        chars.sort_unstable();
        chars.dedup();
        Ok(chars)
    }
}

impl ImageSource for DirectoryImageSource {
    fn fetch(&self, ch: char) -> Result<RgbaImage, SourceError> {
        let path = self.path_for(ch);
        let bytes =
            std::fs::read(&path).map_err(|source| SourceError::Io { path: path.clone(), source })?;
        debug!("Read {}", path.display());
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(DirectoryImageSource::file_name('A'), "U+0041.png");
        assert_eq!(DirectoryImageSource::file_name(' '), "U+0020.png");
        assert_eq!(DirectoryImageSource::file_name('😀'), "U+1F600.png");
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        image.save(dir.path().join("U+0042.png")).unwrap();
        image.save(dir.path().join("U+0041.png")).unwrap();
        std::fs::write(dir.path().join("U+ZZZZ.png"), b"not a png").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let source = DirectoryImageSource::new(dir.path());
        assert_eq!(source.charset().unwrap(), vec!['A', 'B']);

        let fetched = source.fetch('A').unwrap();
        assert_eq!(fetched.dimensions(), (3, 2));
        assert_eq!(fetched.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));

        assert!(matches!(source.fetch('C'), Err(SourceError::Io { .. })));
    }

    #[test]
    fn test_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("U+0041.png"), b"not a png").unwrap();
        let source = DirectoryImageSource::new(dir.path());
        assert!(matches!(source.fetch('A'), Err(SourceError::Decode(_))));
    }
}
