//! RGBA textures shared between sprite nodes.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to load texture {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decoded pixels, always RGBA8, row-major with the first row on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Texture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        log::debug!("Loading texture from {:?}", path);
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("Loaded texture {}x{} from {:?}", width, height, path);
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut rgba = Vec::with_capacity(count * 4);
        for _ in 0..count {
            rgba.extend_from_slice(&color);
        }
        Self { width, height, rgba }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn solid_fills_every_pixel() {
        let tex = Texture::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(tex.rgba.len(), 3 * 2 * 4);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(tex.pixel(x, y), Some([1, 2, 3, 4]));
            }
        }
    }

    #[test]
    fn pixel_outside_bounds_is_none() {
        let tex = Texture::solid(2, 2, [0, 0, 0, 255]);
        assert_eq!(tex.pixel(2, 0), None);
        assert_eq!(tex.pixel(0, 2), None);
    }

    #[test]
    fn decodes_png_bytes() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 128]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");

        let tex = Texture::from_bytes(&bytes).expect("decode png");
        assert_eq!((tex.width, tex.height), (2, 1));
        assert_eq!(tex.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(tex.pixel(1, 0), Some([0, 0, 255, 128]));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = Texture::from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, TextureError::Decode(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Texture::from_file("definitely/missing.png").unwrap_err();
        match err {
            TextureError::Load { path, .. } => {
                assert_eq!(path, PathBuf::from("definitely/missing.png"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
