use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glium::backend::Facade;
use glium::texture::{RawImage2d, SrgbTexture2d};
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// A decoded image held in CPU memory as RGBA, ready to upload.
#[derive(Clone, Debug)]
pub struct Texture {
    image: RgbaImage,
}

impl Texture {
    /// Loads and decodes an image file. The format is picked from the
    /// file extension.
    pub fn from_path(path: &Path) -> Result<Texture> {
        let image = load_image(path)?.to_rgba8();
        log::debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Texture { image })
    }

    pub fn from_image(image: RgbaImage) -> Texture {
        Texture { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Uploads the image to the GPU. Rows are flipped so the first
    /// pixel row lands at texture coordinate v = 0.
    pub fn upload<F: Facade>(&self, facade: &F) -> SrgbTexture2d {
        let dimensions = self.image.dimensions();
        let raw_image =
            RawImage2d::from_raw_rgba_reversed(&self.image.clone().into_raw(), dimensions);
        SrgbTexture2d::new(facade, raw_image).expect("Failed to create texture!")
    }
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    let format = match extension.as_str() {
        "png" => ImageFormat::Png,
        "jpg" | "jpeg" => ImageFormat::Jpeg,
        "gif" => ImageFormat::Gif,
        "webp" => ImageFormat::WebP,
        "pnm" | "pbm" | "pgm" | "ppm" => ImageFormat::Pnm,
        "tiff" | "tif" => ImageFormat::Tiff,
        "tga" => ImageFormat::Tga,
        "bmp" => ImageFormat::Bmp,
        "ico" => ImageFormat::Ico,
        "hdr" => ImageFormat::Hdr,
        _ => return Err(Error::UnsupportedImageFormat(extension)),
    };
    let reader = BufReader::new(File::open(path)?);
    image::load(reader, format).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let err = Texture::from_path(Path::new("texture.xyz")).unwrap_err();
        match err {
            Error::UnsupportedImageFormat(ext) => assert_eq!(ext, "xyz"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = Texture::from_path(Path::new("/no/such/texture.png")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn wrapped_image_keeps_its_dimensions() {
        let texture = Texture::from_image(RgbaImage::new(4, 2));
        assert_eq!(texture.width(), 4);
        assert_eq!(texture.height(), 2);
        assert_eq!(texture.image().dimensions(), (4, 2));
    }
}
