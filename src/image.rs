use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("can't read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("can't decode image: {0}")]
    Decode(#[from] image::ImageError),
}

enum Pixels {
    /// Baseline RGB JPEGs go into the PDF untouched
    Jpeg(Vec<u8>),
    Decoded(DynamicImage),
}

/// A raster image, registered once with a document and drawn on any number of
/// pages
pub struct Image {
    pixels: Pixels,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Image, ImageError> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!("loaded image {}", path.as_ref().display());
        Image::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Image, ImageError> {
        let format = image::guess_format(&data)?;
        let decoded = image::load_from_memory_with_format(&data, format)?;
        let (width, height) = decoded.dimensions();

        let pixels = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => Pixels::Jpeg(data),
            _ => Pixels::Decoded(decoded),
        };

        Ok(Image {
            pixels,
            width,
            height,
        })
    }

    pub fn from_decoded(image: DynamicImage) -> Image {
        let (width, height) = image.dimensions();
        Image {
            pixels: Pixels::Decoded(image),
            width,
            height,
        }
    }

    fn encode(&self) -> EncodeOutput {
        match &self.pixels {
            Pixels::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            Pixels::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}
