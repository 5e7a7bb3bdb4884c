/*! Decoded CPU-side images and the resource lookup that produces them.

This is the front half of the texture pipeline: an [`ImageSource`] names
where the bytes live, a [`ResourceBundle`] resolves bundled names against a
directory on disk, and [`ImageData`] holds the decoded pixel rows plus the
metadata a texture upload needs (dimensions and vertical orientation).

Decoding supports PNG and JPEG. Rows are stored top-down in row-major
order, which is why the loader reports `flipped() == false` for both
formats; procedurally built images can claim otherwise via
[`ImageData::set_flipped`].

# Example

```
use billboard::bindings::software::image::{ImageData, Texel};
use billboard::pixel_formats::R8UNorm;

// A 4x4 horizontal gradient
let image = ImageData::<R8UNorm>::new_with(4, 4, |texel| (texel.x * 64) as u8);
assert_eq!(image.width(), 4);
assert!(!image.flipped());
```
*/

use crate::pixel_formats::RGBA8UnormSRGB;
use crate::pixel_formats::png_support::PngPixelFormat;
use crate::pixel_formats::sealed::PixelFormat;
use std::path::{Path, PathBuf};

/// Resource name used when a bundled lookup passes an empty name.
pub const DEFAULT_RESOURCE_NAME: &str = "Default";
/// File extension used when a bundled lookup passes an empty extension.
pub const DEFAULT_RESOURCE_EXT: &str = "jpg";

/// Integer pixel coordinates within an image.
///
/// Origin (0, 0) is at the top-left; x increases to the right, y downward.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Texel {
    pub x: u16,
    pub y: u16,
}

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// An absolute (or caller-relative) filesystem path.
    Path(PathBuf),
    /// A `(name, extension)` pair resolved against a [`ResourceBundle`].
    Bundled { name: String, ext: String },
}

impl ImageSource {
    /// A bundled source, substituting [`DEFAULT_RESOURCE_NAME`] /
    /// [`DEFAULT_RESOURCE_EXT`] for empty components.
    pub fn bundled(name: &str, ext: &str) -> Self {
        let name = if name.is_empty() {
            DEFAULT_RESOURCE_NAME
        } else {
            name
        };
        let ext = if ext.is_empty() {
            DEFAULT_RESOURCE_EXT
        } else {
            ext
        };
        ImageSource::Bundled {
            name: name.to_string(),
            ext: ext.to_string(),
        }
    }

    /// Resolves this source to a concrete path.
    ///
    /// An empty path fails with [`LoadError::InvalidSource`] before any IO; a
    /// bundled pair that resolves to nothing fails with
    /// [`LoadError::NotFound`].
    pub fn resolve(&self, bundle: &ResourceBundle) -> Result<PathBuf, LoadError> {
        match self {
            ImageSource::Path(path) => {
                if path.as_os_str().is_empty() {
                    Err(LoadError::InvalidSource)
                } else {
                    Ok(path.clone())
                }
            }
            ImageSource::Bundled { name, ext } => bundle.locate(name, ext),
        }
    }
}

/// A directory of named resources, the stand-in for an application bundle.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    root: PathBuf,
}

impl ResourceBundle {
    /// A bundle rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The main bundle: the directory containing the running executable,
    /// falling back to the current directory.
    pub fn main() -> Self {
        let root = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self { root }
    }

    /// Returns the path of `name.ext` inside the bundle, substituting the
    /// defaults for empty components.
    ///
    /// Fails with [`LoadError::NotFound`] if no such file exists.
    pub fn locate(&self, name: &str, ext: &str) -> Result<PathBuf, LoadError> {
        let name = if name.is_empty() {
            DEFAULT_RESOURCE_NAME
        } else {
            name
        };
        let ext = if ext.is_empty() { DEFAULT_RESOURCE_EXT } else { ext };
        let path = self.root.join(format!("{name}.{ext}"));
        if path.is_file() {
            Ok(path)
        } else {
            Err(LoadError::NotFound { path })
        }
    }
}

/// Errors produced while resolving or decoding an image.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("no image resource at {path}", path = .path.display())]
    NotFound { path: PathBuf },
    #[error("cannot decode image bytes: {0}")]
    Decode(String),
    #[error("empty path or resource name where one is required")]
    InvalidSource,
    #[error("error reading image bytes: {0}")]
    Io(String),
}

/// A decoded image: pixel rows plus the metadata a texture upload needs.
///
/// Immutable once produced (aside from the orientation flag); consumed by
/// exactly one texture finalize.
#[derive(Debug)]
pub struct ImageData<Format: PixelFormat> {
    data: Vec<Format::CPixel>,
    width: u16,
    height: u16,
    flipped: bool,
}

impl<Format: PixelFormat> ImageData<Format> {
    /// Builds an image procedurally, one pixel at a time.
    pub fn new_with<F: Fn(Texel) -> Format::CPixel>(
        width: u16,
        height: u16,
        initialize_with: F,
    ) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(initialize_with(Texel { x, y }));
            }
        }
        Self {
            data,
            width,
            height,
            flipped: false,
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// True when pixel rows are stored bottom-up.
    ///
    /// The built-in decoders always store top-down and report `false`.
    #[inline]
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Declares the stored rows to be bottom-up (or not).
    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    /// True when the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Pixel rows in row-major order, suitable for direct upload.
    #[inline]
    pub(crate) fn texture_data(&self) -> &[Format::CPixel] {
        &self.data
    }

    /// Decodes PNG bytes whose layout matches this pixel format exactly.
    pub fn from_png_bytes(data: &[u8]) -> Result<Self, LoadError>
    where
        Format: PngPixelFormat,
    {
        let decoder = png::Decoder::new(std::io::Cursor::new(data));
        let mut reader = decoder
            .read_info()
            .map_err(|e| LoadError::Decode(e.to_string()))?;
        {
            let info = reader.info();
            if info.color_type != Format::png_color_type()
                || info.bit_depth != Format::png_bit_depth()
            {
                return Err(LoadError::Decode(format!(
                    "unsupported png layout {:?}/{:?}",
                    info.color_type, info.bit_depth
                )));
            }
        }
        //allocate an output buffer that is correctly-aligned for the pixel type
        let vec_capacity = reader.info().width as usize * reader.info().height as usize;
        let mut buf = Vec::<Format::CPixel>::with_capacity(vec_capacity);
        let num_bytes = buf.capacity() * std::mem::size_of::<Format::CPixel>();
        if num_bytes < reader.output_buffer_size().unwrap_or(usize::MAX) {
            return Err(LoadError::Decode(
                "png frame larger than its declared dimensions".to_string(),
            ));
        }
        //get a slice to the raw bytes
        let byte_slice = unsafe {
            std::slice::from_raw_parts_mut(buf.as_mut_ptr() as *mut u8, num_bytes)
        };
        let info = reader
            .next_frame(byte_slice)
            .map_err(|e| LoadError::Decode(e.to_string()))?;
        let actual_elements = info.width as usize * info.height as usize;
        //safe: next_frame fully initialized these elements and ReprC
        //guarantees the layout matches
        unsafe { buf.set_len(actual_elements) };

        let width: u16 = info
            .width
            .try_into()
            .map_err(|_| LoadError::Decode("image width exceeds u16".to_string()))?;
        let height: u16 = info
            .height
            .try_into()
            .map_err(|_| LoadError::Decode("image height exceeds u16".to_string()))?;
        Ok(Self {
            data: buf,
            width,
            height,
            flipped: false,
        })
    }
}

impl ImageData<RGBA8UnormSRGB> {
    /// Decodes JPEG bytes into RGBA rows.
    pub fn from_jpeg_bytes(data: &[u8]) -> Result<Self, LoadError> {
        let decoded = image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
            .map_err(|e| LoadError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let width: u16 = width
            .try_into()
            .map_err(|_| LoadError::Decode("image width exceeds u16".to_string()))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| LoadError::Decode("image height exceeds u16".to_string()))?;
        let data = rgba
            .into_raw()
            .chunks_exact(4)
            .map(|px| crate::pixel_formats::RGBA8UnormSRGBPixel {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            })
            .collect();
        Ok(Self {
            data,
            width,
            height,
            flipped: false,
        })
    }

    /// Decodes bytes by sniffing the container format.
    pub fn from_bytes(data: &[u8]) -> Result<Self, LoadError> {
        const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
        if data.starts_with(&PNG_MAGIC) {
            Self::from_png_bytes(data)
        } else if data.starts_with(&JPEG_MAGIC) {
            Self::from_jpeg_bytes(data)
        } else {
            Err(LoadError::Decode(
                "bytes are neither png nor jpeg".to_string(),
            ))
        }
    }

    /// Resolves `source`, reads its bytes, and decodes them.
    ///
    /// The only suspension point in the crate: the file read awaits on
    /// `async_file`.  Everything after the read runs synchronously on the
    /// caller's thread.
    pub async fn load(
        source: &ImageSource,
        bundle: &ResourceBundle,
        priority: async_file::Priority,
    ) -> Result<Self, LoadError> {
        let path = source.resolve(bundle)?;
        let file = async_file::File::open(&path, priority)
            .await
            .map_err(|_| LoadError::NotFound { path: path.clone() })?;
        let data = file
            .read_all(priority)
            .await
            .map_err(|e| LoadError::Io(e.to_string()))?;
        Self::from_bytes(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_formats::RGBA8UnormSRGBPixel;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            let mut rows = Vec::new();
            for y in 0..height {
                for x in 0..width {
                    rows.extend_from_slice(&[x as u8, y as u8, 7, 255]);
                }
            }
            writer.write_image_data(&rows).unwrap();
        }
        out
    }

    #[test]
    fn bundled_defaults() {
        assert_eq!(
            ImageSource::bundled("", ""),
            ImageSource::Bundled {
                name: "Default".to_string(),
                ext: "jpg".to_string()
            }
        );
        assert_eq!(
            ImageSource::bundled("road", "png"),
            ImageSource::Bundled {
                name: "road".to_string(),
                ext: "png".to_string()
            }
        );
    }

    #[test]
    fn empty_path_is_invalid_source() {
        let bundle = ResourceBundle::new(std::env::temp_dir());
        let err = ImageSource::Path(PathBuf::new()).resolve(&bundle);
        assert!(matches!(err, Err(LoadError::InvalidSource)));
    }

    #[test]
    fn missing_bundled_resource_is_not_found() {
        let bundle = ResourceBundle::new(std::env::temp_dir().join("no_such_bundle_dir"));
        let err = bundle.locate("", "");
        match err {
            Err(LoadError::NotFound { path }) => {
                assert!(path.ends_with("Default.jpg"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn decode_png_roundtrip() {
        let bytes = encode_png(4, 3);
        let image = ImageData::<RGBA8UnormSRGB>::from_bytes(&bytes).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert!(!image.flipped());
        assert_eq!(
            image.texture_data()[1],
            RGBA8UnormSRGBPixel {
                r: 1,
                g: 0,
                b: 7,
                a: 255
            }
        );
    }

    #[test]
    fn garbage_bytes_fail_decode() {
        let err = ImageData::<RGBA8UnormSRGB>::from_bytes(&[0u8; 64]);
        assert!(matches!(err, Err(LoadError::Decode(_))));
    }

    #[test]
    fn load_from_path() {
        let dir = std::env::temp_dir().join("billboard_image_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gradient.png");
        std::fs::write(&path, encode_png(8, 8)).unwrap();

        let bundle = ResourceBundle::new(&dir);
        let source = ImageSource::Path(path);
        let image = test_executors::spin_on(ImageData::<RGBA8UnormSRGB>::load(
            &source,
            &bundle,
            async_file::Priority::unit_test(),
        ))
        .unwrap();
        assert_eq!(image.width(), 8);
    }

    #[test]
    fn load_bundled_resource() {
        let dir = std::env::temp_dir().join("billboard_bundle_tests");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("road.png"), encode_png(2, 2)).unwrap();

        let bundle = ResourceBundle::new(&dir);
        let source = ImageSource::bundled("road", "png");
        let image = test_executors::spin_on(ImageData::<RGBA8UnormSRGB>::load(
            &source,
            &bundle,
            async_file::Priority::unit_test(),
        ))
        .unwrap();
        assert_eq!(image.height(), 2);
    }
}
