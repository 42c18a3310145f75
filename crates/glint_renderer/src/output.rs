//! Image sinks.
//!
//! A [`PixelSink`] receives a header, then every pixel row-major with the
//! top row first, then a finish call. [`PpmWriter`] writes textual PPM to any
//! `Write`; [`ImageFileSink`] collects pixels and saves through the `image`
//! crate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::ImageBuffer;
use thiserror::Error;

/// Errors from writing images.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("pixel written before the image header")]
    NotStarted,

    #[error("more pixels written than the image holds")]
    TooManyPixels,

    #[error("image finished after {written} of {expected} pixels")]
    Incomplete { written: u64, expected: u64 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for rendered pixels.
pub trait PixelSink {
    /// Start an image of the given size.
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()>;

    /// Write the next pixel.
    fn write_pixel(&mut self, rgb: [u8; 3]) -> OutputResult<()>;

    /// Complete the image. Fails if fewer than `width * height` pixels arrived.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Pixel accounting shared by the sinks.
#[derive(Debug, Default, Clone, Copy)]
struct Progress {
    expected: Option<u64>,
    written: u64,
}

impl Progress {
    fn begin(&mut self, width: u32, height: u32) {
        self.expected = Some(width as u64 * height as u64);
        self.written = 0;
    }

    fn advance(&mut self) -> OutputResult<()> {
        let expected = self.expected.ok_or(OutputError::NotStarted)?;
        if self.written >= expected {
            return Err(OutputError::TooManyPixels);
        }
        self.written += 1;
        Ok(())
    }

    fn check_complete(&self) -> OutputResult<()> {
        let expected = self.expected.ok_or(OutputError::NotStarted)?;
        if self.written != expected {
            return Err(OutputError::Incomplete {
                written: self.written,
                expected,
            });
        }
        Ok(())
    }
}

/// Textual PPM (`P3`) writer.
pub struct PpmWriter<W: Write> {
    writer: W,
    progress: Progress,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            progress: Progress::default(),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PixelSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()> {
        write!(self.writer, "P3\n{} {}\n255\n", width, height)?;
        self.progress.begin(width, height);
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> OutputResult<()> {
        self.progress.advance()?;
        writeln!(self.writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.progress.check_complete()?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Sink that saves through the `image` crate; the format follows the path
/// extension.
pub struct ImageFileSink {
    path: PathBuf,
    image: Option<image::RgbImage>,
    progress: Progress,
}

impl ImageFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            image: None,
            progress: Progress::default(),
        }
    }
}

impl PixelSink for ImageFileSink {
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()> {
        self.image = Some(image::RgbImage::new(width, height));
        self.progress.begin(width, height);
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> OutputResult<()> {
        let index = self.progress.written;
        self.progress.advance()?;
        let image = self.image.as_mut().ok_or(OutputError::NotStarted)?;
        let width = image.width() as u64;
        let (x, y) = ((index % width) as u32, (index / width) as u32);
        image.put_pixel(x, y, image::Rgb(rgb));
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.progress.check_complete()?;
        let image = self.image.take().ok_or(OutputError::NotStarted)?;
        image.save(&self.path)?;
        Ok(())
    }
}

/// Stream a whole image through a sink.
pub fn write_to_sink(image: &ImageBuffer, sink: &mut dyn PixelSink) -> OutputResult<()> {
    sink.begin(image.width, image.height)?;
    for &rgb in &image.pixels {
        sink.write_pixel(rgb)?;
    }
    sink.finish()
}

/// Save an image, choosing the format from the file extension.
///
/// `.ppm` writes textual PPM; anything else goes to the `image` crate.
pub fn write_image(image: &ImageBuffer, path: &Path) -> OutputResult<()> {
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = BufWriter::new(File::create(path)?);
        write_to_sink(image, &mut PpmWriter::new(file))?;
    } else {
        write_to_sink(image, &mut ImageFileSink::new(path))?;
    }

    log::info!("Wrote {}", path.display());
    Ok(())
}
