//! Frame rendering for the headless demo
//!
//! Maps cell states to colours and glyphs, and records frames into an
//! animated GIF.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageBuffer, ImageError, Rgba, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use wildfire_core::{CellState, Landscape};

/// Display colour of a cell state
pub fn palette(state: CellState) -> [u8; 3] {
    match state {
        CellState::Water => [70, 130, 180],  // steelblue
        CellState::Rock => [128, 128, 128],  // grey
        CellState::Burned => [0, 0, 0],      // black
        CellState::Empty => [107, 142, 35],  // olivedrab
        CellState::Tree => [34, 139, 34],    // forestgreen
        CellState::Fire => [255, 165, 0],    // orange
        CellState::Cloud => [255, 255, 255], // white
    }
}

/// Single-character glyph of a cell state
pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Water => '~',
        CellState::Rock => '^',
        CellState::Burned => '.',
        CellState::Empty => ' ',
        CellState::Tree => 'T',
        CellState::Fire => '*',
        CellState::Cloud => 'o',
    }
}

/// Text map, one line per row
pub fn ascii(landscape: &Landscape) -> String {
    let mut out = String::with_capacity(landscape.rows() * (landscape.cols() + 1));
    for row in 0..landscape.rows() {
        out.extend(landscape.row(row).iter().map(|&s| glyph(s)));
        out.push('\n');
    }
    out
}

/// Rasterise the landscape, each cell drawn as a `scale × scale` block
pub fn frame_image(landscape: &Landscape, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let width = landscape.cols() as u32 * scale;
    let height = landscape.rows() as u32 * scale;
    ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b] = palette(landscape.get((y / scale) as usize, (x / scale) as usize));
        Rgba([r, g, b, 255])
    })
}

/// Animated GIF writer
pub struct GifRecorder {
    encoder: GifEncoder<BufWriter<File>>,
    scale: u32,
    delay: Delay,
    frames: usize,
}

impl GifRecorder {
    /// Create `path` and prepare a looping animation at `fps` frames per second
    pub fn create(path: &Path, scale: u32, fps: f32) -> Result<Self, ImageError> {
        let file = File::create(path)?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder.set_repeat(Repeat::Infinite)?;
        let delay_ms = (1000.0 / fps).round() as u32;
        Ok(Self {
            encoder,
            scale,
            delay: Delay::from_numer_denom_ms(delay_ms, 1),
            frames: 0,
        })
    }

    /// Append the current landscape as a frame
    pub fn push(&mut self, landscape: &Landscape) -> Result<(), ImageError> {
        let image = frame_image(landscape, self.scale);
        self.encoder
            .encode_frame(Frame::from_parts(image, 0, 0, self.delay))?;
        self.frames += 1;
        Ok(())
    }

    /// Number of frames written so far
    pub fn frames(&self) -> usize {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_palette_distinguishes_states() {
        let colours: HashSet<_> = CellState::ALL.iter().map(|&s| palette(s)).collect();
        assert_eq!(colours.len(), CellState::ALL.len());
        let glyphs: HashSet<_> = CellState::ALL.iter().map(|&s| glyph(s)).collect();
        assert_eq!(glyphs.len(), CellState::ALL.len());
    }

    #[test]
    fn test_ascii_layout() {
        let mut land = Landscape::new(2, 3).unwrap();
        land.set(0, 1, CellState::Fire);
        land.set(1, 2, CellState::Water);
        assert_eq!(ascii(&land), " * \n  ~\n");
    }

    #[test]
    fn test_frame_image_scaling() {
        let mut land = Landscape::new(2, 3).unwrap();
        land.set(1, 2, CellState::Fire);
        let img = frame_image(&land, 4);
        assert_eq!(img.dimensions(), (12, 8));
        assert_eq!(img.get_pixel(11, 7), &Rgba([255, 165, 0, 255]));
        assert_eq!(img.get_pixel(0, 0), &Rgba([107, 142, 35, 255]));
    }
}
