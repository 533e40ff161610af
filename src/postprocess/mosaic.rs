//! Photo mosaic built from exported frames
//!
//! Tile images are cut into small square pieces. Each pixel of a (shrunk)
//! reference image is replaced by the unused piece whose mean color is
//! closest; pixels matching a skip color become plain white pieces. Every
//! piece is used at most once.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use indicatif::ProgressBar;

use crate::error::ToolError;
use crate::postprocess::downsize::list_images;

#[derive(Debug, Clone)]
pub struct MosaicOptions {
    pub piece_size: u32, // side of one mosaic cell in output pixels
    pub target_height: u32, // reference image is shrunk to this many rows
    pub skip_colors: Vec<[u8; 3]>, // reference pixels near these become white
    pub skip_tolerance: f64, // "near" in RGB distance
}

impl Default for MosaicOptions {
    fn default() -> Self {
        Self {
            piece_size: 20,
            target_height: 80,
            skip_colors: vec![[255, 255, 255]],
            skip_tolerance: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicReport {
    pub width: u32, // output size in pixels
    pub height: u32,
    pub placed: usize, // pieces pasted
    pub skipped: usize, // cells filled white
    pub exhausted: bool, // ran out of pieces before the last cell
}

/// Euclidean RGB distance
pub fn color_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Per-channel mean, truncated
pub fn average_color(img: &RgbImage) -> [u8; 3] {
    let n = (img.width() as u64 * img.height() as u64).max(1);
    let mut sum = [0u64; 3];
    for Rgb(px) in img.pixels() {
        for c in 0..3 {
            sum[c] += px[c] as u64;
        }
    }
    [(sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8]
}

/// Cut `img` into `piece x piece` squares, row-major
///
/// Squares that run past the right or bottom edge are padded with black.
pub fn split_into_pieces(img: &RgbImage, piece: u32) -> Vec<RgbImage> {
    let mut pieces = Vec::new();
    if piece == 0 {
        return pieces;
    }
    for y in (0..img.height()).step_by(piece as usize) {
        for x in (0..img.width()).step_by(piece as usize) {
            let w = piece.min(img.width() - x);
            let h = piece.min(img.height() - y);
            let mut square = RgbImage::new(piece, piece);
            imageops::replace(&mut square, &imageops::crop_imm(img, x, y, w, h).to_image(), 0, 0);
            pieces.push(square);
        }
    }
    pieces
}

/// Pieces available to the mosaic, with their mean colors
#[derive(Debug, Clone, Default)]
pub struct TileLibrary {
    pieces: Vec<RgbImage>,
    means: Vec<[u8; 3]>,
}

impl TileLibrary {
    pub fn from_images<'a, I>(images: I, piece: u32) -> Self
    where
        I: IntoIterator<Item = &'a RgbImage>,
    {
        let mut library = TileLibrary::default();
        for img in images {
            for p in split_into_pieces(img, piece) {
                library.means.push(average_color(&p));
                library.pieces.push(p);
            }
        }
        library
    }

    /// Every `.jpg` under `dir`
    pub fn load(dir: &Path, piece: u32) -> Result<Self, ToolError> {
        let images = list_images(dir, "jpg")?
            .iter()
            .map(|path| Ok(image::open(path)?.to_rgb8()))
            .collect::<Result<Vec<_>, ToolError>>()?;
        if images.is_empty() {
            return Err(ToolError::NoTiles(dir.to_path_buf()));
        }
        Ok(Self::from_images(&images, piece))
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// Assemble the mosaic for an already shrunk reference image
pub fn build_mosaic(library: &TileLibrary, reference: &RgbImage, opts: &MosaicOptions) -> (RgbImage, MosaicReport) {
    let piece = opts.piece_size;
    let (cols, rows) = reference.dimensions();
    let mut mosaic = RgbImage::new(cols * piece, rows * piece);
    let white = RgbImage::from_pixel(piece, piece, Rgb([255, 255, 255]));

    let mut used = vec![false; library.len()];
    let mut remaining = library.len();
    let mut report = MosaicReport {
        width: mosaic.width(),
        height: mosaic.height(),
        placed: 0,
        skipped: 0,
        exhausted: false,
    };

    let bar = ProgressBar::new(rows as u64);
    'rows: for y in 0..rows {
        for x in 0..cols {
            let Rgb(target) = *reference.get_pixel(x, y);
            let (px, py) = ((x * piece) as i64, (y * piece) as i64);

            if remaining == 0 {
                log::warn!("ran out of tiles at ({}, {}); mosaic is incomplete", x, y);
                report.exhausted = true;
                break 'rows;
            }

            if opts.skip_colors.iter().any(|&c| color_distance(target, c) < opts.skip_tolerance) {
                imageops::replace(&mut mosaic, &white, px, py);
                report.skipped += 1;
                continue;
            }

            // first minimum wins
            let mut best: Option<(usize, f64)> = None;
            for (i, &mean) in library.means.iter().enumerate() {
                if used[i] {
                    continue;
                }
                let d = color_distance(mean, target);
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((i, d));
                }
            }

            if let Some((i, _)) = best {
                imageops::replace(&mut mosaic, &library.pieces[i], px, py);
                used[i] = true;
                remaining -= 1;
                report.placed += 1;
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    (mosaic, report)
}

/// Shrink `reference` to `target_height` rows, keeping its aspect ratio
pub fn shrink_reference(reference: &RgbImage, target_height: u32) -> RgbImage {
    let aspect = reference.width() as f64 / reference.height().max(1) as f64;
    let width = ((target_height as f64 * aspect) as u32).max(1);
    imageops::resize(reference, width, target_height, FilterType::CatmullRom)
}

/// Load tiles and reference from disk, build the mosaic and save it
pub fn make_mosaic(tiles_dir: &Path, reference: &Path, output: &Path, opts: &MosaicOptions) -> Result<MosaicReport, ToolError> {
    if opts.piece_size == 0 || opts.target_height == 0 {
        return Err(ToolError::InvalidArgument("piece size and target height must be positive".to_string()));
    }

    let library = TileLibrary::load(tiles_dir, opts.piece_size)?;
    log::info!("loaded {} pieces from {}", library.len(), tiles_dir.display());

    let reference = shrink_reference(&image::open(reference)?.to_rgb8(), opts.target_height);
    let (mosaic, report) = build_mosaic(&library, &reference, opts);
    mosaic.save(output)?;

    log::info!(
        "mosaic {}x{} written to {} ({} pieces, {} blank cells)",
        report.width,
        report.height,
        output.display(),
        report.placed,
        report.skipped
    );
    Ok(report)
}
