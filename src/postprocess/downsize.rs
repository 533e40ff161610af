//! Square thumbnails of exported frames
//!
//! Resize so the short side matches the target, then crop the centre square.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbImage};

use crate::error::ToolError;

/// `true` when `path` ends in `.{ext}`, case-insensitive
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Sorted list of the files in `dir` with extension `ext`
pub fn list_images(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, ToolError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, ext) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Proportional Lanczos resize so the short side is `size`, then a centred
/// `size x size` crop
pub fn square_thumbnail(img: &DynamicImage, size: u32) -> Result<RgbImage, ToolError> {
    let (w, h) = img.dimensions();
    if size == 0 || w == 0 || h == 0 {
        return Err(ToolError::InvalidArgument(format!("cannot fit a {w}x{h} image into {size}x{size}")));
    }

    let (nw, nh) = if w > h {
        ((w as u64 * size as u64 / h as u64) as u32, size)
    } else {
        (size, (h as u64 * size as u64 / w as u64) as u32)
    };
    let resized = imageops::resize(&img.to_rgb8(), nw, nh, FilterType::Lanczos3);

    let left = (nw - size) / 2;
    let top = (nh - size) / 2;
    Ok(imageops::crop_imm(&resized, left, top, size, size).to_image())
}

/// Thumbnail every `.jpg` in `input` into `output`, keeping file names
///
/// Returns the number of images written.
pub fn downsize_dir(input: &Path, output: &Path, size: u32) -> Result<usize, ToolError> {
    fs::create_dir_all(output)?;

    let mut written = 0;
    for path in list_images(input, "jpg")? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let img = image::open(&path)?;
        square_thumbnail(&img, size)?.save(output.join(name))?;
        written += 1;
    }
    log::info!("downsized {} images from {} into {}", written, input.display(), output.display());
    Ok(written)
}
