/// Grid tiling
///
/// Splits a bitmap into `rows x cols` equal cells using floor division.
/// When the image size is not a multiple of the grid, the right and
/// bottom remainder pixels belong to no cell: cells shrink, never pad.

use image::{imageops, RgbImage};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClassifierError, Result};

/// Grid dimensions entered by the user as `<rows>x<cols>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
}

impl GridSpec {
    /// Parse `RxC` text (case-insensitive, whitespace around numbers allowed)
    pub fn parse(input: &str) -> Result<Self> {
        let lowered = input.trim().to_lowercase();
        let parts: Vec<&str> = lowered.split('x').collect();
        if parts.len() != 2 {
            return Err(ClassifierError::invalid_grid(
                input,
                "expected <rows>x<cols>, e.g. 3x3",
            ));
        }

        let rows = parse_dimension(input, parts[0], "rows")?;
        let cols = parse_dimension(input, parts[1], "cols")?;
        Ok(GridSpec { rows, cols })
    }

    /// Number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Pixel size of one cell for an image of the given size
    pub fn cell_size(&self, width: u32, height: u32) -> (u32, u32) {
        (width / self.cols, height / self.rows)
    }
}

fn parse_dimension(input: &str, part: &str, name: &str) -> Result<u32> {
    let value: i64 = part
        .trim()
        .parse()
        .map_err(|_| ClassifierError::invalid_grid(input, format!("{} is not an integer", name)))?;
    if value < 1 {
        return Err(ClassifierError::invalid_grid(
            input,
            format!("{} must be at least 1", name),
        ));
    }
    u32::try_from(value)
        .map_err(|_| ClassifierError::invalid_grid(input, format!("{} is too large", name)))
}

impl FromStr for GridSpec {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self> {
        GridSpec::parse(s)
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// One cell cropped out of the source image
#[derive(Debug, Clone)]
pub struct Tile {
    /// Row-major position, `row * cols + col`
    pub index: usize,
    pub row: u32,
    pub col: u32,
    pub bitmap: RgbImage,
}

/// Crop `bitmap` into `grid.rows * grid.cols` tiles in row-major order.
///
/// Fails with `InvalidGridSpec` when the grid has more rows than the image
/// has pixel rows (or more cols than pixel columns), since those cells
/// would be empty.
pub fn tile(bitmap: &RgbImage, grid: GridSpec) -> Result<Vec<Tile>> {
    let (width, height) = bitmap.dimensions();
    if grid.rows > height || grid.cols > width {
        return Err(ClassifierError::invalid_grid(
            &grid.to_string(),
            format!("a {}x{} image cannot hold that many cells", width, height),
        ));
    }

    let (cell_w, cell_h) = grid.cell_size(width, height);
    let mut tiles = Vec::with_capacity(grid.cell_count());

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let left = col * cell_w;
            let top = row * cell_h;
            let cell = imageops::crop_imm(bitmap, left, top, cell_w, cell_h).to_image();
            tiles.push(Tile {
                index: tiles.len(),
                row,
                col,
                bitmap: cell,
            });
        }
    }

    Ok(tiles)
}
