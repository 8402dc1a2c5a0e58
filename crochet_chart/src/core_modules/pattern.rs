// THEORY:
// The `pattern` module turns a walk over the pixelated raster into the chart a
// crocheter follows: a named list of rows, each row an ordered list of tiles, each
// tile one coloured stitch block.
//
// Tiles, rows and patterns are plain data. A `Pattern` is built in one pass by
// `build_pattern` and is read-only afterwards; the histogram and the printed chart
// only read it.

use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_source::PixelSource;
use crate::core_modules::spiral::{Coordinate, SpiralTraversal};
use crate::error::ChartError;
use log::debug;
use std::fmt;

/// One cell of the chart: where it was sampled and the color found there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub coordinate: Coordinate,
    pub color: Pixel,
}

impl Tile {
    pub fn new(coordinate: Coordinate, color: Pixel) -> Self {
        Self { coordinate, color }
    }
}

/// Tiles worked in one pass, in the order they are worked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub tiles: Vec<Tile>,
}

impl Row {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tiles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// A named, ordered list of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    rows: Vec<Row>,
}

impl Pattern {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_capacity(name: impl Into<String>, rows: usize) -> Self {
        Self {
            name: name.into(),
            rows: Vec::with_capacity(rows),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn tile_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.rows.iter().flat_map(|row| row.tiles.iter())
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tile in &self.tiles {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(
                f,
                "({}, {}) {}",
                tile.coordinate.x,
                tile.coordinate.y,
                tile.color.to_hex()
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for (index, row) in self.rows.iter().enumerate() {
            writeln!(f, "Row {}: {}", index + 1, row)?;
        }
        Ok(())
    }
}

/// Samples `source` at each coordinate, in order, into one row.
pub fn sample_row<S: PixelSource + ?Sized>(
    source: &S,
    coordinates: &[Coordinate],
) -> Result<Row, ChartError> {
    let mut row = Row::with_capacity(coordinates.len());
    for &coordinate in coordinates {
        let color = source
            .at(coordinate.x, coordinate.y)
            .ok_or(ChartError::OutOfBounds {
                x: coordinate.x,
                y: coordinate.y,
            })?;
        row.add_tile(Tile::new(coordinate, color));
    }
    Ok(row)
}

/// Samples `source` along the increase phase of `traversal` and collects the tiles
/// into a pattern called `name`, one row per spiral row.
pub fn build_pattern<S: PixelSource + ?Sized>(
    traversal: &SpiralTraversal,
    source: &S,
    name: &str,
) -> Result<Pattern, ChartError> {
    let coordinate_rows = traversal.increase_rows();
    let mut pattern = Pattern::with_capacity(name, coordinate_rows.len());

    for coordinates in coordinate_rows {
        pattern.add_row(sample_row(source, &coordinates)?);
    }

    debug!(
        "built pattern '{}' with {} rows and {} tiles",
        pattern.name(),
        pattern.rows().len(),
        pattern.tile_count()
    );
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::region::Region;
    use image::{Rgba, RgbaImage};

    /// A source that is only valid inside its bounds, with a non-zero origin.
    struct Offset {
        bounds: Region,
    }

    impl PixelSource for Offset {
        fn bounds(&self) -> Option<Region> {
            Some(self.bounds)
        }

        fn at(&self, x: u32, y: u32) -> Option<Pixel> {
            self.bounds
                .contains(x, y)
                .then(|| Pixel::rgb(x as u8, y as u8, 0))
        }
    }

    #[test]
    fn rows_follow_the_spiral() {
        let image = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 0, 255]));
        let spiral = SpiralTraversal::new(Region::from_dimensions(4, 4).unwrap(), 2).unwrap();
        let pattern = build_pattern(&spiral, &image, "Test").unwrap();

        assert_eq!(pattern.name(), "Test");
        assert_eq!(pattern.rows().len(), 2);
        assert_eq!(pattern.tile_count(), 3);

        let second = &pattern.rows()[1];
        assert_eq!(second.tiles[0].coordinate, Coordinate::new(1, 3));
        assert_eq!(second.tiles[0].color, Pixel::rgb(10, 30, 0));
        assert_eq!(second.tiles[1].coordinate, Coordinate::new(3, 1));
        assert_eq!(second.tiles[1].color, Pixel::rgb(30, 10, 0));
    }

    #[test]
    fn works_on_sources_with_an_offset_origin() {
        let bounds = Region::new(10, 20, 15, 25).unwrap();
        let source = Offset { bounds };
        let spiral = SpiralTraversal::new(bounds, 2).unwrap();
        let pattern = build_pattern(&spiral, &source, "Offset").unwrap();

        assert_eq!(pattern.rows().len(), 3);
        assert_eq!(pattern.rows()[0].tiles[0].coordinate, Coordinate::new(15, 25));
        assert!(pattern.tiles().all(|tile| bounds.contains(tile.coordinate.x, tile.coordinate.y)));
    }

    #[test]
    fn sampling_outside_the_source_fails() {
        let image = RgbaImage::new(2, 2);
        let spiral = SpiralTraversal::new(Region::from_dimensions(8, 8).unwrap(), 2).unwrap();
        assert!(matches!(
            build_pattern(&spiral, &image, "Too big"),
            Err(ChartError::OutOfBounds { x: 7, y: 7 })
        ));
    }

    #[test]
    fn display_lists_every_row() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let spiral = SpiralTraversal::new(Region::from_dimensions(4, 4).unwrap(), 2).unwrap();
        let pattern = build_pattern(&spiral, &image, "Red").unwrap();
        let printed = pattern.to_string();
        assert!(printed.starts_with("Red\n"));
        assert!(printed.contains("Row 1: (3, 3) #ff0000\n"));
        assert!(printed.contains("Row 2: (1, 3) #ff0000 (3, 1) #ff0000\n"));
    }
}
