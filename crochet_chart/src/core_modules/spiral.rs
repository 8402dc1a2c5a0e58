// THEORY:
// The `spiral` module decides the order in which tiles of the pixelated grid are
// charted. Corner-to-corner crochet starts with a single tile in one corner and
// grows by one tile per row, each row worked in the opposite direction to the last.
//
// Key architectural principles:
// 1.  **One Continuous Path**: A single cursor starts on the bottom-right pixel of the
//     raster. Rows are consecutive segments of its path; the cursor is never reset
//     between rows.
// 2.  **Alternating Sweeps**: Odd rows move the cursor left and down (towards min X,
//     max Y); even rows move it right and up (towards max X, min Y). The two axes
//     are checked independently, so near an edge a row may move along one axis only.
// 3.  **Clamping**: A step never carries the cursor outside the image bounds. A step
//     that would overshoot an edge stops on it.
// 4.  **Explicit State**: The cursor is a plain value passed into `step` and `row` and
//     handed back, so every stage can be exercised on its own.
// 5.  **Growth Only**: Rows of length 1, 2, ... up to `width / block_size` are produced.
//     The closing phase that would shrink rows back towards the far corner is not
//     defined, and `decrease_rows` says so with `NotImplemented`.

use crate::core_modules::region::Region;
use crate::error::ChartError;
use log::debug;

/// A pixel position in the raster being charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Direction a row is worked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Towards min X and max Y. The first row is odd.
    Odd,
    /// Towards max X and min Y.
    Even,
}

impl Sweep {
    pub fn flip(self) -> Self {
        match self {
            Sweep::Odd => Sweep::Even,
            Sweep::Even => Sweep::Odd,
        }
    }
}

/// Advances `cursor` one tile along `sweep`, clamped to `bounds`.
pub fn step(cursor: Coordinate, sweep: Sweep, bounds: &Region, block_size: u32) -> Coordinate {
    let Coordinate { mut x, mut y } = cursor;
    match sweep {
        Sweep::Odd => {
            if x > bounds.min_x {
                x = x.saturating_sub(block_size).max(bounds.min_x);
            }
            if y < bounds.max_y {
                y = y.saturating_add(block_size).min(bounds.max_y);
            }
        }
        Sweep::Even => {
            if x < bounds.max_x {
                x = x.saturating_add(block_size).min(bounds.max_x);
            }
            if y > bounds.min_y {
                y = y.saturating_sub(block_size).max(bounds.min_y);
            }
        }
    }
    Coordinate { x, y }
}

/// The increase phase of a corner-to-corner chart over a pixelated raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiralTraversal {
    bounds: Region,
    block_size: u32,
    total_rows: u32,
}

impl SpiralTraversal {
    pub fn new(bounds: Region, block_size: u32) -> Result<Self, ChartError> {
        if block_size == 0 {
            return Err(ChartError::InvalidBlockSize(block_size));
        }
        // Row count follows the image width only, even for tall narrow images.
        let total_rows = bounds.width() / block_size;
        Ok(Self {
            bounds,
            block_size,
            total_rows,
        })
    }

    pub fn total_rows(&self) -> u32 {
        self.total_rows
    }

    pub fn total_tiles(&self) -> usize {
        let rows = self.total_rows as usize;
        rows * (rows + 1) / 2
    }

    /// Bottom-right corner, where the first tile is worked.
    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.bounds.max_x, self.bounds.max_y)
    }

    /// Top-right corner, reached when the chart is at its widest.
    pub fn middle(&self) -> Coordinate {
        Coordinate::new(self.bounds.max_x, self.bounds.min_y)
    }

    /// Top-left corner, where a finished chart would close.
    pub fn end(&self) -> Coordinate {
        Coordinate::new(self.bounds.min_x, self.bounds.min_y)
    }

    /// Works one row of `row_length` tiles from `cursor`.
    /// Returns the visited coordinates and the cursor left after the last step.
    pub fn row(
        &self,
        mut cursor: Coordinate,
        row_length: u32,
        sweep: Sweep,
    ) -> (Vec<Coordinate>, Coordinate) {
        let mut coordinates = Vec::with_capacity(row_length as usize);
        for _ in 0..row_length {
            coordinates.push(cursor);
            cursor = step(cursor, sweep, &self.bounds, self.block_size);
        }
        (coordinates, cursor)
    }

    /// Rows of length `1..=total_rows`, starting odd and alternating.
    pub fn increase_rows(&self) -> Vec<Vec<Coordinate>> {
        let mut rows = Vec::with_capacity(self.total_rows as usize);
        let mut cursor = self.start();
        let mut sweep = Sweep::Odd;

        for row_length in 1..=self.total_rows {
            let (row, next) = self.row(cursor, row_length, sweep);
            rows.push(row);
            cursor = next;
            sweep = sweep.flip();
        }

        debug!(
            "spiral grew {} rows ({} tiles), cursor stopped at ({}, {})",
            rows.len(),
            self.total_tiles(),
            cursor.x,
            cursor.y
        );
        rows
    }

    /// Rows that would shrink the chart back to the far corner.
    pub fn decrease_rows(&self) -> Result<Vec<Vec<Coordinate>>, ChartError> {
        decrease_rows()
    }
}

/// The tile order of the closing phase is undefined; always `NotImplemented`.
pub fn decrease_rows() -> Result<Vec<Vec<Coordinate>>, ChartError> {
    Err(ChartError::NotImplemented("decrease phase of the spiral"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(points: &[(u32, u32)]) -> Vec<Coordinate> {
        points.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    #[test]
    fn four_by_four_with_block_two() {
        let bounds = Region::from_dimensions(4, 4).unwrap();
        let spiral = SpiralTraversal::new(bounds, 2).unwrap();
        assert_eq!(spiral.total_rows(), 2);
        assert_eq!(
            spiral.increase_rows(),
            vec![coords(&[(3, 3)]), coords(&[(1, 3), (3, 1)])]
        );
    }

    #[test]
    fn row_lengths_grow_by_one() {
        for (width, block_size) in [(10, 1), (120, 12), (37, 5), (7, 7), (6, 7)] {
            let bounds = Region::from_dimensions(width, 50).unwrap();
            let spiral = SpiralTraversal::new(bounds, block_size).unwrap();
            let rows = spiral.increase_rows();
            let total_rows = width / block_size;

            let lengths: Vec<usize> = rows.iter().map(Vec::len).collect();
            let expected: Vec<usize> = (1..=total_rows as usize).collect();
            assert_eq!(lengths, expected);

            let tiles: usize = lengths.iter().sum();
            assert_eq!(tiles, (total_rows * (total_rows + 1) / 2) as usize);
            assert_eq!(tiles, spiral.total_tiles());
        }
    }

    #[test]
    fn cursor_never_leaves_the_bounds() {
        for (width, height) in [(10, 10), (17, 4), (3, 29), (64, 48)] {
            let bounds = Region::from_dimensions(width, height).unwrap();
            for block_size in 1..=width {
                let spiral = SpiralTraversal::new(bounds, block_size).unwrap();
                for coordinate in spiral.increase_rows().into_iter().flatten() {
                    assert!(
                        bounds.contains(coordinate.x, coordinate.y),
                        "{coordinate:?} escaped {width}x{height} with block {block_size}"
                    );
                }
            }
        }
    }

    #[test]
    fn cursor_carries_over_between_rows() {
        let bounds = Region::from_dimensions(9, 9).unwrap();
        let spiral = SpiralTraversal::new(bounds, 3).unwrap();
        let (first, after_first) = spiral.row(spiral.start(), 1, Sweep::Odd);
        let (second, _) = spiral.row(after_first, 2, Sweep::Even);

        let rows = spiral.increase_rows();
        assert_eq!(rows[0], first);
        assert_eq!(rows[1], second);
        assert_eq!(rows[1][0], after_first);
    }

    #[test]
    fn steps_clamp_to_the_edges() {
        let bounds = Region::new(2, 2, 8, 8).unwrap();
        assert_eq!(
            step(Coordinate::new(3, 7), Sweep::Odd, &bounds, 4),
            Coordinate::new(2, 8)
        );
        assert_eq!(
            step(Coordinate::new(7, 3), Sweep::Even, &bounds, 4),
            Coordinate::new(8, 2)
        );
        // Pinned on both edges: nothing moves.
        assert_eq!(
            step(Coordinate::new(2, 8), Sweep::Odd, &bounds, 4),
            Coordinate::new(2, 8)
        );
    }

    #[test]
    fn block_wider_than_image_yields_no_rows() {
        let bounds = Region::from_dimensions(5, 5).unwrap();
        let spiral = SpiralTraversal::new(bounds, 6).unwrap();
        assert!(spiral.increase_rows().is_empty());
    }

    #[test]
    fn corners_follow_the_bounds() {
        let bounds = Region::new(1, 2, 10, 20).unwrap();
        let spiral = SpiralTraversal::new(bounds, 2).unwrap();
        assert_eq!(spiral.start(), Coordinate::new(10, 20));
        assert_eq!(spiral.middle(), Coordinate::new(10, 2));
        assert_eq!(spiral.end(), Coordinate::new(1, 2));
    }

    #[test]
    fn decrease_phase_is_not_implemented() {
        let bounds = Region::from_dimensions(4, 4).unwrap();
        let spiral = SpiralTraversal::new(bounds, 2).unwrap();
        assert!(matches!(
            spiral.decrease_rows(),
            Err(ChartError::NotImplemented(_))
        ));
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let bounds = Region::from_dimensions(4, 4).unwrap();
        assert!(matches!(
            SpiralTraversal::new(bounds, 0),
            Err(ChartError::InvalidBlockSize(0))
        ));
    }
}
