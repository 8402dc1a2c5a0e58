// THEORY:
// A `Region` is an axis-aligned rectangle of pixel coordinates with both corners
// inclusive. It serves two roles: the block handed to the color averager, and the
// bounds reported by a pixel source. Using one type for both means clipping a block
// against an image is a plain intersection.

use crate::error::ChartError;

/// An inclusive rectangle `[min_x, max_x] x [min_y, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Region {
    /// Builds a region, rejecting inverted corners.
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Result<Self, ChartError> {
        if min_x > max_x {
            return Err(ChartError::OutOfBounds { x: min_x, y: min_y });
        }
        if min_y > max_y {
            return Err(ChartError::OutOfBounds { x: min_x, y: min_y });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// The region covering a `width x height` buffer anchored at the origin.
    /// `None` when either dimension is zero.
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            min_x: 0,
            min_y: 0,
            max_x: width - 1,
            max_y: height - 1,
        })
    }

    /// Number of columns, counting both edges.
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Number of rows, counting both edges.
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    pub fn contains_region(&self, other: &Region) -> bool {
        self.contains(other.min_x, other.min_y) && self.contains(other.max_x, other.max_y)
    }

    /// Intersection of two regions, `None` when they do not overlap.
    pub fn clip(&self, other: &Region) -> Option<Region> {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        Region::new(min_x, min_y, max_x, max_y).ok()
    }

    /// Every coordinate in the region, column by column.
    pub fn coordinates(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.min_x..=self.max_x).flat_map(move |x| (self.min_y..=self.max_y).map(move |y| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents_are_inclusive() {
        let region = Region::new(2, 3, 5, 3).unwrap();
        assert_eq!(region.width(), 4);
        assert_eq!(region.height(), 1);
        assert_eq!(region.area(), 4);
        assert_eq!(region.coordinates().count(), 4);
    }

    #[test]
    fn inverted_corners_are_rejected() {
        assert!(Region::new(5, 0, 4, 0).is_err());
        assert!(Region::new(0, 5, 0, 4).is_err());
    }

    #[test]
    fn empty_dimensions_have_no_region() {
        assert_eq!(Region::from_dimensions(0, 10), None);
        assert_eq!(Region::from_dimensions(10, 0), None);
        assert_eq!(
            Region::from_dimensions(3, 2),
            Some(Region::new(0, 0, 2, 1).unwrap())
        );
    }

    #[test]
    fn clip_intersects_or_returns_none() {
        let image = Region::from_dimensions(10, 10).unwrap();
        let block = Region::new(8, 8, 11, 11).unwrap();
        assert_eq!(image.clip(&block), Some(Region::new(8, 8, 9, 9).unwrap()));

        let outside = Region::new(20, 20, 21, 21).unwrap();
        assert_eq!(image.clip(&outside), None);
    }

    #[test]
    fn contains_checks_both_axes() {
        let region = Region::new(1, 1, 2, 2).unwrap();
        assert!(region.contains(1, 2));
        assert!(!region.contains(0, 2));
        assert!(!region.contains(1, 3));
        assert!(region.contains_region(&Region::new(1, 1, 1, 1).unwrap()));
        assert!(!region.contains_region(&Region::new(1, 1, 3, 1).unwrap()));
    }
}
