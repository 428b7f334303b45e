//! Cell sizing: how big each grid cell is drawn for a given region.

use serde::Deserialize;

/// Spacing and bounds for cell sizing.
///
/// Fields left out of a config table take their [`LayoutParams::terminal`]
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default = "LayoutParams::terminal")]
pub struct LayoutParams {
    /// Space between adjacent cells.
    pub gap: u32,
    pub min_cell: u32,
    pub max_cell: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            gap: 2,
            min_cell: 4,
            max_cell: 40,
        }
    }
}

impl LayoutParams {
    /// Sizing for a terminal, where one unit is a character row.
    pub fn terminal() -> Self {
        Self {
            gap: 0,
            min_cell: 1,
            max_cell: 3,
        }
    }
}

/// A rectangle available for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub width: u32,
    pub height: u32,
}

/// The viewer panel, before its padding and header are taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Horizontal padding around the grid.
    pub padding: u32,
    /// Height taken by controls above the grid.
    pub reserved_height: u32,
}

impl Viewport {
    pub fn available(&self) -> Region {
        Region {
            width: self.width.saturating_sub(self.padding),
            height: self.height.saturating_sub(self.reserved_height),
        }
    }
}

/// The largest cell edge at which the whole grid fits in `region`.
///
/// Width and height are sized separately and the smaller wins, so cells stay
/// square. The result is clamped to `[min_cell, max_cell]`, and is never 0.
/// Zero-sized grids are treated as one cell.
pub fn cell_size(cols: usize, rows: usize, region: Region, params: LayoutParams) -> u32 {
    let along = |count: usize, space: u32| -> u64 {
        let count = u64::try_from(count.max(1)).unwrap_or(u64::MAX);
        let gaps = (count - 1).saturating_mul(u64::from(params.gap));
        u64::from(space).saturating_sub(gaps) / count
    };
    let fit = along(cols, region.width).min(along(rows, region.height));
    let fit = u32::try_from(fit).unwrap_or(u32::MAX);

    let min = params.min_cell.max(1);
    fit.min(params.max_cell).max(min)
}

/// Edge length of a cell in a thumbnail preview.
///
/// `max_size` bounds the longer side of the thumbnail; the result never goes
/// below `floor`.
pub fn thumbnail_cell_size(cols: usize, rows: usize, max_size: u32, floor: u32) -> u32 {
    let longest = u32::try_from(cols.max(rows).max(1)).unwrap_or(u32::MAX);
    (max_size / longest).max(floor)
}

/// Total extent of `count` cells of edge `cell` with `gap` between them.
pub fn extent(count: usize, cell: u32, gap: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count
        .saturating_mul(cell)
        .saturating_add(count.saturating_sub(1).saturating_mul(gap))
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn region(width: u32, height: u32) -> Region {
        Region { width, height }
    }

    #[test]
    fn three_by_five_in_100_by_200() {
        // Width: (100 - 2*2) / 3 = 32. Height: (200 - 4*2) / 5 = 38.
        let params = LayoutParams::default();
        assert_eq!(cell_size(3, 5, region(100, 200), params), 32);
    }

    #[test]
    fn capped_at_max() {
        let params = LayoutParams::default();
        assert_eq!(cell_size(1, 1, region(1000, 1000), params), 40);
    }

    #[test]
    fn floored_at_min() {
        let params = LayoutParams::default();
        assert_eq!(cell_size(30, 30, region(10, 10), params), 4);
        assert_eq!(cell_size(30, 30, region(0, 0), params), 4);
    }

    #[test]
    fn zero_min_still_yields_positive_size() {
        let params = LayoutParams {
            gap: 0,
            min_cell: 0,
            max_cell: 10,
        };
        assert_eq!(cell_size(5, 5, region(1, 1), params), 1);
    }

    #[test]
    fn height_can_be_the_limit() {
        let params = LayoutParams {
            gap: 0,
            min_cell: 1,
            max_cell: 100,
        };
        assert_eq!(cell_size(2, 10, region(200, 50), params), 5);
    }

    #[test]
    fn viewport_takes_out_padding_and_header() {
        let viewport = |width, height| Viewport {
            width,
            height,
            padding: 48,
            reserved_height: 120,
        };
        assert_eq!(viewport(148, 320).available(), region(100, 200));
        assert_eq!(viewport(10, 10).available(), region(0, 0));
    }

    #[test]
    fn thumbnail_sizes() {
        assert_eq!(thumbnail_cell_size(3, 3, 80, 2), 26);
        assert_eq!(thumbnail_cell_size(30, 10, 80, 2), 2);
        assert_eq!(thumbnail_cell_size(30, 30, 32, 2), 2);
        assert_eq!(thumbnail_cell_size(4, 2, 32, 2), 8);
    }

    #[test]
    fn extent_counts_gaps_between_cells() {
        assert_eq!(extent(3, 32, 2), 100);
        assert_eq!(extent(1, 10, 5), 10);
        assert_eq!(extent(0, 10, 5), 0);
    }

    proptest! {
        #[test]
        fn size_is_clamped_and_deterministic(
            cols in 1usize..40,
            rows in 1usize..40,
            width in 0u32..2000,
            height in 0u32..2000,
        ) {
            let params = LayoutParams::default();
            let size = cell_size(cols, rows, region(width, height), params);
            prop_assert!((params.min_cell..=params.max_cell).contains(&size));
            prop_assert_eq!(size, cell_size(cols, rows, region(width, height), params));
        }

        #[test]
        fn unclamped_size_fits(
            cols in 1usize..40,
            rows in 1usize..40,
            width in 0u32..2000,
            height in 0u32..2000,
        ) {
            let params = LayoutParams::default();
            let size = cell_size(cols, rows, region(width, height), params);
            if size > params.min_cell {
                prop_assert!(extent(cols, size, params.gap) <= width);
                prop_assert!(extent(rows, size, params.gap) <= height);
            }
        }
    }
}
