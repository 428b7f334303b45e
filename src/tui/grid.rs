//! Grid widget: colored cells drawn straight into the buffer.
//!
//! One layout unit is one terminal row tall and two columns wide, so square
//! cells look square.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use crate::layout::{self, Viewport};
use crate::model::Grid;
use crate::playback::RenderedCell;

/// Accent used for selection marks and highlights.
pub const ACCENT: Color = Color::Rgb(0x5A, 0x94, 0x85);

/// Terminal columns per layout unit.
const COLS_PER_UNIT: u16 = 2;

/// The display color of a cell value. Unknown values are light gray.
pub fn color(value: u8) -> Color {
    match value {
        0 => Color::Rgb(0x00, 0x00, 0x00),
        1 => Color::Rgb(0x3B, 0x82, 0xF6),
        2 => Color::Rgb(0xEF, 0x44, 0x44),
        3 => Color::Rgb(0x22, 0xC5, 0x5E),
        4 => Color::Rgb(0xFA, 0xCC, 0x15),
        5 => Color::Rgb(0x9C, 0xA3, 0xAF),
        6 => Color::Rgb(0xEC, 0x48, 0x99),
        7 => Color::Rgb(0xF9, 0x73, 0x16),
        8 => Color::Rgb(0x7D, 0xD3, 0xFC),
        9 => Color::Rgb(0x9F, 0x12, 0x39),
        _ => Color::Rgb(0xD1, 0xD5, 0xDB),
    }
}

/// The viewer as layout sees it: `reserved` rows of controls around the grid.
pub fn viewport(area: Rect, reserved: u16) -> Viewport {
    Viewport {
        width: u32::from(area.width / COLS_PER_UNIT),
        height: u32::from(area.height),
        padding: 0,
        reserved_height: u32::from(reserved),
    }
}

/// Terminal size of a grid drawn at `cell` units with `gap` units between cells.
pub fn footprint(cols: usize, rows: usize, cell: u16, gap: u16) -> (u16, u16) {
    let clamp = |v: u32| u16::try_from(v).unwrap_or(u16::MAX);
    let width = clamp(layout::extent(cols, u32::from(cell), u32::from(gap)))
        .saturating_mul(COLS_PER_UNIT);
    let height = clamp(layout::extent(rows, u32::from(cell), u32::from(gap)));
    (width, height)
}

/// Draws rendered cells. Anything past the area is clipped.
pub struct GridView<'a> {
    cells: &'a [Vec<RenderedCell>],
    cell: u16,
    gap: u16,
}

impl<'a> GridView<'a> {
    pub fn new(cells: &'a [Vec<RenderedCell>], cell: u16, gap: u16) -> Self {
        Self { cells, cell, gap }
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cell_w = self.cell.saturating_mul(COLS_PER_UNIT);
        let step_y = self.cell.saturating_add(self.gap);
        let step_x = step_y.saturating_mul(COLS_PER_UNIT);

        for (y, row) in self.cells.iter().enumerate() {
            let Some(top) = offset(area.y, y, step_y) else {
                break;
            };
            for (x, cell) in row.iter().enumerate() {
                let Some(left) = offset(area.x, x, step_x) else {
                    break;
                };
                paint(buf, area, left, top, cell_w, self.cell, *cell);
            }
        }
    }
}

fn offset(origin: u16, i: usize, step: u16) -> Option<u16> {
    let i = u16::try_from(i).ok()?;
    origin.checked_add(i.checked_mul(step)?)
}

fn paint(buf: &mut Buffer, area: Rect, left: u16, top: u16, w: u16, h: u16, cell: RenderedCell) {
    let bg = color(cell.color);
    let mid = top.saturating_add(h / 2);
    let right = left.saturating_add(w);
    for y in top..top.saturating_add(h).min(area.bottom()) {
        for x in left..left.saturating_add(w).min(area.right()) {
            let symbol = if cell.selected && y == mid {
                if x == left {
                    "["
                } else if x + 1 == right {
                    "]"
                } else {
                    " "
                }
            } else {
                " "
            };
            if let Some(c) = buf.cell_mut((x, y)) {
                c.set_symbol(symbol).set_bg(bg).set_fg(Color::White);
            }
        }
    }
}

/// A small preview of a puzzle grid.
pub fn thumbnail(grid: &Grid, max_size: u32) -> (Vec<Vec<RenderedCell>>, u16) {
    let cells = grid
        .iter_rows()
        .map(|row| {
            row.iter()
                .map(|&color| RenderedCell {
                    color,
                    selected: false,
                })
                .collect()
        })
        .collect();
    let size = layout::thumbnail_cell_size(grid.cols(), grid.rows(), max_size, 1);
    (cells, u16::try_from(size).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_arc_colors() {
        assert_eq!(color(0), Color::Rgb(0, 0, 0));
        assert_eq!(color(2), Color::Rgb(0xEF, 0x44, 0x44));
        assert_eq!(color(42), color(200));
    }

    #[test]
    fn viewport_counts_units() {
        let viewport = viewport(Rect::new(0, 0, 81, 30), 6);
        let region = viewport.available();
        assert_eq!((region.width, region.height), (40, 24));
    }

    #[test]
    fn footprint_doubles_width() {
        assert_eq!(footprint(3, 2, 2, 0), (12, 4));
        assert_eq!(footprint(3, 2, 1, 1), (10, 3));
    }

    #[test]
    fn renders_cells_and_selection_marks() {
        let cells = vec![vec![
            RenderedCell {
                color: 1,
                selected: false,
            },
            RenderedCell {
                color: 2,
                selected: true,
            },
        ]];
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        GridView::new(&cells, 1, 0).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].bg, color(1));
        assert_eq!(buf[(1, 0)].bg, color(1));
        assert_eq!(buf[(2, 0)].bg, color(2));
        assert_eq!(buf[(2, 0)].symbol(), "[");
        assert_eq!(buf[(3, 0)].symbol(), "]");
        // Past the grid the buffer is untouched.
        assert_eq!(buf[(4, 0)].bg, Color::Reset);
    }

    #[test]
    fn clips_to_area() {
        let cells = vec![vec![RenderedCell { color: 3, selected: false }; 10]; 10];
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 3));
        GridView::new(&cells, 1, 0).render(area, &mut buf);

        assert_eq!(buf[(3, 1)].bg, color(3));
        assert_eq!(buf[(4, 0)].bg, Color::Reset);
        assert_eq!(buf[(0, 2)].bg, Color::Reset);
    }

    #[test]
    fn huge_cells_and_gaps_do_not_overflow() {
        let cells = vec![vec![RenderedCell { color: 4, selected: true }; 3]; 3];
        let area = Rect::new(2, 1, 10, 5);
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 6));
        GridView::new(&cells, u16::MAX, u16::MAX).render(area, &mut buf);

        assert_eq!(buf[(2, 1)].bg, color(4));
        assert_eq!(buf[(11, 5)].bg, color(4));
        assert_eq!(buf[(1, 1)].bg, Color::Reset);
    }

    #[test]
    fn thumbnail_cell_is_at_least_one() {
        let grid = Grid::new(vec![vec![0; 30]; 30]).unwrap();
        let (cells, size) = thumbnail(&grid, 8);
        assert_eq!(cells.len(), 30);
        assert_eq!(size, 1);

        let small = Grid::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(thumbnail(&small, 8).1, 4);
    }
}
