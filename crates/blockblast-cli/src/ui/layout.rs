//! Screen geometry shared by rendering and mouse hit-testing.

use blockblast_engine::{BoardRect, Pointer};
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};

/// Terminal columns per board cell.
pub const CELL_WIDTH: u16 = 2;
/// Terminal rows per board cell.
pub const CELL_HEIGHT: u16 = 1;
/// Side of the square area, in cells, reserved for each tray piece.
pub const SLOT_CELLS: u16 = 5;

const STATS_WIDTH: u16 = 22;
const BORDER: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayLayout {
    pub stats: Rect,
    /// The board including its border.
    pub board: Rect,
    /// The board cells only, clipped to the terminal.
    pub cells: Rect,
    board_size: u16,
    /// Tray slots including their borders, in slot order.
    pub slots: Vec<Rect>,
    pub status: Rect,
    pub help: Rect,
}

impl PlayLayout {
    pub fn new(area: Rect, board_size: usize, tray_size: usize) -> Self {
        let board_size = u16::try_from(board_size).unwrap_or(u16::MAX);
        let board_width = board_size.saturating_mul(CELL_WIDTH).saturating_add(BORDER);
        let board_height = board_size.saturating_mul(CELL_HEIGHT).saturating_add(BORDER);
        let slot_width = SLOT_CELLS * CELL_WIDTH + BORDER;
        let slot_height = SLOT_CELLS * CELL_HEIGHT + BORDER;

        let [top, tray, status, help] = Layout::vertical([
            Constraint::Length(board_height),
            Constraint::Length(slot_height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(area);

        let [stats, board] = Layout::horizontal([
            Constraint::Length(STATS_WIDTH),
            Constraint::Length(board_width),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(top);

        let slots = Layout::horizontal(vec![Constraint::Length(slot_width); tray_size])
            .flex(Flex::Center)
            .spacing(1)
            .split(tray)
            .to_vec();

        let cells = Rect {
            x: board.x.saturating_add(1),
            y: board.y.saturating_add(1),
            width: board.width.saturating_sub(BORDER),
            height: board.height.saturating_sub(BORDER),
        };

        Self {
            stats,
            board,
            cells,
            board_size,
            slots,
            status,
            help,
        }
    }

    /// Returns the tray slot under a terminal position.
    pub fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.slots.iter().position(|slot| slot.contains(position))
    }

    /// The board cell area in terminal coordinates, for [`TargetResolver`](blockblast_engine::TargetResolver).
    ///
    /// Sized from the full board rather than `cells`, so rows hidden by a short
    /// terminal do not stretch the visible ones.
    pub fn board_rect(&self) -> BoardRect {
        BoardRect {
            left: f64::from(self.cells.x),
            top: f64::from(self.cells.y),
            width: f64::from(self.board_size) * f64::from(CELL_WIDTH),
            height: f64::from(self.board_size) * f64::from(CELL_HEIGHT),
        }
    }

    /// The area drawn for board cell `(row, col)`.
    pub fn cell_rect(&self, row: usize, col: usize) -> Option<Rect> {
        let row = u16::try_from(row).ok()?;
        let col = u16::try_from(col).ok()?;
        let rect = Rect {
            x: self.cells.x.checked_add(col.checked_mul(CELL_WIDTH)?)?,
            y: self.cells.y.checked_add(row.checked_mul(CELL_HEIGHT)?)?,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
        };
        (rect.right() <= self.cells.right() && rect.bottom() <= self.cells.bottom()).then_some(rect)
    }
}

/// The center of a terminal cell, as a pointer position.
pub fn pointer(column: u16, row: u16) -> Pointer {
    Pointer::new(f64::from(column) + 0.5, f64::from(row) + 0.5)
}

#[cfg(test)]
mod tests {
    use blockblast_engine::{
        BlockColor, Grid, Origin, Piece, PieceId, SHAPE_CATALOG, TargetResolver,
    };

    use super::*;

    fn layout() -> PlayLayout {
        PlayLayout::new(Rect::new(0, 0, 80, 30), 8, 3)
    }

    #[test]
    fn test_regions_fit_and_do_not_overlap() {
        let layout = layout();
        assert_eq!(layout.cells.width, 16);
        assert_eq!(layout.cells.height, 8);
        assert_eq!(layout.slots.len(), 3);
        assert!(!layout.stats.intersects(layout.board));
        for slot in &layout.slots {
            assert!(!slot.intersects(layout.board));
            assert_eq!(slot.width, 12);
            assert_eq!(slot.height, 7);
        }
        assert!(layout.help.y > layout.status.y);
    }

    #[test]
    fn test_slot_hit_testing() {
        let layout = layout();
        for (index, slot) in layout.slots.iter().enumerate() {
            let center = slot.as_position();
            assert_eq!(
                layout.slot_at(center.x + slot.width / 2, center.y + slot.height / 2),
                Some(index)
            );
        }
        assert_eq!(layout.slot_at(layout.cells.x, layout.cells.y), None);
    }

    #[test]
    fn test_cell_rects() {
        let layout = layout();
        let first = layout.cell_rect(0, 0).unwrap();
        assert_eq!(first.as_position(), layout.cells.as_position());
        let last = layout.cell_rect(7, 7).unwrap();
        assert_eq!(last.right(), layout.cells.right());
        assert_eq!(last.bottom(), layout.cells.bottom());
        assert_eq!(layout.cell_rect(8, 0), None);
    }

    #[test]
    fn test_pointer_over_cell_targets_that_cell() {
        let layout = layout();
        let resolver = TargetResolver::new(0.0);
        let dot = Piece::new(PieceId::new("p"), SHAPE_CATALOG[0], BlockColor::Blue);
        let grid = Grid::new(8);

        for (row, col) in [(0, 0), (3, 5), (7, 7)] {
            let rect = layout.cell_rect(row, col).unwrap();
            for column in rect.x..rect.right() {
                let target =
                    resolver.resolve(&grid, pointer(column, rect.y), layout.board_rect(), &dot);
                let expected = Origin::new(i32::try_from(row).unwrap(), i32::try_from(col).unwrap());
                assert_eq!(target, Some(expected));
            }
        }
    }

    #[test]
    fn test_short_terminal_targets_drawn_rows() {
        let layout = PlayLayout::new(Rect::new(0, 0, 80, 14), 8, 3);
        assert!(layout.cells.height > 0);
        assert!(layout.cells.height < 8);
        assert!((layout.board_rect().height - 8.0).abs() < f64::EPSILON);

        let resolver = TargetResolver::new(0.0);
        let dot = Piece::new(PieceId::new("p"), SHAPE_CATALOG[0], BlockColor::Blue);
        let grid = Grid::new(8);
        let resolved = (0..layout.cells.height)
            .map(|row| {
                let at = pointer(layout.cells.x, layout.cells.y + row);
                resolver.resolve(&grid, at, layout.board_rect(), &dot)
            })
            .collect::<Vec<_>>();
        let expected = (0..layout.cells.height)
            .map(|row| Some(Origin::new(i32::from(row), 0)))
            .collect::<Vec<_>>();
        assert_eq!(resolved, expected);
    }
}
