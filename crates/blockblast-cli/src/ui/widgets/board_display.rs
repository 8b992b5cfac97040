use blockblast_engine::{Grid, Origin, Piece};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, BlockExt, Widget},
};

use super::CellDisplay;
use crate::ui::layout::{CELL_HEIGHT, CELL_WIDTH};

/// The board, with an optional ghost of the piece being placed.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    ghost: Option<(&'a Piece, Origin)>,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            ghost: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: &'a Piece, origin: Origin) -> Self {
        Self {
            ghost: Some((piece, origin)),
            ..self
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn ghost_covers(&self, row: usize, col: usize) -> Option<&Piece> {
        let (piece, origin) = self.ghost?;
        let dr = usize::try_from(i64::try_from(row).ok()? - i64::from(origin.row)).ok()?;
        let dc = usize::try_from(i64::try_from(col).ok()? - i64::from(origin.col)).ok()?;
        (dr < piece.height() && dc < piece.width() && piece.shape().is_occupied(dr, dc))
            .then_some(piece)
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (row, cells) in self.grid.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let (Ok(y), Ok(x)) = (u16::try_from(row), u16::try_from(col)) else {
                    continue;
                };
                let cell_area = Rect::new(
                    area.x + x * CELL_WIDTH,
                    area.y + y * CELL_HEIGHT,
                    CELL_WIDTH,
                    CELL_HEIGHT,
                )
                .intersection(area);
                if cell_area.is_empty() {
                    continue;
                }
                let display = match self.ghost_covers(row, col) {
                    Some(piece) => CellDisplay::ghost(piece.color()),
                    None => CellDisplay::from_cell(*cell),
                };
                display.render(cell_area, buf);
            }
        }
    }
}
