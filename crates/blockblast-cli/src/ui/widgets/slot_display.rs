use blockblast_engine::Piece;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, BlockExt, Widget},
};

use super::{CellDisplay, color, style};
use crate::ui::layout::{CELL_HEIGHT, CELL_WIDTH};

/// Draws `piece` with its top-left cell at `(x, y)`, clipped to `clip`.
pub fn render_piece(piece: &Piece, x: i32, y: i32, clip: Rect, buf: &mut Buffer) {
    for (row, col) in piece.shape().occupied_cells() {
        let (Ok(row), Ok(col)) = (i32::try_from(row), i32::try_from(col)) else {
            continue;
        };
        let cell_x = x + col * i32::from(CELL_WIDTH);
        let cell_y = y + row * i32::from(CELL_HEIGHT);
        let (Ok(cell_x), Ok(cell_y)) = (u16::try_from(cell_x), u16::try_from(cell_y)) else {
            continue;
        };
        let area = Rect::new(cell_x, cell_y, CELL_WIDTH, CELL_HEIGHT).intersection(clip);
        if !area.is_empty() {
            CellDisplay::block(piece.color()).render(area, buf);
        }
    }
}

/// Top-left corner that centers `piece` in `area`.
pub fn centered_origin(piece: &Piece, area: Rect) -> (i32, i32) {
    let width = i32::try_from(piece.width()).unwrap_or(i32::MAX / 4) * i32::from(CELL_WIDTH);
    let height = i32::try_from(piece.height()).unwrap_or(i32::MAX / 4) * i32::from(CELL_HEIGHT);
    (
        i32::from(area.x) + (i32::from(area.width) - width) / 2,
        i32::from(area.y) + (i32::from(area.height) - height) / 2,
    )
}

/// One tray slot: its piece centered in a bordered box.
#[derive(Debug)]
pub struct SlotDisplay<'a> {
    piece: Option<&'a Piece>,
    label: String,
    selected: bool,
    placeable: bool,
    /// The piece is being dragged and is drawn elsewhere.
    lifted: bool,
}

impl<'a> SlotDisplay<'a> {
    pub fn new(index: usize, piece: Option<&'a Piece>) -> Self {
        Self {
            piece,
            label: format!(" {} ", index + 1),
            selected: false,
            placeable: true,
            lifted: false,
        }
    }

    pub fn selected(self, selected: bool) -> Self {
        Self { selected, ..self }
    }

    pub fn placeable(self, placeable: bool) -> Self {
        Self { placeable, ..self }
    }

    pub fn lifted(self, lifted: bool) -> Self {
        Self { lifted, ..self }
    }
}

impl Widget for SlotDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = match (self.selected, self.placeable) {
            (true, _) => Style::new().fg(color::YELLOW),
            (false, true) => Style::new().fg(color::WHITE),
            (false, false) => Style::new().fg(color::DARK_GRAY),
        };
        let block = Some(
            Block::bordered()
                .title(self.label.as_str())
                .border_style(border)
                .style(style::DEFAULT),
        );
        block.as_ref().render(area, buf);
        let inner = block.inner_if_some(area);

        if let Some(piece) = self.piece
            && !self.lifted
        {
            let (x, y) = centered_origin(piece, inner);
            render_piece(piece, x, y, inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockblast_engine::{BlockColor, PieceId, SHAPE_CATALOG};

    use super::*;

    #[test]
    fn test_centered_origin() {
        let area = Rect::new(10, 4, 10, 5);
        let square = Piece::new(PieceId::new("s"), SHAPE_CATALOG[7], BlockColor::Blue);
        assert_eq!(centered_origin(&square, area), (13, 5));

        let line5 = Piece::new(PieceId::new("l"), SHAPE_CATALOG[17], BlockColor::Blue);
        assert_eq!(centered_origin(&line5, area), (10, 6));
    }

    #[test]
    fn test_render_piece_clips_to_area() {
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        let line5 = Piece::new(PieceId::new("l"), SHAPE_CATALOG[17], BlockColor::Crimson);
        render_piece(&line5, -2, 1, area, &mut buf);

        let painted = color::block(BlockColor::Crimson);
        assert!((0..6).all(|x| buf[(x, 1)].bg == painted));
        assert!((0..6).all(|x| buf[(x, 0)].bg != painted));
    }
}
