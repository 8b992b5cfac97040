use blockblast_engine::{BlockColor, Cell};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn from_cell(cell: Cell) -> Self {
        match cell.color() {
            _ if cell.is_clearing() => Self::new(style::CLEARING, "░░"),
            Some(color) => Self::block(color),
            None => Self::new(style::EMPTY_DOT, "·"),
        }
    }

    pub const fn block(color: BlockColor) -> Self {
        Self::new(style::block(color), "")
    }

    pub const fn ghost(color: BlockColor) -> Self {
        Self::new(style::ghost(color), "[]")
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // fill the whole area, not just the cells covered by the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
