use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Clear, Widget},
};

pub use self::{board_display::*, cell_display::*, slot_display::*, stats_display::*};

mod board_display;
mod cell_display;
mod slot_display;
mod stats_display;

pub mod color {
    use blockblast_engine::BlockColor;
    use ratatui::style::Color;

    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BOARD: Color = Color::Rgb(22, 33, 62);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(233, 69, 96);

    pub const fn block(color: BlockColor) -> Color {
        let (r, g, b) = color.rgb();
        Color::Rgb(r, g, b)
    }
}

pub mod style {
    use blockblast_engine::BlockColor;
    use ratatui::style::{Color, Modifier, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BOARD);
    pub const CLEARING: Style = fg_bg(color::BLACK, color::WHITE).add_modifier(Modifier::BOLD);
    pub const HELP: Style = Style::new().fg(color::GRAY);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    pub const fn block(block_color: BlockColor) -> Style {
        bg_only(color::block(block_color))
    }

    pub const fn ghost(block_color: BlockColor) -> Style {
        fg_bg(color::block(block_color), color::BOARD)
    }
}

/// Draws `text` in a filled box centered over `area`, hiding what is below.
pub fn render_popup(text: Text<'_>, style: Style, area: Rect, buf: &mut Buffer) {
    let height = u16::try_from(text.lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = area.centered(Constraint::Length(area.width), Constraint::Length(height));
    let block = Block::new().style(style);
    let inner = block.inner(area);
    Clear.render(area, buf);
    block.render(area, buf);
    text.style(style)
        .centered()
        .render(inner.centered_vertically(Constraint::Length(height - 2)), buf);
}
