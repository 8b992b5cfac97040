use blockblast_engine::{GameState, GameStats};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use super::style;

/// Score panel shown beside the board.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    state: &'a GameState,
    stats: &'a GameStats,
    block: Option<Block<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(state: &'a GameState, stats: &'a GameStats) -> Self {
        Self {
            state,
            stats,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let entry = |label: &'static str, value: String| {
            Line::from(vec![Span::raw(label), Span::raw(value)])
        };
        vec![
            entry("SCORE:   ", self.state.score().to_string()),
            entry("BEST:    ", self.state.high_score().to_string()),
            entry("STREAK:  ", self.state.streak().to_string()),
            Line::default(),
            entry("MOVES:   ", self.stats.moves().to_string()),
            entry("LINES:   ", self.stats.total_cleared_lines().to_string()),
            entry("COMBO:   ", self.stats.best_streak().to_string()),
        ]
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paragraph = Paragraph::new(self.lines()).style(style::DEFAULT);
        let paragraph = match self.block {
            Some(block) => paragraph.block(block),
            None => paragraph,
        };
        paragraph.render(area, buf);
    }
}
