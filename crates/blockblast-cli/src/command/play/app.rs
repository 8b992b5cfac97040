use crossterm::event::Event;
use ratatui::Frame;

use super::{TICK_RATE, screen::PlayScreen};
use crate::tui::{App, RenderMode, Runtime};

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(screen: PlayScreen) -> Self {
        Self { screen }
    }

    /// Settles the game and writes the final save after the UI has closed.
    pub fn finish(mut self) -> anyhow::Result<()> {
        self.screen.finish()
    }
}

impl App for PlayApp {
    #[expect(clippy::cast_precision_loss)]
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(TICK_RATE as f64));
        runtime.set_render_mode(RenderMode::throttled_from_rate(TICK_RATE as f64));
        if let Ok((width, height)) = crossterm::terminal::size() {
            self.screen.resize(width, height);
        }
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _runtime: &mut Runtime) -> bool {
        self.screen.update()
    }
}
