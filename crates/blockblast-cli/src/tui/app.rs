use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// A full-screen game driven by [`Runtime::run`].
///
/// Input always triggers a redraw. Ticks only do when [`App::update`] says
/// something visible changed, so an idle board is not repainted 60 times a
/// second.
pub trait App {
    /// Called once before the first event; sets the tick rate and render mode.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Key presses, mouse drags, and resizes.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances timers such as the pending line clear by one tick.
    ///
    /// Returns `true` if the screen needs to be redrawn.
    fn update(&mut self, runtime: &mut Runtime) -> bool;
}
