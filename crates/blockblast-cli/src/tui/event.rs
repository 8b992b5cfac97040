use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Fixed-rate game clock; drives the line clear delay.
    Tick,
    /// A redraw is due.
    Render,
    /// Keyboard, mouse, or resize input.
    Crossterm(CrosstermEvent),
}
