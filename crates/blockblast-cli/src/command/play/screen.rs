use blockblast_engine::{
    GameController, MoveReport, Origin, Phase, PieceId, Slot, TargetResolver, can_place,
    first_legal_origin,
};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Paragraph},
};

use crate::{
    store::{HighScoreRecord, Store},
    ui::{
        layout::{self, PlayLayout},
        widgets::{
            BoardDisplay, SlotDisplay, StatsDisplay, centered_origin, color, render_piece,
            render_popup, style,
        },
    },
};

/// The tray piece the player is placing.
#[derive(Debug, Clone, PartialEq)]
struct Selection {
    slot: usize,
    piece_id: PieceId,
    /// Keyboard position; follows the ghost while dragging.
    cursor: Origin,
    /// Mouse position while the piece is dragged.
    drag: Option<(u16, u16)>,
    /// Where the piece would land if dropped now.
    ghost: Option<Origin>,
}

#[derive(Debug)]
pub struct PlayScreen {
    game: GameController,
    store: Store,
    best: Option<HighScoreRecord>,
    resolver: TargetResolver,
    selection: Option<Selection>,
    area: Rect,
    status: String,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(game: GameController, store: Store, best: Option<HighScoreRecord>) -> Self {
        Self {
            game,
            store,
            best,
            // the mouse cursor does not hide the piece, so no offset
            resolver: TargetResolver::new(0.0),
            selection: None,
            area: Rect::new(0, 0, 80, 24),
            status: String::new(),
            is_exiting: false,
        }
    }

    /// Shows `status` until the first move replaces it.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        self.refresh_ghost();
    }

    fn layout(&self, area: Rect) -> PlayLayout {
        PlayLayout::new(
            area,
            self.game.config().board_size,
            self.game.state().tray().len(),
        )
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Resize(width, height) => self.resize(*width, *height),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.is_exiting = true,
            KeyCode::Char('r') => self.restart(),
            KeyCode::Esc => self.selection = None,
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                self.select_slot(index);
            }
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Enter | KeyCode::Char(' ') => self.drop_selection(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.layout(self.area).slot_at(position.0, position.1) {
                    self.select_slot(index);
                    if let Some(selection) = &mut self.selection {
                        selection.drag = Some(position);
                    }
                    self.refresh_ghost();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(selection) = &mut self.selection
                    && selection.drag.is_some()
                {
                    selection.drag = Some(position);
                    self.refresh_ghost();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.is_dragging() {
                    self.drop_selection();
                }
            }
            _ => {}
        }
    }

    fn is_dragging(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.drag.is_some())
    }

    fn select_slot(&mut self, index: usize) {
        if self.game.phase().is_terminated() {
            return;
        }
        let state = self.game.state();
        let Some(piece) = state.tray().slots().get(index).and_then(Slot::piece) else {
            return;
        };
        let cursor = self
            .selection
            .as_ref()
            .map(|selection| selection.cursor)
            .or_else(|| first_legal_origin(state.grid(), piece.shape()))
            .unwrap_or_default();
        self.selection = Some(Selection {
            slot: index,
            piece_id: piece.id().clone(),
            cursor,
            drag: None,
            ghost: None,
        });
        self.clamp_cursor();
        self.refresh_ghost();
    }

    fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        if let Some(selection) = &mut self.selection
            && selection.drag.is_none()
        {
            selection.cursor.row += d_row;
            selection.cursor.col += d_col;
            self.clamp_cursor();
            self.refresh_ghost();
        }
    }

    /// Keeps the keyboard cursor where the whole piece is on the board.
    fn clamp_cursor(&mut self) {
        let size = self.game.config().board_size;
        let Some(selection) = &mut self.selection else {
            return;
        };
        let Some(piece) = self.game.state().tray().get(&selection.piece_id) else {
            return;
        };
        let max = |extent: usize| i32::try_from(size.saturating_sub(extent)).unwrap_or(i32::MAX);
        selection.cursor.row = selection.cursor.row.clamp(0, max(piece.height()));
        selection.cursor.col = selection.cursor.col.clamp(0, max(piece.width()));
    }

    fn refresh_ghost(&mut self) {
        let Some(selection) = &self.selection else {
            return;
        };
        let ghost = self.ghost_for(selection);
        if let Some(selection) = &mut self.selection {
            selection.ghost = ghost;
            if let Some(origin) = ghost {
                selection.cursor = origin;
            }
        }
    }

    fn ghost_for(&self, selection: &Selection) -> Option<Origin> {
        let state = self.game.state();
        match selection.drag {
            Some((column, row)) => {
                let layout = self.layout(self.area);
                self.game.resolve_target(
                    &self.resolver,
                    layout::pointer(column, row),
                    layout.board_rect(),
                    &selection.piece_id,
                )
            }
            None => {
                let piece = state.tray().get(&selection.piece_id)?;
                can_place(state.grid(), piece, selection.cursor).then_some(selection.cursor)
            }
        }
    }

    /// Places the selected piece at its ghost.
    ///
    /// A dragged piece without a ghost goes back to the tray; a keyboard
    /// selection stays so the cursor can be moved on.
    fn drop_selection(&mut self) {
        let Some(selection) = self.selection.take() else {
            return;
        };
        match selection.ghost {
            Some(origin) => self.commit(origin, &selection.piece_id),
            None if selection.drag.is_none() => {
                self.status = "The piece does not fit there".to_owned();
                self.selection = Some(selection);
            }
            None => {}
        }
    }

    fn commit(&mut self, origin: Origin, piece_id: &PieceId) {
        if self.game.phase().is_resolving() {
            self.game.flush();
        }
        match self.game.commit(origin, piece_id) {
            Ok(report) => {
                self.status = describe_move(&report, self.game.state().streak());
                self.save();
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn restart(&mut self) {
        self.game.restart();
        self.selection = None;
        self.status = "New game".to_owned();
        self.save();
    }

    /// Advances the clear delay; returns `true` once the pending clear resolves.
    pub fn update(&mut self) -> bool {
        let resolved = self.game.tick();
        if resolved {
            self.refresh_ghost();
            self.save();
        }
        resolved
    }

    fn save(&mut self) {
        if let Err(e) = self.store.save_game(self.game.state()) {
            log::warn!("{e:#}");
            self.status = format!("Failed to save: {e}");
        }
        self.record_high_score();
    }

    fn record_high_score(&mut self) {
        let high_score = self.game.state().high_score();
        if high_score == 0 || self.best.is_some_and(|best| best.high_score >= high_score) {
            return;
        }
        let record = HighScoreRecord::now(high_score);
        match self.store.save_high_score(&record) {
            Ok(()) => self.best = Some(record),
            Err(e) => log::warn!("{e:#}"),
        }
    }

    /// Resolves any pending clear and writes the final save.
    pub fn finish(&mut self) -> anyhow::Result<()> {
        self.game.flush();
        self.store.save_game(self.game.state())?;
        self.record_high_score();
        Ok(())
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let layout = self.layout(area);
        let state = self.game.state();
        let phase = self.game.phase();
        let border = match phase {
            Phase::Idle => color::WHITE,
            Phase::Resolving => color::YELLOW,
            Phase::Terminated => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .border_style(Style::new().fg(border))
                .style(style::DEFAULT)
        };

        frame.render_widget(
            StatsDisplay::new(state, self.game.stats()).block(panel("BLOCK BLAST")),
            layout.stats,
        );

        let selected_piece = self
            .selection
            .as_ref()
            .and_then(|selection| Some((selection, state.tray().get(&selection.piece_id)?)));

        let mut board = BoardDisplay::new(state.grid()).block(panel(""));
        if let Some((selection, piece)) = selected_piece
            && let Some(origin) = selection.ghost
        {
            board = board.ghost(piece, origin);
        }
        frame.render_widget(board, layout.board);

        let slots = state.tray().slots().iter().zip(&layout.slots);
        for (index, (slot, slot_area)) in slots.enumerate() {
            let selection = self.selection.as_ref().filter(|s| s.slot == index);
            let placeable = slot
                .piece()
                .is_some_and(|piece| first_legal_origin(state.grid(), piece.shape()).is_some());
            let widget = SlotDisplay::new(index, slot.piece())
                .selected(selection.is_some())
                .placeable(placeable)
                .lifted(selection.is_some_and(|s| s.drag.is_some()));
            frame.render_widget(widget, *slot_area);
        }

        // a dragged piece off the board follows the mouse
        if let Some((selection, piece)) = selected_piece
            && let Some((column, row)) = selection.drag
            && selection.ghost.is_none()
        {
            let (x, y) = centered_origin(piece, Rect::new(column, row, 1, 1));
            render_piece(piece, x, y, area, frame.buffer_mut());
        }

        frame.render_widget(
            Paragraph::new(self.status.as_str()).centered(),
            layout.status,
        );
        let help = match (phase, &self.selection) {
            (Phase::Terminated, _) => "Controls: R (Try Again) | Q (Quit)",
            (_, Some(_)) => {
                "Controls: Drag or ← → ↑ ↓ (Move) | Enter (Place) | Esc (Cancel) | Q (Quit)"
            }
            (_, None) => "Controls: Drag a piece or 1-3 (Select) | R (Restart) | Q (Quit)",
        };
        frame.render_widget(
            Paragraph::new(help).style(style::HELP).centered(),
            layout.help,
        );

        if phase.is_terminated() {
            let text = Text::from(vec![
                Line::from("GAME OVER"),
                Line::from(format!("Score {}", state.score())),
            ]);
            render_popup(text, style::GAME_OVER, layout.board, frame.buffer_mut());
        }
    }
}

fn describe_move(report: &MoveReport, streak: u32) -> String {
    let lines = report.clears.count();
    match lines {
        0 => format!("+{}", report.score_delta),
        1 => format!("+{}  1 line  streak {streak}", report.score_delta),
        _ => format!("+{}  {lines} lines  streak {streak}", report.score_delta),
    }
}

#[cfg(test)]
mod tests {
    use blockblast_engine::{
        GameConfig, GameState, PieceFactory, PieceSeed, TickScheduler,
    };
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    use super::*;
    use crate::store::tests::temp_store;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, (column, row): (u16, u16)) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn seeded_screen(name: &str) -> PlayScreen {
        let game = GameController::with_seed(GameConfig::default(), PieceSeed::from_bytes([21; 16]));
        let mut screen = PlayScreen::new(game, temp_store(name), None);
        screen.resize(80, 30);
        screen
    }

    /// Row 0 filled except its last cell, and three single-cell pieces.
    fn almost_full_row_screen(name: &str, clear_delay_ticks: u32) -> PlayScreen {
        let cell = |filled: bool| {
            if filled {
                json!({"filled": true, "color": "#3B82F6"})
            } else {
                json!({"filled": false, "color": ""})
            }
        };
        let grid = (0..8)
            .map(|r| (0..8).map(|c| cell(r == 0 && c < 7)).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let dot = |id: &str| json!({"id": id, "shape": [[1]], "color": "#e94560", "width": 1, "height": 1});
        let saved = json!({
            "score": 0,
            "highScore": 0,
            "streak": 0,
            "gameOver": false,
            "grid": grid,
            "availableBlocks": [dot("a"), dot("b"), dot("c")],
        });
        let config = GameConfig {
            clear_delay_ticks,
            ..GameConfig::default()
        };
        let state = GameState::from_json(&saved.to_string(), &config).unwrap();
        let game = GameController::from_state(
            config,
            state,
            PieceFactory::with_seed(PieceSeed::from_bytes([22; 16])),
            TickScheduler::default(),
        )
        .unwrap();
        let mut screen = PlayScreen::new(game, temp_store(name), None);
        screen.resize(80, 30);
        screen
    }

    fn slot_center(screen: &PlayScreen, index: usize) -> (u16, u16) {
        let slot = screen.layout(screen.area).slots[index];
        (slot.x + slot.width / 2, slot.y + slot.height / 2)
    }

    #[test]
    fn test_keyboard_placement() {
        let mut screen = seeded_screen("keyboard");
        screen.handle_event(&key(KeyCode::Char('1')));
        let selection = screen.selection.clone().unwrap();
        assert_eq!(selection.slot, 0);
        assert_eq!(selection.ghost, Some(Origin::new(0, 0)));

        screen.handle_event(&key(KeyCode::Down));
        screen.handle_event(&key(KeyCode::Right));
        assert_eq!(
            screen.selection.as_ref().unwrap().ghost,
            Some(Origin::new(1, 1))
        );

        screen.handle_event(&key(KeyCode::Enter));
        assert!(screen.selection.is_none());
        assert_eq!(screen.game.stats().moves(), 1);
        assert!(screen.game.state().score() > 0);
        assert!(screen.game.state().tray().slots()[0].is_empty());
        assert!(screen.store.dir().join("save.json").exists());
        assert_eq!(
            screen.best.map(|best| best.high_score),
            Some(screen.game.state().score())
        );
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut screen = seeded_screen("cursor");
        screen.handle_event(&key(KeyCode::Char('2')));
        for _ in 0..20 {
            screen.handle_event(&key(KeyCode::Up));
            screen.handle_event(&key(KeyCode::Left));
        }
        assert_eq!(screen.selection.as_ref().unwrap().cursor, Origin::new(0, 0));
        for _ in 0..20 {
            screen.handle_event(&key(KeyCode::Down));
            screen.handle_event(&key(KeyCode::Right));
        }
        let selection = screen.selection.clone().unwrap();
        assert!(selection.ghost.is_some());
        let piece = screen.game.state().tray().get(&selection.piece_id).unwrap();
        let expected = |extent: usize| i32::try_from(8 - extent).unwrap();
        assert_eq!(
            selection.cursor,
            Origin::new(expected(piece.height()), expected(piece.width()))
        );
    }

    #[test]
    fn test_drag_and_drop_onto_board() {
        let mut screen = seeded_screen("drag");
        let layout = screen.layout(screen.area);
        let target = layout.cell_rect(4, 4).unwrap();
        let piece_id = screen.game.state().tray().slots()[1]
            .piece()
            .unwrap()
            .id()
            .clone();

        screen.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            slot_center(&screen, 1),
        ));
        assert!(screen.is_dragging());
        screen.handle_event(&mouse(
            MouseEventKind::Drag(MouseButton::Left),
            (target.x, target.y),
        ));
        assert!(screen.selection.as_ref().unwrap().ghost.is_some());
        screen.handle_event(&mouse(
            MouseEventKind::Up(MouseButton::Left),
            (target.x, target.y),
        ));

        assert!(screen.selection.is_none());
        assert_eq!(screen.game.stats().moves(), 1);
        assert!(screen.game.state().tray().get(&piece_id).is_none());
    }

    #[test]
    fn test_drop_off_board_returns_piece() {
        let mut screen = seeded_screen("drop-off");
        screen.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            slot_center(&screen, 0),
        ));
        screen.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), (0, 0)));
        assert_eq!(screen.selection.as_ref().unwrap().ghost, None);
        screen.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), (0, 0)));

        assert!(screen.selection.is_none());
        assert_eq!(screen.game.stats().moves(), 0);
        assert_eq!(screen.game.state().tray().pieces().count(), 3);
    }

    #[test]
    fn test_commit_during_clear_flushes_first() {
        let mut screen = almost_full_row_screen("flush", 10);
        screen.handle_event(&key(KeyCode::Char('1')));
        assert_eq!(
            screen.selection.as_ref().unwrap().ghost,
            Some(Origin::new(0, 7))
        );
        screen.handle_event(&key(KeyCode::Enter));
        assert!(screen.game.phase().is_resolving());
        assert_eq!(screen.status, "+101  1 line  streak 1");

        screen.handle_event(&key(KeyCode::Char('2')));
        assert_eq!(
            screen.selection.as_ref().unwrap().ghost,
            Some(Origin::new(1, 0))
        );
        screen.handle_event(&key(KeyCode::Enter));
        assert!(screen.game.phase().is_idle());
        assert_eq!(screen.game.stats().moves(), 2);
        assert_eq!(screen.game.state().score(), 102);
        assert_eq!(screen.game.state().grid().filled_count(), 1);
    }

    #[test]
    fn test_ticks_resolve_clear_and_finish_saves() {
        let mut screen = almost_full_row_screen("ticks", 2);
        screen.handle_event(&key(KeyCode::Char('1')));
        screen.handle_event(&key(KeyCode::Enter));
        assert!(screen.game.phase().is_resolving());
        assert!(!screen.update());
        assert!(screen.game.phase().is_resolving());
        assert!(screen.update());
        assert!(screen.game.phase().is_idle());
        assert!(!screen.update());

        screen.finish().unwrap();
        let saved = screen.store.load_game(screen.game.config()).unwrap().unwrap();
        assert_eq!(saved.score(), 101);
        assert!(!saved.grid().has_clearing());
        assert_eq!(
            screen.store.load_high_score().map(|r| r.high_score),
            Some(101)
        );
    }

    #[test]
    fn test_escape_cancels_and_q_quits() {
        let mut screen = seeded_screen("keys");
        screen.handle_event(&key(KeyCode::Char('3')));
        assert!(screen.selection.is_some());
        screen.handle_event(&key(KeyCode::Esc));
        assert!(screen.selection.is_none());
        assert!(!screen.should_exit());
        screen.handle_event(&key(KeyCode::Char('q')));
        assert!(screen.should_exit());
    }

    #[test]
    fn test_draw_does_not_panic_on_small_terminal() {
        use ratatui::{Terminal, backend::TestBackend};

        for (width, height) in [(80, 30), (20, 8), (1, 1)] {
            let mut screen = seeded_screen("draw");
            screen.resize(width, height);
            screen.handle_event(&key(KeyCode::Char('1')));
            let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
            terminal.draw(|frame| screen.draw(frame)).unwrap();
        }
    }

    #[test]
    fn test_startup_note_is_drawn_until_first_move() {
        use ratatui::{Terminal, backend::TestBackend};

        let note = "Saved game discarded";
        let mut screen = seeded_screen("note").with_status(note);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect::<String>();
        assert!(text.contains(note));

        screen.handle_event(&key(KeyCode::Char('1')));
        screen.handle_event(&key(KeyCode::Enter));
        assert_ne!(screen.status, note);
    }
}
