use serde::{Deserialize, Serialize};

use crate::core::piece::{Piece, PieceId};

use super::piece_factory::PieceFactory;

/// Tray size used unless configured otherwise.
pub const DEFAULT_TRAY_SIZE: usize = 3;

/// One tray position. Serialized as the piece or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(from = "Option<Piece>", into = "Option<Piece>")]
pub enum Slot {
    Filled(Piece),
    #[default]
    Empty,
}

impl Slot {
    #[must_use]
    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Slot::Filled(piece) => Some(piece),
            Slot::Empty => None,
        }
    }
}

impl From<Option<Piece>> for Slot {
    fn from(piece: Option<Piece>) -> Self {
        piece.map_or(Slot::Empty, Slot::Filled)
    }
}

impl From<Slot> for Option<Piece> {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Filled(piece) => Some(piece),
            Slot::Empty => None,
        }
    }
}

/// The pieces currently available to the player.
///
/// Slots are emptied one at a time as pieces are committed, and are only ever
/// refilled all together once every slot is empty.
///
/// Serialized as an array of pieces and `null`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tray {
    slots: Vec<Slot>,
}

impl Tray {
    /// Creates a tray filled with `size` freshly drawn pieces.
    pub fn draw(factory: &mut PieceFactory, size: usize) -> Self {
        Self::from_pieces(factory.draw_pieces(size))
    }

    #[must_use]
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Self {
        Self::from_slots(pieces.into_iter().map(Slot::Filled))
    }

    #[must_use]
    pub fn from_slots(slots: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the pieces still in the tray, in slot order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.slots.iter().filter_map(Slot::piece)
    }

    #[must_use]
    pub fn get(&self, id: &PieceId) -> Option<&Piece> {
        self.pieces().find(|piece| piece.id() == id)
    }

    /// Returns the index of the slot holding `id`.
    #[must_use]
    pub fn position(&self, id: &PieceId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.piece().is_some_and(|piece| piece.id() == id))
    }

    /// Empties the slot holding `id` and returns its piece.
    pub fn take(&mut self, id: &PieceId) -> Option<Piece> {
        let index = self.position(id)?;
        std::mem::take(&mut self.slots[index]).into()
    }

    /// Returns whether every slot is empty; only then may the tray be refilled.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.slots.iter().all(Slot::is_empty)
    }

    /// Replaces all slots with `size` new pieces if the tray is depleted.
    ///
    /// Returns whether a refill happened. A tray with any piece left is never
    /// touched.
    pub fn refill_if_depleted(&mut self, factory: &mut PieceFactory, size: usize) -> bool {
        if !self.is_depleted() {
            return false;
        }
        *self = Self::draw(factory, size);
        true
    }
}
