pub use self::{color::*, grid::*, piece::*, shape::*};

pub(crate) mod color;
pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod shape;
