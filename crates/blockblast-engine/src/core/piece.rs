use std::fmt;

use serde::{Deserialize, Serialize};

use super::{color::BlockColor, shape::Shape};

/// Identifier of a tray piece, unique among the pieces currently in play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A colored shape waiting in the tray. Immutable once drawn.
///
/// Serialized as `{ id, shape, color, width, height }`; `width` and `height`
/// are derived from the shape and must agree with it when deserializing.
///
/// # Example
///
/// ```
/// use blockblast_engine::{BlockColor, Piece, PieceId, SHAPE_CATALOG};
///
/// let piece = Piece::new(PieceId::new("a1"), SHAPE_CATALOG[3], BlockColor::Amber);
/// assert_eq!((piece.width(), piece.height()), (3, 1));
/// assert_eq!(piece.cell_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PieceRepr", into = "PieceRepr")]
pub struct Piece {
    id: PieceId,
    shape: Shape,
    color: BlockColor,
}

impl Piece {
    #[must_use]
    pub fn new(id: PieceId, shape: Shape, color: BlockColor) -> Self {
        Self { id, shape, color }
    }

    #[must_use]
    pub fn id(&self) -> &PieceId {
        &self.id
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> BlockColor {
        self.color
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.shape.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.shape.height()
    }

    /// Number of occupied cells; this is also the placement score of the piece.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.shape.cell_count()
    }
}

#[derive(Serialize, Deserialize)]
struct PieceRepr {
    id: PieceId,
    shape: Shape,
    color: BlockColor,
    width: usize,
    height: usize,
}

impl TryFrom<PieceRepr> for Piece {
    type Error = String;

    fn try_from(repr: PieceRepr) -> Result<Self, Self::Error> {
        let PieceRepr {
            id,
            shape,
            color,
            width,
            height,
        } = repr;
        if (width, height) != (shape.width(), shape.height()) {
            return Err(format!(
                "piece {id} declares size {width}x{height} but its shape is {}x{}",
                shape.width(),
                shape.height()
            ));
        }
        Ok(Self { id, shape, color })
    }
}

impl From<Piece> for PieceRepr {
    fn from(piece: Piece) -> Self {
        Self {
            width: piece.width(),
            height: piece.height(),
            id: piece.id,
            shape: piece.shape,
            color: piece.color,
        }
    }
}
