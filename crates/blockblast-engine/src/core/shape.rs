use serde::{Deserialize, Serialize};

use crate::ShapeError;

/// Largest number of rows or columns a [`Shape`] may span.
pub const MAX_SHAPE_SIDE: usize = 8;

/// A polyomino footprint: a rectangular 0/1 matrix with at least one occupied cell.
///
/// Each row is stored as a bitmask where bit `j` is column `j`, so a shape is a
/// small `Copy` value regardless of its size.
///
/// Serialized as a matrix of integers, e.g. `[[1, 1, 1], [0, 1, 0]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [u8; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Parses a 0/1 matrix given row by row.
    #[expect(clippy::cast_possible_truncation)]
    pub const fn parse(matrix: &[&[u8]]) -> Result<Self, ShapeError> {
        let height = matrix.len();
        if height == 0 || height > MAX_SHAPE_SIDE {
            return Err(ShapeError::InvalidSize);
        }
        let width = matrix[0].len();
        if width == 0 || width > MAX_SHAPE_SIDE {
            return Err(ShapeError::InvalidSize);
        }

        let mut rows = [0; MAX_SHAPE_SIDE];
        let mut occupied = false;
        let mut i = 0;
        while i < height {
            if matrix[i].len() != width {
                return Err(ShapeError::RaggedRows);
            }
            let mut j = 0;
            while j < width {
                match matrix[i][j] {
                    0 => {}
                    1 => {
                        rows[i] |= 1 << j;
                        occupied = true;
                    }
                    v => return Err(ShapeError::InvalidCell(v)),
                }
                j += 1;
            }
            i += 1;
        }
        if !occupied {
            return Err(ShapeError::Empty);
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            rows,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Returns whether the cell at `(row, col)` is occupied. Out-of-range cells are not.
    #[must_use]
    pub const fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.rows[row] & (1 << col) != 0
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones() as usize).sum()
    }

    /// Returns the `(row, col)` offsets of occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |row| {
            (0..self.width())
                .filter(move |&col| self.is_occupied(row, col))
                .map(move |col| (row, col))
        })
    }

    #[must_use]
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|row| {
                (0..self.width())
                    .map(|col| u8::from(self.is_occupied(row, col)))
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = ShapeError;

    fn try_from(matrix: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let rows = matrix.iter().map(Vec::as_slice).collect::<Vec<_>>();
        Self::parse(&rows)
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape.to_matrix()
    }
}

const fn catalog_shape(matrix: &[&[u8]]) -> Shape {
    match Shape::parse(matrix) {
        Ok(shape) => shape,
        Err(_) => panic!("invalid catalog shape"),
    }
}

/// Every shape a freshly drawn piece can take, from single cells up to 3×3 blocks.
pub const SHAPE_CATALOG: [Shape; 31] = [
    // lines and squares
    catalog_shape(&[&[1]]),
    catalog_shape(&[&[1, 1]]),
    catalog_shape(&[&[1], &[1]]),
    catalog_shape(&[&[1, 1, 1]]),
    catalog_shape(&[&[1], &[1], &[1]]),
    catalog_shape(&[&[1, 1, 1, 1]]),
    catalog_shape(&[&[1], &[1], &[1], &[1]]),
    catalog_shape(&[&[1, 1], &[1, 1]]),
    // tetromino-like
    catalog_shape(&[&[1, 0], &[1, 0], &[1, 1]]),
    catalog_shape(&[&[0, 1], &[0, 1], &[1, 1]]),
    catalog_shape(&[&[1, 1, 1], &[0, 1, 0]]),
    catalog_shape(&[&[1, 1, 0], &[0, 1, 1]]),
    catalog_shape(&[&[0, 1, 1], &[1, 1, 0]]),
    catalog_shape(&[&[1, 0], &[1, 1]]),
    catalog_shape(&[&[0, 1], &[1, 1]]),
    catalog_shape(&[&[1, 1, 1], &[1, 0, 0]]),
    catalog_shape(&[&[1, 1, 1], &[0, 0, 1]]),
    // five-cell lines and 3x3 forms
    catalog_shape(&[&[1, 1, 1, 1, 1]]),
    catalog_shape(&[&[1], &[1], &[1], &[1], &[1]]),
    catalog_shape(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]),
    catalog_shape(&[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]),
    catalog_shape(&[&[1, 1, 1], &[1, 0, 1]]),
    catalog_shape(&[&[1, 0, 1], &[1, 1, 1]]),
    catalog_shape(&[&[1, 0, 0], &[1, 0, 0], &[1, 1, 1]]),
    catalog_shape(&[&[0, 0, 1], &[0, 0, 1], &[1, 1, 1]]),
    catalog_shape(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]),
    catalog_shape(&[&[0, 0, 1], &[0, 1, 0], &[1, 0, 0]]),
    catalog_shape(&[&[1, 1], &[1, 0]]),
    catalog_shape(&[&[1, 1], &[0, 1]]),
    catalog_shape(&[&[1, 1, 1], &[0, 1, 0], &[0, 1, 0]]),
    catalog_shape(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 1]]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes_are_distinct_and_small() {
        for (i, a) in SHAPE_CATALOG.iter().enumerate() {
            assert!(a.width() <= 5 && a.height() <= 5);
            assert!(a.cell_count() >= 1);
            for b in &SHAPE_CATALOG[i + 1..] {
                assert_ne!(a, b, "duplicate catalog shape {a:?}");
            }
        }
    }

    #[test]
    fn test_parse_reports_dimensions_and_cells() {
        let t = Shape::parse(&[&[1, 1, 1], &[0, 1, 0]]).unwrap();
        assert_eq!((t.width(), t.height()), (3, 2));
        assert_eq!(t.cell_count(), 4);
        assert_eq!(
            t.occupied_cells().collect::<Vec<_>>(),
            [(0, 0), (0, 1), (0, 2), (1, 1)]
        );
        assert!(!t.is_occupied(1, 0));
        assert!(!t.is_occupied(2, 1));
        assert!(!t.is_occupied(0, 3));
    }

    #[test]
    fn test_parse_rejects_malformed_matrices() {
        assert_eq!(Shape::parse(&[]), Err(ShapeError::InvalidSize));
        assert_eq!(Shape::parse(&[&[]]), Err(ShapeError::InvalidSize));
        assert_eq!(Shape::parse(&[&[1; 9]]), Err(ShapeError::InvalidSize));
        assert_eq!(Shape::parse(&[&[1, 1], &[1]]), Err(ShapeError::RaggedRows));
        assert_eq!(Shape::parse(&[&[1, 2]]), Err(ShapeError::InvalidCell(2)));
        assert_eq!(Shape::parse(&[&[0, 0], &[0, 0]]), Err(ShapeError::Empty));
    }

    #[test]
    fn test_matrix_json_format() {
        let plus = SHAPE_CATALOG[20];
        let json = serde_json::to_string(&plus).unwrap();
        assert_eq!(json, "[[0,1,0],[1,1,1],[0,1,0]]");

        let parsed: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, plus);

        assert!(serde_json::from_str::<Shape>("[[0,0]]").is_err());
        assert!(serde_json::from_str::<Shape>("[[1],[1,1]]").is_err());
    }
}
