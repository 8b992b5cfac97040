use std::{collections::HashSet, fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{
    color::BlockColor,
    piece::{Piece, PieceId},
    shape::SHAPE_CATALOG,
};

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Draws random pieces for the tray.
///
/// Each piece gets a shape chosen uniformly from [`SHAPE_CATALOG`], a color
/// chosen uniformly from the palette, and a fresh 9-character base-36 id.
/// Draws are independent; there is no bag or weighting.
///
/// # Example
///
/// ```
/// use blockblast_engine::{PieceFactory, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = PieceFactory::with_seed(seed);
/// let mut b = PieceFactory::with_seed(seed);
///
/// assert_eq!(a.draw_pieces(3), b.draw_pieces(3));
/// ```
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: Pcg32,
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed serialized (and parsed with [`FromStr`]) as a 32-character
/// hex string. The same seed always yields the same sequence of pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    fn to_hex(self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        // writing to a String cannot fail
        let _ = write!(&mut hex_str, "{num:032x}");
        hex_str
    }
}

impl FromStr for PieceSeed {
    type Err = String;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num =
            u128::from_str_radix(hex_str, 16).map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl std::fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceFactory {
    /// Creates a factory seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws a single random piece.
    pub fn draw_piece(&mut self) -> Piece {
        let shape = SHAPE_CATALOG[self.rng.random_range(0..SHAPE_CATALOG.len())];
        let color: BlockColor = self.rng.random();
        Piece::new(self.random_id(), shape, color)
    }

    /// Draws `count` random pieces whose ids are pairwise distinct.
    pub fn draw_pieces(&mut self, count: usize) -> Vec<Piece> {
        let mut ids = HashSet::with_capacity(count);
        let mut pieces = Vec::with_capacity(count);
        while pieces.len() < count {
            let piece = self.draw_piece();
            if ids.insert(piece.id().clone()) {
                pieces.push(piece);
            }
        }
        pieces
    }

    fn random_id(&mut self) -> PieceId {
        let id = (0..ID_LEN)
            .map(|_| char::from(ID_ALPHABET[self.rng.random_range(0..ID_ALPHABET.len())]))
            .collect::<String>();
        PieceId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_format_is_32_char_hex_string() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let hex_str = serialized.trim_matches('"');

            assert_eq!(hex_str.len(), 32);
            assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = PieceSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");

            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, seed);
        }

        #[test]
        fn test_parse_accepts_uppercase_hex() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_error_invalid_hex() {
            for json in [
                "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
                "\"0123456789abcdef0123456789abcde\"",
                "\"0123456789abcdef0123456789abcdef0\"",
                "\"\"",
            ] {
                let err = serde_json::from_str::<PieceSeed>(json).unwrap_err();
                assert!(err.to_string().contains("invalid hex"), "{json}");
            }
        }
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = PieceSeed::from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);
        let mut factory1 = PieceFactory::with_seed(seed);
        let mut factory2 = PieceFactory::with_seed(seed);

        for _ in 0..20 {
            assert_eq!(factory1.draw_piece(), factory2.draw_piece());
        }
    }

    #[test]
    fn test_draw_pieces_count_and_unique_ids() {
        let mut factory = PieceFactory::with_seed(PieceSeed::from_bytes([3; 16]));
        for count in [0, 1, 3, 10] {
            let pieces = factory.draw_pieces(count);
            assert_eq!(pieces.len(), count);
            let ids = pieces.iter().map(Piece::id).collect::<HashSet<_>>();
            assert_eq!(ids.len(), count);
        }
    }

    #[test]
    fn test_piece_ids_are_base36() {
        let mut factory = PieceFactory::with_seed(PieceSeed::from_bytes([9; 16]));
        for piece in factory.draw_pieces(50) {
            let id = piece.id().as_str();
            assert_eq!(id.len(), 9);
            assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_draws_are_uniform_over_catalog_and_palette() {
        let mut factory = PieceFactory::with_seed(PieceSeed::from_bytes([42; 16]));
        let mut shapes = [0usize; SHAPE_CATALOG.len()];
        let mut colors = [0usize; BlockColor::LEN];
        let draws = 31 * 6 * 200;
        for _ in 0..draws {
            let piece = factory.draw_piece();
            let shape_index = SHAPE_CATALOG
                .iter()
                .position(|s| s == piece.shape())
                .unwrap();
            shapes[shape_index] += 1;
            colors[piece.color() as usize] += 1;
        }

        // every bucket within 30% of its expected count
        let expected_shape = draws / SHAPE_CATALOG.len();
        assert!(shapes.iter().all(|&n| n.abs_diff(expected_shape) * 10 < expected_shape * 3));
        let expected_color = draws / BlockColor::LEN;
        assert!(colors.iter().all(|&n| n.abs_diff(expected_color) * 10 < expected_color * 3));
    }
}
