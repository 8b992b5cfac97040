use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Color of a placed piece, drawn from a fixed six-entry palette.
///
/// Serialized as the palette's hex string (e.g. `"#e94560"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockColor {
    Crimson = 0,
    Violet = 1,
    Cyan = 2,
    Amber = 3,
    Emerald = 4,
    Blue = 5,
}

impl BlockColor {
    /// Number of palette entries (6).
    pub const LEN: usize = 6;

    pub const ALL: [BlockColor; Self::LEN] = [
        BlockColor::Crimson,
        BlockColor::Violet,
        BlockColor::Cyan,
        BlockColor::Amber,
        BlockColor::Emerald,
        BlockColor::Blue,
    ];

    #[must_use]
    pub const fn as_hex(self) -> &'static str {
        match self {
            BlockColor::Crimson => "#e94560",
            BlockColor::Violet => "#533483",
            BlockColor::Cyan => "#06B6D4",
            BlockColor::Amber => "#F59E0B",
            BlockColor::Emerald => "#10B981",
            BlockColor::Blue => "#3B82F6",
        }
    }

    /// Parses a palette hex string, ignoring ASCII case.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_hex().eq_ignore_ascii_case(hex))
    }

    /// Returns the color as `(r, g, b)` components.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            BlockColor::Crimson => (0xe9, 0x45, 0x60),
            BlockColor::Violet => (0x53, 0x34, 0x83),
            BlockColor::Cyan => (0x06, 0xb6, 0xd4),
            BlockColor::Amber => (0xf5, 0x9e, 0x0b),
            BlockColor::Emerald => (0x10, 0xb9, 0x81),
            BlockColor::Blue => (0x3b, 0x82, 0xf6),
        }
    }
}

impl Distribution<BlockColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockColor {
        BlockColor::ALL[rng.random_range(0..BlockColor::LEN)]
    }
}

impl Serialize for BlockColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_hex())
    }
}

impl<'de> Deserialize<'de> for BlockColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        BlockColor::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown block color: {hex}")))
    }
}
