use std::collections::BTreeSet;

use derive_more::Into;

/// Number of visually distinct superset colors a renderer is expected to
/// provide.
pub const PALETTE_SIZE: u8 = 6;

#[derive(Debug, Default, Into, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ColorIndex(u8);

impl ColorIndex {
    pub fn new(value: u8) -> Result<Self, ColorIndexError> {
        if value >= PALETTE_SIZE {
            return Err(ColorIndexError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the lowest palette index not in `used`. Once every color is
    /// in use the palette wraps and duplicates are permitted.
    #[must_use]
    pub fn next_free(used: &BTreeSet<ColorIndex>) -> ColorIndex {
        (0..PALETTE_SIZE)
            .map(ColorIndex)
            .find(|color| !used.contains(color))
            .unwrap_or_else(|| {
                #[allow(clippy::cast_possible_truncation)]
                ColorIndex(used.len() as u8 % PALETTE_SIZE)
            })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ColorIndexError {
    #[error("Color must be one of the {PALETTE_SIZE} palette indices ({0} >= {PALETTE_SIZE})")]
    OutOfRange(u8),
}
