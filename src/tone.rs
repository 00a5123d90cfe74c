//! Byte to tone mapping
//!
//! Every byte value maps to exactly one frequency and one palette slot. The
//! mapping is total and pure: no byte is invalid.

/// Hz per unit of byte value
pub const HZ_PER_STEP: u32 = 100;

/// Number of palette slots a byte can select
pub const PALETTE_SIZE: usize = 8;

/// Tone frequency for a byte: `byte * 100` Hz (0 is silence)
#[inline]
pub fn frequency(byte: u8) -> u32 {
    byte as u32 * HZ_PER_STEP
}

/// Palette slot for a byte: `byte % 8`
#[inline]
pub fn color_index(byte: u8) -> usize {
    byte as usize % PALETTE_SIZE
}

/// Spectrum bar height for a byte: `byte / 8`
#[inline]
pub fn height(byte: u8) -> usize {
    byte as usize / PALETTE_SIZE
}

/// Everything derived from a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    /// Source byte
    pub byte: u8,
    /// Frequency in Hz
    pub frequency: u32,
    /// Palette slot (0-7)
    pub color_index: usize,
    /// Spectrum bar height
    pub height: usize,
}

impl Tone {
    /// Derive the tone for a byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            byte,
            frequency: frequency(byte),
            color_index: color_index(byte),
            height: height(byte),
        }
    }

    /// Whether this tone is the zero-frequency silence
    pub fn is_silent(&self) -> bool {
        self.frequency == 0
    }
}

impl From<u8> for Tone {
    fn from(byte: u8) -> Self {
        Tone::from_byte(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_is_byte_times_hundred() {
        for b in 0..=255u8 {
            assert_eq!(frequency(b), b as u32 * 100);
            assert_eq!(frequency(b) % 100, 0);
        }
        assert_eq!(frequency(0), 0);
        assert_eq!(frequency(255), 25_500);
    }

    #[test]
    fn color_index_stays_in_palette() {
        for b in 0..=255u8 {
            let idx = color_index(b);
            assert!(idx < PALETTE_SIZE);
            assert_eq!(idx, b as usize % 8);
        }
    }

    #[test]
    fn height_counts_palette_wraps() {
        assert_eq!(height(0), 0);
        assert_eq!(height(7), 0);
        assert_eq!(height(8), 1);
        assert_eq!(height(255), 31);
    }

    #[test]
    fn tone_bundles_derived_values() {
        let tone = Tone::from(0x2Au8);
        assert_eq!(tone.frequency, 4200);
        assert_eq!(tone.color_index, 2);
        assert_eq!(tone.height, 5);
        assert!(!tone.is_silent());
        assert!(Tone::from_byte(0).is_silent());
    }
}
