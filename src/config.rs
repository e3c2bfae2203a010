//! ADC configuration shared by every read and conversion
//!
//! The raw-to-scaled path and the raw-to-millivolt path must agree on bit
//! width, attenuation and reference voltage, so both take the same
//! immutable `AdcConfig`.

use core::num::NonZeroU32;

// Defaults
const DEFAULT_BIT_WIDTH: BitWidth = BitWidth::Bits12;
const DEFAULT_ATTENUATION: Attenuation = Attenuation::Db11;
const DEFAULT_REFERENCE_MV: NonZeroU32 = match NonZeroU32::new(3300) {
    Some(mv) => mv,
    None => panic!("reference voltage must be non-zero"),
};
/// Used by line fitting on chips without an eFuse Vref (ESP32)
const DEFAULT_VREF_MV: u32 = 1100;

/// Scaled readings span the full 16-bit range
pub const SCALED_MAX: u32 = u16::MAX as u32;

/// ADC conversion resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitWidth {
    Bits9,
    Bits10,
    Bits11,
    Bits12,
    Bits13,
}

impl BitWidth {
    /// Number of bits per sample
    pub const fn bits(self) -> u32 {
        match self {
            BitWidth::Bits9 => 9,
            BitWidth::Bits10 => 10,
            BitWidth::Bits11 => 11,
            BitWidth::Bits12 => 12,
            BitWidth::Bits13 => 13,
        }
    }
}

/// Input attenuation, selects the usable input voltage range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attenuation {
    /// ~100-950 mV
    Db0,
    /// ~100-1250 mV
    Db2_5,
    /// ~150-1750 mV
    Db6,
    /// ~150-2450 mV (named 12 dB in newer ESP-IDF releases)
    Db11,
}

/// Immutable ADC configuration
///
/// The reference voltage is also the full-scale divisor of `scale`, so the
/// reported reference and the scaled readings cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcConfig {
    bit_width: BitWidth,
    attenuation: Attenuation,
    reference_mv: NonZeroU32,
    default_vref_mv: u32,
}

impl AdcConfig {
    pub const DEFAULT: Self = Self::new(DEFAULT_BIT_WIDTH, DEFAULT_ATTENUATION);

    /// Default reference and Vref with the given width and attenuation
    pub const fn new(bit_width: BitWidth, attenuation: Attenuation) -> Self {
        Self {
            bit_width,
            attenuation,
            reference_mv: DEFAULT_REFERENCE_MV,
            default_vref_mv: DEFAULT_VREF_MV,
        }
    }

    pub const fn with_reference_mv(self, reference_mv: NonZeroU32) -> Self {
        Self {
            reference_mv,
            ..self
        }
    }

    pub const fn with_default_vref_mv(self, default_vref_mv: u32) -> Self {
        Self {
            default_vref_mv,
            ..self
        }
    }

    pub const fn bit_width(&self) -> BitWidth {
        self.bit_width
    }

    pub const fn attenuation(&self) -> Attenuation {
        self.attenuation
    }

    /// Reference voltage in millivolts, maps to `SCALED_MAX`
    pub const fn reference_mv(&self) -> u32 {
        self.reference_mv.get()
    }

    pub const fn default_vref_mv(&self) -> u32 {
        self.default_vref_mv
    }

    /// Reference voltage in volts
    pub fn reference_voltage(&self) -> f32 {
        self.reference_mv() as f32 / 1000.0
    }

    /// Largest raw code the configured width can produce
    pub const fn max_raw(&self) -> i32 {
        (1 << self.bit_width.bits()) - 1
    }

    /// Rescale calibrated millivolts into the 0..=65535 range
    ///
    /// `millivolts * 65535 / reference_mv` with integer truncation.
    /// Negative input clamps to 0, anything past full scale saturates.
    pub fn scale(&self, millivolts: i32) -> u16 {
        let Ok(millivolts) = u64::try_from(millivolts) else {
            return 0;
        };
        let scaled = millivolts * SCALED_MAX as u64 / self.reference_mv() as u64;
        u16::try_from(scaled).unwrap_or(u16::MAX)
    }
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
