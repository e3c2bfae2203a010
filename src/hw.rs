//! Hardware seam between the sampling sequence and the vendor driver.
//!
//! The ESP-IDF backend lives in `esp`; tests use a recording fake. Handles
//! are plain values owned by the caller, so every method takes `&self`.

use crate::config::{AdcConfig, Attenuation, BitWidth};
use crate::error::{DriverOp, Error, Result, ESP_ERR_NOT_SUPPORTED};

/// ADC peripheral instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcUnit {
    Adc1,
    Adc2,
}

impl AdcUnit {
    /// Map a pin table unit index to a supported unit
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(AdcUnit::Adc1),
            1 => Some(AdcUnit::Adc2),
            _ => None,
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            AdcUnit::Adc1 => 0,
            AdcUnit::Adc2 => 1,
        }
    }
}

/// Input line multiplexed into an ADC unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcChannel(pub u8);

/// Calibration method reported by the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationScheme {
    LineFitting,
    CurveFitting,
}

/// `ADC_CALI_SCHEME_VER_LINE_FITTING` bit of `adc_cali_check_scheme`
pub const SCHEME_VER_LINE_FITTING: u32 = 1 << 0;
/// `ADC_CALI_SCHEME_VER_CURVE_FITTING` bit of `adc_cali_check_scheme`
pub const SCHEME_VER_CURVE_FITTING: u32 = 1 << 1;

impl CalibrationScheme {
    /// Decode the scheme mask reported by the calibration library
    ///
    /// Line fitting wins when both bits are set. A mask with neither bit is
    /// a driver failure, not a curve fitting chip.
    pub fn from_mask(mask: u32) -> Result<Self> {
        if mask & SCHEME_VER_LINE_FITTING != 0 {
            Ok(CalibrationScheme::LineFitting)
        } else if mask & SCHEME_VER_CURVE_FITTING != 0 {
            Ok(CalibrationScheme::CurveFitting)
        } else {
            Err(Error::Driver {
                op: DriverOp::CheckScheme,
                code: ESP_ERR_NOT_SUPPORTED,
            })
        }
    }
}

/// Parameters for a line fitting calibration context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationConfig {
    pub unit: AdcUnit,
    pub attenuation: Attenuation,
    pub bit_width: BitWidth,
    pub default_vref_mv: u32,
}

impl CalibrationConfig {
    pub fn new(unit: AdcUnit, config: &AdcConfig) -> Self {
        Self {
            unit,
            attenuation: config.attenuation(),
            bit_width: config.bit_width(),
            default_vref_mv: config.default_vref_mv(),
        }
    }
}

/// Oneshot ADC driver and calibration library
pub trait AdcHardware {
    /// Oneshot unit handle
    type Unit;
    /// Calibration context handle
    type Calibration;

    /// Acquire a oneshot unit with ULP mode disabled
    fn new_unit(&self, unit: AdcUnit) -> Result<Self::Unit>;

    fn config_channel(
        &self,
        unit: &Self::Unit,
        channel: AdcChannel,
        bit_width: BitWidth,
        attenuation: Attenuation,
    ) -> Result<()>;

    fn read(&self, unit: &Self::Unit, channel: AdcChannel) -> Result<i32>;

    fn delete_unit(&self, unit: Self::Unit) -> Result<()>;

    fn check_scheme(&self) -> Result<CalibrationScheme>;

    fn create_line_fitting(&self, config: &CalibrationConfig) -> Result<Self::Calibration>;

    /// Convert a raw code to millivolts
    fn raw_to_voltage(&self, calibration: &Self::Calibration, raw: i32) -> Result<i32>;

    fn delete_line_fitting(&self, calibration: Self::Calibration) -> Result<()>;
}

/// Pin ownership and electrical configuration
pub trait PinControl {
    /// Mark a pin as owned; fails with `Error::PinInUse` if it already is
    fn claim(&self, pin: u8) -> Result<()>;

    fn release(&self, pin: u8);

    fn pullup_disable(&self, pin: u8) -> Result<()>;

    /// Restore the pin's default configuration
    fn reset(&self, pin: u8) -> Result<()>;
}
