//! Scoped ownership of oneshot units and calibration contexts
//!
//! Both handles are created and destroyed within a single read. The guards
//! delete their handle on drop so an early `?` return never leaks one;
//! `release` deletes it explicitly and reports the driver status.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::hw::{AdcChannel, AdcHardware, AdcUnit, CalibrationConfig, CalibrationScheme};
use crate::config::{Attenuation, BitWidth};

/// Oneshot unit that is deleted when dropped
pub struct OneshotUnit<'h, H: AdcHardware> {
    hw: &'h H,
    unit: Option<H::Unit>,
}

impl<'h, H: AdcHardware> OneshotUnit<'h, H> {
    pub fn new(hw: &'h H, unit: AdcUnit) -> Result<Self> {
        let handle = hw.new_unit(unit)?;
        Ok(Self {
            hw,
            unit: Some(handle),
        })
    }

    fn handle(&self) -> &H::Unit {
        // Only `release` empties the slot and it consumes the guard
        match &self.unit {
            Some(unit) => unit,
            None => unreachable!("oneshot unit already released"),
        }
    }

    pub fn config_channel(
        &self,
        channel: AdcChannel,
        bit_width: BitWidth,
        attenuation: Attenuation,
    ) -> Result<()> {
        self.hw
            .config_channel(self.handle(), channel, bit_width, attenuation)
    }

    pub fn read(&self, channel: AdcChannel) -> Result<i32> {
        self.hw.read(self.handle(), channel)
    }

    /// Delete the unit now
    pub fn release(mut self) -> Result<()> {
        match self.unit.take() {
            Some(unit) => self.hw.delete_unit(unit),
            None => Ok(()),
        }
    }
}

impl<H: AdcHardware> Drop for OneshotUnit<'_, H> {
    fn drop(&mut self) {
        if let Some(unit) = self.unit.take() {
            if let Err(e) = self.hw.delete_unit(unit) {
                warn!("Failed to delete oneshot unit: {}", e);
            }
        }
    }
}

/// Calibration context that is deleted when dropped
pub struct Calibration<'h, H: AdcHardware> {
    hw: &'h H,
    handle: Option<H::Calibration>,
}

impl<'h, H: AdcHardware> Calibration<'h, H> {
    /// Detect the chip's calibration scheme and build a matching context
    ///
    /// Curve fitting is rejected with `Error::NotImplemented`.
    pub fn create(hw: &'h H, config: &CalibrationConfig) -> Result<Self> {
        let scheme = hw.check_scheme()?;
        debug!("Calibration scheme: {:?}", scheme);

        match scheme {
            CalibrationScheme::LineFitting => {
                let handle = hw.create_line_fitting(config)?;
                Ok(Self {
                    hw,
                    handle: Some(handle),
                })
            }
            CalibrationScheme::CurveFitting => Err(Error::NotImplemented),
        }
    }

    fn handle(&self) -> &H::Calibration {
        match &self.handle {
            Some(handle) => handle,
            None => unreachable!("calibration context already released"),
        }
    }

    /// Convert a raw code to millivolts
    pub fn raw_to_voltage(&self, raw: i32) -> Result<i32> {
        self.hw.raw_to_voltage(self.handle(), raw)
    }

    /// Delete the context now
    pub fn release(mut self) -> Result<()> {
        match self.handle.take() {
            Some(handle) => self.hw.delete_line_fitting(handle),
            None => Ok(()),
        }
    }
}

impl<H: AdcHardware> Drop for Calibration<'_, H> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = self.hw.delete_line_fitting(handle) {
                warn!("Failed to delete calibration context: {}", e);
            }
        }
    }
}
