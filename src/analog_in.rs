//! Analog input pins and calibrated reads
//!
//! An `AnalogPin` owns one GPIO for analog use. Construction claims the pin
//! and turns its pull-up off; `deinit` (or drop) resets and releases it.
//!
//! Each read runs the whole sequence against the driver:
//!
//! ```text
//! new_unit → config_channel → check_scheme → create_line_fitting
//!          → read → delete_unit → raw_to_voltage → delete_line_fitting
//! ```
//!
//! and rescales the calibrated millivolts to `0..=65535` over 3.3V.

use core::cell::Cell;

use critical_section::Mutex;
use log::{debug, warn};

use crate::calibration::{Calibration, OneshotUnit};
use crate::config::AdcConfig;
use crate::error::{Error, Result};
use crate::hw::{AdcChannel, AdcHardware, AdcUnit, CalibrationConfig, PinControl};

/// Pin has no ADC unit
pub const NO_ADC: u8 = 0xFF;
/// Pin has no ADC channel
pub const NO_ADC_CHANNEL: u8 = 0xFF;

/// Static description of a GPIO and its ADC wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinDescriptor {
    pub number: u8,
    /// ADC unit index (0 = ADC1), or `NO_ADC`
    pub adc_index: u8,
    /// Channel within the unit, or `NO_ADC_CHANNEL`
    pub adc_channel: u8,
}

impl PinDescriptor {
    pub const fn new(number: u8, adc_index: u8, adc_channel: u8) -> Self {
        Self {
            number,
            adc_index,
            adc_channel,
        }
    }

    /// Digital-only pin
    pub const fn digital(number: u8) -> Self {
        Self::new(number, NO_ADC, NO_ADC_CHANNEL)
    }

    pub const fn has_adc(&self) -> bool {
        self.adc_index != NO_ADC && self.adc_channel != NO_ADC_CHANNEL
    }
}

/// Claimed-pin bitmap for GPIO 0..64
pub struct PinClaims {
    claimed: Mutex<Cell<u64>>,
}

impl PinClaims {
    pub const fn new() -> Self {
        Self {
            claimed: Mutex::new(Cell::new(0)),
        }
    }

    fn bit(pin: u8) -> Result<u64> {
        1u64.checked_shl(pin as u32).ok_or(Error::InvalidPin)
    }

    pub fn claim(&self, pin: u8) -> Result<()> {
        let bit = Self::bit(pin)?;
        critical_section::with(|cs| {
            let claimed = self.claimed.borrow(cs);
            if claimed.get() & bit != 0 {
                return Err(Error::PinInUse);
            }
            claimed.set(claimed.get() | bit);
            Ok(())
        })
    }

    pub fn release(&self, pin: u8) {
        if let Ok(bit) = Self::bit(pin) {
            critical_section::with(|cs| {
                let claimed = self.claimed.borrow(cs);
                claimed.set(claimed.get() & !bit);
            });
        }
    }

    pub fn is_claimed(&self, pin: u8) -> bool {
        match Self::bit(pin) {
            Ok(bit) => critical_section::with(|cs| self.claimed.borrow(cs).get() & bit != 0),
            Err(_) => false,
        }
    }
}

impl Default for PinClaims {
    fn default() -> Self {
        Self::new()
    }
}

/// GPIO claimed for analog input
pub struct AnalogPin<'p, P: PinControl> {
    pins: &'p P,
    pin: Option<PinDescriptor>,
}

impl<'p, P: PinControl> AnalogPin<'p, P> {
    /// Claim `descriptor` for analog reads
    ///
    /// Fails with `Error::InvalidPin` before touching the pin if it has no
    /// ADC mapping.
    pub fn new(pins: &'p P, descriptor: PinDescriptor) -> Result<Self> {
        if !descriptor.has_adc() {
            return Err(Error::InvalidPin);
        }
        pins.claim(descriptor.number)?;

        // Pull-ups are on by default on quiescent pins. A high-impedance
        // source would take a while to settle against one.
        if let Err(e) = pins.pullup_disable(descriptor.number) {
            pins.release(descriptor.number);
            return Err(e);
        }

        debug!(
            "GPIO{} claimed for ADC{} CH{}",
            descriptor.number,
            descriptor.adc_index + 1,
            descriptor.adc_channel
        );

        Ok(Self {
            pins,
            pin: Some(descriptor),
        })
    }

    pub fn deinited(&self) -> bool {
        self.pin.is_none()
    }

    /// Reset and release the pin. Does nothing if already released.
    pub fn deinit(&mut self) {
        let Some(descriptor) = self.pin.take() else {
            return;
        };
        if let Err(e) = self.pins.reset(descriptor.number) {
            warn!("Failed to reset GPIO{}: {}", descriptor.number, e);
        }
        self.pins.release(descriptor.number);
        debug!("GPIO{} released", descriptor.number);
    }

    pub fn descriptor(&self) -> Result<&PinDescriptor> {
        self.pin.as_ref().ok_or(Error::Deinited)
    }

    /// Reference voltage in volts
    pub fn reference_voltage(&self, config: &AdcConfig) -> f32 {
        config.reference_voltage()
    }

    /// Calibrated reading scaled to `0..=65535`
    pub fn value<H: AdcHardware>(&self, hw: &H, config: &AdcConfig) -> Result<u16> {
        read_calibrated_voltage(hw, config, self)
    }
}

impl<P: PinControl> Drop for AnalogPin<'_, P> {
    fn drop(&mut self) {
        self.deinit();
    }
}

/// Take one calibrated sample from `pin`, scaled to `0..=65535`
pub fn read_calibrated_voltage<H, P>(
    hw: &H,
    config: &AdcConfig,
    pin: &AnalogPin<'_, P>,
) -> Result<u16>
where
    H: AdcHardware,
    P: PinControl,
{
    let descriptor = pin.descriptor()?;
    let unit = AdcUnit::from_index(descriptor.adc_index).ok_or(Error::InvalidPin)?;
    let channel = AdcChannel(descriptor.adc_channel);

    let oneshot = OneshotUnit::new(hw, unit)?;
    oneshot.config_channel(channel, config.bit_width(), config.attenuation())?;

    let calibration = Calibration::create(hw, &CalibrationConfig::new(unit, config))?;

    let raw = oneshot.read(channel)?;
    // Free the driver before converting
    oneshot.release()?;

    let millivolts = calibration.raw_to_voltage(raw)?;
    calibration.release()?;

    let scaled = config.scale(millivolts);
    debug!(
        "GPIO{} {:?} CH{}: raw={} mv={} scaled={}",
        descriptor.number, unit, channel.0, raw, millivolts, scaled
    );
    Ok(scaled)
}
