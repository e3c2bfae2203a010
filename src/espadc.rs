//! Calibration of raw codes captured elsewhere
//!
//! Useful when the ULP co-processor samples a sensor into shared memory and
//! the main core converts the raw values later. No pin is claimed and the
//! oneshot driver is never touched; only a calibration context for ADC1 is
//! created for the duration of the call.

use log::debug;

use crate::calibration::Calibration;
use crate::config::AdcConfig;
use crate::error::Result;
use crate::hw::{AdcHardware, AdcUnit, CalibrationConfig};

/// Calibrated millivolts for `raw`, or `None` if the result is negative
pub fn calibrate_raw<H: AdcHardware>(hw: &H, config: &AdcConfig, raw: i32) -> Result<Option<i32>> {
    let calibration = Calibration::create(hw, &CalibrationConfig::new(AdcUnit::Adc1, config))?;
    let millivolts = calibration.raw_to_voltage(raw)?;
    calibration.release()?;

    debug!("raw={} mv={}", raw, millivolts);
    Ok(non_negative(millivolts))
}

/// Convert a batch of raw codes with one calibration context
///
/// One entry per input, following the same rule as `calibrate_raw`.
pub fn calibrate_raw_many<H: AdcHardware>(
    hw: &H,
    config: &AdcConfig,
    raws: &[i32],
) -> Result<Vec<Option<i32>>> {
    let calibration = Calibration::create(hw, &CalibrationConfig::new(AdcUnit::Adc1, config))?;
    let millivolts = raws
        .iter()
        .map(|&raw| calibration.raw_to_voltage(raw).map(non_negative))
        .collect::<Result<Vec<_>>>()?;
    calibration.release()?;

    debug!("Calibrated {} raw samples", raws.len());
    Ok(millivolts)
}

fn non_negative(millivolts: i32) -> Option<i32> {
    (millivolts >= 0).then_some(millivolts)
}
