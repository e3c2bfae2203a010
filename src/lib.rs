#![allow(unexpected_cfgs)]

pub mod analog_in;
pub mod board;
pub mod calibration;
pub mod config;
pub mod error;
pub mod espadc;
pub mod hw;

#[cfg(feature = "esp-idf")]
pub mod esp;

#[cfg(test)]
mod fake;

pub use analog_in::{read_calibrated_voltage, AnalogPin, PinDescriptor, NO_ADC, NO_ADC_CHANNEL};
pub use config::AdcConfig;
pub use error::{DriverOp, Error, Result};
pub use espadc::{calibrate_raw, calibrate_raw_many};
