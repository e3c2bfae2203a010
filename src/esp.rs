//! ESP-IDF backend over the `esp_adc` oneshot and calibration APIs
//!
//! Requires ESP-IDF v5.0 or newer.

use esp_idf_svc::sys::{self, esp, EspError};

use crate::analog_in::PinClaims;
use crate::config::{Attenuation, BitWidth};
use crate::error::{DriverOp, Error, Result, ESP_ERR_NOT_SUPPORTED};
use crate::hw::{
    AdcChannel, AdcHardware, AdcUnit, CalibrationConfig, CalibrationScheme, PinControl,
    SCHEME_VER_CURVE_FITTING, SCHEME_VER_LINE_FITTING,
};

// Host-side copies of the ESP-IDF constants must match the bindings
const _: () = assert!(
    SCHEME_VER_LINE_FITTING == sys::adc_cali_scheme_ver_t_ADC_CALI_SCHEME_VER_LINE_FITTING
);
const _: () = assert!(
    SCHEME_VER_CURVE_FITTING == sys::adc_cali_scheme_ver_t_ADC_CALI_SCHEME_VER_CURVE_FITTING
);
const _: () = assert!(ESP_ERR_NOT_SUPPORTED == sys::ESP_ERR_NOT_SUPPORTED as i32);

/// Pins owned by any `AnalogPin` in this program
static CLAIMS: PinClaims = PinClaims::new();

fn driver(op: DriverOp) -> impl FnOnce(EspError) -> Error {
    move |e| Error::Driver { op, code: e.code() }
}

fn unit_id(unit: AdcUnit) -> sys::adc_unit_t {
    match unit {
        AdcUnit::Adc1 => sys::adc_unit_t_ADC_UNIT_1,
        AdcUnit::Adc2 => sys::adc_unit_t_ADC_UNIT_2,
    }
}

fn atten(attenuation: Attenuation) -> sys::adc_atten_t {
    match attenuation {
        Attenuation::Db0 => sys::adc_atten_t_ADC_ATTEN_DB_0,
        Attenuation::Db2_5 => sys::adc_atten_t_ADC_ATTEN_DB_2_5,
        Attenuation::Db6 => sys::adc_atten_t_ADC_ATTEN_DB_6,
        Attenuation::Db11 => sys::adc_atten_t_ADC_ATTEN_DB_11,
    }
}

fn bitwidth(bit_width: BitWidth) -> sys::adc_bitwidth_t {
    match bit_width {
        BitWidth::Bits9 => sys::adc_bitwidth_t_ADC_BITWIDTH_9,
        BitWidth::Bits10 => sys::adc_bitwidth_t_ADC_BITWIDTH_10,
        BitWidth::Bits11 => sys::adc_bitwidth_t_ADC_BITWIDTH_11,
        BitWidth::Bits12 => sys::adc_bitwidth_t_ADC_BITWIDTH_12,
        BitWidth::Bits13 => sys::adc_bitwidth_t_ADC_BITWIDTH_13,
    }
}

/// Oneshot unit handle from `adc_oneshot_new_unit`
pub struct EspUnit(sys::adc_oneshot_unit_handle_t);

/// Calibration handle from `adc_cali_create_scheme_*`
pub struct EspCalibration(sys::adc_cali_handle_t);

/// ADC and GPIO access through ESP-IDF
pub struct EspAdc {
    _private: (),
}

impl EspAdc {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for EspAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl AdcHardware for EspAdc {
    type Unit = EspUnit;
    type Calibration = EspCalibration;

    fn new_unit(&self, unit: AdcUnit) -> Result<EspUnit> {
        let config = sys::adc_oneshot_unit_init_cfg_t {
            unit_id: unit_id(unit),
            ulp_mode: sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        let mut handle: sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
        esp!(unsafe { sys::adc_oneshot_new_unit(&config, &mut handle) })
            .map_err(driver(DriverOp::NewUnit))?;
        Ok(EspUnit(handle))
    }

    fn config_channel(
        &self,
        unit: &EspUnit,
        channel: AdcChannel,
        bit_width: BitWidth,
        attenuation: Attenuation,
    ) -> Result<()> {
        let config = sys::adc_oneshot_chan_cfg_t {
            atten: atten(attenuation),
            bitwidth: bitwidth(bit_width),
        };
        esp!(unsafe {
            sys::adc_oneshot_config_channel(unit.0, channel.0 as sys::adc_channel_t, &config)
        })
        .map_err(driver(DriverOp::ConfigChannel))
    }

    fn read(&self, unit: &EspUnit, channel: AdcChannel) -> Result<i32> {
        let mut raw = 0;
        esp!(unsafe { sys::adc_oneshot_read(unit.0, channel.0 as sys::adc_channel_t, &mut raw) })
            .map_err(driver(DriverOp::Read))?;
        Ok(raw)
    }

    fn delete_unit(&self, unit: EspUnit) -> Result<()> {
        esp!(unsafe { sys::adc_oneshot_del_unit(unit.0) }).map_err(driver(DriverOp::DeleteUnit))
    }

    fn check_scheme(&self) -> Result<CalibrationScheme> {
        let mut mask: sys::adc_cali_scheme_ver_t = 0;
        esp!(unsafe { sys::adc_cali_check_scheme(&mut mask) })
            .map_err(driver(DriverOp::CheckScheme))?;

        CalibrationScheme::from_mask(mask)
    }

    #[cfg(any(esp32, esp32s2, esp32c2))]
    fn create_line_fitting(&self, config: &CalibrationConfig) -> Result<EspCalibration> {
        let cali_config = sys::adc_cali_line_fitting_config_t {
            unit_id: unit_id(config.unit),
            atten: atten(config.attenuation),
            bitwidth: bitwidth(config.bit_width),
            #[cfg(esp32)]
            default_vref: config.default_vref_mv,
            ..Default::default()
        };
        let mut handle: sys::adc_cali_handle_t = core::ptr::null_mut();
        esp!(unsafe { sys::adc_cali_create_scheme_line_fitting(&cali_config, &mut handle) })
            .map_err(driver(DriverOp::CreateScheme))?;
        Ok(EspCalibration(handle))
    }

    /// Chips without line fitting report curve fitting from `check_scheme`
    #[cfg(not(any(esp32, esp32s2, esp32c2)))]
    fn create_line_fitting(&self, _config: &CalibrationConfig) -> Result<EspCalibration> {
        Err(Error::NotImplemented)
    }

    fn raw_to_voltage(&self, calibration: &EspCalibration, raw: i32) -> Result<i32> {
        let mut voltage = 0;
        esp!(unsafe { sys::adc_cali_raw_to_voltage(calibration.0, raw, &mut voltage) })
            .map_err(driver(DriverOp::RawToVoltage))?;
        Ok(voltage)
    }

    #[cfg(any(esp32, esp32s2, esp32c2))]
    fn delete_line_fitting(&self, calibration: EspCalibration) -> Result<()> {
        esp!(unsafe { sys::adc_cali_delete_scheme_line_fitting(calibration.0) })
            .map_err(driver(DriverOp::DeleteScheme))
    }

    #[cfg(not(any(esp32, esp32s2, esp32c2)))]
    fn delete_line_fitting(&self, _calibration: EspCalibration) -> Result<()> {
        Err(Error::NotImplemented)
    }
}

impl PinControl for EspAdc {
    fn claim(&self, pin: u8) -> Result<()> {
        CLAIMS.claim(pin)
    }

    fn release(&self, pin: u8) {
        CLAIMS.release(pin);
    }

    fn pullup_disable(&self, pin: u8) -> Result<()> {
        esp!(unsafe { sys::gpio_pullup_dis(pin as sys::gpio_num_t) })
            .map_err(driver(DriverOp::PullupDisable))
    }

    fn reset(&self, pin: u8) -> Result<()> {
        esp!(unsafe { sys::gpio_reset_pin(pin as sys::gpio_num_t) })
            .map_err(driver(DriverOp::ResetPin))
    }
}
