use core::fmt;

/// `ESP_ERR_NOT_SUPPORTED` from `esp_err.h`
pub const ESP_ERR_NOT_SUPPORTED: i32 = 0x106;

/// Vendor driver call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOp {
    /// `adc_oneshot_new_unit`
    NewUnit,
    /// `adc_oneshot_config_channel`
    ConfigChannel,
    /// `adc_oneshot_read`
    Read,
    /// `adc_oneshot_del_unit`
    DeleteUnit,
    /// `adc_cali_check_scheme`
    CheckScheme,
    /// `adc_cali_create_scheme_line_fitting`
    CreateScheme,
    /// `adc_cali_raw_to_voltage`
    RawToVoltage,
    /// `adc_cali_delete_scheme_line_fitting`
    DeleteScheme,
    /// `gpio_pullup_dis`
    PullupDisable,
    /// `gpio_reset_pin`
    ResetPin,
}

/// Errors that can occur while claiming a pin or reading the ADC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Pin has no ADC unit/channel, or its unit is not supported
    InvalidPin,
    /// Pin is already claimed by another owner
    PinInUse,
    /// Pin was released
    Deinited,
    /// Curve fitting calibration detected, only line fitting is supported
    NotImplemented,
    /// Driver call failed with an `esp_err_t` status code
    Driver { op: DriverOp, code: i32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPin => write!(f, "invalid pin"),
            Error::PinInUse => write!(f, "pin in use"),
            Error::Deinited => write!(f, "object has been deinitialized"),
            Error::NotImplemented => write!(f, "curve fitting calibration not implemented"),
            Error::Driver { op, code } => write!(f, "{:?} failed: esp_err_t 0x{:X}", op, code),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
