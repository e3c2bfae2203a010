//! Recording hardware double for host tests

use std::cell::{Cell, RefCell};

use crate::analog_in::PinClaims;
use crate::config::{Attenuation, BitWidth};
use crate::error::{DriverOp, Error, Result};
use crate::hw::{AdcChannel, AdcHardware, AdcUnit, CalibrationConfig, CalibrationScheme, PinControl};

/// Driver call as seen by the fake, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    NewUnit(AdcUnit),
    ConfigChannel(AdcChannel, BitWidth, Attenuation),
    Read(AdcChannel),
    DeleteUnit,
    CheckScheme,
    CreateLineFitting(CalibrationConfig),
    RawToVoltage(i32),
    DeleteLineFitting,
    Claim(u8),
    Release(u8),
    PullupDisable(u8),
    Reset(u8),
}

#[derive(Debug)]
pub struct FakeUnit;

#[derive(Debug)]
pub struct FakeCalibration;

pub struct FakeHardware {
    calls: RefCell<Vec<Call>>,
    failures: RefCell<Vec<(DriverOp, i32)>>,
    scheme: Cell<CalibrationScheme>,
    raw: Cell<i32>,
    offset_mv: Cell<i32>,
    open: Cell<i32>,
    claims: PinClaims,
}

impl FakeHardware {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(Vec::new()),
            scheme: Cell::new(CalibrationScheme::LineFitting),
            raw: Cell::new(1000),
            offset_mv: Cell::new(0),
            open: Cell::new(0),
            claims: PinClaims::new(),
        }
    }

    pub fn with_scheme(self, scheme: CalibrationScheme) -> Self {
        self.scheme.set(scheme);
        self
    }

    /// Raw code returned by every `read`
    pub fn with_raw(self, raw: i32) -> Self {
        self.raw.set(raw);
        self
    }

    /// Shift applied after the linear conversion
    pub fn with_offset_mv(self, offset_mv: i32) -> Self {
        self.offset_mv.set(offset_mv);
        self
    }

    /// Make every call of `op` fail with `code`
    pub fn fail_on(&self, op: DriverOp, code: i32) {
        self.failures.borrow_mut().push((op, code));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Units and calibration contexts created but not yet deleted
    pub fn open_handles(&self) -> i32 {
        self.open.get()
    }

    pub fn is_claimed(&self, pin: u8) -> bool {
        self.claims.is_claimed(pin)
    }

    /// Millivolts the fake converts `raw` to
    pub fn millivolts(&self, raw: i32) -> i32 {
        raw * 3300 / 4095 + self.offset_mv.get()
    }

    fn record(&self, call: Call, op: DriverOp) -> Result<()> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow().iter().find(|(o, _)| *o == op) {
            Some(&(op, code)) => Err(Error::Driver { op, code }),
            None => Ok(()),
        }
    }
}

impl AdcHardware for FakeHardware {
    type Unit = FakeUnit;
    type Calibration = FakeCalibration;

    fn new_unit(&self, unit: AdcUnit) -> Result<FakeUnit> {
        self.record(Call::NewUnit(unit), DriverOp::NewUnit)?;
        self.open.set(self.open.get() + 1);
        Ok(FakeUnit)
    }

    fn config_channel(
        &self,
        _unit: &FakeUnit,
        channel: AdcChannel,
        bit_width: BitWidth,
        attenuation: Attenuation,
    ) -> Result<()> {
        self.record(
            Call::ConfigChannel(channel, bit_width, attenuation),
            DriverOp::ConfigChannel,
        )
    }

    fn read(&self, _unit: &FakeUnit, channel: AdcChannel) -> Result<i32> {
        self.record(Call::Read(channel), DriverOp::Read)?;
        Ok(self.raw.get())
    }

    fn delete_unit(&self, _unit: FakeUnit) -> Result<()> {
        self.record(Call::DeleteUnit, DriverOp::DeleteUnit)?;
        self.open.set(self.open.get() - 1);
        Ok(())
    }

    fn check_scheme(&self) -> Result<CalibrationScheme> {
        self.record(Call::CheckScheme, DriverOp::CheckScheme)?;
        Ok(self.scheme.get())
    }

    fn create_line_fitting(&self, config: &CalibrationConfig) -> Result<FakeCalibration> {
        self.record(Call::CreateLineFitting(*config), DriverOp::CreateScheme)?;
        self.open.set(self.open.get() + 1);
        Ok(FakeCalibration)
    }

    fn raw_to_voltage(&self, _calibration: &FakeCalibration, raw: i32) -> Result<i32> {
        self.record(Call::RawToVoltage(raw), DriverOp::RawToVoltage)?;
        Ok(self.millivolts(raw))
    }

    fn delete_line_fitting(&self, _calibration: FakeCalibration) -> Result<()> {
        self.record(Call::DeleteLineFitting, DriverOp::DeleteScheme)?;
        self.open.set(self.open.get() - 1);
        Ok(())
    }
}

impl PinControl for FakeHardware {
    fn claim(&self, pin: u8) -> Result<()> {
        self.calls.borrow_mut().push(Call::Claim(pin));
        self.claims.claim(pin)
    }

    fn release(&self, pin: u8) {
        self.calls.borrow_mut().push(Call::Release(pin));
        self.claims.release(pin);
    }

    fn pullup_disable(&self, pin: u8) -> Result<()> {
        self.record(Call::PullupDisable(pin), DriverOp::PullupDisable)
    }

    fn reset(&self, pin: u8) -> Result<()> {
        self.record(Call::Reset(pin), DriverOp::ResetPin)
    }
}
