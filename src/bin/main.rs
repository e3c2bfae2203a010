use std::thread;
use std::time::Duration;

use esp_idf_svc::log::EspLogger;
use log::{error, info, warn};

use espadc::esp::EspAdc;
use espadc::{board, AdcConfig, AnalogPin, Error};

/// GPIO36 (ADC1_CH0), ADC1 keeps working while Wi-Fi is up
const SENSE_PIN: u8 = 36;

/// Raw code converted on startup as a calibration sanity check
const PROBE_RAW: i32 = 1000;

fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    EspLogger::initialize_default();

    info!("espadc v{}", env!("CARGO_PKG_VERSION"));

    let adc = EspAdc::new();
    let config = AdcConfig::DEFAULT;

    match espadc::calibrate_raw(&adc, &config, PROBE_RAW) {
        Ok(Some(mv)) => info!("raw {} -> {} mV", PROBE_RAW, mv),
        Ok(None) => warn!("raw {} has no meaningful voltage", PROBE_RAW),
        Err(Error::NotImplemented) => {
            anyhow::bail!("Chip uses curve fitting calibration, which is not supported")
        }
        Err(e) => return Err(e.into()),
    }

    let pin = AnalogPin::new(&adc, board::esp32::pin(SENSE_PIN))?;
    info!(
        "Sampling GPIO{} against {:.1}V reference",
        SENSE_PIN,
        pin.reference_voltage(&config)
    );

    loop {
        match pin.value(&adc, &config) {
            Ok(value) => info!("GPIO{}: {}", SENSE_PIN, value),
            Err(e) => error!("GPIO{} read failed: {}", SENSE_PIN, e),
        }
        thread::sleep(Duration::from_secs(1));
    }
}
