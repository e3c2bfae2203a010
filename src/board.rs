//! GPIO to ADC wiring per chip

pub mod esp32 {
    //! ESP32 (WROOM/WROVER). ADC2 is unavailable while Wi-Fi is running.

    use crate::analog_in::PinDescriptor;

    /// | GPIO | Unit | Channel |
    /// |------|------|---------|
    /// | 36 | ADC1 | 0 |
    /// | 37 | ADC1 | 1 |
    /// | 38 | ADC1 | 2 |
    /// | 39 | ADC1 | 3 |
    /// | 32 | ADC1 | 4 |
    /// | 33 | ADC1 | 5 |
    /// | 34 | ADC1 | 6 |
    /// | 35 | ADC1 | 7 |
    /// | 4  | ADC2 | 0 |
    /// | 0  | ADC2 | 1 |
    /// | 2  | ADC2 | 2 |
    /// | 15 | ADC2 | 3 |
    /// | 13 | ADC2 | 4 |
    /// | 12 | ADC2 | 5 |
    /// | 14 | ADC2 | 6 |
    /// | 27 | ADC2 | 7 |
    /// | 25 | ADC2 | 8 |
    /// | 26 | ADC2 | 9 |
    pub const ADC_PINS: [PinDescriptor; 18] = [
        PinDescriptor::new(36, 0, 0),
        PinDescriptor::new(37, 0, 1),
        PinDescriptor::new(38, 0, 2),
        PinDescriptor::new(39, 0, 3),
        PinDescriptor::new(32, 0, 4),
        PinDescriptor::new(33, 0, 5),
        PinDescriptor::new(34, 0, 6),
        PinDescriptor::new(35, 0, 7),
        PinDescriptor::new(4, 1, 0),
        PinDescriptor::new(0, 1, 1),
        PinDescriptor::new(2, 1, 2),
        PinDescriptor::new(15, 1, 3),
        PinDescriptor::new(13, 1, 4),
        PinDescriptor::new(12, 1, 5),
        PinDescriptor::new(14, 1, 6),
        PinDescriptor::new(27, 1, 7),
        PinDescriptor::new(25, 1, 8),
        PinDescriptor::new(26, 1, 9),
    ];

    /// Descriptor for `number`, digital-only if it has no ADC channel
    pub fn pin(number: u8) -> PinDescriptor {
        ADC_PINS
            .iter()
            .copied()
            .find(|p| p.number == number)
            .unwrap_or(PinDescriptor::digital(number))
    }
}

#[cfg(test)]
mod tests {
    use super::esp32;
    use crate::analog_in::{NO_ADC, NO_ADC_CHANNEL};

    #[test]
    fn test_esp32_adc1_pin() {
        let pin = esp32::pin(36);
        assert_eq!((pin.adc_index, pin.adc_channel), (0, 0));
        assert!(pin.has_adc());
    }

    #[test]
    fn test_esp32_digital_pin() {
        let pin = esp32::pin(21);
        assert_eq!(pin.number, 21);
        assert_eq!((pin.adc_index, pin.adc_channel), (NO_ADC, NO_ADC_CHANNEL));
        assert!(!pin.has_adc());
    }

    #[test]
    fn test_esp32_table_has_unique_pins() {
        for (i, a) in esp32::ADC_PINS.iter().enumerate() {
            for b in &esp32::ADC_PINS[i + 1..] {
                assert_ne!(a.number, b.number);
                assert!(
                    a.adc_index != b.adc_index || a.adc_channel != b.adc_channel,
                    "GPIO{} and GPIO{} share a channel",
                    a.number,
                    b.number
                );
            }
        }
    }
}
