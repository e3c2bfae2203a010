fn main() {
    // Link arguments for the ESP-IDF toolchain, only needed for device builds
    #[cfg(feature = "esp-idf")]
    embuild::espidf::sysenv::output();
}
