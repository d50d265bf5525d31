fn main() {
    // Only the ESP-IDF build needs the sysenv exported; host builds skip it.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
