//! Temperature unit conversion.

/// Offset between the Celsius and Kelvin scales.
pub const CELSIUS_OFFSET: f64 = 273.15;

/// Convert degrees Celsius to kelvin.
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + CELSIUS_OFFSET
}

/// Convert kelvin to degrees Celsius.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - CELSIUS_OFFSET
}
