//! Analog Front End of the Reference Board
//!
//! The MQ-137 heater and sensing element run from 5 V. The sensing node sits
//! across the load resistor and is brought down to the 3.3 V ADC range by a
//! resistive divider, so the firmware scales the measured voltage back up
//! before applying the sensor model.

/// Sensor supply voltage Vcc (V).
///
/// MQ-series modules require 5.0 V ± 0.1 V on the heater and the circuit.
///
/// Source: MQ-137 datasheet, standard working condition
pub const SUPPLY_VOLTAGE_V: f32 = 5.0;

/// Load resistor RL in series with the sensing element (kΩ).
///
/// Resistances computed by the estimator share this unit.
pub const LOAD_RESISTANCE_KOHM: f32 = 2.2;

/// ADC reference voltage (V).
///
/// ESP32 ADC1 with 11 dB attenuation spans roughly 0 - 3.3 V.
pub const ADC_REFERENCE_V: f32 = 3.3;

/// Full-scale ADC code (12-bit converter).
pub const ADC_MAX_COUNT: u16 = 4095;

/// Divider leg between the sensing node and the ADC pin (kΩ).
pub const DIVIDER_TOP_KOHM: f32 = 3.3;

/// Divider leg between the ADC pin and ground (kΩ).
pub const DIVIDER_BOTTOM_KOHM: f32 = 2.2;
