// src/common/types.rs

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use super::error::ValueError;

// --- Scaled values (`D.DDE±X`) ---

/// Encodes a pressure into the gauge's compact scientific notation.
///
/// The mantissa is the first four characters of `value` printed with two
/// fractional digits in scientific notation; the exponent is `floor(log10(value))`.
/// When the mantissa rounds up into the next decade (`9.999` -> `1.00`) the
/// exponent is not adjusted, which matches what the gauge firmware expects in
/// its three character field.
///
/// Zero is sent as the bare digit `0`.
pub fn encode_scaled_value(value: f64) -> Result<String, ValueError> {
    if !value.is_finite() {
        return Err(ValueError::NonFinite);
    }
    if value < 0.0 {
        return Err(ValueError::Negative(value));
    }
    if value == 0.0 {
        return Ok(String::from("0"));
    }

    let exponent = decimal_exponent(value);
    let formatted = format!("{:.2e}", value);
    // Always ASCII, so byte slicing is safe.
    let mantissa = &formatted[..formatted.len().min(4)];

    Ok(format!("{}E{:+}", mantissa, exponent))
}

/// `floor(log10(value))` for a finite positive value.
///
/// Taken from the rounded logarithm, so a value an ulp below a power of ten
/// lands in that power's decade (`0.3 - 0.2` -> `-1`).
fn decimal_exponent(value: f64) -> i32 {
    floor(log10(value)) as i32
}

#[cfg(feature = "std")]
fn log10(value: f64) -> f64 {
    value.log10()
}

#[cfg(not(feature = "std"))]
fn log10(value: f64) -> f64 {
    libm::log10(value)
}

#[cfg(feature = "std")]
fn floor(value: f64) -> f64 {
    value.floor()
}

#[cfg(not(feature = "std"))]
fn floor(value: f64) -> f64 {
    libm::floor(value)
}

// --- Gas calibration ---

/// Gas the 925 compensates its thermal conductivity readout for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum GasType {
    #[default]
    Air,
    Argon,
    Nitrogen,
    H2O,
    Hydrogen,
    Helium,
}

impl GasType {
    pub const ALL: [GasType; 6] = [
        GasType::Air,
        GasType::Argon,
        GasType::Nitrogen,
        GasType::H2O,
        GasType::Hydrogen,
        GasType::Helium,
    ];

    /// Uppercase token used on the wire.
    pub const fn token(&self) -> &'static str {
        match self {
            GasType::Air => "AIR",
            GasType::Argon => "ARGON",
            GasType::Nitrogen => "NITROGEN",
            GasType::H2O => "H2O",
            GasType::Hydrogen => "HYDROGEN",
            GasType::Helium => "HELIUM",
        }
    }

    /// Lowercase name reported to callers.
    pub const fn name(&self) -> &'static str {
        match self {
            GasType::Air => "air",
            GasType::Argon => "argon",
            GasType::Nitrogen => "nitrogen",
            GasType::H2O => "h2o",
            GasType::Hydrogen => "hydrogen",
            GasType::Helium => "helium",
        }
    }
}

impl FromStr for GasType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        GasType::ALL
            .iter()
            .copied()
            .find(|gas| gas.token().eq_ignore_ascii_case(s))
            .ok_or(ValueError::UnknownGasType)
    }
}

impl fmt::Display for GasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// --- Setpoint relay direction ---

/// Side of the setpoint on which the relay is energized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum SetpointDirection {
    Above,
    #[default]
    Below,
}

impl SetpointDirection {
    pub const fn token(&self) -> &'static str {
        match self {
            SetpointDirection::Above => "ABOVE",
            SetpointDirection::Below => "BELOW",
        }
    }
}

impl FromStr for SetpointDirection {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("ABOVE") {
            Ok(SetpointDirection::Above)
        } else if s.eq_ignore_ascii_case("BELOW") {
            Ok(SetpointDirection::Below)
        } else {
            Err(ValueError::UnknownDirection)
        }
    }
}

impl fmt::Display for SetpointDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// `ON`/`OFF` token for the setpoint enable flag.
pub const fn enabled_token(enabled: bool) -> &'static str {
    if enabled {
        "ON"
    } else {
        "OFF"
    }
}

#[cfg(feature = "rpc")]
mod serde_impls {
    use super::{GasType, SetpointDirection};
    use alloc::string::String;

    impl serde::Serialize for GasType {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> serde::Deserialize<'de> for GasType {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(deserializer)?;
            raw.parse().map_err(serde::de::Error::custom)
        }
    }

    impl serde::Serialize for SetpointDirection {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.token())
        }
    }

    impl<'de> serde::Deserialize<'de> for SetpointDirection {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(deserializer)?;
            raw.parse().map_err(serde::de::Error::custom)
        }
    }
}
