// src/common/address.rs

use super::error::ValueError;
use core::convert::TryFrom;
use core::fmt;

/// Address of a gauge on the RS-485/RS-232 bus, rendered as 1-3 decimal digits.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct DeviceAddr(u16);

impl DeviceAddr {
    /// Factory default address of the 925.
    pub const DEFAULT_ADDRESS: DeviceAddr = DeviceAddr(253);
    /// Highest value that still fits the three digit address field.
    pub const MAX: u16 = 999;

    /// Creates a new `DeviceAddr` if the given value fits the address field.
    pub fn new(address: u16) -> Result<Self, ValueError> {
        if Self::is_valid_address(address) {
            Ok(DeviceAddr(address))
        } else {
            Err(ValueError::InvalidAddress(address))
        }
    }

    #[inline]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// 254 and 255 are answered by every gauge on the bus.
    #[inline]
    pub const fn is_broadcast(&self) -> bool {
        matches!(self.0, 254 | 255)
    }

    #[inline]
    pub const fn is_valid_address(address: u16) -> bool {
        address <= Self::MAX
    }
}

impl Default for DeviceAddr {
    fn default() -> Self {
        Self::DEFAULT_ADDRESS
    }
}

impl TryFrom<u16> for DeviceAddr {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceAddr> for u16 {
    fn from(value: DeviceAddr) -> Self {
        value.0
    }
}

impl fmt::Display for DeviceAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(any(feature = "rpc", feature = "serial"))]
impl serde::Serialize for DeviceAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

#[cfg(any(feature = "rpc", feature = "serial"))]
impl<'de> serde::Deserialize<'de> for DeviceAddr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u16::deserialize(deserializer)?;
        DeviceAddr::new(raw).map_err(serde::de::Error::custom)
    }
}
