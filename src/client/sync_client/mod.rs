// src/client/sync_client/mod.rs

mod io_helpers;
mod transaction;

use alloc::string::String;

use super::config::ClientConfig;
use super::operations::{self, Argument};
use crate::common::{
    address::DeviceAddr,
    error::PiraniError,
    hal_traits::{PiraniSerial, PiraniTimer},
    types::{GasType, SetpointDirection},
};

/// Synchronous client for one KJLC 925 Pirani gauge.
///
/// Every method is one blocking request/reply transaction. Methods take
/// `&mut self`, so a client shared between threads must sit behind a lock;
/// the bus only carries one transaction at a time.
#[derive(Debug)]
pub struct PiraniClient<IF>
where
    IF: PiraniSerial + PiraniTimer,
{
    interface: IF,
    config: ClientConfig,
}

type ClientResult<T, IF> = Result<T, PiraniError<<IF as PiraniSerial>::Error>>;

impl<IF> PiraniClient<IF>
where
    IF: PiraniSerial + PiraniTimer,
{
    pub fn new(interface: IF, config: ClientConfig) -> Self {
        PiraniClient { interface, config }
    }

    /// Client for the gauge at `address` with default timeouts.
    pub fn with_address(interface: IF, address: DeviceAddr) -> Self {
        Self::new(interface, ClientConfig::default().with_address(address))
    }

    pub fn address(&self) -> DeviceAddr {
        self.config.address
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Gives the interface back, e.g. to close the port.
    pub fn into_inner(self) -> IF {
        self.interface
    }

    // --- Identification ---

    pub fn get_device_type(&mut self) -> ClientResult<String, IF> {
        self.call(&operations::GET_DEVICE_TYPE, Argument::None)
    }

    pub fn get_firmware_version(&mut self) -> ClientResult<String, IF> {
        self.call(&operations::GET_FIRMWARE_VERSION, Argument::None)
    }

    pub fn get_hardware_version(&mut self) -> ClientResult<String, IF> {
        self.call(&operations::GET_HARDWARE_VERSION, Argument::None)
    }

    pub fn get_model_number(&mut self) -> ClientResult<String, IF> {
        self.call(&operations::GET_MODEL_NUMBER, Argument::None)
    }

    pub fn get_serial_number(&mut self) -> ClientResult<String, IF> {
        self.call(&operations::GET_SERIAL_NUMBER, Argument::None)
    }

    /// Hours the transducer has been powered.
    pub fn get_time_on(&mut self) -> ClientResult<u32, IF> {
        self.call(&operations::GET_TIME_ON, Argument::None)
    }

    // --- Measurement ---

    /// On-chip sensor temperature in degrees Celsius.
    pub fn get_transducer_temperature(&mut self) -> ClientResult<f64, IF> {
        self.call(&operations::GET_TRANSDUCER_TEMPERATURE, Argument::None)
    }

    pub fn get_pressure(&mut self) -> ClientResult<f64, IF> {
        self.call(&operations::GET_PRESSURE, Argument::None)
    }

    /// Active gas calibration, lower-cased (`"nitrogen"`). Names outside
    /// [`GasType`] are passed through.
    pub fn get_gas_type(&mut self) -> ClientResult<String, IF> {
        let name: String = self.call(&operations::GET_GAS_TYPE, Argument::None)?;
        Ok(name.to_lowercase())
    }

    /// Selects the gas calibration used to compensate the readout.
    pub fn set_gas_type(&mut self, gas_type: GasType) -> ClientResult<(), IF> {
        self.call(&operations::SET_GAS_TYPE, Argument::Gas(gas_type))
    }

    // --- Calibration ---

    /// Sets full scale readout. The transducer must be vented to atmosphere first.
    pub fn calibrate_atmospheric(&mut self, pressure: f64) -> ClientResult<(), IF> {
        self.call(&operations::CALIBRATE_ATMOSPHERIC, Argument::Pressure(pressure))
    }

    /// Zeroes the readout. The transducer must be evacuated below 8x10-6 Torr first.
    pub fn calibrate_vacuum(&mut self) -> ClientResult<(), IF> {
        self.call(&operations::CALIBRATE_VACUUM, Argument::None)
    }

    // --- Setpoint relay ---

    /// Pressure above or below which the relay energizes.
    ///
    /// The gauge overwrites the hysteresis value whenever the setpoint changes.
    pub fn set_setpoint(&mut self, pressure: f64) -> ClientResult<(), IF> {
        self.call(&operations::SET_SETPOINT, Argument::Pressure(pressure))
    }

    pub fn get_setpoint(&mut self) -> ClientResult<f64, IF> {
        self.call(&operations::GET_SETPOINT, Argument::None)
    }

    /// Pressure at which the relay de-energizes again.
    ///
    /// Must lie above the setpoint for `BELOW` and below it for `ABOVE`. The
    /// gauge refuses other values with a NAK and keeps the current one.
    pub fn set_hysteresis_value(&mut self, pressure: f64) -> ClientResult<(), IF> {
        self.call(&operations::SET_HYSTERESIS_VALUE, Argument::Pressure(pressure))
    }

    pub fn get_hysteresis_value(&mut self) -> ClientResult<f64, IF> {
        self.call(&operations::GET_HYSTERESIS_VALUE, Argument::None)
    }

    pub fn set_setpoint_direction(&mut self, direction: SetpointDirection) -> ClientResult<(), IF> {
        self.call(&operations::SET_SETPOINT_DIRECTION, Argument::Direction(direction))
    }

    /// Direction token as reported, normally `ABOVE` or `BELOW`.
    pub fn get_setpoint_direction(&mut self) -> ClientResult<String, IF> {
        self.call(&operations::GET_SETPOINT_DIRECTION, Argument::None)
    }

    pub fn set_setpoint_enabled(&mut self, enabled: bool) -> ClientResult<(), IF> {
        self.call(&operations::SET_SETPOINT_ENABLED, Argument::Enabled(enabled))
    }

    pub fn get_setpoint_enabled(&mut self) -> ClientResult<bool, IF> {
        self.call(&operations::GET_SETPOINT_ENABLED, Argument::None)
    }

    /// Relay state as reported by the gauge.
    pub fn get_setpoint_status(&mut self) -> ClientResult<String, IF> {
        self.call(&operations::GET_SETPOINT_STATUS, Argument::None)
    }
}

// --- Unit Tests ---
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::common::{
        error::{DeviceError, ValueError},
        response::ProtocolFault,
    };
    use alloc::vec::Vec;
    use core::time::Duration;
    use nb::Result as NbResult;
    use pretty_assertions::assert_eq;

    // --- Mock Instant ---
    #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
    pub(crate) struct MockInstant(u64);
    impl core::ops::Add<Duration> for MockInstant {
        type Output = Self;
        fn add(self, rhs: Duration) -> Self {
            MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
        }
    }
    impl core::ops::Sub<MockInstant> for MockInstant {
        type Output = Duration;
        fn sub(self, rhs: MockInstant) -> Duration {
            Duration::from_micros(self.0.saturating_sub(rhs.0))
        }
    }

    // --- Mock Comm Error ---
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub(crate) struct MockCommError;

    // --- Mock Interface ---
    /// Simulated gauge link with a fake clock. Staged bytes are handed out one
    /// per `read_byte`, after which reads block until the clock runs out.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct MockInterface {
        pub(crate) current_time_us: u64,
        read_queue: Vec<u8>,
        read_pos: usize,
        write_log: Vec<u8>,
        pub(crate) flush_count: u32,
        pub(crate) discard_count: u32,
        pub(crate) fail_writes: bool,
    }

    impl MockInterface {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn stage_read_data(&mut self, data: &[u8]) {
            self.read_queue = data.to_vec();
            self.read_pos = 0;
        }

        pub(crate) fn written(&self) -> &[u8] {
            &self.write_log
        }
    }

    impl PiraniTimer for MockInterface {
        type Instant = MockInstant;
        fn now(&self) -> Self::Instant {
            MockInstant(self.current_time_us)
        }
        fn delay_us(&mut self, us: u32) {
            self.current_time_us = self.current_time_us.saturating_add(us as u64);
        }
    }

    impl PiraniSerial for MockInterface {
        type Error = MockCommError;

        fn read_byte(&mut self) -> NbResult<u8, Self::Error> {
            match self.read_queue.get(self.read_pos) {
                Some(byte) => {
                    self.read_pos += 1;
                    Ok(*byte)
                }
                None => Err(nb::Error::WouldBlock),
            }
        }

        fn write_byte(&mut self, byte: u8) -> NbResult<(), Self::Error> {
            if self.fail_writes {
                return Err(nb::Error::Other(MockCommError));
            }
            self.write_log.push(byte);
            Ok(())
        }

        fn flush(&mut self) -> NbResult<(), Self::Error> {
            self.flush_count += 1;
            Ok(())
        }

        fn discard_input(&mut self) -> Result<(), Self::Error> {
            self.discard_count += 1;
            Ok(())
        }
    }

    fn client_with_reply(reply: &[u8]) -> PiraniClient<MockInterface> {
        let mut mock = MockInterface::new();
        mock.stage_read_data(reply);
        PiraniClient::new(mock, ClientConfig::default())
    }

    fn sent(client: &PiraniClient<MockInterface>) -> &str {
        core::str::from_utf8(client.interface.written()).unwrap()
    }

    #[test]
    fn test_client_construction() {
        let client = PiraniClient::new(MockInterface::new(), ClientConfig::default());
        assert_eq!(client.address(), DeviceAddr::DEFAULT_ADDRESS);

        let client = PiraniClient::with_address(MockInterface::new(), DeviceAddr::new(5).unwrap());
        assert_eq!(client.address().as_u16(), 5);
        assert_eq!(client.config().read_timeout, Duration::from_millis(100));
    }

    #[test]
    fn test_get_time_on() {
        let mut client = client_with_reply(b"@253ACK42;FF");
        assert_eq!(client.get_time_on().unwrap(), 42);
        assert_eq!(sent(&client), "@253TIM?;FF");
    }

    #[test]
    fn test_identification_strings() {
        let mut client = client_with_reply(b"@253ACKPIRANI;FF");
        assert_eq!(client.get_device_type().unwrap(), "PIRANI");
        assert_eq!(sent(&client), "@253DT?;FF");

        let mut client = client_with_reply(b"@253ACK1.07;FF");
        assert_eq!(client.get_firmware_version().unwrap(), "1.07");
        assert_eq!(sent(&client), "@253FV?;FF");

        let mut client = client_with_reply(b"@253ACKA;FF");
        assert_eq!(client.get_hardware_version().unwrap(), "A");
        assert_eq!(sent(&client), "@253HV?;FF");

        let mut client = client_with_reply(b"@253ACK925;FF");
        assert_eq!(client.get_model_number().unwrap(), "925");
        assert_eq!(sent(&client), "@253MD?;FF");

        let mut client = client_with_reply(b"@253ACK0012345;FF");
        assert_eq!(client.get_serial_number().unwrap(), "0012345");
        assert_eq!(sent(&client), "@253SN?;FF");
    }

    #[test]
    fn test_get_pressure_and_temperature() {
        let mut client = client_with_reply(b"@253ACK7.60E+2;FF");
        assert_eq!(client.get_pressure().unwrap(), 760.0);
        assert_eq!(sent(&client), "@253PR1?;FF");

        let mut client = client_with_reply(b"@253ACK2.35E+1;FF");
        assert_eq!(client.get_transducer_temperature().unwrap(), 23.5);
        assert_eq!(sent(&client), "@253TEM?;FF");
    }

    #[test]
    fn test_gas_type_roundtrip() {
        let mut client = client_with_reply(b"@253ACKNITROGEN;FF");
        let gas = client.get_gas_type().unwrap();
        assert_eq!(gas, "nitrogen");
        assert_eq!(gas.parse::<GasType>().unwrap(), GasType::Nitrogen);
        assert_eq!(sent(&client), "@253GT?;FF");
    }

    #[test]
    fn test_get_gas_type_passes_unlisted_gases() {
        let mut client = client_with_reply(b"@253ACKNEON;FF");
        assert_eq!(client.get_gas_type().unwrap(), "neon");

        let mut client = client_with_reply(b"@253ACKCO2;FF");
        assert_eq!(client.get_gas_type().unwrap(), "co2");
    }

    #[test]
    fn test_set_gas_type_sends_uppercase() {
        let mut client = client_with_reply(b"@253ACKARGON;FF");
        let gas: GasType = "argon".parse().unwrap();
        client.set_gas_type(gas).unwrap();
        assert_eq!(sent(&client), "@253GT!ARGON;FF");
    }

    #[test]
    fn test_calibration_commands() {
        let mut client = client_with_reply(b"@253ACK7.60E+2;FF");
        client.calibrate_atmospheric(760.0).unwrap();
        assert_eq!(sent(&client), "@253ATM!7.60E+2;FF");

        let mut client = client_with_reply(b"@253ACK;FF");
        client.calibrate_vacuum().unwrap();
        assert_eq!(sent(&client), "@253VAC!;FF");
    }

    #[test]
    fn test_setpoint_commands() {
        let mut client = client_with_reply(b"@253ACK1.00E-2;FF");
        client.set_setpoint(0.01).unwrap();
        assert_eq!(sent(&client), "@253SP1!1.00E-2;FF");

        let mut client = client_with_reply(b"@253ACK1.00E-2;FF");
        assert_eq!(client.get_setpoint().unwrap(), 0.01);
        assert_eq!(sent(&client), "@253SP1?;FF");

        let mut client = client_with_reply(b"@253ACK2.00E-2;FF");
        client.set_hysteresis_value(0.02).unwrap();
        assert_eq!(sent(&client), "@253SH1!2.00E-2;FF");

        let mut client = client_with_reply(b"@253ACK2.00E-2;FF");
        assert_eq!(client.get_hysteresis_value().unwrap(), 0.02);
        assert_eq!(sent(&client), "@253SH1?;FF");
    }

    #[test]
    fn test_setpoint_direction() {
        let mut client = client_with_reply(b"@253ACKABOVE;FF");
        client.set_setpoint_direction(SetpointDirection::Above).unwrap();
        assert_eq!(sent(&client), "@253SD1!ABOVE;FF");

        let mut client = client_with_reply(b"@253ACKBELOW;FF");
        assert_eq!(client.get_setpoint_direction().unwrap(), "BELOW");
        assert_eq!(sent(&client), "@253SD1?;FF");
    }

    #[test]
    fn test_setpoint_enabled() {
        let mut client = client_with_reply(b"@253ACKON;FF");
        client.set_setpoint_enabled(true).unwrap();
        assert_eq!(sent(&client), "@253EN1!ON;FF");

        let mut client = client_with_reply(b"@253ACKOFF;FF");
        client.set_setpoint_enabled(false).unwrap();
        assert_eq!(sent(&client), "@253EN1!OFF;FF");

        let mut client = client_with_reply(b"@253ACKON;FF");
        assert!(client.get_setpoint_enabled().unwrap());
        let mut client = client_with_reply(b"@253ACKOFF;FF");
        assert!(!client.get_setpoint_enabled().unwrap());

        let mut client = client_with_reply(b"@253ACKMAYBE;FF");
        let err = client.get_setpoint_enabled().unwrap_err();
        assert!(matches!(err, PiraniError::Protocol(ProtocolFault::Conversion { .. })));
    }

    #[test]
    fn test_setpoint_status() {
        let mut client = client_with_reply(b"@253ACKSET;FF");
        assert_eq!(client.get_setpoint_status().unwrap(), "SET");
        assert_eq!(sent(&client), "@253SS1?;FF");
    }

    #[test]
    fn test_silent_gauge_fails_in_bounded_time() {
        let mut client = client_with_reply(b"");
        let err = client.get_pressure().unwrap_err();
        assert!(matches!(err, PiraniError::Protocol(ProtocolFault::NoReply)));
        // Read timeout plus at most one poll interval.
        assert!(client.interface.current_time_us <= 100_000 + 100);
        assert_eq!(DeviceError::from(err), DeviceError);
    }

    #[test]
    fn test_negative_pressure_never_reaches_the_wire() {
        let mut client = client_with_reply(b"@253ACK;FF");
        let err = client.set_setpoint(-1.0).unwrap_err();
        assert!(matches!(err, PiraniError::Value(ValueError::Negative(_))));
        assert!(client.interface.written().is_empty());
    }

    #[test]
    fn test_into_inner_returns_interface() {
        let mut client = client_with_reply(b"@253ACK42;FF");
        client.get_time_on().unwrap();
        let mock = client.into_inner();
        assert_eq!(mock.flush_count, 1);
    }
}
