//! # Introduction
//! This is a platform-agnostic Rust driver for the [`LTR-329ALS-01 Ambient Light Sensor`](https://optoelectronics.liteon.com/en-global/Led/LED-Component/Detail/926/0/0/16/200) using [`embedded-hal`](https://github.com/rust-embedded/embedded-hal) traits.
//!
//! ## Supported devices
//! - [LTR-329ALS-01](https://optoelectronics.liteon.com/upload/download/DS86-2014-0006/LTR-329ALS-01_DS_V1.6.PDF)
//!
//! ## Usage
//! ### Setup
//!
//! Instantiate a new driver instance using a [blocking I²C HAL
//! implementation](https://docs.rs/embedded-hal/0.2.*/embedded_hal/blocking/i2c/index.html)
//! and a delay provider, then bring the sensor up with [`LTR329::begin`]:
//! ```no_run
//! # use embedded_hal_mock::{delay::MockNoop, i2c::Mock};
//! # let i2c = Mock::new(&[]);
//! # let delay = MockNoop::new();
//! let config = ltr329::LTR329Config::default().with_timeout_ms(500);
//! let mut sensor = ltr329::LTR329::init(i2c, delay, config);
//! sensor.begin().unwrap();
//! ```
//!
//! ### Device Info
//!
//! ```no_run
//! # use embedded_hal_mock::{delay::MockNoop, i2c::Mock};
//! # let mut sensor = ltr329::LTR329::init(Mock::new(&[]), MockNoop::new(), Default::default());
//! let mfc_id = sensor.read_manufacturer_id().unwrap();
//! let part = sensor.read_part_number().unwrap();
//! let revision = sensor.read_revision_id().unwrap();
//! ```
//!
//! ### Measurements
//!
//! [`LTR329::read_lux`] waits for a new, valid measurement and converts it:
//! ```no_run
//! # use embedded_hal_mock::{delay::MockNoop, i2c::Mock};
//! # let mut sensor = ltr329::LTR329::init(Mock::new(&[]), MockNoop::new(), Default::default());
//! let config = ltr329::LTR329Config::default()
//!     .with_gain(ltr329::Gain::Gain4x)
//!     .with_integration_time(ltr329::IntegrationTime::Ms200);
//! sensor.apply_config(&config).unwrap();
//!
//! match sensor.read_lux() {
//!     Ok(data) => { let _lux = data.lux_phys; }
//!     Err(ltr329::Error::DataTimeout) => { /* no measurement in time */ }
//!     Err(_) => { /* bus failure */ }
//! }
//! ```
//!
//! ## Logging
//! Enable the `defmt` feature to get debug output through [`defmt`](https://docs.rs/defmt).
//!
#![no_std]
#[macro_use]
extern crate num_derive;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;
use paste::paste;

#[macro_use]
mod macros;
mod fields;
mod lux;
pub mod poll;
mod registers;
mod types;
pub use crate::fields::*;
pub use crate::lux::raw_to_lux;
pub use crate::poll::{PollBudget, PollOutcome, PollTiming};
pub use crate::registers::*;
pub use crate::types::{Error, InvalidValue, LuxBracket, LuxData, RawData};

create_struct_with! (LTR329Config, {
    mode: Mode,
    gain: Gain,
    integration_time: IntegrationTime,
    measurement_rate: MeasurementRate,
    timeout_ms: u32,
    poll_interval_ms: u32,
    power_up_delay_ms: u32,
    activation_delay_ms: u32,
    window_factor: f32
});

impl Default for LTR329Config {
    fn default() -> Self {
        LTR329Config {
            mode: crate::Mode::ACTIVE,
            gain: crate::Gain::Gain1x,
            integration_time: crate::IntegrationTime::Ms100,
            measurement_rate: crate::MeasurementRate::Ms500,
            timeout_ms: 1000,
            poll_interval_ms: 10,
            // Minimum start-up time after power on is 100ms, standby to active 10ms
            power_up_delay_ms: 100,
            activation_delay_ms: 10,
            window_factor: 1.0,
        }
    }
}

impl LTR329Config {
    pub fn poll_timing(&self) -> PollTiming {
        PollTiming::new(self.timeout_ms, self.poll_interval_ms)
    }
}

pub struct LTR329<I2C, D> {
    i2c: I2C,
    delay: D,
    config: LTR329Config,
}

impl<I2C, D, E> LTR329<I2C, D>
where
    I2C: i2c::WriteRead<Error = E> + i2c::Write<Error = E>,
    D: DelayMs<u32>,
{
    /// Initializes the LTR329 driver while consuming the i2c bus and the delay.
    /// The device is not accessed until [`LTR329::begin`] is called.
    pub fn init(i2c: I2C, delay: D, config: LTR329Config) -> Self {
        LTR329 { i2c, delay, config }
    }

    /// Destroy driver instance, return I²C bus and delay instances.
    pub fn destroy(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Currently stored configuration. Lux conversion uses its gain,
    /// integration time and window factor.
    pub fn config(&self) -> &LTR329Config {
        &self.config
    }

    /// Brings the sensor up after power on: waits for start-up, resets the
    /// device and puts it into active mode with 1x gain.
    ///
    /// The device is activated even when the reset fails. The reset error is
    /// returned afterwards, unless activating fails too.
    pub fn begin(&mut self) -> Result<(), Error<E>> {
        self.delay.delay_ms(self.config.power_up_delay_ms);

        let reset = self.reset();
        self.write_control(Mode::ACTIVE, Gain::Gain1x)?;

        self.delay.delay_ms(self.config.activation_delay_ms);
        reset
    }

    /// Triggers a software reset and waits until the device clears the reset bit.
    pub fn reset(&mut self) -> Result<(), Error<E>> {
        log_debug!("[LTR329] Resetting");
        let control_reg = ControlRegister::default().with_sw_reset(ResetStatus::Resetting);
        self.write_register(Register::ALS_CONTR, control_reg.value())?;

        let mut budget = PollBudget::new(self.config.poll_timing());
        let finished = self.poll_until(&mut budget, |ltr, budget| {
            let control: ControlRegister = ltr.read_decoded(Register::ALS_CONTR, budget)?;
            Ok(control.sw_reset.value == ResetStatus::Idle)
        })?;
        if !finished {
            log_warn!("[LTR329] Reset timeout");
            return Err(Error::ResetTimeout);
        }

        // Registers are back at their power-on values
        let defaults = ControlRegister::default();
        let meas_defaults = MeasRateRegister::default();
        self.config.mode = defaults.mode.value;
        self.config.gain = defaults.gain.value;
        self.config.integration_time = meas_defaults.integration_time.value;
        self.config.measurement_rate = meas_defaults.measurement_rate.value;

        log_debug!("[LTR329] Reset finished");
        Ok(())
    }

    /// Writes the whole configuration: measurement rate first, then the control
    /// register which starts measuring when `config.mode` is active.
    pub fn apply_config(&mut self, config: &LTR329Config) -> Result<(), Error<E>> {
        self.config = *config;

        self.write_meas_rate(config.integration_time, config.measurement_rate)?;
        self.write_control(config.mode, config.gain)
    }

    pub fn write_control(&mut self, mode: Mode, gain: Gain) -> Result<(), Error<E>> {
        self.config.mode = mode;
        self.config.gain = gain;

        let control_reg = ControlRegister::default().with_mode(mode).with_gain(gain);
        self.write_register(Register::ALS_CONTR, control_reg.value())
    }

    /// Returns the contents of the ALS_CONTR register.
    pub fn read_control(&mut self) -> Result<ControlRegister, Error<E>> {
        let mut budget = PollBudget::new(self.config.poll_timing());
        self.read_decoded(Register::ALS_CONTR, &mut budget)
    }

    pub fn write_meas_rate(
        &mut self,
        integration_time: IntegrationTime,
        measurement_rate: MeasurementRate,
    ) -> Result<(), Error<E>> {
        self.config.integration_time = integration_time;
        self.config.measurement_rate = measurement_rate;

        let meas_rate_reg = MeasRateRegister::default()
            .with_integration_time(integration_time)
            .with_measurement_rate(measurement_rate);
        self.write_register(Register::ALS_MEAS_RATE, meas_rate_reg.value())
    }

    /// Returns the contents of the ALS_MEAS_RATE register.
    pub fn read_meas_rate(&mut self) -> Result<MeasRateRegister, Error<E>> {
        let mut budget = PollBudget::new(self.config.poll_timing());
        self.read_decoded(Register::ALS_MEAS_RATE, &mut budget)
    }

    /// Returns the contents of the ALS_STATUS register.
    pub fn read_status(&mut self) -> Result<StatusRegister, Error<E>> {
        let mut budget = PollBudget::new(self.config.poll_timing());
        self.read_decoded(Register::ALS_STATUS, &mut budget)
    }

    /// Check if new, valid sensor data is latched.
    pub fn data_ready(&mut self) -> Result<bool, Error<E>> {
        let status = self.read_status()?;
        Ok(status.has_new_valid_data())
    }

    /// Get the manufacturer ID stored inside LTR329. This ID should be 0x05.
    pub fn read_manufacturer_id(&mut self) -> Result<u8, Error<E>> {
        self.read_register(Register::MANUFAC_ID)
    }

    /// Part number, the upper nibble of PART_ID. This should be 0x0A.
    pub fn read_part_number(&mut self) -> Result<u8, Error<E>> {
        Ok(self.read_register(Register::PART_ID)? >> 4)
    }

    /// Revision ID, the lower nibble of PART_ID.
    pub fn read_revision_id(&mut self) -> Result<u8, Error<E>> {
        Ok(self.read_register(Register::PART_ID)? & 0x0F)
    }

    /// Waits for a new, valid measurement and returns it converted to lux.
    ///
    /// Returns [`Error::DataTimeout`] without touching the data registers if
    /// nothing arrives within the configured timeout. A lux value of 0 comes
    /// with [`LuxBracket::NoLight`] or [`LuxBracket::OutOfRange`] so darkness and
    /// an unusable channel ratio stay distinguishable.
    pub fn read_lux(&mut self) -> Result<LuxData, Error<E>> {
        let mut budget = PollBudget::new(self.config.poll_timing());
        let ready = self.poll_until(&mut budget, |ltr, budget| {
            let status: StatusRegister = ltr.read_decoded(Register::ALS_STATUS, budget)?;
            Ok(status.has_new_valid_data())
        })?;
        if !ready {
            log_warn!("[LTR329] Read status timeout");
            return Err(Error::DataTimeout);
        }

        let raw_data = self.read_channels(&mut budget)?;
        let (lux_phys, bracket) = raw_to_lux(
            raw_data.ch0_raw,
            raw_data.ch1_raw,
            self.config.gain,
            self.config.integration_time,
            self.config.window_factor,
        );

        Ok(LuxData {
            lux_raw: raw_data,
            lux_phys,
            bracket,
        })
    }

    /// Reads both data channels without checking the status register.
    pub fn read_raw_data(&mut self) -> Result<RawData, Error<E>> {
        let mut budget = PollBudget::new(self.config.poll_timing());
        self.read_channels(&mut budget)
    }

    /// Puts the sensor in a low-power Standby mode, keeping the current gain.
    pub fn standby(&mut self) -> Result<(), Error<E>> {
        self.write_control(Mode::STANDBY, self.config.gain)
    }

    pub fn write_register(&mut self, register: u8, data: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(LTR329_ADDRESS, &[register, data])
            .map_err(Error::I2C)
    }

    /// Reads a single register. A transaction the device does not acknowledge
    /// is retried every poll interval until the timeout elapses.
    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut budget = PollBudget::new(self.config.poll_timing());
        self.read_register_within(register, &mut budget)
    }
}

// Everything below waits against the caller's budget, so nested retries and
// the surrounding poll loop share one timeout.
impl<I2C, D, E> LTR329<I2C, D>
where
    I2C: i2c::WriteRead<Error = E> + i2c::Write<Error = E>,
    D: DelayMs<u32>,
{
    fn wait(&mut self, budget: &mut PollBudget) {
        let interval = budget.spend();
        self.delay.delay_ms(interval);
    }

    fn read_register_within(&mut self, register: u8, budget: &mut PollBudget) -> Result<u8, Error<E>> {
        let mut data: [u8; 1] = [0];

        loop {
            let err = match self.i2c.write_read(LTR329_ADDRESS, &[register], &mut data) {
                Ok(()) => return Ok(data[0]),
                Err(err) => err,
            };

            if budget.step(false) == PollOutcome::TimedOut {
                log_warn!("[LTR329] I2C request timeout, register {=u8:#x}", register);
                return Err(Error::I2C(err));
            }
            log_debug!("[LTR329] No acknowledge, register {=u8:#x}", register);
            self.wait(budget);
        }
    }

    fn read_decoded<R>(&mut self, register: u8, budget: &mut PollBudget) -> Result<R, Error<E>>
    where
        R: TryFrom<u8, Error = InvalidValue>,
    {
        let data = self.read_register_within(register, budget)?;
        log_debug!("[LTR329] Register {=u8:#x}: {=u8:#b}", register, data);
        R::try_from(data).map_err(|InvalidValue(value)| Error::InvalidRegisterValue { register, value })
    }

    fn read_channels(&mut self, budget: &mut PollBudget) -> Result<RawData, Error<E>> {
        // CH1 data must be read before CH0 data, reading CH0_1 releases the latch
        let ch1_0 = self.read_register_within(Register::ALS_DATA_CH1_0, budget)? as u16;
        let ch1_1 = self.read_register_within(Register::ALS_DATA_CH1_1, budget)? as u16;
        let ch0_0 = self.read_register_within(Register::ALS_DATA_CH0_0, budget)? as u16;
        let ch0_1 = self.read_register_within(Register::ALS_DATA_CH0_1, budget)? as u16;

        let raw_data = RawData {
            ch0_raw: (ch0_1 << 8) | ch0_0,
            ch1_raw: (ch1_1 << 8) | ch1_0,
        };
        log_debug!(
            "[LTR329] Read data CH1: {=u16}, CH0: {=u16}",
            raw_data.ch1_raw,
            raw_data.ch0_raw
        );
        Ok(raw_data)
    }

    /// Runs `condition` until it reports true or the budget is spent. Returns
    /// whether the condition was met.
    fn poll_until<F>(&mut self, budget: &mut PollBudget, mut condition: F) -> Result<bool, Error<E>>
    where
        F: FnMut(&mut Self, &mut PollBudget) -> Result<bool, Error<E>>,
    {
        loop {
            let ready = condition(self, budget)?;
            match budget.step(ready) {
                PollOutcome::Ready => return Ok(true),
                PollOutcome::TimedOut => return Ok(false),
                PollOutcome::Continue => self.wait(budget),
            }
        }
    }
}
