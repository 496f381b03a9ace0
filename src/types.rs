/// All possible errors in this crate
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I²C bus error. For register reads this is the last error seen once the
    /// acknowledge window has closed.
    I2C(E),
    /// The software reset bit did not clear within the configured timeout.
    ResetTimeout,
    /// No new, valid measurement was latched within the configured timeout.
    DataTimeout,
    /// A register read back a reserved field code.
    InvalidRegisterValue { register: u8, value: u8 },
}

/// Raw register byte that does not decode into a register structure.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidValue(pub u8);

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawData {
    pub ch0_raw: u16,
    pub ch1_raw: u16,
}

/// Which branch of the piecewise lux formula produced a value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LuxBracket {
    /// Both channels read zero. The lux value is 0.
    NoLight,
    /// CH1 ratio below 0.45.
    Low,
    /// CH1 ratio in [0.45, 0.64).
    Mid,
    /// CH1 ratio in [0.64, 0.85).
    High,
    /// CH1 ratio of 0.85 or more, outside of the formula. The lux value is 0.
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LuxData {
    pub lux_raw: RawData,
    pub lux_phys: f32,
    pub bracket: LuxBracket,
}
