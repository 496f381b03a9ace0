use crate::create_register;
use crate::fields::*;
use crate::types::InvalidValue;
use num_traits::FromPrimitive;
use num_traits::ToPrimitive;
use paste::paste;

pub mod helpers {
    #[inline]
    pub fn get_mask(start_index: u8, width: u8) -> u8 {
        ((1u8 << width) - 1u8) << start_index
    }
}

/// I²C address of the LTR-329ALS-01.
pub const LTR329_ADDRESS: u8 = 0x29;

/// Register definitions
pub struct Register;
impl Register {
    pub const ALS_CONTR: u8 = 0x80;
    pub const ALS_MEAS_RATE: u8 = 0x85;
    pub const PART_ID: u8 = 0x86;
    pub const MANUFAC_ID: u8 = 0x87;
    pub const ALS_DATA_CH1_0: u8 = 0x88;
    pub const ALS_DATA_CH1_1: u8 = 0x89;
    pub const ALS_DATA_CH0_0: u8 = 0x8A;
    pub const ALS_DATA_CH0_1: u8 = 0x8B;
    pub const ALS_STATUS: u8 = 0x8C;
}

// General Field structure used by registers
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field<T> {
    pub start_index: u8,
    pub width: u8,
    pub value: T,
}

impl<T> Field<T>
where
    T: ToPrimitive,
{
    pub fn bits(self) -> u8 {
        // The algorithm: ((1 << length) - 1) << pos
        let mask: u8 = self::helpers::get_mask(self.start_index, self.width);

        let val: u8 = self.value.to_u8().unwrap_or_default();
        (val << self.start_index) & mask
    }
}

/// Defines a standard structure for a 8-bit register.
///
/// This macro takes `StructName, {structfield1: type1, structfield2: type2, ...}` as arguments
/// and generates a structure:
///
/// ```compile_fail
/// struct StructName {
///     structfield1: Field<type1>,
///     structfield2: Field<type2>,
///     ...
/// }
/// ```
///
/// The structure will have automatic `with_structfieldX()` factory methods created, a
/// `value()` function that returns the encoded u8 data and a `TryFrom<u8>` implementation
/// that rejects bytes holding a reserved field code.
///
#[macro_export]
macro_rules! create_register {
    ($reg_name:ident, {$($element: ident: $ty: ty),*}) => {
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $reg_name { $(pub $element: Field<$ty>),* }

        paste! {
            impl $reg_name {
                pub fn value(self) -> u8 {
                    let mut temp: u8 = 0x00;
                    $(
                        temp |= self.$element.bits();
                    )*
                    temp
                }

            // Creates with_<variable> methods
            $(
                pub fn [<with_ $element>] (self, [<new_ $element>]: $ty) -> Self {
                    let mut tmp = $reg_name{..self};
                    tmp.$element.value = [<new_ $element>];
                    tmp
                }
            )*
            }
        }

        paste! {
            // Decodes a raw register byte field by field
            impl TryFrom<u8> for $reg_name {
                type Error = InvalidValue;

                fn try_from(val: u8) -> Result<Self, Self::Error> {
                    let new_reg = $reg_name::default();

                    $(
                        let [<$element _mask>] = self::helpers::get_mask(new_reg.$element.start_index, new_reg.$element.width);
                        let [<$element _val>] = FromPrimitive::from_u8((val & [<$element _mask>]) >> new_reg.$element.start_index)
                            .ok_or(InvalidValue(val))?;
                        let new_reg = new_reg.[<with_ $element>]([<$element _val>]);
                    )*

                    Ok(new_reg)
                }
            }
        }
    }
}

create_register!(ControlRegister, {mode: Mode, gain: Gain, sw_reset: ResetStatus});

impl Default for ControlRegister {
    fn default() -> Self {
        ControlRegister {
            mode: Field {
                start_index: 0,
                width: 1,
                value: Mode::STANDBY,
            },
            gain: Field {
                start_index: 2,
                width: 3,
                value: Gain::Gain1x,
            },
            sw_reset: Field {
                start_index: 1,
                width: 1,
                value: ResetStatus::Idle,
            },
        }
    }
}

create_register!(MeasRateRegister, {measurement_rate: MeasurementRate, integration_time: IntegrationTime});

impl Default for MeasRateRegister {
    fn default() -> Self {
        MeasRateRegister {
            measurement_rate: Field {
                start_index: 0,
                width: 3,
                value: MeasurementRate::Ms500,
            },
            integration_time: Field {
                start_index: 3,
                width: 3,
                value: IntegrationTime::Ms100,
            },
        }
    }
}

create_register!(StatusRegister, {data_valid: DataValidity, gain: Gain, data_status: DataStatus});

impl StatusRegister {
    /// New data is latched and the device flags it as valid.
    pub fn has_new_valid_data(&self) -> bool {
        self.data_status.value == DataStatus::New && self.data_valid.value == DataValidity::DataValid
    }
}

impl Default for StatusRegister {
    fn default() -> Self {
        StatusRegister {
            data_valid: Field {
                start_index: 7,
                width: 1,
                value: DataValidity::DataValid,
            },
            gain: Field {
                start_index: 4,
                width: 3,
                value: Gain::Gain1x,
            },
            data_status: Field {
                start_index: 2,
                width: 1,
                value: DataStatus::Old,
            },
        }
    }
}
