use crate::types::LuxBracket;
use crate::{Gain, IntegrationTime};

/// Converts raw channel counts into lux following Appendix A of the LTR-303/329
/// datasheet.
///
/// `window_factor` compensates for light lost through a cover window and is 1.0
/// for a bare sensor. The ratio is computed in floating point.
pub fn raw_to_lux(
    ch0_data: u16,
    ch1_data: u16,
    gain: Gain,
    itime: IntegrationTime,
    window_factor: f32,
) -> (f32, LuxBracket) {
    // Summed in u32, two full-scale channels overflow u16.
    let total = u32::from(ch0_data) + u32::from(ch1_data);
    if total == 0 {
        return (0.0, LuxBracket::NoLight);
    }

    let ch0 = f32::from(ch0_data);
    let ch1 = f32::from(ch1_data);
    let ratio = ch1 / total as f32;

    let (counts, bracket) = if ratio < 0.45 {
        ((1.7743 * ch0) + (1.1059 * ch1), LuxBracket::Low)
    } else if ratio < 0.64 {
        ((4.2785 * ch0) - (1.9548 * ch1), LuxBracket::Mid)
    } else if ratio < 0.85 {
        ((0.5926 * ch0) + (0.1185 * ch1), LuxBracket::High)
    } else {
        return (0.0, LuxBracket::OutOfRange);
    };

    let als_gain: f32 = gain.into();
    let int_time: f32 = itime.into();
    (counts / als_gain / int_time / window_factor, bracket)
}
