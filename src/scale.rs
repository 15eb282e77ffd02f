//! Conversions between raw ADC codes, voltages and digital levels

/// Number of codes of the 12-bit converter
pub const FULL_SCALE: u32 = 4096;

/// Converts a raw 12-bit conversion result into volts
///
/// `vref` is the converter's full-scale reference voltage.
pub fn raw_to_voltage(raw: u16, vref: f32) -> f32 {
    f32::from(raw) * vref / FULL_SCALE as f32
}

/// Maps `voltage` from `in_min..=in_max` onto `out_min..=out_max`
///
/// Values at or below `in_min` map to `out_min`, values at or above `in_max`
/// map to `out_max`. Everything in between is interpolated linearly and
/// truncated toward zero.
///
/// `in_max` must be greater than `in_min`.
pub fn scale_to_range(voltage: f32, in_min: f32, in_max: f32, out_min: i32, out_max: i32) -> i32 {
    if voltage <= in_min {
        return out_min;
    }
    if voltage >= in_max {
        return out_max;
    }

    let span = out_max as f32 - out_min as f32;
    ((voltage - in_min) * span / (in_max - in_min) + out_min as f32) as i32
}
