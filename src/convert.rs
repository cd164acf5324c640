//! Raw sample to physical value conversion.

use crate::channel::{ChannelSpec, Reference};

/// Millivolt conversion is not possible for the channel's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionUnsupported;

/// Interprets the contents of the sample buffer.
///
/// Differential samples are two's complement and get sign-extended,
/// single-ended samples are plain unsigned values.
pub const fn interpret(raw: u16, differential: bool) -> i32 {
    if differential {
        raw as i16 as i32
    } else {
        raw as i32
    }
}

/// Scales an interpreted sample to millivolts.
///
/// `internal_mv` is the converter's own reference, used when the channel
/// selects [`Reference::Internal`].
pub fn to_millivolts(
    value: i32,
    spec: &ChannelSpec,
    internal_mv: Option<u16>,
) -> Result<i32, ConversionUnsupported> {
    let vref_mv = match spec.reference {
        Reference::Internal => internal_mv,
        _ => spec.vref_mv,
    }
    .ok_or(ConversionUnsupported)?;

    // One bit carries the sign
    let resolution = if spec.differential {
        spec.resolution.get() - 1
    } else {
        spec.resolution.get()
    };

    // Gain is folded into the reference first, truncating
    let (mul, div) = spec.gain.inverse();
    let vref = i64::from(vref_mv) * i64::from(mul) / i64::from(div);
    let mv = i64::from(value) * vref;
    i32::try_from(mv >> resolution).map_err(|_| ConversionUnsupported)
}
