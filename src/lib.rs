//! Periodic ADC sampling with relay safe-state initialization.
//!
//! [`startup()`] validates and configures every channel of the board, then puts
//! the relay drivers at rest. The returned [`Sampler`] reads each channel in
//! board order once per [`SAMPLE_PERIOD`] and reports raw values and
//! millivolts over a text log.

#![cfg_attr(not(test), no_std)]

pub mod adc;
pub mod board;
pub mod channel;
pub mod convert;
pub mod relay;
pub mod sampler;
mod startup;

use fugit::MillisDurationU32;

pub use adc::AdcBus;
pub use channel::{ChannelSpec, Sequence};
pub use convert::ConversionUnsupported;
pub use sampler::{ReadFailure, Reading, Sampler, Sweep};
pub use startup::{startup, SetupError};

/// Time between two sweeps over all channels.
pub const SAMPLE_PERIOD: MillisDurationU32 = MillisDurationU32::from_ticks(1000);
