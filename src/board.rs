//! Board description: analog inputs and relay driver wiring.
//!
//! | Signal         | Pin  | Notes              |
//! |----------------|------|--------------------|
//! | ADC_IN0        | PA0  | supply monitor     |
//! | ADC_IN1        | PA1  | load current sense |
//! | ADC_IN4        | PA4  | attenuator output  |
//! | RELAY1_RESET   | PA5  |                    |
//! | RELAY1_SET     | PA6  |                    |
//! | RELAY2_RESET   | PA7  |                    |
//! | RELAY2_SET     | PB0  |                    |
//! | RELAY3_RESET   | PB1  |                    |
//! | RELAY3_SET     | PB3  |                    |
//! | LOG TX / RX    | PA9 / PA10 | USART1, 115200 |

use crate::channel::{AcquisitionTime, ChannelId, ChannelSpec, Resolution};
use crate::relay::RELAY_COUNT;

pub const ADC_DEVICE: &str = "adc@40012400";

pub const LOG_BAUD: u32 = 115_200;

pub const CHANNEL_COUNT: usize = 3;

const fn channel(id: u8) -> ChannelId {
    match ChannelId::new(id) {
        Some(id) => id,
        None => panic!("ADC channel out of range"),
    }
}

const fn bits(bits: u8) -> Resolution {
    match Resolution::new(bits) {
        Some(bits) => bits,
        None => panic!("ADC resolution out of range"),
    }
}

/// Analog inputs in sampling order.
pub const CHANNELS: [ChannelSpec; CHANNEL_COUNT] = [
    ChannelSpec::single_ended(ADC_DEVICE, channel(0), bits(12))
        .with_acquisition_time(AcquisitionTime::Ticks(80))
        .with_oversampling(4),
    ChannelSpec::single_ended(ADC_DEVICE, channel(1), bits(12))
        .with_acquisition_time(AcquisitionTime::Ticks(160))
        .with_oversampling(4),
    ChannelSpec::single_ended(ADC_DEVICE, channel(4), bits(12)),
];

/// Whether the (set, reset) driver inputs of each relay are active-low.
pub const RELAY_ACTIVE_LOW: [(bool, bool); RELAY_COUNT] = [(false, false); RELAY_COUNT];
