use core::fmt::{self, Debug, Write};

use embedded_hal::digital::v2::OutputPin;

use crate::adc::AdcBus;
use crate::channel::ChannelSpec;
use crate::relay::RelayBank;
use crate::sampler::Sampler;

/// The board could not be brought into a state where sampling is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError<E> {
    NotReady { device: &'static str },
    ChannelSetup { index: usize, error: E },
}

impl<E: Debug> fmt::Display for SetupError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NotReady { device } => {
                write!(f, "ADC controller device {} not ready", device)
            }
            SetupError::ChannelSetup { index, error } => {
                write!(f, "Could not setup channel #{} ({:?})", index, error)
            }
        }
    }
}

/// Checks and configures every channel, then puts all relays at rest.
///
/// Channels are handled in board order and the first failure aborts. The
/// relays are only touched once every channel is configured.
pub fn startup<B, P, const N: usize>(
    mut bus: B,
    channels: [ChannelSpec; N],
    relays: &mut RelayBank<P>,
    log: &mut impl Write,
) -> Result<Sampler<B, N>, SetupError<B::Error>>
where
    B: AdcBus,
    P: OutputPin,
    P::Error: Debug,
{
    writeln!(log, "ADC sample application").ok();

    if let Err(e) = configure(&mut bus, &channels) {
        writeln!(log, "{}", e).ok();
        return Err(e);
    }

    relays.deactivate_all(log);

    Ok(Sampler::new(bus, channels))
}

fn configure<B: AdcBus>(bus: &mut B, channels: &[ChannelSpec]) -> Result<(), SetupError<B::Error>> {
    for (index, spec) in channels.iter().enumerate() {
        if !bus.is_ready(spec.device) {
            return Err(SetupError::NotReady {
                device: spec.device,
            });
        }

        bus.setup(spec)
            .map_err(|error| SetupError::ChannelSetup { index, error })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adc::fake::{Call, FakeBus, FakeError};
    use crate::channel::{ChannelId, Resolution};
    use crate::relay::{Relay, RelayPin};
    use embedded_hal_mock::pin::{Mock, State, Transaction};
    use std::string::String;
    use std::vec::Vec;

    fn channel(device: &'static str, n: u8) -> ChannelSpec {
        ChannelSpec::single_ended(device, ChannelId::new(n).unwrap(), Resolution::new(12).unwrap())
    }

    fn channels() -> [ChannelSpec; 3] {
        [channel("adc0", 0), channel("adc0", 1), channel("adc1", 5)]
    }

    /// Relay bank whose pins expect `expected` and nothing else.
    fn bank(expected: &[Transaction]) -> (RelayBank<Mock>, Vec<Mock>) {
        let pins: Vec<Mock> = (0..6).map(|_| Mock::new(expected)).collect();
        let pin = |i: usize| RelayPin::active_high(pins[i].clone());
        let bank = RelayBank::new([
            Relay::new(pin(0), pin(1)),
            Relay::new(pin(2), pin(3)),
            Relay::new(pin(4), pin(5)),
        ]);
        (bank, pins)
    }

    #[test]
    fn configures_in_order_then_releases_relays() {
        let (mut relays, pins) = bank(&[Transaction::set(State::Low)]);
        let mut log = String::new();

        let sampler = startup(FakeBus::default(), channels(), &mut relays, &mut log).unwrap();

        assert_eq!(
            sampler.bus().calls,
            [Call::Setup(0), Call::Setup(1), Call::Setup(5)]
        );
        assert!(sampler.bus().reads().is_empty());
        assert_eq!(sampler.iteration(), 0);
        assert_eq!(sampler.channels(), &channels());
        assert_eq!(log, "ADC sample application\n");

        // Every pin was driven inactive exactly once
        for mut pin in pins {
            pin.done();
        }
    }

    #[test]
    fn device_not_ready_aborts() {
        let (mut relays, pins) = bank(&[]);
        let mut bus = FakeBus::default();
        bus.not_ready.insert("adc1");
        let mut log = String::new();

        let err = startup(bus, channels(), &mut relays, &mut log).err();

        assert_eq!(err, Some(SetupError::NotReady { device: "adc1" }));
        assert!(log.ends_with("ADC controller device adc1 not ready\n"));
        for mut pin in pins {
            pin.done();
        }
    }

    #[test]
    fn rejected_channel_aborts() {
        let (mut relays, pins) = bank(&[]);
        let mut bus = FakeBus::default();
        bus.rejected.insert(1);
        let mut log = String::new();

        let err = startup(bus, channels(), &mut relays, &mut log).err();

        assert_eq!(
            err,
            Some(SetupError::ChannelSetup { index: 1, error: FakeError::Rejected })
        );
        assert!(log.ends_with("Could not setup channel #1 (Rejected)\n"));
        for mut pin in pins {
            pin.done();
        }
    }

    #[test]
    fn setup_stops_at_first_failure() {
        let mut bus = FakeBus::default();
        bus.rejected.insert(0);

        let err = configure(&mut bus, &channels());

        assert!(err.is_err());
        assert_eq!(bus.calls, [Call::Setup(0)]);
    }
}
