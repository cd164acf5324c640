//! Periodic acquisition of every configured channel.

use core::fmt::Write;

use embedded_hal::blocking::delay::DelayMs;
use heapless::Vec;

use crate::adc::AdcBus;
use crate::channel::{ChannelSpec, Sequence};
use crate::convert::{interpret, to_millivolts, ConversionUnsupported};
use crate::SAMPLE_PERIOD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Position of the channel in the board description.
    pub index: usize,
    pub value: i32,
    pub millivolts: Result<i32, ConversionUnsupported>,
}

/// Acquisition of one channel failed. Other channels are not affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadFailure<E> {
    pub index: usize,
    pub error: E,
}

pub type Sweep<E, const N: usize> = Vec<Result<Reading, ReadFailure<E>>, N>;

/// The sampling loop. Only obtainable from [`crate::startup()`].
pub struct Sampler<B, const N: usize> {
    bus: B,
    channels: [ChannelSpec; N],
    buffer: u16,
    iteration: u32,
}

impl<B, const N: usize> Sampler<B, N>
where
    B: AdcBus,
{
    pub(crate) fn new(bus: B, channels: [ChannelSpec; N]) -> Self {
        Self {
            bus,
            channels,
            buffer: 0,
            iteration: 0,
        }
    }

    pub fn channels(&self) -> &[ChannelSpec; N] {
        &self.channels
    }

    /// Number of completed sweeps, wraps around.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    #[cfg(test)]
    pub(crate) fn bus(&self) -> &B {
        &self.bus
    }

    /// Samples every channel once, in board order, and reports the results.
    pub fn sweep(&mut self, log: &mut impl Write) -> Sweep<B::Error, N> {
        writeln!(log, "ADC reading[{}]:", self.iteration).ok();
        self.iteration = self.iteration.wrapping_add(1);

        let mut sweep = Vec::new();
        for index in 0..N {
            let outcome = self.sample(index, log);
            // Capacity is N, push can't fail
            sweep.push(outcome).ok();
        }
        sweep
    }

    fn sample(
        &mut self,
        index: usize,
        log: &mut impl Write,
    ) -> Result<Reading, ReadFailure<B::Error>> {
        let spec = self.channels[index];
        write!(log, "- {}, channel {}: ", spec.device, spec.channel.get()).ok();

        let sequence = Sequence::for_channel(&spec);
        if let Err(error) = nb::block!(self.bus.read(spec.device, &sequence, &mut self.buffer)) {
            writeln!(log, "Could not read ({:?})", error).ok();
            return Err(ReadFailure { index, error });
        }

        let value = interpret(self.buffer, spec.differential);
        let millivolts = to_millivolts(value, &spec, self.bus.internal_reference_mv(spec.device));
        match millivolts {
            Ok(mv) => writeln!(log, "{} = {} mV", value, mv).ok(),
            Err(ConversionUnsupported) => {
                writeln!(log, "{} (value in mV not available)", value).ok()
            }
        };

        Ok(Reading {
            index,
            value,
            millivolts,
        })
    }

    /// One sweep followed by the sampling period delay.
    pub fn step<D>(&mut self, delay: &mut D, log: &mut impl Write) -> Sweep<B::Error, N>
    where
        D: DelayMs<u32>,
    {
        let sweep = self.sweep(log);
        delay.delay_ms(SAMPLE_PERIOD.to_millis());
        sweep
    }

    pub fn run<D>(mut self, delay: &mut D, log: &mut impl Write) -> !
    where
        D: DelayMs<u32>,
    {
        loop {
            self.step(delay, log);
        }
    }
}
