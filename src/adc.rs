use core::fmt::Debug;

use crate::channel::{ChannelSpec, Sequence};

/// Access to the analog-to-digital converters of a board.
///
/// All converters sit behind one bus object because acquisitions are
/// serialized anyway: only one channel is ever sampled at a time.
pub trait AdcBus {
    type Error: Debug;

    /// Whether the named converter is initialized and usable.
    fn is_ready(&self, device: &str) -> bool;

    /// Applies gain, reference, acquisition time and resolution of a channel.
    fn setup(&mut self, spec: &ChannelSpec) -> Result<(), Self::Error>;

    /// Runs one acquisition and stores the sample in `buffer`.
    fn read(
        &mut self,
        device: &str,
        sequence: &Sequence,
        buffer: &mut u16,
    ) -> nb::Result<(), Self::Error>;

    /// Reference voltage of the converter's internal reference, if known.
    fn internal_reference_mv(&self, _device: &str) -> Option<u16> {
        None
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::BTreeSet;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FakeError {
        Rejected,
        Overrun,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Setup(u8),
        Read(u8),
    }

    /// Scriptable converter that records every call it receives.
    #[derive(Debug, Default)]
    pub struct FakeBus {
        pub calls: Vec<Call>,
        pub not_ready: BTreeSet<&'static str>,
        pub rejected: BTreeSet<u8>,
        /// Channels whose next reads fail, one entry per failing read.
        pub failing_reads: Vec<u8>,
        /// Reads return `WouldBlock` this many times before completing.
        pub busy_polls: u32,
        pub samples: [u16; 32],
        pub internal_mv: Option<u16>,
        polls: u32,
    }

    impl FakeBus {
        pub fn reads(&self) -> Vec<u8> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Read(ch) => Some(*ch),
                    _ => None,
                })
                .collect()
        }
    }

    impl AdcBus for FakeBus {
        type Error = FakeError;

        fn is_ready(&self, device: &str) -> bool {
            !self.not_ready.contains(device)
        }

        fn setup(&mut self, spec: &ChannelSpec) -> Result<(), FakeError> {
            self.calls.push(Call::Setup(spec.channel.get()));
            if self.rejected.contains(&spec.channel.get()) {
                Err(FakeError::Rejected)
            } else {
                Ok(())
            }
        }

        fn read(
            &mut self,
            _device: &str,
            sequence: &Sequence,
            buffer: &mut u16,
        ) -> nb::Result<(), FakeError> {
            if self.polls < self.busy_polls {
                self.polls += 1;
                return Err(nb::Error::WouldBlock);
            }
            self.polls = 0;

            let ch = sequence.channel.get();
            self.calls.push(Call::Read(ch));
            if let Some(pos) = self.failing_reads.iter().position(|c| *c == ch) {
                self.failing_reads.remove(pos);
                return Err(nb::Error::Other(FakeError::Overrun));
            }
            *buffer = self.samples[usize::from(ch)];
            Ok(())
        }

        fn internal_reference_mv(&self, _device: &str) -> Option<u16> {
            self.internal_mv
        }
    }
}
