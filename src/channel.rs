//! Static description of the analog inputs.

use bounded_integer::BoundedU8;

/// Hardware channel number on a converter device.
pub type ChannelId = BoundedU8<0, 31>;

/// Conversion resolution in bits. The sample buffer is 16 bits wide.
pub type Resolution = BoundedU8<1, 16>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    Gain1_6,
    Gain1_5,
    Gain1_4,
    Gain1_3,
    Gain2_5,
    Gain1_2,
    Gain2_3,
    Gain4_5,
    Gain1,
    Gain2,
    Gain3,
    Gain4,
    Gain6,
    Gain8,
    Gain12,
    Gain16,
    Gain24,
    Gain32,
    Gain64,
    Gain128,
}

impl Gain {
    /// `(multiplier, divisor)` that undoes the gain.
    pub const fn inverse(self) -> (u8, u8) {
        use Gain::*;
        match self {
            Gain1_6 => (6, 1),
            Gain1_5 => (5, 1),
            Gain1_4 => (4, 1),
            Gain1_3 => (3, 1),
            Gain2_5 => (5, 2),
            Gain1_2 => (2, 1),
            Gain2_3 => (3, 2),
            Gain4_5 => (5, 4),
            Gain1 => (1, 1),
            Gain2 => (1, 2),
            Gain3 => (1, 3),
            Gain4 => (1, 4),
            Gain6 => (1, 6),
            Gain8 => (1, 8),
            Gain12 => (1, 12),
            Gain16 => (1, 16),
            Gain24 => (1, 24),
            Gain32 => (1, 32),
            Gain64 => (1, 64),
            Gain128 => (1, 128),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Internal,
    Vdd,
    External0,
    External1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionTime {
    Default,
    Ticks(u16),
    Micros(u16),
    Nanos(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSpec {
    pub device: &'static str,
    pub channel: ChannelId,
    /// Raw samples are signed two's complement when set.
    pub differential: bool,
    pub gain: Gain,
    pub reference: Reference,
    pub acquisition_time: AcquisitionTime,
    pub resolution: Resolution,
    /// Oversampling as a power of two, 0 disables it.
    pub oversampling: u8,
    /// Reference voltage for non-internal references.
    pub vref_mv: Option<u16>,
}

impl ChannelSpec {
    /// Single-ended channel with unity gain against the internal reference.
    pub const fn single_ended(device: &'static str, channel: ChannelId, resolution: Resolution) -> Self {
        Self {
            device,
            channel,
            differential: false,
            gain: Gain::Gain1,
            reference: Reference::Internal,
            acquisition_time: AcquisitionTime::Default,
            resolution,
            oversampling: 0,
            vref_mv: None,
        }
    }

    pub const fn differential(mut self) -> Self {
        self.differential = true;
        self
    }

    pub const fn with_gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }

    pub const fn with_reference(mut self, reference: Reference, vref_mv: Option<u16>) -> Self {
        self.reference = reference;
        self.vref_mv = vref_mv;
        self
    }

    pub const fn with_acquisition_time(mut self, time: AcquisitionTime) -> Self {
        self.acquisition_time = time;
        self
    }

    pub const fn with_oversampling(mut self, oversampling: u8) -> Self {
        self.oversampling = oversampling;
        self
    }
}

/// A read can only be issued with a sequence, so every read is preceded by
/// preparing one for the channel being sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence {
    pub channel: ChannelId,
    pub resolution: Resolution,
    pub oversampling: u8,
}

impl Sequence {
    pub const fn for_channel(spec: &ChannelSpec) -> Self {
        Self {
            channel: spec.channel,
            resolution: spec.resolution,
            oversampling: spec.oversampling,
        }
    }
}
