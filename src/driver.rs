//! STM32G0 implementations of the sampler's hardware interfaces.

use core::convert::Infallible;

use crate::hal::{
    analog::adc::{Adc, OversamplingRatio, Precision, SampleTime},
    gpio::{
        gpioa::{PA0, PA1, PA4, PA5, PA6, PA7},
        gpiob::{PB0, PB1, PB3},
        Analog, Output, PushPull,
    },
    hal::adc::OneShot,
    hal::blocking::delay::{DelayMs, DelayUs},
    hal::digital::v2::OutputPin,
    prelude::*,
    stm32,
    timer::delay::Delay,
};

use adc_sampler::{
    board::ADC_DEVICE,
    channel::{AcquisitionTime, ChannelSpec, Gain, Reference, Sequence},
    AdcBus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcError {
    /// The channel asks for something the converter can't do.
    Unsupported,
    /// No analog pin is wired to the channel.
    NoSuchChannel,
    Conversion,
}

/// The single ADC of the STM32G030 with its analog pins.
pub struct G0Adc {
    adc: Adc,
    in0: PA0<Analog>,
    in1: PA1<Analog>,
    in4: PA4<Analog>,
    /// Sample time configured per channel.
    sample_times: [AcquisitionTime; 32],
    vdda_mv: Option<u16>,
}

impl G0Adc {
    pub fn new(
        mut adc: Adc,
        in0: PA0<Analog>,
        in1: PA1<Analog>,
        in4: PA4<Analog>,
        delay: &mut impl DelayUs<u8>,
    ) -> Self {
        adc.set_sample_time(SampleTime::T_80);
        adc.set_precision(Precision::B_12);

        delay.delay_us(20); // Wait for ADC voltage regulator to stabilize
        adc.calibrate();

        let vdda_mv = nb::block!(adc.read_vref()).ok();

        Self {
            adc,
            in0,
            in1,
            in4,
            sample_times: [AcquisitionTime::Default; 32],
            vdda_mv,
        }
    }
}

fn precision(bits: u8) -> Option<Precision> {
    match bits {
        12 => Some(Precision::B_12),
        10 => Some(Precision::B_10),
        8 => Some(Precision::B_8),
        6 => Some(Precision::B_6),
        _ => None,
    }
}

fn sample_time(time: AcquisitionTime) -> Option<SampleTime> {
    use AcquisitionTime::*;
    match time {
        Default => Some(SampleTime::T_80),
        Ticks(2) => Some(SampleTime::T_2),
        Ticks(4) => Some(SampleTime::T_4),
        Ticks(8) => Some(SampleTime::T_8),
        Ticks(12) => Some(SampleTime::T_12),
        Ticks(20) => Some(SampleTime::T_20),
        Ticks(40) => Some(SampleTime::T_40),
        Ticks(80) => Some(SampleTime::T_80),
        Ticks(160) => Some(SampleTime::T_160),
        _ => None,
    }
}

fn oversampling(log2: u8) -> Option<OversamplingRatio> {
    use OversamplingRatio::*;
    match log2 {
        1 => Some(X_2),
        2 => Some(X_4),
        3 => Some(X_8),
        4 => Some(X_16),
        5 => Some(X_32),
        6 => Some(X_64),
        7 => Some(X_128),
        8 => Some(X_256),
        _ => None,
    }
}

impl AdcBus for G0Adc {
    type Error = AdcError;

    fn is_ready(&self, device: &str) -> bool {
        device == ADC_DEVICE && self.vdda_mv.is_some()
    }

    fn setup(&mut self, spec: &ChannelSpec) -> Result<(), AdcError> {
        if !matches!(spec.channel.get(), 0 | 1 | 4) {
            return Err(AdcError::NoSuchChannel);
        }
        if spec.differential
            || spec.gain != Gain::Gain1
            || !matches!(spec.reference, Reference::Internal | Reference::Vdd)
            || precision(spec.resolution.get()).is_none()
            || (spec.oversampling != 0 && oversampling(spec.oversampling).is_none())
        {
            return Err(AdcError::Unsupported);
        }
        sample_time(spec.acquisition_time).ok_or(AdcError::Unsupported)?;

        self.sample_times[usize::from(spec.channel.get())] = spec.acquisition_time;
        Ok(())
    }

    fn read(
        &mut self,
        _device: &str,
        sequence: &Sequence,
        buffer: &mut u16,
    ) -> nb::Result<(), AdcError> {
        let id = sequence.channel.get();
        let time = sample_time(self.sample_times[usize::from(id)]).ok_or(AdcError::Unsupported)?;
        let bits = precision(sequence.resolution.get()).ok_or(AdcError::Unsupported)?;

        self.adc.set_sample_time(time);
        self.adc.set_precision(bits);
        match oversampling(sequence.oversampling) {
            Some(ratio) => {
                self.adc.set_oversampling_ratio(ratio);
                self.adc.set_oversampling_shift(sequence.oversampling);
                self.adc.oversampling_enable(true);
            }
            None => self.adc.oversampling_enable(false),
        }

        let raw: nb::Result<u16, ()> = match id {
            0 => self.adc.read(&mut self.in0),
            1 => self.adc.read(&mut self.in1),
            4 => self.adc.read(&mut self.in4),
            _ => return Err(nb::Error::Other(AdcError::NoSuchChannel)),
        };
        *buffer = raw.map_err(|e| e.map(|()| AdcError::Conversion))?;
        Ok(())
    }

    fn internal_reference_mv(&self, _device: &str) -> Option<u16> {
        self.vdda_mv
    }
}

/// Push-pull output driving one relay coil transistor.
pub enum RelayLine {
    Pa5(PA5<Output<PushPull>>),
    Pa6(PA6<Output<PushPull>>),
    Pa7(PA7<Output<PushPull>>),
    Pb0(PB0<Output<PushPull>>),
    Pb1(PB1<Output<PushPull>>),
    Pb3(PB3<Output<PushPull>>),
}

impl OutputPin for RelayLine {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        use RelayLine::*;
        match self {
            Pa5(p) => p.set_low(),
            Pa6(p) => p.set_low(),
            Pa7(p) => p.set_low(),
            Pb0(p) => p.set_low(),
            Pb1(p) => p.set_low(),
            Pb3(p) => p.set_low(),
        }
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        use RelayLine::*;
        match self {
            Pa5(p) => p.set_high(),
            Pa6(p) => p.set_high(),
            Pa7(p) => p.set_high(),
            Pb0(p) => p.set_high(),
            Pb1(p) => p.set_high(),
            Pb3(p) => p.set_high(),
        }
    }
}

/// SysTick delay in the millisecond form the sampler expects.
pub struct SysDelay(pub Delay<stm32::SYST>);

impl DelayMs<u32> for SysDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.delay(ms.ms());
    }
}
