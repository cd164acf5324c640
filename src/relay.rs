//! Bistable relay drivers.
//!
//! Each relay is switched by pulsing either its set or its reset coil. At
//! rest both coil drivers must be off.

use core::fmt::{self, Debug, Write};

use embedded_hal::digital::v2::OutputPin;

pub const RELAY_COUNT: usize = 3;

/// Output pin with a configurable active level.
#[derive(Debug)]
pub struct RelayPin<P> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> RelayPin<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    pub fn active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Turns the coil driver off.
    pub fn deactivate(&mut self) -> Result<(), P::Error> {
        if self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }

    #[cfg(test)]
    pub(crate) fn release(self) -> P {
        self.pin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coil {
    Set,
    Reset,
}

impl fmt::Display for Coil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coil::Set => f.write_str("set"),
            Coil::Reset => f.write_str("reset"),
        }
    }
}

#[derive(Debug)]
pub struct Relay<P> {
    pub set: RelayPin<P>,
    pub reset: RelayPin<P>,
}

impl<P: OutputPin> Relay<P> {
    pub fn new(set: RelayPin<P>, reset: RelayPin<P>) -> Self {
        Self { set, reset }
    }
}

#[derive(Debug)]
pub struct RelayBank<P> {
    relays: [Relay<P>; RELAY_COUNT],
}

impl<P> RelayBank<P>
where
    P: OutputPin,
    P::Error: Debug,
{
    pub fn new(relays: [Relay<P>; RELAY_COUNT]) -> Self {
        Self { relays }
    }

    /// Drives every coil driver to its inactive level.
    ///
    /// A pin that fails is reported and skipped, the remaining pins are
    /// still driven. Returns the number of failed pins.
    pub fn deactivate_all(&mut self, log: &mut impl Write) -> usize {
        let mut failed = 0;
        for (n, relay) in self.relays.iter_mut().enumerate() {
            // Reset first, matching the board's wiring order
            for (coil, pin) in [(Coil::Reset, &mut relay.reset), (Coil::Set, &mut relay.set)] {
                if let Err(e) = pin.deactivate() {
                    writeln!(log, "Could not deactivate relay{} {} ({:?})", n + 1, coil, e).ok();
                    failed += 1;
                }
            }
        }
        failed
    }

    #[cfg(test)]
    pub(crate) fn release(self) -> [Relay<P>; RELAY_COUNT] {
        self.relays
    }
}
