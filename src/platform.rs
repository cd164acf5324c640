use crate::hal::{
    prelude::*,
    rcc::{self, Enable, PllConfig},
    serial, stm32,
};

use adc_sampler::{
    board::{LOG_BAUD, RELAY_ACTIVE_LOW},
    relay::{Relay, RelayBank, RelayPin},
};

use crate::driver::{G0Adc, RelayLine, SysDelay};

pub type Log = crate::hal::serial::Serial<stm32::USART1, serial::FullConfig>;

pub struct Platform {
    pub delay: SysDelay,
    pub log: Log,
    pub adc: G0Adc,
    pub relays: RelayBank<RelayLine>,
}

impl Platform {
    pub fn startup(core: cortex_m::Peripherals, dev: stm32::Peripherals) -> Self {
        // Configure system clocks
        let pll_cfg = PllConfig::with_hsi(2, 16, 2); // 64 MHz
        let rcc_cfg = rcc::Config::pll().pll_cfg(pll_cfg);
        let mut rcc = dev.RCC.freeze(rcc_cfg);

        // Remap PA11/PA9 as PA9
        stm32::SYSCFG::enable(&mut rcc);
        unsafe {
            dev.SYSCFG
                .cfgr1
                .modify(|r, w| w.bits(r.bits() | (0b_0_1_000)));
        }

        let mut delay = core.SYST.delay(&mut rcc);

        let gpioa = dev.GPIOA.split(&mut rcc);
        let gpiob = dev.GPIOB.split(&mut rcc);

        // Configure log port
        let (txd, rxd) = (gpioa.pa9, gpioa.pa10); // USART1
        let log = dev
            .USART1
            .usart(
                txd,
                rxd,
                serial::FullConfig::default().baudrate(LOG_BAUD.bps()),
                &mut rcc,
            )
            .expect("Can't initialize log UART");

        // Analog inputs, pins come out of reset in analog mode
        let adc = dev.ADC.constrain(&mut rcc);
        let adc = G0Adc::new(adc, gpioa.pa0, gpioa.pa1, gpioa.pa4, &mut delay); // ADC1_IN0/1/4

        // Relay coil drivers. Mode change alone leaves the output level
        // undefined until startup drives them.
        let [r1, r2, r3] = RELAY_ACTIVE_LOW;
        let relay = |set: RelayLine, reset: RelayLine, (set_low, reset_low): (bool, bool)| {
            Relay::new(RelayPin::new(set, set_low), RelayPin::new(reset, reset_low))
        };
        let relays = RelayBank::new([
            relay(
                RelayLine::Pa6(gpioa.pa6.into_push_pull_output()),
                RelayLine::Pa5(gpioa.pa5.into_push_pull_output()),
                r1,
            ),
            relay(
                RelayLine::Pb0(gpiob.pb0.into_push_pull_output()),
                RelayLine::Pa7(gpioa.pa7.into_push_pull_output()),
                r2,
            ),
            relay(
                RelayLine::Pb3(gpiob.pb3.into_push_pull_output()),
                RelayLine::Pb1(gpiob.pb1.into_push_pull_output()),
                r3,
            ),
        ]);

        Self {
            delay: SysDelay(delay),
            log,
            adc,
            relays,
        }
    }
}
