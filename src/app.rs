use rtic::app;

#[app(device = crate::hal::stm32, peripherals = true)]
mod app {
    use adc_sampler::{
        board::{CHANNELS, CHANNEL_COUNT},
        startup, Sampler,
    };
    use core::fmt::Write;

    use crate::driver::{G0Adc, SysDelay};
    use crate::platform::{Log, Platform};

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        sampler: Option<Sampler<G0Adc, CHANNEL_COUNT>>,
        delay: SysDelay,
        log: Log,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        let Platform {
            delay,
            mut log,
            adc,
            mut relays,
        } = Platform::startup(cx.core, cx.device);

        // On failure the relays stay untouched and nothing is sampled
        let sampler = startup(adc, CHANNELS, &mut relays, &mut log).ok();
        if sampler.is_none() {
            writeln!(log, "# Setup failed, sampling disabled").ok();
        }

        (Shared {}, Local { sampler, delay, log }, init::Monotonics())
    }

    #[idle(local = [sampler, delay, log])]
    fn idle(cx: idle::Context) -> ! {
        if let Some(sampler) = cx.local.sampler.take() {
            sampler.run(cx.local.delay, cx.local.log);
        }
        loop {
            cortex_m::asm::wfi();
        }
    }
}
