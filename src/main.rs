#![no_std]
#![no_main]

use panic_semihosting as _;

use stm32g0xx_hal as hal;

mod app;
mod driver;
mod platform;
