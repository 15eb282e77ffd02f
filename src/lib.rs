#![cfg_attr(not(test), no_std)]

use embedded_hal as hal;

pub use tm4c123x as pac;

pub use crate::pac as device;

pub mod adc;
pub mod app;
pub mod delay;
pub mod display;
pub mod leds;
pub mod prelude;
pub mod scale;
pub mod sysctl;
pub mod time;

#[cfg(test)]
mod mock;
