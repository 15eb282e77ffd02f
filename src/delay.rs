//! Delays

use crate::hal::blocking::delay::{DelayMs, DelayUs};
use crate::sysctl::Clocks;
use cast::u32;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;

pub trait DelayExt {
    fn delay(self, clocks: Clocks) -> Delay;
}

impl DelayExt for SYST {
    fn delay(self, clocks: Clocks) -> Delay {
        Delay::new(self, clocks)
    }
}

/// System timer (SysTick) as a delay provider
pub struct Delay {
    ticks_per_us: u32,
    syst: SYST,
}

impl Delay {
    /// Configures the system timer (SysTick) as a delay provider
    pub fn new(mut syst: SYST, clocks: Clocks) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        let freq = clocks.sys_clk().0;
        assert!(freq > 1_000_000_u32);
        let ticks_per_us = freq / 1_000_000_u32;
        Delay { ticks_per_us, syst }
    }

    /// Releases the system timer (SysTick) resource
    pub fn free(self) -> SYST {
        self.syst
    }
}

impl DelayMs<u32> for Delay {
    fn delay_ms(&mut self, ms: u32) {
        // Split long waits so `ms * 1_000` cannot overflow
        const MAX_MS: u32 = u32::MAX / 1_000;
        let mut remaining = ms;
        while remaining > 0 {
            let chunk = remaining.min(MAX_MS);
            self.delay_us(chunk * 1_000);
            remaining -= chunk;
        }
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        self.delay_ms(u32(ms));
    }
}

impl DelayMs<u8> for Delay {
    fn delay_ms(&mut self, ms: u8) {
        self.delay_ms(u32(ms));
    }
}

impl DelayUs<u32> for Delay {
    fn delay_us(&mut self, us: u32) {
        const MAX_RVR: u32 = 0x00FF_FFFF;
        let mut total_rvr = u64::from(self.ticks_per_us) * u64::from(us);
        while total_rvr > 0 {
            let current_rvr = if total_rvr <= u64::from(MAX_RVR) {
                total_rvr as u32
            } else {
                MAX_RVR
            };
            self.syst.set_reload(current_rvr);
            self.syst.clear_current();
            self.syst.enable_counter();
            total_rvr -= u64::from(current_rvr);
            while !self.syst.has_wrapped() {}
            self.syst.disable_counter();
        }
    }
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        self.delay_us(u32(us))
    }
}

impl DelayUs<u8> for Delay {
    fn delay_us(&mut self, us: u8) {
        self.delay_us(u32(us))
    }
}
