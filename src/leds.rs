//! EduBase LED bank

use crate::{
    pac::GPIO_PORTB,
    sysctl::{Enable, Sysctl},
};

/// LED0..LED3 on PB0..PB3
pub const LED_MASK: u32 = 0x0F;

/// A bank of four LEDs
pub trait LedBank {
    /// Drives the LEDs from the low four bits of `pattern`, bit 0 = LED0
    fn output(&mut self, pattern: u8);
}

pub trait LedsExt {
    fn leds(self, sysctl: &mut Sysctl) -> Leds;
}

impl LedsExt for GPIO_PORTB {
    fn leds(self, sysctl: &mut Sysctl) -> Leds {
        Leds::new(self, sysctl)
    }
}

/// The EduBase LEDs as push-pull outputs
pub struct Leds {
    port: GPIO_PORTB,
}

impl Leds {
    pub fn new(port: GPIO_PORTB, sysctl: &mut Sysctl) -> Self {
        GPIO_PORTB::enable(sysctl);

        port.dir.modify(|r, w| unsafe { w.bits(r.bits() | LED_MASK) });
        port.den.modify(|r, w| unsafe { w.bits(r.bits() | LED_MASK) });

        let mut leds = Leds { port };
        leds.output(0);
        leds
    }

    pub fn free(self) -> GPIO_PORTB {
        self.port
    }
}

impl LedBank for Leds {
    fn output(&mut self, pattern: u8) {
        let bits = u32::from(pattern) & LED_MASK;
        self.port
            .data
            .modify(|r, w| unsafe { w.bits((r.bits() & !LED_MASK) | bits) });
    }
}
