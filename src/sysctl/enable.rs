use super::*;

macro_rules! gate_enable {
    ($($PER:ident => ($rcgc:ident, $bit:expr),)+) => {
        $(
            impl Enable for crate::pac::$PER {
                #[inline(always)]
                fn enable(sysctl: &mut Sysctl) {
                    sysctl.rb.$rcgc.modify(|r, w| unsafe { w.bits(r.bits() | (1 << $bit)) });
                    cortex_m::asm::dsb();
                }
                #[inline(always)]
                unsafe fn enable_unchecked() {
                    let sysctl = &*SYSCTL::ptr();
                    sysctl.$rcgc.modify(|r, w| w.bits(r.bits() | (1 << $bit)));
                    cortex_m::asm::dsb();
                }
            }
        )+
    };
}

gate_enable! {
    ADC0 => (rcgcadc, 0),
    GPIO_PORTB => (rcgcgpio, 1),
    GPIO_PORTE => (rcgcgpio, 4),
}
