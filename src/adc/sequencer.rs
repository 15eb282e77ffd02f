use super::{Sequencer, ACTSS_ASEN0, EMUX_EM0, INR0, PSSI_SS0, SSFSTAT_EMPTY};
use crate::{
    pac::{ADC0, GPIO_PORTE},
    sysctl::Enable,
};

/// Sample sequencer 0 of ADC0, fed from GPIO port E
pub struct Sequencer0 {
    adc: ADC0,
    port: GPIO_PORTE,
}

impl Sequencer0 {
    /// The clocks are gated on by `Adc::init`, not here
    pub fn new(adc: ADC0, port: GPIO_PORTE) -> Self {
        Sequencer0 { adc, port }
    }

    /// Releases the ADC and GPIO port peripherals
    pub fn free(self) -> (ADC0, GPIO_PORTE) {
        (self.adc, self.port)
    }
}

impl Sequencer for Sequencer0 {
    fn enable_adc_clock(&mut self) {
        // Safe, because `Sequencer0` is only driven from thread mode and the
        // clock gating registers aren't touched from any interrupt handler.
        unsafe { ADC0::enable_unchecked() }
    }

    fn enable_port_clock(&mut self) {
        // Safe, see `enable_adc_clock`.
        unsafe { GPIO_PORTE::enable_unchecked() }
    }

    fn configure_analog_pin(&mut self, pin: u8) {
        let mask = 1 << pin;

        self.port
            .dir
            .modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
        self.port
            .den
            .modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
        self.port
            .amsel
            .modify(|r, w| unsafe { w.bits(r.bits() | mask) });
        self.port
            .afsel
            .modify(|r, w| unsafe { w.bits(r.bits() | mask) });
    }

    fn disable(&mut self) {
        self.adc
            .actss
            .modify(|r, w| unsafe { w.bits(r.bits() & !ACTSS_ASEN0) });
    }

    fn clear_trigger_source(&mut self) {
        self.adc
            .emux
            .modify(|r, w| unsafe { w.bits(r.bits() & !EMUX_EM0) });
    }

    fn set_input_mux(&mut self, mux: u32) {
        self.adc.ssmux0.write(|w| unsafe { w.bits(mux) });
    }

    fn set_sample_control(&mut self, ctl: u32) {
        self.adc.ssctl0.write(|w| unsafe { w.bits(ctl) });
    }

    fn enable(&mut self) {
        self.adc
            .actss
            .modify(|r, w| unsafe { w.bits(r.bits() | ACTSS_ASEN0) });
    }

    fn initiate(&mut self) {
        self.adc.pssi.write(|w| unsafe { w.bits(PSSI_SS0) });
    }

    fn is_complete(&mut self) -> bool {
        self.adc.ris.read().bits() & INR0 != 0
    }

    fn fifo_empty(&mut self) -> bool {
        self.adc.ssfstat0.read().bits() & SSFSTAT_EMPTY != 0
    }

    fn read_fifo(&mut self) -> u16 {
        self.adc.ssfifo0.read().bits() as u16
    }

    fn clear_complete(&mut self) {
        // Write-1-to-clear, zeros leave the other sequencers alone
        self.adc.isc.write(|w| unsafe { w.bits(INR0) });
    }
}
