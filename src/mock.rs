//! In-memory stand-ins for the peripherals, used by the unit tests

use std::{cell::RefCell, rc::Rc};

use embedded_hal::blocking::delay::DelayMs;
use heapless::spsc::Queue;

use crate::{
    adc::{Channel, Sequencer, ACTSS_ASEN0, EMUX_EM0, INR0},
    display::CharacterDisplay,
    leds::LedBank,
};

/// Register transactions and delays, in the order they happened
pub type Journal = Rc<RefCell<Vec<Op>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Op {
    EnableAdcClock,
    EnablePortClock,
    ConfigureAnalogPin(u8),
    Disable,
    ClearTriggerSource,
    SetInputMux(u32),
    SetSampleControl(u32),
    Enable,
    Initiate,
    ReadFifo,
    ClearComplete,
    Delay(u32),
}

/// Register words touched by the driver
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Registers {
    pub rcgcadc: u32,
    pub rcgcgpio: u32,
    pub dir: u32,
    pub den: u32,
    pub amsel: u32,
    pub afsel: u32,
    pub actss: u32,
    pub emux: u32,
    pub ssmux0: u32,
    pub ssctl0: u32,
    pub ris: u32,
}

const SLOTS: usize = 8;
const SSCTL_END: u32 = 1 << 1;
const SSCTL_IE: u32 = 1 << 2;

/// Sample sequencer 0 with an 8-entry FIFO
///
/// Starting a sequence converts the inputs selected by SSMUX0, slot by slot,
/// up to the slot marked END in SSCTL0. The results and the completion flag
/// appear after `latency` polls, the flag only if the END slot has IE set.
pub struct MockSequencer {
    regs: Registers,
    inputs: [u16; 16],
    // Holds `SLOTS` entries
    fifo: Queue<u16, 9>,
    latency: u32,
    stalled: bool,
    pending: Option<u32>,
    polls: u32,
    journal: Journal,
}

impl MockSequencer {
    pub fn new(journal: Journal) -> Self {
        MockSequencer {
            regs: Registers::default(),
            inputs: [0; 16],
            fifo: Queue::new(),
            latency: 0,
            stalled: false,
            pending: None,
            polls: 0,
            journal,
        }
    }

    pub fn with_registers(regs: Registers) -> Self {
        MockSequencer {
            regs,
            ..MockSequencer::new(journal())
        }
    }

    /// Sets the code every conversion of `channel` produces
    pub fn input(mut self, channel: Channel, raw: u16) -> Self {
        self.set_input(channel, raw);
        self
    }

    pub fn set_input(&mut self, channel: Channel, raw: u16) {
        self.inputs[usize::from(channel.id())] = raw;
    }

    /// Number of polls that report "busy" before a sequence completes
    pub fn latency(mut self, polls: u32) -> Self {
        self.latency = polls;
        self
    }

    /// Sequences start but never complete
    pub fn stalled(mut self) -> Self {
        self.stalled = true;
        self
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    pub fn registers(&self) -> Registers {
        self.regs
    }

    pub fn fifo_len(&self) -> usize {
        self.fifo.len()
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }

    fn record(&self, op: Op) {
        self.journal.borrow_mut().push(op);
    }

    fn active(&self) -> bool {
        self.regs.actss & ACTSS_ASEN0 != 0
    }

    fn finish(&mut self) {
        for slot in 0..SLOTS {
            let input = (self.regs.ssmux0 >> (4 * slot)) & 0xF;
            let ctl = (self.regs.ssctl0 >> (4 * slot)) & 0xF;

            // A full FIFO drops the result, like the hardware does
            let _ = self.fifo.enqueue(self.inputs[input as usize]);

            if ctl & SSCTL_END != 0 {
                if ctl & SSCTL_IE != 0 {
                    self.regs.ris |= INR0;
                }
                break;
            }
        }
    }
}

impl Sequencer for MockSequencer {
    fn enable_adc_clock(&mut self) {
        self.record(Op::EnableAdcClock);
        self.regs.rcgcadc |= 1 << 0;
    }

    fn enable_port_clock(&mut self) {
        self.record(Op::EnablePortClock);
        self.regs.rcgcgpio |= 1 << 4;
    }

    fn configure_analog_pin(&mut self, pin: u8) {
        self.record(Op::ConfigureAnalogPin(pin));
        let mask = 1 << pin;
        self.regs.dir &= !mask;
        self.regs.den &= !mask;
        self.regs.amsel |= mask;
        self.regs.afsel |= mask;
    }

    fn disable(&mut self) {
        self.record(Op::Disable);
        self.regs.actss &= !ACTSS_ASEN0;
        self.pending = None;
    }

    fn clear_trigger_source(&mut self) {
        self.record(Op::ClearTriggerSource);
        self.regs.emux &= !EMUX_EM0;
    }

    fn set_input_mux(&mut self, mux: u32) {
        self.record(Op::SetInputMux(mux));
        if !self.active() {
            self.regs.ssmux0 = mux;
        }
    }

    fn set_sample_control(&mut self, ctl: u32) {
        self.record(Op::SetSampleControl(ctl));
        if !self.active() {
            self.regs.ssctl0 = ctl;
        }
    }

    fn enable(&mut self) {
        self.record(Op::Enable);
        self.regs.actss |= ACTSS_ASEN0;
    }

    fn initiate(&mut self) {
        self.record(Op::Initiate);
        if self.active() && !self.stalled {
            self.pending = Some(self.latency);
        }
    }

    fn is_complete(&mut self) -> bool {
        self.polls += 1;
        match self.pending {
            Some(0) => {
                self.pending = None;
                self.finish();
            }
            Some(remaining) => self.pending = Some(remaining - 1),
            None => {}
        }
        self.regs.ris & INR0 != 0
    }

    fn fifo_empty(&mut self) -> bool {
        self.fifo.is_empty()
    }

    fn read_fifo(&mut self) -> u16 {
        self.record(Op::ReadFifo);
        self.fifo.dequeue().unwrap_or(0)
    }

    fn clear_complete(&mut self) {
        self.record(Op::ClearComplete);
        self.regs.ris &= !INR0;
    }
}

pub struct MockDelay {
    journal: Journal,
}

impl MockDelay {
    pub fn new(journal: Journal) -> Self {
        MockDelay { journal }
    }
}

impl DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.journal.borrow_mut().push(Op::Delay(ms));
    }
}

#[derive(Default)]
pub struct MockDisplay {
    writes: Vec<String>,
    cursors: Vec<(u8, u8)>,
    clears: usize,
    failing: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Default::default()
    }

    /// Every operation fails
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn cursors(&self) -> &[(u8, u8)] {
        &self.cursors
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    fn check(&self) -> Result<(), ()> {
        if self.failing {
            Err(())
        } else {
            Ok(())
        }
    }
}

impl CharacterDisplay for MockDisplay {
    type Error = ();

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), ()> {
        self.check()?;
        self.cursors.push((col, row));
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<(), ()> {
        self.check()?;
        self.writes.push(String::from(s));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ()> {
        self.check()?;
        self.clears += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockLeds {
    patterns: Vec<u8>,
}

impl MockLeds {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn patterns(&self) -> &[u8] {
        &self.patterns
    }
}

impl LedBank for MockLeds {
    fn output(&mut self, pattern: u8) {
        self.patterns.push(pattern);
    }
}
