//! # Analog to Digital converter
//!
//! Sample sequencer 0 of ADC0 is programmed with a fixed two-slot sequence.
//! A conversion is started from software, the raw interrupt status is polled
//! until the sequence has finished, and both results are drained from the
//! sequencer FIFO in the order they were produced.

use embedded_hal::blocking::delay::DelayMs;
use void::Void;

use crate::scale;

mod sequencer;

pub use self::sequencer::Sequencer0;

/// Time the ADC needs after its clock has been gated on, in milliseconds
pub const SETTLE_MS: u32 = 1;

/// Mask of the conversion result in an SSFIFO read
pub const DATA_MASK: u16 = 0x0FFF;

/// Number of samples taken by one sequence
pub const SEQUENCE_LEN: usize = 2;

/// Depth of the sequencer 0 FIFO
pub const FIFO_DEPTH: usize = 8;

/// ACTSS: sample sequencer 0 enable
pub const ACTSS_ASEN0: u32 = 1 << 0;
/// EMUX: sample sequencer 0 trigger select field
pub const EMUX_EM0: u32 = 0xF;
/// PSSI: initiate sample sequencer 0
pub const PSSI_SS0: u32 = 1 << 0;
/// SSFSTAT0: the FIFO holds no results
pub const SSFSTAT_EMPTY: u32 = 1 << 8;
/// RIS / ISC: sample sequencer 0 interrupt status
pub const INR0: u32 = 1 << 0;
/// SSCTL0: sample 1 is the end of the sequence
pub const SSCTL_END1: u32 = 1 << 5;
/// SSCTL0: sample 1 raises the interrupt status flag
pub const SSCTL_IE1: u32 = 1 << 6;

/// Register operations the driver needs from sample sequencer 0 and the
/// analog pins feeding it
///
/// Implemented by [`Sequencer0`] for the real peripheral. Every method maps
/// to one register transaction, so implementations don't need to know about
/// the sequence being programmed.
pub trait Sequencer {
    /// Gates the clock of the ADC module on
    fn enable_adc_clock(&mut self);

    /// Gates the clock of the GPIO port carrying the analog pins on
    fn enable_port_clock(&mut self);

    /// Switches one pin of the port to analog input
    ///
    /// Input direction, digital buffer off, analog mode on, alternate
    /// function on. The digital buffer must be off before analog mode is
    /// selected.
    fn configure_analog_pin(&mut self, pin: u8);

    /// Clears ASEN0. The sequencer registers can only be written while the
    /// sequencer is disabled.
    fn disable(&mut self);

    /// Clears the EM0 field, selecting the processor (software) trigger
    fn clear_trigger_source(&mut self);

    /// Writes SSMUX0
    fn set_input_mux(&mut self, mux: u32);

    /// Writes SSCTL0
    fn set_sample_control(&mut self, ctl: u32);

    /// Sets ASEN0
    fn enable(&mut self);

    /// Starts the sequence from software (PSSI.SS0)
    fn initiate(&mut self);

    /// Reads the raw interrupt status of sequencer 0 (RIS.INR0)
    fn is_complete(&mut self) -> bool;

    /// Reads SSFSTAT0.EMPTY
    fn fifo_empty(&mut self) -> bool;

    /// Pops the oldest result from SSFIFO0
    fn read_fifo(&mut self) -> u16;

    /// Clears the interrupt status of sequencer 0 (write 1 to ISC.IN0)
    fn clear_complete(&mut self);
}

macro_rules! channels {
    ($($Chan:ident: ($pin:expr, $ain:expr, $doc:expr)),+ $(,)*) => {
        /// Analog inputs routed to GPIO port E
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum Channel {
            $(
                #[doc = $doc]
                $Chan,
            )+
        }

        impl Channel {
            /// Input number as programmed into SSMUX
            pub fn id(self) -> u8 {
                match self {
                    $(Channel::$Chan => $ain,)+
                }
            }

            /// Pin number on port E
            pub fn pin(self) -> u8 {
                match self {
                    $(Channel::$Chan => $pin,)+
                }
            }
        }
    };
}

channels! {
    Ain0: (3, 0, "AIN0 on PE3"),
    Ain1: (2, 1, "AIN1 on PE2 (EduBase potentiometer)"),
    Ain2: (1, 2, "AIN2 on PE1 (EduBase light sensor)"),
    Ain3: (0, 3, "AIN3 on PE0"),
    Ain8: (5, 8, "AIN8 on PE5"),
    Ain9: (4, 9, "AIN9 on PE4"),
}

/// The two-slot sequence programmed into sample sequencer 0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequence {
    first: Channel,
    second: Channel,
}

impl Sequence {
    /// Samples `first` in slot 0 and `second` in slot 1
    pub fn new(first: Channel, second: Channel) -> Self {
        Sequence { first, second }
    }

    /// Potentiometer first, light sensor second
    pub fn edubase() -> Self {
        Sequence::new(Channel::Ain1, Channel::Ain2)
    }

    pub fn channels(&self) -> [Channel; SEQUENCE_LEN] {
        [self.first, self.second]
    }

    /// SSMUX0 value: one 4-bit input number per slot
    pub fn input_mux(&self) -> u32 {
        u32::from(self.first.id()) | u32::from(self.second.id()) << 4
    }

    /// SSCTL0 value: slot 1 ends the sequence and raises the status flag
    pub fn sample_control(&self) -> u32 {
        SSCTL_END1 | SSCTL_IE1
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence::edubase()
    }
}

/// ADC driver configuration
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub poll_limit: u32,
    pub vref: f32,
}

impl Config {
    /// Number of completion polls before a sample gives up
    pub fn poll_limit(mut self, poll_limit: u32) -> Self {
        self.poll_limit = poll_limit;
        self
    }

    /// Full-scale reference voltage
    pub fn vref(mut self, vref: f32) -> Self {
        self.vref = vref;
        self
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            poll_limit: 100_000,
            vref: 3.3,
        }
    }
}

/// Represents an ADC error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The sequence didn't report completion within the configured number of
    /// polls
    Timeout,
}

/// Analog to Digital converter interface
pub struct Adc<S> {
    seq: S,
    sequence: Sequence,
    config: Config,
}

impl<S> Adc<S>
where
    S: Sequencer,
{
    /// Takes ownership of the sequencer and programs `sequence` into it
    pub fn new<D>(seq: S, sequence: Sequence, config: Config, delay: &mut D) -> Self
    where
        D: DelayMs<u32>,
    {
        let mut adc = Adc {
            seq,
            sequence,
            config,
        };
        adc.init(delay);
        adc
    }

    /// Applies the clock, pin and sequencer configuration
    ///
    /// Running this again rewrites the same register values and throws away
    /// whatever a sequence abandoned after a timeout left in the FIFO.
    pub fn init<D>(&mut self, delay: &mut D)
    where
        D: DelayMs<u32>,
    {
        self.seq.enable_adc_clock();
        delay.delay_ms(SETTLE_MS);
        self.seq.enable_port_clock();

        for channel in self.sequence.channels().iter() {
            self.seq.configure_analog_pin(channel.pin());
        }

        self.seq.disable();
        self.flush();
        self.seq.clear_trigger_source();
        self.seq.set_input_mux(self.sequence.input_mux());
        self.seq.set_sample_control(self.sequence.sample_control());
        self.seq.enable();
    }

    /// Starts a conversion of the whole sequence
    pub fn start(&mut self) {
        self.seq.initiate();
    }

    /// Collects the results of a started sequence
    ///
    /// Returns `WouldBlock` until the sequencer reports completion, then
    /// drains both results in slot order and re-arms the status flag.
    pub fn try_read(&mut self) -> nb::Result<[u16; SEQUENCE_LEN], Void> {
        if !self.seq.is_complete() {
            return Err(nb::Error::WouldBlock);
        }

        let first = self.seq.read_fifo() & DATA_MASK;
        let second = self.seq.read_fifo() & DATA_MASK;
        self.seq.clear_complete();

        Ok([first, second])
    }

    /// Runs one sequence and returns the raw codes in slot order
    ///
    /// Results of an earlier sequence that finished after its read timed out
    /// are discarded first.
    pub fn read_raw(&mut self) -> Result<[u16; SEQUENCE_LEN], Error> {
        self.flush();
        self.start();

        for _ in 0..self.config.poll_limit {
            match self.try_read() {
                Ok(raw) => return Ok(raw),
                Err(nb::Error::WouldBlock) => continue,
                Err(nb::Error::Other(e)) => match e {},
            }
        }

        Err(Error::Timeout)
    }

    /// Runs one sequence and writes the voltages into `buffer`
    ///
    /// Index 0 receives the slot 0 channel, index 1 the slot 1 channel.
    /// `buffer` is left untouched on error.
    pub fn sample(&mut self, buffer: &mut [f32; SEQUENCE_LEN]) -> Result<(), Error> {
        let raw = self.read_raw()?;

        for (voltage, &code) in buffer.iter_mut().zip(raw.iter()) {
            *voltage = scale::raw_to_voltage(code, self.config.vref);
        }

        Ok(())
    }

    /// Drains the FIFO and clears the completion flag
    fn flush(&mut self) {
        for _ in 0..FIFO_DEPTH {
            if self.seq.fifo_empty() {
                break;
            }
            self.seq.read_fifo();
        }
        self.seq.clear_complete();
    }

    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    pub fn config(&self) -> Config {
        self.config
    }
}

impl<S> Adc<S> {
    pub fn release(self) -> S {
        self.seq
    }
}
