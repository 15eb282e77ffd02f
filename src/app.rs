//! Potentiometer and light sensor monitor
//!
//! Samples both inputs, shows the voltages and the light level on the
//! character display and lights the LED bank while the light level is at or
//! above a threshold.

use embedded_hal::blocking::delay::DelayMs;

use crate::{
    adc::{self, Adc, Sequencer, SEQUENCE_LEN},
    display::CharacterDisplay,
    leds::LedBank,
    scale,
};

/// Column where the readings start, after the labels
pub const VALUE_COL: u8 = 7;

/// Column of the three-digit light level
pub const LEVEL_COL: u8 = 13;

/// Monitor configuration
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub input_min: f32,
    pub input_max: f32,
    pub output_min: i32,
    pub output_max: i32,
    pub threshold: i32,
    pub leds_on: u8,
    pub leds_off: u8,
    pub refresh_ms: u32,
}

impl Config {
    /// Voltage range mapped onto the output range
    pub fn input_range(mut self, min: f32, max: f32) -> Self {
        self.input_min = min;
        self.input_max = max;
        self
    }

    pub fn output_range(mut self, min: i32, max: i32) -> Self {
        self.output_min = min;
        self.output_max = max;
        self
    }

    /// Lowest light level that turns the LEDs on
    pub fn threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Pause after each display update
    pub fn refresh_ms(mut self, refresh_ms: u32) -> Self {
        self.refresh_ms = refresh_ms;
        self
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            input_min: 0.0,
            input_max: 3.3,
            output_min: 0,
            output_max: 255,
            threshold: 200,
            leds_on: 0xF,
            leds_off: 0x0,
            refresh_ms: 1_000,
        }
    }
}

/// One cycle's worth of measurements
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub potentiometer: f32,
    pub light_sensor: f32,
    pub level: i32,
}

#[derive(Debug, PartialEq)]
pub enum Error<E> {
    Adc(adc::Error),
    Display(E),
}

impl<E> From<adc::Error> for Error<E> {
    fn from(e: adc::Error) -> Self {
        Error::Adc(e)
    }
}

pub struct Monitor<S, D, L, T> {
    adc: Adc<S>,
    display: D,
    leds: L,
    delay: T,
    config: Config,
    buffer: [f32; SEQUENCE_LEN],
}

impl<S, D, L, T> Monitor<S, D, L, T>
where
    S: Sequencer,
    D: CharacterDisplay,
    L: LedBank,
    T: DelayMs<u32>,
{
    pub fn new(adc: Adc<S>, display: D, leds: L, delay: T, config: Config) -> Self {
        Monitor {
            adc,
            display,
            leds,
            delay,
            config,
            buffer: [0.0; SEQUENCE_LEN],
        }
    }

    /// Clears the display and writes the row labels
    pub fn show_banner(&mut self) -> Result<(), Error<D::Error>> {
        self.display.clear().map_err(Error::Display)?;
        self.display.set_cursor(0, 0).map_err(Error::Display)?;
        self.display.write_str("Pot:").map_err(Error::Display)?;
        self.display.set_cursor(0, 1).map_err(Error::Display)?;
        self.display.write_str("Light:").map_err(Error::Display)?;
        Ok(())
    }

    /// Runs one sample/display/LED cycle
    ///
    /// Blocks for three refresh periods. On an ADC error nothing is shown and
    /// the LEDs keep their state.
    pub fn step(&mut self) -> Result<Reading, Error<D::Error>> {
        self.adc.sample(&mut self.buffer)?;
        let [potentiometer, light_sensor] = self.buffer;

        self.show_voltage(0, potentiometer)?;
        self.delay.delay_ms(self.config.refresh_ms);

        self.show_voltage(1, light_sensor)?;
        self.delay.delay_ms(self.config.refresh_ms);

        let level = scale::scale_to_range(
            light_sensor,
            self.config.input_min,
            self.config.input_max,
            self.config.output_min,
            self.config.output_max,
        );
        self.display.set_cursor(LEVEL_COL, 1).map_err(Error::Display)?;
        self.display
            .display_fmt(format_args!("{:>3}", level))
            .map_err(Error::Display)?;

        self.leds.output(if level >= self.config.threshold {
            self.config.leds_on
        } else {
            self.config.leds_off
        });
        self.delay.delay_ms(self.config.refresh_ms);

        Ok(Reading {
            potentiometer,
            light_sensor,
            level,
        })
    }

    fn show_voltage(&mut self, row: u8, voltage: f32) -> Result<(), Error<D::Error>> {
        self.display
            .set_cursor(VALUE_COL, row)
            .map_err(Error::Display)?;
        self.display.display_float(voltage).map_err(Error::Display)
    }

    pub fn free(self) -> (Adc<S>, D, L, T) {
        (self.adc, self.display, self.leds, self.delay)
    }
}
