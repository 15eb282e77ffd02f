//! Shows the EduBase potentiometer and light sensor readings and lights the
//! LEDs when it's bright
//!
//! The display is mirrored to the debugger console over semihosting.

#![no_main]
#![no_std]

extern crate panic_semihosting;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use edubase_adc::{
    adc::{self, Adc, Sequence, Sequencer0},
    app::{self, Monitor},
    display::{CharacterDisplay, COLUMNS},
    pac,
    prelude::*,
};
use heapless::String;

/// Semihosting stand-in for the 16x2 LCD
///
/// Keeps a copy of both lines and prints the line under the cursor whenever
/// it changes.
struct Console {
    lines: [[u8; COLUMNS]; 2],
    col: usize,
    row: usize,
}

impl Console {
    fn new() -> Self {
        Console {
            lines: [[b' '; COLUMNS]; 2],
            col: 0,
            row: 0,
        }
    }

    fn print_line(&self) -> Result<(), ()> {
        let mut line: String<COLUMNS> = String::new();
        for &c in self.lines[self.row].iter() {
            line.push(c as char).map_err(|_| ())?;
        }
        hprintln!("{}|{}|", self.row, line)
    }
}

impl CharacterDisplay for Console {
    type Error = ();

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), ()> {
        self.col = usize::from(col).min(COLUMNS);
        self.row = usize::from(row).min(1);
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<(), ()> {
        for c in s.bytes() {
            if self.col >= COLUMNS {
                break;
            }
            self.lines[self.row][self.col] = c;
            self.col += 1;
        }
        self.print_line()
    }

    fn clear(&mut self) -> Result<(), ()> {
        self.lines = [[b' '; COLUMNS]; 2];
        self.col = 0;
        self.row = 0;
        Ok(())
    }
}

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    let mut sysctl = dp.SYSCTL.constrain();
    let mut delay = cp.SYST.delay(sysctl.clocks);

    // PB0..PB3
    let leds = dp.GPIO_PORTB.leds(&mut sysctl);

    // Potentiometer on PE2, light sensor on PE1
    let sequencer = Sequencer0::new(dp.ADC0, dp.GPIO_PORTE);
    let adc = Adc::new(
        sequencer,
        Sequence::edubase(),
        adc::Config::default(),
        &mut delay,
    );

    let mut monitor = Monitor::new(adc, Console::new(), leds, delay, app::Config::default());
    monitor.show_banner().unwrap();

    loop {
        match monitor.step() {
            Ok(reading) => {
                hprintln!(
                    "pot {:.3} V, light {:.3} V, level {}",
                    reading.potentiometer,
                    reading.light_sensor,
                    reading.level
                )
                .ok();
            }
            Err(app::Error::Adc(adc::Error::Timeout)) => {
                hprintln!("ADC sequence timed out").ok();
            }
            Err(app::Error::Display(())) => {
                hprintln!("display update failed").ok();
            }
        }
    }
}
