//! System control: peripheral clock gating and clock frequencies

use crate::pac::SYSCTL;
use crate::time::{Hertz, U32Ext};

mod enable;

/// Precision internal oscillator, the system clock out of reset
pub const PIOSC_FREQ: u32 = 16_000_000;

/// Extension trait that constrains the `SYSCTL` peripheral
pub trait SysctlExt {
    /// Constrains the `SYSCTL` peripheral so it plays nicely with the other abstractions
    fn constrain(self) -> Sysctl;
}

impl SysctlExt for SYSCTL {
    fn constrain(self) -> Sysctl {
        Sysctl {
            rb: self,
            clocks: Clocks {
                sys_clk: PIOSC_FREQ.hz(),
            },
        }
    }
}

/// Constrained SYSCTL peripheral
pub struct Sysctl {
    pub clocks: Clocks,
    pub(crate) rb: SYSCTL,
}

impl Sysctl {
    /// Releases the `SYSCTL` peripheral
    pub fn free(self) -> SYSCTL {
        self.rb
    }
}

/// Frozen clock frequencies
///
/// The existence of this value indicates that the clock configuration can no longer be changed
#[derive(Clone, Copy, Debug)]
pub struct Clocks {
    sys_clk: Hertz,
}

impl Clocks {
    /// Returns the system (core) frequency
    pub fn sys_clk(&self) -> Hertz {
        self.sys_clk
    }
}

/// Peripheral clock gating
pub trait Enable {
    /// Gates the peripheral clock on
    fn enable(sysctl: &mut Sysctl);

    /// Gates the peripheral clock on without holding the `Sysctl`
    ///
    /// # Safety
    ///
    /// Performs a read-modify-write of a run mode clock gating register that
    /// is shared with other peripherals. The caller must make sure no other
    /// context modifies that register at the same time.
    unsafe fn enable_unchecked();
}
