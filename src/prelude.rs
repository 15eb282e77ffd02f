pub use embedded_hal::prelude::*;

pub use crate::adc::Sequencer as _;
pub use crate::delay::DelayExt as _;
pub use crate::display::CharacterDisplay as _;
pub use crate::leds::LedBank as _;
pub use crate::leds::LedsExt as _;
pub use crate::sysctl::SysctlExt as _;
pub use crate::time::U32Ext as _;
