//! Character display

use core::fmt::{self, Write as _};

use heapless::String;

/// Width of the EduBase 16x2 character display
pub const COLUMNS: usize = 16;

/// Shown in place of text that doesn't fit on a line
pub const OVERFLOW: &str = "----";

/// A cursor-addressed character display
pub trait CharacterDisplay {
    type Error;

    /// Moves the cursor to `col` on `row`, both counted from zero
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Writes `s` at the cursor and advances it
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error>;

    /// Blanks the display and homes the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Renders formatted text at the cursor
    ///
    /// Text longer than a display line is replaced by [`OVERFLOW`].
    fn display_fmt(&mut self, args: fmt::Arguments) -> Result<(), Self::Error> {
        let mut line: String<COLUMNS> = String::new();
        if line.write_fmt(args).is_err() {
            return self.write_str(OVERFLOW);
        }
        self.write_str(&line)
    }

    fn display_integer(&mut self, value: i32) -> Result<(), Self::Error> {
        self.display_fmt(format_args!("{}", value))
    }

    /// Renders `value` with three decimals
    fn display_float(&mut self, value: f32) -> Result<(), Self::Error> {
        self.display_fmt(format_args!("{:.3}", value))
    }
}
