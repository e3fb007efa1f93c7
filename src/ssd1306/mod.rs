//! Driver for an SSD1306 128x64 OLED panel in page addressing mode.
//!
//! The panel is organised as 8 pages of 128 columns, one byte per
//! column. The controller keeps the write pointer: the column
//! auto-increments after every data byte and wraps within the configured
//! column window, the page never advances on its own. The driver holds
//! no mirror of that pointer; [`set_cursor`](Ssd1306::set_cursor) is the
//! only way to establish a known position, and nothing about the pointer
//! survives a re-init.
//!
//! Construction brings the panel all the way up: pin mux, SPI host
//! configuration, panel reset release, the full power-up command
//! sequence, a whole-panel clear, page addressing mode and display on.
//! Every method on the constructed driver is therefore issued against a
//! ready panel.

use crate::error::Error;
use crate::font;
use crate::interface::DisplayInterface;
use crate::pins;
use crate::regs::RegisterBus;

pub(crate) mod command;

use self::command::{Command, MEMORY_MODE_PAGE};

/// Panel width in columns
const WIDTH: u8 = 128;
/// Number of 8-row pages
const PAGES: u8 = 8;

/// Spin iterations after releasing the panel reset line
const RESET_SETTLE_SPINS: u32 = 10_000;

/// SSD1306 driver
pub struct Ssd1306<B> {
    interface: DisplayInterface<B>,
}

impl<B: RegisterBus> Ssd1306<B> {
    /// Create the driver and bring the panel up.
    ///
    /// `poll_limit` bounds every status-flag busy-wait; `None` spins
    /// forever, which matches the bare-metal behaviour of a board where
    /// the SERCOM is known to be clocked.
    pub fn new(bus: B, poll_limit: Option<u32>) -> Result<Self, Error> {
        let mut oled = Ssd1306 {
            interface: DisplayInterface::new(bus, poll_limit),
        };
        oled.init()?;
        Ok(oled)
    }

    /// Run the full bring-up sequence.
    ///
    /// Already called by [`new`](Ssd1306::new); calling it again re-runs
    /// the power-up sequence from scratch, which also discards whatever
    /// write pointer the controller held.
    pub fn init(&mut self) -> Result<(), Error> {
        pins::configure(self.interface.bus());
        self.interface.configure()?;

        // Release the panel reset and give the charge pump rail time to
        // settle before the first command.
        pins::set(self.interface.bus(), pins::PIN_RST);
        for _ in 0..RESET_SETTLE_SPINS {
            core::hint::spin_loop();
        }

        // Power-up sequence. Order is load-bearing: charge pump and
        // contrast must be programmed before display-on or the panel
        // shows undefined output.
        self.interface.cmd(Command::DisplayOff, &[])?;
        self.interface.cmd(Command::SetClockDivide, &[0x80])?;
        self.interface.cmd(Command::SetMultiplexRatio, &[0x3F])?;
        self.interface.cmd(Command::SetDisplayOffset, &[0x00])?;
        self.interface.cmd(Command::SetStartLine, &[])?;
        self.interface.cmd(Command::ChargePump, &[0x14])?;
        self.interface.cmd(Command::SegmentRemap, &[])?;
        self.interface.cmd(Command::ComScanDirection, &[])?;
        self.interface.cmd(Command::ComPinConfig, &[0x12])?;
        self.interface.cmd(Command::SetContrast, &[0xCF])?;
        self.interface.cmd(Command::SetPrecharge, &[0xF1])?;
        self.interface.cmd(Command::SetVcomhDeselect, &[0x40])?;
        self.interface.cmd(Command::EntireDisplayResume, &[])?;

        self.clear(0xFF)?;
        self.interface
            .cmd(Command::SetMemoryMode, &[MEMORY_MODE_PAGE])?;
        self.interface.cmd(Command::DisplayOn, &[])
    }

    /// Get the width of the panel
    pub fn width(&self) -> u8 {
        WIDTH
    }

    /// Get the number of pages of the panel
    pub fn pages(&self) -> u8 {
        PAGES
    }

    /// Clear the pages selected by `page_mask`, bit 0 through bit 7 in
    /// ascending order. `0xFF` clears the whole panel; unselected pages
    /// are untouched.
    pub fn clear(&mut self, page_mask: u8) -> Result<(), Error> {
        for page in 0..PAGES {
            if page_mask & (1 << page) == 0 {
                continue;
            }
            self.set_cursor(0, page)?;
            self.interface.data_x_times(0x00, u32::from(WIDTH))?;
        }
        Ok(())
    }

    /// Set the controller's write pointer.
    ///
    /// `x` is in 8-column glyph cells (0..=15), `page` in 0..=7;
    /// out-of-range values are masked into range. Page addressing mode
    /// is re-sent every call so the pointer lands where expected even if
    /// another bus user changed the addressing mode.
    pub fn set_cursor(&mut self, x: u8, page: u8) -> Result<(), Error> {
        let x = x & 0x0F;
        let page = page & 0x07;

        self.interface
            .cmd(Command::SetMemoryMode, &[MEMORY_MODE_PAGE])?;
        self.interface
            .cmd_raw(&[Command::PageStart as u8 + page])?;
        self.interface
            .cmd(Command::SetColumnRange, &[x << 3, WIDTH - 1])
    }

    /// Draw one character at the current write pointer.
    ///
    /// Codes with the high bit set, and codes below the printable range,
    /// are dropped silently with no bus activity. The controller's
    /// column auto-increment leaves the pointer 8 columns further right,
    /// so consecutive calls render adjacent cells.
    pub fn put_char(&mut self, c: u8) -> Result<(), Error> {
        match font::lookup(c) {
            Some(glyph) => self.interface.data(glyph),
            None => Ok(()),
        }
    }

    /// Draw a byte string at the current write pointer.
    ///
    /// No line management: past column 127 the controller wraps to
    /// column 0 of the *same* page, so the caller re-positions with
    /// [`set_cursor`](Ssd1306::set_cursor) when crossing a line boundary.
    pub fn put_string(&mut self, s: &[u8]) -> Result<(), Error> {
        for &c in s {
            self.put_char(c)?;
        }
        Ok(())
    }

    /// Draw a raw test pattern at the current write pointer.
    ///
    /// Pattern 0 is a full-page column ramp; unknown pattern ids do
    /// nothing.
    pub fn test(&mut self, pattern: u8) -> Result<(), Error> {
        if pattern != 0 {
            return Ok(());
        }
        let mut ramp = [0u8; WIDTH as usize];
        for (i, byte) in ramp.iter_mut().enumerate() {
            *byte = i as u8;
        }
        self.interface.data(&ramp)
    }
}
