//! SPI commands for the SSD1306 page-addressed OLED controller

use crate::traits;

/// SSD1306 command opcodes
///
/// Should rarely (never?) be needed directly.
///
/// Parameter counts are fixed per opcode; the driver sends each opcode
/// and its parameters as a single command-mode frame.
#[allow(dead_code)]
#[derive(Copy, Clone)]
pub(crate) enum Command {
    /// Display off (sleep mode)
    DisplayOff = 0xAE,
    /// Display on, showing RAM contents
    DisplayOn = 0xAF,
    /// Clock divide ratio / oscillator frequency
    ///     1 Databyte:
    ///     A[3:0] divide ratio, A[7:4] oscillator frequency
    SetClockDivide = 0xD5,
    /// Multiplex ratio (duty cycle)
    ///     1 Databyte: A[5:0], ratio = A + 1
    SetMultiplexRatio = 0xA8,
    /// Vertical shift by COM
    ///     1 Databyte: A[5:0]
    SetDisplayOffset = 0xD3,
    /// Display start line, encoded in the opcode low bits (0x40..0x7F)
    SetStartLine = 0x40,
    /// Charge pump setting
    ///     1 Databyte: 0x14 enable, 0x10 disable
    ChargePump = 0x8D,
    /// Segment remap: column 0 mapped to SEG0
    SegmentRemap = 0xA0,
    /// COM output scan direction: normal (COM0 to COM[N-1])
    ComScanDirection = 0xC0,
    /// COM pins hardware configuration
    ///     1 Databyte
    ComPinConfig = 0xDA,
    /// Contrast control
    ///     1 Databyte: 0x00..0xFF
    SetContrast = 0x81,
    /// Pre-charge period
    ///     1 Databyte: A[3:0] phase 1, A[7:4] phase 2
    SetPrecharge = 0xD9,
    /// VCOMH deselect level
    ///     1 Databyte
    SetVcomhDeselect = 0xDB,
    /// Resume display from RAM contents (entire-display-on override off)
    EntireDisplayResume = 0xA4,
    /// Memory addressing mode
    ///     1 Databyte: 0x02 for page addressing
    SetMemoryMode = 0x20,
    /// Column start and end address (in page mode: low column window)
    ///     2 Databytes: start, end
    SetColumnRange = 0x21,
    /// Page start address, page encoded in the opcode low bits (0xB0..0xB7)
    PageStart = 0xB0,
}

impl traits::Command for Command {
    /// Returns the opcode of the command
    fn address(self) -> u8 {
        self as u8
    }
}

/// Page addressing mode parameter for [`Command::SetMemoryMode`]
pub(crate) const MEMORY_MODE_PAGE: u8 = 0x02;
