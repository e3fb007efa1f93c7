//! A driver for SSD1306-class page-addressed OLED panels wired to a
//! SAMD21 SERCOM in SPI host mode.
//!
//! Unlike drivers built on the `embedded-hal` bus traits, this crate talks
//! to the SERCOM and PORT peripherals directly through a small register
//! capability, [`RegisterBus`](regs::RegisterBus). That keeps the code a
//! faithful match for bare-metal bring-up firmware while still leaving a
//! seam wide enough to drive the whole protocol from a simulated register
//! file in unit tests.
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is routed to SERCOM pad 3 but never read by the panel protocol
//! - SPI_MODE_0 is used (CPHA = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//! - SCK is divided down from the 48 MHz core clock to stay below the
//!   panel's 10 MHz maximum input clock
//!
//! ### Other....
//!
//! - The panel is page addressed: 8 pages of 128 columns, one byte per
//!   column. The column pointer auto-increments in hardware; the page
//!   pointer does not.
//!
//! # Examples
//!
//! ```ignore
//! use ssd1306_sercom::prelude::*;
//!
//! // Mmio dereferences the real SAMD21 register map.
//! let mut oled = Ssd1306::new(Mmio, None)?;
//!
//! oled.set_cursor(0, 0)?;
//! oled.put_string(b"Hello")?;
//! ```
#![cfg_attr(not(test), no_std)]

mod traits;

pub mod error;

pub mod font;

pub mod regs;

mod pins;

/// Interface for the physical connection between display and the controlling device
mod interface;

pub mod ssd1306;

#[cfg(test)]
pub(crate) mod sim;

pub mod prelude {
    pub use crate::error::Error;
    pub use crate::regs::{Mmio, RegisterBus};
    pub use crate::ssd1306::Ssd1306;
    pub use crate::SPI_MODE;
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};
