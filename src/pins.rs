//! Pin multiplexing for the display port.
//!
//! The panel occupies PA00..PA07: four plain GPIO control lines, the
//! chip select, and the three SERCOM0 SPI pads. Everything here is
//! one-time bring-up; after `configure` the only pins the driver keeps
//! toggling are D/C, CS and RST through PORT OUTSET/OUTCLR.

use crate::regs::{port, RegisterBus, PORT_ADDR};

/// PA00, external read strobe, unused but parked low
pub(crate) const PIN_ERD: u32 = 0;
/// PA01, read/write select, parked low (write-only wiring)
pub(crate) const PIN_RW: u32 = 1;
/// PA02, Data/Command mode line
pub(crate) const PIN_DC: u32 = 2;
/// PA03, panel reset, active low
pub(crate) const PIN_RST: u32 = 3;
/// PA06, chip select, active low
pub(crate) const PIN_CS: u32 = 6;

// PMUX function D hands PA04 (MOSI), PA05 (SCK) and PA07 (MISO) to SERCOM0.
const PMUX_FUNC_D: u8 = 0x03;

/// Drive a PORT pin high.
pub(crate) fn set<B: RegisterBus>(bus: &B, pin: u32) {
    bus.write32(PORT_ADDR + port::OUTSET, 1 << pin);
}

/// Drive a PORT pin low.
pub(crate) fn clear<B: RegisterBus>(bus: &B, pin: u32) {
    bus.write32(PORT_ADDR + port::OUTCLR, 1 << pin);
}

fn output<B: RegisterBus>(bus: &B, pin: u32, initial_high: bool) {
    if initial_high {
        set(bus, pin);
    } else {
        clear(bus, pin);
    }
    bus.write32(PORT_ADDR + port::DIRSET, 1 << pin);
    // PINCFG: normal strength, no pull, no pmux
    bus.write8(PORT_ADDR + port::PINCFG0 + pin, 0x00);
}

/// Configure the display port pins.
///
/// RST comes up held low so the panel stays in reset until the protocol
/// engine releases it, and CS comes up high (deselected).
pub(crate) fn configure<B: RegisterBus>(bus: &B) {
    output(bus, PIN_RST, false);
    output(bus, PIN_DC, false);
    output(bus, PIN_RW, false);
    output(bus, PIN_ERD, false);
    output(bus, PIN_CS, true);

    // Hand the SPI pads to SERCOM0, keep PA06 as plain GPIO for CS
    bus.write8(PORT_ADDR + port::PINCFG0 + 4, 0x01);
    bus.write8(PORT_ADDR + port::PINCFG0 + 5, 0x01);
    bus.write8(PORT_ADDR + port::PINCFG0 + 6, 0x00);
    bus.write8(PORT_ADDR + port::PINCFG0 + 7, 0x01);
    bus.write8(
        PORT_ADDR + port::PMUX0 + 2,
        (PMUX_FUNC_D << 4) | PMUX_FUNC_D,
    );
    bus.write8(
        PORT_ADDR + port::PMUX0 + 3,
        (PMUX_FUNC_D << 4) | PMUX_FUNC_D,
    );
}
