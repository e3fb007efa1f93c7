//! The serial transport between the driver and the panel.
//!
//! The SERCOM is run as an SPI host in mode 0, MSB first. A frame is a
//! chip-select-bounded byte sequence: the Data/Command line is set first,
//! CS is pulled low, bytes are clocked out one by one, and only after the
//! transmit-complete flag is observed is CS released again. Releasing
//! earlier would truncate the last byte still in the shift register.

use bit_field::BitField;

use crate::error::{Error, WaitFlag};
use crate::pins;
use crate::regs::{sercom, RegisterBus, GCLK_ADDR, PM_ADDR, SERCOM0_ADDR};
use crate::traits::Command;

/// Core clock feeding GCLK0 and therefore the SERCOM
const GCLK0_HZ: u32 = 48_000_000;
/// Maximum serial input clock the panel accepts
const SCK_MAX_HZ: u32 = 10_000_000;

/// State of the Data/Command line for one whole frame.
///
/// The line is set before chip select is asserted and must not change
/// mid-frame; it is level-sampled by the controller, not part of the
/// byte stream.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum TransferMode {
    /// Following bytes are opcodes and their parameters
    Command,
    /// Following bytes are framebuffer contents
    Data,
}

/// The connection interface to the panel: SERCOM0 plus the CS and D/C
/// PORT lines, all reached through one register capability.
pub(crate) struct DisplayInterface<B> {
    bus: B,
    /// Maximum status-flag polls before giving up; `None` spins forever
    poll_limit: Option<u32>,
}

impl<B: RegisterBus> DisplayInterface<B> {
    pub(crate) fn new(bus: B, poll_limit: Option<u32>) -> Self {
        DisplayInterface { bus, poll_limit }
    }

    pub(crate) fn bus(&self) -> &B {
        &self.bus
    }

    /// Bring SERCOM0 up as an SPI host.
    ///
    /// Clocks the peripheral, software-resets it, programs mode 0 with
    /// MISO on pad 3, enables the receiver, sets the baud divisor and
    /// finally enables the peripheral. Call once at startup; the SERCOM
    /// must be re-reset before this is safe to run again.
    pub(crate) fn configure(&mut self) -> Result<(), Error> {
        // Enable the SERCOM0 APBC clock and feed it from GCLK generator 1
        self.bus.set_bits(PM_ADDR + 0x20, 1 << 2);
        self.bus
            .write16(GCLK_ADDR + 0x02, (1 << 14) | (1 << 8) | 0x14);

        // Software reset, then wait for the peripheral to acknowledge
        self.bus.write32(SERCOM0_ADDR + sercom::CTRLA, 0x01);
        self.wait_for(WaitFlag::ResetClear, |bus| {
            bus.read32(SERCOM0_ADDR + sercom::CTRLA) & 0x01 == 0
        })?;

        let mut ctrla: u32 = 0;
        ctrla.set_bits(2..5, 0x3); // MODE: SPI host
        ctrla.set_bits(20..22, 0x3); // DIPO: MISO on pad 3
        ctrla.set_bit(28, false); // CPHA = 0
        ctrla.set_bit(29, false); // CPOL = 0
        ctrla.set_bit(30, false); // DORD: MSB first
        self.bus.write32(SERCOM0_ADDR + sercom::CTRLA, ctrla);

        // RXEN
        self.bus.write32(SERCOM0_ADDR + sercom::CTRLB, 1 << 17);
        self.bus
            .write8(SERCOM0_ADDR + sercom::BAUD, baud_divisor(GCLK0_HZ, SCK_MAX_HZ));

        // ENABLE
        self.bus.set_bits(SERCOM0_ADDR + sercom::CTRLA, 1 << 1);
        Ok(())
    }

    /// Set the Data/Command line. Must precede `select(true)`.
    pub(crate) fn set_mode(&mut self, mode: TransferMode) {
        match mode {
            TransferMode::Command => pins::clear(&self.bus, pins::PIN_DC),
            TransferMode::Data => pins::set(&self.bus, pins::PIN_DC),
        }
    }

    /// Drive the chip select: `true` asserts (line low), `false` releases.
    pub(crate) fn select(&mut self, active: bool) {
        if active {
            pins::clear(&self.bus, pins::PIN_CS);
        } else {
            pins::set(&self.bus, pins::PIN_CS);
        }
    }

    /// Queue one byte, blocking until the data register is free.
    ///
    /// Bytes are clocked out strictly in call order.
    pub(crate) fn send_byte(&mut self, value: u8) -> Result<(), Error> {
        self.wait_for(WaitFlag::DataRegisterEmpty, |bus| {
            bus.read8(SERCOM0_ADDR + sercom::INTFLAG) & sercom::INTFLAG_DRE != 0
        })?;
        self.bus
            .write16(SERCOM0_ADDR + sercom::DATA, u16::from(value));
        Ok(())
    }

    /// Block until every queued byte has left the shift register.
    ///
    /// Required before releasing chip select.
    pub(crate) fn wait_idle(&mut self) -> Result<(), Error> {
        self.wait_for(WaitFlag::TransmitComplete, |bus| {
            bus.read8(SERCOM0_ADDR + sercom::INTFLAG) & sercom::INTFLAG_TXC != 0
        })
    }

    /// Send one command frame: the opcode followed by its parameter bytes.
    pub(crate) fn cmd<T: Command>(&mut self, command: T, params: &[u8]) -> Result<(), Error> {
        self.set_mode(TransferMode::Command);
        self.with_cs(|iface| {
            iface.send_byte(command.address())?;
            for byte in params.iter().copied() {
                iface.send_byte(byte)?;
            }
            Ok(())
        })
    }

    /// Send one command frame from raw opcode bytes.
    ///
    /// For opcodes carrying an argument in their low bits, like the
    /// page-start select.
    pub(crate) fn cmd_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.set_mode(TransferMode::Command);
        self.with_cs(|iface| {
            for byte in bytes.iter().copied() {
                iface.send_byte(byte)?;
            }
            Ok(())
        })
    }

    /// Send one data frame.
    pub(crate) fn data(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.set_mode(TransferMode::Data);
        self.with_cs(|iface| {
            for byte in bytes.iter().copied() {
                iface.send_byte(byte)?;
            }
            Ok(())
        })
    }

    /// Send one data frame repeating the same byte.
    pub(crate) fn data_x_times(&mut self, value: u8, repetitions: u32) -> Result<(), Error> {
        self.set_mode(TransferMode::Data);
        self.with_cs(|iface| {
            for _ in 0..repetitions {
                iface.send_byte(value)?;
            }
            Ok(())
        })
    }

    // Frame helper: assert CS, run the transfer, drain the shift
    // register, release CS. Frames never nest.
    fn with_cs<F>(&mut self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        self.select(true);
        let mut result = f(self);
        if result.is_ok() {
            result = self.wait_idle();
        }
        self.select(false);
        result
    }

    fn wait_for<F>(&self, flag: WaitFlag, mut ready: F) -> Result<(), Error>
    where
        F: FnMut(&B) -> bool,
    {
        match self.poll_limit {
            None => {
                while !ready(&self.bus) {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            Some(limit) => {
                for _ in 0..limit {
                    if ready(&self.bus) {
                        return Ok(());
                    }
                    core::hint::spin_loop();
                }
                Err(Error::PeripheralNotResponding(flag))
            }
        }
    }
}

/// Smallest baud divisor keeping SCK at or below `max_sck_hz`.
///
/// SERCOM synchronous mode: SCK = ref / (2 * (BAUD + 1)).
pub(crate) fn baud_divisor(ref_hz: u32, max_sck_hz: u32) -> u8 {
    let div = ref_hz.div_ceil(2 * max_sck_hz);
    (div.saturating_sub(1)).min(255) as u8
}
