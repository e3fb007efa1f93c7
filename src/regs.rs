//! Memory-mapped register access, abstracted behind a capability trait.
//!
//! Every peripheral touch in this crate goes through [`RegisterBus`] so
//! that the transport and the protocol engine can be exercised against a
//! simulated register file on the host. On the target, [`Mmio`] is the
//! zero-cost implementation that dereferences the real address map.

/// Capability for 8/16/32-bit access to memory-mapped registers.
///
/// Methods take `&self`: register I/O has interior-mutability semantics,
/// and the transport and protocol engine each hold their own handle to
/// the same bus.
pub trait RegisterBus {
    fn read8(&self, addr: u32) -> u8;
    fn read16(&self, addr: u32) -> u16;
    fn read32(&self, addr: u32) -> u32;

    fn write8(&self, addr: u32, value: u8);
    fn write16(&self, addr: u32, value: u16);
    fn write32(&self, addr: u32, value: u32);

    /// Read-modify-write helper to set bits in a 32-bit register.
    fn set_bits(&self, addr: u32, mask: u32) {
        self.write32(addr, self.read32(addr) | mask);
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &T {
    fn read8(&self, addr: u32) -> u8 {
        (**self).read8(addr)
    }
    fn read16(&self, addr: u32) -> u16 {
        (**self).read16(addr)
    }
    fn read32(&self, addr: u32) -> u32 {
        (**self).read32(addr)
    }
    fn write8(&self, addr: u32, value: u8) {
        (**self).write8(addr, value)
    }
    fn write16(&self, addr: u32, value: u16) {
        (**self).write16(addr, value)
    }
    fn write32(&self, addr: u32, value: u32) {
        (**self).write32(addr, value)
    }
    fn set_bits(&self, addr: u32, mask: u32) {
        (**self).set_bits(addr, mask)
    }
}

/// Direct volatile access to the SAMD21 register map.
///
/// Constructing this is a claim that the addresses in this module are
/// live peripherals on the running core, so it is only meaningful on the
/// target. All accesses are volatile and never reordered or elided.
#[derive(Copy, Clone, Debug, Default)]
pub struct Mmio;

impl RegisterBus for Mmio {
    fn read8(&self, addr: u32) -> u8 {
        unsafe { core::ptr::read_volatile(addr as *const u8) }
    }
    fn read16(&self, addr: u32) -> u16 {
        unsafe { core::ptr::read_volatile(addr as *const u16) }
    }
    fn read32(&self, addr: u32) -> u32 {
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }
    fn write8(&self, addr: u32, value: u8) {
        unsafe { core::ptr::write_volatile(addr as *mut u8, value) }
    }
    fn write16(&self, addr: u32, value: u16) {
        unsafe { core::ptr::write_volatile(addr as *mut u16, value) }
    }
    fn write32(&self, addr: u32, value: u32) {
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}

/// Power Manager
pub const PM_ADDR: u32 = 0x4000_0400;
/// Generic Clock Controller
pub const GCLK_ADDR: u32 = 0x4000_0C00;
/// IO pin controller
pub const PORT_ADDR: u32 = 0x4100_4400;
/// SERCOM0, the instance wired to the display
pub const SERCOM0_ADDR: u32 = 0x4200_0800;

/// PORT register offsets (group 0)
pub(crate) mod port {
    /// Data Direction Set
    pub const DIRSET: u32 = 0x08;
    /// Data Output Value Clear
    pub const OUTCLR: u32 = 0x14;
    /// Data Output Value Set
    pub const OUTSET: u32 = 0x18;
    /// Pin Configuration, one byte per pin
    pub const PINCFG0: u32 = 0x40;
    /// Peripheral Multiplexing, one byte per pin pair
    pub const PMUX0: u32 = 0x30;
}

/// SERCOM SPI register offsets
pub(crate) mod sercom {
    /// Control A (SWRST, MODE, CPOL/CPHA, DIPO, DORD, ENABLE)
    pub const CTRLA: u32 = 0x00;
    /// Control B (RXEN)
    pub const CTRLB: u32 = 0x04;
    /// Baud rate, 8-bit
    pub const BAUD: u32 = 0x0C;
    /// Interrupt Flag Status, 8-bit
    pub const INTFLAG: u32 = 0x18;
    /// Data, written 16-bit wide
    pub const DATA: u32 = 0x28;

    /// INTFLAG: Data Register Empty
    pub const INTFLAG_DRE: u8 = 1 << 0;
    /// INTFLAG: Transmit Complete
    pub const INTFLAG_TXC: u8 = 1 << 1;
}
