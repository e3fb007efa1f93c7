//! Simulated register file for host-side tests.
//!
//! Backs the [`RegisterBus`](crate::regs::RegisterBus) capability with a
//! plain map of register values, records every access in order, and
//! models just enough SERCOM behaviour for the driver's busy-waits to
//! terminate: SWRST self-clears on write and the DRE/TXC flags read as
//! asserted unless the file is switched into a "stuck" state to fake an
//! unresponsive peripheral.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::interface::TransferMode;
use crate::pins;
use crate::regs::{port, sercom, RegisterBus, PORT_ADDR, SERCOM0_ADDR};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Access {
    Read8(u32),
    Read16(u32),
    Read32(u32),
    Write8(u32, u8),
    Write16(u32, u16),
    Write32(u32, u32),
}

/// One reconstructed chip-select-bounded transfer.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Frame {
    pub mode: TransferMode,
    pub bytes: Vec<u8>,
}

pub(crate) struct SimRegs {
    store: RefCell<HashMap<u32, u32>>,
    trace: RefCell<Vec<Access>>,
    stuck: Cell<bool>,
}

impl SimRegs {
    pub(crate) fn new() -> Self {
        SimRegs {
            store: RefCell::new(HashMap::new()),
            trace: RefCell::new(Vec::new()),
            stuck: Cell::new(false),
        }
    }

    /// When stuck, no status flag ever asserts and SWRST never clears.
    pub(crate) fn set_stuck(&self, stuck: bool) {
        self.stuck.set(stuck);
    }

    pub(crate) fn trace(&self) -> Vec<Access> {
        self.trace.borrow().clone()
    }

    pub(crate) fn clear_trace(&self) {
        self.trace.borrow_mut().clear();
    }

    pub(crate) fn writes(&self) -> Vec<Access> {
        self.trace
            .borrow()
            .iter()
            .copied()
            .filter(|acc| {
                matches!(
                    acc,
                    Access::Write8(..) | Access::Write16(..) | Access::Write32(..)
                )
            })
            .collect()
    }

    /// Reconstruct the frames the driver produced, asserting the framing
    /// discipline along the way: the mode line is set before chip select
    /// is asserted and never changes mid-frame, frames never nest, and a
    /// transmit-complete poll is observed between the last byte and the
    /// chip-select release.
    pub(crate) fn frames(&self) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut mode: Option<TransferMode> = None;
        let mut cs_high = true;
        let mut open: Option<Vec<u8>> = None;
        let mut open_mode = TransferMode::Command;
        let mut polled_since_byte = true;

        for acc in self.trace.borrow().iter() {
            match *acc {
                Access::Write32(addr, mask) if addr == PORT_ADDR + port::OUTCLR => {
                    if mask == 1 << pins::PIN_DC {
                        assert!(open.is_none(), "mode line changed mid-frame");
                        mode = Some(TransferMode::Command);
                    } else if mask == 1 << pins::PIN_CS && cs_high {
                        assert!(open.is_none(), "nested chip-select assertion");
                        cs_high = false;
                        open_mode = mode.expect("chip select asserted before mode line set");
                        open = Some(Vec::new());
                        polled_since_byte = true;
                    }
                }
                Access::Write32(addr, mask) if addr == PORT_ADDR + port::OUTSET => {
                    if mask == 1 << pins::PIN_DC {
                        assert!(open.is_none(), "mode line changed mid-frame");
                        mode = Some(TransferMode::Data);
                    } else if mask == 1 << pins::PIN_CS && !cs_high {
                        cs_high = true;
                        let bytes = open.take().expect("chip select released while idle");
                        assert!(
                            polled_since_byte,
                            "chip select released without waiting for transmit complete"
                        );
                        frames.push(Frame {
                            mode: open_mode,
                            bytes,
                        });
                    }
                }
                Access::Write16(addr, value) if addr == SERCOM0_ADDR + sercom::DATA => {
                    open.as_mut()
                        .expect("data register written outside a frame")
                        .push(value as u8);
                    polled_since_byte = false;
                }
                Access::Read8(addr) if addr == SERCOM0_ADDR + sercom::INTFLAG => {
                    polled_since_byte = true;
                }
                _ => {}
            }
        }
        assert!(open.is_none(), "chip select still asserted at end of trace");
        frames
    }

    fn load(&self, addr: u32) -> u32 {
        *self.store.borrow().get(&addr).unwrap_or(&0)
    }

    fn record(&self, acc: Access) {
        self.trace.borrow_mut().push(acc);
    }
}

impl RegisterBus for SimRegs {
    fn read8(&self, addr: u32) -> u8 {
        self.record(Access::Read8(addr));
        if addr == SERCOM0_ADDR + sercom::INTFLAG {
            return if self.stuck.get() {
                0
            } else {
                sercom::INTFLAG_DRE | sercom::INTFLAG_TXC
            };
        }
        self.load(addr) as u8
    }

    fn read16(&self, addr: u32) -> u16 {
        self.record(Access::Read16(addr));
        self.load(addr) as u16
    }

    fn read32(&self, addr: u32) -> u32 {
        self.record(Access::Read32(addr));
        if addr == SERCOM0_ADDR + sercom::CTRLA && self.stuck.get() {
            // software reset never acknowledged
            return self.load(addr) | 0x01;
        }
        self.load(addr)
    }

    fn write8(&self, addr: u32, value: u8) {
        self.record(Access::Write8(addr, value));
        self.store.borrow_mut().insert(addr, u32::from(value));
    }

    fn write16(&self, addr: u32, value: u16) {
        self.record(Access::Write16(addr, value));
        self.store.borrow_mut().insert(addr, u32::from(value));
    }

    fn write32(&self, addr: u32, value: u32) {
        self.record(Access::Write32(addr, value));
        let mut value = value;
        if addr == SERCOM0_ADDR + sercom::CTRLA {
            // SWRST self-clears once the reset has run
            value &= !0x01;
        }
        self.store.borrow_mut().insert(addr, value);
    }
}
