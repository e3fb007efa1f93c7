use core::fmt::{Display, Formatter};

/// The status flag a bounded busy-wait gave up on.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitFlag {
    /// SWRST never read back as cleared after a software reset
    ResetClear,
    /// INTFLAG.DRE never asserted before a byte write
    DataRegisterEmpty,
    /// INTFLAG.TXC never asserted after the last byte of a frame
    TransmitComplete,
}

/// Driver error type
///
/// Invalid characters and out-of-range addresses are not errors: the
/// former are dropped silently, the latter masked into range, matching
/// the panel-side behaviour callers rely on. The only runtime failure is
/// a peripheral that stops answering while a wait loop is bounded; with
/// an unbounded poll limit no operation ever returns an error.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A status flag did not assert within the configured poll limit
    PeripheralNotResponding(WaitFlag),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::PeripheralNotResponding(flag) => {
                write!(f, "peripheral not responding, gave up waiting on {:?}", flag)
            }
        }
    }
}
