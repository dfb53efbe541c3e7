use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised at the hardware seams of the clock core.
///
/// The state engine itself never fails; these only come from constructing
/// values out of range or from the peripherals around it.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[display("clock field out of range")]
    FieldOutOfRange,

    #[display("I/O board byte exchange failed")]
    Transfer,

    #[display("display strobe failed")]
    Strobe,

    #[display("message sink rejected a command")]
    Message,

    #[display("message does not fit the line buffer")]
    MessageFormat,
}
