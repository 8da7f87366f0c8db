//! Destination contract for rendered listing lines

use std::io;

/// Receives rendered lines and owns the destination stream(s).
pub trait ListingSink {
    /// Append text to the current destination.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Called after every emitted line; the sink decides whether to start
    /// a new output part.
    fn roll_if_needed(&mut self) -> io::Result<()>;

    /// Flush and close after a complete traversal.
    fn finish(&mut self) -> io::Result<()>;

    /// Flush what was written and close after a truncated traversal.
    fn finish_abnormally(&mut self) -> io::Result<()>;
}

impl<S: ListingSink + ?Sized> ListingSink for &mut S {
    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }

    fn roll_if_needed(&mut self) -> io::Result<()> {
        (**self).roll_if_needed()
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }

    fn finish_abnormally(&mut self) -> io::Result<()> {
        (**self).finish_abnormally()
    }
}
