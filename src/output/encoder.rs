//! Writes the terminal result and derives the exit signal.

use super::result::{Emission, Output};
use crate::error::GuestError;
use std::io::Write;
use std::process::ExitCode;

/// Process exit polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    /// Exit status 0
    Success,
    /// Exit status 1
    Failure,
}

impl ExitSignal {
    /// The numeric process exit status.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }

    /// Returns true for [`ExitSignal::Success`].
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<ExitSignal> for ExitCode {
    fn from(signal: ExitSignal) -> Self {
        ExitCode::from(signal.code())
    }
}

/// Writes exactly one result to the output channel.
///
/// `emit` consumes the encoder, so a second result cannot be written.
#[derive(Debug)]
pub struct OutputEncoder<W> {
    writer: W,
}

impl<W: Write> OutputEncoder<W> {
    /// Wraps the output channel.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `emission` and returns the matching exit signal.
    ///
    /// A write failure yields [`ExitSignal::Failure`] since nothing more can
    /// be reported on the channel.
    pub fn emit(mut self, emission: &Emission) -> ExitSignal {
        let signal = if emission.is_success() {
            ExitSignal::Success
        } else {
            ExitSignal::Failure
        };

        let (signal, bytes) = match emission {
            Emission::Json(output) => match encode_json(output) {
                Ok(bytes) => (signal, bytes),
                Err(err) => {
                    tracing::error!(error = %err, "Failed to encode output");
                    match encode_json(&Output::failure(&err)) {
                        Ok(bytes) => (ExitSignal::Failure, bytes),
                        Err(_) => return ExitSignal::Failure,
                    }
                }
            },
            Emission::Bare(text) => (signal, text.as_bytes().to_vec()),
        };

        match self.write_all(&bytes) {
            Ok(()) => signal,
            Err(err) => {
                tracing::error!(error = %err, "Failed to write output");
                ExitSignal::Failure
            }
        }
    }

    /// Writes the failure object for `err`.
    pub fn emit_error(self, err: &GuestError) -> ExitSignal {
        self.emit(&Emission::Json(Output::failure(err)))
    }

    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()
    }
}

fn encode_json(output: &Output) -> Result<Vec<u8>, GuestError> {
    let mut bytes = serde_json::to_vec(output).map_err(|e| GuestError::encode(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn render(emission: &Emission) -> (ExitSignal, String) {
        let mut out = Vec::new();
        let signal = OutputEncoder::new(&mut out).emit(emission);
        (signal, String::from_utf8(out).unwrap())
    }

    #[test]
    fn json_success_ends_with_one_newline() {
        let (signal, text) = render(&Output::success("ok").into());
        assert_eq!(signal, ExitSignal::Success);
        assert_eq!(text, "{\"success\":true,\"message\":\"ok\"}\n");
    }

    #[test]
    fn failure_exits_nonzero() {
        let mut out = Vec::new();
        let signal = OutputEncoder::new(&mut out)
            .emit_error(&GuestError::validation("issue", "issue URL is required"));
        assert_eq!(signal.code(), 1);
        assert!(!signal.is_success());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"success\":false,\"error\":\"issue URL is required\"}\n"
        );
    }

    #[test]
    fn html_characters_are_not_escaped() {
        let output = Output::success("a & b <c>").with_url(Some("https://x/y?a=1&b=2".into()));
        let (_, text) = render(&output.into());
        assert!(text.contains("a & b <c>"));
        assert!(text.contains("https://x/y?a=1&b=2"));
        assert!(!text.contains("\\u0026"));
    }

    #[test]
    fn bare_emission_has_no_newline() {
        let (signal, text) = render(&Emission::Bare("https://md.example/doc".into()));
        assert!(signal.is_success());
        assert_eq!(text, "https://md.example/doc");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_failure() {
        let signal = OutputEncoder::new(BrokenPipe).emit(&Output::success("ok").into());
        assert_eq!(signal, ExitSignal::Failure);
    }
}
