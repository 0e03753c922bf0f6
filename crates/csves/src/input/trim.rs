//! Leading-space trimming ahead of the CSV reader.
//!
//! Blanks at the start of each field are dropped before parsing, so a quoted
//! value written after `", "` is still read as one quoted field. Bytes inside
//! quotes are passed through untouched.

use std::io::{self, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteEnd,
}

/// Wraps a reader and strips blanks at the start of every field.
pub(crate) struct LeadingSpaceTrim<R> {
    inner: R,
    delimiter: u8,
    state: State,
    buf: Vec<u8>,
}

impl<R: Read> LeadingSpaceTrim<R> {
    pub(crate) fn new(inner: R, delimiter: u8) -> Self {
        Self {
            inner,
            delimiter,
            state: State::FieldStart,
            buf: Vec::new(),
        }
    }

    fn keep(&mut self, b: u8) -> bool {
        match self.state {
            State::Quoted => {
                if b == b'"' {
                    self.state = State::QuoteEnd;
                }
                true
            }
            // Escaped quote inside a quoted field.
            State::QuoteEnd if b == b'"' => {
                self.state = State::Quoted;
                true
            }
            State::FieldStart if b != self.delimiter && is_blank(b) => false,
            State::FieldStart if b == b'"' => {
                self.state = State::Quoted;
                true
            }
            _ => {
                self.state = if b == self.delimiter || b == b'\n' || b == b'\r' {
                    State::FieldStart
                } else {
                    State::Unquoted
                };
                true
            }
        }
    }
}

impl<R: Read> Read for LeadingSpaceTrim<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }

        let mut buf = std::mem::take(&mut self.buf);
        buf.resize(out.len(), 0);

        let result = loop {
            let n = match self.inner.read(&mut buf) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => break Err(e),
            };
            if n == 0 {
                break Ok(0);
            }

            let mut written = 0;
            for &b in &buf[..n] {
                if self.keep(b) {
                    out[written] = b;
                    written += 1;
                }
            }
            if written > 0 {
                break Ok(written);
            }
        };

        self.buf = buf;
        result
    }
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\x0b' | b'\x0c')
}
