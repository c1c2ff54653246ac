//! Command framing
//!
//! Each session accumulates raw bytes here and pulls complete lines out.
//! Lines end at `\n`; a trailing `\r` is dropped. A partial line stays
//! buffered across reads.

/// A unit of input ready for dispatch
#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    Line(String),
    /// A line exceeded the length limit and was discarded
    TooLong,
}

/// Per-session input accumulator
#[derive(Debug)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    max_line_length: usize,
    /// Set after an overlong partial line was dropped; input is skipped
    /// through the next newline.
    discarding: bool,
}

impl LineBuffer {
    pub fn new(max_line_length: usize) -> Self {
        Self {
            bytes: Vec::new(),
            max_line_length,
            discarding: false,
        }
    }

    pub fn extend(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True once the buffer holds more than one maximal line
    pub fn is_full(&self) -> bool {
        self.bytes.len() > self.max_line_length
    }

    /// Takes the next non-blank line out of the buffer
    pub fn next_frame(&mut self) -> Option<Frame> {
        loop {
            let Some(pos) = self.bytes.iter().position(|&b| b == b'\n') else {
                if self.discarding {
                    self.bytes.clear();
                    return None;
                }
                if self.bytes.len() > self.max_line_length {
                    self.bytes.clear();
                    self.discarding = true;
                    return Some(Frame::TooLong);
                }
                return None;
            };

            let mut line: Vec<u8> = self.bytes.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            if self.discarding {
                self.discarding = false;
                continue;
            }

            if line.len() > self.max_line_length {
                return Some(Frame::TooLong);
            }

            let text = String::from_utf8_lossy(&line);
            if text.trim().is_empty() {
                continue;
            }
            return Some(Frame::Line(text.into_owned()));
        }
    }
}
