//! Client session
//!
//! One `Session` per live connection, owned by the event loop. It holds the
//! socket, the client's current directory and its own input accumulator;
//! nothing in it is shared with other sessions.

use std::io;
use std::net::SocketAddr;
use std::task::{Context, Poll};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::client::framing::{Frame, LineBuffer};
use crate::storage::SandboxPath;

/// Result of draining a readable socket
#[derive(Debug)]
pub enum DrainOutcome {
    /// Connection still open; everything currently available was read
    Open,
    /// Peer closed the connection
    Closed,
    Failed(io::Error),
}

pub struct Session {
    stream: TcpStream,
    addr: SocketAddr,
    cwd: SandboxPath,
    input: LineBuffer,
}

impl Session {
    /// Creates a session rooted at the sandbox root
    pub fn new(stream: TcpStream, addr: SocketAddr, max_line_length: usize) -> Self {
        Self {
            stream,
            addr,
            cwd: SandboxPath::root(),
            input: LineBuffer::new(max_line_length),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn cwd(&self) -> &SandboxPath {
        &self.cwd
    }

    pub fn cwd_mut(&mut self) -> &mut SandboxPath {
        &mut self.cwd
    }

    pub fn poll_read_ready(&self, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.stream.poll_read_ready(cx)
    }

    /// Reads everything the socket has right now without blocking.
    ///
    /// `scratch` only carries bytes for the duration of one read; they are
    /// copied into this session's accumulator immediately. Draining stops
    /// early once the accumulator is full so the buffered lines can be
    /// handled first; the socket stays readable for the next cycle.
    pub fn drain(&mut self, scratch: &mut [u8]) -> DrainOutcome {
        loop {
            match self.stream.try_read(scratch) {
                Ok(0) => return DrainOutcome::Closed,
                Ok(n) => {
                    self.input.extend(&scratch[..n]);
                    if self.input.is_full() {
                        return DrainOutcome::Open;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return DrainOutcome::Open,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return DrainOutcome::Failed(e),
            }
        }
    }

    pub fn next_frame(&mut self) -> Option<Frame> {
        self.input.next_frame()
    }

    /// Writes a full response; the loop waits for it before moving on
    pub async fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes).await?;
        self.stream.flush().await
    }
}
