//! Event loop
//!
//! A single task owns the listener and every `Session`. It waits until at
//! least one socket is ready, then handles each ready socket to completion
//! (read, parse, filesystem call, response write) before looking at the
//! next one.
//!
//! Filesystem calls are plain blocking `std::fs` calls made on the loop, so
//! one slow disk operation, or a peer that stops draining its responses,
//! delays every other client. That is accepted at this scale; the dispatcher
//! is kept free of socket concerns so the work can move to a task queue
//! later without touching the protocol.

use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::future::poll_fn;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::task::Poll;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};

use crate::client::{DrainOutcome, Session, handle_input};
use crate::error::ServerError;
use crate::protocol::responses;
use crate::server::config::ServerConfig;
use crate::storage::SandboxRoot;

/// Readiness reported by one wait
enum Event {
    Acceptable(io::Result<(TcpStream, SocketAddr)>),
    Readable(SocketAddr),
}

pub struct Server {
    listener: TcpListener,
    root: SandboxRoot,
    sessions: HashMap<SocketAddr, Session>,
    config: ServerConfig,
    scratch: Vec<u8>,
}

impl Server {
    /// Prepares the sandbox root and binds the listener
    pub async fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let root = SandboxRoot::open(&config.server_root).map_err(ServerError::SandboxRoot)?;
        info!("Sandbox root directory: {}", root.path().display());

        let listener = bind_with_retries(&config).await?;

        Ok(Self {
            listener,
            root,
            sessions: HashMap::new(),
            scratch: vec![0; config.read_chunk_size],
            config,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn sandbox_root(&self) -> &Path {
        self.root.path()
    }

    /// Runs the loop. Only returns on a fatal listener failure.
    pub async fn run(mut self) -> Result<(), ServerError> {
        if let Ok(addr) = self.listener.local_addr() {
            info!("Serving on {}", addr);
        }

        loop {
            let events = self.wait_for_events().await;
            for event in events {
                match event {
                    Event::Acceptable(Ok((stream, addr))) => self.handle_accept(stream, addr).await,
                    Event::Acceptable(Err(e)) => match classify_accept_error(&e) {
                        AcceptFailure::Connection => {
                            warn!("Error accepting connection: {}", e);
                        }
                        AcceptFailure::Exhausted => {
                            warn!(
                                "Error accepting connection: {}; pausing accepts for {:?}",
                                e, ACCEPT_BACKOFF
                            );
                            tokio::time::sleep(ACCEPT_BACKOFF).await;
                        }
                        AcceptFailure::Listener => {
                            error!("Listener failed: {}", e);
                            return Err(ServerError::Listener(e));
                        }
                    },
                    Event::Readable(addr) => self.handle_read(addr).await,
                }
            }
        }
    }

    /// Suspends until the listener or any session socket is ready
    async fn wait_for_events(&self) -> Vec<Event> {
        poll_fn(|cx| {
            let mut events = Vec::new();

            if let Poll::Ready(accepted) = self.listener.poll_accept(cx) {
                events.push(Event::Acceptable(accepted));
            }

            for (addr, session) in &self.sessions {
                // Errors surface again from the read itself
                if session.poll_read_ready(cx).is_ready() {
                    events.push(Event::Readable(*addr));
                }
            }

            if events.is_empty() {
                Poll::Pending
            } else {
                Poll::Ready(events)
            }
        })
        .await
    }

    async fn handle_accept(&mut self, stream: TcpStream, addr: SocketAddr) {
        let mut session = Session::new(stream, addr, self.config.max_line_length);

        if let Err(e) = session.send(responses::greeting().as_bytes()).await {
            warn!("Failed to greet {}: {}", addr, e);
            return;
        }

        self.sessions.insert(addr, session);
        info!(
            "Client connected: {} ({} active)",
            addr,
            self.sessions.len()
        );
    }

    async fn handle_read(&mut self, addr: SocketAddr) {
        let Some(session) = self.sessions.get_mut(&addr) else {
            return;
        };

        match session.drain(&mut self.scratch) {
            DrainOutcome::Open => {}
            DrainOutcome::Closed => {
                // Complete lines that arrived with the FIN still run
                if let Err(e) = handle_input(&self.root, session).await {
                    debug!("Could not answer {} after close: {}", addr, e);
                }
                debug!("Client {} left from {}", addr, session.cwd());
                self.close_session(addr);
                return;
            }
            DrainOutcome::Failed(e) => {
                warn!("Failed to read from {}: {}", addr, e);
                self.close_session(addr);
                return;
            }
        }

        let result = handle_input(&self.root, session).await;
        if let Err(e) = result {
            warn!("Failed to write to {}: {}", addr, e);
            self.close_session(addr);
        }
    }

    fn close_session(&mut self, addr: SocketAddr) {
        if self.sessions.remove(&addr).is_some() {
            info!(
                "Client {} disconnected ({} active)",
                addr,
                self.sessions.len()
            );
        }
    }
}

/// How the loop reacts to a failed accept
#[derive(Debug, PartialEq, Eq)]
enum AcceptFailure {
    /// Concerns one incoming connection; keep going
    Connection,
    /// Out of descriptors or memory; pause before accepting again
    Exhausted,
    /// The listening socket itself is unusable
    Listener,
}

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

const EMFILE: i32 = 24;
const ENFILE: i32 = 23;

fn classify_accept_error(e: &io::Error) -> AcceptFailure {
    if matches!(e.raw_os_error(), Some(EMFILE) | Some(ENFILE)) {
        return AcceptFailure::Exhausted;
    }
    match e.kind() {
        io::ErrorKind::OutOfMemory => AcceptFailure::Exhausted,
        io::ErrorKind::InvalidInput => AcceptFailure::Listener,
        _ => AcceptFailure::Connection,
    }
}

async fn bind_with_retries(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    let addr = config.listen_socket();
    let mut attempt = 0;

    loop {
        match TcpListener::bind(&addr).await {
            Ok(listener) => {
                info!("Server bound to {}", addr);
                return Ok(listener);
            }
            Err(e) if attempt < config.bind_retries => {
                attempt += 1;
                warn!(
                    "Failed to bind to {} (attempt {}/{}): {}",
                    addr,
                    attempt,
                    config.bind_retries + 1,
                    e
                );
                tokio::time::sleep(config.bind_retry_delay()).await;
            }
            Err(source) => {
                error!("Failed to bind to {}: {}", addr, source);
                return Err(ServerError::Bind { addr, source });
            }
        }
    }
}
