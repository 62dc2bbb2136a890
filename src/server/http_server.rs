use may::coroutine::JoinHandle;
use may_minihttp::HttpService;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Thin wrapper around `may_minihttp::HttpServer` that remembers the bound
/// address and hands back a [`ServerHandle`].
pub struct HttpServer<T>(pub T);

/// Handle to a running server.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Poll the listening address until a TCP connect succeeds.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if the listener is not accepting after ~250ms
    /// (50 attempts, 5ms apart).
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Cancel the accept coroutine and wait for it to exit.
    #[allow(unsafe_code)]
    pub fn stop(self) {
        // SAFETY: the handle is owned here and refers to a live coroutine;
        // cancelling the accept loop is the only way may offers to end it.
        unsafe {
            self.handle.coroutine().cancel();
        }
        if self.handle.join().is_err() {
            warn!(addr = %self.addr, "server coroutine ended with a panic");
        }
        info!(addr = %self.addr, "server stopped");
    }

    /// Block until the server coroutine finishes, which in practice is never
    /// unless it is cancelled.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the server coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Bind `addr` and start accepting connections.
    ///
    /// # Errors
    ///
    /// Returns an error if `addr` does not resolve or cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let handle = may_minihttp::HttpServer(self.0).start(addr)?;
        Ok(ServerHandle { addr, handle })
    }
}
