use std::{future::Future, io, net::SocketAddr, pin::Pin, sync::Arc};

use hyper_util::rt::TokioIo;
use tokio::{
    net::{TcpListener, TcpSocket},
    sync::watch,
};

use crate::{
    config,
    service::{Content, Wag},
};

/// The [`Server`] struct represents one fixture or static file server. It
/// accepts connections and spawns a Tokio task to handle each of them, until
/// the shutdown future completes. Here's a simple diagram describing the
/// process:
///
/// ```text
///                     +--------+
///                     | Server |
///                     +--------+
///                         |
///                         v
///                     +--------+
///                +--- | Select | ---+
///                |    +--------+    |
///                v                  v
///          +----------+       +----------+
///          |  Accept  |       | Shutdown |
///          +----------+       +----------+
///                |                  |
///                v                  v
///          +----------+       +----------+
///          |  Spawn   |       |  Close   |
///          +----------+       +----------+
/// ```
///
/// Whichever way [`Server::run`] ends, including the future being dropped,
/// the listening socket is closed and the stop message is logged.
pub struct Server {
    /// State updates channel. Subscribers can use this to check the current
    /// [`State`] of this server.
    state: watch::Sender<State>,

    /// TCP listener used to accept connections.
    listener: TcpListener,

    /// Configuration for this server.
    config: config::Server,

    /// Socket address used by this server to listen for incoming connections.
    address: SocketAddr,

    /// Shutdown future, this can be anything, which allows us to easily write
    /// integration tests. When this future completes, the server stops.
    shutdown: Pin<Box<dyn Future<Output = ()> + Send>>,
}

/// Represents the current state of the server.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// Server has started but is not accepting connections yet.
    Starting,

    /// Server is accepting incoming connections.
    Listening,

    /// Listening socket is closed.
    Stopped,
}

impl Server {
    /// Initializes a [`Server`] with the given `config`. This makes sure that
    /// the listening address can be used and configures a socket for that
    /// address, but does not accept connections yet. Call and `await`
    /// [`Server::run`] for that. Splitting both steps allows binding to port 0
    /// and still knowing which port the OS picked.
    pub fn init(config: config::Server) -> Result<Self, io::Error> {
        let (state, _) = watch::channel(State::Starting);

        let socket = if config.listen.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };

        #[cfg(not(windows))]
        socket.set_reuseaddr(true)?;

        socket.bind(config.listen)?;

        let listener = socket.listen(1024)?;

        // If the TCP port is 0 then the OS will choose a valid one.
        let address = listener.local_addr()?;

        // Never stop by default, the binaries pass CTRL-C here.
        let shutdown = Box::pin(std::future::pending());

        Ok(Self {
            state,
            listener,
            config,
            address,
            shutdown,
        })
    }

    /// The [`Server`] will poll the given `future` and whenever it completes,
    /// the server stops accepting connections and [`Server::run`] returns.
    pub fn shutdown_on(mut self, future: impl Future + Send + 'static) -> Self {
        self.shutdown = Box::pin(async move {
            future.await;
        });

        self
    }

    /// Address of the listening socket. This is necessary for obtaining the
    /// actual address in cases port 0 was used.
    pub fn socket_address(&self) -> SocketAddr {
        self.address
    }

    /// Obtains a channel where the current state of the server can be read.
    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.state.subscribe()
    }

    /// This is the entry point, by calling and `await`ing this function the
    /// server starts to process connections.
    pub async fn run(self) -> Result<(), crate::Error> {
        let Self {
            config,
            state,
            listener,
            shutdown,
            address,
        } = self;

        let log_name = config.log_name(address);

        let listener = Listener {
            listener,
            content: Arc::new(Content::from(&config.action)),
        };

        let _stopped = StopGuard {
            state: &state,
            log_name: &log_name,
        };

        state.send_replace(State::Listening);
        tracing::info!("{log_name} => Server running at http://{address}");

        // The listener is moved into the select, so it is dropped, and the
        // socket closed, as soon as either branch completes.
        let result = tokio::select! {
            result = listener.listen() => {
                if let Err(ref err) = result {
                    tracing::error!("{log_name} => Error while accepting connections: {err}");
                }
                result
            }
            _ = shutdown => {
                tracing::info!("{log_name} => Received shutdown signal");
                Ok(())
            }
        };

        result
    }
}

/// Marks the server as stopped and logs it when dropped.
struct StopGuard<'a> {
    state: &'a watch::Sender<State>,
    log_name: &'a str,
}

impl Drop for StopGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(State::Stopped);
        tracing::info!("{} => Server stopped", self.log_name);
    }
}

/// Listens for incoming connections and spawns tasks to handle them.
struct Listener {
    /// Underlying TCP listener. We take ownership of this so that when this
    /// struct is dropped the socket is also dropped and we stop accepting
    /// connections.
    listener: TcpListener,

    /// Response content shared by every connection.
    content: Arc<Content>,
}

impl Listener {
    async fn listen(self) -> Result<(), crate::Error> {
        loop {
            let (stream, client_addr) = self.listener.accept().await?;
            let service = Wag::new(Arc::clone(&self.content));

            tokio::task::spawn(async move {
                // Errors here only affect this connection, for example a
                // fixture file that can't be read.
                if let Err(err) = hyper::server::conn::http1::Builder::new()
                    .title_case_headers(true)
                    .serve_connection(TokioIo::new(stream), service)
                    .await
                {
                    tracing::warn!("Failed to serve connection from {client_addr}: {err}");
                }
            });
        }
    }
}
