//! HTTP utilities for integrations tests.

use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{client::conn::http1::SendRequest, Request};
use hyper_util::rt::TokioIo;
use tokio::{
    self,
    net::TcpStream,
    sync::{oneshot, watch},
    task::JoinHandle,
};

/// Starts a server in the background with the given config, returning the
/// listening address and task handle.
pub fn spawn_server(config: wagdev::config::Server) -> (SocketAddr, JoinHandle<()>) {
    let server = wagdev::Server::init(config).unwrap();

    let addr = server.socket_address();

    let handle = tokio::task::spawn(async {
        server.run().await.unwrap();
    });

    (addr, handle)
}

/// Starts a server in the background with the given config and provides
/// access to the shutdown trigger and state updates.
pub fn spawn_server_with_controllers(
    config: wagdev::config::Server,
) -> (
    SocketAddr,
    JoinHandle<()>,
    impl FnOnce(),
    watch::Receiver<wagdev::State>,
) {
    let (tx, rx) = oneshot::channel();

    let server = wagdev::Server::init(config).unwrap().shutdown_on(rx);

    let addr = server.socket_address();
    let state = server.subscribe();

    let handle = tokio::task::spawn(async {
        server.run().await.unwrap();
    });

    (addr, handle, || tx.send(()).unwrap(), state)
}

/// Provides an HTTP client that spawns a connection object in the background
/// to manage request transmissions.
pub async fn http_client(stream: TcpStream) -> SendRequest<Empty<Bytes>> {
    let (sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();

    // The server may drop the connection on purpose, the request future
    // reports that.
    tokio::task::spawn(async move {
        let _ = conn.await;
    });

    sender
}

/// Sends an HTTP request on a new connection. When the response is completely
/// received including the whole body, its parts are returned.
pub async fn try_send_http_request(
    to: SocketAddr,
    req: Request<Empty<Bytes>>,
) -> Result<(http::response::Parts, Bytes), hyper::Error> {
    let stream = TcpStream::connect(to).await.unwrap();
    let mut sender = http_client(stream).await;

    let (parts, body) = sender.send_request(req).await?.into_parts();

    Ok((parts, body.collect().await?.to_bytes()))
}

/// Same as [`try_send_http_request`] but panics on failure.
pub async fn send_http_request(
    to: SocketAddr,
    req: Request<Empty<Bytes>>,
) -> (http::response::Parts, Bytes) {
    try_send_http_request(to, req).await.unwrap()
}

pub mod request {
    //! Quick request factory.

    use bytes::Bytes;
    use http_body_util::Empty;
    use hyper::{Method, Request};

    pub fn get(uri: &str) -> Request<Empty<Bytes>> {
        with_method(Method::GET, uri)
    }

    pub fn with_method(method: Method, uri: &str) -> Request<Empty<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(hyper::header::HOST, "localhost")
            .body(Empty::<Bytes>::new())
            .unwrap()
    }
}
