//! Mock backends for the telemetry bot.

use std::{convert::Infallible, future::Future, net::SocketAddr, pin::Pin};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{body::Incoming, service::Service, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::{net::TcpStream, sync::mpsc, task::JoinHandle};

use super::tcp::usable_tcp_listener;

/// Backend server that can run on different tasks and shares every request that
/// it receives on a channel. This allows us to write cleaner tests where all
/// asserts are done in the test function, not on a separate task.
#[derive(Clone)]
pub struct RequestInterceptor {
    tx: mpsc::Sender<(http::request::Parts, Bytes)>,
    status: StatusCode,
}

impl RequestInterceptor {
    pub fn new(tx: mpsc::Sender<(http::request::Parts, Bytes)>) -> Self {
        Self::with_status(tx, StatusCode::OK)
    }

    /// Answers every request with the given `status`.
    pub fn with_status(tx: mpsc::Sender<(http::request::Parts, Bytes)>, status: StatusCode) -> Self {
        Self { tx, status }
    }
}

impl Service<Request<Incoming>> for RequestInterceptor {
    type Response = Response<Full<Bytes>>;

    type Error = Infallible;

    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let tx = self.tx.clone();
        let status = self.status;

        Box::pin(async move {
            let (parts, body) = req.into_parts();

            tx.send((parts, body.collect().await.unwrap().to_bytes()))
                .await
                .unwrap();

            let mut response = Response::new(Full::<Bytes>::from("Hello world"));
            *response.status_mut() = status;

            Ok(response)
        })
    }
}

/// Serves an HTTP connection with the given service. Connections that close
/// without sending a request, like the ones opened by
/// [`super::tcp::ping_tcp_server`], are ignored.
pub async fn serve_connection<S>(stream: TcpStream, service: S)
where
    S: Service<Request<Incoming>, Response = Response<Full<Bytes>>, Error = Infallible>,
    S::Future: Send,
{
    let _ = hyper::server::conn::http1::Builder::new()
        .serve_connection(TokioIo::new(stream), service)
        .await;
}

/// Starts a backend in the background that forwards every request it receives
/// to the returned channel.
pub fn spawn_intercepting_backend(
    status: StatusCode,
) -> (
    SocketAddr,
    mpsc::Receiver<(http::request::Parts, Bytes)>,
    JoinHandle<()>,
) {
    let (listener, addr) = usable_tcp_listener();
    let (tx, rx) = mpsc::channel(16);
    let interceptor = RequestInterceptor::with_status(tx, status);

    let handle = tokio::task::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::task::spawn(serve_connection(stream, interceptor.clone()));
        }
    });

    (addr, rx, handle)
}
