//! Minimal HTTP/1.1 client. Each request opens its own TCP connection, performs
//! the handshake, sends the request and reads the whole response body so the
//! connection is released before returning.

use bytes::Bytes;
use http_body_util::{combinators::BoxBody, BodyExt};
use hyper::{header, Method, Request};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use url::{Position, Url};

use crate::Error;

/// Request body type accepted by [`send`].
pub(crate) type RequestBody = BoxBody<Bytes, hyper::Error>;

/// Sends a request to `url` with the given method, extra headers and body.
/// Any status outside of `2xx` is reported as [`Error::Status`]. Returns the
/// full response body.
pub(crate) async fn send(
    method: Method,
    url: &Url,
    headers: &[(header::HeaderName, String)],
    body: RequestBody,
) -> Result<Bytes, Error> {
    if url.scheme() != "http" {
        return Err(Error::UnsupportedUrl(url.to_string()));
    }

    let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
        return Err(Error::UnsupportedUrl(url.to_string()));
    };

    // IPv6 hosts come enclosed in brackets.
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let stream = TcpStream::connect((host, port)).await?;

    let (mut sender, conn) = hyper::client::conn::http1::Builder::new()
        .title_case_headers(true)
        .handshake(TokioIo::new(stream))
        .await?;

    tokio::task::spawn(async move {
        if let Err(err) = conn.await {
            tracing::debug!("Connection failed: {err:?}");
        }
    });

    let mut builder = Request::builder()
        .method(method.clone())
        .uri(&url[Position::BeforePath..Position::AfterQuery])
        .header(header::HOST, &url[Position::BeforeHost..Position::AfterPort]);

    for (name, value) in headers {
        builder = builder.header(name, value);
    }

    let response = sender.send_request(builder.body(body)?).await?;
    let status = response.status();

    // Read everything even on errors, the connection is only released once the
    // body has been consumed.
    let content = response.into_body().collect().await?.to_bytes();

    if !status.is_success() {
        return Err(Error::Status {
            method,
            url: url.to_string(),
            status,
        });
    }

    Ok(content)
}
