use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use hyper::{header, Response};

use super::body;

/// Every response produced by the servers has this type.
pub(crate) type BoxBodyResponse = Response<BoxBody<Bytes, hyper::Error>>;

/// `200 OK` with `Content-Type: text/html` and the given body. The servers
/// never answer with anything else.
pub(crate) fn html(content: Bytes) -> BoxBodyResponse {
    let mut response = Response::new(body::full(content));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/html"),
    );

    response
}
