//! The [`hyper`] library is based on services. Each time we accept a connection
//! we have to provide an instance of [`hyper::service::Service`] to handle that
//! connection. This module contains the [`Wag`] struct which implements
//! [`hyper::service::Service`] and answers requests with the content described
//! by the server configuration: either language guide fixtures selected by a
//! query parameter, or a single static document.

mod files;
mod fixtures;

use std::{future::Future, pin::Pin, sync::Arc};

use hyper::{body::Incoming, service::Service, Method, Request, Response, StatusCode};

pub use files::StaticFile;
pub use fixtures::{lexeme_from_query, Fixtures, FALLBACK, LEXEMES, QUERY_PARAM};

use crate::{
    config,
    http::{
        body,
        response::{self, BoxBodyResponse},
    },
    Error,
};

/// What a server responds with, built once from [`config::Action`] when the
/// server starts and shared read-only by all connections.
#[derive(Debug)]
pub(crate) enum Content {
    Fixtures(Fixtures),
    File(StaticFile),
}

impl From<&config::Action> for Content {
    fn from(action: &config::Action) -> Self {
        match action {
            config::Action::Fixtures(base_path) => Self::Fixtures(Fixtures::new(base_path)),
            config::Action::File(doc_path) => Self::File(StaticFile::new(doc_path)),
        }
    }
}

/// Implements [`Service`] and handles incoming requests.
#[derive(Clone)]
pub(crate) struct Wag {
    content: Arc<Content>,
}

impl Wag {
    /// Creates a new [`Wag`] service.
    pub fn new(content: Arc<Content>) -> Self {
        Self { content }
    }
}

impl Service<Request<Incoming>> for Wag {
    type Response = BoxBodyResponse;

    type Error = Error;

    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, request: Request<Incoming>) -> Self::Future {
        let content = Arc::clone(&self.content);

        Box::pin(async move {
            if request.method() != Method::GET {
                let mut response = Response::new(body::empty());
                *response.status_mut() = StatusCode::NOT_IMPLEMENTED;
                return Ok(response);
            }

            let body = match content.as_ref() {
                Content::Fixtures(fixtures) => fixtures.render(request.uri().query()).await?,
                Content::File(doc) => doc.render().await?,
            };

            Ok(response::html(body))
        })
    }
}
