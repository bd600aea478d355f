//! Configuration factories for integrations tests. Every server listens on
//! port 0 so tests can run in parallel.

use std::path::Path;

use wagdev::config::Server;

pub fn fixtures(base_path: &Path) -> Server {
    Server::fixtures("127.0.0.1:0".parse().unwrap(), base_path)
}

pub fn file(doc_path: &Path) -> Server {
    Server::file("127.0.0.1:0".parse().unwrap(), doc_path)
}
