// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use url::Url;

use crate::{AcquisitionError, Options};

/// An HTTP client used to fetch remote graphics.
///
/// Implemented for closures, so a custom client can be passed as
/// `&|url: &Url| -> Result<Vec<u8>, AcquisitionError> { ... }`.
pub trait HttpClient {
    /// Performs a `GET` request and returns the response body.
    fn get(&self, url: &Url) -> Result<Vec<u8>, AcquisitionError>;
}

impl<F> HttpClient for F
where
    F: Fn(&Url) -> Result<Vec<u8>, AcquisitionError>,
{
    fn get(&self, url: &Url) -> Result<Vec<u8>, AcquisitionError> {
        self(url)
    }
}

/// An `HttpClient` that rejects all requests.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoNetwork;

impl HttpClient for NoNetwork {
    fn get(&self, url: &Url) -> Result<Vec<u8>, AcquisitionError> {
        Err(AcquisitionError::RequestFailed(format!(
            "network access is disabled, cannot fetch '{}'",
            url
        )))
    }
}

/// A blocking `HttpClient` backed by `reqwest`.
#[cfg(feature = "http")]
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl ReqwestClient {
    /// Creates a new client.
    ///
    /// `timeout` limits the whole request, including the body reading.
    pub fn new(timeout: Option<std::time::Duration>) -> Result<Self, AcquisitionError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AcquisitionError::RequestFailed(e.to_string()))?;

        Ok(ReqwestClient { client })
    }
}

#[cfg(feature = "http")]
impl HttpClient for ReqwestClient {
    fn get(&self, url: &Url) -> Result<Vec<u8>, AcquisitionError> {
        // The response is dropped on every path, which releases the connection.
        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|e| AcquisitionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquisitionError::HttpStatus(status.as_u16()));
        }

        let data = response
            .bytes()
            .map_err(|e| AcquisitionError::RequestFailed(e.to_string()))?;

        Ok(data.to_vec())
    }
}

/// Loads a graphic.
///
/// A reference that points to a file inside `Options::resources_dir` is read from disk.
/// It can be a relative path, an absolute path or a `file:` URL.
/// Otherwise the reference must be an absolute `http` or `https` URL.
pub fn fetch(
    reference: &str,
    opt: &Options,
    http: &dyn HttpClient,
) -> Result<Vec<u8>, AcquisitionError> {
    let reference = reference.trim();

    if let Some(ref dir) = opt.resources_dir {
        if let Some(path) = resolve_local(dir, reference) {
            log::debug!("Loading '{}'.", path.display());
            return std::fs::read(&path).map_err(|e| AcquisitionError::ReadFailed(path, e));
        }
    }

    let url = Url::parse(reference)
        .map_err(|_| AcquisitionError::InvalidReference(reference.to_string()))?;

    match url.scheme() {
        "http" | "https" => {
            log::debug!("Fetching '{}'.", url);
            http.get(&url)
        }
        scheme => Err(AcquisitionError::UnsupportedScheme(scheme.to_string())),
    }
}

/// Resolves a reference to a file inside `dir`.
fn resolve_local(dir: &Path, reference: &str) -> Option<PathBuf> {
    let path = match Url::parse(reference) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().ok()?,
        Ok(_) => return None,
        Err(_) => dir.join(reference),
    };

    let dir = dir.canonicalize().ok()?;
    let path = path.canonicalize().ok()?;

    if path.starts_with(&dir) && path.is_file() {
        Some(path)
    } else {
        log::debug!("'{}' is outside of the resources directory.", path.display());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_options(dir: &Path) -> Options {
        Options {
            resources_dir: Some(dir.to_path_buf()),
            ..Options::default()
        }
    }

    #[test]
    fn relative_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("symbols")).unwrap();
        std::fs::write(dir.path().join("symbols/arrow.svg"), b"<svg/>").unwrap();

        let data = fetch(" symbols/arrow.svg ", &local_options(dir.path()), &NoNetwork).unwrap();
        assert_eq!(data, b"<svg/>");
    }

    #[test]
    fn file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arrow.svg");
        std::fs::write(&path, b"<svg/>").unwrap();

        let url = Url::from_file_path(path.canonicalize().unwrap()).unwrap();
        let data = fetch(url.as_str(), &local_options(dir.path()), &NoNetwork).unwrap();
        assert_eq!(data, b"<svg/>");
    }

    #[test]
    fn outside_of_resources_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(dir.path().join("secret.svg"), b"<svg/>").unwrap();

        let res = fetch("../secret.svg", &local_options(&root), &NoNetwork);
        assert!(matches!(res, Err(AcquisitionError::InvalidReference(_))));
    }

    #[test]
    fn file_url_outside_of_resources_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        let path = dir.path().join("secret.svg");
        std::fs::write(&path, b"<svg/>").unwrap();

        let url = Url::from_file_path(path.canonicalize().unwrap()).unwrap();
        let res = fetch(url.as_str(), &local_options(&root), &NoNetwork);
        assert!(matches!(res, Err(AcquisitionError::UnsupportedScheme(ref s)) if s == "file"));
    }

    #[test]
    fn http_url() {
        let client = |url: &Url| -> Result<Vec<u8>, AcquisitionError> {
            assert_eq!(url.as_str(), "https://example.com/arrow.svg");
            Ok(b"<svg/>".to_vec())
        };

        let data = fetch("https://example.com/arrow.svg", &Options::default(), &client).unwrap();
        assert_eq!(data, b"<svg/>");
    }

    #[test]
    fn http_failure() {
        let res = fetch("http://example.com/arrow.svg", &Options::default(), &NoNetwork);
        assert!(matches!(res, Err(AcquisitionError::RequestFailed(_))));
    }

    #[test]
    fn unsupported_scheme() {
        let res = fetch("ftp://example.com/arrow.svg", &Options::default(), &NoNetwork);
        assert!(matches!(res, Err(AcquisitionError::UnsupportedScheme(ref s)) if s == "ftp"));
    }

    #[test]
    fn missing_file_without_resources_dir() {
        let res = fetch("arrow.svg", &Options::default(), &NoNetwork);
        assert!(matches!(res, Err(AcquisitionError::InvalidReference(_))));
    }
}
