use crate::{FetchConfig, FetchError, Fetcher, VERSION_HEADER};
use mtsp_schema::SUPPORTED_VERSION;
use std::io::Read;
use url::Url;

/// Fetches manifests over HTTP(S) with a shared `ureq` agent.
///
/// Every request carries the configured `User-Agent`, the
/// `X-Mtsp-Version` header, and a bearer token when one is configured.
pub struct HttpFetcher {
    config: FetchConfig,
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .build()
            .into();
        Self { config, agent }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn do_get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut req = self
            .agent
            .get(url)
            .header("User-Agent", &self.config.user_agent)
            .header(VERSION_HEADER, &SUPPORTED_VERSION.to_string());
        if let Some(ref token) = self.config.auth_token {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = match req.call() {
            Ok(r) => r,
            Err(ureq::Error::StatusCode(404)) => {
                return Err(FetchError::NotFound(url.to_owned()));
            }
            Err(ureq::Error::StatusCode(code)) => {
                return Err(FetchError::Http(format!("HTTP {code} for {url}")));
            }
            Err(e) => {
                return Err(FetchError::Http(e.to_string()));
            }
        };

        let code = resp.status().as_u16();
        if code == 404 {
            return Err(FetchError::NotFound(url.to_owned()));
        }
        if code >= 400 {
            return Err(FetchError::Http(format!("HTTP {code} for {url}")));
        }

        let limit = self.config.max_manifest_bytes;
        let mut reader = resp.into_body().into_reader().take(limit.saturating_add(1));
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .map_err(|e| FetchError::Http(e.to_string()))?;
        if body.len() as u64 > limit {
            return Err(FetchError::TooLarge {
                locator: url.to_owned(),
                limit,
            });
        }
        Ok(body)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError> {
        if !matches!(locator.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(locator.scheme().to_owned()));
        }
        tracing::debug!("GET {locator}");
        let body = self.do_get(locator.as_str())?;
        tracing::debug!("GET {locator}: {} bytes", body.len());
        Ok(body)
    }
}
