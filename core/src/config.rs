//! CMS connection settings.
//!
//! # Design
//! A `CmsConfig` can only exist once both the service domain and the API key
//! are present, and every repository is built from one. Missing credentials
//! therefore surface when the process starts, never on the first request.

use url::Url;

use crate::error::ConfigError;

pub const SERVICE_DOMAIN_VAR: &str = "MICROCMS_SERVICE_DOMAIN";
pub const API_KEY_VAR: &str = "MICROCMS_API_KEY";
pub const BASE_URL_VAR: &str = "MICROCMS_BASE_URL";

/// Validated credentials and endpoint for one CMS service.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    service_domain: String,
    api_key: String,
    endpoint_base: Url,
}

impl CmsConfig {
    /// Build a config for `https://<service_domain>.microcms.io/api/v1`.
    pub fn new(service_domain: &str, api_key: &str) -> Result<Self, ConfigError> {
        let service_domain = require(SERVICE_DOMAIN_VAR, Some(service_domain))?;
        let api_key = require(API_KEY_VAR, Some(api_key))?;
        let endpoint_base = parse_endpoint(&format!("https://{service_domain}.microcms.io/api/v1"))?;
        Ok(Self {
            service_domain,
            api_key,
            endpoint_base,
        })
    }

    /// Point the client somewhere other than the hosted service, e.g. a local
    /// mock. The credentials are still required and still sent.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.endpoint_base = parse_endpoint(base_url.trim())?;
        Ok(self)
    }

    /// Read the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_domain = require(SERVICE_DOMAIN_VAR, lookup(SERVICE_DOMAIN_VAR).as_deref())?;
        let api_key = require(API_KEY_VAR, lookup(API_KEY_VAR).as_deref())?;
        let config = Self::new(&service_domain, &api_key)?;
        match lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            Some(base_url) => config.with_base_url(&base_url),
            None => Ok(config),
        }
    }

    pub fn service_domain(&self) -> &str {
        &self.service_domain
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL that endpoint names are appended to as path segments.
    pub fn endpoint_base(&self) -> &Url {
        &self.endpoint_base
    }
}

fn require(name: &'static str, value: Option<&str>) -> Result<String, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid("expected an http(s) URL".to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn builds_hosted_endpoint_from_domain() {
        let config = CmsConfig::new("my-blog", "secret").unwrap();
        assert_eq!(config.service_domain(), "my-blog");
        assert_eq!(config.api_key(), "secret");
        assert_eq!(
            config.endpoint_base().as_str(),
            "https://my-blog.microcms.io/api/v1"
        );
    }

    #[test]
    fn missing_domain_fails() {
        let err = CmsConfig::from_lookup(lookup(&[(API_KEY_VAR, "secret")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(SERVICE_DOMAIN_VAR));
    }

    #[test]
    fn missing_api_key_fails() {
        let err = CmsConfig::from_lookup(lookup(&[(SERVICE_DOMAIN_VAR, "my-blog")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(API_KEY_VAR));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = CmsConfig::new("my-blog", "   ").unwrap_err();
        assert_eq!(err, ConfigError::Missing(API_KEY_VAR));
        let err = CmsConfig::new("", "secret").unwrap_err();
        assert_eq!(err, ConfigError::Missing(SERVICE_DOMAIN_VAR));
    }

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let config = CmsConfig::from_lookup(lookup(&[
            (SERVICE_DOMAIN_VAR, "my-blog"),
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "http://127.0.0.1:3000/api/v1/"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint_base().as_str(), "http://127.0.0.1:3000/api/v1");
    }

    #[test]
    fn blank_base_url_is_ignored() {
        let config = CmsConfig::from_lookup(lookup(&[
            (SERVICE_DOMAIN_VAR, "my-blog"),
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, ""),
        ]))
        .unwrap();
        assert_eq!(
            config.endpoint_base().as_str(),
            "https://my-blog.microcms.io/api/v1"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = CmsConfig::new("my-blog", "secret")
            .unwrap()
            .with_base_url("ftp://example.com")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn rejects_unparseable_domain() {
        let err = CmsConfig::new("bad domain", "secret").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }
}
