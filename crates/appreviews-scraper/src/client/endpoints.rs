//! Base URLs for the landing page and reviews API hosts.

use appreviews_core::{ContentKind, Target};
use reqwest::Url;

use crate::error::BootstrapError;

const SCHEME: &str = "https";

/// Landing and request base URLs.
///
/// [`Endpoints::for_kind`] points at the production storefront hosts;
/// [`Endpoints::new`] lets tests point both at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    landing_base: Url,
    request_base: Url,
}

impl Endpoints {
    /// Production hosts for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::InvalidUrl`] only if a built-in host fails
    /// to parse.
    pub fn for_kind(kind: ContentKind) -> Result<Self, BootstrapError> {
        Self::new(
            &format!("{SCHEME}://{}", kind.landing_host()),
            &format!("{SCHEME}://{}", kind.request_host()),
        )
    }

    /// Custom bases, e.g. a wiremock server URI for both.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::InvalidUrl`] if either base is not a valid
    /// absolute URL.
    pub fn new(landing_base: &str, request_base: &str) -> Result<Self, BootstrapError> {
        Ok(Self {
            landing_base: parse_base(landing_base)?,
            request_base: parse_base(request_base)?,
        })
    }

    /// Scheme and host of the landing site, sent as `Origin`.
    #[must_use]
    pub fn landing_origin(&self) -> String {
        self.landing_base.origin().ascii_serialization()
    }

    /// Landing base without the trailing slash, as it appears in links.
    #[must_use]
    pub fn landing_base(&self) -> &str {
        self.landing_base.as_str().trim_end_matches('/')
    }

    /// Full landing page URL for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::InvalidUrl`] if the joined path is invalid.
    pub fn landing_url(&self, target: &Target) -> Result<Url, BootstrapError> {
        join(&self.landing_base, &target.landing_path())
    }

    /// Full reviews endpoint URL for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::InvalidUrl`] if the joined path is invalid.
    pub fn request_url(&self, target: &Target) -> Result<Url, BootstrapError> {
        join(&self.request_base, &target.request_path())
    }
}

// Url::join replaces the last path segment unless the base ends in '/'.
fn parse_base(base: &str) -> Result<Url, BootstrapError> {
    let normalised = format!("{}/", base.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| BootstrapError::InvalidUrl {
        url: base.to_owned(),
        reason: e.to_string(),
    })
}

fn join(base: &Url, path: &str) -> Result<Url, BootstrapError> {
    base.join(path).map_err(|e| BootstrapError::InvalidUrl {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fortnite() -> Target {
        Target::new(ContentKind::App, "nz", "fortnite", 1_261_357_853).unwrap()
    }

    #[test]
    fn production_app_urls() {
        let endpoints = Endpoints::for_kind(ContentKind::App).unwrap();
        assert_eq!(
            endpoints.landing_url(&fortnite()).unwrap().as_str(),
            "https://apps.apple.com/nz/app/fortnite/id1261357853"
        );
        assert_eq!(
            endpoints.request_url(&fortnite()).unwrap().as_str(),
            "https://amp-api.apps.apple.com/v1/catalog/nz/apps/1261357853/reviews"
        );
        assert_eq!(endpoints.landing_origin(), "https://apps.apple.com");
        assert_eq!(endpoints.landing_base(), "https://apps.apple.com");
    }

    #[test]
    fn production_podcast_urls() {
        let endpoints = Endpoints::for_kind(ContentKind::Podcast).unwrap();
        let target = Target::new(
            ContentKind::Podcast,
            "us",
            "Stuff You Should Know",
            278_981_407,
        )
        .unwrap();
        assert_eq!(
            endpoints.landing_url(&target).unwrap().as_str(),
            "https://podcasts.apple.com/us/podcast/stuff-you-should-know/id278981407"
        );
        assert_eq!(
            endpoints.request_url(&target).unwrap().as_str(),
            "https://amp-api.podcasts.apple.com/v1/catalog/us/podcasts/278981407/reviews"
        );
    }

    #[test]
    fn custom_base_with_path_prefix_keeps_prefix() {
        let endpoints = Endpoints::new(
            "http://127.0.0.1:9000/landing",
            "http://127.0.0.1:9000/api/",
        )
        .unwrap();
        assert_eq!(
            endpoints.landing_url(&fortnite()).unwrap().as_str(),
            "http://127.0.0.1:9000/landing/nz/app/fortnite/id1261357853"
        );
        assert_eq!(
            endpoints.request_url(&fortnite()).unwrap().as_str(),
            "http://127.0.0.1:9000/api/v1/catalog/nz/apps/1261357853/reviews"
        );
        assert_eq!(endpoints.landing_origin(), "http://127.0.0.1:9000");
    }

    #[test]
    fn rejects_relative_base() {
        let err = Endpoints::new("not-a-url", "https://amp-api.apps.apple.com").unwrap_err();
        assert!(
            matches!(err, BootstrapError::InvalidUrl { ref url, .. } if url == "not-a-url"),
            "expected InvalidUrl, got: {err:?}"
        );
    }
}
