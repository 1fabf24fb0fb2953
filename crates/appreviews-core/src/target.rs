//! Storefront targets: which catalogue entry to pull reviews for.
//!
//! A [`Target`] pins down the content kind, the storefront country, the
//! URL slug derived from the display name, and the numeric catalogue id.
//! It carries no network state and never changes after construction.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TargetError;

static NON_WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\W_]+").expect("valid non-word regex"));

/// The kind of catalogue entry being reviewed.
///
/// Each kind owns its hosts and path templates. Podcasts take no platform
/// filters on the reviews endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    App,
    Podcast,
}

impl ContentKind {
    /// Host serving the human-facing landing page.
    #[must_use]
    pub fn landing_host(self) -> &'static str {
        match self {
            ContentKind::App => "apps.apple.com",
            ContentKind::Podcast => "podcasts.apple.com",
        }
    }

    /// Host serving the JSON reviews API.
    #[must_use]
    pub fn request_host(self) -> &'static str {
        match self {
            ContentKind::App => "amp-api.apps.apple.com",
            ContentKind::Podcast => "amp-api.podcasts.apple.com",
        }
    }

    /// Landing page path, without a leading slash.
    #[must_use]
    pub fn landing_path(self, country: &str, slug: &str, id: u64) -> String {
        match self {
            ContentKind::App => format!("{country}/app/{slug}/id{id}"),
            ContentKind::Podcast => format!("{country}/podcast/{slug}/id{id}"),
        }
    }

    /// Reviews endpoint path, without a leading slash.
    #[must_use]
    pub fn request_path(self, country: &str, id: u64) -> String {
        match self {
            ContentKind::App => format!("v1/catalog/{country}/apps/{id}/reviews"),
            ContentKind::Podcast => format!("v1/catalog/{country}/podcasts/{id}/reviews"),
        }
    }

    /// Extra query parameters sent with every reviews request.
    #[must_use]
    pub fn platform_filters(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ContentKind::App => &[
                ("platform", "web"),
                ("additionalPlatforms", "appletv,ipad,iphone,mac"),
            ],
            ContentKind::Podcast => &[],
        }
    }

    /// Prefix prepended to the slug when searching the web for the id.
    #[must_use]
    pub fn search_prefix(self) -> &'static str {
        match self {
            ContentKind::App => "app store",
            ContentKind::Podcast => "apple podcasts",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::App => write!(f, "AppStore"),
            ContentKind::Podcast => write!(f, "Podcast"),
        }
    }
}

/// Normalizes a display name into a URL slug.
///
/// The name is lowercased and every run of non-word characters or
/// underscores becomes a single `-`. `"Cool App"` becomes `"cool-app"`.
#[must_use]
pub fn slugify(name: &str) -> String {
    NON_WORD_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// An immutable description of the catalogue entry to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    kind: ContentKind,
    country: String,
    slug: String,
    id: u64,
}

impl Target {
    /// Builds a target from a raw country code and display name.
    ///
    /// # Errors
    ///
    /// - [`TargetError::EmptyCountry`] if `country` is blank.
    /// - [`TargetError::EmptyName`] if `name` has no word characters.
    pub fn new(
        kind: ContentKind,
        country: &str,
        name: &str,
        id: u64,
    ) -> Result<Self, TargetError> {
        let country = country.trim().to_lowercase();
        if country.is_empty() {
            return Err(TargetError::EmptyCountry);
        }
        let slug = slugify(name);
        if slug.trim_matches('-').is_empty() {
            return Err(TargetError::EmptyName(name.to_owned()));
        }
        Ok(Self {
            kind,
            country,
            slug,
            id,
        })
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The same target under another catalogue id.
    #[must_use]
    pub fn with_id(self, id: u64) -> Self {
        Self { id, ..self }
    }

    /// Landing page path for this target, without a leading slash.
    #[must_use]
    pub fn landing_path(&self) -> String {
        self.kind.landing_path(&self.country, &self.slug, self.id)
    }

    /// Reviews endpoint path for this target, without a leading slash.
    #[must_use]
    pub fn request_path(&self) -> String {
        self.kind.request_path(&self.country, self.id)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(country='{}', name='{}', id={})",
            self.kind, self.country, self.slug, self.id
        )
    }
}

#[cfg(test)]
#[path = "target_test.rs"]
mod tests;
