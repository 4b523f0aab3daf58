use url::Url;

pub const DEFAULT_SITE: &str = "https://twitter.com";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SiteError {
    #[error("invalid site url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("site url must use http or https, got {scheme:?}")]
    UnsupportedScheme { scheme: String },
}

/// Base address of the social network, used for every URL the feed emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    // Always without a trailing slash.
    base: String,
}

impl Site {
    pub fn parse(raw: &str) -> Result<Self, SiteError> {
        let url = Url::parse(raw.trim()).map_err(|err| SiteError::InvalidUrl {
            url: raw.to_string(),
            message: err.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(SiteError::UnsupportedScheme {
                    scheme: other.to_string(),
                })
            }
        }
        if url.host_str().is_none() {
            return Err(SiteError::InvalidUrl {
                url: raw.to_string(),
                message: "missing host".into(),
            });
        }

        Ok(Self {
            base: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `<base>/<handle>`: the profile page, also used as the author URI.
    pub fn profile_url(&self, handle: &str) -> String {
        format!("{}/{}", self.base, handle)
    }

    /// `<base>/<author>/status/<id>`
    pub fn permalink(&self, author: &str, id: &str) -> String {
        format!("{}/{}/status/{}", self.base, author, id)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self {
            base: DEFAULT_SITE.to_string(),
        }
    }
}
