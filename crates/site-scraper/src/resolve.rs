use url::Url;

use crate::error::UrlParseError;

/// How hrefs that already look absolute are recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HrefMatch {
    /// Any href starting with the literal `http` is passed through unchanged.
    /// This also lets through things like `httpfoo://x`.
    #[default]
    Prefix,
    /// Only `http://` and `https://` hrefs are passed through.
    Scheme,
}

impl HrefMatch {
    fn is_absolute(self, href: &str) -> bool {
        match self {
            HrefMatch::Prefix => href.starts_with("http"),
            HrefMatch::Scheme => href.starts_with("http://") || href.starts_with("https://"),
        }
    }
}

/// Scheme and authority of an absolute URL, e.g. `https` + `example.com:8080`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    url: Url,
    authority: String,
}

impl Origin {
    pub fn parse(input: &str) -> Result<Self, UrlParseError> {
        let url = Url::parse(input).map_err(|source| UrlParseError::Invalid {
            url: input.to_string(),
            source,
        })?;
        let host = url.host_str().ok_or_else(|| UrlParseError::MissingHost {
            url: input.to_string(),
        })?;

        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self { url, authority })
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Path component of the parsed URL, used for robots.txt matching.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// `{scheme}://{authority}` followed by `path`, verbatim.
    pub fn with_path(&self, path: &str) -> String {
        format!("{}://{}{}", self.scheme(), self.authority, path)
    }
}

/// Turns an href found on the page at `base` into an absolute URL.
///
/// Relative hrefs are resolved against the origin root, not the current path:
/// `item/1` on `http://example.com/list/` becomes `http://example.com/item/1`.
pub fn resolve(base: &str, href: &str, mode: HrefMatch) -> Result<String, UrlParseError> {
    if mode.is_absolute(href) {
        return Ok(href.to_string());
    }

    let origin = Origin::parse(base)?;

    if href.starts_with('/') {
        Ok(origin.with_path(href))
    } else {
        Ok(origin.with_path(&format!("/{}", href)))
    }
}
