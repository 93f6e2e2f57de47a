//! Error type for carousel construction and configuration loading.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Errors that abort an operation outright.
///
/// Degenerate geometry and malformed option values are not errors; they
/// resolve to a paused strip or a default field value instead.
#[derive(thiserror::Error, Debug)]
pub enum CarouselError {
    /// The construction target cannot be rendered (not an HTML element,
    /// detached host, etc.).
    #[error("carousel expects a valid renderable element: {0}")]
    InvalidElement(String),

    /// The batch initializer was given a selector the document rejects.
    #[cfg(feature = "web")]
    #[error("invalid carousel selector: {0}")]
    InvalidSelector(String),

    /// No browser window or document is available.
    #[cfg(feature = "web")]
    #[error("no document available")]
    NoDocument,

    /// A TOML option file could not be decoded.
    #[cfg(feature = "toml")]
    #[error("invalid carousel options: {0}")]
    Config(#[from] toml::de::Error),
}

impl CarouselError {
    pub fn invalid_element(msg: impl Into<String>) -> Self {
        Self::InvalidElement(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_target() {
        let err = CarouselError::invalid_element("svg element");
        assert!(err.to_string().contains("renderable element"));
        assert!(err.to_string().contains("svg element"));
    }
}
