//! Image path rewriting.
//!
//! Page images are authored relative to the site root. When the site is
//! published under a release version, every local image moves under
//! `/{version}/`. Remote images are left alone.

/// Rewrites image `src` attributes for the configured release version.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImagePaths {
    base_path: String,
}

impl ImagePaths {
    /// Create a rewriter for an optional release version.
    ///
    /// An empty version is treated as no version.
    #[must_use]
    pub fn new(release_version: Option<&str>) -> Self {
        let base_path = match release_version.map(|v| v.trim_matches('/')) {
            Some(version) if !version.is_empty() => format!("/{version}"),
            _ => String::new(),
        };
        Self { base_path }
    }

    /// Rewrite a single image source.
    ///
    /// # Examples
    ///
    /// ```
    /// use luma_renderer::ImagePaths;
    ///
    /// let paths = ImagePaths::new(Some("v1.2"));
    /// assert_eq!(paths.rewrite("/img/logo.png"), "/v1.2/img/logo.png");
    /// assert_eq!(paths.rewrite("https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");
    /// ```
    #[must_use]
    pub fn rewrite(&self, src: &str) -> String {
        let path = src.strip_prefix('/').unwrap_or(src);
        if path.starts_with("http") {
            return path.to_owned();
        }
        format!("{}/{path}", self.base_path)
    }
}
