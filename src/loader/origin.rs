/// Where the visitor came from, derived once per page load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOrigin {
    /// The referrer belongs to this site: the visitor is already browsing it
    Internal,
    /// Another site, a direct link, a bookmark... anything without a same-site referrer
    External,
}

impl NavigationOrigin {
    /// Compares the referrer against the origin of the current page.
    ///
    /// This is a plain prefix match on the origin string (scheme, host and port), so
    /// `https://example.com/page-a` is internal for `https://example.com`.
    /// An empty referrer is always external.
    pub fn detect(referrer: &str, page_origin: &str) -> Self {
        if !referrer.is_empty() && referrer.starts_with(page_origin) {
            Self::Internal
        } else {
            Self::External
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// The navigation inputs of the page, as the browser reports them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// `document.referrer`, empty when there is none
    pub referrer: String,
    /// `window.location.origin`
    pub origin: String,
}

impl PageContext {
    pub fn new(referrer: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            referrer: referrer.into(),
            origin: origin.into(),
        }
    }

    pub fn navigation_origin(&self) -> NavigationOrigin {
        NavigationOrigin::detect(&self.referrer, &self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_site_referrer_is_internal() {
        let page = PageContext::new("https://example.com/page-a", "https://example.com");
        assert_eq!(page.navigation_origin(), NavigationOrigin::Internal);
        assert!(page.navigation_origin().is_internal());
    }

    #[test]
    fn referrer_equal_to_origin_is_internal() {
        assert_eq!(
            NavigationOrigin::detect("https://example.com", "https://example.com"),
            NavigationOrigin::Internal
        );
    }

    #[test]
    fn missing_referrer_is_external() {
        assert_eq!(
            NavigationOrigin::detect("", "https://example.com"),
            NavigationOrigin::External
        );
        // even when the page origin itself is unknown
        assert_eq!(NavigationOrigin::detect("", ""), NavigationOrigin::External);
    }

    #[test]
    fn other_sites_are_external() {
        for referrer in [
            "https://other.com",
            "http://example.com/page-a",
            "https://example.org/",
            "https://www.example.com/",
        ] {
            assert_eq!(
                NavigationOrigin::detect(referrer, "https://example.com"),
                NavigationOrigin::External,
                "{referrer}"
            );
        }
    }

    #[test]
    fn port_is_part_of_the_origin() {
        assert_eq!(
            NavigationOrigin::detect("https://example.com:8443/a", "https://example.com:8443"),
            NavigationOrigin::Internal
        );
        assert_eq!(
            NavigationOrigin::detect("https://example.com/a", "https://example.com:8443"),
            NavigationOrigin::External
        );
    }
}
