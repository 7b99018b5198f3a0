//! Web URL construction with per-segment percent-encoding.
//!
//! Every path segment (organisation, repository, mode literal, revision, and
//! each component of the file path) is encoded on its own before joining.
//! Encoding the joined path as one string would escape the `/` separators;
//! not encoding at all lets a `#` or `%` in a branch or file name corrupt the
//! URL.

use url::Url;

/// Builds URLs rooted at `https://<hostname>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WebRoot {
    root: Url,
}

impl WebRoot {
    /// Returns `None` when `hostname` does not form a valid HTTPS origin.
    pub(crate) fn new(hostname: &str) -> Option<Self> {
        let root = Url::parse(&format!("https://{hostname}/")).ok()?;
        if root.cannot_be_a_base() || root.host_str().is_none() {
            return None;
        }
        Some(Self { root })
    }

    /// Appends each segment to the root path.
    ///
    /// Segments containing `/` (a nested namespace or a file path) are split
    /// and every component is encoded separately.
    pub(crate) fn join<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.root.clone();
        push_segments(&mut url, segments);
        url
    }
}

/// Appends segments to `url`, splitting each on `/`.
pub(crate) fn push_segments<'a>(url: &mut Url, segments: impl IntoIterator<Item = &'a str>) {
    // `WebRoot::new` rejects cannot-be-a-base URLs, so this only fails for
    // URLs built elsewhere; those are left unchanged.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            path.extend(segment.split('/').filter(|part| !part.is_empty()));
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::WebRoot;

    fn github() -> WebRoot {
        WebRoot::new("github.com").expect("github.com should be a valid root")
    }

    #[rstest]
    #[case::hash_and_emoji_in_branch(
        ["ghost", "ghost.github.io", "blob", "fixit/-#123✅", "C#/C#.Package"],
        "https://github.com/ghost/ghost.github.io/blob/fixit/-%23123%E2%9C%85/C%23/C%23.Package"
    )]
    #[case::emoji_in_file_name(
        ["ghost", "ghost.github.io", "blob", "chris/fix#123-✅", "blah-#🤷🏻‍♂️.txt"],
        "https://github.com/ghost/ghost.github.io/blob/chris/fix%23123-%E2%9C%85/blah-%23%F0%9F%A4%B7%F0%9F%8F%BB%E2%80%8D%E2%99%82%EF%B8%8F.txt"
    )]
    #[case::percent_sign(
        ["acme", "widgets", "blob", "main", "docs/100%.md"],
        "https://github.com/acme/widgets/blob/main/docs/100%25.md"
    )]
    #[case::spaces(
        ["acme", "widgets", "blob", "main", "My Documents/a b.txt"],
        "https://github.com/acme/widgets/blob/main/My%20Documents/a%20b.txt"
    )]
    fn encodes_each_segment(#[case] segments: [&str; 5], #[case] expected: &str) {
        assert_eq!(github().join(segments).as_str(), expected);
    }

    #[test]
    fn repository_root_has_no_trailing_slash() {
        assert_eq!(
            github().join(["acme", "widgets"]).as_str(),
            "https://github.com/acme/widgets"
        );
    }

    #[test]
    fn hostname_with_port_is_kept() {
        let root = WebRoot::new("git.example.com:8443").expect("should accept host with port");

        assert_eq!(
            root.join(["acme", "widgets"]).as_str(),
            "https://git.example.com:8443/acme/widgets"
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::space("bad host")]
    fn rejects_invalid_hostnames(#[case] hostname: &str) {
        assert!(WebRoot::new(hostname).is_none());
    }
}
