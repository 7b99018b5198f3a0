//! What the user is looking at when asking for a link.

use std::path::{Path, PathBuf};

use url::Url;

/// URI scheme for documents backed by a file on disk.
const FILE_SCHEME: &str = "file";

/// The document a link is requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// A saved file.
    File(PathBuf),
    /// No file is open; only a workspace directory is known.
    Workspace(PathBuf),
    /// An unsaved or non-file buffer, identified by its URI.
    Virtual(String),
}

impl Document {
    /// Interprets editor input as either a URI or a plain path.
    ///
    /// `file://` URIs become [`Document::File`]; any other URI scheme, such
    /// as `untitled:Untitled-1`, is [`Document::Virtual`]. Input that is not
    /// a URI is taken as a path. Single-letter schemes are treated as
    /// Windows drive letters rather than URIs.
    #[must_use]
    pub fn from_uri_or_path(input: &str) -> Self {
        let trimmed = input.trim();
        match Url::parse(trimmed) {
            Ok(uri) if uri.scheme() == FILE_SCHEME => uri
                .to_file_path()
                .map_or_else(|()| Self::Virtual(trimmed.to_owned()), Self::File),
            Ok(uri) if uri.scheme().len() > 1 => Self::Virtual(trimmed.to_owned()),
            _ => Self::File(PathBuf::from(trimmed)),
        }
    }

    /// Reclassifies a [`Document::File`] naming a directory as a workspace.
    pub async fn classify_directory(self) -> Self {
        match self {
            Self::File(path) if is_directory(&path).await => Self::Workspace(path),
            other => other,
        }
    }
}

async fn is_directory(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_dir())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;

    use super::Document;

    #[rstest]
    #[case::plain_path("src/main.rs", Document::File(PathBuf::from("src/main.rs")))]
    #[case::absolute_path("/work/app.ts", Document::File(PathBuf::from("/work/app.ts")))]
    #[case::file_uri("file:///work/My%20App/app.ts", Document::File(PathBuf::from("/work/My App/app.ts")))]
    #[case::untitled("untitled:Untitled-1", Document::Virtual("untitled:Untitled-1".to_owned()))]
    #[case::remote_scheme(
        "vscode-remote://ssh/home/app.ts",
        Document::Virtual("vscode-remote://ssh/home/app.ts".to_owned())
    )]
    fn classifies_input(#[case] input: &str, #[case] expected: Document) {
        assert_eq!(Document::from_uri_or_path(input), expected);
    }

    #[tokio::test]
    async fn directories_become_workspaces() {
        let temp = tempfile::TempDir::new().expect("should create temp directory");
        let file = temp.path().join("notes.txt");
        std::fs::write(&file, "notes").expect("should write file");

        assert_eq!(
            Document::File(temp.path().to_path_buf())
                .classify_directory()
                .await,
            Document::Workspace(temp.path().to_path_buf())
        );
        assert_eq!(
            Document::File(file.clone()).classify_directory().await,
            Document::File(file)
        );
        assert_eq!(
            Document::Virtual("untitled:1".to_owned())
                .classify_directory()
                .await,
            Document::Virtual("untitled:1".to_owned())
        );
    }
}
