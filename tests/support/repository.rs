//! Real repositories created with libgit2 for behavioural tests.

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// A repository with one commit, kept alive for the scenario.
pub struct TestRepository {
    _temp_dir: TempDir,
    root: PathBuf,
    head_sha: String,
}

impl TestRepository {
    /// Initialises a repository on `branch`, commits a README, and adds
    /// `origin`.
    #[expect(
        clippy::expect_used,
        reason = "integration test helper; allow-expect-in-tests does not cover integration tests"
    )]
    pub fn create(branch: &str, origin: &str) -> Self {
        let temp_dir = TempDir::new().expect("should create temp directory");
        let root = temp_dir.path().join("project");
        let mut options = RepositoryInitOptions::new();
        options.initial_head(branch);
        let repo = Repository::init_opts(&root, &options).expect("should init repository");
        repo.remote("origin", origin).expect("should add origin");

        fs::write(root.join("README.md"), "# project\n").expect("should write README");
        let mut index = repo.index().expect("should open index");
        index
            .add_path(Path::new("README.md"))
            .expect("should stage README");
        index.write().expect("should write index");
        let tree_id = index.write_tree().expect("should write tree");
        let tree = repo.find_tree(tree_id).expect("should find tree");
        let signature =
            Signature::now("Forgelink Tests", "tests@example.com").expect("should build signature");
        let commit = repo
            .commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
            .expect("should commit");

        Self {
            _temp_dir: temp_dir,
            root,
            head_sha: commit.to_string(),
        }
    }

    /// Returns the working-tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the commit HEAD points at.
    pub fn head_sha(&self) -> &str {
        &self.head_sha
    }

    /// Writes a file relative to the root and returns its path.
    #[expect(
        clippy::expect_used,
        reason = "integration test helper; allow-expect-in-tests does not cover integration tests"
    )]
    pub fn write_file(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("should create parent directories");
        }
        fs::write(&path, "contents\n").expect("should write file");
        path
    }
}
