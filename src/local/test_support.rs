//! Helpers for laying out Git metadata directories in tests.
//!
//! The writers produce the same on-disk shapes Git does, without needing a
//! Git installation.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use forgelink::local::test_support::MetadataFixture;
//!
//! let fixture = MetadataFixture::new(Path::new("/tmp/repo/.git"))
//!     .expect("should create metadata directory");
//! fixture.attach_head("main").expect("should write HEAD");
//! fixture
//!     .write_loose_ref("main", "db99a912f5c4bffe11d91e163cd78ed96589611b")
//!     .expect("should write ref");
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes Git metadata files under one directory.
#[derive(Debug, Clone)]
pub struct MetadataFixture {
    dir: PathBuf,
}

impl MetadataFixture {
    /// Creates `dir` (and parents) and returns a writer for it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn new(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Returns the metadata directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Points HEAD at `refs/heads/<branch>`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if HEAD cannot be written.
    pub fn attach_head(&self, branch: &str) -> io::Result<()> {
        fs::write(self.dir.join("HEAD"), format!("ref: refs/heads/{branch}\n"))
    }

    /// Detaches HEAD at `sha`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if HEAD cannot be written.
    pub fn detach_head(&self, sha: &str) -> io::Result<()> {
        fs::write(self.dir.join("HEAD"), format!("{sha}\n"))
    }

    /// Writes a loose ref for `branch`, creating intermediate directories for
    /// names such as `feature/x`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the ref cannot be written.
    pub fn write_loose_ref(&self, branch: &str, sha: &str) -> io::Result<()> {
        let path = self.dir.join("refs").join("heads").join(branch);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, format!("{sha}\n"))
    }

    /// Writes `packed-refs` with the given `(sha, full ref path)` entries.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_packed_refs(&self, entries: &[(&str, &str)]) -> io::Result<()> {
        let mut contents = String::from("# pack-refs with: peeled fully-peeled sorted \n");
        for (sha, ref_path) in entries {
            contents.push_str(sha);
            contents.push(' ');
            contents.push_str(ref_path);
            contents.push('\n');
        }
        fs::write(self.dir.join("packed-refs"), contents)
    }

    /// Writes a `config` file declaring each `(name, url)` remote.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_remotes(&self, remotes: &[(&str, &str)]) -> io::Result<()> {
        let mut contents = String::from("[core]\n\trepositoryformatversion = 0\n");
        for (name, url) in remotes {
            contents.push_str(&format!(
                "[remote \"{name}\"]\n\turl = {url}\n\tfetch = +refs/heads/*:refs/remotes/{name}/*\n"
            ));
        }
        fs::write(self.dir.join("config"), contents)
    }
}
