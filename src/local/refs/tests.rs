//! Unit tests for HEAD and branch resolution.

use rstest::rstest;
use tempfile::TempDir;

use super::{find_packed_ref, read_head, resolve_branch_sha};
use crate::local::test_support::MetadataFixture;
use crate::local::types::CommitSha;

const LOOSE_SHA: &str = "db99a912f5c4bffe11d91e163cd78ed96589611b";
const PACKED_SHA: &str = "0123456789abcdef0123456789abcdef01234567";

fn fixture() -> (TempDir, MetadataFixture) {
    let temp_dir = TempDir::new().expect("should create temp directory");
    let fixture =
        MetadataFixture::new(&temp_dir.path().join(".git")).expect("should create metadata dir");
    (temp_dir, fixture)
}

#[rstest]
#[case::exact_match("refs/heads/main", Some(PACKED_SHA))]
#[case::remote_tracking_ignored("refs/heads/origin/main", None)]
#[case::tag_ignored("refs/heads/v1", None)]
fn packed_ref_matches_exact_path(#[case] ref_name: &str, #[case] expected: Option<&str>) {
    let packed = format!(
        "# pack-refs with: peeled fully-peeled sorted \n\
         {PACKED_SHA} refs/heads/main\n\
         {LOOSE_SHA} refs/remotes/origin/main\n\
         {LOOSE_SHA} refs/tags/v1\n\
         ^{PACKED_SHA}\n"
    );

    assert_eq!(
        find_packed_ref(&packed, ref_name),
        expected.map(CommitSha::new)
    );
}

#[test]
fn packed_ref_tolerates_trailing_whitespace() {
    let packed = format!("{PACKED_SHA} refs/heads/main  \r\n");

    assert_eq!(
        find_packed_ref(&packed, "refs/heads/main"),
        Some(CommitSha::new(PACKED_SHA))
    );
}

#[tokio::test]
async fn loose_ref_returns_trimmed_contents() {
    let (_temp, fixture) = fixture();
    fixture
        .write_loose_ref("main", LOOSE_SHA)
        .expect("should write ref");

    let sha = resolve_branch_sha(fixture.dir(), "main")
        .await
        .expect("resolution should not fail");

    assert_eq!(sha, Some(CommitSha::new(LOOSE_SHA)));
}

#[tokio::test]
async fn ref_directory_falls_through_to_packed_refs() {
    let (_temp, fixture) = fixture();
    fixture
        .write_loose_ref("dev/login", LOOSE_SHA)
        .expect("should write nested ref");
    fixture
        .write_packed_refs(&[(PACKED_SHA, "refs/heads/dev")])
        .expect("should write packed-refs");

    let sha = resolve_branch_sha(fixture.dir(), "dev")
        .await
        .expect("a ref directory should not be an error");

    assert_eq!(sha, Some(CommitSha::new(PACKED_SHA)));
}

#[tokio::test]
async fn ref_directory_without_packed_entry_is_absent() {
    let (_temp, fixture) = fixture();
    fixture
        .write_loose_ref("dev/login", LOOSE_SHA)
        .expect("should write nested ref");

    let sha = resolve_branch_sha(fixture.dir(), "dev")
        .await
        .expect("a ref directory should not be an error");

    assert_eq!(sha, None);
}

#[tokio::test]
async fn packed_ref_used_when_no_loose_ref() {
    let (_temp, fixture) = fixture();
    fixture
        .write_packed_refs(&[(PACKED_SHA, "refs/heads/main")])
        .expect("should write packed-refs");

    let sha = resolve_branch_sha(fixture.dir(), "main")
        .await
        .expect("resolution should not fail");

    assert_eq!(sha, Some(CommitSha::new(PACKED_SHA)));
}

#[tokio::test]
async fn loose_ref_wins_over_packed_ref() {
    let (_temp, fixture) = fixture();
    fixture
        .write_loose_ref("main", LOOSE_SHA)
        .expect("should write ref");
    fixture
        .write_packed_refs(&[(PACKED_SHA, "refs/heads/main")])
        .expect("should write packed-refs");

    let sha = resolve_branch_sha(fixture.dir(), "main")
        .await
        .expect("resolution should not fail");

    assert_eq!(sha, Some(CommitSha::new(LOOSE_SHA)));
}

#[tokio::test]
async fn unknown_branch_resolves_to_none() {
    let (_temp, fixture) = fixture();
    fixture
        .write_packed_refs(&[(PACKED_SHA, "refs/heads/main")])
        .expect("should write packed-refs");

    let sha = resolve_branch_sha(fixture.dir(), "trunk")
        .await
        .expect("resolution should not fail");

    assert_eq!(sha, None);
}

#[tokio::test]
async fn nested_branch_names_resolve() {
    let (_temp, fixture) = fixture();
    fixture
        .write_loose_ref("feature/login", LOOSE_SHA)
        .expect("should write ref");

    let sha = resolve_branch_sha(fixture.dir(), "feature/login")
        .await
        .expect("resolution should not fail");

    assert_eq!(sha, Some(CommitSha::new(LOOSE_SHA)));
}

#[tokio::test]
async fn attached_head_resolves_branch() {
    let (_temp, fixture) = fixture();
    fixture.attach_head("main").expect("should write HEAD");
    fixture
        .write_loose_ref("main", LOOSE_SHA)
        .expect("should write ref");

    let head = read_head(fixture.dir())
        .await
        .expect("read should not fail")
        .expect("HEAD should resolve");

    assert_eq!(head.sha, CommitSha::new(LOOSE_SHA));
    assert_eq!(head.branch.as_deref(), Some("main"));
}

#[tokio::test]
async fn detached_head_returns_sha_without_branch() {
    let (_temp, fixture) = fixture();
    fixture.detach_head(LOOSE_SHA).expect("should write HEAD");

    let head = read_head(fixture.dir())
        .await
        .expect("read should not fail")
        .expect("HEAD should resolve");

    assert_eq!(head.sha.as_str(), LOOSE_SHA);
    assert_eq!(head.branch, None);
}

#[tokio::test]
async fn unresolvable_branch_in_head_yields_none() {
    let (_temp, fixture) = fixture();
    fixture.attach_head("main").expect("should write HEAD");

    let head = read_head(fixture.dir()).await.expect("read should not fail");

    assert_eq!(head, None);
}

#[tokio::test]
async fn missing_head_yields_none() {
    let (_temp, fixture) = fixture();

    let head = read_head(fixture.dir()).await.expect("read should not fail");

    assert_eq!(head, None);
}

#[tokio::test]
async fn reads_head_of_repository_created_by_libgit2() {
    let temp_dir = TempDir::new().expect("should create temp directory");
    let repo = git2::Repository::init(temp_dir.path()).expect("should init repository");
    let signature =
        git2::Signature::now("Test", "test@example.com").expect("should create signature");
    let tree_id = repo
        .index()
        .and_then(|mut index| index.write_tree())
        .expect("should write empty tree");
    let tree = repo.find_tree(tree_id).expect("should find tree");
    let commit_id = repo
        .commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
        .expect("should create commit");
    let branch = repo
        .head()
        .expect("HEAD should exist")
        .shorthand()
        .expect("branch should have a name")
        .to_owned();

    let head = read_head(&temp_dir.path().join(".git"))
        .await
        .expect("read should not fail")
        .expect("HEAD should resolve");

    assert_eq!(head.sha.as_str(), commit_id.to_string());
    assert_eq!(head.branch, Some(branch));
}
