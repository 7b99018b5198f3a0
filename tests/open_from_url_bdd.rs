//! Behavioural tests for opening local files from forge URLs.

mod support;

use forgelink::{
    Document, FileOpenRequest, OpenUrlError, ResolveRequest, ResolvedUrl, ResolverConfig,
    SelectionRange, UrlFlags, open_from_url, resolve_url,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use support::repository::TestRepository;
use support::runtime::{SharedRuntime, ensure_runtime};

/// State for open-from-URL scenarios.
#[derive(ScenarioState, Default)]
struct OpenState {
    runtime: Slot<SharedRuntime>,
    repository: Slot<TestRepository>,
    file: Slot<String>,
    permalink: Slot<ResolvedUrl>,
    result: Slot<FileOpenRequest>,
    error: Slot<OpenUrlError>,
}

#[fixture]
fn open_state() -> OpenState {
    OpenState::default()
}

#[given("a repository on branch {branch} with origin {origin}")]
fn create_repository(open_state: &OpenState, branch: String, origin: String) {
    let repository = TestRepository::create(branch.trim_matches('"'), origin.trim_matches('"'));
    open_state.repository.set(repository);
}

#[given("a file {relative}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn create_file(open_state: &OpenState, relative: String) {
    let path = open_state
        .repository
        .with_ref(|repository: &TestRepository| repository.write_file(relative.trim_matches('"')))
        .expect("repository not initialised");
    open_state.file.set(path.display().to_string());
}

fn open_in_repository(open_state: &OpenState, url: &str) -> std::io::Result<()> {
    let runtime = ensure_runtime(&open_state.runtime)?;
    let root = open_state
        .repository
        .with_ref(|repository: &TestRepository| repository.root().to_owned())
        .ok_or_else(|| std::io::Error::other("repository not initialised"))?;
    match runtime.block_on(open_from_url(url, &[root])) {
        Ok(request) => open_state.result.set(request),
        Err(error) => open_state.error.set(error),
    }
    Ok(())
}

#[when("the URL {url} is opened")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn open_url(open_state: &OpenState, url: String) {
    open_in_repository(open_state, url.trim_matches('"')).expect("open should run");
}

#[when("a permalink for the file at lines {start:u32} to {end:u32} is resolved and opened")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn resolve_then_open(open_state: &OpenState, start: u32, end: u32) {
    let runtime = ensure_runtime(&open_state.runtime).expect("runtime should start");
    let file = open_state.file.get().expect("file not created");
    let request = ResolveRequest {
        document: Document::File(file.into()),
        selection: Some(SelectionRange::lines(
            start.saturating_sub(1),
            end.saturating_sub(1),
        )),
        flags: UrlFlags {
            permalink: true,
            ..UrlFlags::default()
        },
    };
    let resolved = runtime
        .block_on(resolve_url(&request, &ResolverConfig::default()))
        .expect("permalink should resolve");
    open_in_repository(open_state, &resolved.url).expect("open should run");
    open_state.permalink.set(resolved);
}

#[then("the permalink names the head commit")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn assert_permalink_commit(open_state: &OpenState) {
    let sha = open_state
        .repository
        .with_ref(|repository: &TestRepository| repository.head_sha().to_owned())
        .expect("repository not initialised");
    let url = open_state
        .permalink
        .with_ref(|resolved: &ResolvedUrl| resolved.url.clone())
        .expect("permalink missing");
    assert!(
        url.contains(&format!("/blob/{sha}/")),
        "expected {url} to name commit {sha}"
    );
}

#[then("the file {relative} opens at line {line:u32} column {column:u32}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn assert_opened(open_state: &OpenState, relative: String, line: u32, column: u32) {
    let expected_path = open_state
        .repository
        .with_ref(|repository: &TestRepository| repository.root().join(relative.trim_matches('"')))
        .expect("repository not initialised");
    let request = open_state
        .result
        .with_ref(Clone::clone)
        .expect("expected a file but opening failed");
    let selection = request.selection.expect("URL should carry a selection");

    assert_eq!(request.path, expected_path, "path mismatch");
    assert_eq!(selection.start_line_number(), line, "line mismatch");
    assert_eq!(selection.start_column_number(), column, "column mismatch");
}

#[then("opening fails because {relative} is not in the workspace")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn assert_file_not_found(open_state: &OpenState, relative: String) {
    let error = open_state
        .error
        .with_ref(Clone::clone)
        .expect("expected error but got success");
    assert_eq!(
        error,
        OpenUrlError::FileNotFound {
            path: relative.trim_matches('"').to_owned(),
        }
    );
}

#[then("opening fails because the URL names no file")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn assert_missing_path(open_state: &OpenState) {
    let error = open_state
        .error
        .with_ref(Clone::clone)
        .expect("expected error but got success");
    assert!(
        matches!(error, OpenUrlError::MissingPath { .. }),
        "expected MissingPath error, got {error:?}"
    );
}

#[scenario(path = "tests/features/open_from_url.feature", index = 0)]
fn blob_url_opens_selection(open_state: OpenState) {
    let _ = open_state;
}

#[scenario(path = "tests/features/open_from_url.feature", index = 1)]
fn permalink_round_trip(open_state: OpenState) {
    let _ = open_state;
}

#[scenario(path = "tests/features/open_from_url.feature", index = 2)]
fn missing_file_fails(open_state: OpenState) {
    let _ = open_state;
}

#[scenario(path = "tests/features/open_from_url.feature", index = 3)]
fn repository_url_names_no_file(open_state: OpenState) {
    let _ = open_state;
}
