//! Integration tests for batch copy / open.
//!
//! These tests verify:
//! - Only successful, non-empty links are produced, in input order
//! - One failing resolution never aborts its siblings
//! - Nothing is copied or opened when nothing resolves
//! - Every resolved link is opened even after a failed open

use remotelink::remote::mock::MockProvider;
use remotelink::remote::{
    copy_links, open_links, resolve_links, PullRequestBase, PullRequestHead, RemoteError,
    RemoteRef, RemoteResource,
};
use remotelink::system::mock::{RecordingClipboard, RecordingOpener};
use remotelink::system::SystemError;

const BASE: &str = "https://mock.test/owner/repo";

fn link(suffix: &str) -> String {
    format!("{}/{}", BASE, suffix)
}

fn pull_request() -> RemoteResource {
    let remote = RemoteRef {
        path: "owner/repo".into(),
        url: BASE.into(),
    };
    RemoteResource::CreatePullRequest {
        base: PullRequestBase {
            branch: Some("main".into()),
            remote: remote.clone(),
        },
        head: PullRequestHead {
            branch: "topic".into(),
            remote,
        },
        title: None,
        description: None,
    }
}

/// Two good commits around one failing lookup, one unsupported PR and a tag.
fn mixed_batch() -> (MockProvider, Vec<RemoteResource>) {
    let provider = MockProvider::new()
        .fail_on_commit("bad", RemoteError::Network("connection reset".into()))
        .without_pull_requests();
    let resources = vec![
        RemoteResource::commit("one"),
        RemoteResource::commit("bad"),
        pull_request(),
        RemoteResource::Tag { tag: "v1".into() },
        RemoteResource::commit("two"),
    ];
    (provider, resources)
}

mod resolve {
    use super::*;

    #[tokio::test]
    async fn keeps_successes_in_order() {
        let (provider, resources) = mixed_batch();
        let urls = resolve_links(&provider, resources).await;
        assert_eq!(urls, vec![link("commit/one"), link("commit/two")]);
    }

    #[tokio::test]
    async fn every_member_is_attempted() {
        let (provider, resources) = mixed_batch();
        resolve_links(&provider, resources).await;

        let mut lookups = provider.commit_lookups();
        lookups.sort();
        assert_eq!(lookups, vec!["bad", "one", "two"]);
    }

    #[tokio::test]
    async fn single_resource_is_a_batch_of_one() {
        let provider = MockProvider::new();
        let urls = resolve_links(&provider, RemoteResource::Branches).await;
        assert_eq!(urls, vec![link("branches")]);
    }

    #[tokio::test]
    async fn lookup_failure_is_dropped() {
        let provider = MockProvider::new().fail_pull_requests(RemoteError::Lookup("no fork".into()));
        let urls = resolve_links(&provider, vec![pull_request(), RemoteResource::Repo]).await;
        assert_eq!(urls, vec![BASE.to_string()]);
    }
}

mod copy {
    use super::*;

    #[tokio::test]
    async fn writes_successes_joined_by_newline() {
        let (provider, resources) = mixed_batch();
        let clipboard = RecordingClipboard::new();

        let written = copy_links(&provider, resources, &clipboard).await.unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            clipboard.writes(),
            vec![format!("{}\n{}", link("commit/one"), link("commit/two"))]
        );
    }

    #[tokio::test]
    async fn nothing_written_for_empty_result() {
        let provider = MockProvider::new().without_pull_requests();
        let clipboard = RecordingClipboard::new();

        let written = copy_links(&provider, vec![pull_request()], &clipboard)
            .await
            .unwrap();

        assert_eq!(written, 0);
        assert!(clipboard.writes().is_empty());
    }

    #[tokio::test]
    async fn clipboard_failure_propagates() {
        let provider = MockProvider::new();
        let clipboard = RecordingClipboard::new().failing();

        let result = copy_links(&provider, RemoteResource::Repo, &clipboard).await;
        assert!(matches!(result, Err(SystemError::Clipboard(_))));
    }
}

mod open {
    use super::*;

    #[tokio::test]
    async fn all_opened_is_success() {
        let provider = MockProvider::new();
        let opener = RecordingOpener::new();

        let ok = open_links(
            &provider,
            vec![RemoteResource::commit("a"), RemoteResource::commit("b")],
            &opener,
        )
        .await;

        assert!(ok);
        assert_eq!(opener.opened(), vec![link("commit/a"), link("commit/b")]);
    }

    #[tokio::test]
    async fn failed_open_does_not_stop_the_rest() {
        let provider = MockProvider::new();
        let opener = RecordingOpener::new().fail_on(link("commit/a"));

        let ok = open_links(
            &provider,
            vec![
                RemoteResource::commit("a"),
                RemoteResource::commit("b"),
                RemoteResource::commit("c"),
            ],
            &opener,
        )
        .await;

        assert!(!ok);
        let mut opened = opener.opened();
        opened.sort();
        assert_eq!(
            opened,
            vec![link("commit/a"), link("commit/b"), link("commit/c")]
        );
    }

    #[tokio::test]
    async fn declined_open_is_failure() {
        let provider = MockProvider::new();
        let opener = RecordingOpener::new().decline_on(link("branches"));

        assert!(!open_links(&provider, RemoteResource::Branches, &opener).await);
    }

    #[tokio::test]
    async fn nothing_resolved_is_not_attempted() {
        let provider = MockProvider::new();
        let opener = RecordingOpener::new();

        let ok = open_links(&provider, RemoteResource::Tag { tag: "v1".into() }, &opener).await;

        assert!(!ok);
        assert!(opener.opened().is_empty());
    }
}
