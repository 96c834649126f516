//! Integration tests for `DashboardEditor`: optimistic reorder, rollback,
//! inline validation, error notifications and interleaved mutations

mod support;

use std::sync::Arc;

use linkpage_core::validation::LinkDraft;
use linkpage_core::{DashboardEditor, ReorderOutcome, SessionManager};
use linkpage_domain::{LinkPatch, LinkpageError, NewImage};
use support::{assert_dense, session, Harness, RecordingNotifier};

const USER: &str = "4c3b2a19-0817-4e6d-9c5b-a4f3e2d1c0b9";

async fn editor_with_links(titles: &[&str]) -> (Harness, Arc<RecordingNotifier>, DashboardEditor) {
    let h = Harness::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let editor = DashboardEditor::new(Arc::clone(&h.gateway), notifier.clone(), session(USER));
    editor.load().await.unwrap();
    for title in titles {
        editor.add_link(LinkDraft::new(*title, "https://example.com")).await.unwrap();
    }
    (h, notifier, editor)
}

fn titles(editor: &DashboardEditor) -> Vec<String> {
    editor.links().into_iter().map(|l| l.title).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_drag_applies_server_order() {
    let (h, _notifier, editor) = editor_with_links(&["A", "B", "C"]).await;

    let outcome = editor.drag_link(0, 2).await.unwrap();

    assert!(matches!(outcome, ReorderOutcome::Applied(_)));
    assert_eq!(titles(&editor), vec!["B", "C", "A"]);
    assert_dense(&h.link_positions(USER));

    let stored = h.gateway.list_links(editor.session()).await.unwrap();
    assert_eq!(stored.iter().map(|l| l.title.as_str()).collect::<Vec<_>>(), vec!["B", "C", "A"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_drag_rolls_back_and_notifies() {
    let (h, notifier, editor) = editor_with_links(&["A", "B", "C"]).await;
    h.links.switch.fail_writes(true);

    let err = editor.drag_link(0, 2).await.unwrap_err();

    assert!(matches!(err, LinkpageError::Network(_)));
    assert_eq!(titles(&editor), vec!["A", "B", "C"]);
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.errors()[0].starts_with("Failed to reorder links"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_drop_on_same_index_makes_no_call() {
    let (h, notifier, editor) = editor_with_links(&["A", "B"]).await;
    let writes_before = h.links.switch.writes();

    let outcome = editor.drag_link(1, 1).await.unwrap();

    assert_eq!(outcome, ReorderOutcome::Unchanged);
    assert_eq!(h.links.switch.writes(), writes_before);
    assert_eq!(titles(&editor), vec!["A", "B"]);
    assert!(notifier.errors().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_draft_is_inline_only() {
    let (h, notifier, editor) = editor_with_links(&[]).await;

    let err = editor.add_link(LinkDraft::new("Site", "example.com")).await.unwrap_err();

    assert_eq!(err.field_errors()[0].message, "URL must start with http:// or https://");
    assert_eq!(h.links.switch.writes(), 0);
    assert!(notifier.errors().is_empty());
    assert!(editor.links().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_add_keeps_last_good_state() {
    let (h, notifier, editor) = editor_with_links(&["A"]).await;
    h.links.switch.fail_writes(true);

    assert!(editor.add_link(LinkDraft::new("B", "https://b.example")).await.is_err());

    assert_eq!(titles(&editor), vec!["A"]);
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_refreshes_positions() {
    let (_h, _notifier, editor) = editor_with_links(&["A", "B", "C"]).await;
    let first = editor.links()[0].id.clone();

    editor.delete_link(&first).await.unwrap();

    let links = editor.links();
    assert_eq!(links.iter().map(|l| l.position).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(links[0].title, "B");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_link_updates_local_copy() {
    let (_h, _notifier, editor) = editor_with_links(&["A"]).await;
    let id = editor.links()[0].id.clone();

    editor
        .edit_link(&id, LinkPatch { title: Some("Renamed".into()), ..LinkPatch::default() })
        .await
        .unwrap();

    assert_eq!(titles(&editor), vec!["Renamed"]);
    assert_eq!(editor.snapshot().unwrap().links[0].title, "Renamed");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_drag_image_uses_its_own_sequence() {
    let (h, _notifier, editor) = editor_with_links(&["A"]).await;
    for i in 0..3 {
        h.gateway
            .add_image(editor.session(), NewImage { url: format!("https://cdn.example/{i}.png"), alt: None })
            .await
            .unwrap();
    }
    editor.load().await.unwrap();

    editor.drag_image(2, 0).await.unwrap();

    let urls: Vec<String> = editor.images().into_iter().map(|i| i.url).collect();
    assert_eq!(urls[0], "https://cdn.example/2.png");
    assert_dense(&h.image_positions(USER));
    assert_eq!(editor.links()[0].position, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_overtaken_by_edit_still_lands_locally() {
    let (h, notifier, editor) = editor_with_links(&["A", "B"]).await;
    let a = editor.links()[0].id.clone();
    h.links.switch.hold_next_write();

    let add = editor.add_link(LinkDraft::new("Slow", "https://slow.example"));
    let edit = async {
        let patch = LinkPatch { title: Some("A2".into()), ..LinkPatch::default() };
        let edited = editor.edit_link(&a, patch).await;
        h.links.switch.release();
        edited
    };
    let (added, edited) = tokio::join!(add, edit);
    added.unwrap();
    edited.unwrap();

    assert_eq!(titles(&editor), vec!["A2", "B", "Slow"]);

    let outcome = editor.drag_link(2, 0).await.unwrap();
    assert!(matches!(outcome, ReorderOutcome::Applied(_)));
    assert_eq!(titles(&editor), vec!["Slow", "A2", "B"]);
    assert!(notifier.errors().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stale_add_response_rereads_the_list() {
    let (h, notifier, editor) = editor_with_links(&["A", "B"]).await;
    let b = editor.links()[1].id.clone();
    h.links.switch.hold_next_write();

    let add = editor.add_link(LinkDraft::new("Slow", "https://slow.example"));
    let delete = async {
        let deleted = editor.delete_link(&b).await;
        h.links.switch.release();
        deleted
    };
    let (added, deleted) = tokio::join!(add, delete);
    added.unwrap();
    deleted.unwrap();

    let local = editor.links();
    let stored = h.gateway.list_links(editor.session()).await.unwrap();
    assert_eq!(local, stored);
    assert_eq!(titles(&editor), vec!["A", "Slow"]);
    assert_eq!(local.iter().map(|l| l.position).collect::<Vec<_>>(), vec![0, 1]);
    assert!(notifier.errors().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_busy_drag_leaves_in_flight_drag_current() {
    let (h, _notifier, editor) = editor_with_links(&["A", "B", "C"]).await;
    h.links.switch.hold_next_write();

    let first = editor.drag_link(0, 2);
    let second = async {
        let outcome = editor.drag_link(0, 1).await;
        h.links.switch.release();
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(second.unwrap(), ReorderOutcome::Busy);
    assert!(matches!(first.unwrap(), ReorderOutcome::Applied(_)));
    assert_eq!(titles(&editor), vec!["B", "C", "A"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_editor_requires_a_signed_in_session() {
    let h = Harness::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let sessions = SessionManager::new();

    let signed_out = DashboardEditor::for_signed_in(Arc::clone(&h.gateway), notifier.clone(), &sessions);
    assert!(matches!(signed_out, Err(LinkpageError::Unauthorized(_))));

    sessions.sign_in(USER).unwrap();
    let editor = DashboardEditor::for_signed_in(Arc::clone(&h.gateway), notifier, &sessions).unwrap();
    assert_eq!(editor.session().user_id(), USER);
    assert_eq!(editor.load().await.unwrap().username, "user_4c3b2a19");
}
