use super::*;
use crate::client::test_helpers::{MockApi, dummy_record};
use crate::listing::ListMode;
use crate::services::session::Role;

fn member(email: &str) -> SessionUser {
    SessionUser { email: email.into(), role: Role::Member }
}

// =============================================================================
// fetch cycle
// =============================================================================

#[tokio::test]
async fn refresh_replaces_rows() {
    let api = MockApi::with_rows(vec![dummy_record("1", "a@x.edu"), dummy_record("2", "b@x.edu")]);
    let mut view = ListView::new(RecordKind::Innovation);
    view.refresh(&api).await;
    assert_eq!(view.rows().len(), 2);
}

#[tokio::test]
async fn refresh_failure_keeps_previous_rows() {
    let api = MockApi::with_rows(vec![dummy_record("1", "a@x.edu")]);
    let mut view = ListView::new(RecordKind::Innovation);
    view.refresh(&api).await;
    assert_eq!(view.rows().len(), 1);

    let failing = MockApi::failing();
    view.refresh(&failing).await;
    assert_eq!(view.rows().len(), 1, "prior data stays on display");
}

#[tokio::test]
async fn refresh_sends_current_window() {
    let api = MockApi::default();
    let mut view = ListView::new(RecordKind::Project);
    view.pager_mut().set_page_size(25);
    view.pager_mut().set_page(2);
    view.refresh(&api).await;

    let requests = api.list_requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].from, 50);
    assert_eq!(requests[0].to, 75);
    assert_eq!(requests[0].mode, ListMode::Between);
}

// =============================================================================
// stale-response discard
// =============================================================================

#[test]
fn stale_response_is_discarded() {
    let mut view = ListView::new(RecordKind::Innovation);
    let (first, _) = view.begin_fetch();
    let (second, _) = view.begin_fetch();

    assert!(!view.apply(first, vec![dummy_record("old", "a@x.edu")]));
    assert!(view.rows().is_empty(), "stale rows never shown");

    assert!(view.apply(second, vec![dummy_record("new", "a@x.edu")]));
    assert_eq!(view.rows()[0].id, "new");
}

#[test]
fn late_stale_response_cannot_overwrite_newer() {
    let mut view = ListView::new(RecordKind::Event);
    let (first, _) = view.begin_fetch();
    let (second, _) = view.begin_fetch();

    assert!(view.apply(second, vec![dummy_record("current", "a@x.edu")]));
    assert!(!view.apply(first, vec![dummy_record("stale", "a@x.edu")]));
    assert_eq!(view.rows()[0].id, "current");
}

// =============================================================================
// local mutations
// =============================================================================

#[test]
fn remove_drops_deleted_id() {
    let mut view = ListView::new(RecordKind::Innovation);
    let (token, _) = view.begin_fetch();
    view.apply(token, vec![dummy_record("1", "a@x.edu"), dummy_record("2", "b@x.edu")]);

    view.remove("1");
    assert_eq!(view.rows().len(), 1);
    assert!(view.rows().iter().all(|r| r.id != "1"));
}

#[test]
fn remove_unknown_id_is_noop() {
    let mut view = ListView::new(RecordKind::Innovation);
    let (token, _) = view.begin_fetch();
    view.apply(token, vec![dummy_record("1", "a@x.edu")]);
    view.remove("9");
    assert_eq!(view.rows().len(), 1);
}

#[test]
fn replace_swaps_matching_row() {
    let mut view = ListView::new(RecordKind::Innovation);
    let (token, _) = view.begin_fetch();
    view.apply(token, vec![dummy_record("1", "a@x.edu")]);

    let mut updated = dummy_record("1", "a@x.edu");
    updated.title = "edited".into();
    view.replace(updated);
    assert_eq!(view.rows()[0].title, "edited");
}

// =============================================================================
// edit affordance
// =============================================================================

#[test]
fn edit_allowed_for_uploader_only() {
    let mut view = ListView::new(RecordKind::Innovation);
    let (token, _) = view.begin_fetch();
    view.apply(token, vec![dummy_record("1", "a@x.edu"), dummy_record("2", "b@x.edu")]);

    let user = member("a@x.edu");
    assert!(view.edit_allowed(&user, 0));
    assert!(!view.edit_allowed(&user, 1));
}

#[test]
fn edit_allowed_out_of_bounds_is_false() {
    let view = ListView::new(RecordKind::Innovation);
    assert!(!view.edit_allowed(&member("a@x.edu"), 0));
}

#[test]
fn edit_allowed_for_privileged_everywhere() {
    let mut view = ListView::new(RecordKind::Innovation);
    let (token, _) = view.begin_fetch();
    view.apply(token, vec![dummy_record("1", "a@x.edu")]);

    let dean = SessionUser { email: "dean@x.edu".into(), role: Role::Privileged };
    assert!(view.edit_allowed(&dean, 0));
}
