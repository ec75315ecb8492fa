use super::*;

fn member(email: &str) -> SessionUser {
    SessionUser { email: email.into(), role: Role::Member }
}

fn privileged(email: &str) -> SessionUser {
    SessionUser { email: email.into(), role: Role::Privileged }
}

#[test]
fn privileged_edits_any_record() {
    assert!(can_edit(&privileged("dean@example.edu"), "someone@example.edu"));
}

#[test]
fn uploader_edits_own_record() {
    assert!(can_edit(&member("prof@example.edu"), "prof@example.edu"));
}

#[test]
fn member_cannot_edit_others_record() {
    assert!(!can_edit(&member("prof@example.edu"), "other@example.edu"));
}

#[test]
fn email_match_is_exact() {
    assert!(!can_edit(&member("Prof@example.edu"), "prof@example.edu"));
    assert!(!can_edit(&member("prof@example.edu "), "prof@example.edu"));
}

#[test]
fn privileged_uploader_still_allowed() {
    assert!(can_edit(&privileged("dean@example.edu"), "dean@example.edu"));
}
