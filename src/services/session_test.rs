use super::*;

// =============================================================================
// Role::from_level
// =============================================================================

#[test]
fn level_one_is_privileged() {
    assert_eq!(Role::from_level(1), Role::Privileged);
}

#[test]
fn other_levels_are_member() {
    for level in [0, 2, 3, -1, 99] {
        assert_eq!(Role::from_level(level), Role::Member, "level {level}");
    }
}

// =============================================================================
// SessionUser
// =============================================================================

#[test]
fn session_user_serializes_role_lowercase() {
    let user = SessionUser { email: "dean@example.edu".into(), role: Role::Privileged };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["email"], "dean@example.edu");
    assert_eq!(json["role"], "privileged");
}

#[test]
fn session_user_clone() {
    let user = SessionUser { email: "a@b.edu".into(), role: Role::Member };
    let cloned = user.clone();
    assert_eq!(cloned.email, user.email);
    assert_eq!(cloned.role, user.role);
}
