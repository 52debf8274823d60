//! The authorization engine: pure decision logic for todo visibility and
//! mutation. Given an actor and a target, every function here either yields a
//! filter specification for reads or an allow/deny decision for writes.
//! No I/O happens in this module; callers execute the resulting decisions
//! against the store.

use thiserror::Error;
use uuid::Uuid;

use crate::db::enums::{Role, TodoState};
use crate::db::models::Todo;

/// The authenticated user a request acts on behalf of, as resolved by the
/// auth middleware.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

/// A denied decision, carrying the human-readable reason for the violated
/// rule. Mapped to HTTP 403 at the web layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("Only users can create todos")]
    CreateRequiresUserRole,
    #[error("You can only update your own todos")]
    UpdateNotOwner,
    #[error("You can only delete your own todos")]
    DeleteNotOwner,
    #[error("Users can only delete draft todos")]
    DeleteNotDraft,
    #[error("Managers cannot delete todos")]
    ManagerDelete,
}

/// Immutable filter specification for a todo read, built once per request and
/// handed to the store. Both scopes combine with AND; a user can never see
/// another owner's todos regardless of list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoReadScope {
    /// `Some(owner_id)` restricts visibility to that owner's todos.
    pub owner_scope: Option<String>,
    /// `Some(list_id)` narrows the result to a single list.
    pub list_scope: Option<Uuid>,
    /// Whether read results carry the owner's public identity.
    pub with_owner_identity: bool,
}

/// Builds the read filter for `list` operations. Managers and admins see every
/// todo in the system (optionally narrowed by list) with owner identity
/// attached; users see only their own todos.
pub fn read_scope(actor: &Actor, list_filter: Option<Uuid>) -> TodoReadScope {
    match actor.role {
        Role::Manager | Role::Admin => TodoReadScope {
            owner_scope: None,
            list_scope: list_filter,
            with_owner_identity: true,
        },
        Role::User => TodoReadScope {
            owner_scope: Some(actor.id.clone()),
            list_scope: list_filter,
            with_owner_identity: false,
        },
    }
}

/// Only actors with the `user` role create todos; the new todo is always
/// self-owned.
pub fn authorize_create(actor: &Actor) -> Result<(), Denial> {
    match actor.role {
        Role::User => Ok(()),
        Role::Manager | Role::Admin => Err(Denial::CreateRequiresUserRole),
    }
}

/// Users may update only their own todos. Managers and admins update any todo
/// unconditionally; that asymmetry with the delete rule is intentional and
/// preserved as observed.
pub fn authorize_update(actor: &Actor, todo: &Todo) -> Result<(), Denial> {
    match actor.role {
        Role::User if todo.owner_id != actor.id => Err(Denial::UpdateNotOwner),
        Role::User | Role::Manager | Role::Admin => Ok(()),
    }
}

/// The three-way delete switch. Ownership is checked before state for users,
/// so a non-owner is told about ownership, not about draft state.
pub fn authorize_delete(actor: &Actor, todo: &Todo) -> Result<(), Denial> {
    match actor.role {
        Role::User => {
            if todo.owner_id != actor.id {
                return Err(Denial::DeleteNotOwner);
            }
            if todo.state != TodoState::Draft {
                return Err(Denial::DeleteNotDraft);
            }
            Ok(())
        }
        Role::Manager => Err(Denial::ManagerDelete),
        Role::Admin => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn actor(id: &str, role: Role) -> Actor {
        Actor {
            id: id.to_string(),
            role,
        }
    }

    fn todo_owned_by(owner_id: &str, state: TodoState) -> Todo {
        let now = Utc::now();
        Todo {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            list_id: Uuid::new_v4(),
            name: "Buy milk".to_string(),
            description: None,
            state,
            due_at: None,
            order_index: 0,
            created_on: now,
            updated_on: now,
        }
    }

    #[test]
    fn user_read_scope_is_owner_restricted() {
        let scope = read_scope(&actor("u1", Role::User), None);
        assert_eq!(scope.owner_scope.as_deref(), Some("u1"));
        assert_eq!(scope.list_scope, None);
        assert!(!scope.with_owner_identity);
    }

    #[test]
    fn user_read_scope_combines_owner_and_list_filter() {
        let list_id = Uuid::new_v4();
        let scope = read_scope(&actor("u1", Role::User), Some(list_id));
        assert_eq!(scope.owner_scope.as_deref(), Some("u1"));
        assert_eq!(scope.list_scope, Some(list_id));
    }

    #[test]
    fn elevated_read_scope_sees_all_owners_with_identity() {
        for role in [Role::Manager, Role::Admin] {
            let scope = read_scope(&actor("m1", role), None);
            assert_eq!(scope.owner_scope, None);
            assert!(scope.with_owner_identity);
        }
    }

    #[test]
    fn elevated_read_scope_keeps_list_filter() {
        let list_id = Uuid::new_v4();
        let scope = read_scope(&actor("a1", Role::Admin), Some(list_id));
        assert_eq!(scope.owner_scope, None);
        assert_eq!(scope.list_scope, Some(list_id));
    }

    #[test]
    fn only_users_can_create_todos() {
        assert!(authorize_create(&actor("u1", Role::User)).is_ok());
        for role in [Role::Manager, Role::Admin] {
            let denial = authorize_create(&actor("x", role)).unwrap_err();
            assert_eq!(denial, Denial::CreateRequiresUserRole);
            assert_eq!(denial.to_string(), "Only users can create todos");
        }
    }

    #[test]
    fn user_updates_own_todo_only() {
        let todo = todo_owned_by("u1", TodoState::InProgress);
        assert!(authorize_update(&actor("u1", Role::User), &todo).is_ok());

        let denial = authorize_update(&actor("u2", Role::User), &todo).unwrap_err();
        assert_eq!(denial, Denial::UpdateNotOwner);
        assert_eq!(denial.to_string(), "You can only update your own todos");
    }

    #[test]
    fn elevated_roles_update_any_todo() {
        let todo = todo_owned_by("u1", TodoState::Completed);
        assert!(authorize_update(&actor("m1", Role::Manager), &todo).is_ok());
        assert!(authorize_update(&actor("a1", Role::Admin), &todo).is_ok());
    }

    #[test]
    fn user_deletes_own_draft_todo() {
        let todo = todo_owned_by("u1", TodoState::Draft);
        assert!(authorize_delete(&actor("u1", Role::User), &todo).is_ok());
    }

    #[test]
    fn user_cannot_delete_non_draft_todo() {
        for state in [TodoState::InProgress, TodoState::Completed] {
            let todo = todo_owned_by("u1", state);
            let denial = authorize_delete(&actor("u1", Role::User), &todo).unwrap_err();
            assert_eq!(denial, Denial::DeleteNotDraft);
            assert_eq!(denial.to_string(), "Users can only delete draft todos");
        }
    }

    #[test]
    fn user_cannot_delete_foreign_todo() {
        // Ownership is checked before state: even a draft todo of another
        // owner reports the ownership denial.
        let todo = todo_owned_by("u1", TodoState::Draft);
        let denial = authorize_delete(&actor("u2", Role::User), &todo).unwrap_err();
        assert_eq!(denial, Denial::DeleteNotOwner);
        assert_eq!(denial.to_string(), "You can only delete your own todos");
    }

    #[test]
    fn manager_never_deletes() {
        for state in [TodoState::Draft, TodoState::InProgress, TodoState::Completed] {
            let todo = todo_owned_by("m1", state);
            let denial = authorize_delete(&actor("m1", Role::Manager), &todo).unwrap_err();
            assert_eq!(denial, Denial::ManagerDelete);
            assert_eq!(denial.to_string(), "Managers cannot delete todos");
        }
    }

    #[test]
    fn admin_deletes_anything() {
        for state in [TodoState::Draft, TodoState::InProgress, TodoState::Completed] {
            let todo = todo_owned_by("someone-else", state);
            assert!(authorize_delete(&actor("a1", Role::Admin), &todo).is_ok());
        }
    }
}
