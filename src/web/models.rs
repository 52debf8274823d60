use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::enums::{ListTheme, TodoState};

/// JWT claims issued by the external identity provider. Only the subject (the
/// user id) is trusted; the current role is re-read from the store per request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTodosQuery {
    pub list_id: Option<Uuid>,
}

/// Create payload. Deliberately no owner field: the created todo is always
/// self-owned, and any stray `ownerId` in the body is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub list_id: Uuid,
    pub description: Option<String>,
    pub state: Option<TodoState>,
    pub due_at: Option<String>,
}

/// Explicit whitelist of mutable fields for a partial update. Unknown fields,
/// notably `ownerId` and `id`, are rejected outright rather than applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTodoRequest {
    pub name: Option<String>,
    /// Double-`Option`: an absent field leaves the description untouched,
    /// an explicit `null` (or empty string) clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub state: Option<TodoState>,
    pub due_at: Option<String>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub title: String,
    pub theme_color: Option<ListTheme>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_rejects_owner_injection() {
        let body = r#"{"name": "renamed", "ownerId": "someone-else"}"#;
        assert!(serde_json::from_str::<UpdateTodoRequest>(body).is_err());
    }

    #[test]
    fn update_request_rejects_id_injection() {
        let body = r#"{"id": "f6aa6fd4-587f-4c9e-84a6-1cbd2bd361d6"}"#;
        assert!(serde_json::from_str::<UpdateTodoRequest>(body).is_err());
    }

    #[test]
    fn update_request_accepts_partial_body() {
        let body = r#"{"state": "in_progress"}"#;
        let req: UpdateTodoRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.state, Some(TodoState::InProgress));
        assert!(req.name.is_none());
        assert!(req.description.is_none());
        assert!(req.due_at.is_none());
    }

    #[test]
    fn update_request_distinguishes_null_from_absent_description() {
        let absent: UpdateTodoRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let null: UpdateTodoRequest = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: UpdateTodoRequest =
            serde_json::from_str(r#"{"description": "two bottles"}"#).unwrap();
        assert_eq!(set.description, Some(Some("two bottles".to_string())));
    }

    #[test]
    fn create_request_ignores_stray_owner_field() {
        // The create payload tolerates unknown fields; ownership is forced to
        // the actor downstream regardless of what the body claims.
        let body = r#"{
            "name": "Buy milk",
            "listId": "f6aa6fd4-587f-4c9e-84a6-1cbd2bd361d6",
            "ownerId": "spoofed"
        }"#;
        let req: CreateTodoRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.name, "Buy milk");
        assert!(req.state.is_none());
    }
}
