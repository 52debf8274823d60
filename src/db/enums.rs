use serde::{Deserialize, Serialize};

/// Closed role set. Adding or removing a role is a compile-time-checked change
/// in every `match` over this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum Role {
    User,
    Manager,
    Admin,
}

/// Todo lifecycle state. Transitions are unconstrained; any state may move to
/// any other. `draft` is the only state a user may self-delete from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "todo_state", rename_all = "snake_case")]
pub enum TodoState {
    #[default]
    Draft,
    InProgress,
    Completed,
}

/// Fixed palette for list theme colors. The wire and storage form is the hex
/// string itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "list_theme")]
pub enum ListTheme {
    #[default]
    #[serde(rename = "#a8d5ba")]
    #[sqlx(rename = "#a8d5ba")]
    Sage,
    #[serde(rename = "#d4a5a5")]
    #[sqlx(rename = "#d4a5a5")]
    Clay,
    #[serde(rename = "#b8e0d2")]
    #[sqlx(rename = "#b8e0d2")]
    Mint,
    #[serde(rename = "#fbbf24")]
    #[sqlx(rename = "#fbbf24")]
    Amber,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_form_is_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn unknown_role_string_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }

    #[test]
    fn todo_state_wire_form_uses_underscores() {
        assert_eq!(
            serde_json::to_string(&TodoState::InProgress).unwrap(),
            "\"in_progress\""
        );
        let parsed: TodoState = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(parsed, TodoState::Draft);
    }

    #[test]
    fn todo_state_defaults_to_draft() {
        assert_eq!(TodoState::default(), TodoState::Draft);
    }

    #[test]
    fn list_theme_wire_form_is_hex_color() {
        assert_eq!(
            serde_json::to_string(&ListTheme::Amber).unwrap(),
            "\"#fbbf24\""
        );
        let parsed: ListTheme = serde_json::from_str("\"#a8d5ba\"").unwrap();
        assert_eq!(parsed, ListTheme::Sage);
        assert!(serde_json::from_str::<ListTheme>("\"#ffffff\"").is_err());
    }
}
