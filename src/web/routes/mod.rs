pub mod list_routes;
pub mod todo_routes;
pub mod user_routes;
