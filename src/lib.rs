//! TodoFlow backend: a multi-user todo service with role-based visibility and
//! mutation rules. The authorization engine in [`authz`] decides what each
//! actor may see or change; [`db`] owns persistence; [`web`] wires the HTTP
//! surface together.

pub mod authz;
pub mod config;
pub mod db;
pub mod web;
