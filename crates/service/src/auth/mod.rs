//! Auth module: password hashing, login tokens and the login/current-user workflows.

pub mod domain;
pub mod password;
pub mod token;
pub mod service;

pub use service::{current_user, login};
