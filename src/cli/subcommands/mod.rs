pub mod admin;
pub mod auth;
pub mod catalog;
pub mod student;

pub use admin::AdminCommands;
pub use auth::AuthCommands;
pub use catalog::CatalogCommands;
pub use student::StudentCommands;
