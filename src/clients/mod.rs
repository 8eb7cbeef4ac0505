pub mod admin_client;
pub mod auth_client;
pub mod catalog_client;
pub mod student_client;

pub use admin_client::{AdminApi, AdminClient};
pub use auth_client::AuthClient;
pub use catalog_client::{CatalogApi, CatalogClient};
pub use student_client::{StudentApi, StudentClient};
