pub mod http_executor;

#[cfg(test)]
pub(crate) mod stub_backend;

pub use http_executor::{Download, HttpExecutor, Upload};
