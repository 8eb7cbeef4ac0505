pub mod logging;
pub mod validation;

pub use logging::truncate_text;
