pub mod draft_loader;
pub mod pdf_exporter;

pub use draft_loader::{DraftLoader, RecommendationPlan};
pub use pdf_exporter::PdfExporter;
