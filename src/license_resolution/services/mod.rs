mod audit_metadata_generator;
mod recipe_reader;
mod recipe_renderer;
mod reference_parser;

pub use audit_metadata_generator::{AuditMetadataGenerator, TOOL_NAME};
pub use recipe_reader::RecipeReader;
pub use recipe_renderer::RecipeRenderer;
pub use reference_parser::ReferenceParser;
