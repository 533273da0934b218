/// Network adapters: recipe metadata and upstream source archives over HTTP
mod archive_client;
mod caching_recipe_client;
mod recipe_metadata_client;

pub use archive_client::{
    HttpArchiveLicenseScanner, DEFAULT_MAX_ARCHIVE_BYTES, DEFAULT_MAX_ENTRY_BYTES,
};
pub use caching_recipe_client::CachingRecipeMetadataRepository;
pub use recipe_metadata_client::{build_http_client, HttpRecipeMetadataRepository};
