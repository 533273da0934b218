mod provider_table;

pub use provider_table::{ProviderTable, NAME_PLACEHOLDER};
