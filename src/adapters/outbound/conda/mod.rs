/// Package manager adapters
mod conda_cli;

pub use conda_cli::{CondaCli, DEFAULT_CONDA_EXECUTABLE};
