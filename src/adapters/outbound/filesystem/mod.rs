/// Filesystem adapters: package store scanning and report output
mod file_writer;
mod local_license_scanner;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use local_license_scanner::FileSystemLicenseScanner;
