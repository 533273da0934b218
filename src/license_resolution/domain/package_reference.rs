use std::fmt;

/// Binary distribution formats a conda channel serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// Legacy `.tar.bz2` package
    TarBz2,
    /// `.conda` package (zip container)
    Conda,
}

impl ArchiveFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::TarBz2 => "tar.bz2",
            ArchiveFormat::Conda => "conda",
        }
    }
}

/// PackageReference value object parsed from an archive identifier
///
/// An archive identifier is the URL of an installed package's binary
/// distribution, e.g.
/// `https://conda.anaconda.org/conda-forge/linux-64/blas-1.1-openblas.tar.bz2`.
/// All six components are non-empty; instances are only created by
/// `ReferenceParser::parse`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageReference {
    protocol: String,
    host: String,
    base_path: String,
    name: String,
    version: String,
    build: String,
    format: ArchiveFormat,
}

impl PackageReference {
    pub(crate) fn new(
        protocol: String,
        host: String,
        base_path: String,
        name: String,
        version: String,
        build: String,
        format: ArchiveFormat,
    ) -> Self {
        Self {
            protocol,
            host,
            base_path,
            name,
            version,
            build,
            format,
        }
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn format(&self) -> ArchiveFormat {
        self.format
    }

    /// Directory name conda uses when it extracts the package into its store
    pub fn install_dir_name(&self) -> String {
        format!("{}-{}-{}", self.name, self.version, self.build)
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}/{}-{}-{}.{}",
            self.protocol,
            self.host,
            self.base_path,
            self.name,
            self.version,
            self.build,
            self.format.extension()
        )
    }
}
