use crate::license_resolution::domain::{ArchiveFormat, PackageReference};
use crate::shared::error::ResolutionError;
use crate::shared::ResolutionResult;
use regex::Regex;
use std::sync::LazyLock;

/// `<proto>://<host>/<base-path>/<name>-<version>-<build>.<archive-ext>`
///
/// Exactly six capture groups, anchored on both ends. The base path holds
/// at least two segments (channel and subdir); version and build never
/// contain a hyphen, so a hyphenated name is matched greedily.
static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(https?)://([^/]+)/([^/]+(?:/[^/]+)+)/([^/]+)-([^/-]+)-([^/-]+)\.(?:tar\.bz2|conda)$",
    )
    .expect("archive identifier pattern must compile")
});

/// ReferenceParser service turning archive identifiers into PackageReferences
pub struct ReferenceParser;

impl ReferenceParser {
    /// Parses an archive identifier.
    ///
    /// Leading and trailing whitespace is ignored; anything else that does
    /// not fit the canonical shape fails with `MalformedReference`.
    pub fn parse(identifier: &str) -> ResolutionResult<PackageReference> {
        let trimmed = identifier.trim();
        let malformed = || ResolutionError::MalformedReference {
            identifier: identifier.to_string(),
        };

        let captures = IDENTIFIER_PATTERN.captures(trimmed).ok_or_else(malformed)?;
        let group = |index: usize| -> ResolutionResult<String> {
            captures
                .get(index)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(malformed)
        };

        let format = if trimmed.ends_with(".conda") {
            ArchiveFormat::Conda
        } else {
            ArchiveFormat::TarBz2
        };

        Ok(PackageReference::new(
            group(1)?,
            group(2)?,
            group(3)?,
            group(4)?,
            group(5)?,
            group(6)?,
            format,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blas_identifier() {
        let reference = ReferenceParser::parse(
            "https://conda.anaconda.org/conda-forge/linux-64/blas-1.1-openblas.tar.bz2",
        )
        .unwrap();

        assert_eq!(reference.protocol(), "https");
        assert_eq!(reference.host(), "conda.anaconda.org");
        assert_eq!(reference.base_path(), "conda-forge/linux-64");
        assert_eq!(reference.name(), "blas");
        assert_eq!(reference.version(), "1.1");
        assert_eq!(reference.build(), "openblas");
        assert_eq!(reference.format(), ArchiveFormat::TarBz2);
    }

    #[test]
    fn test_parse_dotted_name() {
        let reference = ReferenceParser::parse(
            "https://conda.anaconda.org/conda-forge/linux-64/backports.shutil_get_terminal_size-1.0.0-py35_0.tar.bz2",
        )
        .unwrap();

        assert_eq!(reference.name(), "backports.shutil_get_terminal_size");
        assert_eq!(reference.version(), "1.0.0");
        assert_eq!(reference.build(), "py35_0");
    }

    #[test]
    fn test_parse_hyphenated_name() {
        let reference = ReferenceParser::parse(
            "https://repo.anaconda.com/pkgs/main/noarch/python-dateutil-2.8.2-pyhd3eb1b0_0.conda",
        )
        .unwrap();

        assert_eq!(reference.host(), "repo.anaconda.com");
        assert_eq!(reference.base_path(), "pkgs/main/noarch");
        assert_eq!(reference.name(), "python-dateutil");
        assert_eq!(reference.version(), "2.8.2");
        assert_eq!(reference.build(), "pyhd3eb1b0_0");
        assert_eq!(reference.format(), ArchiveFormat::Conda);
    }

    #[test]
    fn test_parse_recombines_to_input() {
        let identifiers = [
            "https://conda.anaconda.org/conda-forge/linux-64/blas-1.1-openblas.tar.bz2",
            "http://repo.continuum.io/pkgs/free/osx-64/six-1.10.0-py35_0.tar.bz2",
            "https://repo.anaconda.com/pkgs/main/linux-64/libgcc-ng-11.2.0-h1234567_1.conda",
            "https://conda.anaconda.org/conda-forge/noarch/cycler-0.10.0-py_2.tar.bz2",
        ];

        for identifier in identifiers {
            let reference = ReferenceParser::parse(identifier).unwrap();
            assert_eq!(reference.to_string(), identifier);
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let reference = ReferenceParser::parse(
            "  https://conda.anaconda.org/conda-forge/linux-64/blas-1.1-openblas.tar.bz2\n",
        )
        .unwrap();
        assert_eq!(reference.name(), "blas");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let identifiers = [
            "",
            "@EXPLICIT",
            "# platform: linux-64",
            // Trailing characters after the extension
            "https://conda.anaconda.org/conda-forge/linux-64/blas-1.1-openblas.tar.bz2.part",
            "https://conda.anaconda.org/conda-forge/linux-64/blas-1.1-openblas.tar.bz2#abc123",
            // Unknown extension
            "https://conda.anaconda.org/conda-forge/linux-64/blas-1.1-openblas.zip",
            // Only one base path segment
            "https://conda.anaconda.org/linux-64/blas-1.1-openblas.tar.bz2",
            // Missing build tag
            "https://conda.anaconda.org/conda-forge/linux-64/blas-1.1.tar.bz2",
            // Unsupported protocol
            "file:///opt/channel/linux-64/blas-1.1-openblas.tar.bz2",
            "ftp://conda.anaconda.org/conda-forge/linux-64/blas-1.1-openblas.tar.bz2",
        ];

        for identifier in identifiers {
            match ReferenceParser::parse(identifier) {
                Err(ResolutionError::MalformedReference { identifier: found }) => {
                    assert_eq!(found, identifier);
                }
                other => panic!("expected MalformedReference for {:?}, got {:?}", identifier, other),
            }
        }
    }
}
