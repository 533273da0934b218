use crate::license_resolution::domain::RecipeMetadata;
use crate::license_resolution::services::RecipeRenderer;
use crate::shared::error::ResolutionError;
use crate::shared::ResolutionResult;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.into_iter().next(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecipeDocument {
    #[serde(default)]
    source: Option<OneOrMany<RecipeSource>>,
}

#[derive(Debug, Deserialize)]
struct RecipeSource {
    #[serde(default)]
    url: Option<OneOrMany<String>>,
    #[serde(default, rename = "fn")]
    filename: Option<String>,
}

/// RecipeReader service extracting the upstream source from a recipe document
pub struct RecipeReader;

impl RecipeReader {
    /// Reads `document` (fetched from `metadata_url`) into RecipeMetadata.
    ///
    /// The first `source` entry is used, and the first of its URLs when it
    /// lists mirrors. The archive name is `source.fn`, or the last path
    /// segment of the URL when the recipe omits `fn`.
    ///
    /// # Errors
    /// - `MetadataFetchError` if the document is not valid YAML or has no source URL
    /// - `UnexpectedArchiveFormat` if the archive name does not end in `.tar.gz`
    pub fn read(
        package_name: &str,
        metadata_url: &str,
        document: &str,
    ) -> ResolutionResult<RecipeMetadata> {
        let fetch_error = |details: String| ResolutionError::MetadataFetchError {
            url: metadata_url.to_string(),
            details,
        };

        let rendered = RecipeRenderer::render(document);
        let recipe: RecipeDocument = serde_yaml_ng::from_str(&rendered)
            .map_err(|e| fetch_error(format!("invalid recipe document: {}", e)))?;

        let source = recipe
            .source
            .and_then(OneOrMany::into_first)
            .ok_or_else(|| fetch_error("recipe has no source section".to_string()))?;

        let source_url = source
            .url
            .and_then(OneOrMany::into_first)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| fetch_error("recipe source has no url".to_string()))?;

        let filename = match source.filename {
            Some(filename) => filename.trim().to_string(),
            None => Self::filename_from_url(&source_url)
                .ok_or_else(|| fetch_error(format!("cannot derive archive name from {}", source_url)))?,
        };

        RecipeMetadata::new(package_name.to_string(), source_url, &filename)
    }

    fn filename_from_url(url: &str) -> Option<String> {
        let path = url.split(['?', '#']).next()?;
        path.rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const META_URL: &str = "https://raw.githubusercontent.com/conda-forge/six-feedstock/master/recipe/meta.yaml";

    #[test]
    fn test_read_source_with_fn() {
        let document = r#"
package:
  name: six
  version: 1.10.0
source:
  fn: six-1.10.0.tar.gz
  url: https://pypi.io/packages/source/s/six/six-1.10.0.tar.gz
  md5: 34eed507548117b2ab523ab14b2f8b55
"#;
        let metadata = RecipeReader::read("six", META_URL, document).unwrap();
        assert_eq!(metadata.package_name(), "six");
        assert_eq!(
            metadata.source_url(),
            "https://pypi.io/packages/source/s/six/six-1.10.0.tar.gz"
        );
        assert_eq!(metadata.archive_base(), "six-1.10.0");
    }

    #[test]
    fn test_read_templated_recipe() {
        let document = r#"{% set name = "cycler" %}
{% set version = "0.10.0" %}

package:
  name: {{ name }}
  version: {{ version }}

source:
  fn: {{ name }}-{{ version }}.tar.gz
  url: https://pypi.io/packages/source/{{ name[0] }}/{{ name }}/{{ name }}-{{ version }}.tar.gz
"#;
        let metadata = RecipeReader::read("cycler", META_URL, document).unwrap();
        assert_eq!(metadata.archive_filename(), "cycler-0.10.0.tar.gz");
        assert_eq!(
            metadata.source_url(),
            "https://pypi.io/packages/source/c/cycler/cycler-0.10.0.tar.gz"
        );
    }

    #[test]
    fn test_read_source_list_and_mirror_list() {
        let document = r#"
source:
  - url:
      - https://mirror-a.example.org/zlib-1.2.11.tar.gz
      - https://mirror-b.example.org/zlib-1.2.11.tar.gz
  - path: patches
"#;
        let metadata = RecipeReader::read("zlib", META_URL, document).unwrap();
        assert_eq!(
            metadata.source_url(),
            "https://mirror-a.example.org/zlib-1.2.11.tar.gz"
        );
        assert_eq!(metadata.archive_base(), "zlib-1.2.11");
    }

    #[test]
    fn test_read_without_fn_uses_url_segment() {
        let document = "source:\n  url: https://example.org/dl/pkg-2.0.tar.gz?download=1\n";
        let metadata = RecipeReader::read("pkg", META_URL, document).unwrap();
        assert_eq!(metadata.archive_filename(), "pkg-2.0.tar.gz");
    }

    #[test]
    fn test_read_rejects_non_tar_gz() {
        let document = "source:\n  fn: pkg-2.0.zip\n  url: https://example.org/pkg-2.0.zip\n";
        let result = RecipeReader::read("pkg", META_URL, document);
        assert!(matches!(
            result,
            Err(ResolutionError::UnexpectedArchiveFormat { ref filename, .. }) if filename == "pkg-2.0.zip"
        ));
    }

    #[test]
    fn test_read_git_source_has_no_url() {
        let document = "source:\n  git_url: https://github.com/example/pkg.git\n";
        let result = RecipeReader::read("pkg", META_URL, document);
        match result {
            Err(ResolutionError::MetadataFetchError { url, details }) => {
                assert_eq!(url, META_URL);
                assert!(details.contains("no url"));
            }
            other => panic!("expected MetadataFetchError, got {:?}", other),
        }
    }

    #[test]
    fn test_read_missing_source() {
        let document = "package:\n  name: pkg\n";
        let result = RecipeReader::read("pkg", META_URL, document);
        assert!(matches!(
            result,
            Err(ResolutionError::MetadataFetchError { ref details, .. }) if details.contains("no source")
        ));
    }

    #[test]
    fn test_read_invalid_yaml() {
        let document = "source: [unclosed";
        let result = RecipeReader::read("pkg", META_URL, document);
        assert!(matches!(
            result,
            Err(ResolutionError::MetadataFetchError { ref details, .. }) if details.contains("invalid recipe document")
        ));
    }
}
