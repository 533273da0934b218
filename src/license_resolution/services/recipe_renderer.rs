use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static SET_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{%-?\s*set\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s%]+))\s*-?%\}"#)
        .expect("set statement pattern must compile")
});

static STATEMENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\{%.*%\}\s*$").expect("statement line pattern must compile")
});

static EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?:\[\s*(\d+)\s*\])?\s*(?:\|\s*(lower|upper)\s*)?\}\}",
    )
    .expect("expression pattern must compile")
});

/// RecipeRenderer - minimal template rendering for conda recipe files
///
/// Recipes are Jinja templates. Only the subset needed to recover a source
/// URL is understood: `{% set %}` with a literal value, and `{{ var }}`
/// optionally indexed (`name[0]`) or filtered through `lower` / `upper`.
/// Other statement lines are dropped; unknown expressions are left untouched
/// so the YAML parser rejects them instead of receiving a guessed value.
pub struct RecipeRenderer;

impl RecipeRenderer {
    pub fn render(template: &str) -> String {
        let variables = Self::collect_variables(template);

        template
            .lines()
            .filter(|line| !STATEMENT_LINE.is_match(line))
            .map(|line| Self::substitute(line, &variables))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect_variables(template: &str) -> HashMap<String, String> {
        let mut variables = HashMap::new();
        for captures in SET_STATEMENT.captures_iter(template) {
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .or_else(|| captures.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            variables.insert(captures[1].to_string(), value);
        }
        variables
    }

    fn substitute(line: &str, variables: &HashMap<String, String>) -> String {
        EXPRESSION
            .replace_all(line, |captures: &Captures| {
                let Some(value) = variables.get(&captures[1]) else {
                    return captures[0].to_string();
                };

                let value = match captures.get(2) {
                    Some(index) => {
                        let index: usize = index.as_str().parse().unwrap_or(usize::MAX);
                        match value.chars().nth(index) {
                            Some(c) => c.to_string(),
                            None => return captures[0].to_string(),
                        }
                    }
                    None => value.clone(),
                };

                match captures.get(3).map(|m| m.as_str()) {
                    Some("lower") => value.to_lowercase(),
                    Some("upper") => value.to_uppercase(),
                    _ => value,
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_yaml_unchanged() {
        let yaml = "package:\n  name: six\n  version: 1.10.0";
        assert_eq!(RecipeRenderer::render(yaml), yaml);
    }

    #[test]
    fn test_render_substitutes_set_variables() {
        let recipe = r#"{% set name = "Cycler" %}
{% set version = '0.10.0' %}
{% set build = 2 %}

source:
  fn: {{ name|lower }}-{{ version }}.tar.gz
  url: https://pypi.io/packages/source/{{ name[0] }}/{{ name }}/{{ name|lower }}-{{ version }}.tar.gz
build:
  number: {{ build }}"#;

        let rendered = RecipeRenderer::render(recipe);
        assert!(rendered.contains("fn: cycler-0.10.0.tar.gz"));
        assert!(rendered
            .contains("url: https://pypi.io/packages/source/C/Cycler/cycler-0.10.0.tar.gz"));
        assert!(rendered.contains("number: 2"));
        assert!(!rendered.contains("{%"));
    }

    #[test]
    fn test_render_drops_control_statements() {
        let recipe = "requirements:\n  {% if win %}\n  - m2w64\n  {% endif %}\n  - python";
        let rendered = RecipeRenderer::render(recipe);
        assert_eq!(rendered, "requirements:\n  - m2w64\n  - python");
    }

    #[test]
    fn test_render_leaves_unknown_expressions() {
        let recipe = "url: https://example.org/{{ version.replace('-', '_') }}.tar.gz";
        assert_eq!(RecipeRenderer::render(recipe), recipe);

        let recipe = "url: https://example.org/{{ undefined }}.tar.gz";
        assert_eq!(RecipeRenderer::render(recipe), recipe);
    }

    #[test]
    fn test_render_handles_whitespace_control() {
        let recipe = "{%- set version = \"2.0\" -%}\nversion: {{version}}";
        assert_eq!(RecipeRenderer::render(recipe), "version: 2.0");
    }
}
