//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::Field;
use crate::helpers::date::parse_date_string;

/// `tags: rust` and `tags: [rust, web]` both work; `tags:` alone is empty
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
    Empty(()),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(tag) => vec![tag],
        OneOrMany::Many(tags) => tags,
        OneOrMany::Empty(()) => Vec::new(),
    })
}

/// Front-matter block of a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "one_or_many", default)]
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Split `content` into front-matter and body
    ///
    /// A file without a `---` block yields an empty front-matter; a block that
    /// is present but not valid YAML is an error.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches([' ', '\t']);
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .ok_or_else(|| anyhow!("opening `---` must be on its own line"))?;

        let (yaml_content, remaining) = split_closing_fence(rest)
            .ok_or_else(|| anyhow!("unterminated front-matter block (missing closing `---`)"))?;
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map_err(|e| anyhow!("failed to parse YAML front-matter: {}", e))?;
        Ok((fm, remaining))
    }

    /// Whether `field` is set; a blank title counts as unset
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Title => self.title.as_deref().is_some_and(|t| !t.trim().is_empty()),
            Field::Date => self.date.is_some(),
            Field::Description => self.description.is_some(),
        }
    }

    /// Parse the date string into a date-time
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Split at the first line consisting only of `---`
fn split_closing_fence(s: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in s.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']).trim_end() == "---" {
            return Some((&s[..offset], &s[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_frontmatter() {
        let content = "---\ntitle: Rust 所有权\ndate: 2024-01-15 10:30:00\ndescription: ownership notes\ntags:\n  - rust\n  - memory\n---\n\nBorrowing rules.\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Rust 所有权"));
        assert_eq!(fm.description.as_deref(), Some("ownership notes"));
        assert_eq!(fm.tags, vec!["rust", "memory"]);
        assert_eq!(body, "Borrowing rules.\n");

        let date = fm.parse_date().unwrap();
        assert_eq!(date.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");
    }

    #[test]
    fn test_tag_shapes() {
        let (single, _) = FrontMatter::parse("---\ntags: life\n---\n").unwrap();
        assert_eq!(single.tags, vec!["life"]);

        let (null, _) = FrontMatter::parse("---\ntitle: t\ntags:\n---\n").unwrap();
        assert!(null.tags.is_empty());

        let (absent, _) = FrontMatter::parse("---\ntitle: t\n---\n").unwrap();
        assert!(absent.tags.is_empty());
        assert!(absent.date.is_none());
    }

    #[test]
    fn test_duplicate_tags_kept_in_order() {
        let content = "---\ntags: [b, a, b]\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("# Just markdown\n").unwrap();
        assert!(fm.title.is_none());
        assert!(fm.date.is_none());
        assert_eq!(remaining, "# Just markdown\n");
    }

    #[test]
    fn test_unterminated_block_is_error() {
        let content = "---\ntitle: Oops\n\nNo closing fence.\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nbody\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_body_separator_after_frontmatter() {
        let content = "---\ntitle: T\n---\nintro\n\n---\n\nmore\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("T".to_string()));
        assert!(remaining.contains("intro"));
        assert!(remaining.contains("more"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let content = "---\ntitle: T\ncover: /img/a.png\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_has_field() {
        let (fm, _) = FrontMatter::parse("---\ntitle: \"  \"\ndescription: ''\n---\n").unwrap();
        assert!(!fm.has(Field::Title));
        assert!(!fm.has(Field::Date));
        assert!(fm.has(Field::Description));
    }
}
