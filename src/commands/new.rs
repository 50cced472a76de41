//! Create a new document

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::Kind;
use crate::Site;

/// Scaffold a document of `kind`. The slug defaults to the slugified title.
pub fn create_document(site: &Site, kind: Kind, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let spec = kind.spec();
    let slug = match slug {
        Some(s) => s.trim().to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() || slug.contains(['/', '\\']) {
        anyhow::bail!("Invalid slug {:?}; pass one with --slug", slug);
    }

    let target_dir = site.content_dir.join(spec.dir);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let mut content = String::from("---\n");
    content.push_str(&format!("title: {}\n", yaml_string(title)));
    content.push_str(&format!("date: {}\n", now.format("%Y-%m-%d")));
    content.push_str("description: ''\n");
    if spec.has_tags {
        content.push_str("tags: []\n");
    }
    content.push_str("---\n\n");

    fs::write(&file_path, content)?;
    tracing::info!("Created {} {} at {:?}", kind, spec.url(&slug), file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(site: &Site, kind: Kind, title: &str, slug: Option<&str>) -> Result<()> {
    let path = create_document(site, kind, title, slug)?;
    println!("Created: {:?}", path);
    Ok(())
}

/// Quote a scalar so titles like `Rust: notes` stay valid YAML
fn yaml_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use tempfile::TempDir;

    #[test]
    fn test_created_document_loads() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        let path = create_document(&site, Kind::Blog, "Rust: it's fun", None).unwrap();
        assert!(path.ends_with("content/blog/rust-it-s-fun.md"));

        let blog = ContentLoader::new(&site).load(Kind::Blog).unwrap();
        let doc = blog.resolve("rust-it-s-fun").unwrap();
        assert_eq!(doc.title, "Rust: it's fun");
        assert_eq!(doc.description, "");
    }

    #[test]
    fn test_explicit_slug_and_existing_file() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        let path = create_document(&site, Kind::Note, "周末散步", Some("weekend-walk")).unwrap();
        assert!(path.ends_with("content/notes/weekend-walk.md"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("tags:"));

        assert!(create_document(&site, Kind::Note, "again", Some("weekend-walk")).is_err());
        assert!(create_document(&site, Kind::Note, "bad", Some("a/b")).is_err());
    }
}
