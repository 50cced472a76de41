//! Content loader - loads one collection per kind from the content directory

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{
    Body, Collection, Document, Field, FrontMatter, Kind, KindSpec, Library, MarkdownRenderer,
};
use crate::error::{DocumentError, LoadError};
use crate::Site;

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::from_config(&site.config);
        Self { site, renderer }
    }

    /// Load every kind. Fails if any document of any kind fails.
    pub fn load_all(&self) -> Result<Library, LoadError> {
        let mut collections = Vec::new();
        let mut errors = Vec::new();

        for kind in Kind::ALL {
            match self.load(kind) {
                Ok(collection) => collections.push(collection),
                Err(e) => errors.push(e),
            }
        }

        match LoadError::merge(errors) {
            Some(err) => Err(err),
            None => Ok(Library::from_collections(collections)),
        }
    }

    /// Load all documents of one kind
    ///
    /// Every file is checked before giving up, so a single run reports all
    /// broken files.
    pub fn load(&self, kind: Kind) -> Result<Collection, LoadError> {
        let spec = kind.spec();
        let root = &self.site.content_dir;
        let dir = root.join(spec.dir);

        if !dir.exists() {
            tracing::debug!("No {} directory at {:?}", kind, dir);
            return Ok(Collection::empty(kind));
        }

        let mut documents = Vec::new();
        let mut failures = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone());
                    failures.push(DocumentError::Io {
                        path,
                        source: e.into(),
                    });
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            if !spec.matches(relative) {
                tracing::debug!("Skipping {:?}: not a {} document", relative, kind);
                continue;
            }

            // Claim the slug before validating so a broken first file still
            // reports a later file with the same name
            let duplicate_of = spec.slug(path).and_then(|slug| match seen.entry(slug) {
                Entry::Occupied(first) => Some((first.key().clone(), first.get().clone())),
                Entry::Vacant(slot) => {
                    slot.insert(path.to_path_buf());
                    None
                }
            });

            match self.load_document(spec, path, relative) {
                Ok(doc) if duplicate_of.is_none() => documents.push(doc),
                Ok(_) => {}
                Err(errs) => failures.extend(errs),
            }

            if let Some((slug, first)) = duplicate_of {
                failures.push(DocumentError::DuplicateSlug {
                    path: path.to_path_buf(),
                    slug,
                    first,
                });
            }
        }

        if !failures.is_empty() {
            for failure in &failures {
                tracing::error!("{}", failure);
            }
            let broken: BTreeSet<&PathBuf> = failures.iter().map(DocumentError::path).collect();
            tracing::info!(
                "{} broken {} file(s); {} valid document(s) not loaded",
                broken.len(),
                kind,
                documents.len()
            );
            return Err(LoadError::new(failures));
        }

        tracing::info!("Loaded {} {} document(s)", documents.len(), kind);
        Ok(Collection::new(kind, documents))
    }

    /// Load a single document from a file
    fn load_document(
        &self,
        spec: &KindSpec,
        path: &Path,
        relative: &Path,
    ) -> Result<Document, Vec<DocumentError>> {
        let content = fs::read_to_string(path).map_err(|source| {
            vec![DocumentError::Io {
                path: path.to_path_buf(),
                source,
            }]
        })?;

        let (fm, body) = FrontMatter::parse(&content).map_err(|e| {
            vec![DocumentError::FrontMatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            }]
        })?;

        let mut errors = Vec::new();

        // Title and date are needed to build a document whatever the schema says
        let mut missing: Vec<Field> = spec
            .required
            .iter()
            .copied()
            .filter(|f| !fm.has(*f))
            .collect();
        for field in [Field::Title, Field::Date] {
            if !fm.has(field) && !missing.contains(&field) {
                missing.push(field);
            }
        }
        errors.extend(missing.into_iter().map(|field| DocumentError::MissingField {
            path: path.to_path_buf(),
            field: field.name(),
        }));

        let title = fm
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let date = match (&fm.date, fm.parse_date()) {
            (Some(_), Some(date)) => Some(date),
            (Some(raw), None) => {
                errors.push(DocumentError::InvalidDate {
                    path: path.to_path_buf(),
                    value: raw.clone(),
                });
                None
            }
            (None, _) => None,
        };

        let slug = spec.slug(path);
        if slug.is_none() {
            errors.push(DocumentError::InvalidSlug {
                path: path.to_path_buf(),
            });
        }

        let (Some(title), Some(date), Some(slug), true) = (title, date, slug, errors.is_empty())
        else {
            return Err(errors);
        };

        let tags = if spec.has_tags {
            fm.tags
        } else {
            if !fm.tags.is_empty() {
                tracing::debug!("Ignoring tags in {:?}: {} has no tags", relative, spec.kind);
            }
            Vec::new()
        };

        let html = self.renderer.render(body).map_err(|e| {
            vec![DocumentError::Body {
                path: path.to_path_buf(),
                message: e.to_string(),
            }]
        })?;

        Ok(Document {
            kind: spec.kind,
            title,
            date,
            date_raw: fm.date.unwrap_or_default().trim().to_string(),
            description: fm.description.unwrap_or_default(),
            tags,
            url: spec.url(&slug),
            slug,
            source: relative.to_string_lossy().to_string(),
            body: Body {
                raw: body.to_string(),
                html,
            },
        })
    }
}
