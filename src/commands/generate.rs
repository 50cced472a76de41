//! Build the site output

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::Kind;
use crate::generator::Generator;
use crate::helpers::now_in;
use crate::{Site, CONFIG_FILE};

/// Load all content and write the output
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    // Load phase: every collection is complete before anything is queried
    let library = site.load()?;
    tracing::info!(
        "Loaded {} documents ({} blog, {} notes, {} learning)",
        library.len(),
        library.collection(Kind::Blog).len(),
        library.collection(Kind::Note).len(),
        library.collection(Kind::Learning).len(),
    );

    let generated_at = now_in(&site.config.timezone);
    Generator::new(site).generate(&library, generated_at)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch content and config for changes and rebuild
///
/// Failed rebuilds are logged and the watch continues.
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if site.content_dir.exists() {
        watcher.watch(&site.content_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("Content changed, rebuilding...");
                    // Config may have changed as well
                    match Site::new(&site.base_dir).and_then(|s| run(&s)) {
                        Ok(()) => {}
                        Err(e) => tracing::error!("Build failed: {:#}", e),
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join("content").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_run_builds_output() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "blog/hello.md",
            "---\ntitle: Hello\ndate: 2024-01-01\ndescription: hi\n---\nbody\n",
        );

        let site = Site::new(tmp.path()).unwrap();
        run(&site).unwrap();

        assert!(tmp.path().join("public/sitemap.xml").exists());
        assert!(tmp.path().join("public/routes.json").exists());
        assert!(tmp.path().join("public/data/blog/hello.json").exists());
    }

    #[test]
    fn test_run_fails_on_invalid_document() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "notes/broken.md",
            "---\ndate: 2024-01-01\ndescription: hi\n---\n",
        );

        let site = Site::new(tmp.path()).unwrap();
        let err = run(&site).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.md"));
        assert!(!tmp.path().join("public/sitemap.xml").exists());
    }
}
