//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher as _};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::{GenerateReport, Generator};
use crate::Folio;

/// Generate the static site
pub fn run(folio: &Folio) -> Result<GenerateReport> {
    let start = Instant::now();

    let generator = Generator::new(folio)?;
    let report = generator.generate(&folio.content_source())?;

    let duration = start.elapsed();
    if report.is_clean() {
        tracing::info!(
            "Generated {} page(s) in {:.2}s",
            report.rendered,
            duration.as_secs_f64()
        );
    } else {
        tracing::warn!(
            "Generated {} page(s) in {:.2}s, {} item(s) failed",
            report.rendered,
            duration.as_secs_f64(),
            report.failed
        );
    }

    Ok(report)
}

/// Watch for file changes and regenerate until the watcher goes away
pub async fn watch(folio: &Folio) -> Result<()> {
    let folio = folio.clone();
    tokio::task::spawn_blocking(move || watch_and_rebuild(&folio)).await?
}

/// Blocking watch loop shared by `generate --watch` and the server.
///
/// Every debounced batch of relevant changes triggers exactly one rebuild.
pub fn watch_and_rebuild(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in watched_paths(folio) {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed = relevant_paths(&events);
                if changed.is_empty() {
                    continue;
                }
                for path in &changed {
                    tracing::info!("File changed: {}", path.display());
                }
                match rebuild(folio) {
                    Ok(report) if report.is_clean() => tracing::info!("Regenerated successfully"),
                    Ok(report) => tracing::warn!("Regenerated with {} failure(s)", report.failed),
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Content, static files and the config file, when present
pub fn watched_paths(folio: &Folio) -> Vec<PathBuf> {
    [
        folio.source_dir.clone(),
        folio.static_dir.clone(),
        folio.base_dir.join("_config.yml"),
    ]
    .into_iter()
    .filter(|p| p.exists())
    .collect()
}

/// Paths in a batch worth rebuilding for
fn relevant_paths(events: &[DebouncedEvent]) -> Vec<&Path> {
    events
        .iter()
        .map(|e| e.path.as_path())
        .filter(|p| is_relevant(p))
        .collect()
}

/// Skip editor droppings and VCS metadata
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

/// Reload the configuration, then generate
pub fn rebuild(folio: &Folio) -> Result<GenerateReport> {
    let folio = Folio::new(&folio.base_dir)?;
    run(&folio)
}
