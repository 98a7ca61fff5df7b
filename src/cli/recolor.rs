//! `recolor` command: run the recolor policy over image files.

use anyhow::{Result, bail};
use hueshift::config::{Config, OutputSection};
use hueshift::image::recolor::{RecolorError, RecolorOutcome, Recolored, plan_file, recolor_file};
use hueshift::logger::ProgressLine;
use hueshift::{debug, log};
use jwalk::WalkDir;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions the `image` crate is built to decode.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// An input image and its path below the scanned root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Source {
    path: PathBuf,
    /// File name for explicit files, path below the root for scanned ones.
    relative: PathBuf,
}

/// An input image paired with where its recolored copy goes.
#[derive(Debug)]
struct Job {
    input: PathBuf,
    output: PathBuf,
}

/// Recolor every image under `paths`.
pub fn recolor_images(paths: &[PathBuf], config: &Config, dry: bool) -> Result<()> {
    check_output_dir(paths, &config.output)?;

    let sources = collect_images(paths, &config.output);
    if sources.is_empty() {
        log!("recolor"; "no images found");
        return Ok(());
    }
    let jobs = plan_outputs(sources, &config.output)?;

    let background = config.recolor.background;
    let params = config.recolor.search_params();
    let palette = config.palette.palette();

    log!(
        "recolor";
        "{} image{} against {} (target {:.1}:1)",
        jobs.len(),
        if jobs.len() == 1 { "" } else { "s" },
        background,
        params.target_contrast
    );

    let progress = ProgressLine::new(&[("images", jobs.len())]);
    let results: Vec<_> = jobs
        .par_iter()
        .map(|job| {
            let result = if dry {
                plan_file(&job.input, background, &palette, &params)
            } else {
                recolor_file(&job.input, &job.output, background, &palette, &params)
            };
            progress.inc("images");
            (job, result)
        })
        .collect();
    progress.finish();

    let mut failed = 0;
    for (job, result) in &results {
        match result {
            Ok(recolored) => report(&job.input, &job.output, recolored, dry),
            Err(err) => {
                failed += 1;
                log_error(&job.input, err);
            }
        }
    }

    let shifted = results
        .iter()
        .filter(|(_, r)| r.as_ref().is_ok_and(|r| r.outcome.is_shifted()))
        .count();
    log!(
        "recolor";
        "{} {} of {}",
        if dry { "would shift" } else { "shifted" },
        shifted,
        results.len()
    );

    if failed > 0 {
        bail!("{failed} image{} failed", if failed == 1 { "" } else { "s" });
    }
    Ok(())
}

fn report(input: &Path, output: &Path, recolored: &Recolored, dry: bool) {
    match recolored.outcome {
        RecolorOutcome::Compliant { contrast } => {
            debug!("skip"; "{}: {} already at {:.2}:1", input.display(), recolored.dominant, contrast);
        }
        RecolorOutcome::Unchanged { contrast, best } => {
            log!(
                "skip";
                "{}: {} at {:.2}:1, best rotation only reaches {:.2}:1",
                input.display(),
                recolored.dominant,
                contrast,
                best
            );
        }
        RecolorOutcome::Shifted {
            shift,
            before,
            after,
        } => {
            let target = if dry {
                String::new()
            } else {
                format!(" -> {}", output.display())
            };
            log!(
                "shift";
                "{}: {:+.1}° ({:.2}:1 -> {:.2}:1){}",
                input.display(),
                shift,
                before,
                after,
                target
            );
        }
    }
}

fn log_error(input: &Path, err: &RecolorError) {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    log!("error"; "{}: {}", input.display(), message);
}

/// Reject an output directory that holds any of the inputs.
fn check_output_dir(paths: &[PathBuf], output: &OutputSection) -> Result<()> {
    let Some(dir) = &output.dir else {
        return Ok(());
    };
    let dir = resolve(dir);

    for path in paths {
        let root = if path.is_dir() {
            resolve(path)
        } else {
            resolve_target(path)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        };
        if root.starts_with(&dir) {
            bail!(
                "output dir {} contains input {}, originals would be overwritten",
                dir.display(),
                path.display()
            );
        }
    }
    Ok(())
}

/// Expand files and directories into image sources.
///
/// Skips our own outputs: stems ending in the suffix and anything inside the
/// output directory.
fn collect_images(paths: &[PathBuf], output: &OutputSection) -> Vec<Source> {
    let output_dir = output.dir.as_deref().map(resolve);

    let mut sources: Vec<Source> = paths
        .iter()
        .flat_map(|path| {
            if path.is_dir() {
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.path())
                    .filter(|p| is_image(p) && !is_output(p, &output.suffix))
                    .filter(|p| {
                        output_dir
                            .as_ref()
                            .is_none_or(|dir| !resolve(p).starts_with(dir))
                    })
                    .filter_map(|p| {
                        let relative = p.strip_prefix(path).ok()?.to_path_buf();
                        Some(Source { path: p, relative })
                    })
                    .collect()
            } else {
                let relative = path.file_name().map(PathBuf::from).unwrap_or_default();
                vec![Source {
                    path: path.clone(),
                    relative,
                }]
            }
        })
        .collect();

    sources.sort();
    sources.dedup_by(|a, b| a.path == b.path);
    sources
}

/// Pair each source with its output, rejecting self-overwrites and collisions.
fn plan_outputs(sources: Vec<Source>, output: &OutputSection) -> Result<Vec<Job>> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(sources.len());

    for source in sources {
        let target = output_path(&source, output);
        let resolved = resolve_target(&target);

        if resolved == resolve_target(&source.path) {
            bail!("{} would overwrite its own source", source.path.display());
        }
        if let Some(other) = claimed.get(&resolved) {
            bail!(
                "{} and {} would both write {}",
                other.display(),
                source.path.display(),
                target.display()
            );
        }

        claimed.insert(resolved, source.path.clone());
        jobs.push(Job {
            input: source.path,
            output: target,
        });
    }
    Ok(jobs)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn is_output(path: &Path, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(suffix))
}

/// Where the recolored PNG for `source` goes.
///
/// Inside `dir` the layout below the scanned root is kept.
fn output_path(source: &Source, output: &OutputSection) -> PathBuf {
    match &output.dir {
        Some(dir) => dir.join(&source.relative).with_extension("png"),
        None => {
            let stem = source
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            source
                .path
                .with_file_name(format!("{stem}{}.png", output.suffix))
        }
    }
}

/// Absolute form of `path`, following symlinks when it exists.
fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Like [`resolve`], for files that may not exist yet.
fn resolve_target(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            resolve(parent).join(name)
        }
        _ => resolve(path),
    }
}
