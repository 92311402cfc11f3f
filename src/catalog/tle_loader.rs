use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogError};
use crate::orbit::OrbitalState;

/// Reads every `*.tle` / `*.txt` file of a directory into a [`Catalog`].
#[derive(Debug, Clone)]
pub struct TleLoader {
    tle_dir: PathBuf,
}

impl TleLoader {
    pub fn new(tle_dir: PathBuf) -> Self {
        Self { tle_dir }
    }

    pub fn load(&self) -> Result<Catalog, CatalogError> {
        if !self.tle_dir.is_dir() {
            return Err(CatalogError::DirectoryNotFound(
                self.tle_dir.display().to_string(),
            ));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.tle_dir)? {
            let path = entry?.path();
            if path.is_file() && has_tle_extension(&path) {
                paths.push(path);
            }
        }
        // Later files override earlier ones on duplicate ids; keep that stable.
        paths.sort();

        let mut states = Vec::new();
        for path in &paths {
            match fs::read_to_string(path) {
                Ok(content) => {
                    let source = path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string();
                    states.extend(parse_tle_text(&source, &content));
                }
                Err(e) => {
                    log::warn!("Failed to read TLE file {}: {}", path.display(), e);
                }
            }
        }

        let catalog = Catalog::new(self.tle_dir.display().to_string(), states);
        log::info!(
            "Loaded {} satellites from {} TLE file(s) in {}",
            catalog.len(),
            paths.len(),
            self.tle_dir.display()
        );
        Ok(catalog)
    }
}

fn has_tle_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tle") | Some("txt")
    )
}

/// Parse concatenated two- and three-line element sets. Records that fail to
/// parse are logged and skipped.
pub fn parse_tle_text(source: &str, content: &str) -> Vec<OrbitalState> {
    split_records(content)
        .into_iter()
        .filter_map(|(name, line1, line2)| {
            let label = name.clone().unwrap_or_else(|| line1.to_string());
            match OrbitalState::from_tle(name, line1, line2) {
                Ok(state) => Some(state),
                Err(e) => {
                    log::warn!("Skipping element set {:?} in {}: {}", label, source, e);
                    None
                }
            }
        })
        .collect()
}

fn split_records(content: &str) -> Vec<(Option<String>, &str, &str)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push((None, lines[i], lines[i + 1]));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            let name = lines[i].trim().trim_start_matches("0 ").trim();
            result.push((Some(name.to_string()), lines[i + 1], lines[i + 2]));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}
