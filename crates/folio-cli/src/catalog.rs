use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use folio_core::catalog::CatalogManifest;
use folio_core::PageCatalog;
use rayon::prelude::*;

/// File extensions picked up when a catalog is discovered from a directory.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "avif"];

/// A catalog plus the directory its relative page sources resolve against.
pub struct LoadedCatalog {
    pub catalog: PageCatalog,
    pub base: PathBuf,
}

impl LoadedCatalog {
    /// Read a TOML manifest, or discover every image in a directory.
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::discover(path)
        } else {
            Self::from_manifest(path)
        }
    }

    fn from_manifest(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let manifest: CatalogManifest =
            toml::from_str(&contents).context("Invalid catalog manifest")?;
        let catalog = PageCatalog::try_from(manifest)
            .with_context(|| format!("Catalog {} lists no pages", path.display()))?;
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self { catalog, base })
    }

    fn discover(dir: &Path) -> Result<Self> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() || !has_image_extension(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        if names.is_empty() {
            bail!("No images found in {}", dir.display());
        }
        names.sort_by(|a, b| natural_cmp(a, b));

        let title = dir.file_name().and_then(|n| n.to_str()).map(str::to_string);
        let catalog = PageCatalog::with_title(title, names)?;
        Ok(Self {
            catalog,
            base: dir.to_path_buf(),
        })
    }

    /// Local path for page `index`. `None` for remote sources.
    pub fn page_path(&self, index: usize) -> Option<PathBuf> {
        let src = self.catalog.source(index)?;
        if src.contains("://") {
            return None;
        }
        Some(self.base.join(src))
    }

    /// Probe every page's pixel dimensions in parallel.
    pub fn probe(&self) -> Vec<PageProbe> {
        (0..self.catalog.len())
            .into_par_iter()
            .map(|index| {
                let status = match self.page_path(index) {
                    None => ProbeStatus::Remote,
                    Some(path) if !path.exists() => ProbeStatus::Missing,
                    Some(path) => match image::image_dimensions(&path) {
                        Ok((width, height)) => ProbeStatus::Ok { width, height },
                        Err(e) => ProbeStatus::Undecodable(e.to_string()),
                    },
                };
                PageProbe { index, status }
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProbeStatus {
    Ok { width: u32, height: u32 },
    Missing,
    Undecodable(String),
    Remote,
}

#[derive(Clone, Debug)]
pub struct PageProbe {
    pub index: usize,
    pub status: ProbeStatus,
}

impl PageProbe {
    /// Rendered height when the image is scaled to `column_width`.
    pub fn scaled_height(&self, column_width: f64) -> Option<f64> {
        match self.status {
            ProbeStatus::Ok { width, height } if width > 0 => {
                Some(height as f64 * column_width / width as f64)
            }
            _ => None,
        }
    }

    /// A browser could not display this page at all.
    pub fn fails_to_load(&self) -> bool {
        matches!(self.status, ProbeStatus::Missing | ProbeStatus::Undecodable(_))
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk {
    Number(u64),
    Text(String),
}

fn chunks(name: &str) -> Vec<Chunk> {
    let mut out = Vec::new();
    let mut chars = name.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            let mut n: u64 = 0;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                n = n.saturating_mul(10).saturating_add(d as u64);
                chars.next();
            }
            out.push(Chunk::Number(n));
        } else {
            let mut s = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() {
                    break;
                }
                s.extend(c.to_lowercase());
                chars.next();
            }
            out.push(Chunk::Text(s));
        }
    }
    out
}

/// Compare file names so embedded numbers sort by value: `Pg2` < `Pg10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    chunks(a).cmp(&chunks(b)).then_with(|| a.cmp(b))
}
