use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// On-disk description of a catalog, usually read from a TOML manifest.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogManifest {
    /// Optional work title, used as the prefix of every image's alt text.
    #[serde(default)]
    pub title: Option<String>,
    /// Image sources in reading order.
    pub pages: Vec<String>,
}

/// Ordered, immutable list of page image sources. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageCatalog {
    title: Option<String>,
    pages: Vec<String>,
}

impl PageCatalog {
    pub fn new(pages: Vec<String>) -> Result<Self> {
        Self::with_title(None, pages)
    }

    pub fn with_title(title: Option<String>, pages: Vec<String>) -> Result<Self> {
        if pages.is_empty() {
            return Err(FolioError::EmptyCatalog);
        }
        Ok(Self { title, pages })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false: a catalog holds at least one page.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.pages.len()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Source for `index`, or `None` when out of range.
    pub fn source(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }

    /// Checked lookup, for callers that report a missing page.
    pub fn try_source(&self, index: usize) -> Result<&str> {
        self.source(index).ok_or(FolioError::PageIndexOutOfRange {
            index,
            total: self.pages.len(),
        })
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(String::as_str)
    }

    /// Alt text for an attached page image. Page numbers are 1-based.
    pub fn alt_text(&self, index: usize) -> String {
        match &self.title {
            Some(title) => format!("{} Page {}", title, index + 1),
            None => format!("Page {}", index + 1),
        }
    }

    /// Alt text shown in place of a page whose source failed to load.
    pub fn failure_text(index: usize) -> String {
        format!("Failed to load page {}", index + 1)
    }
}

impl TryFrom<CatalogManifest> for PageCatalog {
    type Error = FolioError;

    fn try_from(manifest: CatalogManifest) -> Result<Self> {
        Self::with_title(manifest.title, manifest.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            PageCatalog::new(Vec::new()),
            Err(FolioError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_alt_text_uses_title() {
        let catalog =
            PageCatalog::with_title(Some("Omega".into()), vec!["a.png".into(), "b.png".into()])
                .unwrap();
        assert_eq!(catalog.alt_text(1), "Omega Page 2");
        assert_eq!(PageCatalog::failure_text(0), "Failed to load page 1");
    }

    #[test]
    fn test_try_source_out_of_range() {
        let catalog = PageCatalog::new(vec!["a.png".into()]).unwrap();
        assert_eq!(catalog.try_source(0).unwrap(), "a.png");
        assert!(matches!(
            catalog.try_source(3),
            Err(FolioError::PageIndexOutOfRange { index: 3, total: 1 })
        ));
    }
}
