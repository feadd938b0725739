//! Image set reconciliation for the product editor.
//!
//! While editing, a product's gallery mixes images already stored on the
//! server (identified by URL) with local files waiting to upload. Every entry
//! gets an ephemeral id so the editor can remove it; on submit the server gets
//! the URLs to keep and the new files.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommerceError;

/// Ephemeral id of an image entry, unique within one [`ImageSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageEntryId(u32);

impl ImageEntryId {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ImageEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

/// A local file pending upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl NewImage {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Already persisted; identified by its original URL.
    Existing { url: String },
    New(NewImage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub id: ImageEntryId,
    pub source: ImageSource,
}

impl ImageEntry {
    pub fn is_existing(&self) -> bool {
        matches!(self.source, ImageSource::Existing { .. })
    }
}

/// Ordered gallery being edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageSet {
    entries: Vec<ImageEntry>,
    next_id: u32,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a stored product's image URLs.
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for url in urls {
            set.push(ImageSource::Existing { url: url.into() });
        }
        set
    }

    /// Queue a local file for upload.
    pub fn add_new(&mut self, image: NewImage) -> ImageEntryId {
        self.push(ImageSource::New(image))
    }

    fn push(&mut self, source: ImageSource) -> ImageEntryId {
        let id = ImageEntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(ImageEntry { id, source });
        id
    }

    /// Drop an entry, existing or new.
    pub fn remove(&mut self, id: ImageEntryId) -> Result<ImageEntry, CommerceError> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CommerceError::ImageNotFound(id.0))?;
        Ok(self.entries.remove(position))
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URLs of stored images the editor keeps, in gallery order.
    pub fn kept_urls(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match &e.source {
                ImageSource::Existing { url } => Some(url.as_str()),
                ImageSource::New(_) => None,
            })
            .collect()
    }

    /// Files to upload, in gallery order.
    pub fn new_files(&self) -> Vec<&NewImage> {
        self.entries
            .iter()
            .filter_map(|e| match &e.source {
                ImageSource::New(image) => Some(image),
                ImageSource::Existing { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn png(name: &str) -> NewImage {
        NewImage::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
    }

    #[test]
    fn test_ids_stay_unique_after_removal() {
        let mut set = ImageSet::from_urls(["/uploads/a.jpg", "/uploads/b.jpg"]);
        let first = set.entries()[0].id;
        set.remove(first).unwrap();
        let added = set.add_new(png("c.png"));

        let ids: Vec<_> = set.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(added, first);
    }

    #[test]
    fn test_kept_urls_and_new_files() {
        let mut set = ImageSet::from_urls(["/a.jpg", "/b.jpg", "/c.jpg"]);
        set.add_new(png("d.png"));
        let b = set.entries()[1].id;
        set.remove(b).unwrap();

        assert_eq!(set.kept_urls(), vec!["/a.jpg", "/c.jpg"]);
        assert_eq!(set.new_files().len(), 1);
        assert_eq!(set.new_files()[0].file_name, "d.png");
    }

    #[test]
    fn test_remove_all_existing_leaves_empty_keep_list() {
        let mut set = ImageSet::from_urls(["/a.jpg"]);
        let id = set.entries()[0].id;
        let removed = set.remove(id).unwrap();
        assert!(removed.is_existing());
        assert!(set.kept_urls().is_empty());
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut set = ImageSet::new();
        let id = set.add_new(png("x.png"));
        set.remove(id).unwrap();
        assert_matches!(set.remove(id), Err(CommerceError::ImageNotFound(_)));
    }
}
