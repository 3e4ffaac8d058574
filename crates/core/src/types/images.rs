//! Ordered chapter image lists.
//!
//! Chapters are stored with their pages as a single comma-delimited column.
//! [`ImageSequence`] is the typed form on both sides of that column: reads go
//! through [`ImageSequence::decode`], which never fails, writes through the
//! checked [`ImageSequence::new`].

use serde::{Deserialize, Serialize};

/// Separator between image references in the stored form.
pub const IMAGE_DELIMITER: char = ',';

/// Errors that can occur when building an [`ImageSequence`] for storage.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageSequenceError {
    /// A chapter needs at least one page to be readable.
    #[error("a chapter needs at least one image")]
    Empty,
    /// One of the references is empty or whitespace.
    #[error("image {index} is blank")]
    BlankReference {
        /// Position of the offending reference.
        index: usize,
    },
    /// A reference contains the delimiter and would split on decode.
    #[error("image {index} contains the delimiter ','")]
    ContainsDelimiter {
        /// Position of the offending reference.
        index: usize,
    },
}

/// The pages of a chapter, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSequence(Vec<String>);

impl ImageSequence {
    /// Build a sequence that is safe to encode.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, or any reference is blank or
    /// contains [`IMAGE_DELIMITER`].
    pub fn new(images: Vec<String>) -> Result<Self, ImageSequenceError> {
        if images.is_empty() {
            return Err(ImageSequenceError::Empty);
        }

        for (index, image) in images.iter().enumerate() {
            if image.trim().is_empty() {
                return Err(ImageSequenceError::BlankReference { index });
            }
            if image.contains(IMAGE_DELIMITER) {
                return Err(ImageSequenceError::ContainsDelimiter { index });
            }
        }

        Ok(Self(images.into_iter().map(|s| s.trim().to_owned()).collect()))
    }

    /// Decode the stored form.
    ///
    /// A plain split on [`IMAGE_DELIMITER`]. Segments come back exactly as
    /// stored and in stored order, blanks included.
    ///
    /// ```
    /// use webtoon_core::ImageSequence;
    ///
    /// let pages = ImageSequence::decode("a.png,b.png,c.png");
    /// assert_eq!(pages.as_slice(), ["a.png", "b.png", "c.png"]);
    /// ```
    #[must_use]
    pub fn decode(stored: &str) -> Self {
        Self(
            stored
                .split(IMAGE_DELIMITER)
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Encode to the stored form.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, image) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(IMAGE_DELIMITER);
            }
            out.push_str(image);
        }
        out
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no pages. Never the case after [`ImageSequence::decode`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The pages as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
