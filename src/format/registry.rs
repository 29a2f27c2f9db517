//! Format registry for discovering and accessing export formats.

use std::collections::BTreeMap;

use crate::format::error::FormatError;
use crate::format::formats::{CocoFormat, NativeJsonFormat, YoloFormat};
use crate::format::traits::AnnotationFormat;

/// Registry of available export formats.
///
/// All built-in formats are registered on creation.
pub struct FormatRegistry {
    formats: BTreeMap<&'static str, Box<dyn AnnotationFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: BTreeMap::new(),
        };

        registry.register(Box::new(NativeJsonFormat));
        registry.register(Box::new(YoloFormat));
        registry.register(Box::new(CocoFormat));

        registry
    }

    /// Register a format implementation, replacing any with the same id.
    pub fn register(&mut self, format: Box<dyn AnnotationFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn AnnotationFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Get a format by its ID, or an [`FormatError::UnknownFormat`].
    pub fn require(&self, id: &str) -> Result<&dyn AnnotationFormat, FormatError> {
        self.get(id).ok_or_else(|| FormatError::unknown_format(id))
    }

    /// Get all registered formats, ordered by id.
    pub fn all(&self) -> Vec<&dyn AnnotationFormat> {
        self.formats.values().map(|f| f.as_ref()).collect()
    }

    /// Get all format IDs, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        self.formats.keys().copied().collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
