//! Named AST transforms applied between parsing and generation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::Document;
use crate::error::{ConfigError, ConvertError};

/// A registered transform: whole document in, whole document out, so a
/// stage may restructure freely. A returned error aborts the conversion.
pub type TransformFn = dyn Fn(Document) -> Result<Document, String> + Send + Sync;

/// Registry of named transforms. Registration happens at startup under a
/// single writer; conversions only read, so a populated registry can be
/// shared across concurrent chapters.
#[derive(Default, Clone)]
pub struct TransformRegistry {
    transforms: HashMap<String, Arc<TransformFn>>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform under a unique name. Duplicate names are a
    /// naming conflict, not a silent replacement.
    pub fn register<F>(&mut self, name: impl Into<String>, transform: F) -> Result<(), ConfigError>
    where
        F: Fn(Document) -> Result<Document, String> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.transforms.contains_key(&name) {
            return Err(ConfigError::DuplicateTransform(name));
        }
        self.transforms.insert(name, Arc::new(transform));
        Ok(())
    }

    pub fn has(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.transforms.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve an ordered name list before parsing begins; an unknown name
    /// fails the whole call fast.
    pub(crate) fn resolve(
        &self,
        names: &[&str],
    ) -> Result<Vec<(String, Arc<TransformFn>)>, ConfigError> {
        names
            .iter()
            .map(|name| {
                self.transforms
                    .get(*name)
                    .map(|transform| ((*name).to_string(), Arc::clone(transform)))
                    .ok_or_else(|| ConfigError::UnknownTransform((*name).to_string()))
            })
            .collect()
    }
}

/// Apply resolved transforms strictly in the given order.
pub(crate) fn apply(
    document: Document,
    transforms: &[(String, Arc<TransformFn>)],
) -> Result<Document, ConvertError> {
    let mut current = document;
    for (name, transform) in transforms {
        tracing::debug!(transform = name.as_str(), "applying transform");
        current = transform(current).map_err(|message| ConvertError::Transform {
            name: name.clone(),
            message,
        })?;
    }
    Ok(current)
}
