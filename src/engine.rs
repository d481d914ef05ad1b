//! Conversion entry points: one-shot [`convert`], the registry-backed
//! [`Converter`], and per-chapter batch conversion.

use std::sync::Arc;

use tracing::debug;

use crate::ast::Document;
use crate::config::{ConfigOverrides, ResolvedConfig};
use crate::error::{ConfigError, ConvertError, Diagnostic};
use crate::parser::Parser;
use crate::pipeline::{self, TransformFn, TransformRegistry};
use crate::render;

/// Successful conversion output: the LaTeX fragment plus every non-fatal
/// finding, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub latex: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert one Markdown text under an already-resolved configuration, with
/// no transforms. Use a [`Converter`] to run registered transforms.
pub fn convert(source: &str, config: &ResolvedConfig) -> Result<Conversion, ConvertError> {
    run(source, config, &[])
}

pub(crate) fn run(
    source: &str,
    config: &ResolvedConfig,
    transforms: &[(String, Arc<TransformFn>)],
) -> Result<Conversion, ConvertError> {
    debug!(bytes = source.len(), "parsing document");
    let (document, mut diagnostics) = Parser::new(source, config).parse()?;
    let document = pipeline::apply(document, transforms)?;
    // the tree is frozen here; integrity holds before generation starts
    document.check_references()?;
    debug!("generating latex");
    let (latex, generated) = render::latex::render(&document, config)?;
    diagnostics.extend(generated);
    Ok(Conversion { latex, diagnostics })
}

/// One chapter of a batch: its source and an optional override layer merged
/// over the converter's configuration.
#[derive(Debug, Clone, Default)]
pub struct Chapter {
    pub source: String,
    pub overrides: Option<ConfigOverrides>,
}

impl Chapter {
    pub fn new(source: impl Into<String>) -> Self {
        Chapter {
            source: source.into(),
            overrides: None,
        }
    }

    pub fn with_overrides(source: impl Into<String>, overrides: ConfigOverrides) -> Self {
        Chapter {
            source: source.into(),
            overrides: Some(overrides),
        }
    }
}

/// Holds a transform registry and a global configuration; each call merges
/// chapter overrides and resolves transform names before parsing.
#[derive(Default, Clone)]
pub struct Converter {
    registry: TransformRegistry,
    config: ResolvedConfig,
}

impl Converter {
    pub fn new(config: ResolvedConfig) -> Self {
        Converter {
            registry: TransformRegistry::new(),
            config,
        }
    }

    pub fn with_registry(config: ResolvedConfig, registry: TransformRegistry) -> Self {
        Converter { registry, config }
    }

    /// Register a named transform; duplicate names are a conflict.
    pub fn register<F>(&mut self, name: impl Into<String>, transform: F) -> Result<(), ConfigError>
    where
        F: Fn(Document) -> Result<Document, String> + Send + Sync + 'static,
    {
        self.registry.register(name, transform)
    }

    pub fn registry(&self) -> &TransformRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn convert(&self, source: &str) -> Result<Conversion, ConvertError> {
        self.convert_with(source, None, &[])
    }

    /// Full entry point: chapter overrides merged over the global
    /// configuration, transform names validated before parsing begins.
    pub fn convert_with(
        &self,
        source: &str,
        overrides: Option<&ConfigOverrides>,
        transform_names: &[&str],
    ) -> Result<Conversion, ConvertError> {
        let transforms = self.registry.resolve(transform_names)?;
        match overrides {
            Some(overrides) => run(source, &self.config.with_overrides(overrides)?, &transforms),
            None => run(source, &self.config, &transforms),
        }
    }

    /// The document after the transform stage, for programmatic inspection
    /// before generation.
    pub fn parse(
        &self,
        source: &str,
        transform_names: &[&str],
    ) -> Result<(Document, Vec<Diagnostic>), ConvertError> {
        let transforms = self.registry.resolve(transform_names)?;
        let (document, diagnostics) = Parser::new(source, &self.config).parse()?;
        let document = pipeline::apply(document, &transforms)?;
        Ok((document, diagnostics))
    }

    /// Convert chapters independently; results keep input order and one
    /// chapter's fatal error never disturbs its siblings. With the
    /// `parallel` feature chapters fan out over a bounded worker pool.
    pub fn convert_batch(
        &self,
        chapters: &[Chapter],
        transform_names: &[&str],
        workers: usize,
    ) -> Vec<Result<Conversion, ConvertError>> {
        let transforms = match self.registry.resolve(transform_names) {
            Ok(transforms) => transforms,
            Err(error) => {
                return chapters
                    .iter()
                    .map(|_| Err(ConvertError::Config(error.clone())))
                    .collect()
            }
        };
        let convert_one = |chapter: &Chapter| match &chapter.overrides {
            Some(overrides) => self
                .config
                .with_overrides(overrides)
                .map_err(ConvertError::from)
                .and_then(|config| run(&chapter.source, &config, &transforms)),
            None => run(&chapter.source, &self.config, &transforms),
        };

        #[cfg(feature = "parallel")]
        let results: Vec<Result<Conversion, ConvertError>> = {
            use rayon::prelude::*;
            match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(|| chapters.par_iter().map(&convert_one).collect()),
                Err(_) => chapters.iter().map(&convert_one).collect(),
            }
        };
        #[cfg(not(feature = "parallel"))]
        let results: Vec<Result<Conversion, ConvertError>> = {
            let _ = workers;
            chapters.iter().map(&convert_one).collect()
        };
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Block;
    use crate::error::DiagnosticKind;

    #[test]
    fn convert_is_deterministic() {
        let config = ResolvedConfig::default();
        let source = "# Title\n\nBody with **bold** and `code`.\n\n- a\n- b\n";
        let first = convert(source, &config).unwrap();
        let second = convert(source, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn transforms_run_between_parse_and_render() {
        let mut converter = Converter::new(ResolvedConfig::default());
        converter
            .register("drop-rules", |mut document: Document| {
                document
                    .children
                    .retain(|block| !matches!(block, Block::HorizontalRule));
                Ok(document)
            })
            .unwrap();
        let with = converter
            .convert_with("a\n\n---\n\nb\n", None, &["drop-rules"])
            .unwrap();
        assert_eq!(with.latex, "a\n\nb");
        let without = converter.convert("a\n\n---\n\nb\n").unwrap();
        assert!(without.latex.contains("\\rule"));
    }

    #[test]
    fn unknown_transform_fails_before_parsing() {
        let converter = Converter::new(ResolvedConfig::default());
        assert!(matches!(
            converter.convert_with("# ok", None, &["missing"]),
            Err(ConvertError::Config(ConfigError::UnknownTransform(name))) if name == "missing"
        ));
    }

    #[test]
    fn batch_keeps_order_and_isolates_failures() {
        let converter = Converter::new(ResolvedConfig::default());
        let chapters = vec![
            Chapter::new("# One"),
            Chapter::new("bad footnote[^x]"),
            Chapter::new("# Three"),
        ];
        let results = converter.convert_batch(&chapters, &[], 2);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().latex, "\\section{One}");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().latex, "\\section{Three}");
    }

    #[test]
    fn chapter_overrides_win_for_that_chapter_only() {
        use crate::config::{CalloutOverrides, ConfigOverrides};
        let converter = Converter::new(ResolvedConfig::default());
        let overrides = ConfigOverrides {
            callouts: CalloutOverrides {
                environments: Some(
                    [("note".to_string(), "mybox".to_string())].into_iter().collect(),
                ),
                ..Default::default()
            },
            ..Default::default()
        };
        let source = "> [!note]\n> body";
        let chapters = vec![
            Chapter::new(source),
            Chapter::with_overrides(source, overrides),
        ];
        let results = converter.convert_batch(&chapters, &[], 1);
        let plain = results[0].as_ref().unwrap();
        let mapped = results[1].as_ref().unwrap();
        assert!(plain.latex.contains("notebox"));
        assert_eq!(plain.diagnostics[0].kind, DiagnosticKind::UnmappedCallout);
        assert!(mapped.latex.contains("mybox"));
        assert!(mapped.diagnostics.is_empty());
    }
}
