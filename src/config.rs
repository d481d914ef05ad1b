//! Declarative formatting rules, resolved once per conversion call.
//!
//! `ResolvedConfig` is the immutable merge of built-in defaults, global
//! overrides and chapter overrides (later scope wins per key). Override
//! layers are serde-deserializable so an external loader can feed them from
//! YAML or TOML without this crate touching the filesystem.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Strict,
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathStyle {
    Dollars,
    Brackets,
}

/// Case normalization applied to callout kinds before environment lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindCase {
    Lower,
    Upper,
    Preserve,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRules {
    /// Markdown level that maps onto the first sectioning command.
    pub anchor_level: u8,
    pub commands: BTreeMap<u8, String>,
    pub fallback_command: String,
}

impl Default for HeadingRules {
    fn default() -> Self {
        let commands = [
            (1, "section"),
            (2, "subsection"),
            (3, "subsubsection"),
            (4, "paragraph"),
        ]
        .into_iter()
        .map(|(level, command)| (level, command.to_string()))
        .collect();
        HeadingRules {
            anchor_level: 1,
            commands,
            fallback_command: "paragraph".to_string(),
        }
    }
}

impl HeadingRules {
    /// Sectioning command for a markdown heading level, clamped to the
    /// deepest configured command.
    pub fn resolve_command(&self, level: u8) -> &str {
        let relative = (i16::from(level) - i16::from(self.anchor_level) + 1).max(1) as u8;
        self.commands
            .get(&relative)
            .map(String::as_str)
            .unwrap_or(&self.fallback_command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRules {
    pub bold_command: String,
    pub italic_command: String,
    pub code_command: String,
    pub line_break_command: String,
    pub math_template: String,
    /// Escapes applied inside inline code literals.
    pub escape_map: BTreeMap<char, String>,
    /// Ordered typographic replacements applied to plain text.
    pub normalization: Vec<(String, String)>,
    /// Custom marker symbol to command/template, e.g. `==` to `hl`.
    pub markers: BTreeMap<String, String>,
}

impl Default for InlineRules {
    fn default() -> Self {
        let escape_map = [
            ('\\', r"\textbackslash{}"),
            ('{', r"\{"),
            ('}', r"\}"),
            ('#', r"\#"),
            ('$', r"\$"),
            ('%', r"\%"),
            ('&', r"\&"),
            ('_', r"\_"),
            ('~', r"\textasciitilde{}"),
            ('^', r"\textasciicircum{}"),
        ]
        .into_iter()
        .map(|(ch, escape)| (ch, escape.to_string()))
        .collect();
        let normalization = [
            ("\u{2019}", "'"),
            ("≤", r"\leq"),
            ("≥", r"\geq"),
            ("œ", "oe"),
            ("–", "-"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();
        InlineRules {
            bold_command: "textbf".to_string(),
            italic_command: "textit".to_string(),
            code_command: "texttt".to_string(),
            line_break_command: "newline".to_string(),
            math_template: "${content}$".to_string(),
            escape_map,
            normalization,
            markers: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRules {
    pub external_template: String,
    pub url_only_template: String,
    pub autolink_template: String,
    pub internal_template: String,
}

impl Default for LinkRules {
    fn default() -> Self {
        LinkRules {
            external_template: r"\href{{url}}{{text}}".to_string(),
            url_only_template: r"\url{{url}}".to_string(),
            autolink_template: r"\url{{url}}".to_string(),
            internal_template: r"\ref{{label}}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRules {
    pub cite_template: String,
    pub locator_template: String,
    /// Joins keys inside one cite command.
    pub key_separator: String,
    /// Joins cite commands when locators force one per entry.
    pub group_separator: String,
}

impl Default for CitationRules {
    fn default() -> Self {
        CitationRules {
            cite_template: r"\cite{{keys}}".to_string(),
            locator_template: r"\cite[{locator}]{{keys}}".to_string(),
            key_separator: ",".to_string(),
            group_separator: " ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteRules {
    pub template: String,
}

impl Default for FootnoteRules {
    fn default() -> Self {
        FootnoteRules {
            template: r"\footnote{{text}}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRules {
    /// Prepended to the source stem by the path rewrite.
    pub path_prefix: String,
    /// Replaces the stripped source extension.
    pub path_suffix: String,
    pub width_unit: String,
    pub include_command: String,
    pub centered: bool,
    /// Existence probes resolve against this directory.
    pub base_dir: Option<PathBuf>,
    pub validate_paths: bool,
}

impl Default for ImageRules {
    fn default() -> Self {
        ImageRules {
            path_prefix: "../figures-pdfs".to_string(),
            path_suffix: ".pdf".to_string(),
            width_unit: r"\htmlpx".to_string(),
            include_command: r"\includegraphics".to_string(),
            centered: true,
            base_dir: None,
            validate_paths: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRules {
    pub unordered_environment: String,
    pub ordered_environment: String,
}

impl Default for ListRules {
    fn default() -> Self {
        ListRules {
            unordered_environment: "itemize".to_string(),
            ordered_environment: "enumerate".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRules {
    pub environment: String,
    /// Rendered into `[…]` after `\begin` when present; sees `{language}`.
    pub options_template: Option<String>,
}

impl Default for CodeRules {
    fn default() -> Self {
        CodeRules {
            environment: "lstlisting".to_string(),
            options_template: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutRules {
    pub environments: BTreeMap<String, String>,
    /// Environment for unmapped kinds; sees `{kind}`.
    pub fallback_template: String,
    /// Appended to `\begin{env}` when the callout has a title; sees `{title}`.
    pub title_template: Option<String>,
    pub kind_case: KindCase,
}

impl Default for CalloutRules {
    fn default() -> Self {
        CalloutRules {
            environments: BTreeMap::new(),
            fallback_template: "{kind}box".to_string(),
            title_template: Some("[{title}]".to_string()),
            kind_case: KindCase::Lower,
        }
    }
}

impl CalloutRules {
    pub fn normalize_kind(&self, kind: &str) -> String {
        match self.kind_case {
            KindCase::Lower => kind.to_lowercase(),
            KindCase::Upper => kind.to_uppercase(),
            KindCase::Preserve => kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRules {
    pub environment: String,
    pub hlines: bool,
    pub multicolumn_align: String,
    pub multirow_command: String,
}

impl Default for TableRules {
    fn default() -> Self {
        TableRules {
            environment: "tabular".to_string(),
            hlines: true,
            multicolumn_align: "c".to_string(),
            multirow_command: "multirow".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathRules {
    pub block_style: MathStyle,
}

impl Default for MathRules {
    fn default() -> Self {
        MathRules {
            block_style: MathStyle::Dollars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRules {
    pub auto_label_headings: bool,
    pub template: String,
    pub prefix: String,
    pub separator: String,
}

impl Default for LabelRules {
    fn default() -> Self {
        LabelRules {
            auto_label_headings: false,
            template: r"\label{{label}}".to_string(),
            prefix: String::new(),
            separator: "-".to_string(),
        }
    }
}

impl LabelRules {
    /// Prefixed label for a slug, e.g. `sec` + `intro` -> `sec-intro`.
    pub fn compose(&self, slug: &str) -> String {
        if self.prefix.is_empty() {
            slug.to_string()
        } else {
            format!("{}{}{}", self.prefix, self.separator, slug)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiRules {
    pub link_template: String,
    pub alias_template: String,
    pub separator: String,
}

impl Default for WikiRules {
    fn default() -> Self {
        WikiRules {
            link_template: r"\ref{{label}}".to_string(),
            alias_template: r"\ref{{label}}".to_string(),
            separator: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLineRules {
    pub command: String,
}

impl Default for RuleLineRules {
    fn default() -> Self {
        RuleLineRules {
            command: r"\noindent\rule{\textwidth}{0.4pt}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingRules {
    pub strip_front_matter: bool,
    pub strictness: Strictness,
}

impl Default for ParsingRules {
    fn default() -> Self {
        ParsingRules {
            strip_front_matter: false,
            strictness: Strictness::Lenient,
        }
    }
}

/// Final merged configuration threaded read-only through one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedConfig {
    pub headings: HeadingRules,
    pub inline: InlineRules,
    pub links: LinkRules,
    pub citations: CitationRules,
    pub footnotes: FootnoteRules,
    pub images: ImageRules,
    pub lists: ListRules,
    pub code_blocks: CodeRules,
    pub callouts: CalloutRules,
    pub tables: TableRules,
    pub math: MathRules,
    pub labels: LabelRules,
    pub wiki_links: WikiRules,
    pub rule_line: RuleLineRules,
    pub parsing: ParsingRules,
}

impl ResolvedConfig {
    /// Merge override layers over the defaults, earliest first; the last
    /// layer wins per key. Validates once at the end.
    pub fn resolve(layers: &[&ConfigOverrides]) -> Result<Self, ConfigError> {
        let mut config = ResolvedConfig::default();
        for layer in layers {
            layer.apply(&mut config);
        }
        config.validate()?;
        Ok(config)
    }

    /// A copy of this configuration with one more override layer applied.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = self.clone();
        overrides.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.headings.anchor_level == 0 {
            return Err(ConfigError::InvalidValue {
                key: "headings.anchor_level",
                value: "0".to_string(),
                reason: "levels start at 1",
            });
        }
        for (level, command) in &self.headings.commands {
            if *level == 0 || command.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "headings.commands",
                    value: format!("{level} => '{command}'"),
                    reason: "levels start at 1 and commands must be non-empty",
                });
            }
        }
        if self.headings.fallback_command.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "headings.fallback_command",
                value: String::new(),
                reason: "command must be non-empty",
            });
        }
        for (kind, environment) in &self.callouts.environments {
            if kind.is_empty() || environment.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "callouts.environments",
                    value: format!("'{kind}' => '{environment}'"),
                    reason: "kinds and environments must be non-empty",
                });
            }
        }
        for symbol in self.inline.markers.keys() {
            if symbol.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "inline.markers",
                    value: String::new(),
                    reason: "marker symbols must be non-empty",
                });
            }
        }
        for environment in [
            &self.lists.unordered_environment,
            &self.lists.ordered_environment,
            &self.code_blocks.environment,
            &self.tables.environment,
        ] {
            if environment.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "environments",
                    value: String::new(),
                    reason: "environment names must be non-empty",
                });
            }
        }
        Ok(())
    }
}

// ---- override layers ------------------------------------------------------

macro_rules! set {
    ($target:expr, $source:expr) => {
        if let Some(value) = &$source {
            $target = value.clone();
        }
    };
}

/// Partial configuration layer; every leaf is optional. Maps merge per key,
/// sequences replace wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub headings: HeadingOverrides,
    pub inline: InlineOverrides,
    pub links: LinkOverrides,
    pub citations: CitationOverrides,
    pub footnotes: FootnoteOverrides,
    pub images: ImageOverrides,
    pub lists: ListOverrides,
    pub code_blocks: CodeOverrides,
    pub callouts: CalloutOverrides,
    pub tables: TableOverrides,
    pub math: MathOverrides,
    pub labels: LabelOverrides,
    pub wiki_links: WikiOverrides,
    pub rule_line: RuleLineOverrides,
    pub parsing: ParsingOverrides,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut ResolvedConfig) {
        self.headings.apply(&mut config.headings);
        self.inline.apply(&mut config.inline);
        self.links.apply(&mut config.links);
        self.citations.apply(&mut config.citations);
        self.footnotes.apply(&mut config.footnotes);
        self.images.apply(&mut config.images);
        self.lists.apply(&mut config.lists);
        self.code_blocks.apply(&mut config.code_blocks);
        self.callouts.apply(&mut config.callouts);
        self.tables.apply(&mut config.tables);
        self.math.apply(&mut config.math);
        self.labels.apply(&mut config.labels);
        self.wiki_links.apply(&mut config.wiki_links);
        self.rule_line.apply(&mut config.rule_line);
        self.parsing.apply(&mut config.parsing);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeadingOverrides {
    pub anchor_level: Option<u8>,
    pub commands: Option<BTreeMap<u8, String>>,
    pub fallback_command: Option<String>,
}

impl HeadingOverrides {
    fn apply(&self, rules: &mut HeadingRules) {
        set!(rules.anchor_level, self.anchor_level);
        if let Some(commands) = &self.commands {
            for (level, command) in commands {
                rules.commands.insert(*level, command.clone());
            }
        }
        set!(rules.fallback_command, self.fallback_command);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InlineOverrides {
    pub bold_command: Option<String>,
    pub italic_command: Option<String>,
    pub code_command: Option<String>,
    pub line_break_command: Option<String>,
    pub math_template: Option<String>,
    pub escape_map: Option<BTreeMap<char, String>>,
    pub normalization: Option<Vec<(String, String)>>,
    pub markers: Option<BTreeMap<String, String>>,
}

impl InlineOverrides {
    fn apply(&self, rules: &mut InlineRules) {
        set!(rules.bold_command, self.bold_command);
        set!(rules.italic_command, self.italic_command);
        set!(rules.code_command, self.code_command);
        set!(rules.line_break_command, self.line_break_command);
        set!(rules.math_template, self.math_template);
        if let Some(map) = &self.escape_map {
            for (ch, escape) in map {
                rules.escape_map.insert(*ch, escape.clone());
            }
        }
        set!(rules.normalization, self.normalization);
        if let Some(markers) = &self.markers {
            for (symbol, template) in markers {
                rules.markers.insert(symbol.clone(), template.clone());
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkOverrides {
    pub external_template: Option<String>,
    pub url_only_template: Option<String>,
    pub autolink_template: Option<String>,
    pub internal_template: Option<String>,
}

impl LinkOverrides {
    fn apply(&self, rules: &mut LinkRules) {
        set!(rules.external_template, self.external_template);
        set!(rules.url_only_template, self.url_only_template);
        set!(rules.autolink_template, self.autolink_template);
        set!(rules.internal_template, self.internal_template);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CitationOverrides {
    pub cite_template: Option<String>,
    pub locator_template: Option<String>,
    pub key_separator: Option<String>,
    pub group_separator: Option<String>,
}

impl CitationOverrides {
    fn apply(&self, rules: &mut CitationRules) {
        set!(rules.cite_template, self.cite_template);
        set!(rules.locator_template, self.locator_template);
        set!(rules.key_separator, self.key_separator);
        set!(rules.group_separator, self.group_separator);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FootnoteOverrides {
    pub template: Option<String>,
}

impl FootnoteOverrides {
    fn apply(&self, rules: &mut FootnoteRules) {
        set!(rules.template, self.template);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageOverrides {
    pub path_prefix: Option<String>,
    pub path_suffix: Option<String>,
    pub width_unit: Option<String>,
    pub include_command: Option<String>,
    pub centered: Option<bool>,
    pub base_dir: Option<PathBuf>,
    pub validate_paths: Option<bool>,
}

impl ImageOverrides {
    fn apply(&self, rules: &mut ImageRules) {
        set!(rules.path_prefix, self.path_prefix);
        set!(rules.path_suffix, self.path_suffix);
        set!(rules.width_unit, self.width_unit);
        set!(rules.include_command, self.include_command);
        set!(rules.centered, self.centered);
        if let Some(base_dir) = &self.base_dir {
            rules.base_dir = Some(base_dir.clone());
        }
        set!(rules.validate_paths, self.validate_paths);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListOverrides {
    pub unordered_environment: Option<String>,
    pub ordered_environment: Option<String>,
}

impl ListOverrides {
    fn apply(&self, rules: &mut ListRules) {
        set!(rules.unordered_environment, self.unordered_environment);
        set!(rules.ordered_environment, self.ordered_environment);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CodeOverrides {
    pub environment: Option<String>,
    pub options_template: Option<String>,
}

impl CodeOverrides {
    fn apply(&self, rules: &mut CodeRules) {
        set!(rules.environment, self.environment);
        if let Some(template) = &self.options_template {
            rules.options_template = Some(template.clone());
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalloutOverrides {
    pub environments: Option<BTreeMap<String, String>>,
    pub fallback_template: Option<String>,
    pub title_template: Option<String>,
    pub kind_case: Option<KindCase>,
}

impl CalloutOverrides {
    fn apply(&self, rules: &mut CalloutRules) {
        if let Some(environments) = &self.environments {
            for (kind, environment) in environments {
                rules.environments.insert(kind.clone(), environment.clone());
            }
        }
        set!(rules.fallback_template, self.fallback_template);
        if let Some(template) = &self.title_template {
            rules.title_template = Some(template.clone());
        }
        set!(rules.kind_case, self.kind_case);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableOverrides {
    pub environment: Option<String>,
    pub hlines: Option<bool>,
    pub multicolumn_align: Option<String>,
    pub multirow_command: Option<String>,
}

impl TableOverrides {
    fn apply(&self, rules: &mut TableRules) {
        set!(rules.environment, self.environment);
        set!(rules.hlines, self.hlines);
        set!(rules.multicolumn_align, self.multicolumn_align);
        set!(rules.multirow_command, self.multirow_command);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MathOverrides {
    pub block_style: Option<MathStyle>,
}

impl MathOverrides {
    fn apply(&self, rules: &mut MathRules) {
        set!(rules.block_style, self.block_style);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabelOverrides {
    pub auto_label_headings: Option<bool>,
    pub template: Option<String>,
    pub prefix: Option<String>,
    pub separator: Option<String>,
}

impl LabelOverrides {
    fn apply(&self, rules: &mut LabelRules) {
        set!(rules.auto_label_headings, self.auto_label_headings);
        set!(rules.template, self.template);
        set!(rules.prefix, self.prefix);
        set!(rules.separator, self.separator);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WikiOverrides {
    pub link_template: Option<String>,
    pub alias_template: Option<String>,
    pub separator: Option<String>,
}

impl WikiOverrides {
    fn apply(&self, rules: &mut WikiRules) {
        set!(rules.link_template, self.link_template);
        set!(rules.alias_template, self.alias_template);
        set!(rules.separator, self.separator);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleLineOverrides {
    pub command: Option<String>,
}

impl RuleLineOverrides {
    fn apply(&self, rules: &mut RuleLineRules) {
        set!(rules.command, self.command);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParsingOverrides {
    pub strip_front_matter: Option<bool>,
    pub strictness: Option<Strictness>,
}

impl ParsingOverrides {
    fn apply(&self, rules: &mut ParsingRules) {
        set!(rules.strip_front_matter, self.strip_front_matter);
        set!(rules.strictness, self.strictness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_layers_win_per_key() {
        let global = ConfigOverrides {
            labels: LabelOverrides {
                auto_label_headings: Some(true),
                prefix: Some("sec".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let chapter = ConfigOverrides {
            labels: LabelOverrides {
                prefix: Some("ch".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = ResolvedConfig::resolve(&[&global, &chapter]).unwrap();
        assert!(config.labels.auto_label_headings);
        assert_eq!(config.labels.prefix, "ch");
    }

    #[test]
    fn callout_maps_merge_per_key() {
        let global = ConfigOverrides {
            callouts: CalloutOverrides {
                environments: Some(
                    [("note".to_string(), "notebox".to_string())].into_iter().collect(),
                ),
                ..Default::default()
            },
            ..Default::default()
        };
        let chapter = ConfigOverrides {
            callouts: CalloutOverrides {
                environments: Some(
                    [("warning".to_string(), "warnbox".to_string())].into_iter().collect(),
                ),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = ResolvedConfig::resolve(&[&global, &chapter]).unwrap();
        assert_eq!(config.callouts.environments.len(), 2);
    }

    #[test]
    fn zero_anchor_level_is_rejected() {
        let overrides = ConfigOverrides {
            headings: HeadingOverrides {
                anchor_level: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            ResolvedConfig::resolve(&[&overrides]),
            Err(ConfigError::InvalidValue { key: "headings.anchor_level", .. })
        ));
    }

    #[test]
    fn heading_commands_clamp_to_fallback() {
        let rules = HeadingRules::default();
        assert_eq!(rules.resolve_command(1), "section");
        assert_eq!(rules.resolve_command(4), "paragraph");
        assert_eq!(rules.resolve_command(6), "paragraph");
    }

    #[test]
    fn anchor_level_shifts_commands() {
        let rules = HeadingRules {
            anchor_level: 2,
            ..Default::default()
        };
        assert_eq!(rules.resolve_command(2), "section");
        assert_eq!(rules.resolve_command(3), "subsection");
        // above the anchor clamps at the first command
        assert_eq!(rules.resolve_command(1), "section");
    }

    #[test]
    fn overrides_deserialize_from_partial_yaml() {
        let yaml = r#"
labels:
  auto_label_headings: true
  label_prefix_unknown_key_ignored: x
math:
  block_style: brackets
"#;
        let overrides: ConfigOverrides = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(overrides.labels.auto_label_headings, Some(true));
        assert_eq!(overrides.math.block_style, Some(MathStyle::Brackets));
    }
}
