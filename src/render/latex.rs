//! LaTeX generation: a read-only traversal of the document tree under the
//! resolved rules. Cosmetic problems become diagnostics; structural ones
//! abort with a typed error.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::ast::callout::Callout;
use crate::ast::citation::Citation;
use crate::ast::heading::Heading;
use crate::ast::image::Image;
use crate::ast::link::{Link, Target};
use crate::ast::list::{List, ListItem};
use crate::ast::math::Math;
use crate::ast::table::Table;
use crate::ast::{self, Block, Document, Inline};
use crate::config::{MathStyle, ResolvedConfig};
use crate::error::{ConvertError, Diagnostic, DiagnosticKind, RefKind};
use crate::utils::{expand, slugify};

pub(crate) fn render(
    document: &Document,
    config: &ResolvedConfig,
) -> Result<(String, Vec<Diagnostic>), ConvertError> {
    let mut generator = Generator {
        document,
        config,
        diagnostics: Vec::new(),
        labels: HashSet::new(),
    };
    let latex = generator.render_blocks(&document.children)?;
    Ok((latex, generator.diagnostics))
}

struct Generator<'a> {
    document: &'a Document,
    config: &'a ResolvedConfig,
    diagnostics: Vec<Diagnostic>,
    labels: HashSet<String>,
}

impl Generator<'_> {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn render_blocks(&mut self, blocks: &[Block]) -> Result<String, ConvertError> {
        let mut parts = Vec::new();
        for block in blocks {
            let text = self.render_block(block)?;
            if !text.trim().is_empty() {
                parts.push(text);
            }
        }
        Ok(parts.join("\n\n"))
    }

    fn render_block(&mut self, block: &Block) -> Result<String, ConvertError> {
        match block {
            Block::Heading(heading) => self.render_heading(heading),
            Block::Paragraph(content) => self.render_inlines(content),
            Block::List(list) => self.render_list(list),
            Block::CodeBlock(code) => Ok(self.render_code(code)),
            Block::Callout(callout) => self.render_callout(callout),
            Block::Table(table) => self.render_table(table),
            Block::Image(image) => Ok(self.render_image(image)),
            Block::HorizontalRule => Ok(self.config.rule_line.command.clone()),
        }
    }

    fn render_heading(&mut self, heading: &Heading) -> Result<String, ConvertError> {
        let command = self.config.headings.resolve_command(heading.level);
        let title = self.render_inlines(&heading.content)?;
        let mut out = format!("\\{command}{{{title}}}");
        if self.config.labels.auto_label_headings {
            let base = match &heading.label {
                Some(label) => label.clone(),
                None => {
                    let slug = slugify(
                        &ast::plain_text(&heading.content),
                        &self.config.labels.separator,
                    );
                    self.config.labels.compose(&slug)
                }
            };
            let label = self.unique_label(base);
            out.push('\n');
            out.push_str(&expand(&self.config.labels.template, &[("label", &label)]));
        }
        Ok(out)
    }

    /// First occurrence keeps the bare label, later ones count up.
    fn unique_label(&mut self, base: String) -> String {
        if self.labels.insert(base.clone()) {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if self.labels.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn render_list(&mut self, list: &List) -> Result<String, ConvertError> {
        let environment = if list.ordered {
            &self.config.lists.ordered_environment
        } else {
            &self.config.lists.unordered_environment
        }
        .clone();
        let mut items = Vec::with_capacity(list.items.len());
        for item in &list.items {
            items.push(self.render_list_item(item)?);
        }
        let body = items.join("\n");
        Ok(format!(
            "\\begin{{{environment}}}\n{body}\n\\end{{{environment}}}"
        ))
    }

    /// Leading paragraphs ride the `\item` line; any further block starts a
    /// line of its own.
    fn render_list_item(&mut self, item: &ListItem) -> Result<String, ConvertError> {
        let mut segments: Vec<(bool, String)> = Vec::new();
        let mut text_parts: Vec<String> = Vec::new();
        for block in &item.blocks {
            if let Block::Paragraph(content) = block {
                text_parts.push(self.render_inlines(content)?);
                continue;
            }
            if !text_parts.is_empty() {
                segments.push((true, text_parts.join("\n").trim().to_string()));
                text_parts.clear();
            }
            segments.push((false, self.render_block(block)?));
        }
        if !text_parts.is_empty() {
            segments.push((true, text_parts.join("\n").trim().to_string()));
        }

        let Some((first_is_text, first_value)) = segments.first() else {
            return Ok("\\item".to_string());
        };
        let mut lines = Vec::new();
        if *first_is_text && !first_value.is_empty() {
            lines.push(format!("\\item {first_value}"));
        } else {
            lines.push("\\item".to_string());
            if !first_is_text {
                lines.push(first_value.clone());
            }
        }
        for (_, value) in &segments[1..] {
            lines.push(value.clone());
        }
        Ok(lines.join("\n"))
    }

    fn render_code(&self, code: &ast::code::CodeBlock) -> String {
        let rules = &self.config.code_blocks;
        let begin = match &rules.options_template {
            Some(template) => {
                let language = code.language.as_deref().unwrap_or_default();
                let options = expand(template, &[("language", language)]);
                if options.trim().is_empty() {
                    format!("\\begin{{{}}}", rules.environment)
                } else {
                    format!("\\begin{{{}}}[{options}]", rules.environment)
                }
            }
            None => format!("\\begin{{{}}}", rules.environment),
        };
        format!("{begin}\n{}\n\\end{{{}}}", code.literal, rules.environment)
    }

    fn render_callout(&mut self, callout: &Callout) -> Result<String, ConvertError> {
        let rules = &self.config.callouts;
        let normalized = rules.normalize_kind(&callout.kind);
        let environment = match rules
            .environments
            .get(&normalized)
            .or_else(|| rules.environments.get(&callout.kind))
        {
            Some(environment) => environment.clone(),
            None => {
                let environment = expand(&rules.fallback_template, &[("kind", &normalized)]);
                self.report(Diagnostic::new(
                    DiagnosticKind::UnmappedCallout,
                    format!("callout kind '{}' has no mapped environment", callout.kind),
                    None,
                ));
                environment
            }
        };
        let title_template = self.config.callouts.title_template.clone();
        let begin = match (&callout.title, title_template) {
            (Some(title), Some(template)) => {
                let title = self.render_inlines(title)?;
                format!("\\begin{{{environment}}}{}", expand(&template, &[("title", &title)]))
            }
            _ => format!("\\begin{{{environment}}}"),
        };
        let body = self.render_blocks(&callout.children)?;
        Ok(format!("{begin}\n{body}\n\\end{{{environment}}}"))
    }

    fn render_table(&mut self, table: &Table) -> Result<String, ConvertError> {
        let rules_environment = self.config.tables.environment.clone();
        let multicolumn_align = self.config.tables.multicolumn_align.clone();
        let multirow_command = ensure_command(&self.config.tables.multirow_command);
        let hlines = self.config.tables.hlines;

        let col_spec: String = table.alignments.iter().map(|a| a.spec()).collect();
        let mut header_cells = Vec::with_capacity(table.header.len());
        for cell in &table.header {
            header_cells.push(self.render_inlines(&cell.content)?);
        }
        let header = header_cells.join(" & ");

        let mut body_lines = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let mut rendered = Vec::new();
            let mut idx = 0;
            while idx < row.len() {
                let cell = &row[idx];
                let mut latex = self.render_inlines(&cell.content)?;
                if cell.row_span > 1 {
                    latex = format!("{multirow_command}{{{}}}{{*}}{{{latex}}}", cell.row_span);
                }
                if cell.col_span > 1 {
                    latex = format!(
                        "\\multicolumn{{{}}}{{{multicolumn_align}}}{{{latex}}}",
                        cell.col_span
                    );
                    idx += cell.col_span;
                } else {
                    idx += 1;
                }
                rendered.push(latex);
            }
            body_lines.push(format!("{} \\\\", rendered.join(" & ")));
        }
        let body = body_lines.join("\n");

        if hlines {
            Ok(format!(
                "\\begin{{{rules_environment}}}{{{col_spec}}}\n\\hline\n{header} \\\\\n\\hline\n{body}\n\\hline\n\\end{{{rules_environment}}}"
            ))
        } else {
            Ok(format!(
                "\\begin{{{rules_environment}}}{{{col_spec}}}\n{header} \\\\\n{body}\n\\end{{{rules_environment}}}"
            ))
        }
    }

    fn render_image(&mut self, image: &Image) -> String {
        let rules = &self.config.images;
        let prefix = rules.path_prefix.trim_end_matches('/');
        let path = format!("{prefix}/{}{}", image.source, rules.path_suffix);
        if rules.validate_paths {
            let target = match &rules.base_dir {
                Some(base) => base.join(&path),
                None => PathBuf::from(&path),
            };
            if !target.exists() {
                let message = format!("image not found: {}", target.display());
                self.report(Diagnostic::new(DiagnosticKind::MissingImage, message, None));
            }
        }
        let rules = &self.config.images;
        let command = ensure_command(&rules.include_command);
        let options = match image.width {
            Some(width) => format!("[width={width}{}]", rules.width_unit),
            None => String::new(),
        };
        let include = format!("{command}{options}{{{path}}}");
        if rules.centered {
            format!("\\begin{{center}}\n{include}\n\\end{{center}}")
        } else {
            include
        }
    }

    fn render_inlines(&mut self, nodes: &[Inline]) -> Result<String, ConvertError> {
        let mut out = String::new();
        for node in nodes {
            out.push_str(&self.render_inline(node)?);
        }
        Ok(out)
    }

    fn render_inline(&mut self, node: &Inline) -> Result<String, ConvertError> {
        match node {
            Inline::Text(text) => Ok(self.normalize_text(text)),
            Inline::Emphasis { strong, children } => {
                let command = if *strong {
                    ensure_command(&self.config.inline.bold_command)
                } else {
                    ensure_command(&self.config.inline.italic_command)
                };
                let inner = self.render_inlines(children)?;
                Ok(format!("{command}{{{inner}}}"))
            }
            Inline::Code(literal) => {
                let command = ensure_command(&self.config.inline.code_command);
                Ok(format!("{command}{{{}}}", self.escape_code(literal)))
            }
            Inline::Link(link) => self.render_link(link),
            Inline::Citation(citation) => Ok(self.render_citation(citation)),
            Inline::FootnoteRef(id) => self.render_footnote_ref(id),
            Inline::Marker { symbol, text } => Ok(self.render_marker(symbol, text)),
            Inline::Math(math) => Ok(self.render_math(math)),
            Inline::HardBreak => Ok(format!(
                "{} ",
                ensure_command(&self.config.inline.line_break_command)
            )),
        }
    }

    fn render_link(&mut self, link: &Link) -> Result<String, ConvertError> {
        let rules = &self.config.links;
        match &link.target {
            Target::Internal(slug) => {
                if slug.is_empty() {
                    return Err(ConvertError::Reference {
                        kind: RefKind::InternalLink,
                        name: ast::plain_text(&link.children),
                    });
                }
                let label = self.config.labels.compose(slug);
                Ok(expand(&rules.internal_template, &[("label", &label)]))
            }
            Target::External(url) => {
                if link.children.is_empty() {
                    return Ok(expand(&rules.autolink_template, &[("url", url)]));
                }
                let url_only = rules.url_only_template.clone();
                let external = rules.external_template.clone();
                let text = self.render_inlines(&link.children)?;
                if ast::plain_text(&link.children).trim() == url.trim() {
                    Ok(expand(&url_only, &[("url", url)]))
                } else {
                    Ok(expand(&external, &[("url", url), ("text", &text)]))
                }
            }
            Target::Wiki(slug) => {
                if slug.is_empty() {
                    return Err(ConvertError::Reference {
                        kind: RefKind::InternalLink,
                        name: ast::plain_text(&link.children),
                    });
                }
                let display = ast::plain_text(&link.children);
                let aliased =
                    slugify(&display, &self.config.wiki_links.separator) != *slug;
                let template = if aliased {
                    self.config.wiki_links.alias_template.clone()
                } else {
                    self.config.wiki_links.link_template.clone()
                };
                let text = self.render_inlines(&link.children)?;
                Ok(expand(&template, &[("label", slug), ("text", &text)]))
            }
        }
    }

    /// Locator-free groups collapse into one cite command; any locator
    /// forces one command per entry.
    fn render_citation(&self, citation: &Citation) -> String {
        let rules = &self.config.citations;
        if citation.entries.iter().all(|entry| entry.locator.is_none()) {
            let keys = citation
                .entries
                .iter()
                .map(|entry| entry.key.as_str())
                .collect::<Vec<_>>()
                .join(&rules.key_separator);
            return expand(&rules.cite_template, &[("keys", &keys)]);
        }
        citation
            .entries
            .iter()
            .map(|entry| match &entry.locator {
                Some(locator) => expand(
                    &rules.locator_template,
                    &[("locator", locator.as_str()), ("keys", entry.key.as_str())],
                ),
                None => expand(&rules.cite_template, &[("keys", entry.key.as_str())]),
            })
            .collect::<Vec<_>>()
            .join(&rules.group_separator)
    }

    fn render_footnote_ref(&mut self, id: &str) -> Result<String, ConvertError> {
        let Some(body) = self.document.footnote(id) else {
            return Err(ConvertError::Reference {
                kind: RefKind::Footnote,
                name: id.to_string(),
            });
        };
        let mut parts = Vec::new();
        for block in body {
            let text = self.render_block(block)?;
            if !text.trim().is_empty() {
                parts.push(text);
            }
        }
        let text = parts.join(" ");
        Ok(expand(&self.config.footnotes.template, &[("text", &text)]))
    }

    fn render_marker(&self, symbol: &str, text: &str) -> String {
        let text = self.normalize_text(text);
        match self.config.inline.markers.get(symbol) {
            Some(template) if template.contains("{text}") || template.contains("{content}") => {
                expand(template, &[("text", &text), ("content", &text)])
            }
            Some(command) => format!("{}{{{text}}}", ensure_command(command)),
            None => text,
        }
    }

    fn render_math(&self, math: &Math) -> String {
        if math.display {
            match self.config.math.block_style {
                MathStyle::Dollars => format!("$${}$$", math.literal),
                MathStyle::Brackets => format!("\\[{}\\]", math.literal),
            }
        } else {
            expand(
                &self.config.inline.math_template,
                &[("content", &math.literal), ("text", &math.literal)],
            )
        }
    }

    fn normalize_text(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (from, to) in &self.config.inline.normalization {
            out = out.replace(from, to);
        }
        out
    }

    fn escape_code(&self, literal: &str) -> String {
        let mut out = String::with_capacity(literal.len());
        for ch in literal.chars() {
            match self.config.inline.escape_map.get(&ch) {
                Some(escape) => out.push_str(escape),
                None => out.push(ch),
            }
        }
        out
    }
}

fn ensure_command(command: &str) -> String {
    let command = command.trim();
    if command.starts_with('\\') {
        command.to_string()
    } else {
        format!("\\{command}")
    }
}
