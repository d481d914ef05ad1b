use marktex::config::{CalloutOverrides, ConfigOverrides};
use marktex::{convert, DiagnosticKind, ResolvedConfig};

fn mapped_config() -> ResolvedConfig {
    let overrides = ConfigOverrides {
        callouts: CalloutOverrides {
            environments: Some(
                [
                    ("note".to_string(), "notice".to_string()),
                    ("warning".to_string(), "alert".to_string()),
                ]
                .into_iter()
                .collect(),
            ),
            ..Default::default()
        },
        ..Default::default()
    };
    ResolvedConfig::resolve(&[&overrides]).unwrap()
}

#[test]
fn mapped_kind_uses_its_environment() {
    let output = convert("> [!note]\n> Keep this in mind.", &mapped_config()).unwrap();
    assert_eq!(output.latex, "\\begin{notice}\nKeep this in mind.\n\\end{notice}");
    assert!(output.diagnostics.is_empty());
}

#[test]
fn kind_lookup_is_case_normalized() {
    let output = convert("> [!NOTE]\n> body", &mapped_config()).unwrap();
    assert_eq!(output.latex, "\\begin{notice}\nbody\n\\end{notice}");
}

#[test]
fn title_renders_through_the_title_template() {
    let output = convert("> [!warning] Hot surface\n> Do not touch.", &mapped_config()).unwrap();
    assert_eq!(
        output.latex,
        "\\begin{alert}[Hot surface]\nDo not touch.\n\\end{alert}"
    );
}

#[test]
fn unmapped_kind_falls_back_with_a_diagnostic() {
    let output = convert("> [!quirk]\n> body", &mapped_config()).unwrap();
    assert_eq!(output.latex, "\\begin{quirkbox}\nbody\n\\end{quirkbox}");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].kind, DiagnosticKind::UnmappedCallout);
}

#[test]
fn body_supports_nested_blocks() {
    let source = "> [!note]\n> Intro line.\n>\n> - first\n> - second";
    let output = convert(source, &mapped_config()).unwrap();
    assert_eq!(
        output.latex,
        "\\begin{notice}\nIntro line.\n\n\\begin{itemize}\n\\item first\n\\item second\n\\end{itemize}\n\\end{notice}"
    );
}

#[test]
fn quoted_prose_without_a_marker_is_plain_content() {
    let output = convert("> just a quote", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "just a quote");
}
