use marktex::config::{ConfigOverrides, LabelOverrides, WikiOverrides};
use marktex::{convert, ResolvedConfig};

#[test]
fn external_link_uses_href() {
    let output = convert("See [the site](https://e.org/docs).", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "See \\href{https://e.org/docs}{the site}.");
}

#[test]
fn self_describing_link_collapses_to_url() {
    let output = convert("[https://e.org](https://e.org)", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "\\url{https://e.org}");
}

#[test]
fn autolink_uses_url() {
    let output = convert("Visit <https://e.org> now.", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "Visit \\url{https://e.org} now.");
}

#[test]
fn internal_link_resolves_to_a_ref() {
    let output = convert("see [intro](#Intro Section)", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "see \\ref{intro-section}");
}

#[test]
fn internal_link_honours_the_label_prefix() {
    let overrides = ConfigOverrides {
        labels: LabelOverrides {
            prefix: Some("sec".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let config = ResolvedConfig::resolve(&[&overrides]).unwrap();
    let output = convert("see [intro](#intro)", &config).unwrap();
    assert_eq!(output.latex, "see \\ref{sec-intro}");
}

#[test]
fn wiki_link_resolves_slug() {
    let output = convert("See [[My Note]].", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "See \\ref{my-note}.");
}

#[test]
fn wiki_alias_can_render_its_display_text() {
    let overrides = ConfigOverrides {
        wiki_links: WikiOverrides {
            alias_template: Some("\\hyperref[{label}]{{text}}".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let config = ResolvedConfig::resolve(&[&overrides]).unwrap();
    let output = convert("See [[My Note|the note]].", &config).unwrap();
    assert_eq!(output.latex, "See \\hyperref[my-note]{the note}.");
}

#[test]
fn link_text_keeps_inline_markup() {
    let output = convert("[a **bold** site](https://e.org)", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "\\href{https://e.org}{a \\textbf{bold} site}");
}

#[test]
fn code_span_protects_link_syntax() {
    let output = convert("`[not](a-link)`", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "\\texttt{[not](a-link)}");
}
