use marktex::config::{CitationOverrides, ConfigOverrides};
use marktex::{convert, ResolvedConfig};

#[test]
fn single_key() {
    let output = convert("[@doe2020]", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "\\cite{doe2020}");
}

#[test]
fn locator_selects_the_second_template() {
    let output = convert("[@doe2020, p. 12; @smith2021]", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "\\cite[p. 12]{doe2020} \\cite{smith2021}");
}

#[test]
fn locator_free_group_shares_one_command() {
    let output = convert("[@doe2020; @smith2021]", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "\\cite{doe2020,smith2021}");
}

#[test]
fn source_order_is_preserved() {
    let output = convert("[@zeta; @alpha]", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "\\cite{zeta,alpha}");
}

#[test]
fn templates_are_configurable() {
    let overrides = ConfigOverrides {
        citations: CitationOverrides {
            cite_template: Some("\\autocite{{keys}}".to_string()),
            locator_template: Some("\\autocite[{locator}]{{keys}}".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let config = ResolvedConfig::resolve(&[&overrides]).unwrap();
    let output = convert("[@doe2020, 44]", &config).unwrap();
    assert_eq!(output.latex, "\\autocite[44]{doe2020}");
}

#[test]
fn citation_embedded_in_prose() {
    let output = convert("Shown by [@doe2020] earlier.", &ResolvedConfig::default()).unwrap();
    assert_eq!(output.latex, "Shown by \\cite{doe2020} earlier.");
}
