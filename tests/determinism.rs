use marktex::{convert, Converter, ResolvedConfig};

const SOURCE: &str = "\
# Overview\n\n\
Prose with **bold**, `code`, $x+y$, a [link](https://e.org), [@doe2020]\n\
and a note.[^n]\n\n\
> [!mystery] Odd kind\n> body\n\n\
| A | B |\n| -- | -- |\n| 1 |\n\n\
[^n]: The note body.\n";

#[test]
fn identical_inputs_give_byte_identical_outputs() {
    let config = ResolvedConfig::default();
    let first = convert(SOURCE, &config).unwrap();
    let second = convert(SOURCE, &config).unwrap();
    assert_eq!(first.latex, second.latex);
    assert_eq!(first.diagnostics, second.diagnostics);
    // the source above produces diagnostics on purpose
    assert_eq!(first.diagnostics.len(), 2);
}

#[test]
fn repeated_converter_calls_share_no_state() {
    let converter = Converter::new(ResolvedConfig::default());
    let first = converter.convert(SOURCE).unwrap();
    let second = converter.convert(SOURCE).unwrap();
    assert_eq!(first.latex, second.latex);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn diagnostics_keep_encounter_order() {
    let config = ResolvedConfig::default();
    let output = convert(SOURCE, &config).unwrap();
    // the table shape problem is found during parsing, the unmapped callout
    // kind during generation
    assert_eq!(output.diagnostics[0].kind, marktex::DiagnosticKind::TableShape);
    assert_eq!(
        output.diagnostics[1].kind,
        marktex::DiagnosticKind::UnmappedCallout
    );
}
