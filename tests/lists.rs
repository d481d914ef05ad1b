use marktex::config::{ConfigOverrides, ListOverrides};
use marktex::{convert, ResolvedConfig};

#[test]
fn unordered_list() {
    let output = convert("- a\n- b\n- c", &ResolvedConfig::default()).unwrap();
    assert_eq!(
        output.latex,
        "\\begin{itemize}\n\\item a\n\\item b\n\\item c\n\\end{itemize}"
    );
}

#[test]
fn ordered_list() {
    let output = convert("1. first\n2. second", &ResolvedConfig::default()).unwrap();
    assert_eq!(
        output.latex,
        "\\begin{enumerate}\n\\item first\n\\item second\n\\end{enumerate}"
    );
}

#[test]
fn nested_list_nests_environments() {
    let source = "- outer\n    - inner one\n    - inner two\n- next";
    let output = convert(source, &ResolvedConfig::default()).unwrap();
    assert_eq!(
        output.latex,
        "\\begin{itemize}\n\
         \\item outer\n\
         \\begin{itemize}\n\\item inner one\n\\item inner two\n\\end{itemize}\n\
         \\item next\n\
         \\end{itemize}"
    );
}

#[test]
fn item_markup_is_resolved() {
    let output = convert("- uses `cfg` flags\n- **loud** item", &ResolvedConfig::default()).unwrap();
    assert_eq!(
        output.latex,
        "\\begin{itemize}\n\\item uses \\texttt{cfg} flags\n\\item \\textbf{loud} item\n\\end{itemize}"
    );
}

#[test]
fn multi_paragraph_item_keeps_later_blocks_below_the_item_line() {
    let source = "- lead paragraph\n\n    continuation paragraph\n- short";
    let output = convert(source, &ResolvedConfig::default()).unwrap();
    // continuation lines dedent by the content column of the marker line
    assert_eq!(
        output.latex,
        "\\begin{itemize}\n\
         \\item lead paragraph\n  continuation paragraph\n\
         \\item short\n\
         \\end{itemize}"
    );
}

#[test]
fn environments_are_configurable() {
    let overrides = ConfigOverrides {
        lists: ListOverrides {
            unordered_environment: Some("compactitem".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let config = ResolvedConfig::resolve(&[&overrides]).unwrap();
    let output = convert("- x", &config).unwrap();
    assert_eq!(output.latex, "\\begin{compactitem}\n\\item x\n\\end{compactitem}");
}

#[test]
fn marker_style_switch_splits_lists() {
    let output = convert("- a\n1. b", &ResolvedConfig::default()).unwrap();
    assert_eq!(
        output.latex,
        "\\begin{itemize}\n\\item a\n\\end{itemize}\n\n\\begin{enumerate}\n\\item b\n\\end{enumerate}"
    );
}
