use marktex::config::{ConfigOverrides, LabelOverrides};
use marktex::{convert, ResolvedConfig};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Conversion is a total function over text: any input either converts
    // or fails with a typed error, never a panic.
    #[test]
    fn conversion_never_panics(input in ".*") {
        let config = ResolvedConfig::default();
        let _ = convert(&input, &config);
    }

    #[test]
    fn conversion_never_panics_on_marker_soup(
        input in proptest::collection::vec(
            proptest::sample::select(vec![
                '[', ']', '(', ')', '*', '_', '`', '#', '!', '>', '|', '$', '^', '@', '<', '-', '\n', ' ', 'a',
            ]),
            0..160,
        )
    ) {
        let source: String = input.into_iter().collect();
        let config = ResolvedConfig::default();
        let _ = convert(&source, &config);
    }

    // Text inside an inline code span is never reinterpreted by the
    // link/emphasis/marker rules.
    #[test]
    fn code_spans_stay_opaque(
        text in "[a-z]{1,8}", url in "[a-z]{1,8}"
    ) {
        let source = format!("`[{text}]({url})`");
        let config = ResolvedConfig::default();
        let output = convert(&source, &config).unwrap();
        prop_assert_eq!(output.latex, format!("\\texttt{{[{text}]({url})}}"));
    }

    // Identical (text, config) pairs convert to identical output.
    #[test]
    fn conversion_is_deterministic(input in "[ -~\n]{0,200}") {
        let config = ResolvedConfig::default();
        let first = convert(&input, &config);
        let second = convert(&input, &config);
        prop_assert_eq!(first, second);
    }

    // N headings sharing one title always get N distinct labels.
    #[test]
    fn auto_labels_stay_unique(n in 2usize..6) {
        let overrides = ConfigOverrides {
            labels: LabelOverrides {
                auto_label_headings: Some(true),
                prefix: Some("sec".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = ResolvedConfig::resolve(&[&overrides]).unwrap();
        let source = vec!["# Overview"; n].join("\n\n");
        let output = convert(&source, &config).unwrap();
        let labels: Vec<&str> = output
            .latex
            .lines()
            .filter(|line| line.starts_with("\\label{"))
            .collect();
        prop_assert_eq!(labels.len(), n);
        let mut unique = labels.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), n);
    }
}
