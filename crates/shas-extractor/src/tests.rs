//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{parse_export, DocumentQuery, Extractor, ExtractorConfig, FailureKind};
    use shas_domain::{CanonicalKey, ContentNode, SourceDocument, Structure};

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[test]
    fn test_list_content_end_to_end() {
        let extractor = Extractor::new(ExtractorConfig::with_works(["Sanhedrin"])).unwrap();
        let docs = vec![SourceDocument::with_sections(
            "Rashi on Sanhedrin",
            "he",
            vec![vec!["שלום"], vec!["טוב"]],
        )];

        let result = extractor.extract_all(&docs);

        let rendered: Vec<(String, Vec<String>)> = result
            .corpus
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                (s("Rashi_Sanhedrin.section_1"), vec![s("שלום")]),
                (s("Rashi_Sanhedrin.section_2"), vec![s("טוב")]),
            ]
        );
        assert_eq!(result.stats.documents_seen, 1);
        assert_eq!(result.stats.documents_successful, 1);
        assert_eq!(result.stats.total_sections, 2);
        assert_eq!(result.stats.total_blocks, 2);
    }

    #[test]
    fn test_mapping_content_end_to_end() {
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let docs = vec![SourceDocument::new(
            "Meiri on Berakhot",
            "he",
            Structure::KeyedMapping(vec![(s("Daf_2a"), ContentNode::text_list(["hello", "שלום"]))]),
        )];

        let result = extractor.extract_all(&docs);

        assert_eq!(
            result.corpus.get_rendered("Meiri_Berakhot.Daf_2a"),
            Some(&vec![s("שלום")])
        );
        assert_eq!(result.stats.blocks_filtered, 1);
    }

    #[test]
    fn test_unresolvable_titles_contribute_nothing() {
        let extractor = Extractor::new(ExtractorConfig::with_works(["Sanhedrin"])).unwrap();
        let docs = vec![
            SourceDocument::with_sections("Rashi Sanhedrin", "he", vec![vec!["א"]]),
            SourceDocument::with_sections("Rashi on Genesis", "he", vec![vec!["ב"]]),
        ];

        let result = extractor.extract_all(&docs);

        assert!(result.corpus.is_empty());
        assert_eq!(result.stats.documents_seen, 2);
        assert_eq!(result.stats.documents_successful, 0);
        assert_eq!(result.stats.title_failures, 2);
        assert!(result.failures.iter().all(|f| f.kind == FailureKind::TitleParse));
        assert_eq!(result.failures[0].reason, "missing separator");
        assert_eq!(result.failures[1].reason, "unknown work");
    }

    #[test]
    fn test_empty_input() {
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let result = extractor.extract_all(&[]);

        assert!(result.corpus.is_empty());
        assert!(result.records.is_empty());
        assert_eq!(result.stats.documents_seen, 0);
        assert_eq!(result.stats.success_rate(), 0.0);
    }

    #[test]
    fn test_non_target_script_document_is_empty_extraction() {
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let docs = vec![SourceDocument::with_sections(
            "Steinsaltz on Yoma",
            "he",
            vec![vec!["translation only"]],
        )];

        let result = extractor.extract_all(&docs);

        assert!(result.corpus.is_empty());
        assert_eq!(result.stats.empty_extractions, 1);
        assert_eq!(result.failures[0].kind, FailureKind::EmptyExtraction);
        assert!(result.stats.authors.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let docs: Vec<SourceDocument> = ["Berakhot", "Shabbat", "Eruvin", "Pesachim", "Yoma"]
            .iter()
            .flat_map(|work| {
                vec![
                    SourceDocument::with_sections(
                        format!("Rashi on {}", work),
                        "he",
                        vec![vec!["אמר רב", "x"], vec!["תנו רבנן"]],
                    ),
                    SourceDocument::with_sections(
                        format!("Tosafot on {}", work),
                        "he",
                        vec![vec!["ואם תאמר"]],
                    ),
                    SourceDocument::new(format!("Tosafot {}", work), "he", Structure::Absent),
                ]
            })
            // Same key twice: last write wins in input order
            .chain(std::iter::once(SourceDocument::with_sections(
                "Rashi on Yoma",
                "he",
                vec![vec!["סוף"]],
            )))
            .collect();

        let sequential = Extractor::new(ExtractorConfig::default()).unwrap().extract_all(&docs);

        let mut config = ExtractorConfig::default();
        config.parallel = true;
        let parallel = Extractor::new(config).unwrap().extract_all(&docs);

        assert_eq!(sequential.corpus, parallel.corpus);
        assert_eq!(sequential.stats, parallel.stats);
        assert_eq!(sequential.failures, parallel.failures);
        assert_eq!(sequential.records, parallel.records);
        assert_eq!(
            parallel.corpus.get(&CanonicalKey::new("Rashi", "Yoma", "section_1")),
            Some(&vec![s("סוף")])
        );
    }

    #[test]
    fn test_truncated_run_yields_partial_stats() {
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let docs = vec![
            SourceDocument::with_sections("Rashi on Yoma", "he", vec![vec!["א"]]),
            SourceDocument::with_sections("Ran on Nedarim", "he", vec![vec!["ב"]]),
            SourceDocument::with_sections("Meiri on Sotah", "he", vec![vec!["ג"]]),
        ];

        let mut ctx = extractor.begin();
        for doc in docs.iter().take(2) {
            ctx.ingest(doc).unwrap();
        }
        assert_eq!(ctx.stats().documents_seen, 2);

        let result = ctx.finish();
        assert_eq!(result.corpus.len(), 2);
        assert_eq!(result.stats.distinct_authors(), 2);
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let docs = vec![SourceDocument::with_sections("Rashi on Yoma", "he", vec![vec!["א"]])];

        let first = extractor.extract_all(&docs);
        let second = extractor.extract_all(&docs);
        assert_eq!(first.stats, second.stats);
        assert_eq!(second.stats.overwrites, 0);
    }

    #[test]
    fn test_export_through_query_and_extractor() {
        let config = ExtractorConfig::default();
        let export = r#"[
            {"title": "Rashi on Berakhot", "language": "he", "chapter": [["שלום"]]},
            {"title": "Rashi on Berakhot", "language": "en", "chapter": [["peace"]]},
            {"title": "Rashi on Genesis", "language": "he", "chapter": [["בראשית"]]},
            {"title": "Ritva on Yoma", "language": "he", "chapter": {"Daf_2a": ["א"]}}
        ]"#;

        let docs = parse_export(export, &config.content_field).unwrap();
        let query = DocumentQuery::new(&config.criteria()).unwrap();
        let docs = query.apply(docs);
        assert_eq!(docs.len(), 2);

        let result = Extractor::new(config).unwrap().extract_all(&docs);
        let keys: Vec<String> = result.corpus.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec![s("Rashi_Berakhot.section_1"), s("Ritva_Yoma.Daf_2a")]);
    }

    #[test]
    fn test_words_counted_in_target_script_only() {
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let docs = vec![SourceDocument::with_sections(
            "Rashi on Yoma",
            "he",
            vec![vec!["אמר רבא (Rava) שלום"]],
        )];

        let result = extractor.extract_all(&docs);
        assert_eq!(result.stats.total_words, 3);
    }
}
