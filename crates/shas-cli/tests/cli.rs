//! End-to-end command tests against temporary export files

use serde_json::Value;
use shas_cli::cli::{ExtractArgs, SummaryArgs};
use shas_cli::commands::{execute_extract, execute_summary};
use shas_cli::config::OutputFormat;
use shas_cli::{Config, Formatter};
use std::fs;
use std::path::Path;

const EXPORT: &str = r#"[
    {"title": "Rashi on Sanhedrin", "language": "he", "chapter": [["שלום"], ["טוב"]]},
    {"title": "Meiri on Berakhot", "language": "he", "chapter": {"Daf_2a": ["hello", "שלום"]}},
    {"title": "Nuschaot Ktav Yad on Berakhot", "language": "he", "chapter": [["נוסח"]]},
    {"title": "Chidushei Agadot on Shabbat", "language": "he", "chapter": [["אגדה"]]},
    {"title": "Chidushei Halachot on Shabbat", "language": "he", "chapter": [["הלכה"]]},
    {"title": "Rashi on Sanhedrin", "language": "en", "chapter": [["peace"]]}
]"#;

fn write_export(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("export.json");
    fs::write(&path, EXPORT).unwrap();
    path
}

fn formatter() -> Formatter {
    Formatter::new(OutputFormat::Table, false)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_extract_writes_one_file_per_work() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("corpus");
    let report = dir.path().join("reports").join("summary.json");

    let args = ExtractArgs {
        input,
        output: output.clone(),
        report: Some(report.clone()),
        combined: false,
        skip_consolidation: false,
    };
    let run = execute_extract(args, &Config::default(), &formatter()).unwrap();

    let rashi = read_json(&output.join("Rashi").join("Sanhedrin.json"));
    assert_eq!(rashi["Rashi_Sanhedrin.section_1"][0], "שלום");
    assert_eq!(rashi["Rashi_Sanhedrin.section_2"][0], "טוב");

    let meiri = read_json(&output.join("Meiri").join("Berakhot.json"));
    assert_eq!(meiri["Meiri_Berakhot.Daf_2a"], serde_json::json!(["שלום"]));

    let maharsha = read_json(&output.join("Maharsha").join("Shabbat.json"));
    assert_eq!(maharsha["Maharsha_Shabbat.section_1"], serde_json::json!(["אגדה", "הלכה"]));

    assert!(!output.join("Nuschaot_Ktav_Yad").exists());
    assert!(!output.join("Chidushei_Agadot").exists());

    assert_eq!(run.stats.documents_seen, 5);
    assert_eq!(run.report.total_deleted(), 1);

    let summary = read_json(&report);
    assert_eq!(summary["documents_seen"], 5);
    assert_eq!(summary["entries_after"], 4);
    assert_eq!(summary["extractions"].as_array().unwrap().len(), 5);
    assert_eq!(summary["extractions"][0]["title"], "Rashi on Sanhedrin");
    assert_eq!(summary["scholars"]["Chidushei_Agadot"]["tractates"], 1);
}

#[test]
fn test_mapping_sections_written_in_natural_key_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("export.json");
    fs::write(
        &input,
        r#"[{"title": "Meiri on Yoma", "language": "he",
             "chapter": {"Daf_10a": ["י"], "Daf_2b": ["ב"], "Daf_2a": ["א"]}}]"#,
    )
    .unwrap();
    let output = dir.path().join("out");

    let args = ExtractArgs {
        input,
        output: output.clone(),
        report: None,
        combined: false,
        skip_consolidation: true,
    };
    execute_extract(args, &Config::default(), &formatter()).unwrap();

    let meiri = read_json(&output.join("Meiri").join("Yoma.json"));
    let keys: Vec<&String> = meiri.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["Meiri_Yoma.Daf_2a", "Meiri_Yoma.Daf_2b", "Meiri_Yoma.Daf_10a"]);
}

#[test]
fn test_extract_combined_without_consolidation() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("out");

    let args = ExtractArgs {
        input,
        output: output.clone(),
        report: None,
        combined: true,
        skip_consolidation: true,
    };
    let run = execute_extract(args, &Config::default(), &formatter()).unwrap();

    let corpus = read_json(&output.join("corpus.json"));
    let object = corpus.as_object().unwrap();
    assert_eq!(object.len(), 6);
    assert!(object.contains_key("Nuschaot_Ktav_Yad_Berakhot.section_1"));
    assert!(object.contains_key("Chidushei_Agadot_Shabbat.section_1"));
    assert!(run.report.effects.is_empty());
}

#[test]
fn test_summary_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path());

    let args = SummaryArgs {
        input,
        top: 5,
        skip_consolidation: false,
    };
    let summary = execute_summary(args, &Config::default(), &formatter()).unwrap();

    assert_eq!(summary.documents_successful, 5);
    assert_eq!(summary.entries_before, 6);
    assert_eq!(summary.entries_after, 4);
    assert!(summary.author("Maharsha").is_some());

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_empty_export_yields_zeroed_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.json");
    fs::write(&input, "[]").unwrap();

    let args = SummaryArgs {
        input,
        top: 20,
        skip_consolidation: false,
    };
    let summary = execute_summary(args, &Config::default(), &formatter()).unwrap();

    assert_eq!(summary.documents_seen, 0);
    assert_eq!(summary.success_rate, 0.0);
    assert!(summary.authors.is_empty());
}

#[test]
fn test_restricted_vocabulary_and_dry_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("out");

    let mut config = Config::default();
    config.extractor.works = vec!["Shabbat".to_string(), "Berakhot".to_string()];
    config.consolidation.dry_run = true;

    let args = ExtractArgs {
        input,
        output: output.clone(),
        report: None,
        combined: false,
        skip_consolidation: false,
    };
    let run = execute_extract(args, &config, &formatter()).unwrap();

    assert!(!output.join("Rashi").exists());
    assert!(output.join("Nuschaot_Ktav_Yad").join("Berakhot.json").exists());
    assert!(run.report.dry_run);
    assert_eq!(run.report.total_deleted(), 1);
}
