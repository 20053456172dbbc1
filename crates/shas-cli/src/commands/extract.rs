//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::{run_pipeline, PipelineRun};
use crate::sink::{write_corpus, CombinedSink, DirectorySink};
use crate::source::JsonExportSource;
use shas_domain::traits::DocumentSource;
use std::fs;
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<PipelineRun> {
    let source = JsonExportSource::new(&args.input, config.extractor.content_field.as_str());
    let documents = source.fetch(&config.extractor.criteria())?;

    let run = run_pipeline(config, &documents, args.skip_consolidation)?;

    let written = if args.combined {
        let mut sink = CombinedSink::new(&args.output);
        write_corpus(&run.corpus, &mut sink)?;
        let path = sink.finish()?;
        format!("Wrote {} entries to {}", run.corpus.len(), path.display())
    } else {
        let mut sink = DirectorySink::new(&args.output);
        let groups = write_corpus(&run.corpus, &mut sink)?;
        format!(
            "Wrote {} entries in {} files under {}",
            run.corpus.len(),
            groups,
            args.output.display()
        )
    };
    info!("{}", written);

    if let Some(report_path) = &args.report {
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(report_path, run.summary.to_json()?)?;
        info!("Wrote report to {}", report_path.display());
    }

    match formatter.format() {
        OutputFormat::Json => println!("{}", formatter.format_summary(&run.summary, usize::MAX)?),
        OutputFormat::Table => {
            println!("{}", formatter.format_stats(&run.stats)?);
            if !args.skip_consolidation {
                println!("{}", formatter.format_report(&run.report)?);
            }
            println!("{}", formatter.success(&written));
        }
    }

    Ok(run)
}
