//! Summary command implementation.

use crate::cli::SummaryArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::run_pipeline;
use crate::source::JsonExportSource;
use shas_domain::traits::DocumentSource;
use shas_report::Summary;

/// Execute the summary command.
pub fn execute_summary(args: SummaryArgs, config: &Config, formatter: &Formatter) -> Result<Summary> {
    let source = JsonExportSource::new(&args.input, config.extractor.content_field.as_str());
    let documents = source.fetch(&config.extractor.criteria())?;

    let run = run_pipeline(config, &documents, args.skip_consolidation)?;
    println!("{}", formatter.format_summary(&run.summary, args.top)?);

    Ok(run.summary)
}
