//! Rules command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the rules command.
pub fn execute_rules(config: &Config, formatter: &Formatter) -> Result<usize> {
    let rules = config.consolidation.rule_set()?;

    println!("{}", formatter.format_rules(rules.rules())?);
    if !config.consolidation.known_works.is_empty() {
        println!(
            "{}",
            formatter.info(&format!(
                "Checked against {} known works",
                config.consolidation.known_works.len()
            ))
        );
    }
    if config.consolidation.dry_run {
        println!("{}", formatter.warning("Dry run enabled"));
    }
    println!("{}", formatter.success(&format!("{} rules valid", rules.len())));

    Ok(rules.len())
}
