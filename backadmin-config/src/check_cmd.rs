use anyhow::{bail, Context, Result};
use backadmin_config::check::build_check_report;
use backadmin_config::list_filters::ListFilterGuesser;
use backadmin_config::pass::ConfigPass;
use backadmin_config::report::render_check_colored;
use backadmin_config::short_types::ShortTypeResolver;
use backadmin_config::types::DefaultTypeRegistry;
use config_tree_core::parse_file;

use crate::cli::{CheckArgs, ReportFormat};
use crate::inputs::load_pass_inputs;

pub fn run_check(args: CheckArgs) -> Result<()> {
    let config = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let inputs = load_pass_inputs(
        args.custom_types.as_ref(),
        args.metadata.as_ref(),
        args.choices.as_ref(),
    )?;

    let guesser = ListFilterGuesser::new(&inputs.metadata, &inputs.choices);
    let resolver = ShortTypeResolver::with_custom_types(inputs.custom_types.clone());
    let passes: [&dyn ConfigPass; 2] = [&guesser, &resolver];

    // Custom alias targets count as registered for unknown-type checks.
    let mut registry = DefaultTypeRegistry::new();
    for target in inputs.custom_types.values() {
        registry.register(target.clone());
    }

    let report = build_check_report(&config, &passes, &registry);

    match args.format {
        ReportFormat::Text => println!("{}", render_check_colored(&report)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.errors > 0 {
        bail!("check failed: {} errors", report.errors);
    }
    if args.strict && report.warnings > 0 {
        bail!("check failed in strict mode: {} warnings", report.warnings);
    }
    Ok(())
}
