use std::fs;

use anyhow::{Context, Result};
use backadmin_config::list_filters::ListFilterGuesser;
use backadmin_config::pass::{apply_passes, ConfigPass};
use backadmin_config::short_types::ShortTypeResolver;
use config_tree_core::{parse_file, write, write_json};

use crate::cli::{ConfigFormat, ProcessArgs};
use crate::inputs::load_pass_inputs;

pub fn run_process(args: ProcessArgs) -> Result<()> {
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

    let processed = apply_passes(&passes, config)
        .with_context(|| format!("failed to process {}", args.file.display()))?;

    let rendered = match args.format {
        ConfigFormat::Yaml => write(&processed)?,
        ConfigFormat::Json => write_json(&processed)?,
    };

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
