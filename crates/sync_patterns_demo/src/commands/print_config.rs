use anyhow::Result;

use sync_patterns::Config;

use crate::cli_args::{CliArgs, FormatArg, PrintConfigArgs};

pub fn print_config(_top_args: &CliArgs, args: &PrintConfigArgs) -> Result<()> {
    let config = Config::default();
    let text = match args.format {
        FormatArg::Json => serde_json::to_string_pretty(&config)?,
        FormatArg::Yaml => serde_yaml::to_string(&config)?,
    };
    println!("{text}");
    Ok(())
}
