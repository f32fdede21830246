use clap::Parser;
use std::path::PathBuf;

/// Plugin option forms - resolve declared option fields against stored values
#[derive(Parser, Debug, Clone)]
#[command(name = "optionform", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "OPTIONFORM_CONFIG", default_value = "optionform.toml")]
    pub config: PathBuf,

    /// Folder name of the plugin whose options are rendered
    #[arg(short, long, env = "OPTIONFORM_PLUGIN")]
    pub plugin: String,

    /// Render the form for an administrator
    #[arg(long, env = "OPTIONFORM_ADMIN", num_args = 0..=1, default_missing_value = "true")]
    pub admin: Option<bool>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Validate a JSON file of submitted values instead of printing the form
    #[arg(long)]
    pub validate: Option<PathBuf>,
}
