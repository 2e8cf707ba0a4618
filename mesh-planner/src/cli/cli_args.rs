use crate::error::AppError;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// mesh-planner TOML configuration file
    #[arg(short, long, value_name = "*.toml")]
    pub config_file: String,

    /// Wavefront OBJ mesh file to plan over
    #[arg(short, long, value_name = "*.obj")]
    pub mesh_file: String,

    /// JSON file containing an array of `{source, target}` point queries
    #[arg(short, long, value_name = "*.json")]
    pub query_file: String,

    /// Destination for the JSON results; defaults to stdout when omitted
    #[arg(short, long, value_name = "*.json")]
    pub output_file: Option<String>,
}

impl CliArgs {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.config_file.ends_with(".toml") {
            return Err(AppError::BuildFailure(format!(
                "config file must be a .toml file, found {}",
                self.config_file
            )));
        }
        Ok(())
    }
}
