use clap::Parser;
use log::error;
use mesh_planner::cli::cli_args::CliArgs;
use mesh_planner::cli::run;

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    match run::command_line_runner(&args) {
        Ok(_) => {}
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
