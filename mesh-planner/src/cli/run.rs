use super::cli_args::CliArgs;
use crate::app_config::AppConfig;
use crate::error::AppError;
use crate::mesh_io::read_obj;
use itertools::Itertools;
use log::{error, info};
use mesh_planner_core::facade::{PlanRecord, Planner};
use mesh_planner_core::model::Point3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One `{source, target}` query read from the user's query file.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanQuery {
    pub source: [f64; 3],
    pub target: [f64; 3],
}

#[derive(Debug, Clone, Serialize)]
struct QueryResult {
    source: [f64; 3],
    target: [f64; 3],
    results: Vec<MetricOutcome>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum MetricOutcome {
    Ok(PlanRecord),
    Err { metric: mesh_planner_core::weight::Metric, error: String },
}

/// Runs the planner from the command line: loads configuration and mesh
/// once, then plans every configured metric for every query in the query
/// file (spec §5, §6).
pub fn command_line_runner(args: &CliArgs) -> Result<(), AppError> {
    args.validate()?;

    let config_path = Path::new(&args.config_file);
    let config = AppConfig::try_from(config_path)?;

    if let Some(parallelism) = config.system.parallelism {
        rayon::ThreadPoolBuilder::new()
            .num_threads(parallelism)
            .build_global()
            .map_err(|e| AppError::BuildFailure(format!("failed to configure thread pool: {e}")))?;
    }

    info!("reading mesh from {}", &args.mesh_file);
    let mesh = read_obj(Path::new(&args.mesh_file))?;
    info!("mesh has {} vertices, {} triangles", mesh.n_vertices(), mesh.n_triangles());

    info!("reading queries from {}", &args.query_file);
    let query_file = File::open(&args.query_file)?;
    let queries: Vec<PlanQuery> = serde_json::from_reader(BufReader::new(query_file))?;

    let planner = Planner::new(&mesh, &config.planner, None);

    let results: Vec<QueryResult> = queries
        .iter()
        .map(|query| run_query(&planner, &config.metrics, query))
        .collect_vec();

    write_results(&results, args.output_file.as_deref())
}

fn run_query(planner: &Planner, metrics: &[mesh_planner_core::weight::Metric], query: &PlanQuery) -> QueryResult {
    let source = Point3::new(query.source[0], query.source[1], query.source[2]);
    let target = Point3::new(query.target[0], query.target[1], query.target[2]);

    let outcomes = planner
        .plan_many(metrics, source, target)
        .into_iter()
        .map(|(metric, result)| match result {
            Ok(record) => MetricOutcome::Ok(record),
            Err(e) => {
                error!("query {:?} -> {:?}: metric {metric} failed: {e}", query.source, query.target);
                MetricOutcome::Err { metric, error: e.to_string() }
            }
        })
        .collect();

    QueryResult { source: query.source, target: query.target, results: outcomes }
}

fn write_results(results: &[QueryResult], output_file: Option<&str>) -> Result<(), AppError> {
    match output_file {
        Some(path) => {
            let file = File::create(path)?;
            serde_json::to_writer_pretty(BufWriter::new(file), results)?;
            Ok(())
        }
        None => {
            let stdout = std::io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), results)?;
            println!();
            Ok(())
        }
    }
}
