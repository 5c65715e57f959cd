//! Build command implementation

use std::path::PathBuf;
use tracing::info;

use crate::{
    config::{BuildConfig, StatsConfig},
    pipeline,
    sheets::JsonDirSource,
    Result, Season,
};

/// Parameters for the build command
#[derive(Debug)]
pub struct BuildParams {
    pub config: StatsConfig,
    pub season: Season,
    pub raw_dir: PathBuf,
    pub save_dir: PathBuf,
    pub query: Vec<String>,
}

/// Build every artifact from the sheets in `raw_dir` and write them to
/// `save_dir`. With a query, the matching sub-tree is printed as JSON.
pub fn handle_build(params: BuildParams) -> Result<()> {
    let config = BuildConfig {
        stats: params.config,
        season: params.season,
    };
    let source = JsonDirSource::new(&params.raw_dir);

    let output = pipeline::build(&source, &config)?;
    let written = output.write(&params.save_dir)?;
    info!(
        "wrote {} files to {}",
        written.len(),
        params.save_dir.display()
    );

    if !params.query.is_empty() {
        let value = output.query(&params.query)?;
        println!("{}", serde_json::to_string_pretty(&value)?); // tarpaulin::skip
    }

    Ok(())
}
