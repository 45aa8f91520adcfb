use clap::Parser;
use std::path::PathBuf;

use crate::web::DEFAULT_TRUNCATE_LENGTH;

#[derive(Parser, Debug)]
#[command(author, version, about = "Recommends recipes close to a nutrition profile", long_about = None)]
pub struct Cli {
    /// Path to the recipe dataset CSV
    #[arg(short, long, env = "RECIPE_DATASET", default_value = "recipe_final.csv")]
    pub dataset: PathBuf,

    /// Address to bind the HTTP server to (host:port)
    #[arg(short, long, env = "RECIPE_BIND", default_value = "127.0.0.1:5000")]
    pub bind: String,

    /// Characters of ingredient text shown per recipe before it is cut off
    #[arg(long, env = "RECIPE_TRUNCATE_LENGTH", default_value_t = DEFAULT_TRUNCATE_LENGTH)]
    pub truncate_length: usize,

    /// Verbose logging and detailed error responses
    #[arg(long, env = "RECIPE_DEBUG")]
    pub debug: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
