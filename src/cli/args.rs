use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "distrstage", version)]
pub struct Cli {
    /// Inventory version selector; reads <inventoryBase>.<VER>.csv
    #[arg(long)]
    pub inv: Option<String>,

    /// Explicit inventory file path (overrides --inv)
    #[arg(long)]
    pub inventory: Option<PathBuf>,

    /// Settings file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print external commands without running them
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, short = 'v')]
    pub verbose: bool,
}
