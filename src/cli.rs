use clap::Parser;

/// taskbook — interactive to-do list with a local task file
#[derive(Parser, Debug, Clone)]
#[command(name = "taskbook", version, about)]
pub struct Cli {
    /// Path to the task file (default: tasks.json)
    #[arg(long)]
    pub file: Option<String>,

    /// Path to config file (default: taskbook.toml, if present)
    #[arg(long)]
    pub config: Option<String>,
}
