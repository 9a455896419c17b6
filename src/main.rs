use std::io;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskbook::cli::Cli;
use taskbook::config::Config;
use taskbook::menu::run_menu;
use taskbook::storage::TaskFile;
use taskbook::store::TaskStore;

fn init_logging() {
    // Logs go to stderr so the menu owns stdout; silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    info!(file = %config.file, "taskbook starting");

    let task_file = TaskFile::new(&config.file);

    // A corrupt task file is fatal at startup: never silently discard data.
    let tasks = match task_file.load() {
        Ok(tasks) => tasks,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let mut store = TaskStore::from_tasks(tasks);

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run_menu(&mut store, &mut stdin.lock(), &mut stdout.lock()) {
        eprintln!("error: {e}");
    }

    // Save exactly once, on exit. A failed save still exits, but loudly.
    if let Err(e) = task_file.save(store.tasks()) {
        eprintln!("error: {e}");
        eprintln!("your tasks could not be saved; changes from this session are lost");
        std::process::exit(1);
    }
}
