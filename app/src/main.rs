mod config;
mod input;
mod render;
mod shell;

use clap::Parser;
use common::{log, logger};

#[derive(Parser)]
#[command(name = "snake_arcade")]
struct Args {
    /// Path to the YAML config. Defaults to a file next to the executable.
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Arcade".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let manager = config::get_config_manager(args.config.as_deref());
    let app_config = manager
        .get_config()
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    let mut shell = shell::Shell::new(&app_config)?;
    let mut commands = input::spawn_input_task();
    shell.run(&mut commands).await;

    log!("Goodbye");
    Ok(())
}
