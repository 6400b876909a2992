use clap::Parser;
use notes_api::cli::{
    handle_add, handle_delete, handle_get, handle_list, handle_serve, load_config, Cli, Commands,
};
use notes_api::Result;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), &cli.storage)?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Serve { bind, port } => handle_serve(config, bind, port),
        Commands::List { json } => handle_list(&config, json),
        Commands::Add {
            content,
            important,
            json,
        } => handle_add(&config, content, important, json),
        Commands::Get { id, json } => handle_get(&config, id, json),
        Commands::Delete { id } => handle_delete(&config, id),
    }
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so `--json` output stays clean.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
