mod cmd;

use clap::Parser;
use cmd::config::{Effective, GenArgs};

#[derive(Parser)]
#[command(name = "dispatch-gen", about = "Static dispatch generator for conversion call sites")]
struct Cli {
    #[command(flatten)]
    args: GenArgs,
}

fn main() {
    // Logs go to stderr so `--out -` leaves stdout to the artifact.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let eff = match Effective::new(&cli.args) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cmd::generate::run(&eff) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
