//! 3x3x3 twisty puzzle simulator.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();

    color_eyre::install().expect("error initializing panic handler");

    let prefs = cubesim_prefs::Preferences::load(args.prefs.as_deref());
    cli::exec(args.subcommand, &prefs)
}
