use calstrip::cli::Cli;
use calstrip::error::AppError;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

fn main() {
    // Parse command-line arguments; every usage error exits with 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };
    init_logger(cli.debug);
    if !cli.ignored.is_empty() {
        log::debug!("ignoring {} extra argument(s)", cli.ignored.len());
    }

    // Run the main application logic from the library
    if let Err(e) = calstrip::run(&cli) {
        eprintln!("Error: {:#}", e);
        if matches!(e.downcast_ref::<AppError>(), Some(AppError::MissingArgument)) {
            eprintln!("{}", Cli::command().render_usage());
        }
        std::process::exit(1);
    }
}

fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}
