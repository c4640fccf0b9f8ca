use midi_iconv::app::run;
use midi_iconv::cmdline::parse_args;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = parse_args();
    init_logging(args.verbose);
    let stdout = std::io::stdout();
    if let Err(err) = run(&args, &mut stdout.lock()) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
