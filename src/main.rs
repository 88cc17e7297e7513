use std::io::{self, BufWriter};
use std::process::ExitCode;

use asciify::cli::{log_filter, Args};
use asciify::config::Config;
use asciify::render::{RenderRequest, Renderer};
use clap::Parser;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures; usage errors exit 1, not clap's 2.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(None, args.verbose);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.log_level.as_deref(), args.verbose);

    let mut request = RenderRequest::new(&args.input)
        .with_scale(args.scale_factor(config.render.default_scale_factor()));
    request.text = args.text.clone();
    request.base_line_height = config.font.base_line_height;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match Renderer::default().render(&request, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("render failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_logging(base: Option<&str>, verbose: u8) {
    let filter = log_filter(base, verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}
