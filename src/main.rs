use std::env;
use std::io::{self, Write};
use std::process;

use feature_check::{process_infos, usage, Args, Fetcher, Reporter, EXIT_USAGE, STRICT_ENV};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let argv = env::args().collect::<Vec<_>>();
    let args = if let Some(args) = Args::parse_from(argv.iter().cloned()) {
        args
    } else {
        let program = argv.first().map(String::as_str).unwrap_or_default();
        println!("{}", usage(program));
        process::exit(EXIT_USAGE);
    };
    let strict = env::var_os(STRICT_ENV).is_some();

    let fetcher = Fetcher::builder().build();
    let fc_info_url = fetcher.info_url(&args.fc_host)?;
    let vc_info_url = fetcher.info_url(&args.vc_host)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    Reporter::new(&mut stdout).retrieving()?;
    stdout.flush()?;

    let outcome = process_infos(
        fetcher.fetch_infos(fc_info_url, vc_info_url),
        args.verbose,
        &mut stdout,
    )
    .await?;
    stdout.flush()?;

    if outcome.is_failed() {
        log::debug!("check failed (strict: {})", strict);
    }
    let code = outcome.exit_code(strict);
    if code != 0 {
        process::exit(code);
    }
    Ok(())
}
