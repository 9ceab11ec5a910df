use std::env;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            whatif::api::run_http_server(port).await?;
        }
        Some("project") => {
            let cli_args = raw_args
                .iter()
                .take(1)
                .chain(raw_args.iter().skip(2))
                .cloned();
            let output = whatif::api::run_projection_cli(cli_args)?;
            println!("{output}");
        }
        _ => {
            eprintln!("Usage: whatif serve [port] | whatif project [flags]");
            std::process::exit(1);
        }
    }

    Ok(())
}
