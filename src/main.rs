use clap::Parser;
use lexportal_server::{start_lexportal_server, CmdArgs};
use lexportal_utils::error::PortalResult;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[tokio::main]
async fn main() -> PortalResult<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = CmdArgs::parse();
  start_lexportal_server(args).await
}
