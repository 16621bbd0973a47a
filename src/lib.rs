pub mod api_routes;

use actix_web::{
  dev::ServerHandle,
  middleware,
  web::Data,
  App,
  HttpServer,
};
use clap::Parser;
use lexportal_api_utils::{context::PortalContext, request::client_builder};
use lexportal_db_schema::{source::secret::Secret, utils::build_db_pool};
use lexportal_payment::PaymongoClient;
use lexportal_utils::{error::PortalResult, settings::SETTINGS, VERSION};
use mimalloc::MiMalloc;
use reqwest_middleware::ClientBuilder;
use reqwest_tracing::TracingMiddleware;
use tokio::signal::unix::SignalKind;
use tracing_actix_web::{DefaultRootSpanBuilder, TracingLogger};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(
  version,
  about = "Client portal backend for a law firm",
  long_about = "Client portal backend for a law firm.\n\nServes the consultation and document review submission workflows, the PayMongo payment integration and the uploaded client documents. Connects to a PostgreSQL database and accepts API requests."
)]
pub struct CmdArgs {
  /// Disables the HTTP server. Useful to only verify that configuration
  /// and database are reachable.
  #[arg(long, default_value_t = false, env = "LEXPORTAL_DISABLE_HTTP_SERVER")]
  disable_http_server: bool,
}

/// Placing the main function in lib.rs allows other crates to import and embed the server.
pub async fn start_lexportal_server(args: CmdArgs) -> PortalResult<()> {
  // Print version number to log
  println!("Starting lexportal v{VERSION}");

  // Set up the connection pool
  let pool = build_db_pool(&SETTINGS)?;

  // Initialize the secrets
  let secret = Secret::init(&mut (&pool).into()).await?;

  let client = ClientBuilder::new(client_builder(&SETTINGS).build()?)
    .with(TracingMiddleware::default())
    .build();
  let paymongo = PaymongoClient::new(client.clone(), &SETTINGS.paymongo);

  let context = PortalContext::create(pool, client, paymongo, secret);

  let server = if !args.disable_http_server {
    println!(
      "Starting HTTP server at {}:{}",
      SETTINGS.bind, SETTINGS.port
    );
    Some(create_http_server(context.clone())?)
  } else {
    None
  };

  let mut interrupt = tokio::signal::unix::signal(SignalKind::interrupt())?;
  let mut terminate = tokio::signal::unix::signal(SignalKind::terminate())?;

  tokio::select! {
    _ = tokio::signal::ctrl_c() => {
      tracing::warn!("Received ctrl-c, shutting down gracefully...");
    }
    _ = interrupt.recv() => {
      tracing::warn!("Received interrupt, shutting down gracefully...");
    }
    _ = terminate.recv() => {
      tracing::warn!("Received terminate, shutting down gracefully...");
    }
  }
  if let Some(server) = server {
    server.stop(true).await;
  }

  Ok(())
}

fn create_http_server(context: PortalContext) -> PortalResult<ServerHandle> {
  let bind = (SETTINGS.bind, SETTINGS.port);
  let server = HttpServer::new(move || {
    App::new()
      .wrap(middleware::Logger::new(
        // This is the default log format save for the usage of %{r}a over %a to guarantee to
        // record the client's (forwarded) IP and not the last peer address, since the latter is
        // frequently just a reverse proxy
        "%{r}a '%r' %s %b '%{Referer}i' '%{User-Agent}i' %T",
      ))
      .wrap(middleware::Compress::default())
      .wrap(TracingLogger::<DefaultRootSpanBuilder>::new())
      .app_data(Data::new(context.clone()))
      .configure(api_routes::config)
  })
  .disable_signals()
  .bind(bind)?
  .run();
  let handle = server.handle();
  tokio::task::spawn(server);
  Ok(handle)
}
