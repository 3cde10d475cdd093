use server::{config::ServerConfig, Server};

fn main() -> eyre::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  let config = ServerConfig::prompt()?;
  let server = Server::bind(config.socket_addr())?;
  server.run()
}
