pub mod config;
pub mod registry;
pub mod room;

mod connection;

use registry::Registry;

use std::{
  io,
  net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
  thread,
};

use eyre::WrapErr;
use tracing::{info, warn};

/// The relay: accepts clients, seats them in rooms and serves each on its own thread.
pub struct Server {
  listener: TcpListener,
  registry: Registry<TcpStream>,
}

impl Server {
  pub fn bind(addr: impl ToSocketAddrs) -> eyre::Result<Self> {
    let listener = TcpListener::bind(addr).wrap_err("binding listener failed")?;
    Ok(Self {
      listener,
      registry: Registry::default(),
    })
  }

  pub fn local_addr(&self) -> io::Result<SocketAddr> {
    self.listener.local_addr()
  }
  pub fn registry(&self) -> &Registry<TcpStream> {
    &self.registry
  }

  /// Accepts connections until the listener fails.
  pub fn run(self) -> eyre::Result<()> {
    info!(addr = %self.local_addr()?, "waiting for connections...");
    for stream in self.listener.incoming() {
      let stream = match stream {
        Ok(s) => s,
        Err(e) => {
          warn!(%e, "accepting connection failed");
          continue;
        }
      };
      let registry = self.registry.clone();
      thread::spawn(move || {
        if let Err(e) = connection::handle_connection(stream, registry) {
          warn!("connection closed with error: {:#}", e);
        }
      });
    }
    Ok(())
  }
}
