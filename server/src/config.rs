use common::{DEFAULT_IP, DEFAULT_PORT};

use std::{
  fmt::Display,
  io::{self, BufRead},
  net::{Ipv4Addr, SocketAddrV4},
  str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
  pub ip: Ipv4Addr,
  pub port: u16,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      ip: DEFAULT_IP,
      port: DEFAULT_PORT,
    }
  }
}

impl ServerConfig {
  /// Asks for the listening address on stdin.
  /// With the `auto_connect` feature the defaults are used without asking.
  pub fn prompt() -> io::Result<Self> {
    if cfg!(feature = "auto_connect") {
      return Ok(Self::default());
    }
    Self::read_from(&mut io::stdin().lock())
  }

  pub fn read_from(input: &mut impl BufRead) -> io::Result<Self> {
    let ip = read_value(input, "IP address", DEFAULT_IP)?;
    let port = read_value(input, "port", DEFAULT_PORT)?;
    Ok(Self { ip, port })
  }

  pub fn socket_addr(&self) -> SocketAddrV4 {
    SocketAddrV4::new(self.ip, self.port)
  }
}

/// Reads lines until one parses. An empty line or end of input selects the default.
fn read_value<T>(input: &mut impl BufRead, name: &str, default: T) -> io::Result<T>
where
  T: FromStr + Display,
  T::Err: Display,
{
  loop {
    println!("Enter {} (press enter for default = {}):", name, default);
    let mut line = String::new();
    let nbytes = input.read_line(&mut line)?;
    let line = line.trim();

    if nbytes == 0 || line.is_empty() {
      println!("Using default {} {}", name, default);
      return Ok(default);
    }
    match line.parse::<T>() {
      Ok(value) => return Ok(value),
      Err(e) => println!("Parsing {} failed: {}", name, e),
    }
  }
}

#[cfg(test)]
mod test {
  use super::ServerConfig;
  use common::{DEFAULT_IP, DEFAULT_PORT};
  use std::{io::Cursor, net::Ipv4Addr};

  #[test]
  fn check_defaults_on_empty_input() {
    let config = ServerConfig::read_from(&mut Cursor::new("\n\n")).unwrap();
    assert_eq!(config, ServerConfig::default());
    let config = ServerConfig::read_from(&mut Cursor::new("")).unwrap();
    assert_eq!(config.socket_addr().ip(), &DEFAULT_IP);
    assert_eq!(config.socket_addr().port(), DEFAULT_PORT);
  }

  #[test]
  fn check_invalid_input_is_asked_again() {
    let input = "localhost\n10.0.0.7\n99999\n  4000 \n";
    let config = ServerConfig::read_from(&mut Cursor::new(input)).unwrap();
    assert_eq!(config.ip, Ipv4Addr::new(10, 0, 0, 7));
    assert_eq!(config.port, 4000);
  }
}
