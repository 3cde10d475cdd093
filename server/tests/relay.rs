use common::{
  game::{MoveError, Outcome},
  message::{receive_message, send_message, ClientMessage, ServerMessage},
  GlobalPos, Player,
};
use server::Server;

use std::{
  net::{SocketAddr, TcpStream},
  thread,
  time::{Duration, Instant},
};

struct Client {
  stream: TcpStream,
}

impl Client {
  fn connect(addr: SocketAddr, room: &str) -> Self {
    let stream = TcpStream::connect(addr).unwrap();
    stream
      .set_read_timeout(Some(Duration::from_secs(5)))
      .unwrap();
    let mut client = Self { stream };
    client.send(ClientMessage::JoinRoom(room.into()));
    client
  }

  fn send(&mut self, msg: ClientMessage) {
    send_message(&msg, &mut self.stream).unwrap();
  }
  fn receive(&mut self) -> ServerMessage {
    receive_message(&mut self.stream).unwrap()
  }
}

fn start_server() -> (SocketAddr, server::registry::Registry<TcpStream>) {
  let server = Server::bind("127.0.0.1:0").unwrap();
  let addr = server.local_addr().unwrap();
  let registry = server.registry().clone();
  thread::spawn(move || server.run());
  (addr, registry)
}

/// Connects two clients to `room` and returns them ordered as (starting, other).
fn seated_pair(addr: SocketAddr, room: &str) -> ((Client, Player), (Client, Player)) {
  let mut first = Client::connect(addr, room);
  let first_symbol = first.receive().symbol_assignment().unwrap();
  let mut second = Client::connect(addr, room);
  let second_symbol = second.receive().symbol_assignment().unwrap();
  assert_eq!(second_symbol, first_symbol.other());

  let starting = first.receive().round_start().unwrap();
  assert_eq!(second.receive().round_start(), Some(starting));

  if starting == first_symbol {
    ((first, first_symbol), (second, second_symbol))
  } else {
    ((second, second_symbol), (first, first_symbol))
  }
}

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
  let deadline = Instant::now() + Duration::from_secs(5);
  while Instant::now() < deadline {
    if condition() {
      return true;
    }
    thread::sleep(Duration::from_millis(10));
  }
  false
}

#[test]
fn check_moves_are_validated_and_forwarded() {
  let (addr, _) = start_server();
  let ((mut a, a_symbol), (mut b, _)) = seated_pair(addr, "moves");

  b.send(ClientMessage::PlaceSymbol(GlobalPos::new(3, 3)));
  assert_eq!(b.receive(), ServerMessage::MoveRejected(MoveError::NotYourTurn));

  // meta (1, 1), local (0, 0): sends the opponent to the top left board
  a.send(ClientMessage::PlaceSymbol(GlobalPos::new(3, 3)));
  let placed = ServerMessage::SymbolPlaced(a_symbol, GlobalPos::new(3, 3));
  assert_eq!(a.receive(), placed);
  assert_eq!(b.receive(), placed);

  b.send(ClientMessage::PlaceSymbol(GlobalPos::new(8, 8)));
  assert_eq!(b.receive(), ServerMessage::MoveRejected(MoveError::IllegalMove));
  b.send(ClientMessage::PlaceSymbol(GlobalPos::new(1, 2)));
  assert!(matches!(b.receive(), ServerMessage::SymbolPlaced(_, _)));
  assert!(matches!(a.receive(), ServerMessage::SymbolPlaced(_, _)));
}

#[test]
fn check_rooms_are_isolated() {
  let (addr, registry) = start_server();
  let ((mut a, _), (mut b, _)) = seated_pair(addr, "first");

  let mut late = Client::connect(addr, "first");
  assert_eq!(late.receive(), ServerMessage::RoomFull);

  let mut other = Client::connect(addr, "second");
  assert!(other.receive().symbol_assignment().is_some());
  assert!(wait_until(|| registry.len() == 2));

  // a move in one room is not seen in the other
  a.send(ClientMessage::PlaceSymbol(GlobalPos::new(0, 0)));
  assert!(matches!(a.receive(), ServerMessage::SymbolPlaced(_, _)));
  assert!(matches!(b.receive(), ServerMessage::SymbolPlaced(_, _)));
  other.send(ClientMessage::PlaceSymbol(GlobalPos::new(0, 0)));
  assert_eq!(
    other.receive(),
    ServerMessage::MoveRejected(MoveError::GameOver)
  );

  drop(other);
  assert!(wait_until(|| !registry.contains("second")));
  assert!(registry.contains("first"));
}

#[test]
fn check_give_up_and_rematch() {
  let (addr, registry) = start_server();
  let ((mut a, a_symbol), (mut b, _)) = seated_pair(addr, "rematch");

  b.send(ClientMessage::GiveUp);
  assert_eq!(a.receive(), ServerMessage::OpponentGiveUp);
  let ServerMessage::RoundEnd(outcome, stats) = a.receive() else {
    panic!("expected round end");
  };
  assert_eq!(outcome, Outcome::Win(a_symbol));
  assert_eq!(stats.ngames, 1);
  assert_eq!(b.receive(), ServerMessage::RoundEnd(outcome, stats));

  a.send(ClientMessage::StartRoundRequest);
  b.send(ClientMessage::StartRoundRequest);
  let starting = a.receive().round_start().unwrap();
  assert_eq!(b.receive().round_start(), Some(starting));

  drop(a);
  assert_eq!(b.receive(), ServerMessage::OpponentLeft);
  drop(b);
  assert!(wait_until(|| registry.is_empty()));
}
