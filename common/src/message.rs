use crate::{
  game::{MoveError, Outcome, Stats},
  GlobalPos, Player,
};

use std::io::{self, Read, Write};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

type MessageLength = u32;
const NBYTES_MESSAGE_LENGTH: usize = std::mem::size_of::<MessageLength>();
/// Upper bound on a single frame, larger length prefixes are treated as garbage.
const MAX_MESSAGE_LENGTH: usize = 64 * 1024;

pub type RoomId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
  JoinRoom(RoomId),
  PlaceSymbol(GlobalPos),
  StartRoundRequest,
  GiveUp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerMessage {
  SymbolAssignment(Player),
  RoundStart(Player),
  SymbolPlaced(Player, GlobalPos),
  MoveRejected(MoveError),
  RoundEnd(Outcome, Stats),
  OpponentGiveUp,
  OpponentLeft,
  RoomFull,
}

impl ServerMessage {
  pub fn symbol_assignment(self) -> Option<Player> {
    match self {
      Self::SymbolAssignment(s) => Some(s),
      _ => None,
    }
  }
  pub fn round_start(self) -> Option<Player> {
    match self {
      Self::RoundStart(s) => Some(s),
      _ => None,
    }
  }
}

fn invalid_data(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> io::Error {
  io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Sends a message (any serializable type) to the given stream.
/// This function uses `write_all`, so it will block until the full message is sent.
pub fn send_message<Msg: Serialize>(msg: &Msg, stream: &mut impl Write) -> io::Result<()> {
  let msg_string = ron::to_string(msg).map_err(invalid_data)?;
  let msg_bytes = msg_string.as_bytes();
  if msg_bytes.len() > MAX_MESSAGE_LENGTH {
    return Err(invalid_data("message too long"));
  }
  let msg_len = MessageLength::try_from(msg_bytes.len()).map_err(invalid_data)?;
  stream.write_all(&msg_len.to_be_bytes())?;
  stream.write_all(msg_bytes)?;
  stream.flush()
}

/// Receives a message (any deserializable type) from the given stream.
/// This function uses `read_exact`, so it will block until the full message is received.
/// Malformed frames are reported as `InvalidData`.
pub fn receive_message<Msg: DeserializeOwned>(stream: &mut impl Read) -> io::Result<Msg> {
  let mut msg_len_bytes = [0u8; NBYTES_MESSAGE_LENGTH];
  stream.read_exact(&mut msg_len_bytes)?;
  let msg_len = usize::try_from(MessageLength::from_be_bytes(msg_len_bytes)).map_err(invalid_data)?;
  if msg_len > MAX_MESSAGE_LENGTH {
    return Err(invalid_data("message too long"));
  }
  let mut msg_bytes = vec![0u8; msg_len];
  stream.read_exact(&mut msg_bytes)?;
  let msg_string = String::from_utf8(msg_bytes).map_err(invalid_data)?;
  ron::from_str(&msg_string).map_err(invalid_data)
}

#[cfg(test)]
mod test {
  use super::{receive_message, send_message, ClientMessage, ServerMessage};
  use crate::{
    board::PlaceSymbolError,
    event::GridId,
    game::{MoveError, Outcome, Stats},
    GlobalPos, OuterPos, Player,
  };
  use std::io::{Cursor, ErrorKind};

  #[test]
  fn check_framing() {
    let mut buf = Vec::new();
    let first = ClientMessage::JoinRoom("lobby".into());
    let second = ClientMessage::PlaceSymbol(GlobalPos::new(3, 7));
    send_message(&first, &mut buf).unwrap();
    send_message(&second, &mut buf).unwrap();

    let mut cursor = Cursor::new(buf);
    assert_eq!(receive_message::<ClientMessage>(&mut cursor).unwrap(), first);
    assert_eq!(receive_message::<ClientMessage>(&mut cursor).unwrap(), second);
    assert_eq!(
      receive_message::<ClientMessage>(&mut cursor).unwrap_err().kind(),
      ErrorKind::UnexpectedEof
    );
  }

  #[test]
  fn check_server_messages_survive_the_wire() {
    let mut stats = Stats::default();
    stats.update(Outcome::Win(Player::Circle));
    let messages = [
      ServerMessage::MoveRejected(MoveError::AlreadyDecided(PlaceSymbolError::GridDecided(
        GridId::Sub(OuterPos::new(2, 1)),
      ))),
      ServerMessage::RoundEnd(Outcome::Win(Player::Circle), stats),
    ];
    let mut buf = Vec::new();
    for msg in &messages {
      send_message(msg, &mut buf).unwrap();
    }
    let mut cursor = Cursor::new(buf);
    for msg in messages {
      assert_eq!(receive_message::<ServerMessage>(&mut cursor).unwrap(), msg);
    }
  }

  #[test]
  fn check_malformed_frames_rejected() {
    // position out of range
    let body = b"PlaceSymbol((9, 0))";
    let mut frame = (body.len() as u32).to_be_bytes().to_vec();
    frame.extend_from_slice(body);
    let err = receive_message::<ClientMessage>(&mut Cursor::new(frame)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);

    // absurd length prefix
    let frame = u32::MAX.to_be_bytes().to_vec();
    let err = receive_message::<ClientMessage>(&mut Cursor::new(frame)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
  }
}
