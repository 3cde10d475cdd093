use crate::registry::{lock_room, Registry};
use common::message::{receive_message, send_message, ClientMessage, ServerMessage};

use std::{io, net::TcpStream, time::Duration};

use eyre::{bail, WrapErr};
use tracing::{debug, info};

/// A client that stops reading must not hold its room forever.
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Serves one client until it disconnects.
///
/// The first message has to be `JoinRoom`. Afterwards every message is handled
/// by the room while holding the room's lock.
pub(crate) fn handle_connection(stream: TcpStream, registry: Registry<TcpStream>) -> eyre::Result<()> {
  let peer = stream.peer_addr()?;
  stream
    .set_write_timeout(Some(WRITE_TIMEOUT))
    .wrap_err("setting write timeout failed")?;
  let mut reader = stream.try_clone().wrap_err("cloning stream failed")?;

  let room_id = match receive_message(&mut reader).wrap_err("receiving join request failed")? {
    ClientMessage::JoinRoom(id) => id,
    msg => bail!("expected `JoinRoom`, got `{:?}`", msg),
  };
  let (room, player) = match registry.join(room_id.clone(), stream) {
    Ok(joined) => joined,
    Err(e) => {
      info!(%peer, room = %room_id, %e, "join refused");
      send_message(&ServerMessage::RoomFull, &mut reader)?;
      return Ok(());
    }
  };
  info!(%peer, room = %room_id, ?player, "client joined");

  let result = loop {
    match receive_message::<ClientMessage>(&mut reader) {
      Ok(msg) => lock_room(&room).handle(player, msg),
      Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
        debug!(%peer, "client disconnected");
        break Ok(());
      }
      Err(e) => break Err(e).wrap_err_with(|| format!("receiving message from {} failed", peer)),
    }
  };

  registry.leave(&room, player);
  result
}
