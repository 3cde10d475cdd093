use crate::{line::Line, Marker};

/// Decides a grid from the markers of its nine children, indexed by `Pos::linear_idx`.
///
/// Lines are checked in table order and the first uniform line wins.
/// Without a winning line a full grid is a stalemate, otherwise it stays undecided.
pub fn evaluate(markers: &[Option<Marker>; 9]) -> Option<Marker> {
  winner(markers).or_else(|| markers.iter().all(Option::is_some).then_some(Marker::Stalemate))
}

/// The marker of the first line whose three positions hold the same marker.
pub fn winner(markers: &[Option<Marker>; 9]) -> Option<Marker> {
  Line::all().find_map(|line| {
    let [a, b, c] = line.positions().map(|pos| markers[pos.linear_idx()]);
    match (a, b, c) {
      (Some(a), Some(b), Some(c)) if a == b && b == c => Some(a),
      _ => None,
    }
  })
}

#[cfg(test)]
mod test {
  use super::{evaluate, winner};
  use crate::{Marker, Player};

  const X: Option<Marker> = Some(Marker::Player(Player::Cross));
  const O: Option<Marker> = Some(Marker::Player(Player::Circle));
  const S: Option<Marker> = Some(Marker::Stalemate);
  const E: Option<Marker> = None;

  #[test]
  fn check_empty_is_undecided() {
    assert_eq!(evaluate(&[E; 9]), None);
  }

  #[test]
  fn check_anti_diagonal() {
    #[rustfmt::skip]
    let markers = [
      E, X, O,
      X, O, E,
      O, E, X,
    ];
    assert_eq!(evaluate(&markers), O);
  }

  // XOX
  // XOO
  // OXX
  // is a stalemate
  #[test]
  fn check_full_board_stalemate() {
    #[rustfmt::skip]
    let markers = [
      X, O, X,
      X, O, O,
      O, X, X,
    ];
    assert_eq!(winner(&markers), None);
    assert_eq!(evaluate(&markers), S);

    let mut almost_full = markers;
    almost_full[8] = E;
    assert_eq!(evaluate(&almost_full), None);
  }

  #[test]
  fn check_stalemate_line_decides() {
    #[rustfmt::skip]
    let markers = [
      S, X, O,
      S, O, E,
      S, E, X,
    ];
    assert_eq!(evaluate(&markers), S);
  }

  #[test]
  fn check_mixed_stalemate_line_does_not_decide() {
    #[rustfmt::skip]
    let markers = [
      S, X, E,
      X, E, E,
      X, E, E,
    ];
    assert_eq!(evaluate(&markers), None);
  }

  /// Exhaustive check over every assignment of empty/cross/circle/stalemate
  /// against the literal coordinate table.
  #[test]
  fn check_decided_iff_uniform_line_or_full() {
    const TRIPLES: [[(usize, usize); 3]; 8] = [
      [(0, 0), (0, 1), (0, 2)],
      [(1, 0), (1, 1), (1, 2)],
      [(2, 0), (2, 1), (2, 2)],
      [(0, 0), (1, 0), (2, 0)],
      [(0, 1), (1, 1), (2, 1)],
      [(0, 2), (1, 2), (2, 2)],
      [(0, 0), (1, 1), (2, 2)],
      [(2, 0), (1, 1), (0, 2)],
    ];
    let values = [E, X, O, S];

    for mut code in 0..4usize.pow(9) {
      let markers: [Option<Marker>; 9] = std::array::from_fn(|_| {
        let v = values[code % 4];
        code /= 4;
        v
      });
      let at = |(r, c): (usize, usize)| markers[r * 3 + c];

      let uniform = TRIPLES.iter().find_map(|t| {
        let [a, b, c] = t.map(at);
        (a.is_some() && a == b && b == c).then_some(a)
      });
      let full = markers.iter().all(Option::is_some);

      let decided = evaluate(&markers);
      assert_eq!(decided.is_some(), uniform.is_some() || full);
      if let Some(marker) = uniform {
        assert_eq!(decided, marker);
      }
    }
  }
}
