use serde::{Deserialize, Serialize};

/// Seat roles at the table. The default topology is four-handed with no
/// small blind: BTN, BB, UTG, CO, with only the BB posting a forced bet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "BTN")]
    Button,
    #[serde(rename = "BB")]
    BigBlind,
    #[serde(rename = "UTG")]
    UnderTheGun,
    #[serde(rename = "CO")]
    Cutoff,
}

/// Seat indices of each role for a given button seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SeatRoles {
    pub btn: usize,
    pub bb: usize,
    pub utg: usize,
    pub co: usize,
}

/// Map a button index and seat count (2-4) to role seats. Short-handed
/// tables reuse roles: heads-up has only BTN and BB, three-handed has no CO.
pub fn seat_roles(btn_index: usize, seat_count: usize) -> SeatRoles {
    let n = seat_count.max(1);
    let btn = btn_index % n;
    if seat_count <= 2 {
        let bb = (btn + 1) % n;
        return SeatRoles {
            btn,
            bb,
            utg: btn,
            co: bb,
        };
    }
    if seat_count == 3 {
        let utg = (btn + 1) % n;
        let bb = (btn + 2) % n;
        return SeatRoles {
            btn,
            bb,
            utg,
            co: utg,
        };
    }
    let bb = (btn + 1) % n;
    let utg = (btn + 2) % n;
    let co = (btn + 3) % n;
    SeatRoles { btn, bb, utg, co }
}

/// Role of a single seat.
pub fn position_of(seat: usize, btn_index: usize, seat_count: usize) -> Position {
    let roles = seat_roles(btn_index, seat_count);
    if seat == roles.btn {
        Position::Button
    } else if seat == roles.bb {
        Position::BigBlind
    } else if seat == roles.utg {
        Position::UnderTheGun
    } else {
        Position::Cutoff
    }
}

/// Preflop action order: starts under the gun, ends on the big blind.
/// Four-handed that is UTG, CO, BTN, BB.
pub fn preflop_order(btn_index: usize, seat_count: usize) -> Vec<usize> {
    let roles = seat_roles(btn_index, seat_count);
    if seat_count <= 2 {
        return vec![roles.btn, roles.bb];
    }
    if seat_count == 3 {
        return vec![roles.utg, roles.btn, roles.bb];
    }
    vec![roles.utg, roles.co, roles.btn, roles.bb]
}

/// Postflop action order: starts at the big blind, ends on the button.
pub fn postflop_order(btn_index: usize, seat_count: usize) -> Vec<usize> {
    let roles = seat_roles(btn_index, seat_count);
    if seat_count <= 2 {
        return vec![roles.bb, roles.btn];
    }
    if seat_count == 3 {
        return vec![roles.bb, roles.utg, roles.btn];
    }
    vec![roles.bb, roles.utg, roles.co, roles.btn]
}
