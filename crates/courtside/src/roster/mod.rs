// Roster domain types: positions, player records, and the draft team.

pub mod draft;
pub mod player;
pub mod position;
