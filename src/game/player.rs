use super::grid::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Agent,
    Opponent,
}

impl Player {
    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Agent => Cell::Agent,
            Player::Opponent => Cell::Opponent,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Agent => "Agent",
            Player::Opponent => "Opponent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_cells_have_opposite_signs() {
        assert_eq!(Player::Agent.to_cell().value(), 1);
        assert_eq!(Player::Opponent.to_cell().value(), -1);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::Agent.name(), "Agent");
        assert_eq!(Player::Opponent.name(), "Opponent");
    }
}
