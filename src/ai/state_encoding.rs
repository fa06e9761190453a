use crate::game::{Cell, Grid};

/// Canonical, collision-free key for a full board: the flattened cell values
/// in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[i8]>);

impl StateKey {
    pub fn values(&self) -> &[i8] {
        &self.0
    }

    /// Number of cells, which is also the number of actions in this state.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The two views of an observation the agent needs, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedObservation {
    pub key: StateKey,
    /// Linear indices of empty cells, ascending.
    pub legal_actions: Vec<usize>,
}

/// Encode a grid as its state key plus its legal-action set.
pub fn encode_observation(grid: &Grid) -> EncodedObservation {
    let cells = grid.cells();
    let mut values = Vec::with_capacity(cells.len());
    let mut legal_actions = Vec::new();
    for (i, &cell) in cells.iter().enumerate() {
        if cell == Cell::Empty {
            legal_actions.push(i);
        }
        values.push(cell.value());
    }
    EncodedObservation {
        key: StateKey(values.into_boxed_slice()),
        legal_actions,
    }
}
