use serde::{Deserialize, Serialize};

use crate::{CellCount, CellState, Coord, Coord2, GameConfig, SessionStatus};

/// What the Presenter should draw for one cell. `Mine` appears only for a
/// detonated mine or during the loss sweep; everywhere else mines stay
/// indistinguishable from hidden cells.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed { adjacent: u8 },
    Mine,
}

impl From<CellState> for CellView {
    fn from(state: CellState) -> Self {
        match state {
            CellState::Hidden => Self::Hidden,
            CellState::Flagged => Self::Flagged,
            CellState::Revealed(adjacent) => Self::Revealed { adjacent },
        }
    }
}

/// One cell whose displayed state changed.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub row: Coord,
    pub col: Coord,
    pub view: CellView,
}

impl CellUpdate {
    pub(crate) fn new((row, col): Coord2, view: CellView) -> Self {
        Self { row, col, view }
    }
}

/// Player intents, translated by the Presenter from raw pointer and timer
/// events into discrete actions.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    Reveal { row: Coord, col: Coord },
    ToggleFlag { row: Coord, col: Coord },
    Restart { config: GameConfig, seed: u64 },
    Tick,
}

/// Notifications streamed back to the Presenter after each intent, in the
/// order they should be applied to the display.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    Cell(CellUpdate),
    Status { status: SessionStatus },
    FlagCount { flagged: CellCount, mines_left: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_use_tagged_json() {
        let reveal = Intent::Reveal { row: 1, col: 2 };
        assert_eq!(
            serde_json::to_string(&reveal).unwrap(),
            r#"{"action":"reveal","row":1,"col":2}"#
        );

        let tick: Intent = serde_json::from_str(r#"{"action":"tick"}"#).unwrap();
        assert_eq!(tick, Intent::Tick);
    }

    #[test]
    fn notices_use_tagged_json() {
        let flag_count = Notice::FlagCount {
            flagged: 1,
            mines_left: 9,
        };
        assert_eq!(
            serde_json::to_string(&flag_count).unwrap(),
            r#"{"type":"flag_count","flagged":1,"mines_left":9}"#
        );

        let cell = Notice::Cell(CellUpdate {
            row: 0,
            col: 3,
            view: CellView::Revealed { adjacent: 2 },
        });
        assert_eq!(
            serde_json::to_string(&cell).unwrap(),
            r#"{"type":"cell","row":0,"col":3,"view":{"state":"revealed","adjacent":2}}"#
        );
    }

    #[test]
    fn cell_views_mirror_cell_states() {
        assert_eq!(CellView::from(CellState::Hidden), CellView::Hidden);
        assert_eq!(CellView::from(CellState::Flagged), CellView::Flagged);
        assert_eq!(
            CellView::from(CellState::Revealed(4)),
            CellView::Revealed { adjacent: 4 }
        );
    }
}
