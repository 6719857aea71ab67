//! Color-win records and their public view.

use crate::economics::pro_rata_share;
use crate::grid::{ColorId, RoundId};
use crate::Balance;

/// Finalized full-board win of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct ColorWinRecord {
    pub color_id: ColorId,
    pub round: RoundId,
    /// Strokes of the winning color in `round`; equals the cell count.
    pub total_strokes: u32,
    /// Color bank captured when the board was completed.
    pub reward: Balance,
    /// Sum of the shares already credited to participants.
    pub distributed: Balance,
}

impl ColorWinRecord {
    pub fn new(color_id: ColorId, round: RoundId, total_strokes: u32, reward: Balance) -> Self {
        Self {
            color_id,
            round,
            total_strokes,
            reward,
            distributed: 0,
        }
    }

    /// Share owed to a participant with `strokes` strokes of the color.
    pub fn share_for(&self, strokes: u32) -> Balance {
        pro_rata_share(self.reward, strokes.min(self.total_strokes), self.total_strokes)
    }

    /// Reward not yet credited to anyone, rounding residue included.
    pub fn undistributed(&self) -> Balance {
        self.reward.saturating_sub(self.distributed)
    }

    pub fn view(&self) -> ColorWin {
        ColorWin {
            exists: true,
            color_id: self.color_id,
            total_strokes: self.total_strokes,
            reward: self.reward,
        }
    }
}

/// Answer of the `color_wins` query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub struct ColorWin {
    pub exists: bool,
    pub color_id: ColorId,
    pub total_strokes: u32,
    pub reward: Balance,
}
