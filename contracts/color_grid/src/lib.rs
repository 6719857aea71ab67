#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod config;
pub mod economics;
pub mod grid;
pub mod ledger;

pub type Balance = u128;

pub use crate::color_grid::{ColorGrid, Error};

/// # ColorGrid: Paint-to-Earn Board
///
/// **Role:** Pricing, accounting and claim state machine of a multiplayer
/// grid-painting game. Each stroke costs the current price, which rises after
/// every accepted stroke. The price is split 80/20 into two pools:
///
/// ```text
///   paint_cell ──► [price check] ──► [split 80/20] ──► [record cell + stroke]
///                                       │      │                 │
///                                 time bank  color bank    [win check]
///                                       │      │                 │
///   claim_time_bank ◄── inactivity ─────┘      └── full board ───┘
///                                               one color  ──► claim_color_bank
///                                                                  │
///   withdraw_rewards ◄──────────── claimable balances ◄────────────┘
/// ```
///
/// - **Time bank**: paid in full to whoever claims it after the configured
///   inactivity threshold has elapsed since the last stroke.
/// - **Color bank**: captured when every cell of the board shares one color,
///   then shared pro-rata by each painter's strokes of that color in the round.
///
/// Claims only credit an internal balance; `withdraw_rewards` moves value out.
#[ink::contract]
mod color_grid {
    use ink::storage::Mapping;

    use crate::config::{ConfigError, GameConfig};
    use crate::economics::{next_price, split_payment};
    use crate::grid::{cell_index, Cell, ColorId, RoundId};
    use crate::ledger::{ColorWin, ColorWinRecord};

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct ColorGrid {
        /// Deployment profile, fixed at instantiation.
        config: GameConfig,

        // ── Board ─────────────────────────────────────────────────────────
        /// Cell index → last stroke. Stale rounds count as unpainted.
        cells: Mapping<u32, Cell>,
        /// Active round, starting at 1.
        current_round: RoundId,
        /// Cells painted in the active round.
        painted_cells: u32,

        // ── Pricing ───────────────────────────────────────────────────────
        current_price: Balance,
        /// Accepted strokes, all rounds.
        stroke_count: u64,

        // ── Banks ─────────────────────────────────────────────────────────
        time_bank: Balance,
        color_bank: Balance,
        /// Timestamp of the last accepted stroke (deployment time before any).
        last_paint_timestamp: Timestamp,

        // ── Stroke ledger ─────────────────────────────────────────────────
        /// (round, color) → strokes.
        color_strokes: Mapping<(RoundId, ColorId), u32>,
        /// (round, color, painter) → strokes.
        participant_strokes: Mapping<(RoundId, ColorId, AccountId), u32>,

        // ── Wins ──────────────────────────────────────────────────────────
        /// Round → finalized win.
        round_wins: Mapping<RoundId, ColorWinRecord>,
        /// Color → most recent round it won.
        color_wins: Mapping<ColorId, RoundId>,
        last_color_win_round: RoundId,
        /// (round, participant) → color-bank share already credited.
        win_claims: Mapping<(RoundId, AccountId), bool>,
        /// Win rewards not yet credited, rounding residue included.
        retained_rewards: Balance,

        // ── Payouts ───────────────────────────────────────────────────────
        claimable: Mapping<AccountId, Balance>,
        total_claimable: Balance,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct CellPainted {
        #[ink(topic)]
        painter: AccountId,
        x: u32,
        y: u32,
        price: Balance,
    }

    /// Emitted right after the `CellPainted` that completed the board.
    #[ink(event)]
    pub struct ColorWon {
        #[ink(topic)]
        round: RoundId,
        #[ink(topic)]
        color_id: ColorId,
        total_strokes: u32,
        reward: Balance,
    }

    #[ink(event)]
    pub struct TimeBankClaimed {
        #[ink(topic)]
        claimant: AccountId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct ColorBankClaimed {
        #[ink(topic)]
        claimant: AccountId,
        color_id: ColorId,
        round: RoundId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct RewardsWithdrawn {
        #[ink(topic)]
        account: AccountId,
        amount: Balance,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Transferred value is below the current price.
        InsufficientPayment,
        /// The cell already carries a stroke in the active round.
        CellAlreadyPainted,
        /// Coordinates outside the board.
        OutOfBounds,
        /// The inactivity threshold has not elapsed since the last stroke.
        NotYetClaimable,
        /// No win record resolves for the color or round.
        NoActiveWin,
        /// Caller already claimed this win.
        AlreadyClaimed,
        /// Caller has no strokes of the winning color in that round.
        NotAParticipant,
        /// Caller has nothing to withdraw.
        NoBalance,
        /// Constructor configuration rejected.
        InvalidConfig(ConfigError),
        /// Arithmetic overflow.
        Overflow,
        /// A native value transfer failed.
        TransferFailed,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl ColorGrid {
        // ---------------------------------------------------------------------
        // Constructors
        // ---------------------------------------------------------------------

        /// Production profile: 16 × 16 board, 600 s inactivity threshold.
        #[ink(constructor)]
        pub fn new() -> Self {
            Self::from_config(GameConfig::production())
        }

        /// Fast-iteration profile: 2 × 2 board, 5 s inactivity threshold.
        #[ink(constructor)]
        pub fn fast() -> Self {
            Self::from_config(GameConfig::fast())
        }

        #[ink(constructor)]
        pub fn with_config(config: GameConfig) -> Result<Self, Error> {
            config.validate().map_err(Error::InvalidConfig)?;
            Ok(Self::from_config(config))
        }

        fn from_config(config: GameConfig) -> Self {
            Self {
                config,
                cells: Mapping::default(),
                current_round: 1,
                painted_cells: 0,
                current_price: config.initial_price,
                stroke_count: 0,
                time_bank: 0,
                color_bank: 0,
                last_paint_timestamp: Self::env().block_timestamp(),
                color_strokes: Mapping::default(),
                participant_strokes: Mapping::default(),
                round_wins: Mapping::default(),
                color_wins: Mapping::default(),
                last_color_win_round: 0,
                win_claims: Mapping::default(),
                retained_rewards: 0,
                claimable: Mapping::default(),
                total_claimable: 0,
            }
        }

        // =====================================================================
        // PRICING ENGINE: PAINT
        // =====================================================================

        /// Paint cell `(x, y)` with `color_id`, paying at least the current
        /// price. Exactly the current price is kept; any excess is refunded to
        /// the caller once the stroke is recorded.
        ///
        /// A stroke that completes a single-color board also finalizes the
        /// round's color win (see `finalize_color_win`).
        #[ink(message, payable)]
        pub fn paint_cell(&mut self, x: u32, y: u32, color_id: ColorId) -> Result<(), Error> {
            let painter = self.env().caller();
            let payment = self.env().transferred_value();

            let index = cell_index(self.config.grid_side, x, y).ok_or(Error::OutOfBounds)?;
            if self.is_painted(index) {
                return Err(Error::CellAlreadyPainted);
            }

            let price = self.current_price;
            if payment < price {
                return Err(Error::InsufficientPayment);
            }

            let next = next_price(price, self.config.price_step_bps).ok_or(Error::Overflow)?;

            // Only fallible write before the refund.
            self.credit_pools(price)?;

            let round = self.current_round;
            self.cells.insert(index, &Cell { color_id, painter, round });
            self.painted_cells = self.painted_cells.saturating_add(1);
            let color_total = self.record_stroke(color_id, painter);
            self.stroke_count = self.stroke_count.saturating_add(1);
            self.current_price = next;

            self.env().emit_event(CellPainted { painter, x, y, price });

            if self.board_won_by(color_total) {
                self.finalize_color_win(color_id);
            }

            let excess = payment - price;
            if excess > 0 {
                self.env()
                    .transfer(painter, excess)
                    .map_err(|_| Error::TransferFailed)?;
            }

            Ok(())
        }

        fn is_painted(&self, index: u32) -> bool {
            self.cells
                .get(index)
                .is_some_and(|cell| cell.is_painted_in(self.current_round))
        }

        // =====================================================================
        // BANK LEDGER
        // =====================================================================

        /// Split `amount` into the two pools and restart the inactivity clock.
        /// Writes nothing unless both pools can absorb their share.
        fn credit_pools(&mut self, amount: Balance) -> Result<(), Error> {
            let split = split_payment(amount);
            let time_bank = self
                .time_bank
                .checked_add(split.time_bank)
                .ok_or(Error::Overflow)?;
            let color_bank = self
                .color_bank
                .checked_add(split.color_bank)
                .ok_or(Error::Overflow)?;

            self.time_bank = time_bank;
            self.color_bank = color_bank;
            self.last_paint_timestamp = self.env().block_timestamp();
            Ok(())
        }

        /// Count one stroke of `color_id` by `participant` in the active round.
        /// Returns the round's new total for the color.
        fn record_stroke(&mut self, color_id: ColorId, participant: AccountId) -> u32 {
            let round = self.current_round;

            let total = self
                .color_strokes
                .get((round, color_id))
                .unwrap_or(0)
                .saturating_add(1);
            self.color_strokes.insert((round, color_id), &total);

            let own = self
                .participant_strokes
                .get((round, color_id, participant))
                .unwrap_or(0)
                .saturating_add(1);
            self.participant_strokes
                .insert((round, color_id, participant), &own);

            total
        }

        /// Move `amount` into `account`'s claimable balance.
        fn credit_claimable(&mut self, account: AccountId, amount: Balance) -> Result<(), Error> {
            let balance = self
                .claimable
                .get(account)
                .unwrap_or(0)
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
            let total = self
                .total_claimable
                .checked_add(amount)
                .ok_or(Error::Overflow)?;

            self.claimable.insert(account, &balance);
            self.total_claimable = total;
            Ok(())
        }

        // =====================================================================
        // WIN DETECTOR
        // =====================================================================

        /// A cell holds at most one stroke per round, so the color's stroke
        /// total equals the number of cells carrying it. The board is won when
        /// every cell is painted and all of them carry the color.
        fn board_won_by(&self, color_total: u32) -> bool {
            let cells = self.config.grid_cells();
            self.painted_cells == cells && color_total == cells
        }

        /// Capture the color bank for the active round's winner and start a
        /// new round on an empty board. The finished round's cells and stroke
        /// counts stay in storage under their round number.
        fn finalize_color_win(&mut self, color_id: ColorId) {
            let round = self.current_round;
            let reward = self.color_bank;
            let record = ColorWinRecord::new(color_id, round, self.config.grid_cells(), reward);

            self.round_wins.insert(round, &record);
            self.color_wins.insert(color_id, &round);
            self.retained_rewards = self.retained_rewards.saturating_add(reward);
            self.color_bank = 0;

            self.last_color_win_round = round;
            self.current_round = round.saturating_add(1);
            self.painted_cells = 0;

            ink::env::debug_println!(
                "color {} won round {} (reward {})",
                color_id,
                round,
                reward
            );

            self.env().emit_event(ColorWon {
                round,
                color_id,
                total_strokes: record.total_strokes,
                reward,
            });
        }

        // =====================================================================
        // CLAIM ENGINE: TIME BANK
        // =====================================================================

        /// Credit the whole time bank to the caller once the inactivity
        /// threshold has elapsed since the last stroke.
        ///
        /// Returns the credited amount. An empty bank yields `Ok(0)` with no
        /// state change and no event.
        #[ink(message)]
        pub fn claim_time_bank(&mut self) -> Result<Balance, Error> {
            let claimant = self.env().caller();
            let now = self.env().block_timestamp();

            let idle = now.saturating_sub(self.last_paint_timestamp);
            if idle < self.config.inactivity_threshold_ms() {
                return Err(Error::NotYetClaimable);
            }

            let amount = self.time_bank;
            if amount == 0 {
                return Ok(0);
            }

            self.credit_claimable(claimant, amount)?;
            self.time_bank = 0;

            self.env().emit_event(TimeBankClaimed { claimant, amount });
            Ok(amount)
        }

        // =====================================================================
        // CLAIM ENGINE: COLOR BANK
        // =====================================================================

        /// Claim the caller's share of the most recent win of `color_id`.
        #[ink(message)]
        pub fn claim_color_bank(&mut self, color_id: ColorId) -> Result<Balance, Error> {
            let round = self.color_wins.get(color_id).ok_or(Error::NoActiveWin)?;
            self.settle_win_claim(round)
        }

        /// Claim the caller's share of the win finalized in `round`. Reaches
        /// wins superseded in `color_wins` by a later win of the same color.
        #[ink(message)]
        pub fn claim_round_reward(&mut self, round: RoundId) -> Result<Balance, Error> {
            self.settle_win_claim(round)
        }

        fn settle_win_claim(&mut self, round: RoundId) -> Result<Balance, Error> {
            let claimant = self.env().caller();
            let mut record = self.round_wins.get(round).ok_or(Error::NoActiveWin)?;

            if self.win_claims.contains((round, claimant)) {
                return Err(Error::AlreadyClaimed);
            }

            let strokes = self
                .participant_strokes
                .get((round, record.color_id, claimant))
                .unwrap_or(0);
            if strokes == 0 {
                return Err(Error::NotAParticipant);
            }

            let amount = record.share_for(strokes);
            record.distributed = record
                .distributed
                .checked_add(amount)
                .ok_or(Error::Overflow)?;

            self.credit_claimable(claimant, amount)?;
            self.win_claims.insert((round, claimant), &true);
            self.round_wins.insert(round, &record);
            self.retained_rewards = self.retained_rewards.saturating_sub(amount);

            self.env().emit_event(ColorBankClaimed {
                claimant,
                color_id: record.color_id,
                round,
                amount,
            });
            Ok(amount)
        }

        // =====================================================================
        // WITHDRAWAL
        // =====================================================================

        /// Transfer the caller's whole claimable balance to the caller.
        /// Fails with `NoBalance` when there is nothing to withdraw.
        #[ink(message)]
        pub fn withdraw_rewards(&mut self) -> Result<Balance, Error> {
            let account = self.env().caller();
            let amount = self.claimable.get(account).unwrap_or(0);
            if amount == 0 {
                return Err(Error::NoBalance);
            }

            // Ledger is zeroed before value leaves the contract.
            self.claimable.remove(account);
            self.total_claimable = self.total_claimable.saturating_sub(amount);

            if self.env().transfer(account, amount).is_err() {
                self.claimable.insert(account, &amount);
                self.total_claimable = self.total_claimable.saturating_add(amount);
                return Err(Error::TransferFailed);
            }

            ink::env::debug_println!("withdrew {} to {:?}", amount, account);

            self.env().emit_event(RewardsWithdrawn { account, amount });
            Ok(amount)
        }

        // =====================================================================
        // VIEW FUNCTIONS
        // =====================================================================

        #[ink(message)]
        pub fn current_price(&self) -> Balance {
            self.current_price
        }

        #[ink(message)]
        pub fn time_bank(&self) -> Balance {
            self.time_bank
        }

        #[ink(message)]
        pub fn color_bank(&self) -> Balance {
            self.color_bank
        }

        #[ink(message)]
        pub fn grid_side(&self) -> u32 {
            self.config.grid_side
        }

        #[ink(message)]
        pub fn grid_cells(&self) -> u32 {
            self.config.grid_cells()
        }

        /// Most recent win of `color_id`; `exists == false` if it never won.
        #[ink(message)]
        pub fn color_wins(&self, color_id: ColorId) -> ColorWin {
            self.color_wins
                .get(color_id)
                .and_then(|round| self.round_wins.get(round))
                .map(|record| record.view())
                .unwrap_or_default()
        }

        #[ink(message)]
        pub fn last_color_win_round(&self) -> RoundId {
            self.last_color_win_round
        }

        #[ink(message)]
        pub fn claimable_balance(&self, account: AccountId) -> Balance {
            self.claimable.get(account).unwrap_or(0)
        }

        #[ink(message)]
        pub fn current_round(&self) -> RoundId {
            self.current_round
        }

        #[ink(message)]
        pub fn stroke_count(&self) -> u64 {
            self.stroke_count
        }

        #[ink(message)]
        pub fn last_paint_timestamp(&self) -> Timestamp {
            self.last_paint_timestamp
        }

        /// Earliest block timestamp at which `claim_time_bank` succeeds.
        #[ink(message)]
        pub fn time_bank_unlocks_at(&self) -> Timestamp {
            self.last_paint_timestamp
                .saturating_add(self.config.inactivity_threshold_ms())
        }

        #[ink(message)]
        pub fn config(&self) -> GameConfig {
            self.config
        }

        /// Stroke currently on `(x, y)`, if painted in the active round.
        #[ink(message)]
        pub fn cell(&self, x: u32, y: u32) -> Option<Cell> {
            let index = cell_index(self.config.grid_side, x, y)?;
            self.cells
                .get(index)
                .filter(|cell| cell.is_painted_in(self.current_round))
        }

        #[ink(message)]
        pub fn color_strokes(&self, round: RoundId, color_id: ColorId) -> u32 {
            self.color_strokes.get((round, color_id)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn participant_strokes(&self, round: RoundId, color_id: ColorId, account: AccountId) -> u32 {
            self.participant_strokes
                .get((round, color_id, account))
                .unwrap_or(0)
        }

        #[ink(message)]
        pub fn round_win(&self, round: RoundId) -> Option<ColorWinRecord> {
            self.round_wins.get(round)
        }

        #[ink(message)]
        pub fn has_claimed(&self, round: RoundId, account: AccountId) -> bool {
            self.win_claims.contains((round, account))
        }

        #[ink(message)]
        pub fn retained_rewards(&self) -> Balance {
            self.retained_rewards
        }

        #[ink(message)]
        pub fn total_claimable(&self) -> Balance {
            self.total_claimable
        }

        /// Value the contract owes: both pools, undistributed win rewards and
        /// credited-but-unwithdrawn balances.
        #[ink(message)]
        pub fn accounted_total(&self) -> Balance {
            self.time_bank
                .saturating_add(self.color_bank)
                .saturating_add(self.retained_rewards)
                .saturating_add(self.total_claimable)
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
