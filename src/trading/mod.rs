use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use time::OffsetDateTime;

use crate::state::AppState;

pub const OPENING_PRICE: f64 = 100.0;
pub const PRICE_FLOOR: f64 = 10.0;
pub const STARTING_BALANCE: f64 = 1000.0;
pub const HISTORY_LEN: usize = 50;
const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Per-tick move is uniform in [-1.5, 1.5).
const MAX_TICK_MOVE: f64 = 3.0;

#[derive(Debug, Clone, Serialize)]
pub struct PricePoint {
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub price: f64,
}

/// Random-walk price series with play-money buy/sell. Purely decorative:
/// nothing here persists across restarts.
pub struct TradingSim {
    history: VecDeque<PricePoint>,
    balance: f64,
    shares: u32,
}

impl TradingSim {
    /// Starts flat at the opening price to give a clear baseline.
    pub fn new() -> Self {
        let now = OffsetDateTime::now_utc();
        let history = (0..HISTORY_LEN)
            .map(|_| PricePoint {
                time: now,
                price: OPENING_PRICE,
            })
            .collect();
        Self {
            history,
            balance: STARTING_BALANCE,
            shares: 0,
        }
    }

    pub fn price(&self) -> f64 {
        self.history.back().map_or(OPENING_PRICE, |point| point.price)
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn shares(&self) -> u32 {
        self.shares
    }

    pub fn tick(&mut self, rng: &mut impl Rng) {
        let change = (rng.gen::<f64>() - 0.5) * MAX_TICK_MOVE;
        let price = (self.price() + change).max(PRICE_FLOOR);
        self.history.push_back(PricePoint {
            time: OffsetDateTime::now_utc(),
            price,
        });
        while self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }
    }

    /// One share at the current price; refused when the balance is short.
    pub fn buy(&mut self) -> bool {
        let price = self.price();
        if self.balance < price {
            return false;
        }
        self.balance -= price;
        self.shares += 1;
        true
    }

    pub fn sell(&mut self) -> bool {
        if self.shares == 0 {
            return false;
        }
        self.balance += self.price();
        self.shares -= 1;
        true
    }
}

impl Default for TradingSim {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct TradingState {
    pub price: f64,
    pub balance: f64,
    pub shares: u32,
    pub history: Vec<PricePoint>,
}

impl TradingState {
    fn of(sim: &TradingSim) -> Self {
        Self {
            price: sim.price(),
            balance: sim.balance(),
            shares: sim.shares(),
            history: sim.history.iter().cloned().collect(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trading", get(get_state))
        .route("/trading/buy", post(buy))
        .route("/trading/sell", post(sell))
}

async fn get_state(State(state): State<AppState>) -> Json<TradingState> {
    Json(TradingState::of(&state.trading.lock()))
}

async fn buy(State(state): State<AppState>) -> Result<Json<TradingState>, (StatusCode, String)> {
    let mut sim = state.trading.lock();
    if !sim.buy() {
        return Err((
            StatusCode::CONFLICT,
            "balance is too low to buy at the current price".into(),
        ));
    }
    Ok(Json(TradingState::of(&sim)))
}

async fn sell(State(state): State<AppState>) -> Result<Json<TradingState>, (StatusCode, String)> {
    let mut sim = state.trading.lock();
    if !sim.sell() {
        return Err((StatusCode::CONFLICT, "no shares to sell".into()));
    }
    Ok(Json(TradingState::of(&sim)))
}

/// Advances the walk once a second for the life of the process.
pub async fn run_ticker(sim: Arc<Mutex<TradingSim>>) {
    let mut rng = StdRng::from_entropy();
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    loop {
        interval.tick().await;
        sim.lock().tick(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_never_goes_below_the_floor() {
        let mut sim = TradingSim::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            sim.tick(&mut rng);
            assert!(sim.price() >= PRICE_FLOOR);
        }
    }

    #[test]
    fn history_window_stays_fixed() {
        let mut sim = TradingSim::new();
        assert_eq!(sim.history.len(), HISTORY_LEN);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            sim.tick(&mut rng);
        }
        assert_eq!(sim.history.len(), HISTORY_LEN);
    }

    #[test]
    fn a_tick_moves_the_price_by_a_bounded_step() {
        let mut sim = TradingSim::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let before = sim.price();
            sim.tick(&mut rng);
            assert!((sim.price() - before).abs() <= MAX_TICK_MOVE / 2.0);
        }
    }

    #[test]
    fn buying_spends_the_balance_one_share_at_a_time() {
        let mut sim = TradingSim::new();
        // 1000 play money at a flat price of 100 buys exactly ten shares.
        for _ in 0..10 {
            assert!(sim.buy());
        }
        assert!(!sim.buy());
        assert_eq!(sim.shares(), 10);
        assert!(sim.balance().abs() < f64::EPSILON);
    }

    #[test]
    fn selling_without_shares_is_refused() {
        let mut sim = TradingSim::new();
        assert!(!sim.sell());

        assert!(sim.buy());
        assert!(sim.sell());
        assert_eq!(sim.shares(), 0);
        // Price was flat in between, so the round trip is free.
        assert!((sim.balance() - STARTING_BALANCE).abs() < f64::EPSILON);
    }
}
