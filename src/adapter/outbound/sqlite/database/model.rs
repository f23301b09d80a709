//! Database model types for Diesel ORM.
//!
//! Monetary values are stored as decimal TEXT and timestamps as RFC 3339 TEXT.

use diesel::prelude::*;

use super::schema::{balance_transactions, bet_selections, bets, players};

/// Database row for a player.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlayerRow {
    pub id: i64,
    pub balance: String,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Database row for a bet (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = bets)]
pub struct NewBetRow {
    pub player_id: i64,
    pub stake_amount: String,
    pub created_at: String,
}

/// Database row for a bet (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = bets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BetRow {
    pub id: i64,
    pub player_id: i64,
    pub stake_amount: String,
    pub created_at: String,
}

/// Database row for a bet selection (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = bet_selections)]
pub struct NewSelectionRow {
    pub bet_id: i64,
    pub selection_id: i64,
    pub odds: String,
    pub position: i32,
}

/// Database row for a bet selection (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = bet_selections)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SelectionRow {
    pub id: i64,
    pub bet_id: i64,
    pub selection_id: i64,
    pub odds: String,
    pub position: i32,
}

/// Database row for a balance transaction (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = balance_transactions)]
pub struct NewTransactionRow {
    pub player_id: i64,
    pub bet_id: i64,
    pub amount: String,
    pub amount_before: String,
    pub created_at: String,
}

/// Database row for a balance transaction (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = balance_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRow {
    pub id: i64,
    pub player_id: i64,
    pub bet_id: i64,
    pub amount: String,
    pub amount_before: String,
    pub created_at: String,
}
