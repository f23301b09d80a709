//! SQLite ledger store implementation.
//!
//! Settlements run inside `BEGIN IMMEDIATE` transactions so the write lock is
//! taken before the player row is read. The balance update is additionally
//! guarded by the row version.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use rust_decimal::Decimal;

use crate::adapter::outbound::sqlite::database::connection::{
    configure_sqlite_connection, create_pool, enable_wal, run_migrations, DbPool,
};
use crate::adapter::outbound::sqlite::database::model::{
    BetRow, NewBetRow, NewSelectionRow, NewTransactionRow, PlayerRow, SelectionRow,
    TransactionRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    balance_transactions, bet_selections, bets, players,
};
use crate::domain::{
    BalanceTransaction, Bet, BetId, NewBalanceTransaction, Player, PlayerId, Selection,
    SelectionId, SlipSelection, TransactionId,
};
use crate::error::{Error, LedgerError, Result};
use crate::port::outbound::store::{LedgerStore, LedgerUnit, PlayerLookup};

type PooledSqlite = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(diesel::QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    #[diesel(column_name = "id")]
    id: i64,
}

/// SQLite-backed ledger store.
pub struct SqliteLedgerStore {
    pool: DbPool,
    busy_timeout_ms: u64,
}

impl SqliteLedgerStore {
    /// Create a store over an already migrated pool.
    #[must_use]
    pub fn new(pool: DbPool, busy_timeout_ms: u64) -> Self {
        Self {
            pool,
            busy_timeout_ms,
        }
    }

    /// Open `database_url`, applying pending migrations.
    ///
    /// File-backed databases are switched to WAL mode.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(database_url: &str, busy_timeout_ms: u64) -> Result<Self> {
        let pool = create_pool(database_url)?;
        run_migrations(&pool)?;
        if database_url != ":memory:" {
            enable_wal(&pool)?;
        }
        Ok(Self::new(pool, busy_timeout_ms))
    }

    fn connection(&self) -> Result<PooledSqlite> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn, self.busy_timeout_ms)?;
        Ok(conn)
    }

    fn player_from_row(row: PlayerRow) -> Result<Player> {
        Ok(Player::new(
            PlayerId::new(row.id),
            parse_decimal(&row.balance)?,
            row.version,
        ))
    }

    fn selection_from_row(row: SelectionRow) -> Result<Selection> {
        Ok(Selection {
            selection_id: SelectionId::new(row.selection_id),
            odds: parse_decimal(&row.odds)?,
            bet_id: BetId::new(row.bet_id),
        })
    }

    fn transaction_from_row(row: TransactionRow) -> Result<BalanceTransaction> {
        Ok(BalanceTransaction {
            id: TransactionId::new(row.id),
            player_id: PlayerId::new(row.player_id),
            bet_id: BetId::new(row.bet_id),
            amount: parse_decimal(&row.amount)?,
            amount_before: parse_decimal(&row.amount_before)?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

fn parse_decimal(value: &str) -> Result<Decimal> {
    value
        .parse::<Decimal>()
        .map_err(|e| Error::Parse(format!("invalid decimal {value:?}: {e}")))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Parse(e.to_string()))
}

fn database_error(err: diesel::result::Error) -> Error {
    Error::Database(err.to_string())
}

fn find_player_row(conn: &mut SqliteConnection, id: PlayerId) -> Result<Option<PlayerRow>> {
    players::table
        .find(id.value())
        .select(PlayerRow::as_select())
        .first(conn)
        .optional()
        .map_err(database_error)
}

fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
        .map_err(database_error)
}

/// Writes of one open SQLite transaction.
struct SqliteUnit<'a> {
    conn: &'a mut SqliteConnection,
}

impl LedgerUnit for SqliteUnit<'_> {
    fn find_player(&mut self, id: PlayerId) -> Result<Option<Player>> {
        find_player_row(self.conn, id)?
            .map(SqliteLedgerStore::player_from_row)
            .transpose()
    }

    fn create_player(&mut self, id: PlayerId, balance: Decimal) -> Result<Player> {
        let now = Utc::now().to_rfc3339();
        let row = PlayerRow {
            id: id.value(),
            balance: balance.to_string(),
            version: 0,
            created_at: now.clone(),
            updated_at: now,
        };
        diesel::insert_into(players::table)
            .values(&row)
            .execute(self.conn)
            .map_err(database_error)?;
        Ok(Player::new(id, balance, 0))
    }

    fn update_player_balance(&mut self, player: &Player, new_balance: Decimal) -> Result<bool> {
        let updated = diesel::update(
            players::table
                .filter(players::id.eq(player.id().value()))
                .filter(players::version.eq(player.version())),
        )
        .set((
            players::balance.eq(new_balance.to_string()),
            players::version.eq(player.version() + 1),
            players::updated_at.eq(Utc::now().to_rfc3339()),
        ))
        .execute(self.conn)
        .map_err(database_error)?;

        Ok(updated == 1)
    }

    fn create_bet(&mut self, player_id: PlayerId, stake_amount: Decimal) -> Result<BetId> {
        diesel::insert_into(bets::table)
            .values(&NewBetRow {
                player_id: player_id.value(),
                stake_amount: stake_amount.to_string(),
                created_at: Utc::now().to_rfc3339(),
            })
            .execute(self.conn)
            .map_err(database_error)?;

        last_insert_rowid(self.conn).map(BetId::new)
    }

    fn create_selections(&mut self, bet_id: BetId, selections: &[SlipSelection]) -> Result<()> {
        let rows = selections
            .iter()
            .enumerate()
            .map(|(position, leg)| -> Result<NewSelectionRow> {
                Ok(NewSelectionRow {
                    bet_id: bet_id.value(),
                    selection_id: leg.id.value(),
                    odds: leg.odds.to_string(),
                    position: i32::try_from(position).map_err(|e| Error::Parse(e.to_string()))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        diesel::insert_into(bet_selections::table)
            .values(&rows)
            .execute(self.conn)
            .map_err(database_error)?;
        Ok(())
    }

    fn append_transaction(&mut self, transaction: &NewBalanceTransaction) -> Result<TransactionId> {
        diesel::insert_into(balance_transactions::table)
            .values(&NewTransactionRow {
                player_id: transaction.player_id.value(),
                bet_id: transaction.bet_id.value(),
                amount: transaction.amount.to_string(),
                amount_before: transaction.amount_before.to_string(),
                created_at: Utc::now().to_rfc3339(),
            })
            .execute(self.conn)
            .map_err(database_error)?;

        last_insert_rowid(self.conn).map(TransactionId::new)
    }
}

impl PlayerLookup for SqliteLedgerStore {
    fn find_player(&self, id: PlayerId) -> Result<Option<Player>> {
        let mut conn = self.connection()?;
        find_player_row(&mut conn, id)?
            .map(Self::player_from_row)
            .transpose()
    }
}

impl LedgerStore for SqliteLedgerStore {
    fn transaction<T, F>(&self, work: F) -> std::result::Result<T, LedgerError>
    where
        F: FnOnce(&mut dyn LedgerUnit) -> std::result::Result<T, LedgerError>,
    {
        let mut conn = self.connection()?;
        conn.immediate_transaction(|conn| work(&mut SqliteUnit { conn }))
    }

    fn find_bet(&self, id: BetId) -> Result<Option<Bet>> {
        let mut conn = self.connection()?;

        let Some(row) = bets::table
            .find(id.value())
            .select(BetRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(database_error)?
        else {
            return Ok(None);
        };

        let selections = bet_selections::table
            .filter(bet_selections::bet_id.eq(row.id))
            .order(bet_selections::position.asc())
            .select(SelectionRow::as_select())
            .load(&mut conn)
            .map_err(database_error)?
            .into_iter()
            .map(Self::selection_from_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Bet {
            id: BetId::new(row.id),
            player_id: PlayerId::new(row.player_id),
            stake_amount: parse_decimal(&row.stake_amount)?,
            selections,
            created_at: parse_timestamp(&row.created_at)?,
        }))
    }

    fn player_transactions(&self, player_id: PlayerId) -> Result<Vec<BalanceTransaction>> {
        let mut conn = self.connection()?;

        balance_transactions::table
            .filter(balance_transactions::player_id.eq(player_id.value()))
            .order(balance_transactions::id.asc())
            .select(TransactionRow::as_select())
            .load(&mut conn)
            .map_err(database_error)?
            .into_iter()
            .map(Self::transaction_from_row)
            .collect()
    }
}
