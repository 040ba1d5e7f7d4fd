use async_trait::async_trait;
use sqlx::{Row, SqliteConnection};

use common::prelude::{Account, AccountChange, Address, Ledger, LedgerError};

use crate::database::{types::DAddress, Database};

type Result<T> = std::result::Result<T, LedgerError<sqlx::Error>>;

async fn fetch_account(
    conn: &mut SqliteConnection,
    address: &Address,
) -> Result<Option<Account>> {
    let row = sqlx::query(
        r#"
        SELECT owner, lamports, data
        FROM accounts
        WHERE address = $1
        "#,
    )
    .bind(DAddress::from(*address))
    .fetch_optional(&mut *conn)
    .await
    .map_err(LedgerError::Provider)?;

    let Some(row) = row else {
        return Ok(None);
    };

    let owner: DAddress = row.try_get("owner").map_err(LedgerError::Provider)?;
    let lamports: i64 = row.try_get("lamports").map_err(LedgerError::Provider)?;
    let data: Vec<u8> = row.try_get("data").map_err(LedgerError::Provider)?;

    Ok(Some(Account {
        owner: owner.into(),
        lamports: u64::try_from(lamports)
            .map_err(|e| LedgerError::Provider(sqlx::Error::Decode(Box::new(e))))?,
        data,
    }))
}

async fn store_account(
    conn: &mut SqliteConnection,
    address: &Address,
    account: &Account,
) -> Result<()> {
    // SQLite integers are signed
    let lamports =
        i64::try_from(account.lamports).map_err(|_| LedgerError::BalanceOverflow(*address))?;

    sqlx::query(
        r#"
        INSERT INTO accounts (address, owner, lamports, data)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT(address) DO UPDATE SET
            owner = excluded.owner,
            lamports = excluded.lamports,
            data = excluded.data,
            updated_at = CAST(strftime('%s', 'now') AS INTEGER)
        "#,
    )
    .bind(DAddress::from(*address))
    .bind(DAddress::from(account.owner))
    .bind(lamports)
    .bind(account.data.as_slice())
    .execute(&mut *conn)
    .await
    .map_err(LedgerError::Provider)?;

    Ok(())
}

async fn remove_account(conn: &mut SqliteConnection, address: &Address) -> Result<()> {
    sqlx::query("DELETE FROM accounts WHERE address = $1")
        .bind(DAddress::from(*address))
        .execute(&mut *conn)
        .await
        .map_err(LedgerError::Provider)?;
    Ok(())
}

async fn credit(conn: &mut SqliteConnection, address: &Address, lamports: u64) -> Result<()> {
    let mut account = fetch_account(conn, address)
        .await?
        .unwrap_or_else(|| Account::system(0));
    account.lamports = account
        .lamports
        .checked_add(lamports)
        .ok_or(LedgerError::BalanceOverflow(*address))?;
    store_account(conn, address, &account).await
}

async fn apply(conn: &mut SqliteConnection, change: AccountChange) -> Result<()> {
    match change {
        AccountChange::Credit { address, lamports } => credit(conn, &address, lamports).await,
        AccountChange::Create {
            address,
            owner,
            lamports,
            data,
            payer,
        } => {
            if fetch_account(conn, &address).await?.is_some() {
                return Err(LedgerError::AccountAlreadyExists(address));
            }

            let mut funder = fetch_account(conn, &payer)
                .await?
                .unwrap_or_else(|| Account::system(0));
            if funder.lamports < lamports {
                return Err(LedgerError::InsufficientFunds {
                    address: payer,
                    required: lamports,
                    available: funder.lamports,
                });
            }
            funder.lamports -= lamports;
            store_account(conn, &payer, &funder).await?;

            let account = Account {
                owner,
                lamports,
                data,
            };
            store_account(conn, &address, &account).await
        }
        AccountChange::Write {
            address,
            expected,
            data,
        } => {
            let mut account = fetch_account(conn, &address)
                .await?
                .ok_or(LedgerError::AccountNotFound(address))?;
            if account.data != expected {
                return Err(LedgerError::AccountChanged(address));
            }
            account.data = data;
            store_account(conn, &address, &account).await
        }
        AccountChange::Close {
            address,
            expected,
            beneficiary,
        } => {
            let closed = fetch_account(conn, &address)
                .await?
                .ok_or(LedgerError::AccountNotFound(address))?;
            if closed.data != expected {
                return Err(LedgerError::AccountChanged(address));
            }
            remove_account(conn, &address).await?;
            credit(conn, &beneficiary, closed.lamports).await
        }
    }
}

#[async_trait]
impl Ledger for Database {
    type Error = sqlx::Error;

    async fn account(&self, address: &Address) -> Result<Option<Account>> {
        let mut conn = self.acquire().await.map_err(LedgerError::Provider)?;
        fetch_account(&mut conn, address).await
    }

    async fn commit(&self, changes: Vec<AccountChange>) -> Result<()> {
        let mut tx = self.begin().await.map_err(LedgerError::Provider)?;

        // Expected-data checks read inside this transaction, so a writer in
        //  another process cannot slip in between check and write.
        //  Returning early rolls back.
        for change in changes {
            apply(&mut tx, change).await?;
        }

        tx.commit().await.map_err(LedgerError::Provider)?;
        Ok(())
    }
}
