//! Initial finance schema.
//!
//! Creates parties, accounts, categories, and movements. Status and kind
//! columns hold lowercase text labels; legacy rows may carry the older
//! Portuguese spellings, which the record store still reads.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(PARTIES_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(MOVEMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const PARTIES_SQL: &str = r"
CREATE TABLE parties (
    id              UUID PRIMARY KEY,
    name            VARCHAR(255) NOT NULL,
    kind            VARCHAR(20) NOT NULL,
    status          VARCHAR(20) NOT NULL DEFAULT 'active',
    email           VARCHAR(255),
    phone           VARCHAR(50),
    tax_id          VARCHAR(50),
    address         TEXT,
    city            VARCHAR(100),
    state           VARCHAR(100),
    postal_code     VARCHAR(20),
    notes           TEXT,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_parties_name ON parties(name);
CREATE INDEX idx_parties_kind_status ON parties(kind, status);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id              UUID PRIMARY KEY,
    name            VARCHAR(255) NOT NULL,
    kind            VARCHAR(20) NOT NULL,
    current_balance NUMERIC(18, 4) NOT NULL DEFAULT 0,
    initial_balance NUMERIC(18, 4) NOT NULL DEFAULT 0,
    status          VARCHAR(20) NOT NULL DEFAULT 'active',
    bank_name       VARCHAR(100),
    branch          VARCHAR(20),
    account_number  VARCHAR(50),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_accounts_name ON accounts(name);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id              UUID PRIMARY KEY,
    name            VARCHAR(255) NOT NULL,
    category_type   VARCHAR(20) NOT NULL,
    status          VARCHAR(20) NOT NULL DEFAULT 'active',
    description     TEXT,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_categories_name ON categories(name);
";

const MOVEMENTS_SQL: &str = r"
CREATE TABLE movements (
    id                      UUID PRIMARY KEY,
    movement_type           VARCHAR(20) NOT NULL,
    description             TEXT NOT NULL,
    value                   NUMERIC(18, 4) NOT NULL,
    due_date                DATE NOT NULL,
    payment_date            DATE,
    status                  VARCHAR(20) NOT NULL DEFAULT 'pending',
    account_id              UUID NOT NULL REFERENCES accounts(id),
    destination_account_id  UUID REFERENCES accounts(id),
    category_id             UUID REFERENCES categories(id) ON DELETE SET NULL,
    party_id                UUID REFERENCES parties(id) ON DELETE SET NULL,
    installment_index       INTEGER,
    installment_total       INTEGER,
    parent_movement_id      UUID REFERENCES movements(id),
    notes                   TEXT,
    payment_method          VARCHAR(50),
    document                VARCHAR(100),
    created_at              TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at              TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_movement_value_positive CHECK (value > 0),
    CONSTRAINT chk_movement_installment CHECK (
        (installment_index IS NULL AND installment_total IS NULL)
        OR (installment_index >= 1 AND installment_index <= installment_total)
    )
);

CREATE INDEX idx_movements_due_date ON movements(due_date DESC);
CREATE INDEX idx_movements_payment_date ON movements(payment_date) WHERE payment_date IS NOT NULL;
CREATE INDEX idx_movements_status ON movements(status);
CREATE INDEX idx_movements_account ON movements(account_id);
CREATE INDEX idx_movements_parent ON movements(parent_movement_id) WHERE parent_movement_id IS NOT NULL;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS movements CASCADE;
DROP TABLE IF EXISTS categories CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS parties CASCADE;
";
