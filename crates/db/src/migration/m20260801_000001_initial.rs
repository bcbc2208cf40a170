//! Initial database migration.
//!
//! Creates the enums and tables for the teller posting engine: accounts,
//! cash locations, teller transactions, posting batches and legs, derived
//! account transactions and cash movements, and the advisory tables the
//! compliance gate consults.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: REFERENCE TABLES
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(CASH_LOCATIONS_SQL).await?;

        // ============================================================
        // PART 3: POSTING TABLES
        // ============================================================
        db.execute_unprepared(TELLER_TRANSACTIONS_SQL).await?;
        db.execute_unprepared(POSTING_BATCHES_SQL).await?;
        db.execute_unprepared(POSTING_LEGS_SQL).await?;

        // ============================================================
        // PART 4: DERIVED EFFECTS
        // ============================================================
        db.execute_unprepared(ACCOUNT_TRANSACTIONS_SQL).await?;
        db.execute_unprepared(CASH_MOVEMENTS_SQL).await?;

        // ============================================================
        // PART 5: COMPLIANCE ADVISORIES
        // ============================================================
        db.execute_unprepared(ADVISORIES_SQL).await?;
        db.execute_unprepared(ADVISORY_ACKNOWLEDGMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Teller transaction types
CREATE TYPE teller_transaction_type AS ENUM (
    'deposit',
    'withdrawal',
    'transfer',
    'check_cashing',
    'draft',
    'vault_transfer',
    'misc_receipt',
    'reversal',
    'session_close_variance'
);

-- Teller transaction status
CREATE TYPE teller_transaction_status AS ENUM ('posted', 'failed');

-- Posting batch status (terminal, no partial states)
CREATE TYPE posting_batch_status AS ENUM ('committed');

-- Posting leg side
CREATE TYPE leg_side AS ENUM ('debit', 'credit');

-- Physical cash direction
CREATE TYPE cash_direction AS ENUM ('in', 'out');

-- Advisory severity
CREATE TYPE advisory_severity AS ENUM (
    'info',
    'notice',
    'requires_acknowledgment',
    'restriction'
);

-- Advisory scope
CREATE TYPE advisory_scope_kind AS ENUM ('party', 'account');

-- Customer account status
CREATE TYPE account_status AS ENUM ('active', 'frozen', 'closed');

-- Cash location kind
CREATE TYPE cash_location_kind AS ENUM ('drawer', 'vault');
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    account_number VARCHAR(64) NOT NULL UNIQUE,
    holder_party_id UUID NOT NULL,
    display_name VARCHAR(255) NOT NULL,
    status account_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_holder_party ON accounts(holder_party_id);
";

const CASH_LOCATIONS_SQL: &str = r"
CREATE TABLE cash_locations (
    id UUID PRIMARY KEY,
    code VARCHAR(64) NOT NULL UNIQUE,
    kind cash_location_kind NOT NULL,
    branch_code VARCHAR(32) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_cash_locations_branch ON cash_locations(branch_code);
";

const TELLER_TRANSACTIONS_SQL: &str = r"
CREATE TABLE teller_transactions (
    id UUID PRIMARY KEY,
    -- Idempotency boundary: exactly one committed transaction per request.
    request_id VARCHAR(128) NOT NULL UNIQUE,
    transaction_type teller_transaction_type NOT NULL,
    amount_cents BIGINT NOT NULL CHECK (amount_cents > 0),
    currency VARCHAR(3) NOT NULL,
    status teller_transaction_status NOT NULL DEFAULT 'posted',
    posted_at TIMESTAMPTZ NOT NULL,
    posted_by_user_id UUID NOT NULL,
    approved_by_user_id UUID,
    branch_code VARCHAR(32) NOT NULL,
    workstation_code VARCHAR(32) NOT NULL,
    teller_session_id UUID NOT NULL,
    reversal_of_teller_transaction_id UUID
        REFERENCES teller_transactions(id),
    -- At most one reversal per transaction.
    reversed_by_teller_transaction_id UUID UNIQUE
        REFERENCES teller_transactions(id),
    reversed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_teller_transactions_session ON teller_transactions(teller_session_id);
CREATE INDEX idx_teller_transactions_posted_at ON teller_transactions(posted_at);
";

const POSTING_BATCHES_SQL: &str = r"
CREATE TABLE posting_batches (
    id UUID PRIMARY KEY,
    teller_transaction_id UUID NOT NULL UNIQUE
        REFERENCES teller_transactions(id) ON DELETE CASCADE,
    request_id VARCHAR(128) NOT NULL UNIQUE,
    currency VARCHAR(3) NOT NULL,
    status posting_batch_status NOT NULL DEFAULT 'committed',
    committed_at TIMESTAMPTZ NOT NULL,
    metadata JSONB NOT NULL DEFAULT '{}',
    reversal_of_posting_batch_id UUID REFERENCES posting_batches(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const POSTING_LEGS_SQL: &str = r"
CREATE TABLE posting_legs (
    id UUID PRIMARY KEY,
    posting_batch_id UUID NOT NULL
        REFERENCES posting_batches(id) ON DELETE CASCADE,
    side leg_side NOT NULL,
    account_reference VARCHAR(128) NOT NULL,
    amount_cents BIGINT NOT NULL CHECK (amount_cents > 0),
    position INTEGER NOT NULL CHECK (position >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (posting_batch_id, position)
);

CREATE INDEX idx_posting_legs_reference ON posting_legs(account_reference);
";

const ACCOUNT_TRANSACTIONS_SQL: &str = r"
CREATE TABLE account_transactions (
    id UUID PRIMARY KEY,
    posting_batch_id UUID NOT NULL
        REFERENCES posting_batches(id) ON DELETE CASCADE,
    -- Nullable: kept for audit even after an account renumber.
    account_id UUID REFERENCES accounts(id),
    account_reference VARCHAR(128) NOT NULL,
    direction leg_side NOT NULL,
    amount_cents BIGINT NOT NULL CHECK (amount_cents > 0),
    running_balance_cents BIGINT NOT NULL,
    account_sequence BIGINT NOT NULL,
    description VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_account_transactions_account
    ON account_transactions(account_id, account_sequence DESC);
";

const CASH_MOVEMENTS_SQL: &str = r"
CREATE TABLE cash_movements (
    id UUID PRIMARY KEY,
    teller_transaction_id UUID NOT NULL
        REFERENCES teller_transactions(id) ON DELETE CASCADE,
    direction cash_direction NOT NULL,
    amount_cents BIGINT NOT NULL CHECK (amount_cents > 0),
    teller_session_id UUID NOT NULL,
    cash_location_code VARCHAR(64) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_cash_movements_session ON cash_movements(teller_session_id);
CREATE INDEX idx_cash_movements_location ON cash_movements(cash_location_code);
";

const ADVISORIES_SQL: &str = r"
CREATE TABLE advisories (
    id UUID PRIMARY KEY,
    scope_kind advisory_scope_kind NOT NULL,
    scope_id UUID NOT NULL,
    severity advisory_severity NOT NULL,
    title VARCHAR(255) NOT NULL,
    body TEXT,
    effective_start_at TIMESTAMPTZ,
    effective_end_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_advisories_scope ON advisories(scope_kind, scope_id);
";

const ADVISORY_ACKNOWLEDGMENTS_SQL: &str = r"
CREATE TABLE advisory_acknowledgments (
    id UUID PRIMARY KEY,
    advisory_id UUID NOT NULL
        REFERENCES advisories(id) ON DELETE CASCADE,
    user_id UUID NOT NULL,
    acknowledged_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- One acknowledgment row per user per advisory, kept at the latest.
    UNIQUE (advisory_id, user_id)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS advisory_acknowledgments;
DROP TABLE IF EXISTS advisories;
DROP TABLE IF EXISTS cash_movements;
DROP TABLE IF EXISTS account_transactions;
DROP TABLE IF EXISTS posting_legs;
DROP TABLE IF EXISTS posting_batches;
DROP TABLE IF EXISTS teller_transactions;
DROP TABLE IF EXISTS cash_locations;
DROP TABLE IF EXISTS accounts;

DROP TYPE IF EXISTS cash_location_kind;
DROP TYPE IF EXISTS account_status;
DROP TYPE IF EXISTS advisory_scope_kind;
DROP TYPE IF EXISTS advisory_severity;
DROP TYPE IF EXISTS cash_direction;
DROP TYPE IF EXISTS leg_side;
DROP TYPE IF EXISTS posting_batch_status;
DROP TYPE IF EXISTS teller_transaction_status;
DROP TYPE IF EXISTS teller_transaction_type;
";
