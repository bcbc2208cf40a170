//! Database seeder for Tellerpoint development and testing.
//!
//! Seeds a demo branch: customer accounts, drawer/vault cash locations, and
//! a few advisories exercising every gate severity.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use tellerpoint_db::entities::{
    accounts, advisories, cash_locations,
    sea_orm_active_enums::{AccountStatus, AdvisoryScopeKind, AdvisorySeverity, CashLocationKind},
};

/// Demo party holding the seeded accounts (consistent for all seeds).
const DEMO_PARTY_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo party with a restriction advisory.
const RESTRICTED_PARTY_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = tellerpoint_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding cash locations...");
    seed_cash_locations(&db).await;

    println!("Seeding accounts...");
    seed_accounts(&db).await;

    println!("Seeding advisories...");
    seed_advisories(&db).await;

    println!("Seeding complete!");
}

fn demo_party_id() -> Uuid {
    Uuid::parse_str(DEMO_PARTY_ID).unwrap()
}

fn restricted_party_id() -> Uuid {
    Uuid::parse_str(RESTRICTED_PARTY_ID).unwrap()
}

async fn seed_cash_locations(db: &DatabaseConnection) {
    let now = Utc::now().into();
    let locations = [
        ("DR-01", CashLocationKind::Drawer),
        ("DR-02", CashLocationKind::Drawer),
        ("VAULT", CashLocationKind::Vault),
        ("VAULT-B", CashLocationKind::Vault),
    ];

    for (code, kind) in locations {
        let location = cash_locations::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code.to_string()),
            kind: Set(kind),
            branch_code: Set("BR-001".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        location
            .insert(db)
            .await
            .unwrap_or_else(|_| panic!("Failed to seed cash location {code}"));
    }
}

async fn seed_accounts(db: &DatabaseConnection) {
    let now = Utc::now().into();
    let seeds = [
        ("ACC1", demo_party_id(), "Dana Whitfield - Checking"),
        ("ACC2", demo_party_id(), "Dana Whitfield - Savings"),
        ("ACC9", restricted_party_id(), "Jordan Velez - Checking"),
    ];

    for (number, party, name) in seeds {
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_number: Set(number.to_string()),
            holder_party_id: Set(party),
            display_name: Set(name.to_string()),
            status: Set(AccountStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        };
        account
            .insert(db)
            .await
            .unwrap_or_else(|_| panic!("Failed to seed account {number}"));
    }
}

async fn seed_advisories(db: &DatabaseConnection) {
    let now = Utc::now().into();
    let seeds = [
        (
            restricted_party_id(),
            AdvisorySeverity::Restriction,
            "OFAC review hold",
        ),
        (
            demo_party_id(),
            AdvisorySeverity::RequiresAcknowledgment,
            "Verify updated mailing address",
        ),
        (demo_party_id(), AdvisorySeverity::Notice, "Preferred customer"),
    ];

    for (party, severity, title) in seeds {
        let advisory = advisories::ActiveModel {
            id: Set(Uuid::new_v4()),
            scope_kind: Set(AdvisoryScopeKind::Party),
            scope_id: Set(party),
            severity: Set(severity),
            title: Set(title.to_string()),
            body: Set(None),
            effective_start_at: Set(None),
            effective_end_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        advisory
            .insert(db)
            .await
            .unwrap_or_else(|_| panic!("Failed to seed advisory '{title}'"));
    }
}
