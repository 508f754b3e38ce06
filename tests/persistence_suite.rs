mod common;

use chrono::{TimeZone, Utc};
use nova_config::Config;
use nova_core::{DashboardQuery, FixedClock, LedgerSession, ProfileService};
use nova_domain::{Category, CurrencyCode, FilterRange, TransactionDraft, TransactionKind};

use common::{setup_test_env, temp_home};

fn clock(y: i32, m: u32, d: u32) -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap())
}

fn expense(amount: f64, description: &str, category: Category) -> TransactionDraft {
    TransactionDraft::new(TransactionKind::Expense, amount, description, category)
}

#[test]
fn ledger_state_survives_a_fresh_store() {
    let base = temp_home();
    let policy = Config::default().prediction.policy();

    let uid = {
        let (store, _) = setup_test_env(&base);
        let profile = ProfileService::create(&store, "Ada", CurrencyCode::EUR).expect("create");
        ProfileService::login(&store, &clock(2025, 2, 1), profile.uid).expect("login");

        let feb = clock(2025, 2, 1);
        let mut ledger = LedgerSession::open(
            &store,
            &feb,
            profile.clone(),
            DashboardQuery::new(FilterRange::Year),
            policy,
        )
        .expect("open");
        ledger
            .add(&store, &feb, expense(900.0, "Rent", Category::Housing))
            .expect("add rent");
        ledger
            .add(
                &store,
                &feb,
                TransactionDraft::new(TransactionKind::Income, 2500.0, "Salary", Category::Salary),
            )
            .expect("add salary");

        let mar = clock(2025, 3, 1);
        ledger
            .add(&store, &mar, expense(900.0, "rent ", Category::Housing))
            .expect("add rent again");
        ledger
            .add(&store, &mar, expense(12.0, "Lunch", Category::Food))
            .expect("add lunch");
        ledger
            .add(&store, &mar, expense(30.0, "Fuel", Category::Transportation))
            .expect("add fuel");
        profile.uid
    };

    let (store, _) = setup_test_env(&base);
    let current = ProfileService::current(&store)
        .expect("read session")
        .expect("still signed in");
    assert_eq!(current.uid, uid);
    assert_eq!(current.currency, CurrencyCode::EUR);

    let ledger = LedgerSession::open(
        &store,
        &clock(2025, 3, 28),
        current,
        DashboardQuery::new(FilterRange::Year),
        policy,
    )
    .expect("reopen");
    assert_eq!(ledger.transactions().len(), 5);
    assert_eq!(ledger.total_balance(), 2500.0 - 1842.0);

    let alert = ledger.alert().expect("rent is due soon");
    assert_eq!(alert.description, "rent ");
    assert_eq!(
        alert.predicted_date,
        chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    );
    assert_eq!(alert.days_remaining, 4);
    assert_eq!(alert.avg_amount, 900.0);
}

#[test]
fn config_and_store_share_the_shell_layout() {
    let base = temp_home();
    let (store, config_manager) = setup_test_env(&base);

    assert!(store.root().ends_with("data"));
    assert_eq!(
        config_manager.config_path(),
        base.join("config").join("config.json")
    );

    let cfg = Config {
        currency: CurrencyCode::JPY,
        ..Config::default()
    };
    config_manager.save(&cfg).expect("save");
    assert_eq!(config_manager.load().expect("load").currency, CurrencyCode::JPY);
    assert!(ProfileService::list(&store).expect("list").is_empty());
}
