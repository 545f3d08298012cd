mod common;

use common::{setup_test_env, uzs};
use fx_ledger::{
    config::{Config, SortMode},
    core::{
        format::summary_text,
        services::{
            FilterCriteria, FilterService, LedgerView, SummaryService, TransactionBuilder,
            TransactionDraft,
        },
    },
    domain::{CategorySet, Transaction, TransactionField},
    ValidationError,
};

fn sample_records() -> Vec<Transaction> {
    vec![
        uzs("2024-01-15", 100.0, "A"),
        uzs("2024-02-01", 50.0, "B"),
        uzs("2023-01-20", 30.0, "A"),
        uzs("2024-01-31", 20.0, "B"),
        uzs("bad-date", 5.0, "A"),
    ]
}

#[test]
fn year_and_month_filter_selects_matching_records() {
    let records = vec![
        uzs("2024-01-15", 1.0, "A"),
        uzs("2024-02-01", 1.0, "A"),
        uzs("2023-01-20", 1.0, "A"),
    ];
    let criteria = FilterCriteria::new().with_year("2024").with_month("01");
    let view = FilterService::filter(&records, &criteria);
    assert_eq!(view, vec![records[0].clone()]);
}

#[test]
fn filter_is_an_idempotent_subset() {
    let records = sample_records();
    let criteria = FilterCriteria::new().with_category("A");
    let once = FilterService::filter(&records, &criteria);
    let twice = FilterService::filter(&once, &criteria);

    assert_eq!(once, twice);
    assert!(once.iter().all(|txn| records.contains(txn)));
    assert!(once.iter().all(|txn| txn.category == "A"));
    assert_eq!(FilterService::filter(&records, &FilterCriteria::default()), records);
}

#[test]
fn grand_total_equals_sum_of_category_totals() {
    let records = sample_records();
    let grand = SummaryService::grand_total(&records);
    let by_category: i64 = SummaryService::totals_by_category(&records)
        .iter()
        .map(|entry| entry.total)
        .sum();
    assert_eq!(grand, 205);
    assert_eq!(grand, by_category);
}

#[test]
fn month_totals_skip_unparseable_dates_without_dropping_records() {
    let records = sample_records();
    let by_month = SummaryService::totals_by_month(&records);
    assert_eq!(by_month.get("2024-01"), Some(&120));
    assert_eq!(by_month.get("2024-02"), Some(&50));
    assert_eq!(by_month.get("2023-01"), Some(&30));
    assert_eq!(by_month.values().sum::<i64>(), 200);

    let by_category = SummaryService::totals_by_category(&records);
    assert_eq!(by_category[0].total, 135);
    assert_eq!(records.len(), 5);
}

#[test]
fn sort_is_stable_and_uses_string_order() {
    let records = vec![
        uzs("2024-01-01", 9.0, "B"),
        uzs("2024-01-02", 10.0, "A"),
        uzs("2024-01-03", 8.0, "B"),
    ];
    let sorted = FilterService::sort(records.clone(), TransactionField::Category, false);
    let dates: Vec<&str> = sorted.iter().map(|txn| txn.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-02", "2024-01-01", "2024-01-03"]);

    let sorted = FilterService::sort(records, TransactionField::TotalUzs, false);
    let totals: Vec<i64> = sorted.iter().map(|txn| txn.total_uzs).collect();
    assert_eq!(totals, vec![10, 8, 9]);
}

#[test]
fn builder_derives_truncated_total() {
    let categories = CategorySet::presets();
    let markers = Config::default().category_markers;
    let builder = TransactionBuilder::new(&categories, &markers);

    let draft = TransactionDraft {
        date: "2024-01-15".into(),
        uzs: "5000".into(),
        usd: "100".into(),
        rate: "12500".into(),
        category: "Нал от Шаяны (USD)".into(),
        comment: String::new(),
    };
    assert_eq!(builder.build(&draft).unwrap().total_uzs, 1_255_000);

    let fractional = TransactionDraft {
        uzs: "0.9".into(),
        usd: "1".into(),
        rate: "12650.75".into(),
        ..draft
    };
    assert_eq!(builder.build(&fractional).unwrap().total_uzs, 12_651);
}

#[test]
fn builder_rejects_bad_input() {
    let categories = CategorySet::presets();
    let markers = Config::default().category_markers;
    let builder = TransactionBuilder::new(&categories, &markers);

    let missing_rate = TransactionDraft {
        usd: "50".into(),
        rate: "0".into(),
        category: "Rent".into(),
        ..TransactionDraft::today()
    };
    assert_eq!(builder.build(&missing_rate), Err(ValidationError::MissingRate));

    let bad_amount = TransactionDraft {
        uzs: "abc".into(),
        category: "Rent".into(),
        ..TransactionDraft::today()
    };
    assert!(matches!(
        builder.build(&bad_amount),
        Err(ValidationError::InvalidAmount { field: "uzs", .. })
    ));

    let no_category = TransactionDraft {
        uzs: "10".into(),
        ..TransactionDraft::today()
    };
    assert_eq!(builder.build(&no_category), Err(ValidationError::MissingCategory));
}

#[test]
fn store_and_view_work_together() {
    let (mut store, _config) = setup_test_env();
    for txn in sample_records() {
        store.add(txn).unwrap();
    }

    let mut view = LedgerView::new(SortMode::Shared);
    view.apply_filters(store.ledger(), FilterCriteria::new().with_year("2024"));
    assert_eq!(view.rows().len(), 3);

    let target = view.row(0).cloned().unwrap();
    store.delete(&target).unwrap();
    view.refresh(store.ledger());
    assert_eq!(view.rows().len(), 2);
    assert_eq!(store.transactions().len(), 4);

    let text = summary_text(&view.summary(), &Config::default().formatter());
    assert!(text.starts_with("TOTAL (all): 70 UZS"));

    let config = Config {
        thousands_separator: '.',
        ..Config::default()
    };
    store.add(uzs("2024-03-01", 1_000_000.0, "A")).unwrap();
    view.refresh(store.ledger());
    let text = summary_text(&view.summary(), &config.formatter());
    assert!(text.starts_with("TOTAL (all): 1.000.070 UZS"));
}

#[test]
fn deleting_a_record_twice_is_harmless() {
    let (mut store, _config) = setup_test_env();
    store.add(uzs("2024-01-01", 1.0, "Rent")).unwrap();
    let record = store.transactions()[0].clone();

    assert!(store.delete(&record).unwrap().is_some());
    let before = store.ledger().clone();
    assert!(store.delete(&record).unwrap().is_none());
    assert_eq!(store.ledger(), &before);
}

#[test]
fn large_accepted_amounts_do_not_overflow_totals() {
    let categories = CategorySet::presets();
    let markers = Config::default().category_markers;
    let builder = TransactionBuilder::new(&categories, &markers);

    let draft = TransactionDraft {
        date: "2024-01-01".into(),
        uzs: "9e18".into(),
        category: "A".into(),
        ..TransactionDraft::default()
    };
    let records = vec![builder.build(&draft).unwrap(), builder.build(&draft).unwrap()];
    assert_eq!(SummaryService::grand_total(&records), i64::MAX);
    assert_eq!(SummaryService::summarize(&records).by_category[0].total, i64::MAX);

    let huge = TransactionDraft {
        usd: "1e200".into(),
        rate: "1e200".into(),
        ..draft
    };
    assert!(matches!(
        builder.build(&huge),
        Err(ValidationError::InvalidAmount { .. })
    ));
}
