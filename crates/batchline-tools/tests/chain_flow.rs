//! End-to-end scenarios over the operation surface.

use batchline_core::{DomainStore, FactoryConfig, RateTable};
use batchline_tools::{BatchTools, ToolOutcome, ToolsConfig};
use std::sync::Arc;

fn seeded_tools() -> BatchTools {
    BatchTools::new(ToolsConfig::default().with_seed(42))
}

#[tokio::test]
async fn clean_premium_chain_runs_end_to_end() {
    let tools = seeded_tools();

    let created = tools.create_data(5, "premium").await;
    assert!(!created.chain_stop);

    let batch = tools.run_batch("invoices").await;
    assert!(!batch.chain_stop);
    let ToolOutcome::Batch(outcome) = batch.outcome else {
        panic!("expected batch outcome");
    };
    assert_eq!(outcome.processed_count, 5);
    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.success_rate(), 100.0);

    let validation = tools.validate("invoices").await;
    assert!(!validation.chain_stop);
    let ToolOutcome::Validation(outcome) = validation.outcome else {
        panic!("expected validation outcome");
    };
    assert_eq!(outcome.valid_count, 5);
    assert_eq!(outcome.invalid_count, 0);

    let report = tools.generate_report().await;
    assert!(report.text.contains("5 records"));
    assert!(report.text.contains("All Valid"));
}

#[tokio::test]
async fn zero_count_chain_is_defined_not_nan() {
    let tools = seeded_tools();

    tools.create_data(0, "standard").await;

    let batch = tools.run_batch("invoices").await;
    assert!(!batch.chain_stop);
    let ToolOutcome::Batch(outcome) = batch.outcome else {
        panic!("expected batch outcome");
    };
    assert_eq!(outcome.processed_count, 0);
    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.success_rate(), 0.0);
    assert!(batch.text.contains("0.0%"));

    let validation = tools.validate("invoices").await;
    let ToolOutcome::Validation(outcome) = validation.outcome else {
        panic!("expected validation outcome");
    };
    assert_eq!(outcome.valid_count, 0);
    assert_eq!(outcome.invalid_count, 0);
}

#[tokio::test]
async fn operations_on_unknown_domains_are_rejected_without_state_change() {
    let tools = seeded_tools();

    let batch = tools.run_batch("nonexistent").await;
    assert!(batch.chain_stop);
    assert!(matches!(batch.outcome, ToolOutcome::Rejected { .. }));
    assert!(batch.text.contains("no data found for domain `nonexistent`"));

    let validation = tools.validate("nonexistent").await;
    assert!(validation.chain_stop);
    assert!(matches!(validation.outcome, ToolOutcome::Rejected { .. }));

    assert!(tools.store().is_empty());
    let report = tools.generate_report().await;
    assert!(!report.text.contains("NONEXISTENT"));
}

#[tokio::test]
async fn zero_rate_factor_is_caught_by_validation_not_processing() {
    let config = ToolsConfig::default()
        .with_seed(7)
        .with_factory(FactoryConfig::default().with_rates(RateTable::new(0.0)));
    let tools = BatchTools::new(config);

    tools.create_data(3, "standard").await;

    // processing succeeds: total == amount is not a processing failure
    let batch = tools.run_batch("invoices").await;
    assert!(!batch.chain_stop);

    // validation flags the business rule and stops the chain
    let validation = tools.validate("invoices").await;
    assert!(validation.chain_stop);
    let ToolOutcome::Validation(outcome) = validation.outcome else {
        panic!("expected validation outcome");
    };
    assert_eq!(outcome.invalid_count, 3);
    assert_eq!(outcome.findings_count, 3);

    let report = tools.generate_report().await;
    assert!(report.text.contains("3 errors"));
}

#[tokio::test]
async fn report_is_idempotent_apart_from_the_timestamp() {
    let tools = seeded_tools();
    tools.create_data(4, "premium").await;
    tools.run_batch("invoices").await;
    tools.validate("invoices").await;

    let strip_timestamp = |text: &str| -> String {
        text.lines()
            .filter(|line| !line.starts_with("Report generated:"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let first = tools.generate_report().await;
    let second = tools.generate_report().await;
    assert_eq!(strip_timestamp(&first.text), strip_timestamp(&second.text));
}

#[tokio::test]
async fn surfaces_sharing_a_store_do_not_interfere_across_domains() {
    let store = Arc::new(DomainStore::new());
    let invoices = Arc::new(BatchTools::with_store(
        ToolsConfig::default().with_seed(1),
        Arc::clone(&store),
    ));
    let receipts = Arc::new(BatchTools::with_store(
        ToolsConfig::default().with_seed(2).with_domain("receipts"),
        Arc::clone(&store),
    ));

    let a = {
        let tools = Arc::clone(&invoices);
        tokio::spawn(async move {
            tools.create_data(20, "premium").await;
            tools.run_batch("invoices").await
        })
    };
    let b = {
        let tools = Arc::clone(&receipts);
        tokio::spawn(async move {
            tools.create_data(10, "standard").await;
            tools.run_batch("receipts").await
        })
    };

    let (batch_a, batch_b) = (a.await.unwrap(), b.await.unwrap());
    assert!(!batch_a.chain_stop);
    assert!(!batch_b.chain_stop);

    let report = invoices.generate_report().await;
    assert!(report.text.contains("INVOICES    : 20 records"));
    assert!(report.text.contains("RECEIPTS    : 10 records"));
}
