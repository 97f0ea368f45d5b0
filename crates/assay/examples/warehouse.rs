//! Example: validate batches backed by a BigQuery dataset.
//!
//! Usage:
//!   GCP_PROJECT=my-project GCP_BIGQUERY_DATASET=taxi \
//!     cargo run --example warehouse -- [sample.csv]
//!
//! `GCP_CREDENTIALS` may hold service-account JSON. When a CSV path is given,
//! the sample is also validated in memory.

use std::env;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use assay::{
    Batch, DataContext, Dataset, EngineDescriptor, ExpectationSuite, InitOptions,
    SqlBatchReference, SqlDataset, TableDataset, TableReader, Validator, WarehouseConfig,
};

fn main() -> assay::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let warehouse = match WarehouseConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("\nSet GCP_PROJECT and GCP_BIGQUERY_DATASET, e.g.:");
            eprintln!("  GCP_PROJECT=my-project GCP_BIGQUERY_DATASET=taxi cargo run --example warehouse");
            std::process::exit(1);
        }
    };

    let connection_string = warehouse.connection_string();
    let context = Arc::new(DataContext::new("my_bigquery_datasource"));
    let suite = ExpectationSuite::new("test_suite");
    let descriptor = EngineDescriptor::new("SqlDataset");

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Warehouse: {}", connection_string);
    println!(
        "Credentials: {}",
        if warehouse.credentials.is_some() { "provided" } else { "none" }
    );
    println!("{}", separator);

    // First batch: a runtime query.
    let reference =
        SqlBatchReference::query(&connection_string, "SELECT * from taxi_data LIMIT 10");
    let batch = Batch::new(reference.into())
        .with_kwarg("data_asset_name", "default_name")
        .with_kwarg("bigquery_temp_table", "ge_temp")
        .with_parameter("default_identifier_name", "something_something")
        .with_context(Arc::clone(&context));

    let validator = Validator::new(batch, suite.clone(), &descriptor, InitOptions::new())?;
    let dataset = validator.get_dataset()?;
    print_preview(dataset.as_ref());
    assert!(dataset.is::<SqlDataset>());

    // Second batch: a whole table.
    let reference = SqlBatchReference::table(&connection_string, "taxi_data")
        .with_schema(&warehouse.dataset);
    let batch = Batch::new(reference.into())
        .with_kwarg("data_asset_name", "taxi_data")
        .with_kwarg("bigquery_temp_table", "ge_temp")
        .with_context(Arc::clone(&context));

    let validator = Validator::new(batch, suite.clone(), &descriptor, InitOptions::new())?;
    let dataset = validator.get_dataset()?;
    print_preview(dataset.as_ref());
    assert!(dataset.is::<SqlDataset>());
    assert_eq!(
        dataset.data_context().map(|c| c.name.as_str()),
        Some("my_bigquery_datasource")
    );

    // Optional in-memory sample.
    if let Some(path) = env::args().nth(1) {
        let table = TableReader::new().read_path(&path)?;
        let validator = Validator::new(
            Batch::new(table.into()).with_context(Arc::clone(&context)),
            suite,
            &EngineDescriptor::new("TableDataset"),
            InitOptions::new(),
        )?;
        let dataset = validator.get_dataset()?;
        if let Some(sample) = dataset.downcast_ref::<TableDataset>() {
            println!();
            println!("Sample {} ({} rows)", path, sample.row_count());
            let head = sample.head(5);
            println!("  {}", head.headers.join(" | "));
            for row in &head.rows {
                println!("  {}", row.join(" | "));
            }
        }
    }

    Ok(())
}

fn print_preview(dataset: &dyn Dataset) {
    println!();
    println!("Engine: {} ({})", dataset.class_name(), dataset.kind());
    if let Some(sql) = dataset.downcast_ref::<SqlDataset>() {
        println!("  Preview: {}", sql.head_query(5));
    }
    for (key, value) in dataset.batch_kwargs() {
        println!("  {} = {}", key, value);
    }
}
