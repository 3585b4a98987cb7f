use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use comfy_table::Table;
use serde::Serialize;
use tracing::{debug, info};

use intake_cache::{CacheConfig, LogAlertSink, ReferenceCache};
use intake_ingest::CsvStore;
use intake_model::NewOrder;

use crate::cli::{Cli, Command, ExportArgs, NameArgs, OrderArgs, SalesArgs};
use crate::summary;

/// Build the cache configuration from `--config` and `--data-dir`.
pub fn resolve_config(config: Option<&Path>, data_dir: Option<&Path>) -> Result<CacheConfig> {
    let mut resolved = match config {
        Some(path) => CacheConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => CacheConfig::default(),
    };
    if let Some(dir) = data_dir {
        resolved.data_dir = dir.to_path_buf();
    }
    debug!(data_dir = %resolved.data_dir.display(), "resolved cache config");
    Ok(resolved)
}

/// Open a cache over the CSV directory named by `config`.
pub fn open_cache(config: CacheConfig) -> (ReferenceCache, Arc<LogAlertSink>) {
    let alerts = Arc::new(LogAlertSink::spawn(config.alert_cooldown()));
    let store = Arc::new(CsvStore::new(config.data_dir.clone()));
    let cache = ReferenceCache::new(store, alerts.clone(), config);
    (cache, alerts)
}

/// Run the selected command and flush pending alerts.
pub fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.data_dir.as_deref())?;
    let (cache, alerts) = open_cache(config);
    let output = Output { json: cli.json };
    let result = dispatch(&cache, &cli.command, output);
    alerts.close();
    result
}

fn dispatch(cache: &ReferenceCache, command: &Command, output: Output) -> Result<()> {
    match command {
        Command::Students(args) => run_students(cache, args, output),
        Command::Customers(args) => run_customers(cache, args, output),
        Command::Stores(args) => run_stores(cache, args, output),
        Command::Products(args) => run_products(cache, args, output),
        Command::Sales(args) => run_sales(cache, args, output),
        Command::Stats => run_stats(cache, output),
        Command::Export(args) => run_export(cache, args),
        Command::Order(args) => run_order(cache, args, output),
        Command::Info => run_info(cache, output),
        Command::Status => run_status(cache, output),
        Command::Refresh => {
            cache.force_refresh();
            run_info(cache, output)
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn emit<T: Serialize + ?Sized>(self, value: &T, table: impl FnOnce() -> Table) -> Result<()> {
        if self.json {
            let rendered = serde_json::to_string_pretty(value).context("serialize output")?;
            println!("{rendered}");
        } else {
            println!("{}", table());
        }
        Ok(())
    }
}

fn run_students(cache: &ReferenceCache, args: &NameArgs, output: Output) -> Result<()> {
    match &args.name {
        Some(name) => {
            let student = cache
                .find_student_by_name(name)
                .ok_or_else(|| anyhow!("no student matches {name:?}"))?;
            output.emit(&student, || summary::students_table(std::slice::from_ref(&student)))
        }
        None => {
            let students = cache.get_students();
            output.emit(students.as_slice(), || summary::students_table(&students))
        }
    }
}

fn run_customers(cache: &ReferenceCache, args: &NameArgs, output: Output) -> Result<()> {
    match &args.name {
        Some(name) => {
            let customer = cache
                .find_customer_by_name(name)
                .ok_or_else(|| anyhow!("no customer named {name:?}"))?;
            output.emit(&customer, || summary::customers_table(std::slice::from_ref(&customer)))
        }
        None => {
            let customers = cache.get_customers();
            output.emit(customers.as_slice(), || summary::customers_table(&customers))
        }
    }
}

fn run_stores(cache: &ReferenceCache, args: &NameArgs, output: Output) -> Result<()> {
    match &args.name {
        Some(name) => {
            let store = cache
                .find_store_by_name(name)
                .ok_or_else(|| anyhow!("no store named {name:?}"))?;
            output.emit(&store, || summary::stores_table(std::slice::from_ref(&store)))
        }
        None => {
            let stores = cache.get_stores();
            output.emit(stores.as_slice(), || summary::stores_table(&stores))
        }
    }
}

fn run_products(cache: &ReferenceCache, args: &NameArgs, output: Output) -> Result<()> {
    match &args.name {
        Some(name) => {
            let product = cache
                .find_product_by_name(name)
                .ok_or_else(|| anyhow!("no product named {name:?}"))?;
            output.emit(&product, || summary::products_table(std::slice::from_ref(&product)))
        }
        None => {
            let products = cache.get_products();
            output.emit(products.as_slice(), || summary::products_table(&products))
        }
    }
}

fn run_sales(cache: &ReferenceCache, args: &SalesArgs, output: Output) -> Result<()> {
    let sales = cache
        .search_sales(&args.query())
        .context("search sales")?;
    output.emit(&sales, || summary::sales_table(&sales))
}

fn run_stats(cache: &ReferenceCache, output: Output) -> Result<()> {
    let stats = cache
        .sales_statistics(Local::now().date_naive())
        .context("compute sales statistics")?;
    output.emit(&stats, || summary::statistics_table(&stats))
}

fn run_export(cache: &ReferenceCache, args: &ExportArgs) -> Result<()> {
    let written = cache
        .export_sales(&args.filter.query(), &args.out)
        .with_context(|| format!("export sales to {}", args.out.display()))?;
    println!("Exported {written} orders to {}", args.out.display());
    Ok(())
}

fn run_order(cache: &ReferenceCache, args: &OrderArgs, output: Output) -> Result<()> {
    let order = read_order(&args.file)?;
    let receipt = cache.place_order(&order).context("place order")?;
    info!(order_id = %receipt.order_id, "order placed");
    output.emit(&receipt, || summary::receipt_table(&receipt))
}

/// Parse an order payload file.
pub fn read_order(path: &Path) -> Result<NewOrder> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read order {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse order {}", path.display()))
}

fn run_info(cache: &ReferenceCache, output: Output) -> Result<()> {
    let info = cache.get_cache_info();
    if !output.json {
        for line in summary::cache_info_header(&info) {
            println!("{line}");
        }
    }
    output.emit(&info, || summary::cache_info_table(&info))
}

fn run_status(cache: &ReferenceCache, output: Output) -> Result<()> {
    let statuses = cache.source_status();
    output.emit(&statuses, || summary::source_status_table(&statuses))
}
