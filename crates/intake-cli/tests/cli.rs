//! Argument parsing and command runs against a CSV directory.

use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use intake_cli::cli::{Cli, Command};
use intake_cli::commands::{read_order, resolve_config, run};
use intake_cli::logging::LogFormat;

const SALES_CSV: &str = "ID_Pedido,Data_Pedido,Nome_Aluno,Nome_Cliente,Tipo_Entrega,Loja_Retirada,Endereco_Loja_Retirada,Itens_JSON,Valor_Total\n\
     A1B2C3D4,2025-01-01 10:00:00,Ana Costa,Maria,retirada_outras_lojas,Loja Centro,,[],\"32,50\"\n\
     FFEE0011,2025-01-31 18:45:00,Bruno Lima,José,entrega,,,[],10\n";

const STORES_CSV: &str = "COD,Nome oficial,ENDEREÇO\n\
     L01,Loja Centro,\"Rua Direita, 10\"\n";

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Base_Vendas.csv"), SALES_CSV).unwrap();
    fs::write(dir.path().join("B_Lojas.csv"), STORES_CSV).unwrap();
    dir
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("intake").chain(args.iter().copied())).unwrap()
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn global_flags_are_accepted_after_the_subcommand() {
    let cli = parse(&["sales", "--student", "ana", "--json", "--data-dir", "/tmp/x"]);
    assert!(cli.json);
    assert_eq!(cli.data_dir.as_deref(), Some(Path::new("/tmp/x")));
    let Command::Sales(args) = cli.command else {
        panic!("expected the sales command");
    };
    let query = args.query();
    assert_eq!(query.student_name.as_deref(), Some("ana"));
    assert_eq!(query.order_id, None);
}

#[test]
fn export_requires_an_output_path() {
    assert!(Cli::try_parse_from(["intake", "export"]).is_err());
    let cli = parse(&["export", "--out", "sales.csv", "--from", "2025-01-01"]);
    let Command::Export(args) = cli.command else {
        panic!("expected the export command");
    };
    assert_eq!(args.filter.query().date_from.as_deref(), Some("2025-01-01"));
}

#[test]
fn unknown_commands_are_rejected() {
    assert!(Cli::try_parse_from(["intake", "reindex"]).is_err());
}

#[test]
fn log_flags_build_the_logging_config() {
    let defaults = parse(&["status"]).log_config(true);
    assert_eq!(defaults.level_filter, LevelFilter::WARN);
    assert!(defaults.use_env_filter);
    assert!(defaults.with_ansi);
    assert!(!defaults.with_timestamps);
    assert_eq!(defaults.format, LogFormat::Pretty);
    assert!(!parse(&["status"]).log_config(false).with_ansi);

    let explicit = parse(&[
        "-v",
        "--log-level",
        "trace",
        "--log-format",
        "json",
        "--log-file",
        "intake.log",
        "status",
    ])
    .log_config(true);
    assert_eq!(explicit.level_filter, LevelFilter::TRACE);
    assert!(!explicit.use_env_filter);
    assert_eq!(explicit.format, LogFormat::Json);
    assert_eq!(explicit.log_file.as_deref(), Some(Path::new("intake.log")));
    assert!(explicit.with_timestamps);
    assert!(explicit.with_target);
    assert!(!explicit.with_ansi);

    let verbose = parse(&["-vv", "--color", "always", "--log-file", "intake.log", "info"])
        .log_config(false);
    assert_eq!(verbose.level_filter, LevelFilter::DEBUG);
    assert!(!verbose.use_env_filter);
    assert!(verbose.with_ansi);
}

#[test]
fn data_dir_flag_overrides_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("intake.toml");
    fs::write(
        &config_path,
        "data_dir = \"shared\"\ncheck_interval_secs = 60\n",
    )
    .unwrap();

    let from_file = resolve_config(Some(&config_path), None).unwrap();
    assert_eq!(from_file.data_dir, Path::new("shared"));
    assert_eq!(from_file.check_interval_secs, 60);

    let overridden = resolve_config(Some(&config_path), Some(Path::new("local"))).unwrap();
    assert_eq!(overridden.data_dir, Path::new("local"));
    assert_eq!(overridden.check_interval_secs, 60);
}

#[test]
fn missing_config_file_names_the_path() {
    let error = resolve_config(Some(Path::new("/nonexistent/intake.toml")), None).unwrap_err();
    assert!(format!("{error:#}").contains("/nonexistent/intake.toml"));
}

#[test]
fn order_payload_uses_form_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.json");
    fs::write(
        &path,
        r#"{
            "aluno": {"nome": "Ana Costa", "sala": "5A"},
            "cliente": {"nome": "Maria"},
            "entrega": {"tipo": "retirada_outras_lojas", "loja": "Loja Centro"},
            "itens": [{"produto": "Pizza", "quantidade": 2}],
            "valorTotal": 65.0
        }"#,
    )
    .unwrap();

    let order = read_order(&path).unwrap();
    assert_eq!(order.student.name, "Ana Costa");
    assert!(order.delivery.is_store_pickup());
    assert_eq!(order.items.len(), 1);
    assert!((order.total - 65.0).abs() < f64::EPSILON);
}

#[test]
fn export_command_writes_filtered_sales() {
    let dir = data_dir();
    let out = dir.path().join("export.csv");
    let cli = parse(&[
        "--data-dir",
        &path_arg(dir.path()),
        "export",
        "--out",
        &path_arg(&out),
        "--student",
        "ana",
    ]);

    run(&cli).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("ID_Pedido,"));
    assert!(written.contains("A1B2C3D4"));
    assert!(written.contains("Rua Direita, 10"));
    assert!(!written.contains("FFEE0011"));
}

#[test]
fn export_with_no_matches_fails() {
    let dir = data_dir();
    let out = dir.path().join("export.csv");
    let cli = parse(&[
        "--data-dir",
        &path_arg(dir.path()),
        "export",
        "--out",
        &path_arg(&out),
        "--order",
        "ZZZZ",
    ]);

    assert!(run(&cli).is_err());
    assert!(!out.exists());
}

#[test]
fn order_command_appends_to_the_sales_log() {
    let dir = data_dir();
    let order_path = dir.path().join("order.json");
    fs::write(
        &order_path,
        r#"{"aluno": {"nome": "Carla"}, "entrega": {"tipo": "entrega"}, "valorTotal": 12.5}"#,
    )
    .unwrap();
    let cli = parse(&[
        "--data-dir",
        &path_arg(dir.path()),
        "--json",
        "order",
        &path_arg(&order_path),
    ]);

    run(&cli).unwrap();

    let sales = fs::read_to_string(dir.path().join("Base_Vendas.csv")).unwrap();
    assert_eq!(sales.lines().count(), 4);
    assert!(sales.contains("Carla"));
    assert!(sales.contains("12.50"));
}

#[test]
fn lookups_that_miss_are_errors() {
    let dir = data_dir();
    let cli = parse(&["--data-dir", &path_arg(dir.path()), "stores", "--name", "Loja Norte"]);
    let error = run(&cli).unwrap_err();
    assert!(error.to_string().contains("Loja Norte"));

    let cli = parse(&["--data-dir", &path_arg(dir.path()), "stores", "--name", "Loja Centro"]);
    run(&cli).unwrap();
}

#[test]
fn status_and_info_run_without_sources() {
    let dir = tempfile::tempdir().unwrap();
    for command in ["status", "info", "refresh", "students"] {
        let cli = parse(&["--data-dir", &path_arg(dir.path()), command]);
        run(&cli).unwrap();
    }
}

#[test]
fn sales_without_a_sales_log_fail() {
    let dir = tempfile::tempdir().unwrap();
    let cli = parse(&["--data-dir", &path_arg(dir.path()), "sales"]);
    assert!(run(&cli).is_err());
}
