mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cli(base: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("expense_core_cli").unwrap();
    cmd.env("EXPENSE_CORE_HOME", base)
        .env("EXPENSE_CORE_CLI_SCRIPT", "1")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn script_mode_records_rows_and_totals() {
    let base = common::temp_base();
    let input = "month 2024-01\n\
                 add 2024-01-01 income 1000 Salary Paycheck\n\
                 add 2024-01-05 expense 350,5 Utilities \"Power bill\"\n\
                 totals\n\
                 exit\n";

    cli(&base)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Added row 2."))
        .stdout(contains("Income : R$\u{a0}1.000,00"))
        .stdout(contains("Balance: R$\u{a0}649,50"));

    let stored = std::fs::read_to_string(base.join("store/planilha_financeira_mes.json")).unwrap();
    let document: serde_json::Value = serde_json::from_str(&stored).unwrap();
    let rows = document["2024-01"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["description"], "Power bill");
    assert_eq!(rows[1]["type"], "expense");
}

#[test]
fn rows_persist_between_runs() {
    let base = common::temp_base();
    cli(&base)
        .write_stdin("month 2024-03\nadd 2024-03-02 expense 20 Transport Bus\n")
        .assert()
        .success();

    cli(&base)
        .write_stdin("month 2024-03\nlist\nchart day\nmonths\n")
        .assert()
        .success()
        .stdout(contains("Bus"))
        .stdout(contains("02/03/2024 |"))
        .stdout(contains("* 2024-03"));
}

#[test]
fn errors_are_reported_without_stopping_the_script() {
    let base = common::temp_base();
    cli(&base)
        .write_stdin("month 2024-01\ndelete 7\ntotls\nclear\ntotals\n")
        .assert()
        .success()
        .stderr(contains("row 7 does not exist"))
        .stderr(contains("Unknown command `totls`"))
        .stderr(contains("needs --yes"))
        .stdout(contains("Did you mean `totals`?"))
        .stdout(contains("Totals for 2024-01"));
}

#[test]
fn legacy_export_can_be_imported() {
    let base = common::temp_base();
    let export = base.join("gastos.json");
    std::fs::write(
        &export,
        r#"[{"data":"2024-05-04","descricao":"Farmácia","categoria":"Health","pagamento":"Cartão","valor":42.5}]"#,
    )
    .unwrap();

    cli(&base)
        .write_stdin(format!(
            "import-legacy {}\nmonth 2024-05\nlist\n",
            export.display()
        ))
        .assert()
        .success()
        .stdout(contains("Imported 1 rows into 1 months (0 skipped)."))
        .stdout(contains("Farmácia").and(contains("42,50")));
}

#[test]
fn version_reports_package_version() {
    let base = common::temp_base();
    cli(&base)
        .write_stdin("version\n")
        .assert()
        .success()
        .stdout(contains(format!("Expense Core {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn config_changes_are_saved_for_later_runs() {
    let base = common::temp_base();
    cli(&base)
        .write_stdin("config set locale en-US\nconfig set currency usd\n")
        .assert()
        .success()
        .stdout(contains("Updated currency."));

    let saved = std::fs::read_to_string(base.join("config.json")).unwrap();
    let config: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(config["locale"], "en-US");
    assert_eq!(config["currency"], "USD");

    cli(&base)
        .write_stdin("month 2024-01\nadd 2024-01-02 income 1234.5\ntotals\n")
        .assert()
        .success()
        .stdout(contains("Income : $1,234.50"));
}
