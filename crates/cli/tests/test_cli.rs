use assert_cmd::Command;
use predicates::prelude::*;

fn erp_assist(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("erp-assist").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("GEMINI_ENDPOINT")
        .env_remove("ERP_DATASET")
        .env_remove("RUST_LOG")
        .env("LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_context_prints_selected_data() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["context", "List all products with stock below reorder level"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sections\""))
        .stdout(predicate::str::contains("\"products\""))
        .stdout(predicate::str::contains("P004"));
}

#[test]
fn test_context_summary_respects_section() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["context", "--summary", "--section", "hr", "How many employees?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sections: hr"));
}

#[test]
fn test_unknown_section_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["context", "--section", "inventory", "stock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown section"));
}

#[test]
fn test_ask_offline() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["ask", "--offline", "What is our total revenue?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Offline mode"));
}

#[test]
fn test_ask_off_topic_is_declined_offline() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["ask", "--offline", "Tell me a joke"])
        .assert()
        .success()
        .stdout(predicate::str::contains("I can only assist with questions related to"))
        .stdout(predicate::str::contains("Offline mode").not());
}

#[test]
fn test_ask_without_key_fails_before_sending() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["ask", "What is our total revenue?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_sales_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = erp_assist(&dir).args(["sales", "--json"]).output().unwrap();
    assert!(output.status.success());

    let dashboard: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(dashboard["metrics"]["total_orders"].as_u64().unwrap() > 0);
    assert!(dashboard["reorder_alerts"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a["product_id"] == "P004"));
}

#[test]
fn test_hr_lists_request_types() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["hr", "E002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available requests"))
        .stdout(predicate::str::contains("salary_review"))
        .stdout(predicate::str::contains("hiring_request"));

    erp_assist(&dir)
        .args(["hr", "E999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E999"));
}

#[test]
fn test_leave_request_needs_dates() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["hr", "E003", "--request", "leave", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from"));
}

#[test]
fn test_invoice_offline_saves_document() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args([
            "invoice",
            "--offline",
            "--customer",
            "Sharma Traders",
            "--item",
            "P001:2",
            "--payment",
            "UPI",
            "--output",
            ".",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹1,29,800"))
        .stdout(predicate::str::contains("Saved"));

    assert!(dir.path().join("Invoice_draft.json").exists());
}

#[test]
fn test_invoice_requires_items() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["invoice", "--offline", "--customer", "Sharma Traders"])
        .assert()
        .failure();
}

#[test]
fn test_forecast_offline_reports_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["forecast", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate forecast"));
}

#[test]
fn test_missing_dataset_file() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["--dataset", "nope.json", "sales"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn test_chat_session_offline() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["chat", "--offline"])
        .write_stdin("/section hr\nHow many employees?\n/context\n/export chat.md\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Try asking:"))
        .stdout(predicate::str::contains("Offline mode"))
        .stdout(predicate::str::contains("\"hr\""));

    let transcript = std::fs::read_to_string(dir.path().join("chat.md")).unwrap();
    assert!(transcript.contains("How many employees?"));
}

#[test]
fn test_finance_overview_needs_no_gateway() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .arg("finance")
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial overview"))
        .stdout(predicate::str::contains("-₹2,92,600"))
        .stdout(predicate::str::contains("T3007"));

    let output = erp_assist(&dir).args(["finance", "--json"]).output().unwrap();
    assert!(output.status.success());
    let dashboard: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dashboard["overview"]["income"], 660300.0);
    assert_eq!(dashboard["transactions"][0]["transaction_id"], "T3007");
}

#[test]
fn test_finance_insights_offline_reply_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    erp_assist(&dir)
        .args(["finance", "--insights", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate finance insights"));
}
