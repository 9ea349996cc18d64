//! CLI-level tests. Every command here runs with XDG homes pointed at a
//! temp dir so the user's real config and cache never leak in, and with
//! credential env vars cleared unless the test sets them.

use assert_cmd::Command;
use predicates::prelude::*;

fn vitrine(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vitrine").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .env("XDG_CACHE_HOME", dir.path())
        .env_remove("GITHUB_TOKEN")
        .env_remove("MXBAI_API_KEY")
        .env_remove("MXBAI_STORE_ID")
        .env_remove("CHATBASE_SECRET");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    vitrine(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("prs"))
        .stdout(predicate::str::contains("checkout"))
        .stdout(predicate::str::contains("identify"));
}

#[test]
fn prs_without_token_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    vitrine(&dir)
        .args(["prs", "--refresh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GitHub token not configured"));
}

#[test]
fn identify_without_secret_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    vitrine(&dir)
        .args(["identify", "user-42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Chat secret not configured"));
}

#[test]
fn identify_emits_the_keyed_hash() {
    let dir = tempfile::tempdir().unwrap();
    vitrine(&dir)
        .env("CHATBASE_SECRET", "test-secret")
        .args(["identify", "user-42"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "86a7fc2883ace458e6fe1fb45d4672e7a35adc38383b0e1b0870cd6a42d1ddd8",
        ));
}

#[test]
fn search_without_credentials_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    vitrine(&dir)
        .args(["search", "jacket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search API key not configured"));
}

#[test]
fn products_local_only_lists_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    vitrine(&dir)
        .args(["products", "--local-only", "--category", "books"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Field Guide to Espresso"))
        .stdout(predicate::str::contains("\"mixedbreadCount\":0"));
}

#[test]
fn checkout_rejects_an_invalid_form() {
    let dir = tempfile::tempdir().unwrap();
    let request = r#"{
        "items": [],
        "customer": {
            "firstName": "A",
            "lastName": "Lovelace",
            "email": "not-an-email",
            "phone": "555",
            "address": "12 Analytical Way",
            "city": "London",
            "state": "CA",
            "zipCode": "94107",
            "country": "US",
            "cardNumber": "4242424242424242",
            "cardName": "Ada Lovelace",
            "expiryDate": "12/27",
            "cvv": "123"
        }
    }"#;

    vitrine(&dir)
        .arg("checkout")
        .write_stdin(request)
        .assert()
        .failure()
        .stdout(predicate::str::contains("firstName"))
        .stdout(predicate::str::contains("Invalid email address"))
        .stderr(predicate::str::contains("Checkout validation failed"));
}

#[test]
fn checkout_prices_a_valid_order() {
    let dir = tempfile::tempdir().unwrap();
    let request = r#"{
        "items": [
            {
                "product": {
                    "id": "cloth-001",
                    "name": "Linen Shirt",
                    "description": "Relaxed fit.",
                    "price": 49.5,
                    "image": "/products/cloth-001.jpg",
                    "category": "clothing",
                    "stock": 80,
                    "featured": true
                },
                "quantity": 2
            }
        ],
        "customer": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "5551234567",
            "address": "12 Analytical Way",
            "city": "London",
            "state": "CA",
            "zipCode": "94107",
            "country": "US",
            "cardNumber": "4242424242424242",
            "cardName": "Ada Lovelace",
            "expiryDate": "12/27",
            "cvv": "123"
        }
    }"#;

    vitrine(&dir)
        .arg("checkout")
        .write_stdin(request)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"subtotal\":99.0"))
        .stdout(predicate::str::contains("\"status\":\"completed\""));
}

#[test]
fn checkout_with_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    vitrine(&dir)
        .args(["checkout", "--input", "/nonexistent/order.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
