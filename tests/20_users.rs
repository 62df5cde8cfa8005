mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn short_username_is_rejected_with_field_errors() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&json!({
            "Username": "short",
            "Password": "a-fine-password",
            "Email": "short@example.com"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "UNPROCESSABLE_ENTITY");
    assert!(
        body["field_errors"]["Username"].is_string(),
        "expected a Username field error: {}",
        body
    );

    // Validation fails before the store is touched, so the name stays free
    let res = client
        .get(format!("{}/users/short", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn registration_never_returns_plaintext_password() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let username = common::unique_username("hashcheck");
    let created =
        common::register_user(&client, &server.base_url, &username, "plain-secret").await?;

    let stored = created["Password"].as_str().unwrap_or_default();
    assert_ne!(stored, "plain-secret");
    assert!(
        stored.starts_with("$argon2id$"),
        "password field should hold an argon2id hash, got: {}",
        stored
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let username = common::unique_username("dupe");
    common::register_user(&client, &server.base_url, &username, "first-password").await?;

    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&json!({
            "Username": username,
            "Password": "second-password",
            "Email": format!("{}@example.com", username)
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn profile_update_applies_only_supplied_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let username = common::unique_username("partial");
    let created =
        common::register_user(&client, &server.base_url, &username, "keep-this-password").await?;
    let original_hash = created["Password"].as_str().unwrap().to_string();

    let token = common::login_user(&client, &server.base_url, &username, "keep-this-password")
        .await?;

    // Update only the email; the stored password hash must not change
    let res = client
        .put(format!("{}/users/{}", server.base_url, username))
        .bearer_auth(&token)
        .json(&json!({ "Email": "changed@example.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["Email"], "changed@example.com");
    assert_eq!(updated["Username"], username.as_str());
    assert_eq!(
        updated["Password"].as_str().unwrap(),
        original_hash,
        "password hash must be untouched when no new password is supplied"
    );

    // The old password still logs in
    common::login_user(&client, &server.base_url, &username, "keep-this-password").await?;
    Ok(())
}

#[tokio::test]
async fn delete_flow_returns_400_then_200_then_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let username = common::unique_username("deleteme");
    common::register_user(&client, &server.base_url, &username, "some-password").await?;
    let token = common::login_user(&client, &server.base_url, &username, "some-password").await?;

    // Deleting a name that was never registered is a 400
    let res = client
        .delete(format!("{}/users/{}never", server.base_url, username))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Deleting the real account confirms in plain text
    let res = client
        .delete(format!("{}/users/{}", server.base_url, username))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, format!("{} was deleted.", username));

    // And the account is gone
    let res = client
        .get(format!("{}/users/{}", server.base_url, username))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
