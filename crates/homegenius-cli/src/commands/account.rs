use anyhow::{Context, Result, bail};
use colored::Colorize;
use homegenius_application::AppContext;
use homegenius_core::user::{LoginCredentials, PreferenceBag, RegisterData, User};
use serde_json::Value;
use std::io::{self, BufRead, Write};

use super::print_rows;

fn read_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    Ok(password)
}

async fn signed_in_user(context: &AppContext) -> Result<User> {
    match context.session().snapshot().await.user() {
        Some(user) => Ok(user.clone()),
        None => bail!("Not logged in. Run `homegenius login <username>` first."),
    }
}

pub async fn login(context: &AppContext, username: String, password: Option<String>) -> Result<()> {
    let credentials = LoginCredentials::new(username, read_password(password)?);
    let user = context.session().login(&credentials).await?;
    println!("{}", format!("Logged in as {}", user.display_name()).green());
    Ok(())
}

pub async fn register(
    context: &AppContext,
    username: String,
    email: String,
    full_name: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let data = RegisterData {
        email,
        username,
        password: read_password(password)?,
        full_name,
    };
    let user = context.session().register(&data).await?;
    println!(
        "{}",
        format!("Welcome, {}! You are now logged in.", user.display_name()).green()
    );
    Ok(())
}

pub async fn logout(context: &AppContext) -> Result<()> {
    context.session().logout().await;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(context: &AppContext) -> Result<()> {
    let Some(user) = context.session().snapshot().await.user().cloned() else {
        println!("{}", "Not logged in".bright_black());
        return Ok(());
    };

    println!("{}", user.display_name().bold());
    let mut rows = vec![
        ("Username".to_string(), user.username.clone()),
        ("Email".to_string(), user.email.clone()),
        (
            "Verified".to_string(),
            if user.is_verified { "yes" } else { "no" }.to_string(),
        ),
        ("Member since".to_string(), user.created_at.clone()),
    ];
    if let Some(last_login) = &user.last_login {
        rows.push(("Last login".to_string(), last_login.clone()));
    }
    print_rows(&rows);
    Ok(())
}

pub async fn show_preferences(context: &AppContext) -> Result<()> {
    let user = signed_in_user(context).await?;
    let preferences = user.preferences.unwrap_or_default();
    if preferences.is_empty() {
        println!("{}", "No preferences set".bright_black());
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&preferences)?);
    Ok(())
}

/// JSON when it parses (`5000000`, `["modern"]`, `true`), a plain string otherwise.
fn preference_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub async fn set_preference(context: &AppContext, key: String, raw: &str) -> Result<()> {
    let user = signed_in_user(context).await?;
    let mut preferences: PreferenceBag = user.preferences.unwrap_or_default();
    preferences.insert(key.clone(), preference_value(raw));

    context.session().update_preferences(&preferences).await?;
    println!("{}", format!("Saved preference '{}'", key).green());
    Ok(())
}
