use anyhow::{bail, Context};
use clap::Parser;
use subscriber_relay::adapters::{
    FileResponseStore, FileSettingsStore, FileUserStore, LocalStorage,
};
use subscriber_relay::config::{Cli, Command, ResponsesAction, SettingsAction, UsersAction};
use subscriber_relay::core::report::{responses_to_csv, ProcessingReport};
use subscriber_relay::domain::model::User;
use subscriber_relay::domain::ports::{ResponseStore, SettingsStore, UserStore};
use subscriber_relay::utils::{logger, validation};
use subscriber_relay::RelayEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let storage = LocalStorage::new(cli.data_dir.clone());
    let settings_store = FileSettingsStore::new(storage.clone());
    let response_store = FileResponseStore::new(storage.clone());
    let user_store = FileUserStore::new(storage.clone());

    match cli.command {
        Command::Login { username, password } => {
            match user_store.verify(&username, &password).await? {
                Some(user) => {
                    user_store.set_current_user(Some(&user)).await?;
                    println!("✅ Logged in as {} ({})", user.name, user.role);
                }
                None => bail!("Invalid username or password"),
            }
        }

        Command::Logout => {
            user_store.set_current_user(None).await?;
            println!("Logged out");
        }

        Command::Process {
            file,
            webhook_url,
            auth_token,
            report,
        } => {
            let Some(operator) = user_store.current_user().await? else {
                bail!("Not logged in. Run `subscriber-relay login` first.");
            };
            tracing::info!("Processing as {}", operator.username);

            let mut settings = settings_store.load().await?;
            if let Some(url) = webhook_url {
                settings.webhook_url = url;
            }
            if let Some(token) = auth_token {
                settings.auth_token = token;
            }
            if settings.webhook_url.is_empty() {
                bail!("Webhook URL is not configured. Set it with `subscriber-relay settings set`.");
            }
            if settings.auth_token.is_empty() {
                bail!("Authentication token is not configured. Set it with `subscriber-relay settings set`.");
            }

            let csv_text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let engine = RelayEngine::new(response_store);
            let result = engine.run(&csv_text, &settings).await?;

            let processing_report = ProcessingReport::new(&result, result.attempted());
            println!(
                "✅ Batch complete: {} succeeded, {} failed ({} of {} records)",
                result.success_count,
                result.failed_count,
                processing_report.summary.success_rate,
                processing_report.summary.total_records,
            );
            for error in &result.errors {
                eprintln!("❌ {}", error);
            }

            if let Some(path) = report {
                tokio::fs::write(&path, processing_report.to_json()?)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("📁 Report saved to: {}", path.display());
            }
        }

        Command::Settings { action } => match action {
            SettingsAction::Show => {
                let settings = settings_store.load().await?;
                println!("webhookUrl: {}", display_or_unset(&settings.webhook_url));
                println!("authToken:  {}", mask_token(&settings.auth_token));
            }
            SettingsAction::Set {
                webhook_url,
                auth_token,
            } => {
                let mut settings = settings_store.load().await?;
                if let Some(url) = webhook_url {
                    validation::validate_url("webhook_url", &url)?;
                    settings.webhook_url = url;
                }
                if let Some(token) = auth_token {
                    validation::validate_non_empty_string("auth_token", &token)?;
                    settings.auth_token = token;
                }
                settings_store.save(&settings).await?;
                println!("✅ Settings saved");
            }
        },

        Command::Responses { action } => match action {
            ResponsesAction::List => {
                let responses = response_store.load().await?;
                println!("{} stored responses", responses.len());
                for response in &responses {
                    println!("{}  {}", response.timestamp, response.message);
                }
            }
            ResponsesAction::Export { output } => {
                let responses = response_store.load().await?;
                if responses.is_empty() {
                    bail!("There are no responses to export");
                }
                let csv = responses_to_csv(&responses)?;
                tokio::fs::write(&output, csv)
                    .await
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                println!(
                    "✅ {} responses exported to {}",
                    responses.len(),
                    output.display()
                );
            }
            ResponsesAction::Clear => {
                response_store.clear().await?;
                println!("Response history cleared");
            }
        },

        Command::Users { action } => match action {
            UsersAction::List => {
                for user in user_store.list().await? {
                    println!(
                        "{}  {} <{}> ({})",
                        user.username, user.name, user.email, user.role
                    );
                }
            }
            UsersAction::Add {
                username,
                password,
                name,
                role,
                email,
            } => {
                let user = User {
                    id: chrono::Local::now().timestamp_millis().to_string(),
                    name,
                    username: username.clone(),
                    role,
                    email,
                };
                user_store.add(user, &password).await?;
                println!("✅ User {} added", username);
            }
            UsersAction::Remove { username } => {
                user_store.remove(&username).await?;
                println!("User {} removed", username);
            }
        },
    }

    Ok(())
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

fn mask_token(token: &str) -> String {
    if token.is_empty() {
        "(not set)".to_string()
    } else {
        "*".repeat(token.len().min(12))
    }
}
