//! Account commands: signup, login, logout, whoami.

use bookmyevent_core::Email;
use secrecy::SecretString;
use tracing::info;

use super::{CommandError, Context};
use crate::output;

fn parse_email(raw: &str) -> Result<Email, CommandError> {
    Email::parse(raw).map_err(|e| CommandError::invalid("email", e))
}

/// Register, then keep the returned session so the user is logged in.
pub async fn signup(
    ctx: &Context,
    username: &str,
    email: &str,
    password: String,
) -> Result<(), CommandError> {
    let email = parse_email(email)?;
    let session = ctx
        .api
        .register(username, &email, &SecretString::from(password))
        .await?;
    ctx.store.save(&session)?;

    info!(user = session.display_name(), "Signed up");
    output::say("User registered successfully!");
    Ok(())
}

pub async fn login(ctx: &Context, email: &str, password: String) -> Result<(), CommandError> {
    let email = parse_email(email)?;
    let session = ctx.api.login(&email, &SecretString::from(password)).await?;
    ctx.store.save(&session)?;

    output::say(&format!("Logged in as {}.", session.display_name()));
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<(), CommandError> {
    ctx.store.clear()?;
    output::say("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<(), CommandError> {
    let session = ctx.session()?;
    let user = ctx.api.profile(&session).await?;
    output::print_profile(&user);
    Ok(())
}
