//! Auth subcommands: thin wrappers over the auth gateway plus token-file
//! bookkeeping.

use securetask_core::api as core_api;

use crate::app::AppServices;
use crate::commands::cli::{LoginArgs, ProfileArgs, RegisterArgs};

pub async fn login(services: &AppServices, args: &LoginArgs) -> Result<i32, core_api::CliError> {
    let resp = services
        .auth
        .login(&core_api::LoginPayload {
            email: args.email.clone(),
            password: args.password.clone(),
        })
        .await?;
    services.token_file.save(&resp.token)?;
    println!("Logged in as {} <{}>", resp.user.name, resp.user.email);
    Ok(0)
}

pub async fn register(
    services: &AppServices,
    args: &RegisterArgs,
) -> Result<i32, core_api::CliError> {
    let resp = services
        .auth
        .register(&core_api::RegisterPayload {
            name: args.name.clone(),
            email: args.email.clone(),
            password: args.password.clone(),
        })
        .await?;
    services.token_file.save(&resp.token)?;
    println!("Registered {} <{}>", resp.user.name, resp.user.email);
    Ok(0)
}

pub fn logout(services: &AppServices) -> Result<i32, core_api::CliError> {
    services.token_file.clear()?;
    println!("Logged out");
    Ok(0)
}

pub async fn whoami(services: &AppServices) -> Result<i32, core_api::CliError> {
    let user = services.auth.me().await?;
    println!("Name:   {}", user.name);
    println!("Email:  {}", user.email);
    println!("UserId: {}", user.id);
    Ok(0)
}

pub async fn profile(services: &AppServices, args: &ProfileArgs) -> Result<i32, core_api::CliError> {
    let patch = core_api::ProfilePatch {
        name: args.name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
    };
    if args.name.is_none() && args.email.is_none() && args.password.is_none() {
        eprintln!("Nothing to update: pass --name, --email or --password");
        return Ok(20);
    }
    let user = services.auth.update_me(&patch).await?;
    println!("Profile updated: {} <{}>", user.name, user.email);
    Ok(0)
}
