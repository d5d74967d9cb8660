use crate::api::{AuthResponse, LoginCredentials, RegisterCredentials};
use crate::cli::{connect, prompt};
use crate::config;
use crate::error::Result;
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: String,

    /// Prompted for when omitted
    #[arg(short, long, env = "COACHDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,

    #[arg(long)]
    pub full_name: String,

    #[arg(short, long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone_number: String,

    /// Prompted for when omitted
    #[arg(short, long, env = "COACHDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

pub async fn login(args: LoginArgs) -> Result<()> {
    let config = config::load()?;
    let client = connect(&config).await?;

    let password = match args.password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    let response = client
        .login(&LoginCredentials {
            email: args.email,
            password,
        })
        .await?;

    report("Login successful", &response);
    Ok(())
}

pub async fn register(args: RegisterArgs) -> Result<()> {
    let config = config::load()?;
    let client = connect(&config).await?;

    let password = match args.password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    let response = client
        .register(&RegisterCredentials {
            username: args.username,
            full_name: args.full_name,
            email: args.email,
            phone_number: args.phone_number,
            password,
        })
        .await?;

    report("Registration successful", &response);
    if response.token.is_none() {
        println!("Log in to start a session: coachdesk login --email <email>");
    }
    Ok(())
}

pub async fn logout() -> Result<()> {
    let config = config::load()?;
    let client = connect(&config).await?;
    client.logout().await?;
    info!("Logged out");
    println!("Logged out");
    Ok(())
}

fn report(message: &str, response: &AuthResponse) {
    match &response.user {
        Some(user) => println!("{} ({}, {})", message, user.full_name, user.role),
        None => println!("{}", message),
    }
}
