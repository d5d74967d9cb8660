use crate::cli::connect;
use crate::config;
use crate::error::{Error, Result};

pub async fn run() -> Result<()> {
    let config = config::load()?;
    let client = connect(&config).await?;
    let session = client.session();

    let Some(user) = session.read_user().await? else {
        return Err(Error::UnauthenticatedAccess);
    };

    println!("{} ({})", user.full_name, user.username);
    println!("  Id: {}", user.id);
    println!("  Email: {}", user.email);
    if let Some(phone) = &user.phone_number {
        println!("  Phone: {}", phone);
    }
    match user.role() {
        Ok(role) => println!("  Role: {}", role),
        Err(_) => println!("  Role: {} (unrecognized)", user.role),
    }
    println!(
        "  Token: {}",
        if session.is_authenticated().await { "present" } else { "missing, log in again" }
    );
    println!("  API: {}", client.base_url());

    Ok(())
}
