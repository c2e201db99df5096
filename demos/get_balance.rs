use std::io;

use epochta::{Credentials, EpochtaClient};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let public_key = required_env("EPOCHTA_PUBLIC_KEY")?;
    let private_key = required_env("EPOCHTA_PRIVATE_KEY")?;
    let currency = std::env::var("EPOCHTA_CURRENCY").ok();

    let client = EpochtaClient::new(Credentials::new(public_key, private_key)?)?;
    let balance = client.get_user_balance(currency.as_deref()).await?;

    println!("balance: {balance}");

    Ok(())
}
