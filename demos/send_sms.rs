use std::io;

use epochta::{
    Credentials, EpochtaClient, MessageText, RawPhoneNumber, SendOptions, SendSms, SenderName,
};

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
    let phone = required_env("EPOCHTA_PHONE")?;
    let sender = required_env("EPOCHTA_SENDER")?;
    let message = std::env::var("EPOCHTA_MESSAGE")
        .unwrap_or_else(|_| "Hello from the epochta demo.".to_owned());
    // Sandbox by default so the demo does not spend credits.
    let sandbox = std::env::var("EPOCHTA_LIVE").is_err();

    let client = EpochtaClient::builder(Credentials::new(public_key, private_key)?)
        .sandbox(sandbox)
        .build()?;
    let request = SendSms::new(
        SenderName::new(sender)?,
        MessageText::new(message)?,
        RawPhoneNumber::new(phone)?,
        SendOptions::default(),
    );

    let response = client.send_sms(request).await?;
    println!("sandbox: {sandbox}, response: {response}");

    Ok(())
}
