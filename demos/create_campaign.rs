use std::io;

use chrono::{Duration, Utc};
use epochta::{
    CreateCampaign, Credentials, EpochtaClient, MessageText, RawPhoneNumber, SendDateTime,
    SenderName, SmsLifetime,
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
    let sender = required_env("EPOCHTA_SENDER")?;
    let list_id: i64 = required_env("EPOCHTA_LIST_ID")?.parse()?;
    let control_phone = required_env("EPOCHTA_PHONE")?;

    let client = EpochtaClient::builder(Credentials::new(public_key, private_key)?)
        .sandbox(true)
        .build()?;

    let sender = SenderName::new(sender)?;
    let text = MessageText::new("Campaign from the epochta demo.")?;
    let price = client
        .execute(
            epochta::Endpoint::CheckCampaignPrice
                .request()
                .param("sender", &sender)
                .param("text", &text)
                .param("list_id", list_id),
        )
        .await?;
    println!("price: {price}");

    let campaign = CreateCampaign {
        sender,
        text,
        list_id,
        datetime: SendDateTime::new(Utc::now() + Duration::hours(1)),
        batch: 100,
        batch_interval: 10,
        sms_lifetime: SmsLifetime::Max,
        control_phone: RawPhoneNumber::new(control_phone)?,
    };
    let created = client.create_campaign(campaign).await?;
    println!("campaign: {created}");

    Ok(())
}
