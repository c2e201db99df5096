use std::io;

use epochta::{
    Credentials, Endpoint, EpochtaClient, EpochtaError, SearchFields, SearchOperation,
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
    let name = std::env::var("EPOCHTA_BOOK_NAME").unwrap_or_else(|_| "demo-book".to_owned());

    let client = EpochtaClient::new(Credentials::new(public_key, private_key)?)?;

    let created = client
        .execute(
            Endpoint::AddAddressBook
                .request()
                .param("name", name.as_str())
                .param("description", "created by the epochta demo"),
        )
        .await?;
    println!("created: {created}");

    let search = SearchFields::new().condition("name", SearchOperation::Like, format!("{name}%"));
    let found = client
        .execute(
            Endpoint::SearchAddressBook
                .request()
                .param(SearchFields::FIELD, search)
                .param("from", 0_i64)
                .param("offset", 10_i64),
        )
        .await?;
    println!("found: {found}");

    if let Some(id) = created.pointer("/result/addressbook_id").and_then(|id| id.as_i64()) {
        match client
            .execute(Endpoint::DelAddressBook.request().param("idAddressBook", id))
            .await
        {
            Ok(deleted) => println!("deleted: {deleted}"),
            Err(EpochtaError::Api { message, code }) => {
                println!("delete rejected: {message} ({code})");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
