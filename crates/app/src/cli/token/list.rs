use bookstore_app::auth::PgAuthService;
use jiff::Timestamp;

pub(crate) async fn run(auth: &PgAuthService) -> Result<(), String> {
    let tokens = auth
        .list_api_tokens()
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found");
        return Ok(());
    }

    let now = Timestamp::now();

    for token in tokens {
        super::print_metadata(&token);

        let status = match (token.revoked_at, token.expires_at) {
            (Some(revoked_at), _) => format!("revoked {revoked_at}"),
            (None, Some(expires_at)) if expires_at <= now => "expired".to_string(),
            (None, _) => "active".to_string(),
        };

        println!("{:<12} {status}", "status");
        println!(
            "{:<12} {}",
            "last used",
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
