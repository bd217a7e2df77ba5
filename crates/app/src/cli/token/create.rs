use bookstore_app::auth::{PgAuthService, Role};
use clap::Args;
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// Role granted to the token (admin, customer)
    #[arg(long, default_value = "customer")]
    role: Role,

    /// Expiry as an RFC 3339 timestamp; tokens never expire without it
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(auth: &PgAuthService, args: CreateTokenArgs) -> Result<(), String> {
    if args
        .expires_at
        .is_some_and(|expires_at| expires_at <= Timestamp::now())
    {
        return Err("--expires-at must be in the future".to_string());
    }

    let issued = auth
        .issue_api_token(args.role, args.expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    super::print_metadata(&issued.metadata);

    println!();
    println!("{}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
