use bookstore_app::auth::PgAuthService;
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// Token UUID to revoke
    uuid: Uuid,
}

pub(crate) async fn run(auth: &PgAuthService, args: RevokeTokenArgs) -> Result<(), String> {
    let revoked = auth
        .revoke_api_token(args.uuid)
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("revoked token {}", args.uuid);
    } else {
        println!("token {} was already revoked or does not exist", args.uuid);
    }

    Ok(())
}
