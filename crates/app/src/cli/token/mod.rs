use bookstore_app::auth::{ApiTokenMetadata, PgAuthService};
use clap::Subcommand;

mod create;
mod list;
mod revoke;

#[derive(Debug, Subcommand)]
pub(crate) enum TokenCommand {
    /// Issue a token; the raw value is printed once
    Create(create::CreateTokenArgs),

    /// Show every token and whether it is still usable
    List,

    /// Revoke a token by UUID
    Revoke(revoke::RevokeTokenArgs),
}

impl TokenCommand {
    pub(crate) async fn run(self, auth: &PgAuthService) -> Result<(), String> {
        match self {
            Self::Create(args) => create::run(auth, args).await,
            Self::List => list::run(auth).await,
            Self::Revoke(args) => revoke::run(auth, args).await,
        }
    }
}

fn print_metadata(token: &ApiTokenMetadata) {
    println!("{:<12} {}", "uuid", token.uuid);
    println!("{:<12} {}", "role", token.role);
    println!("{:<12} v{}", "version", token.version.as_i16());
    println!("{:<12} {}", "created", token.created_at);

    if let Some(expires_at) = token.expires_at {
        println!("{:<12} {expires_at}", "expires");
    }
}
