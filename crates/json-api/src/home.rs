//! API banner and the fallback for unknown routes.

use salvo::prelude::*;
use serde::Serialize;

use crate::envelope::{ApiError, Reply};

#[derive(Debug, Serialize)]
pub(crate) struct Endpoints {
    pub categories: &'static str,
    pub shop: &'static str,
    pub cart: &'static str,
    pub admin: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Banner {
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[handler]
pub(crate) async fn banner() -> Reply<Banner> {
    Reply::ok(Banner {
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            categories: "/api/categories",
            shop: "/api/shop",
            cart: "/api/cart",
            admin: "/api/admin",
        },
    })
    .message("Bookstore API is running!")
}

#[handler]
pub(crate) async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
