//! App Router

use salvo::Router;

use crate::{auth, books, cart, categories, home, orders};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::new().get(home::banner))
        .push(
            Router::with_path("api")
                .push(cart_router())
                .push(shop_router())
                .push(categories_router())
                .push(admin_router()),
        )
        .push(Router::with_path("{**rest}").goal(home::route_not_found))
}

fn cart_router() -> Router {
    Router::with_path("cart/{session}")
        .get(cart::get::handler)
        .push(Router::with_path("add").post(cart::add::handler))
        .push(Router::with_path("update/{book}").put(cart::update::handler))
        .push(Router::with_path("remove/{book}").delete(cart::remove::handler))
        .push(Router::with_path("clear").delete(cart::clear::handler))
}

fn shop_router() -> Router {
    Router::with_path("shop")
        .push(
            Router::with_path("books")
                .get(books::index::handler)
                .push(Router::with_path("search").get(books::search::handler))
                .push(Router::with_path("featured").get(books::featured::handler))
                .push(Router::with_path("{id}").get(books::get::handler)),
        )
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(Router::with_path("{id}").get(orders::get::handler)),
        )
}

fn categories_router() -> Router {
    Router::with_path("categories")
        .get(categories::index::handler)
        .push(Router::with_path("{category}").get(categories::books::handler))
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::middleware::authenticate)
        .hoop(auth::middleware::require_admin)
        .push(
            Router::with_path("books")
                .get(books::index::handler)
                .post(books::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(books::update::handler)
                        .delete(books::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{id}/status").put(orders::status::handler)),
        )
}
