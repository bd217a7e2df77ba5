//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use bookstore_app::{
    auth::{MockAuthService, Principal, Role},
    context::AppContext,
    domain::{
        books::{MockBooksService, models::Book, records::BookId},
        carts::MockCartsService,
        orders::MockOrdersService,
    },
};

use crate::state::State;

pub(crate) const TEST_TOKEN_UUID: Uuid = Uuid::nil();

pub(crate) fn principal(role: Role) -> Principal {
    Principal {
        token_uuid: TEST_TOKEN_UUID,
        role,
    }
}

pub(crate) fn make_book(id: i64, title: &str, price: u64) -> Book {
    Book {
        id: BookId::from_i64(id),
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        publisher: "Chilton".to_string(),
        price,
        display_price: format!("${}.{:02}", price / 100, price % 100),
        image_url: None,
        pdf_url: None,
        category: Some("Fiction".to_string()),
        featured: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_books_mock() -> MockBooksService {
    let mut books = MockBooksService::new();

    books.expect_list_books().never();
    books.expect_get_book().never();
    books.expect_search_books().never();
    books.expect_list_categories().never();
    books.expect_list_books_by_category().never();
    books.expect_list_featured_books().never();
    books.expect_create_book().never();
    books.expect_update_book().never();
    books.expect_delete_book().never();

    books
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_update_status().never();

    orders
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

/// Service mocks for one test; anything not replaced rejects every call.
pub(crate) struct Mocks {
    pub(crate) books: MockBooksService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            books: strict_books_mock(),
            carts: strict_carts_mock(),
            orders: strict_orders_mock(),
            auth: strict_auth_mock(),
        }
    }
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            books: Arc::new(self.books),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }
}

pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

pub(crate) fn books_service(books: MockBooksService, route: Router) -> Service {
    service(
        Mocks {
            books,
            ..Mocks::default()
        },
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(
        Mocks {
            carts,
            ..Mocks::default()
        },
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(
        Mocks {
            orders,
            ..Mocks::default()
        },
        route,
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}
