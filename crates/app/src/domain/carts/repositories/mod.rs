//! Cart Repositories

mod carts;
mod items;
mod store;

pub(crate) use carts::PgCartsRepository;
pub(crate) use items::PgCartItemsRepository;
pub(crate) use store::PgCartStore;
