//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::{
    database::Db,
    domain::{
        Entity,
        books::{
            records::{BookId, BookRecord},
            repository::PgBooksRepository,
        },
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, Order, OrderItem, OrderStatus},
            records::{OrderId, OrderItemRecord, OrderRecord},
            repository::{OrderLine, PgOrdersRepository},
        },
        pricing::Pricing,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    books_repository: PgBooksRepository,
    pricing: Pricing,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, pricing: Pricing) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            books_repository: PgBooksRepository::new(),
            pricing,
        }
    }

    fn order(&self, record: OrderRecord, items: Vec<OrderItem>) -> Order {
        Order {
            id: record.id,
            customer_name: record.customer_name,
            customer_email: record.customer_email,
            items,
            display_total: self.pricing.display(record.total_amount),
            total_amount: record.total_amount,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let lines = order.lines()?;
        let ids: Vec<_> = lines.iter().map(|(book, _)| *book).collect();

        let mut tx = self.db.begin().await?;

        let books: FxHashMap<BookId, BookRecord> = self
            .books_repository
            .find_books_by_ids(&mut tx, &ids)
            .await?
            .into_iter()
            .map(|book| (book.id, book))
            .collect();

        let PricedOrder {
            lines: priced,
            items,
            total_amount,
        } = price_lines(lines, &books)?;

        let record = self
            .repository
            .create_order(
                &mut tx,
                order.customer_name(),
                order.customer_email(),
                total_amount,
            )
            .await?;

        self.repository
            .create_order_items(&mut tx, record.id, &priced)
            .await?;

        tx.commit().await?;

        tracing::info!(order = %record.id, total_amount, lines = priced.len(), "placed order");

        Ok(self.order(record, items))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_orders(&mut tx).await?;
        let ids: Vec<_> = records.iter().map(|record| record.id).collect();

        let mut items: FxHashMap<OrderId, Vec<OrderItem>> = FxHashMap::default();

        for item in self.repository.list_order_items(&mut tx, &ids).await? {
            items.entry(item.order_id).or_default().push(item.into_item());
        }

        tx.commit().await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let lines = items.remove(&record.id).unwrap_or_default();

                self.order(record, lines)
            })
            .collect())
    }

    async fn get_order(&self, order: OrderId) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_order(&mut tx, order)
            .await?
            .ok_or_else(|| OrdersServiceError::not_found(Entity::Order, order))?;

        let items = self
            .repository
            .list_order_items(&mut tx, &[order])
            .await?
            .into_iter()
            .map(OrderItemRecord::into_item)
            .collect();

        tx.commit().await?;

        Ok(self.order(record, items))
    }

    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .update_order_status(&mut tx, order, status)
            .await?
            .ok_or_else(|| OrdersServiceError::not_found(Entity::Order, order))?;

        let items = self
            .repository
            .list_order_items(&mut tx, &[order])
            .await?
            .into_iter()
            .map(OrderItemRecord::into_item)
            .collect();

        tx.commit().await?;

        Ok(self.order(record, items))
    }
}

/// Order lines priced from the catalog at placement time.
#[derive(Debug)]
struct PricedOrder {
    lines: Vec<OrderLine>,
    items: Vec<OrderItem>,
    total_amount: u64,
}

/// Snapshot each line's price from `books`. Any book missing from `books` fails
/// the whole order.
fn price_lines(
    lines: Vec<(BookId, u32)>,
    books: &FxHashMap<BookId, BookRecord>,
) -> Result<PricedOrder, OrdersServiceError> {
    let mut priced = PricedOrder {
        lines: Vec::with_capacity(lines.len()),
        items: Vec::with_capacity(lines.len()),
        total_amount: 0,
    };

    for (book_id, quantity) in lines {
        let book = books
            .get(&book_id)
            .ok_or_else(|| OrdersServiceError::not_found(Entity::Book, book_id))?;

        priced.total_amount = book
            .price
            .checked_mul(u64::from(quantity))
            .and_then(|subtotal| priced.total_amount.checked_add(subtotal))
            .filter(|total| i64::try_from(*total).is_ok())
            .ok_or_else(|| OrdersServiceError::invalid("items", "order total is too large"))?;

        priced.lines.push((book_id, quantity, book.price));
        priced.items.push(OrderItem {
            book_id,
            title: book.title.clone(),
            quantity,
            price: book.price,
        });
    }

    Ok(priced)
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order at current catalog prices. Fails as a whole if any book is missing.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieves every order, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    async fn get_order(&self, order: OrderId) -> Result<Order, OrdersServiceError>;

    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
