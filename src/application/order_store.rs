use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::ports::{Clock, KeyValueStore};
use crate::domain::pricing::{parse_weight, total_for};

pub const DEFAULT_STORAGE_KEY: &str = "laundryOrders";
/// Short month/day/year date, e.g. `3/5/2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Holds the order sequence in memory and mirrors it into a persistent slot.
///
/// Every mutation writes the complete next sequence to the slot first and only
/// replaces the in-memory sequence once that write succeeded, so the two are
/// always equal between calls.
pub struct OrderStore<S, C> {
    storage: S,
    clock: C,
    key: String,
    date_format: String,
    orders: Vec<Order>,
}

impl<S: KeyValueStore, C: Clock> OrderStore<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            key: DEFAULT_STORAGE_KEY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            orders: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Rehydrate from the slot, then write the loaded sequence straight back.
    ///
    /// An absent slot yields an empty sequence. A slot that does not parse is
    /// reported as [`DomainError::PersistenceCorrupt`] and neither memory nor
    /// the slot is touched.
    pub fn load(&mut self) -> Result<&[Order], DomainError> {
        let loaded = match self.storage.get(&self.key)? {
            Some(raw) => serde_json::from_str::<Vec<Order>>(&raw)
                .map_err(|e| DomainError::PersistenceCorrupt(e.to_string()))?,
            None => {
                log::debug!("slot '{}' is empty, starting with no orders", self.key);
                Vec::new()
            }
        };

        self.commit(loaded)?;
        log::info!("loaded {} order(s) from '{}'", self.orders.len(), self.key);
        Ok(&self.orders)
    }

    pub fn create_order(&mut self, input: NewOrder) -> Result<&Order, DomainError> {
        if input.customer_name.is_empty() {
            return Err(DomainError::Validation(
                "customer name is required".to_string(),
            ));
        }
        let weight = parse_weight(&input.weight_text)?;
        let total = total_for(input.service, &weight);

        let now = self.clock.now();
        let order = Order {
            id: self.next_id(now.timestamp_millis())?,
            customer_name: input.customer_name,
            service: input.service,
            weight,
            total,
            status: OrderStatus::Pending,
            date: now.format(&self.date_format).to_string(),
        };
        log::info!(
            "creating order {} for '{}': {} kg {} = {}",
            order.id,
            order.customer_name,
            order.weight,
            order.service,
            order.total
        );

        let mut next = self.orders.clone();
        next.push(order);
        self.commit(next)?;

        self.orders
            .last()
            .ok_or_else(|| DomainError::Internal("order vanished after commit".to_string()))
    }

    pub fn update_status(&mut self, id: u64, status: OrderStatus) -> Result<&Order, DomainError> {
        let index = self
            .orders
            .iter()
            .position(|o| o.id == id)
            .ok_or(DomainError::NotFound(id))?;

        let mut next = self.orders.clone();
        let previous = next[index].status;
        next[index].status = status;
        self.commit(next)?;
        log::info!("order {} status {} -> {}", id, previous, status);

        Ok(&self.orders[index])
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn find(&self, id: u64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Millisecond timestamp, bumped past the newest id when the clock has not
    /// moved on.
    fn next_id(&self, now_millis: i64) -> Result<u64, DomainError> {
        let now = u64::try_from(now_millis).unwrap_or(0);
        match self.orders.iter().map(|o| o.id).max() {
            Some(last) => last
                .checked_add(1)
                .map(|bumped| now.max(bumped))
                .ok_or_else(|| DomainError::Internal(format!("no order id left after {}", last))),
            None => Ok(now),
        }
    }

    fn commit(&mut self, next: Vec<Order>) -> Result<(), DomainError> {
        let raw = serde_json::to_string(&next)?;
        self.storage.set(&self.key, &raw).map_err(|e| {
            log::error!("failed to persist orders to '{}': {}", self.key, e);
            e
        })?;
        self.orders = next;
        Ok(())
    }
}
