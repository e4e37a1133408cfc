//! Order placement, modification and cancellation endpoints
//!
//! These endpoints require authentication.

use ftx_types::{ArgumentError, OrderType, Query, Side, TriggerType};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

use super::catalog;
use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::types::{
    decimal_value, HistoryFilter, Order, OrderRequest, TriggerEvent, TriggerOrder,
    TriggerOrderRequest,
};

/// Order endpoints
pub struct OrderEndpoints<'a> {
    client: &'a FtxRestClient,
}

/// Parameters shared by both modify variants
fn modification(
    price: Option<Decimal>,
    size: Option<Decimal>,
    client_id: Option<&str>,
) -> Result<Query, ArgumentError> {
    if price.is_none() && size.is_none() {
        return Err(ArgumentError::new("price", "either price or size must be given"));
    }
    Ok(Query::new()
        .with_opt("clientId", client_id)
        .with_opt("size", size.map(decimal_value))
        .with_opt("price", price.map(decimal_value)))
}

impl<'a> OrderEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get open orders, optionally for one market
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, pair: Option<&str>) -> RestResult<Vec<Order>> {
        let query = Query::new().with_opt("market", pair);
        self.client
            .invoke_as(&catalog::GET_OPEN_ORDERS, &[], query)
            .await
    }

    /// Get closed and open orders
    #[instrument(skip(self))]
    pub async fn get_order_history(
        &self,
        pair: Option<&str>,
        filter: HistoryFilter,
    ) -> RestResult<Vec<Order>> {
        let query = filter.to_query().with_opt("market", pair);
        self.client
            .invoke_as(&catalog::GET_ORDER_HISTORY, &[], query)
            .await
    }

    /// Get open trigger orders
    #[instrument(skip(self))]
    pub async fn get_open_trigger_orders(
        &self,
        pair: Option<&str>,
        trigger_type: Option<TriggerType>,
    ) -> RestResult<Vec<TriggerOrder>> {
        let query = Query::new()
            .with_opt("market", pair)
            .with_opt("type", trigger_type.map(|t| t.as_str()));
        self.client
            .invoke_as(&catalog::GET_OPEN_TRIGGER_ORDERS, &[], query)
            .await
    }

    /// Get the times a trigger order fired
    #[instrument(skip(self))]
    pub async fn get_trigger_order_triggers(&self, order_id: u64) -> RestResult<Vec<TriggerEvent>> {
        let order_id = order_id.to_string();
        self.client
            .invoke_as(&catalog::GET_TRIGGER_ORDER_TRIGGERS, &[order_id.as_str()], Query::new())
            .await
    }

    /// Get trigger order history
    #[instrument(skip(self))]
    pub async fn get_trigger_order_history(
        &self,
        pair: Option<&str>,
        side: Option<Side>,
        trigger_type: Option<TriggerType>,
        order_type: Option<OrderType>,
        filter: HistoryFilter,
    ) -> RestResult<Vec<TriggerOrder>> {
        let query = Query::new()
            .with_opt("start_time", filter.start_time.map(|t| t.timestamp()))
            .with_opt("end_time", filter.end_time.map(|t| t.timestamp()))
            .with_opt("side", side.map(|s| s.as_str()))
            .with_opt("orderType", order_type.map(|o| o.as_str()))
            .with_opt("limit", filter.limit)
            .with_opt("market", pair)
            .with_opt("type", trigger_type.map(|t| t.as_str()));
        self.client
            .invoke_as(&catalog::GET_TRIGGER_ORDER_HISTORY, &[], query)
            .await
    }

    /// Get an order by exchange ID
    #[instrument(skip(self))]
    pub async fn get_order_status(&self, order_id: u64) -> RestResult<Order> {
        let order_id = order_id.to_string();
        self.client
            .invoke_as(&catalog::GET_ORDER_STATUS, &[order_id.as_str()], Query::new())
            .await
    }

    /// Get an order by client ID
    #[instrument(skip(self))]
    pub async fn get_order_status_by_client_id(&self, client_id: &str) -> RestResult<Order> {
        self.client
            .invoke_as(&catalog::GET_ORDER_STATUS_BY_CLIENT_ID, &[client_id], Query::new())
            .await
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// Place a new order
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side))]
    pub async fn create_order(&self, order: &OrderRequest) -> RestResult<Order> {
        let query = order.to_query()?;
        debug!(order_type = %order.order_type, "Placing order");
        self.client
            .invoke_as(&catalog::CREATE_ORDER, &[], query)
            .await
    }

    /// Place a new trigger order
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side))]
    pub async fn create_trigger_order(&self, order: &TriggerOrderRequest) -> RestResult<TriggerOrder> {
        let query = order.to_query()?;
        debug!(trigger_type = %order.trigger_type, "Placing trigger order");
        self.client
            .invoke_as(&catalog::CREATE_TRIGGER_ORDER, &[], query)
            .await
    }

    // ========================================================================
    // Modification
    // ========================================================================

    /// Modify price and/or size of an order
    ///
    /// The exchange cancels and replaces the order, so the returned order has
    /// a new ID. At least one of `price` and `size` must be set.
    #[instrument(skip(self))]
    pub async fn modify_order(
        &self,
        order_id: u64,
        price: Option<Decimal>,
        size: Option<Decimal>,
        client_id: Option<&str>,
    ) -> RestResult<Order> {
        let query = modification(price, size, client_id)?;
        let order_id = order_id.to_string();
        self.client
            .invoke_as(&catalog::MODIFY_ORDER, &[order_id.as_str()], query)
            .await
    }

    /// Modify an order addressed by its client ID
    ///
    /// `new_client_id` assigns a client ID to the replacement order.
    #[instrument(skip(self))]
    pub async fn modify_order_by_client_id(
        &self,
        client_id: &str,
        price: Option<Decimal>,
        size: Option<Decimal>,
        new_client_id: Option<&str>,
    ) -> RestResult<Order> {
        let query = modification(price, size, new_client_id)?;
        self.client
            .invoke_as(&catalog::MODIFY_ORDER_BY_CLIENT_ID, &[client_id], query)
            .await
    }

    /// Modify a trigger order
    ///
    /// # Arguments
    /// * `trigger_type` - Type of the existing order
    /// * `size` - New size
    /// * `price` - Trail value for trailing stops, trigger price otherwise
    /// * `order_price` - Limit price once triggered; ignored for trailing stops
    #[instrument(skip(self))]
    pub async fn modify_trigger_order(
        &self,
        order_id: u64,
        trigger_type: TriggerType,
        size: Decimal,
        price: Decimal,
        order_price: Option<Decimal>,
    ) -> RestResult<TriggerOrder> {
        let query = Query::new().with("size", decimal_value(size));
        let query = if trigger_type.is_trailing() {
            query.with("trailValue", decimal_value(price))
        } else {
            query
                .with("triggerPrice", decimal_value(price))
                .with_opt("orderPrice", order_price.map(decimal_value))
        };

        let order_id = order_id.to_string();
        self.client
            .invoke_as(&catalog::MODIFY_TRIGGER_ORDER, &[order_id.as_str()], query)
            .await
    }

    // ========================================================================
    // Cancellation
    // ========================================================================

    /// Cancel an order by exchange ID
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Value> {
        let order_id = order_id.to_string();
        self.client
            .invoke(&catalog::CANCEL_ORDER, &[order_id.as_str()], Query::new())
            .await
    }

    /// Cancel an order by client ID
    #[instrument(skip(self))]
    pub async fn cancel_order_by_client_id(&self, client_id: &str) -> RestResult<Value> {
        self.client
            .invoke(&catalog::CANCEL_ORDER_BY_CLIENT_ID, &[client_id], Query::new())
            .await
    }

    /// Cancel an open trigger order
    #[instrument(skip(self))]
    pub async fn cancel_trigger_order(&self, order_id: u64) -> RestResult<Value> {
        let order_id = order_id.to_string();
        self.client
            .invoke(&catalog::CANCEL_TRIGGER_ORDER, &[order_id.as_str()], Query::new())
            .await
    }

    /// Cancel all orders, optionally for one market or one kind
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(
        &self,
        pair: Option<&str>,
        conditional_orders_only: bool,
        limit_orders_only: bool,
    ) -> RestResult<Value> {
        let query = Query::new()
            .with("conditionalOrdersOnly", conditional_orders_only)
            .with("limitOrdersOnly", limit_orders_only)
            .with_opt("market", pair);
        self.client
            .invoke(&catalog::CANCEL_ALL_ORDERS, &[], query)
            .await
    }
}
