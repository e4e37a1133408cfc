//! Declarative endpoint table
//!
//! Each operation is described once as an [`EndpointDef`]: verb, path
//! template, accepted parameters, value rules and an optional scope
//! override. The typed endpoint groups build a [`Query`] and hand it to
//! [`FtxRestClient::invoke`](crate::FtxRestClient::invoke), so the rules
//! here apply to typed and name-based calls alike.

use std::str::FromStr;

use ftx_types::{ArgumentError, Chain, Depth, FillsOrder, Method, Query, Resolution, Scope};
use serde_json::Value;
use tracing::debug;

use crate::request::{encode_path_segment, RequestSpec};

/// Value constraint on one parameter, checked before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRule {
    /// Orderbook depth, 20 to 100
    Depth,
    /// One of the candle resolutions, in seconds
    Resolution,
    /// One of the deposit chains
    Chain,
    /// Fills sort order, `asc` only
    FillsOrder,
}

impl ParamRule {
    /// Check `value`, reporting failures under the wire name `param`
    pub fn check(&self, param: &'static str, value: &Value) -> Result<(), ArgumentError> {
        let checked = match self {
            Self::Depth => integer(param, value).and_then(|n| Depth::try_from(n).map(drop)),
            Self::Resolution => {
                integer(param, value).and_then(|n| Resolution::try_from(n).map(drop))
            }
            Self::Chain => text(param, value).and_then(|s| Chain::from_str(s).map(drop)),
            Self::FillsOrder => text(param, value).and_then(|s| FillsOrder::from_str(s).map(drop)),
        };
        checked.map_err(|e| ArgumentError::new(param, e.reason))
    }
}

fn integer(param: &'static str, value: &Value) -> Result<u32, ArgumentError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ArgumentError::new(param, format!("expected an integer (got {value})")))
}

fn text<'v>(param: &'static str, value: &'v Value) -> Result<&'v str, ArgumentError> {
    value
        .as_str()
        .ok_or_else(|| ArgumentError::new(param, format!("expected a string (got {value})")))
}

/// Static description of one REST operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDef {
    /// Logical operation name
    pub name: &'static str,
    pub method: Method,
    /// Path below the API root; `{name}` segments are filled from arguments
    pub path: &'static str,
    /// Parameters that must be present
    pub required: &'static [&'static str],
    /// Parameters that may be present
    pub optional: &'static [&'static str],
    /// Value rules for declared parameters
    pub rules: &'static [(&'static str, ParamRule)],
    /// Scope override; `None` infers it from the path
    pub scope: Option<Scope>,
}

impl EndpointDef {
    const fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            name,
            method,
            path,
            required: &[],
            optional: &[],
            rules: &[],
            scope: None,
        }
    }

    const fn required(mut self, params: &'static [&'static str]) -> Self {
        self.required = params;
        self
    }

    const fn optional(mut self, params: &'static [&'static str]) -> Self {
        self.optional = params;
        self
    }

    const fn rules(mut self, rules: &'static [(&'static str, ParamRule)]) -> Self {
        self.rules = rules;
        self
    }

    /// Placeholder names in template order
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
    }

    pub fn accepts(&self, param: &str) -> bool {
        self.required.contains(&param) || self.optional.contains(&param)
    }

    /// Substitute percent-encoded arguments into the path template
    pub fn render_path(&self, args: &[&str]) -> Result<String, ArgumentError> {
        let expected = self.placeholders().count();
        if args.len() != expected {
            return Err(ArgumentError::new(
                "path",
                format!(
                    "{} takes {} path argument(s), got {}",
                    self.name,
                    expected,
                    args.len()
                ),
            ));
        }

        let mut args = args.iter();
        let mut rendered = Vec::new();
        for segment in self.path.split('/') {
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(placeholder) => {
                    // Counted above
                    let arg = args.next().copied().unwrap_or_default();
                    if arg.is_empty() {
                        return Err(ArgumentError::new(placeholder, "must not be empty"));
                    }
                    rendered.push(encode_path_segment(arg));
                }
                None => rendered.push(segment.to_string()),
            }
        }

        Ok(rendered.join("/"))
    }

    /// Check `query` against the declared parameters and build the request
    ///
    /// Parameters the definition does not name are dropped. Required
    /// parameters and value rules are checked here, so a violation never
    /// reaches the transport.
    pub fn request(
        &self,
        path_args: &[&str],
        mut query: Query,
    ) -> Result<RequestSpec, ArgumentError> {
        let endpoint = self.render_path(path_args)?;

        if let Some(missing) = self.required.iter().find(|p| !query.contains_key(p)) {
            return Err(ArgumentError::new(*missing, "is required"));
        }
        if query.keys().any(|k| !self.accepts(k)) {
            let declared: Vec<&str> = self.required.iter().chain(self.optional).copied().collect();
            query.retain_keys(&declared);
            debug!(endpoint = self.name, "dropped undeclared parameters");
        }
        for &(param, rule) in self.rules {
            if let Some(value) = query.get(param) {
                rule.check(param, value)?;
            }
        }

        let spec = RequestSpec::new(self.method, endpoint).with_query(query);
        Ok(match self.scope {
            Some(scope) => spec.with_scope(scope),
            None => spec,
        })
    }
}

const TIME_RANGE: &[&str] = &["limit", "start_time", "end_time"];
const RESOLUTION: &[(&str, ParamRule)] = &[("resolution", ParamRule::Resolution)];

// Public market data
pub const GET_MARKETS: EndpointDef = EndpointDef::new("get_markets", Method::Get, "markets");
pub const GET_MARKET: EndpointDef = EndpointDef::new("get_market", Method::Get, "markets/{pair}");
pub const GET_ORDERBOOK: EndpointDef =
    EndpointDef::new("get_orderbook", Method::Get, "markets/{pair}/orderbook")
        .required(&["depth"])
        .rules(&[("depth", ParamRule::Depth)]);
pub const GET_TRADES: EndpointDef =
    EndpointDef::new("get_recent_trades", Method::Get, "markets/{pair}/trades")
        .optional(TIME_RANGE);
pub const GET_CANDLES: EndpointDef =
    EndpointDef::new("get_candles", Method::Get, "markets/{pair}/candles")
        .required(&["resolution"])
        .optional(TIME_RANGE)
        .rules(RESOLUTION);
pub const GET_FUTURES: EndpointDef = EndpointDef::new("get_futures", Method::Get, "futures");
pub const GET_FUTURE: EndpointDef =
    EndpointDef::new("get_future", Method::Get, "futures/{future}");
pub const GET_FUTURE_STATS: EndpointDef =
    EndpointDef::new("get_future_stats", Method::Get, "futures/{future}/stats");
pub const GET_FUNDING_RATES: EndpointDef =
    EndpointDef::new("get_funding_rates", Method::Get, "funding_rates")
        .optional(&["future", "start_time", "end_time"]);
pub const GET_INDEX_WEIGHTS: EndpointDef =
    EndpointDef::new("get_index_weights", Method::Get, "indexes/{index}/weights");
pub const GET_EXPIRED_FUTURES: EndpointDef =
    EndpointDef::new("get_expired_futures", Method::Get, "expired_futures");
pub const GET_INDEX_CANDLES: EndpointDef =
    EndpointDef::new("get_index_candles", Method::Get, "indexes/{index}/candles")
        .required(&["resolution"])
        .optional(TIME_RANGE)
        .rules(RESOLUTION);

// Account
pub const GET_ACCOUNT: EndpointDef = EndpointDef::new("get_account_info", Method::Get, "account");
pub const GET_POSITIONS: EndpointDef =
    EndpointDef::new("get_positions", Method::Get, "positions").optional(&["showAvgPrice"]);
pub const CHANGE_LEVERAGE: EndpointDef =
    EndpointDef::new("change_account_leverage", Method::Post, "account/leverage")
        .required(&["leverage"]);
pub const GET_FUNDING_PAYMENTS: EndpointDef =
    EndpointDef::new("get_funding_payments", Method::Get, "funding_payments")
        .optional(&["future", "start_time", "end_time"]);
pub const GET_FILLS: EndpointDef = EndpointDef::new("get_fills", Method::Get, "fills")
    .required(&["market"])
    .optional(&["limit", "start_time", "end_time", "order", "orderId"])
    .rules(&[("order", ParamRule::FillsOrder)]);

// Wallet
pub const GET_WALLET_COINS: EndpointDef =
    EndpointDef::new("get_wallet_coins", Method::Get, "wallet/coins");
pub const GET_BALANCES: EndpointDef =
    EndpointDef::new("get_balances", Method::Get, "wallet/balances");
pub const GET_ALL_BALANCES: EndpointDef =
    EndpointDef::new("get_all_balances", Method::Get, "wallet/all_balances");
pub const GET_DEPOSIT_ADDRESS: EndpointDef =
    EndpointDef::new("get_deposit_address", Method::Get, "wallet/deposit_address/{coin}")
        .optional(&["method"])
        .rules(&[("method", ParamRule::Chain)]);
pub const GET_DEPOSITS: EndpointDef =
    EndpointDef::new("get_deposit_history", Method::Get, "wallet/deposits").optional(TIME_RANGE);
pub const GET_WITHDRAWALS: EndpointDef =
    EndpointDef::new("get_withdrawal_history", Method::Get, "wallet/withdrawals")
        .optional(TIME_RANGE);
pub const GET_AIRDROPS: EndpointDef =
    EndpointDef::new("get_wallet_airdrops", Method::Get, "wallet/airdrops").optional(TIME_RANGE);

// Subaccounts
pub const GET_SUBACCOUNTS: EndpointDef =
    EndpointDef::new("get_subaccounts", Method::Get, "subaccounts");
pub const GET_SUBACCOUNT_BALANCES: EndpointDef =
    EndpointDef::new("get_subaccount_balances", Method::Get, "subaccounts/{nickname}/balances");
pub const CREATE_SUBACCOUNT: EndpointDef =
    EndpointDef::new("create_subaccount", Method::Post, "subaccounts").required(&["nickname"]);
pub const CHANGE_SUBACCOUNT_NAME: EndpointDef =
    EndpointDef::new("change_subaccount_name", Method::Post, "subaccounts/update_name")
        .required(&["nickname", "newNickname"]);
pub const DELETE_SUBACCOUNT: EndpointDef =
    EndpointDef::new("delete_subaccount", Method::Delete, "subaccounts").required(&["nickname"]);
pub const TRANSFER_BALANCES: EndpointDef =
    EndpointDef::new("transfer_balances", Method::Post, "subaccounts/transfer")
        .required(&["coin", "size", "source", "destination"]);

// Orders
pub const GET_OPEN_ORDERS: EndpointDef =
    EndpointDef::new("get_open_orders", Method::Get, "orders").optional(&["market"]);
pub const GET_ORDER_HISTORY: EndpointDef =
    EndpointDef::new("get_order_history", Method::Get, "orders/history")
        .optional(&["market", "limit", "start_time", "end_time"]);
pub const GET_OPEN_TRIGGER_ORDERS: EndpointDef =
    EndpointDef::new("get_open_trigger_orders", Method::Get, "conditional_orders")
        .optional(&["market", "type"]);
pub const GET_TRIGGER_ORDER_TRIGGERS: EndpointDef = EndpointDef::new(
    "get_trigger_order_triggers",
    Method::Get,
    "conditional_orders/{order_id}/triggers",
);
pub const GET_TRIGGER_ORDER_HISTORY: EndpointDef =
    EndpointDef::new("get_trigger_order_history", Method::Get, "conditional_orders/history")
        .optional(&[
            "market",
            "start_time",
            "end_time",
            "side",
            "type",
            "orderType",
            "limit",
        ]);
pub const GET_ORDER_STATUS: EndpointDef =
    EndpointDef::new("get_order_status", Method::Get, "orders/{order_id}");
pub const GET_ORDER_STATUS_BY_CLIENT_ID: EndpointDef = EndpointDef::new(
    "get_order_status_by_client_id",
    Method::Get,
    "orders/by_client_id/{client_id}",
);
pub const CREATE_ORDER: EndpointDef = EndpointDef::new("create_order", Method::Post, "orders")
    .required(&["market", "side", "type", "size"])
    .optional(&["price", "reduceOnly", "ioc", "postOnly", "clientId"]);
pub const CREATE_TRIGGER_ORDER: EndpointDef =
    EndpointDef::new("create_trigger_order", Method::Post, "conditional_orders")
        .required(&["market", "side", "type", "size"])
        .optional(&[
            "triggerPrice",
            "orderPrice",
            "trailValue",
            "reduceOnly",
            "retryUntilFilled",
        ]);
pub const MODIFY_ORDER: EndpointDef =
    EndpointDef::new("modify_order", Method::Post, "orders/{order_id}/modify")
        .optional(&["price", "size", "clientId"]);
pub const MODIFY_ORDER_BY_CLIENT_ID: EndpointDef = EndpointDef::new(
    "modify_order_by_client_id",
    Method::Post,
    "orders/by_client_id/{client_id}/modify",
)
.optional(&["price", "size", "clientId"]);
pub const MODIFY_TRIGGER_ORDER: EndpointDef = EndpointDef::new(
    "modify_trigger_order",
    Method::Post,
    "conditional_orders/{order_id}/modify",
)
.required(&["size"])
.optional(&["triggerPrice", "orderPrice", "trailValue"]);
pub const CANCEL_ORDER: EndpointDef =
    EndpointDef::new("cancel_order", Method::Delete, "orders/{order_id}");
pub const CANCEL_ORDER_BY_CLIENT_ID: EndpointDef = EndpointDef::new(
    "cancel_order_by_client_id",
    Method::Delete,
    "orders/by_client_id/{client_id}",
);
pub const CANCEL_TRIGGER_ORDER: EndpointDef =
    EndpointDef::new("cancel_trigger_order", Method::Delete, "conditional_orders/{order_id}");
pub const CANCEL_ALL_ORDERS: EndpointDef =
    EndpointDef::new("cancel_all_orders", Method::Delete, "orders").optional(&[
        "market",
        "conditionalOrdersOnly",
        "limitOrdersOnly",
    ]);

// SRM staking and spot margin lending
pub const GET_SRM_STAKES: EndpointDef =
    EndpointDef::new("get_srm_stake_history", Method::Get, "srm_stakes/stakes");
pub const GET_SRM_UNSTAKE_REQUESTS: EndpointDef =
    EndpointDef::new("get_srm_unstake_history", Method::Get, "srm_stakes/unstake_requests");
pub const GET_SRM_STAKE_BALANCES: EndpointDef =
    EndpointDef::new("get_srm_stake_balances", Method::Get, "srm_stakes/balances");
pub const GET_SRM_STAKING_REWARDS: EndpointDef = EndpointDef::new(
    "get_srm_stake_rewards_history",
    Method::Get,
    "srm_stakes/staking_rewards",
);
pub const SRM_UNSTAKE: EndpointDef =
    EndpointDef::new("srm_unstake", Method::Post, "srm_stakes/unstake_requests")
        .required(&["coin", "size"]);
pub const CANCEL_SRM_UNSTAKE: EndpointDef = EndpointDef::new(
    "cancel_srm_unstake",
    Method::Delete,
    "srm_stakes/unstake_requests/{stake_id}",
);
pub const SRM_STAKE: EndpointDef =
    EndpointDef::new("srm_stake", Method::Post, "srm_stakes/stakes").required(&["coin", "size"]);
pub const GET_LENDING_RATES: EndpointDef =
    EndpointDef::new("get_margin_lending_rates", Method::Get, "spot_margin/lending_rates");
pub const SET_LENDING_OFFER: EndpointDef =
    EndpointDef::new("set_margin_lending_offer", Method::Post, "spot_margin/offers")
        .required(&["coin", "size", "rate"]);

/// Every catalog entry
pub const ALL: &[EndpointDef] = &[
    GET_MARKETS,
    GET_MARKET,
    GET_ORDERBOOK,
    GET_TRADES,
    GET_CANDLES,
    GET_FUTURES,
    GET_FUTURE,
    GET_FUTURE_STATS,
    GET_FUNDING_RATES,
    GET_INDEX_WEIGHTS,
    GET_EXPIRED_FUTURES,
    GET_INDEX_CANDLES,
    GET_ACCOUNT,
    GET_POSITIONS,
    CHANGE_LEVERAGE,
    GET_FUNDING_PAYMENTS,
    GET_FILLS,
    GET_WALLET_COINS,
    GET_BALANCES,
    GET_ALL_BALANCES,
    GET_DEPOSIT_ADDRESS,
    GET_DEPOSITS,
    GET_WITHDRAWALS,
    GET_AIRDROPS,
    GET_SUBACCOUNTS,
    GET_SUBACCOUNT_BALANCES,
    CREATE_SUBACCOUNT,
    CHANGE_SUBACCOUNT_NAME,
    DELETE_SUBACCOUNT,
    TRANSFER_BALANCES,
    GET_OPEN_ORDERS,
    GET_ORDER_HISTORY,
    GET_OPEN_TRIGGER_ORDERS,
    GET_TRIGGER_ORDER_TRIGGERS,
    GET_TRIGGER_ORDER_HISTORY,
    GET_ORDER_STATUS,
    GET_ORDER_STATUS_BY_CLIENT_ID,
    CREATE_ORDER,
    CREATE_TRIGGER_ORDER,
    MODIFY_ORDER,
    MODIFY_ORDER_BY_CLIENT_ID,
    MODIFY_TRIGGER_ORDER,
    CANCEL_ORDER,
    CANCEL_ORDER_BY_CLIENT_ID,
    CANCEL_TRIGGER_ORDER,
    CANCEL_ALL_ORDERS,
    GET_SRM_STAKES,
    GET_SRM_UNSTAKE_REQUESTS,
    GET_SRM_STAKE_BALANCES,
    GET_SRM_STAKING_REWARDS,
    SRM_UNSTAKE,
    CANCEL_SRM_UNSTAKE,
    SRM_STAKE,
    GET_LENDING_RATES,
    SET_LENDING_OFFER,
];

/// Find an entry by operation name
pub fn lookup(name: &str) -> Option<&'static EndpointDef> {
    ALL.iter().find(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const PUBLIC: &[&str] = &[
        "get_markets",
        "get_market",
        "get_orderbook",
        "get_recent_trades",
        "get_candles",
        "get_futures",
        "get_future",
        "get_future_stats",
        "get_funding_rates",
        "get_index_weights",
        "get_expired_futures",
        "get_index_candles",
    ];

    fn dummy_args(def: &EndpointDef) -> Vec<&'static str> {
        def.placeholders().map(|_| "X").collect()
    }

    fn sample_value(param: &str) -> Value {
        match param {
            "depth" => Value::from(20),
            "resolution" => Value::from(60),
            _ => Value::from(1),
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = ALL.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_inferred_scopes() {
        for def in ALL {
            let mut query = Query::new();
            for param in def.required {
                query.insert(*param, sample_value(param));
            }
            let spec = def.request(&dummy_args(def), query).unwrap();
            let expected = if PUBLIC.contains(&def.name) {
                Scope::Public
            } else {
                Scope::Private
            };
            assert_eq!(spec.resolved_scope(), expected, "{}", def.name);
        }
    }

    #[test]
    fn test_render_path_encodes_arguments() {
        assert_eq!(
            GET_ORDERBOOK.render_path(&["BTC/USD"]).unwrap(),
            "markets/BTC%2FUSD/orderbook"
        );
        assert_eq!(
            MODIFY_ORDER_BY_CLIENT_ID.render_path(&["my order"]).unwrap(),
            "orders/by_client_id/my%20order/modify"
        );
        assert_eq!(GET_MARKETS.render_path(&[]).unwrap(), "markets");
    }

    #[test]
    fn test_render_path_argument_count() {
        assert!(GET_MARKET.render_path(&[]).is_err());
        assert!(GET_MARKETS.render_path(&["extra"]).is_err());
        let err = GET_MARKET.render_path(&[""]).unwrap_err();
        assert_eq!(err.name, "pair");
    }

    #[test]
    fn test_missing_required_parameter() {
        let err = CREATE_SUBACCOUNT.request(&[], Query::new()).unwrap_err();
        assert_eq!(err.name, "nickname");
    }

    #[test]
    fn test_undeclared_parameters_dropped() {
        let query = Query::new().with("bogus", 1).with("depth", 20);
        let spec = GET_ORDERBOOK.request(&["BTC/USD"], query).unwrap();
        assert_eq!(spec.query.keys().collect::<Vec<_>>(), vec!["depth"]);
    }

    #[test]
    fn test_scope_override_is_applied() {
        let def = EndpointDef {
            scope: Some(Scope::Private),
            ..GET_MARKETS
        };
        let spec = def.request(&[], Query::new()).unwrap();
        assert_eq!(spec.resolved_scope(), Scope::Private);
    }

    #[test]
    fn test_value_rules_reject_before_dispatch() {
        let cases = [
            (GET_ORDERBOOK, vec!["BTC/USD"], Query::new().with("depth", 5), "depth"),
            (GET_ORDERBOOK, vec!["BTC/USD"], Query::new().with("depth", "deep"), "depth"),
            (GET_CANDLES, vec!["BTC/USD"], Query::new().with("resolution", 7), "resolution"),
            (GET_INDEX_CANDLES, vec!["ALT"], Query::new().with("resolution", 120), "resolution"),
            (GET_DEPOSIT_ADDRESS, vec!["USDT"], Query::new().with("method", "polygon"), "method"),
            (
                GET_FILLS,
                vec![],
                Query::new().with("market", "BTC-PERP").with("order", "desc"),
                "order",
            ),
        ];

        for (def, args, query, param) in cases {
            let err = def.request(&args, query).unwrap_err();
            assert_eq!(err.name, param, "{}", def.name);
        }
    }

    #[test]
    fn test_value_rules_accept_valid_values() {
        assert!(GET_ORDERBOOK
            .request(&["BTC/USD"], Query::new().with("depth", 100))
            .is_ok());
        assert!(GET_ORDERBOOK
            .request(&["BTC/USD"], Query::new().with("depth", "50"))
            .is_ok());
        assert!(GET_CANDLES
            .request(&["BTC/USD"], Query::new().with("resolution", 86400))
            .is_ok());
        assert!(GET_DEPOSIT_ADDRESS
            .request(&["USDT"], Query::new().with("method", "erc20"))
            .is_ok());
        assert!(GET_FILLS
            .request(&[], Query::new().with("market", "BTC-PERP").with("order", "asc"))
            .is_ok());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("cancel_all_orders"), Some(&CANCEL_ALL_ORDERS));
        assert!(lookup("withdraw_everything").is_none());
    }
}
