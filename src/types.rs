use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lookback windows tracked by the leaderboard, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Window {
    M5,
    M30,
    H1,
    H4,
    H8,
    H24,
}

impl Window {
    pub const ALL: [Window; 6] = [
        Window::M5,
        Window::M30,
        Window::H1,
        Window::H4,
        Window::H8,
        Window::H24,
    ];

    /// JSON key used by the endpoint.
    pub fn label(self) -> &'static str {
        match self {
            Window::M5 => "m5",
            Window::M30 => "m30",
            Window::H1 => "h1",
            Window::H4 => "h4",
            Window::H8 => "h8",
            Window::H24 => "h24",
        }
    }
}

/// One figure per window, all present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct TimelineValues {
    #[serde(default)]
    pub m5: f64,
    #[serde(default)]
    pub m30: f64,
    #[serde(default)]
    pub h1: f64,
    #[serde(default)]
    pub h4: f64,
    #[serde(default)]
    pub h8: f64,
    #[serde(default)]
    pub h24: f64,
}

impl TimelineValues {
    pub fn get(&self, window: Window) -> f64 {
        match window {
            Window::M5 => self.m5,
            Window::M30 => self.m30,
            Window::H1 => self.h1,
            Window::H4 => self.h4,
            Window::H8 => self.h8,
            Window::H24 => self.h24,
        }
    }

    pub fn set(&mut self, window: Window, value: f64) {
        match window {
            Window::M5 => self.m5 = value,
            Window::M30 => self.m30 = value,
            Window::H1 => self.h1 = value,
            Window::H4 => self.h4 = value,
            Window::H8 => self.h8 = value,
            Window::H24 => self.h24 = value,
        }
    }
}

/// Timeline as served for `price_change_percent`, where any window may be
/// missing or null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct PartialTimelineValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m30: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h4: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h8: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h24: Option<f64>,
}

impl PartialTimelineValues {
    pub fn get(&self, window: Window) -> Option<f64> {
        match window {
            Window::M5 => self.m5,
            Window::M30 => self.m30,
            Window::H1 => self.h1,
            Window::H4 => self.h4,
            Window::H8 => self.h8,
            Window::H24 => self.h24,
        }
    }

    /// Absent windows count as 0.
    pub fn get_or_zero(&self, window: Window) -> f64 {
        self.get(window).unwrap_or(0.0)
    }

    pub fn resolved(&self) -> TimelineValues {
        let mut values = TimelineValues::default();
        for window in Window::ALL {
            values.set(window, self.get_or_zero(window));
        }
        values
    }
}

impl From<TimelineValues> for PartialTimelineValues {
    fn from(values: TimelineValues) -> Self {
        Self {
            m5: Some(values.m5),
            m30: Some(values.m30),
            h1: Some(values.h1),
            h4: Some(values.h4),
            h8: Some(values.h8),
            h24: Some(values.h24),
        }
    }
}

pub type DegenListData = Vec<DegenListItem>;

/// One leaderboard entry as returned by the degen list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DegenListItem {
    pub token_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_icon: Option<String>,
    #[serde(default)]
    pub token_created: f64,
    pub price_usd: f64,
    #[serde(default)]
    pub market_cap_usd: f64,
    #[serde(default)]
    pub total_supply: f64,
    #[serde(default)]
    pub price_change_percent: PartialTimelineValues,
    #[serde(default)]
    pub whale_count: TimelineValues,
    #[serde(default)]
    pub whale_trades_count: TimelineValues,
    #[serde(default)]
    pub whale_buys_count: TimelineValues,
    #[serde(default)]
    pub whale_buy_volume_usd: TimelineValues,
    #[serde(default)]
    pub whale_sells_count: TimelineValues,
    #[serde(default)]
    pub whale_sell_volume_usd: TimelineValues,
    #[serde(default)]
    pub whale_net_flow_usd: TimelineValues,
    #[serde(default)]
    pub whale_buy_amount: TimelineValues,
    #[serde(default)]
    pub whale_sell_amount: TimelineValues,
    #[serde(default)]
    pub whale_net_amount: TimelineValues,
    #[serde(default)]
    pub whale_holder_retention_percent: TimelineValues,
    #[serde(default)]
    pub whale_buy_supply_percent: TimelineValues,
    #[serde(default)]
    pub whale_sell_supply_percent: TimelineValues,
    #[serde(default)]
    pub whale_net_supply_percent: TimelineValues,
    #[serde(default)]
    pub volume_usd: TimelineValues,
    #[serde(default)]
    pub liquidity_usd: f64,
    #[serde(default)]
    pub transactions_count: TimelineValues,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_pump: bool,
    #[serde(default)]
    pub is_pro: bool,
    #[serde(default)]
    pub is_bonk: bool,
    #[serde(default)]
    pub is_believe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_xstocks: Option<bool>,
    #[serde(default)]
    pub is_ray: bool,
    #[serde(default)]
    pub antirug_score: Value,
    #[serde(default)]
    pub launchpad: Value,
    #[serde(default)]
    pub score_values: TimelineValues,
}

impl DegenListItem {
    /// Minimal entry, mostly useful for building fixtures.
    pub fn new(token_address: impl Into<String>, price_usd: f64) -> Self {
        Self {
            token_address: token_address.into(),
            token_symbol: None,
            token_icon: None,
            token_created: 0.0,
            price_usd,
            market_cap_usd: 0.0,
            total_supply: 0.0,
            price_change_percent: PartialTimelineValues::default(),
            whale_count: TimelineValues::default(),
            whale_trades_count: TimelineValues::default(),
            whale_buys_count: TimelineValues::default(),
            whale_buy_volume_usd: TimelineValues::default(),
            whale_sells_count: TimelineValues::default(),
            whale_sell_volume_usd: TimelineValues::default(),
            whale_net_flow_usd: TimelineValues::default(),
            whale_buy_amount: TimelineValues::default(),
            whale_sell_amount: TimelineValues::default(),
            whale_net_amount: TimelineValues::default(),
            whale_holder_retention_percent: TimelineValues::default(),
            whale_buy_supply_percent: TimelineValues::default(),
            whale_sell_supply_percent: TimelineValues::default(),
            whale_net_supply_percent: TimelineValues::default(),
            volume_usd: TimelineValues::default(),
            liquidity_usd: 0.0,
            transactions_count: TimelineValues::default(),
            is_new: false,
            is_pump: false,
            is_pro: false,
            is_bonk: false,
            is_believe: false,
            is_xstocks: None,
            is_ray: false,
            antirug_score: Value::Null,
            launchpad: Value::Null,
            score_values: TimelineValues::default(),
        }
    }
}
