use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::decimal::{Money, Rate};

/// engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// deadline applied by `TimeoutCustomerLookup`
    pub customer_lookup_timeout_ms: u64,
    pub error_mapping: ErrorMapping,
    pub limits: RequestLimits,
}

/// how update, cancel and mark-overdue translate failures into response codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMapping {
    /// not-found and rule violations keep their own codes (404 / 400)
    #[default]
    Unified,
    /// every failure is reported as 500 with the bare message
    Legacy,
}

/// request constraints checked before any collaborator is called
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestLimits {
    pub minimum_credit_limit: Money,
    pub maximum_interest_rate: Rate,
    pub minimum_term_months: u32,
    pub maximum_term_months: u32,
    pub minimum_disbursement: Money,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            minimum_credit_limit: Money::CENT,
            maximum_interest_rate: Rate::ONE,
            minimum_term_months: 1,
            maximum_term_months: 360,
            minimum_disbursement: Money::CENT,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            customer_lookup_timeout_ms: 2_000,
            error_mapping: ErrorMapping::Unified,
            limits: RequestLimits::default(),
        }
    }
}

impl EngineConfig {
    /// load from a json document; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// configuration keeping the legacy 500 responses for update, cancel and mark-overdue
    pub fn legacy() -> Self {
        Self {
            error_mapping: ErrorMapping::Legacy,
            ..Self::default()
        }
    }

    pub fn customer_lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.customer_lookup_timeout_ms)
    }
}
