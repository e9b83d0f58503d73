use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{CreditError, Result};
use crate::payments::{first_due_date, monthly_payment};
use crate::requests::CreditRequest;
use crate::types::{CreditId, CreditStatus, CreditType};

/// a credit line and its repayment terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    // identification
    pub id: CreditId,
    pub credit_number: String,
    pub customer_document: String,
    pub credit_type: CreditType,

    // balances
    pub credit_limit: Money,
    pub current_debt: Money,
    pub available_credit: Money,

    // terms
    pub interest_rate: Rate,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub due_date: NaiveDate,

    // status
    pub has_overdue_debt: bool,
    pub status: CreditStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credit {
    /// build a fresh, active credit from a validated request
    pub fn open(request: &CreditRequest, now: DateTime<Utc>) -> Result<Self> {
        let due_date = first_due_date(now).ok_or_else(|| CreditError::Unexpected {
            message: format!("cannot compute due date from {}", now),
        })?;
        let payment = monthly_payment(request.credit_limit, request.interest_rate, request.term_months)
            .ok_or_else(|| {
                CreditError::invalid_request(format!(
                    "Credit limit {} is too large to amortize at {} over {} months",
                    request.credit_limit, request.interest_rate, request.term_months
                ))
            })?;

        Ok(Self {
            id: Uuid::new_v4(),
            credit_number: generate_credit_number(request.credit_type, now),
            customer_document: request.customer_document.clone(),
            credit_type: request.credit_type,
            credit_limit: request.credit_limit,
            current_debt: Money::ZERO,
            available_credit: request.credit_limit,
            interest_rate: request.interest_rate,
            term_months: request.term_months,
            monthly_payment: payment,
            due_date,
            has_overdue_debt: false,
            status: CreditStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// available credit plus debt equals the limit
    pub fn is_balanced(&self) -> bool {
        self.available_credit + self.current_debt == self.credit_limit
    }

    pub fn has_debt(&self) -> bool {
        self.current_debt.is_positive()
    }

    /// overwrite rate and term; cancelled credits are frozen
    pub fn update_terms(&mut self, interest_rate: Rate, term_months: u32, now: DateTime<Utc>) -> Result<()> {
        if self.status.is_terminal() {
            return Err(CreditError::business_rule("Cannot update cancelled credit"));
        }

        self.interest_rate = interest_rate;
        self.term_months = term_months;
        self.updated_at = now;
        Ok(())
    }

    /// close the credit; a zero balance leaves nothing overdue, so the flag clears
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.has_debt() {
            return Err(CreditError::business_rule("Cannot cancel credit with pending debt"));
        }
        if !self.status.is_open() {
            return Err(CreditError::business_rule(format!(
                "Cannot cancel credit in status {:?}",
                self.status
            )));
        }

        self.status = CreditStatus::Cancelled;
        self.has_overdue_debt = false;
        self.updated_at = now;
        Ok(())
    }

    /// flag the credit overdue regardless of its current state
    pub fn mark_overdue(&mut self, now: DateTime<Utc>) {
        self.has_overdue_debt = true;
        self.status = CreditStatus::Overdue;
        self.updated_at = now;
    }

    /// soft delete
    ///
    /// Re-deleting an inactive credit is a no-op transition that still
    /// restamps `updated_at`. Cancelled credits stay cancelled. Only a
    /// debt-free credit gets here, so the overdue flag clears.
    pub fn deactivate(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.has_debt() {
            return Err(CreditError::CreditHasDebt {
                debt: self.current_debt,
            });
        }
        if self.status.is_terminal() {
            return Err(CreditError::business_rule("Cannot delete cancelled credit"));
        }

        self.status = CreditStatus::Inactive;
        self.has_overdue_debt = false;
        self.updated_at = now;
        Ok(())
    }

    /// draw `amount` against the available balance
    ///
    /// The record is left untouched when the draw would overrun the limit.
    pub fn disburse(&mut self, amount: Money, now: DateTime<Utc>) -> Result<()> {
        if amount > self.available_credit {
            return Err(CreditError::InsufficientCredit {
                available: self.available_credit,
                requested: amount,
            });
        }

        let (Some(new_available), Some(new_debt)) = (
            self.available_credit.checked_sub(amount),
            self.current_debt.checked_add(amount),
        ) else {
            return Err(CreditError::Unexpected {
                message: format!("disbursement of {} overflows the credit balances", amount),
            });
        };

        self.available_credit = new_available;
        self.current_debt = new_debt;
        self.updated_at = now;
        Ok(())
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// human-readable credit number: `<prefix>-<millis mod 1e6>-<4 random digits>`
///
/// Not collision free. Two credits of the same type created in the same
/// millisecond share a 1 in 10_000 chance of colliding; `Credit::id` is the
/// unique key.
pub fn generate_credit_number(credit_type: CreditType, now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().rem_euclid(1_000_000);
    let suffix: u32 = rand::rng().random_range(0..10_000);
    format!("{}-{}-{:04}", credit_type.number_prefix(), millis, suffix)
}
