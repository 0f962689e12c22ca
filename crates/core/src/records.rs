//! Accounts, categories, and parties referenced by movements.
//!
//! These records are owned by peripheral screens; the finance core only
//! reads them. Account balances are stored values maintained elsewhere.

use bizdesk_shared::types::{AccountId, CategoryId, PartyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

labelled_enum! {
    /// Whether a record can be used for new movements.
    pub enum RecordStatus {
        /// Available for selection.
        Active => "active" | "ativo",
        /// Hidden from selection, kept for history.
        Inactive => "inactive" | "inativo",
    }
}

labelled_enum! {
    /// Kind of financial holding.
    pub enum AccountKind {
        /// Bank checking account.
        Bank => "bank" | "banco" | "corrente",
        /// Physical cash box.
        Cash => "cash" | "caixa",
        /// Credit card.
        Card => "card" | "cartao",
        /// Savings or investment account.
        Savings => "savings" | "poupanca",
    }
}

labelled_enum! {
    /// Side of the books a category groups.
    pub enum CategoryType {
        /// Groups income movements.
        Income => "income" | "receita",
        /// Groups expense movements.
        Expense => "expense" | "despesa",
    }
}

labelled_enum! {
    /// Commercial relationship with a party.
    pub enum PartyKind {
        /// Buys from the business.
        Customer => "customer" | "cliente",
        /// Sells to the business.
        Supplier => "supplier" | "fornecedor",
    }
}

/// A financial account (bank, cash, card, savings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Kind of holding.
    pub kind: AccountKind,
    /// Balance as currently stored.
    pub current_balance: Decimal,
    /// Balance when the account was opened.
    pub initial_balance: Decimal,
    /// Availability.
    pub status: RecordStatus,
    /// Bank name, for bank accounts.
    pub bank_name: Option<String>,
    /// Bank branch code.
    pub branch: Option<String>,
    /// Account number at the bank.
    pub account_number: Option<String>,
}

impl Account {
    /// Returns true if the account accepts new movements.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

/// A reporting category for movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// Availability.
    pub status: RecordStatus,
    /// Free-text description.
    pub description: Option<String>,
}

/// A customer or supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Party ID.
    pub id: PartyId,
    /// Display name.
    pub name: String,
    /// Customer or supplier.
    pub kind: PartyKind,
    /// Availability.
    pub status: RecordStatus,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Tax registration number.
    pub tax_id: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}
