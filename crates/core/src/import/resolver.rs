//! Resolves import rows into transaction inputs.

use fatura_shared::types::{AccountId, CategoryId, parse_money};
use validator::Validate;

use super::error::ImportError;
use super::types::ImportRow;
use crate::transaction::{CreateTransactionInput, InputError, TransactionStatus, TransactionType};

/// Spreadsheet line of the row at `index`.
#[must_use]
pub const fn line_number(index: usize) -> usize {
    index + 2
}

/// Reads a boolean written by a person.
///
/// `true`, `1`, `yes`, `on` and `sim` are true. Anything else is false.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on" | "sim"
    )
}

/// Import row resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportResolver;

impl ImportResolver {
    /// Resolves every row, stopping at the first bad one.
    ///
    /// `find_account` maps a bank name to one of the user's accounts and
    /// `find_category` maps a category name to one of the user's categories.
    ///
    /// # Errors
    ///
    /// Returns the `ImportError` of the first row that fails.
    pub fn resolve<A, C>(
        rows: &[ImportRow],
        find_account: A,
        find_category: C,
    ) -> Result<Vec<CreateTransactionInput>, ImportError>
    where
        A: Fn(&str) -> Option<AccountId>,
        C: Fn(&str) -> Option<CategoryId>,
    {
        rows.iter()
            .enumerate()
            .map(|(index, row)| Self::resolve_row(line_number(index), row, &find_account, &find_category))
            .collect()
    }

    fn resolve_row<A, C>(
        line: usize,
        row: &ImportRow,
        find_account: &A,
        find_category: &C,
    ) -> Result<CreateTransactionInput, ImportError>
    where
        A: Fn(&str) -> Option<AccountId>,
        C: Fn(&str) -> Option<CategoryId>,
    {
        let invalid = |message: String| ImportError::InvalidRow { line, message };

        let account_id = match non_blank(row.bank_name.as_deref()) {
            Some(name) => Some(find_account(name).ok_or_else(|| ImportError::AccountNotFound {
                line,
                name: name.to_string(),
            })?),
            None => None,
        };
        let category_id = match non_blank(row.category_name.as_deref()) {
            Some(name) => Some(find_category(name).ok_or_else(|| {
                ImportError::CategoryNotFound {
                    line,
                    name: name.to_string(),
                }
            })?),
            None => None,
        };

        let amount = parse_money(&row.amount).map_err(|e| invalid(e.to_string()))?;
        let transaction_type: TransactionType = row
            .transaction_type
            .parse()
            .map_err(|e: InputError| invalid(e.to_string()))?;
        let status = non_blank(row.status.as_deref())
            .map(str::parse::<TransactionStatus>)
            .transpose()
            .map_err(|e| invalid(e.to_string()))?;

        let input = CreateTransactionInput {
            title: row.title.clone(),
            description: non_blank(row.description.as_deref()).map(str::to_string),
            amount,
            transaction_type,
            status,
            paid_date: None,
            total_installments: row.total_installments,
            current_installment: row.current_installment,
            is_recurring: row.is_recurring.as_deref().is_some_and(parse_flag),
            account_id,
            category_id,
            created_at: None,
        };
        input.validate().map_err(|e| invalid(e.to_string()))?;

        Ok(input)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
