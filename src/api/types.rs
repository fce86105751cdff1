//! Request payload items and query filters for the endpoint facade.

// self
use crate::{
	_prelude::*,
	api::id::{AccountId, BeneficiaryId},
	error::ValidationError,
};

/// One transfer within a [`transfer_multiple`](crate::api::Client::transfer_multiple) batch.
///
/// Field casing on the wire is camelCase; amounts are decimal strings in Rands (`"1.01"`),
/// never floats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInstruction {
	/// Account receiving the transfer.
	pub beneficiary_account_id: AccountId,
	/// Amount as a decimal string.
	pub amount: String,
	/// Statement reference shown on the source account.
	pub my_reference: String,
	/// Statement reference shown on the destination account.
	pub their_reference: String,
}

/// One payment within a [`pay_multiple`](crate::api::Client::pay_multiple) batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstruction {
	/// Saved beneficiary receiving the payment.
	pub beneficiary_id: BeneficiaryId,
	/// Amount as a decimal string.
	pub amount: String,
	/// Statement reference shown on the source account.
	pub my_reference: String,
	/// Statement reference shown on the beneficiary's account.
	pub their_reference: String,
}

/// Body wrapper for the transfer endpoint. The bank expects this one key in PascalCase.
#[derive(Debug, Serialize)]
pub(crate) struct TransferBatch<'a> {
	#[serde(rename = "TransferList")]
	pub(crate) transfer_list: &'a [TransferInstruction],
}

/// Body wrapper for the payment endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct PaymentBatch<'a> {
	#[serde(rename = "paymentList")]
	pub(crate) payment_list: &'a [PaymentInstruction],
}

/// Optional filters for the transaction listing endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilter {
	/// Inclusive start of the window.
	pub from_date: Option<Date>,
	/// Inclusive end of the window.
	pub to_date: Option<Date>,
	/// Bank-defined transaction type label (for example `CardPurchases`).
	pub transaction_type: Option<String>,
}
impl TransactionFilter {
	/// Creates an empty filter matching every transaction.
	pub fn new() -> Self {
		Self::default()
	}

	/// Restricts the window start.
	pub fn with_from_date(mut self, date: Date) -> Self {
		self.from_date = Some(date);

		self
	}

	/// Restricts the window end.
	pub fn with_to_date(mut self, date: Date) -> Self {
		self.to_date = Some(date);

		self
	}

	/// Restricts results to one transaction type.
	pub fn with_transaction_type(mut self, value: impl Into<String>) -> Self {
		self.transaction_type = Some(value.into());

		self
	}

	/// Rejects windows that end before they start. Runs before any network traffic.
	pub fn validate(&self) -> Result<(), ValidationError> {
		if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
			if to < from {
				return Err(ValidationError::DateRange { from, to });
			}
		}

		Ok(())
	}

	/// Serializes the populated filters as query pairs, dates as `YYYY-MM-DD`.
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = Vec::new();

		if let Some(from) = self.from_date {
			pairs.push(("fromDate", format_date(from)));
		}
		if let Some(to) = self.to_date {
			pairs.push(("toDate", format_date(to)));
		}
		if let Some(kind) = &self.transaction_type {
			pairs.push(("transactionType", kind.clone()));
		}

		pairs
	}
}

fn format_date(date: Date) -> String {
	format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	use time::macros;
	// self
	use super::*;

	#[test]
	fn transfer_instruction_serializes_camel_case() {
		let instruction = TransferInstruction {
			beneficiary_account_id: AccountId::new("B1")
				.expect("Beneficiary account fixture should be valid."),
			amount: "1.01".into(),
			my_reference: "x".into(),
			their_reference: "y".into(),
		};
		let encoded = serde_json::to_value(&instruction)
			.expect("Transfer instruction should serialize successfully.");

		assert_eq!(
			encoded,
			json!({
				"beneficiaryAccountId": "B1",
				"amount": "1.01",
				"myReference": "x",
				"theirReference": "y",
			}),
		);
	}

	#[test]
	fn batch_wrappers_use_committed_key_casing() {
		let transfers = [TransferInstruction {
			beneficiary_account_id: AccountId::new("B1")
				.expect("Beneficiary account fixture should be valid."),
			amount: "1.01".into(),
			my_reference: "x".into(),
			their_reference: "y".into(),
		}];
		let payments = [PaymentInstruction {
			beneficiary_id: BeneficiaryId::new("ben-1")
				.expect("Beneficiary fixture should be valid."),
			amount: "2.50".into(),
			my_reference: "rent".into(),
			their_reference: "march".into(),
		}];
		let transfer_body = serde_json::to_value(TransferBatch { transfer_list: &transfers })
			.expect("Transfer batch should serialize successfully.");
		let payment_body = serde_json::to_value(PaymentBatch { payment_list: &payments })
			.expect("Payment batch should serialize successfully.");

		assert!(transfer_body.get("TransferList").is_some());
		assert!(payment_body.get("paymentList").is_some());
	}

	#[test]
	fn filter_rejects_inverted_window() {
		let filter = TransactionFilter::new()
			.with_from_date(macros::date!(2024-02-01))
			.with_to_date(macros::date!(2024-01-01));

		assert!(matches!(filter.validate(), Err(ValidationError::DateRange { .. })));
	}

	#[test]
	fn filter_accepts_equal_bounds_and_partial_windows() {
		let day = macros::date!(2024-01-15);

		assert!(TransactionFilter::new().with_from_date(day).with_to_date(day).validate().is_ok());
		assert!(TransactionFilter::new().with_to_date(day).validate().is_ok());
		assert!(TransactionFilter::new().validate().is_ok());
	}

	#[test]
	fn filter_query_pairs_format_dates_iso() {
		let pairs = TransactionFilter::new()
			.with_from_date(macros::date!(2024-01-05))
			.with_to_date(macros::date!(2024-12-31))
			.with_transaction_type("CardPurchases")
			.query_pairs();

		assert_eq!(pairs, vec![
			("fromDate", "2024-01-05".into()),
			("toDate", "2024-12-31".into()),
			("transactionType", "CardPurchases".into()),
		]);
	}

	#[test]
	fn empty_filter_produces_no_pairs() {
		assert!(TransactionFilter::new().query_pairs().is_empty());
	}
}
