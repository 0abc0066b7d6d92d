//! Invoice records and the invoice builder form.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::amount::MonetaryAmount;
use crate::config::{DEFAULT_PAYMENT_MODE, DEFAULT_PAYMENT_TYPE};
use crate::errors::AppResult;

/// Generated invoice as listed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[schema(example = 101)]
    pub invoice_id: i64,
    pub business_id: i64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[schema(example = "INV-0042")]
    pub invoice_number: String,
    #[schema(example = 1234.56)]
    pub invoice_amount: f64,
    #[serde(default)]
    pub amount_in_words: String,
    #[serde(default)]
    pub payment_mode: String,
    #[serde(default)]
    pub payment_type: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(rename = "pdfURL", default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[schema(example = "2024-03-01")]
    pub invoice_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

/// Invoice builder form, forwarded to the backend PDF generator.
///
/// Field names on the wire follow the backend exactly.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InvoiceDraft {
    #[serde(rename = "businessId")]
    #[schema(example = 5)]
    pub business_id: i64,
    #[serde(rename = "invoiceNumber")]
    #[validate(length(min = 1, message = "Invoice number is required"))]
    #[schema(example = "INV-0042")]
    pub invoice_number: String,
    #[serde(rename = "BookNo")]
    #[validate(length(min = 1, message = "Book number is required"))]
    pub book_no: String,
    #[serde(rename = "invoiceDate", default = "today")]
    #[schema(value_type = String, example = "2024-03-01")]
    pub invoice_date: NaiveDate,
    #[serde(rename = "CustomerName")]
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[serde(rename = "customerPhone")]
    #[validate(length(min = 1, message = "Customer phone is required"))]
    pub customer_phone: String,
    #[serde(rename = "customerFullAddress")]
    #[validate(length(min = 1, message = "Customer address is required"))]
    pub customer_full_address: String,
    #[serde(rename = "invoiceAmount")]
    #[validate(range(min = 0.0, message = "Invoice amount cannot be negative"))]
    #[schema(example = 1234.56)]
    pub invoice_amount: f64,
    /// Filled from the amount when left empty
    #[serde(rename = "amountinwords", default)]
    pub amount_in_words: String,
    #[validate(length(min = 1, message = "Purpose is required"))]
    pub purpose: String,
    #[serde(rename = "paymentMode", default = "default_payment_mode")]
    pub payment_mode: String,
    #[serde(rename = "paymentType", default = "default_payment_type")]
    pub payment_type: String,
    #[serde(rename = "billCollector")]
    #[validate(length(min = 1, message = "Bill collector is required"))]
    pub bill_collector: String,
    #[serde(rename = "Nazim")]
    #[validate(length(min = 1, message = "Nazim is required"))]
    pub nazim: String,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn default_payment_mode() -> String {
    DEFAULT_PAYMENT_MODE.to_string()
}

fn default_payment_type() -> String {
    DEFAULT_PAYMENT_TYPE.to_string()
}

impl InvoiceDraft {
    /// Fill the printed amount in words when the form left it blank.
    pub fn fill_amount_in_words(&mut self) -> AppResult<()> {
        if self.amount_in_words.trim().is_empty() {
            self.amount_in_words = MonetaryAmount::new(self.invoice_amount)?.in_words();
        }
        Ok(())
    }

    /// Download name of the generated PDF.
    pub fn file_name(&self) -> String {
        let number: String = self
            .invoice_number
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("invoice_{}.pdf", number)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn draft(amount: f64) -> InvoiceDraft {
        serde_json::from_value(serde_json::json!({
            "businessId": 5,
            "invoiceNumber": "INV-1",
            "BookNo": "B-7",
            "invoiceDate": "2024-03-01",
            "CustomerName": "John Smith",
            "customerPhone": "555-0101",
            "customerFullAddress": "2 Side St",
            "invoiceAmount": amount,
            "purpose": "Donation",
            "billCollector": "Ali",
            "Nazim": "Omar"
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let draft = draft(10.0);
        assert_eq!(draft.payment_mode, "Cash");
        assert_eq!(draft.payment_type, "Full");
        assert!(draft.amount_in_words.is_empty());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_fill_amount_in_words() {
        let mut draft = draft(1234.56);
        draft.fill_amount_in_words().unwrap();
        assert_eq!(
            draft.amount_in_words,
            "One Thousand Two Hundred Thirty Four and Fifty Six Cents Only"
        );
    }

    #[test]
    fn test_existing_words_are_kept() {
        let mut draft = draft(5.0);
        draft.amount_in_words = "Five Dollars Only".to_string();
        draft.fill_amount_in_words().unwrap();
        assert_eq!(draft.amount_in_words, "Five Dollars Only");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut draft = draft(-5.0);
        assert!(draft.validate().is_err());
        assert!(draft.fill_amount_in_words().is_err());
    }

    #[test]
    fn test_wire_names() {
        let mut draft = draft(1.0);
        draft.fill_amount_in_words().unwrap();
        let wire = serde_json::to_value(&draft).unwrap();
        assert_eq!(wire["BookNo"], "B-7");
        assert_eq!(wire["CustomerName"], "John Smith");
        assert_eq!(wire["amountinwords"], "One Only");
        assert_eq!(wire["Nazim"], "Omar");
        assert_eq!(wire["invoiceDate"], "2024-03-01");
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let mut draft = draft(1.0);
        draft.invoice_number = "2024/03 #7".to_string();
        assert_eq!(draft.file_name(), "invoice_2024_03__7.pdf");
    }

    #[test]
    fn test_invoice_deserializes_backend_record() {
        let json = r#"{
            "invoiceId": 1, "businessId": 5, "customerId": 3,
            "invoiceNumber": "INV-1", "invoiceAmount": 10.5,
            "amountInWords": "Ten and Fifty Cents Only",
            "paymentMode": "Cash", "paymentType": "Full", "purpose": "Rent",
            "pdfURL": "https://files.example.com/1.pdf",
            "invoiceDate": "2024-03-01", "createdOn": "2024-03-01T10:00:00"
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.pdf_url.as_deref(), Some("https://files.example.com/1.pdf"));
        assert_eq!(invoice.customer_id, Some(3));
    }
}
