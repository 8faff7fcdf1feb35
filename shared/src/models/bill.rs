//! Bill Model
//!
//! Normalized receipt produced by OCR extraction or manual entry. Amounts
//! arrive as JSON numbers (f64); the engine converts to decimal exactly
//! once at its boundary.

use serde::{Deserialize, Serialize};

/// Line item on a bill. Immutable once the bill is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    /// Line total (= quantity × unit_price, up to OCR rounding)
    pub total_price: f64,
    /// Category label from OCR (for display grouping)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Bill-level discount (voucher, promo, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    pub id: i64,
    pub description: String,
    pub amount: f64,
}

/// Bill-level fee (delivery, packaging, platform, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdditionalFee {
    pub id: i64,
    pub name: String,
    pub amount: f64,
}

/// Normalized bill
///
/// Invariant: `total_amount` equals `subtotal` minus discounts plus tax,
/// service charge and fees, within one minor unit of the bill currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: i64,
    pub merchant_name: String,
    /// Receipt date as printed (OCR passes it through unparsed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
    /// ISO 4217 code; determines minor-unit precision (IDR has 0 decimals)
    pub currency: String,
    pub items: Vec<Item>,
    pub subtotal: f64,
    pub discounts: Vec<Discount>,
    pub service_charge: f64,
    pub tax: f64,
    pub additional_fees: Vec<AdditionalFee>,
    pub total_amount: f64,
    pub created_at: i64,
}

impl Bill {
    /// Look up an item by ID
    pub fn item(&self, item_id: i64) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_lookup() {
        let bill = Bill {
            id: 1,
            merchant_name: "Warung Sederhana".to_string(),
            transaction_date: None,
            currency: "IDR".to_string(),
            items: vec![Item {
                id: 100,
                name: "Nasi goreng".to_string(),
                quantity: 2,
                unit_price: 25000.0,
                total_price: 50000.0,
                category: None,
            }],
            subtotal: 50000.0,
            discounts: vec![],
            service_charge: 0.0,
            tax: 0.0,
            additional_fees: vec![],
            total_amount: 50000.0,
            created_at: 0,
        };

        assert_eq!(bill.item(100).map(|i| i.quantity), Some(2));
        assert!(bill.item(999).is_none());
    }

    #[test]
    fn test_bill_serde_shape() {
        let bill = Bill {
            id: 7,
            merchant_name: "Kopi Kenangan".to_string(),
            transaction_date: Some("2024-06-15".to_string()),
            currency: "IDR".to_string(),
            items: vec![],
            subtotal: 0.0,
            discounts: vec![],
            service_charge: 0.0,
            tax: 0.0,
            additional_fees: vec![],
            total_amount: 0.0,
            created_at: 1718400000000,
        };

        let json = serde_json::to_string(&bill).unwrap();
        assert!(json.contains("\"currency\":\"IDR\""));
        assert!(json.contains("\"transaction_date\":\"2024-06-15\""));

        let back: Bill = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bill);
    }
}
