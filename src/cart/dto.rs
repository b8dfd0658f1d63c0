use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::CartLine;
use crate::error::ApiError;

/// Body for `POST /api/cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Body for `PUT /api/cart/:productId`.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// The cart as returned to the client; an absent cart is the empty shape,
/// never a 404.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
}

/// A line quantity is always >= 1; zero and negative amounts are rejected at
/// the boundary rather than stored.
pub fn validate_quantity(quantity: i32) -> Result<(), ApiError> {
    if quantity < 1 {
        return Err(ApiError::InvalidArgument(
            "quantity must be at least 1".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_quantities_are_rejected() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(40).is_ok());
    }

    #[test]
    fn add_item_parses_camel_case_body() {
        let req: AddItemRequest = serde_json::from_str(
            r#"{"productId":"7f2c1f6e-98d1-4b6e-9a3e-6a4f6fb1c111","quantity":2}"#,
        )
        .unwrap();
        assert_eq!(req.quantity, 2);
        assert_eq!(
            req.product_id.to_string(),
            "7f2c1f6e-98d1-4b6e-9a3e-6a4f6fb1c111"
        );
    }

    #[test]
    fn empty_cart_serializes_to_an_empty_item_list() {
        let json = serde_json::to_string(&CartResponse { items: vec![] }).unwrap();
        assert_eq!(json, r#"{"items":[]}"#);
    }
}
