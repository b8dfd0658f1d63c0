use serde::Deserialize;

use super::repo::InventoryStatus;
use crate::error::ApiError;

const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=5.0;

fn check_ranges(
    price: Option<f64>,
    quantity: Option<i32>,
    rating: Option<f64>,
) -> Result<(), ApiError> {
    if let Some(price) = price {
        if !price.is_finite() || price < 0.0 {
            return Err(ApiError::InvalidArgument("price must be >= 0".into()));
        }
    }
    if let Some(quantity) = quantity {
        if quantity < 0 {
            return Err(ApiError::InvalidArgument("quantity must be >= 0".into()));
        }
    }
    if let Some(rating) = rating {
        if !RATING_RANGE.contains(&rating) {
            return Err(ApiError::InvalidArgument(
                "rating must be between 0 and 5".into(),
            ));
        }
    }
    Ok(())
}

/// Body for `POST /api/products`. Code, name, price, quantity and
/// inventoryStatus are mandatory; the rest mirrors the catalog record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub internal_reference: Option<String>,
    pub shell_id: Option<i64>,
    pub inventory_status: InventoryStatus,
    pub rating: Option<f64>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.code.trim().is_empty() || self.name.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "code and name are required".into(),
            ));
        }
        check_ranges(Some(self.price), Some(self.quantity), self.rating)
    }
}

/// Body for `PUT /api/products/:id`; absent fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub internal_reference: Option<String>,
    pub shell_id: Option<i64>,
    pub inventory_status: Option<InventoryStatus>,
    pub rating: Option<f64>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if matches!(&self.code, Some(c) if c.trim().is_empty())
            || matches!(&self.name, Some(n) if n.trim().is_empty())
        {
            return Err(ApiError::InvalidArgument(
                "code and name must not be empty".into(),
            ));
        }
        check_ranges(self.price, self.quantity, self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_req(price: f64, quantity: i32, rating: Option<f64>) -> CreateProductRequest {
        CreateProductRequest {
            code: "P-001".into(),
            name: "Keyboard".into(),
            description: None,
            image: None,
            category: None,
            price,
            quantity,
            internal_reference: None,
            shell_id: None,
            inventory_status: InventoryStatus::InStock,
            rating,
        }
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(matches!(
            create_req(-5.0, 1, None).validate(),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(matches!(
            create_req(9.99, -1, None).validate(),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn nan_price_is_rejected() {
        assert!(create_req(f64::NAN, 1, None).validate().is_err());
    }

    #[test]
    fn rating_out_of_bounds_is_rejected() {
        assert!(create_req(9.99, 1, Some(5.5)).validate().is_err());
        assert!(create_req(9.99, 1, Some(-0.1)).validate().is_err());
        assert!(create_req(9.99, 1, Some(5.0)).validate().is_ok());
    }

    #[test]
    fn zero_price_and_quantity_are_allowed() {
        assert!(create_req(0.0, 0, None).validate().is_ok());
    }

    #[test]
    fn blank_code_is_rejected() {
        let mut req = create_req(9.99, 1, None);
        req.code = "  ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_accepts_partial_bodies() {
        let req: UpdateProductRequest = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert_eq!(req.price, Some(12.5));
        assert!(req.code.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_rejects_negative_price() {
        let req = UpdateProductRequest {
            price: Some(-0.01),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_parses_camel_case_body() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{
                "code": "P-100",
                "name": "Desk Lamp",
                "price": 25.0,
                "quantity": 4,
                "inventoryStatus": "INSTOCK",
                "internalReference": "REF-9",
                "shellId": 7
            }"#,
        )
        .unwrap();
        assert_eq!(req.inventory_status, InventoryStatus::InStock);
        assert_eq!(req.internal_reference.as_deref(), Some("REF-9"));
        assert_eq!(req.shell_id, Some(7));
    }
}
