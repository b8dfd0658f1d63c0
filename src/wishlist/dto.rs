use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::products::repo::Product;

/// Body for `POST /api/wishlist`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWishlistRequest {
    pub product_id: Uuid,
}

/// The wishlist as returned to the client; empty shape when nothing is saved.
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_request_parses_camel_case_body() {
        let req: AddWishlistRequest =
            serde_json::from_str(r#"{"productId":"19b7e9d2-51cc-4f4d-9c1a-0a8a3e5b2f10"}"#)
                .unwrap();
        assert_eq!(
            req.product_id.to_string(),
            "19b7e9d2-51cc-4f4d-9c1a-0a8a3e5b2f10"
        );
    }

    #[test]
    fn empty_wishlist_serializes_to_an_empty_product_list() {
        let json = serde_json::to_string(&WishlistResponse { products: vec![] }).unwrap();
        assert_eq!(json, r#"{"products":[]}"#);
    }
}
