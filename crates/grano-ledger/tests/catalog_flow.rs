//! Catalog and customer services: lifecycle, validation and the soft
//! active flag, on both backends.

mod common;

use common::{all_shops, coffee_input, seed_product};
use grano_core::{CustomerKind, ValidationError};
use grano_ledger::{CustomerInput, LedgerError};

#[tokio::test]
async fn add_then_update_product() {
    for shop in all_shops().await {
        let tag = shop.backend_tag();
        let beans = seed_product(&shop, coffee_input("HON-1KG", "1 kg", 10_000, 6_000, 10)).await;
        assert!(beans.is_active);

        let mut changed = coffee_input("HON-1KG", "1 kg", 11_200, 6_400, 14);
        changed.name = "Café Honduras Reserva".to_string();
        let updated = shop.catalog().update_product(&beans.id, changed).await.unwrap();

        assert_eq!(updated.id, beans.id, "backend {tag}");
        assert_eq!(updated.name, "Café Honduras Reserva");
        assert_eq!(updated.unit_price, 11_200);
        assert_eq!(updated.stock_qty, 14);
        assert_eq!(updated.created_at, beans.created_at);

        let fetched = shop.catalog().get_product(&beans.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Café Honduras Reserva", "backend {tag}");
    }
}

#[tokio::test]
async fn product_input_is_validated() {
    for shop in all_shops().await {
        let blank_sku = coffee_input("   ", "1 kg", 10_000, 6_000, 10);
        let err = shop.catalog().add_product(blank_sku).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::Required { field: "sku" })
        ));

        let negative_price = coffee_input("HON-1KG", "1 kg", -5, 6_000, 10);
        let err = shop.catalog().add_product(negative_price).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::Negative { field: "unitPrice" })
        ));

        let negative_stock = coffee_input("HON-1KG", "1 kg", 10_000, 6_000, -1);
        let err = shop.catalog().add_product(negative_stock).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::Negative { field: "stockQty" })
        ));

        // Nothing was admitted into the catalog.
        assert!(shop.catalog().list_products().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn duplicate_sku_is_rejected() {
    for shop in all_shops().await {
        let tag = shop.backend_tag();
        seed_product(&shop, coffee_input("HON-1KG", "1 kg", 10_000, 6_000, 10)).await;

        let err = shop
            .catalog()
            .add_product(coffee_input("HON-1KG", "425 g", 5_200, 3_100, 4))
            .await
            .unwrap_err();
        assert!(
            matches!(err, LedgerError::Store(_)),
            "backend {tag}: {err:?}"
        );
        assert_eq!(shop.catalog().list_products().await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn deactivation_hides_from_the_active_list_only() {
    for shop in all_shops().await {
        let tag = shop.backend_tag();
        let beans = seed_product(&shop, coffee_input("HON-1KG", "1 kg", 10_000, 6_000, 10)).await;
        seed_product(&shop, coffee_input("HON-425", "425 g", 5_200, 3_100, 4)).await;

        shop.catalog().deactivate(&beans.id).await.unwrap();

        let active = shop.catalog().active_products().await.unwrap();
        assert_eq!(active.len(), 1, "backend {tag}");
        assert_eq!(active[0].sku, "HON-425");
        assert_eq!(shop.catalog().list_products().await.unwrap().len(), 2);

        shop.catalog().reactivate(&beans.id).await.unwrap();
        assert_eq!(shop.catalog().active_products().await.unwrap().len(), 2);
    }
}

#[tokio::test]
async fn updating_a_missing_product_errors() {
    for shop in all_shops().await {
        let err = shop
            .catalog()
            .update_product("ghost", coffee_input("X-1", "1 kg", 1_000, 500, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ProductNotFound { ref id } if id == "ghost"));
    }
}

#[tokio::test]
async fn customers_are_validated_and_listed_by_name() {
    for shop in all_shops().await {
        let tag = shop.backend_tag();

        let err = shop
            .customers()
            .add_customer(CustomerInput {
                name: "  ".to_string(),
                kind: CustomerKind::Consumer,
                contact: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::Required { field: "name" })
        ));

        shop.customers()
            .add_customer(CustomerInput {
                name: "Zulma".to_string(),
                kind: CustomerKind::Consumer,
                contact: None,
            })
            .await
            .unwrap();
        shop.customers()
            .add_customer(CustomerInput {
                name: "Ana".to_string(),
                kind: CustomerKind::Partner,
                contact: Some("@ana.fit".to_string()),
            })
            .await
            .unwrap();

        let customers = shop.customers().list_customers().await.unwrap();
        assert_eq!(customers.len(), 2, "backend {tag}");
        assert_eq!(customers[0].name, "Ana");
        assert_eq!(customers[0].kind, CustomerKind::Partner);
        assert_eq!(customers[1].name, "Zulma");
    }
}
