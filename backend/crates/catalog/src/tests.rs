//! Use case and HTTP tests for the catalog crate

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use kernel::id::ProductId;
    use rust_decimal::Decimal;

    use crate::application::{AddShoeInput, AddShoeUseCase, AdjustStockUseCase, ListShoesUseCase};
    use crate::domain::entity::product::StockPolicy;
    use crate::domain::entity::shoe::ShoeCategory;
    use crate::domain::repository::ProductRepository;
    use crate::error::CatalogError;
    use crate::infra::memory::InMemoryProductRepository;

    fn running_shoe(stock: i64) -> AddShoeInput {
        AddShoeInput {
            name: "Air X".into(),
            brand: "Nike".into(),
            price: Decimal::new(9999, 2),
            stock,
            category: Some("athletic".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let first = AddShoeUseCase::new(repo.clone())
            .execute(running_shoe(5))
            .await
            .unwrap();
        let second = AddShoeUseCase::new(repo.clone())
            .execute(AddShoeInput {
                name: "Oxford".into(),
                price: Decimal::new(150, 0),
                category: Some("formal".into()),
                material: Some("suede".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(first, ProductId::new(1));
        assert_eq!(second, ProductId::new(2));

        let shoes = ListShoesUseCase::new(repo).execute().await.unwrap();
        assert_eq!(shoes.len(), 2);
        assert_eq!(shoes[0].product().id(), Some(first));
        assert_eq!(shoes[0].category(), ShoeCategory::Athletic);
        assert_eq!(shoes[1].variant().detail(), "suede");
    }

    #[tokio::test]
    async fn test_invalid_shoe_is_not_stored() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let err = AddShoeUseCase::new(repo.clone())
            .execute(running_shoe(-1))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_adjust_stock_policies() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let id = AddShoeUseCase::new(repo.clone())
            .execute(running_shoe(3))
            .await
            .unwrap();
        let adjust = AdjustStockUseCase::new(repo.clone());

        assert_eq!(adjust.execute(id, -2, StockPolicy::Reject).await.unwrap(), 1);

        let err = adjust.execute(id, -5, StockPolicy::Reject).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.product().stock(), 1);

        assert_eq!(adjust.execute(id, -5, StockPolicy::Clamp).await.unwrap(), 0);
        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert!(!stored.product().in_stock());
    }

    #[tokio::test]
    async fn test_adjust_stock_unknown_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let err = AdjustStockUseCase::new(repo)
            .execute(ProductId::new(42), 1, StockPolicy::Reject)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use auth::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
    use auth::{AuthConfig, InMemoryUserRepository, TokenService};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::infra::memory::InMemoryProductRepository;
    use crate::presentation::router::catalog_router_generic;

    struct Fixture {
        app: Router,
        users: Arc<InMemoryUserRepository>,
        config: Arc<AuthConfig>,
        tokens: Arc<TokenService>,
    }

    impl Fixture {
        fn new() -> Self {
            let config = AuthConfig::with_random_secret();
            let tokens = Arc::new(TokenService::new(&config));
            let app = catalog_router_generic(
                Arc::new(InMemoryProductRepository::new()),
                tokens.clone(),
            );
            Self {
                app,
                users: Arc::new(InMemoryUserRepository::new()),
                config: Arc::new(config),
                tokens,
            }
        }

        async fn token_for(&self, username: &str, role: &str) -> String {
            RegisterUseCase::new(self.users.clone(), self.config.clone())
                .execute(RegisterInput {
                    username: username.to_string(),
                    password: "pw".to_string(),
                    email: None,
                    role: Some(role.to_string()),
                })
                .await
                .unwrap();

            LoginUseCase::new(self.users.clone(), self.config.clone(), self.tokens.clone())
                .execute(LoginInput {
                    username: username.to_string(),
                    password: "pw".to_string(),
                })
                .await
                .unwrap()
                .token
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, body)
        }
    }

    fn post_shoe(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn list() -> Request<Body> {
        Request::builder().uri("/shoes").body(Body::empty()).unwrap()
    }

    fn form_body() -> Value {
        json!({
            "name": "Air X",
            "brand": "Nike",
            "price": "99.99",
            "size": "9",
            "stock": "5",
            "color": "Red",
            "category": "athletic",
            "sport_type": ""
        })
    }

    #[tokio::test]
    async fn test_list_starts_empty() {
        let fx = Fixture::new();
        let (status, body) = fx.send(list()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_requires_token() {
        let fx = Fixture::new();
        let (status, _) = fx.send(post_shoe("/shoes", None, form_body())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = fx
            .send(post_shoe("/shoes", Some("not-a-token"), form_body()))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() {
        let fx = Fixture::new();
        let token = fx.token_for("alice", "customer").await;

        let (status, _) = fx
            .send(post_shoe("/shoes", Some(&token), form_body()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, body) = fx.send(list()).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_admin_creates_and_lists() {
        let fx = Fixture::new();
        let token = fx.token_for("bob", "admin").await;

        let (status, body) = fx
            .send(post_shoe("/shoes", Some(&token), form_body()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Shoe added successfully");
        assert_eq!(body["shoe_id"], 1);

        let (status, body) = fx.send(list()).await;
        assert_eq!(status, StatusCode::OK);

        let shoe = &body[0];
        assert_eq!(shoe["id"], 1);
        assert_eq!(shoe["name"], "Air X");
        assert_eq!(shoe["price"], 99.99);
        assert_eq!(shoe["stock"], 5);
        assert_eq!(shoe["category"], "athletic");
        assert_eq!(shoe["attributes"]["sport_type"], "running");
        assert_eq!(shoe["attributes"]["size"], "9");
    }

    #[tokio::test]
    async fn test_api_prefix_accepts_creation() {
        let fx = Fixture::new();
        let token = fx.token_for("bob", "admin").await;

        let (status, body) = fx
            .send(post_shoe(
                "/api/shoes",
                Some(&token),
                json!({"name": "Oxford", "price": 180, "type": "formal"}),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["shoe_id"], 1);

        let (_, body) = fx.send(list()).await;
        assert_eq!(body[0]["category"], "formal");
        assert_eq!(body[0]["attributes"]["material"], "leather");
    }

    #[tokio::test]
    async fn test_admin_validation_errors() {
        let fx = Fixture::new();
        let token = fx.token_for("bob", "admin").await;

        let (status, body) = fx
            .send(post_shoe("/shoes", Some(&token), json!({"brand": "Nike"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Name and price are required");

        let (status, _) = fx
            .send(post_shoe(
                "/shoes",
                Some(&token),
                json!({"name": "Air X", "price": -5}),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = fx
            .send(post_shoe(
                "/shoes",
                Some(&token),
                json!({"name": "Air X", "price": 5, "category": "slipper"}),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_price_outside_column_range_is_rejected() {
        let fx = Fixture::new();
        let token = fx.token_for("bob", "admin").await;

        for price in ["19.999", "10000000000"] {
            let (status, _) = fx
                .send(post_shoe(
                    "/shoes",
                    Some(&token),
                    json!({"name": "Air X", "price": price}),
                ))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{price}");
        }

        let (_, body) = fx.send(list()).await;
        assert_eq!(body, json!([]));
    }
}
