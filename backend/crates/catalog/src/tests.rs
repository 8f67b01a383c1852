//! Tests for the catalog crate
//!
//! The review ledger is exercised sequentially, under forced races through a
//! gated store, and over HTTP behind the identity gates.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use crate::application::CatalogConfig;
    use crate::domain::entity::product::{Product, ProductDetails};
    use crate::domain::repository::ProductRepository;

    pub fn config() -> Arc<CatalogConfig> {
        Arc::new(CatalogConfig::default())
    }

    pub fn details(name: &str) -> ProductDetails {
        ProductDetails {
            name: name.to_string(),
            description: "Noise cancelling".to_string(),
            brand: "Acoustics".to_string(),
            category: "Electronics".to_string(),
            image: "/images/headphones.jpg".to_string(),
            price: Decimal::new(8999, 2),
            quantity: 1,
            count_in_stock: 10,
        }
    }

    pub async fn seed<P: ProductRepository>(repo: &P, name: &str) -> Product {
        let product = Product::new(details(name));
        repo.create(&product).await.unwrap();
        product
    }
}

#[cfg(test)]
mod review_ledger_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Barrier;

    use super::support;
    use crate::application::{AddReviewInput, AddReviewUseCase, CatalogConfig};
    use crate::domain::entity::{product::Product, review::Review};
    use crate::domain::repository::ProductRepository;
    use crate::domain::value_object::{AccountId, ProductId, Rating};
    use crate::error::{CatalogError, CatalogResult};
    use crate::infra::memory::InMemoryProductRepository;

    fn input(product_id: ProductId, author_id: AccountId, rating: i64) -> AddReviewInput {
        AddReviewInput {
            product_id,
            author_id,
            author_name: "Grace".to_string(),
            rating: Some(rating),
            comment: "Solid build".to_string(),
        }
    }

    #[tokio::test]
    async fn test_second_review_by_same_author_is_rejected() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = support::seed(repo.as_ref(), "Headphones").await;
        let use_case = AddReviewUseCase::new(repo.clone(), support::config());
        let author = AccountId::new();

        let first = use_case
            .execute(input(product.product_id, author, 4))
            .await
            .unwrap();
        assert_eq!(first.num_reviews(), 1);

        let second = use_case.execute(input(product.product_id, author, 1)).await;
        assert!(matches!(second, Err(CatalogError::AlreadyReviewed)));

        let stored = repo.find_by_id(&product.product_id).await.unwrap().unwrap();
        assert_eq!(stored.num_reviews(), 1);
        assert_eq!(stored.rating(), 4.0);
    }

    #[tokio::test]
    async fn test_rating_is_mean_of_reviews() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = support::seed(repo.as_ref(), "Headphones").await;
        let use_case = AddReviewUseCase::new(repo.clone(), support::config());

        use_case
            .execute(input(product.product_id, AccountId::new(), 4))
            .await
            .unwrap();
        let updated = use_case
            .execute(input(product.product_id, AccountId::new(), 5))
            .await
            .unwrap();

        assert_eq!(updated.num_reviews(), 2);
        assert_eq!(updated.rating(), 4.5);
        assert_eq!(updated.reviews().len(), 2);
    }

    #[tokio::test]
    async fn test_validation_reports_rating_and_comment() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = support::seed(repo.as_ref(), "Headphones").await;
        let use_case = AddReviewUseCase::new(repo.clone(), support::config());

        let result = use_case
            .execute(AddReviewInput {
                rating: Some(6),
                comment: "   ".to_string(),
                ..input(product.product_id, AccountId::new(), 0)
            })
            .await;

        let Err(CatalogError::Validation(errors)) = result else {
            panic!("expected validation error, got {result:?}");
        };
        assert!(errors.has_field("rating"));
        assert!(errors.has_field("comment"));

        let missing = use_case
            .execute(AddReviewInput {
                rating: None,
                ..input(product.product_id, AccountId::new(), 0)
            })
            .await;
        assert!(matches!(missing, Err(CatalogError::Validation(e)) if e.has_field("rating")));

        let stored = repo.find_by_id(&product.product_id).await.unwrap().unwrap();
        assert_eq!(stored.num_reviews(), 0);
    }

    #[tokio::test]
    async fn test_review_for_unknown_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let use_case = AddReviewUseCase::new(repo, support::config());

        let result = use_case
            .execute(input(ProductId::new(), AccountId::new(), 3))
            .await;
        assert!(matches!(result, Err(CatalogError::ProductNotFound)));
    }

    /// Holds the first two loads at a barrier so both writers start from
    /// the same version
    #[derive(Clone)]
    struct RacingRepository {
        inner: InMemoryProductRepository,
        loads: Arc<AtomicUsize>,
        barrier: Arc<Barrier>,
    }

    impl RacingRepository {
        fn new(inner: InMemoryProductRepository) -> Self {
            Self {
                inner,
                loads: Arc::new(AtomicUsize::new(0)),
                barrier: Arc::new(Barrier::new(2)),
            }
        }
    }

    impl ProductRepository for RacingRepository {
        async fn create(&self, product: &Product) -> CatalogResult<()> {
            self.inner.create(product).await
        }

        async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<Product>> {
            let found = self.inner.find_by_id(product_id).await;
            if self.loads.fetch_add(1, Ordering::SeqCst) < 2 {
                self.barrier.wait().await;
            }
            found
        }

        async fn save_with_review(
            &self,
            product: &Product,
            review: &Review,
            expected_version: i64,
        ) -> CatalogResult<bool> {
            self.inner
                .save_with_review(product, review, expected_version)
                .await
        }

        async fn update_details(&self, product: &Product) -> CatalogResult<bool> {
            self.inner.update_details(product).await
        }

        async fn delete_by_id(&self, product_id: &ProductId) -> CatalogResult<bool> {
            self.inner.delete_by_id(product_id).await
        }

        async fn top_rated(&self, limit: usize) -> CatalogResult<Vec<Product>> {
            self.inner.top_rated(limit).await
        }
    }

    /// Lets another author's review land right before each of the first
    /// `interruptions` writes, so those writes always see a stale version
    #[derive(Clone)]
    struct ContendedRepository {
        inner: InMemoryProductRepository,
        interruptions: Arc<AtomicUsize>,
    }

    impl ContendedRepository {
        fn new(inner: InMemoryProductRepository, interruptions: usize) -> Self {
            Self {
                inner,
                interruptions: Arc::new(AtomicUsize::new(interruptions)),
            }
        }

        async fn land_competing_review(&self, product_id: &ProductId) {
            let mut current = self.inner.find_by_id(product_id).await.unwrap().unwrap();
            let expected = current.version();
            let review = Review::new(
                AccountId::new(),
                "Someone Else".to_string(),
                Rating::new(2).unwrap(),
                "Meh".to_string(),
            );
            current.add_review(review.clone()).unwrap();
            assert!(
                self.inner
                    .save_with_review(&current, &review, expected)
                    .await
                    .unwrap()
            );
        }
    }

    impl ProductRepository for ContendedRepository {
        async fn create(&self, product: &Product) -> CatalogResult<()> {
            self.inner.create(product).await
        }

        async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<Product>> {
            self.inner.find_by_id(product_id).await
        }

        async fn save_with_review(
            &self,
            product: &Product,
            review: &Review,
            expected_version: i64,
        ) -> CatalogResult<bool> {
            let interrupt = self
                .interruptions
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if interrupt {
                self.land_competing_review(&product.product_id).await;
            }
            self.inner
                .save_with_review(product, review, expected_version)
                .await
        }

        async fn update_details(&self, product: &Product) -> CatalogResult<bool> {
            self.inner.update_details(product).await
        }

        async fn delete_by_id(&self, product_id: &ProductId) -> CatalogResult<bool> {
            self.inner.delete_by_id(product_id).await
        }

        async fn top_rated(&self, limit: usize) -> CatalogResult<Vec<Product>> {
            self.inner.top_rated(limit).await
        }
    }

    #[tokio::test]
    async fn test_busy_product_still_accepts_first_review() {
        let inner = InMemoryProductRepository::new();
        let product = support::seed(&inner, "Headphones").await;
        let repo = Arc::new(ContendedRepository::new(inner.clone(), 5));
        let use_case = AddReviewUseCase::new(repo, support::config());
        let author = AccountId::new();

        let updated = use_case
            .execute(input(product.product_id, author, 5))
            .await
            .unwrap();

        assert!(updated.has_review_by(&author));
        assert_eq!(updated.num_reviews(), 6);
        assert_eq!(updated.version(), 6);

        let stored = inner.find_by_id(&product.product_id).await.unwrap().unwrap();
        assert_eq!(stored.num_reviews(), 6);
        // five 2-star reviews and one 5-star review
        assert_eq!(stored.rating(), 2.5);
    }

    #[tokio::test]
    async fn test_review_gives_up_at_deadline() {
        let inner = InMemoryProductRepository::new();
        let product = support::seed(&inner, "Headphones").await;
        let repo = Arc::new(ContendedRepository::new(inner.clone(), usize::MAX));
        let config = Arc::new(CatalogConfig {
            review_timeout: std::time::Duration::from_millis(50),
            ..CatalogConfig::default()
        });

        let result = AddReviewUseCase::new(repo, config)
            .execute(input(product.product_id, AccountId::new(), 5))
            .await;

        assert!(matches!(result, Err(CatalogError::StoreUnavailable(_))));
    }

    async fn race(
        repo: Arc<RacingRepository>,
        product_id: ProductId,
        authors: [AccountId; 2],
    ) -> Vec<CatalogResult<Product>> {
        let config = Arc::new(CatalogConfig::default());
        let handles: Vec<_> = authors
            .into_iter()
            .zip([4, 5])
            .map(|(author, rating)| {
                let use_case = AddReviewUseCase::new(repo.clone(), config.clone());
                tokio::spawn(async move { use_case.execute(input(product_id, author, rating)).await })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results
    }

    #[tokio::test]
    async fn test_concurrent_reviews_by_same_author_accept_one() {
        let inner = InMemoryProductRepository::new();
        let product = support::seed(&inner, "Headphones").await;
        let repo = Arc::new(RacingRepository::new(inner.clone()));
        let author = AccountId::new();

        let results = race(repo, product.product_id, [author, author]).await;

        let accepted = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(CatalogError::AlreadyReviewed)))
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(rejected, 1);

        let stored = inner.find_by_id(&product.product_id).await.unwrap().unwrap();
        assert_eq!(stored.num_reviews(), 1);
        assert_eq!(stored.version(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_reviews_by_different_authors_both_land() {
        let inner = InMemoryProductRepository::new();
        let product = support::seed(&inner, "Headphones").await;
        let repo = Arc::new(RacingRepository::new(inner.clone()));

        let results = race(repo, product.product_id, [AccountId::new(), AccountId::new()]).await;
        assert!(results.iter().all(|r| r.is_ok()));

        let stored = inner.find_by_id(&product.product_id).await.unwrap().unwrap();
        assert_eq!(stored.num_reviews(), 2);
        assert_eq!(stored.rating(), 4.5);
        assert_eq!(stored.version(), 2);
    }

    #[tokio::test]
    async fn test_stale_version_is_not_written() {
        let repo = InMemoryProductRepository::new();
        let product = support::seed(&repo, "Headphones").await;

        let mut updated = product.clone();
        let review = Review::new(
            AccountId::new(),
            "Grace".to_string(),
            Rating::new(3).unwrap(),
            "Fine".to_string(),
        );
        updated.add_review(review.clone()).unwrap();

        assert!(!repo.save_with_review(&updated, &review, 7).await.unwrap());
        assert!(repo.save_with_review(&updated, &review, 0).await.unwrap());
        assert!(!repo.save_with_review(&updated, &review, 0).await.unwrap());
    }
}

#[cfg(test)]
mod query_tests {
    use std::sync::Arc;

    use super::support;
    use crate::application::{AddReviewInput, AddReviewUseCase, CatalogConfig, ProductQueryUseCase};
    use crate::domain::value_object::{AccountId, ProductId};
    use crate::error::CatalogError;
    use crate::infra::memory::InMemoryProductRepository;

    #[tokio::test]
    async fn test_get_unknown_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let query = ProductQueryUseCase::new(repo, support::config());
        assert!(matches!(
            query.get(ProductId::new()).await,
            Err(CatalogError::ProductNotFound)
        ));
    }

    #[tokio::test]
    async fn test_top_rated_sorted_and_limited() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let config = Arc::new(CatalogConfig {
            top_rated_limit: 2,
            ..CatalogConfig::default()
        });
        let reviews = AddReviewUseCase::new(repo.clone(), config.clone());

        for (name, rating) in [("Low", 2), ("High", 5), ("Mid", 4)] {
            let product = support::seed(repo.as_ref(), name).await;
            reviews
                .execute(AddReviewInput {
                    product_id: product.product_id,
                    author_id: AccountId::new(),
                    author_name: "Grace".to_string(),
                    rating: Some(rating),
                    comment: "ok".to_string(),
                })
                .await
                .unwrap();
        }
        support::seed(repo.as_ref(), "Unrated").await;

        let top = ProductQueryUseCase::new(repo, config)
            .top_rated()
            .await
            .unwrap();
        let names: Vec<&str> = top.iter().map(|p| p.details.name.as_str()).collect();
        assert_eq!(names, ["High", "Mid"]);
    }
}

#[cfg(test)]
mod admin_tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::support;
    use crate::application::{
        AddReviewInput, AddReviewUseCase, DeleteProductUseCase, ProductInput,
        UpdateProductUseCase,
    };
    use crate::domain::repository::ProductRepository;
    use crate::domain::value_object::{AccountId, ProductId};
    use crate::error::CatalogError;
    use crate::infra::memory::InMemoryProductRepository;

    fn revised() -> ProductInput {
        ProductInput {
            name: "Studio Headphones".to_string(),
            description: "Flat response".to_string(),
            brand: "Acoustics".to_string(),
            category: "Audio".to_string(),
            image: "/images/studio.jpg".to_string(),
            price: Some(Decimal::new(12900, 2)),
            quantity: Some(2),
            count_in_stock: Some(3),
        }
    }

    #[tokio::test]
    async fn test_update_keeps_reviews_and_rating() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = support::seed(repo.as_ref(), "Headphones").await;
        AddReviewUseCase::new(repo.clone(), support::config())
            .execute(AddReviewInput {
                product_id: product.product_id,
                author_id: AccountId::new(),
                author_name: "Grace".to_string(),
                rating: Some(4),
                comment: "Good".to_string(),
            })
            .await
            .unwrap();

        let updated = UpdateProductUseCase::new(repo.clone())
            .execute(product.product_id, revised())
            .await
            .unwrap();

        assert_eq!(updated.details.name, "Studio Headphones");
        assert_eq!(updated.details.price, Decimal::new(12900, 2));
        assert_eq!(updated.num_reviews(), 1);
        assert_eq!(updated.rating(), 4.0);
        assert_eq!(updated.version(), 1);
        assert_eq!(updated.reviews()[0].comment, "Good");
    }

    #[tokio::test]
    async fn test_update_validates_and_requires_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = support::seed(repo.as_ref(), "Headphones").await;
        let use_case = UpdateProductUseCase::new(repo.clone());

        let invalid = use_case
            .execute(
                product.product_id,
                ProductInput {
                    name: " ".to_string(),
                    ..revised()
                },
            )
            .await;
        assert!(matches!(invalid, Err(CatalogError::Validation(e)) if e.has_field("name")));

        let stored = repo.find_by_id(&product.product_id).await.unwrap().unwrap();
        assert_eq!(stored.details.name, "Headphones");

        let missing = use_case.execute(ProductId::new(), revised()).await;
        assert!(matches!(missing, Err(CatalogError::ProductNotFound)));
    }

    #[tokio::test]
    async fn test_delete_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = support::seed(repo.as_ref(), "Headphones").await;
        let use_case = DeleteProductUseCase::new(repo.clone());

        let removed = use_case.execute(product.product_id).await.unwrap();
        assert_eq!(removed.details.name, "Headphones");
        assert!(repo.find_by_id(&product.product_id).await.unwrap().is_none());

        let again = use_case.execute(product.product_id).await;
        assert!(matches!(again, Err(CatalogError::ProductNotFound)));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use identity::domain::entity::account::Account;
    use identity::domain::repository::AccountRepository;
    use identity::domain::value_object::{
        display_name::DisplayName, email::Email, user_password::UserPassword,
    };
    use identity::{IdentityConfig, IdentityState, InMemoryAccountRepository};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support;
    use crate::application::CatalogConfig;
    use crate::domain::entity::product::Product;
    use crate::infra::memory::InMemoryProductRepository;
    use crate::presentation::{CatalogState, product_router};

    struct TestApp {
        router: Router,
        identity: IdentityState<InMemoryAccountRepository>,
        accounts: InMemoryAccountRepository,
        products: InMemoryProductRepository,
    }

    impl TestApp {
        fn new() -> Self {
            let accounts = InMemoryAccountRepository::new();
            let products = InMemoryProductRepository::new();
            let identity = IdentityState::new(accounts.clone(), IdentityConfig::development());
            let catalog = CatalogState::new(products.clone(), CatalogConfig::default());
            let router =
                Router::new().nest("/api/products", product_router(catalog, identity.clone()));
            Self {
                router,
                identity,
                accounts,
                products,
            }
        }

        /// Seeds an account and returns a session token for it
        async fn sign_in(&self, name: &str, is_admin: bool) -> String {
            // Tokens are issued directly; the password is never checked here
            let mut account = Account::new(
                Email::parse(&format!("{name}@example.com")).unwrap(),
                DisplayName::new(name).unwrap(),
                UserPassword::from_db("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA"),
            );
            account.is_admin = is_admin;
            self.accounts.create(&account).await.unwrap();
            self.identity.codec.issue(account.account_id).unwrap()
        }

        async fn product(&self) -> Product {
            support::seed(&self.products, "Headphones").await
        }

        async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
            let response = self.router.clone().oneshot(req).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, body)
        }
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn new_product() -> Value {
        json!({
            "name": "Desk Lamp",
            "description": "Warm light",
            "brand": "Lumen",
            "category": "Home",
            "image": "/images/lamp.jpg",
            "price": "45.50",
            "quantity": 2,
            "countInStock": 5
        })
    }

    #[tokio::test]
    async fn test_create_product_requires_admin() {
        let app = TestApp::new();
        let user = app.sign_in("grace", false).await;
        let admin = app.sign_in("root", true).await;

        let (status, _) = app
            .send(request("POST", "/api/products", None, new_product()))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app
            .send(request("POST", "/api/products", Some(&user), new_product()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "Not authorized as an admin");

        let (status, body) = app
            .send(request("POST", "/api/products", Some(&admin), new_product()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Desk Lamp");
        assert_eq!(body["price"], "45.50");
        assert_eq!(body["numReviews"], 0);
        assert_eq!(body["reviews"], json!([]));
    }

    #[tokio::test]
    async fn test_create_product_lists_every_violation() {
        let app = TestApp::new();
        let admin = app.sign_in("root", true).await;

        let (status, body) = app
            .send(request(
                "POST",
                "/api/products",
                Some(&admin),
                json!({ "name": "Desk Lamp", "price": 0 }),
            ))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<&str> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert!(!fields.contains(&"name"));
        for field in ["image", "description", "category", "brand", "price", "quantity", "countInStock"] {
            assert!(fields.contains(&field), "missing {field} in {fields:?}");
        }
    }

    #[tokio::test]
    async fn test_review_flow_over_http() {
        let app = TestApp::new();
        let product = app.product().await;
        let token = app.sign_in("grace", false).await;
        let uri = format!("/api/products/{}/reviews", product.product_id);
        let review = json!({ "rating": 4, "comment": "Comfortable" });

        let (status, _) = app.send(request("POST", &uri, None, review.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app
            .send(request("POST", &uri, Some(&token), review.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Review added");

        let (status, body) = app.send(request("POST", &uri, Some(&token), review)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "Product already reviewed");

        let (status, body) = app
            .send(get(&format!("/api/products/{}", product.product_id)))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["numReviews"], 1);
        assert_eq!(body["rating"], 4.0);
        assert_eq!(body["reviews"][0]["name"], "grace");
        assert_eq!(body["reviews"][0]["comment"], "Comfortable");
    }

    #[tokio::test]
    async fn test_review_rejections() {
        let app = TestApp::new();
        let product = app.product().await;
        let token = app.sign_in("grace", false).await;

        let (status, body) = app
            .send(request(
                "POST",
                &format!("/api/products/{}/reviews", product.product_id),
                Some(&token),
                json!({ "rating": 9 }),
            ))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"].as_array().unwrap().len(), 2);

        let (status, _) = app
            .send(request(
                "POST",
                "/api/products/not-a-uuid/reviews",
                Some(&token),
                json!({ "rating": 3, "comment": "ok" }),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send(request(
                "POST",
                &format!("/api/products/{}/reviews", uuid::Uuid::new_v4()),
                Some(&token),
                json!({ "rating": 3, "comment": "ok" }),
            ))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_and_delete_require_admin() {
        let app = TestApp::new();
        let product = app.product().await;
        let user = app.sign_in("grace", false).await;
        let uri = format!("/api/products/{}", product.product_id);

        for method in ["PUT", "DELETE"] {
            let (status, _) = app.send(request(method, &uri, None, new_product())).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} without token");

            let (status, _) = app
                .send(request(method, &uri, Some(&user), new_product()))
                .await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{method} as customer");
        }

        let (status, body) = app.send(get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Headphones");
    }

    #[tokio::test]
    async fn test_admin_update_preserves_rating() {
        let app = TestApp::new();
        let product = app.product().await;
        let user = app.sign_in("grace", false).await;
        let admin = app.sign_in("root", true).await;
        let uri = format!("/api/products/{}", product.product_id);

        let (status, _) = app
            .send(request(
                "POST",
                &format!("{uri}/reviews"),
                Some(&user),
                json!({ "rating": 5, "comment": "Great" }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app
            .send(request("PUT", &uri, Some(&admin), new_product()))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Desk Lamp");
        assert_eq!(body["numReviews"], 1);
        assert_eq!(body["rating"], 5.0);
        assert_eq!(body["reviews"][0]["comment"], "Great");

        let (status, body) = app
            .send(request("PUT", &uri, Some(&admin), json!({ "name": "Desk Lamp" })))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"].as_array().unwrap().len() > 1);
    }

    #[tokio::test]
    async fn test_admin_delete() {
        let app = TestApp::new();
        let product = app.product().await;
        let admin = app.sign_in("root", true).await;
        let uri = format!("/api/products/{}", product.product_id);

        let (status, body) = app
            .send(request("DELETE", &uri, Some(&admin), Value::Null))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Headphones");
        assert_eq!(body["message"], "Product Headphones has been deleted.");

        let (status, _) = app.send(get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .send(request("DELETE", &uri, Some(&admin), Value::Null))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_public_reads() {
        let app = TestApp::new();
        let product = app.product().await;

        let (status, body) = app.send(get("/api/products/top")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], product.product_id.to_string());

        let (status, _) = app.send(get("/api/products/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send(get(&format!("/api/products/{}", uuid::Uuid::new_v4())))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Product not found");
    }
}
