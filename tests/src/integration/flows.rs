//! # Integration Test Flows
//!
//! Drives the gateway router over a directory seeded from fixtures, with
//! the real verifier and matcher in between.
//!
//! ## Flows Tested:
//!
//! 1. **Proxy authentication**: signed target embedded in `/authenticate`
//! 2. **Authorization**: wildcard candidates against the seeded policies
//! 3. **Admin writes**: secret rotation, policy changes and consumer removal
//!    take effect on the next call

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use authz_01_signature_verification::SignedRequest;
    use authz_03_api_gateway::{ApiGatewayService, GatewayConfig};
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::Router;
    use node_runtime::adapters::{DirectoryFixtures, InMemoryDirectory};
    use node_runtime::container::SubsystemContainer;
    use shared_types::{Action, ActionSet, ConsumerUpdate, NewConsumer, Policy, PolicyUpdate};
    use tower::ServiceExt;

    use crate::integration::{
        authenticate_call, authorize_call, sign, XYZ_FIXTURES, XYZ_KEY, XYZ_SECRET,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn seeded_directory() -> Arc<InMemoryDirectory> {
        let directory = Arc::new(InMemoryDirectory::new());
        DirectoryFixtures::from_json(XYZ_FIXTURES)
            .unwrap()
            .apply(&directory)
            .unwrap();
        directory
    }

    fn router_over(directory: Arc<InMemoryDirectory>) -> Router {
        let container = SubsystemContainer::with_directory(directory);
        ApiGatewayService::new(
            GatewayConfig::default(),
            container.verification_api(),
            container.matching_api(),
        )
        .unwrap()
        .router()
    }

    async fn status_of(router: &Router, request: axum::http::Request<axum::body::Body>) -> StatusCode {
        router.clone().oneshot(request).await.unwrap().status()
    }

    // =============================================================================
    // PROXY AUTHENTICATION
    // =============================================================================

    #[tokio::test]
    async fn test_signed_target_returns_identity() {
        let router = router_over(seeded_directory());
        let signed = sign(
            XYZ_KEY,
            XYZ_SECRET,
            SignedRequest::new("GET", "https://api.pbs.org/v1/station/utmedia?fields=name&page=1"),
        );

        let response = router.oneshot(authenticate_call(&signed)).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let identity: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(identity, serde_json::json!({"key": "XYZ", "name": "PBS"}));
    }

    #[tokio::test]
    async fn test_signature_from_other_consumer_secret_fails() {
        let router = router_over(seeded_directory());
        let signed = sign(
            XYZ_KEY,
            "other-secret",
            SignedRequest::new("GET", "https://api.pbs.org/v1/station/utmedia"),
        );
        assert_eq!(
            status_of(&router, authenticate_call(&signed)).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_target_url_normalization_is_tolerated() {
        let router = router_over(seeded_directory());
        let mut signed = sign(
            XYZ_KEY,
            XYZ_SECRET,
            SignedRequest::new("GET", "https://api.pbs.org/v1/shows"),
        );
        // Same resource after normalization: scheme/host case, default port.
        signed.url = "HTTPS://API.PBS.ORG:443/v1/shows".to_string();
        assert_eq!(
            status_of(&router, authenticate_call(&signed)).await,
            StatusCode::ACCEPTED
        );
    }

    #[tokio::test]
    async fn test_replayed_request_still_verifies() {
        let router = router_over(seeded_directory());
        let signed = sign(
            XYZ_KEY,
            XYZ_SECRET,
            SignedRequest::new("DELETE", "https://api.pbs.org/v1/station/kqed"),
        );
        for _ in 0..3 {
            assert_eq!(
                status_of(&router, authenticate_call(&signed)).await,
                StatusCode::ACCEPTED
            );
        }
    }

    // =============================================================================
    // AUTHORIZATION
    // =============================================================================

    #[tokio::test]
    async fn test_xyz_scenario() {
        let router = router_over(seeded_directory());
        let cases = [
            ("PUT", XYZ_KEY, "station/utmedia", StatusCode::ACCEPTED),
            ("POST", XYZ_KEY, "topic/science-technology", StatusCode::FORBIDDEN),
            ("GET", XYZ_KEY, "program", StatusCode::INTERNAL_SERVER_ERROR),
            ("GET", "unknown", "station/utmedia", StatusCode::UNAUTHORIZED),
            ("GET", "ABC", "station/utmedia", StatusCode::FORBIDDEN),
        ];
        for (method, key, path, expected) in cases {
            assert_eq!(
                status_of(&router, authorize_call(method, key, "pbs:api", path)).await,
                expected,
                "{method} {key} {path}"
            );
        }
    }

    #[tokio::test]
    async fn test_authenticate_then_authorize() {
        let router = router_over(seeded_directory());
        let signed = sign(
            XYZ_KEY,
            XYZ_SECRET,
            SignedRequest::new("PUT", "https://api.pbs.org/station/utmedia"),
        );

        let response = router
            .clone()
            .oneshot(authenticate_call(&signed))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let identity: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let key = identity["key"].as_str().unwrap();

        assert_eq!(
            status_of(&router, authorize_call("PUT", key, "pbs:api", "station/utmedia")).await,
            StatusCode::ACCEPTED
        );
    }

    // =============================================================================
    // ADMIN WRITES
    // =============================================================================

    #[tokio::test]
    async fn test_secret_rotation_invalidates_old_signatures() {
        let directory = seeded_directory();
        let router = router_over(directory.clone());
        let signed = sign(
            XYZ_KEY,
            XYZ_SECRET,
            SignedRequest::new("GET", "https://api.pbs.org/v1/shows"),
        );
        assert_eq!(
            status_of(&router, authenticate_call(&signed)).await,
            StatusCode::ACCEPTED
        );

        directory
            .update_consumer(
                XYZ_KEY,
                &ConsumerUpdate {
                    name: None,
                    secret: Some("rotated-secret".into()),
                },
            )
            .unwrap();

        assert_eq!(
            status_of(&router, authenticate_call(&signed)).await,
            StatusCode::UNAUTHORIZED
        );
        let resigned = sign(
            XYZ_KEY,
            "rotated-secret",
            SignedRequest::new("GET", "https://api.pbs.org/v1/shows"),
        );
        assert_eq!(
            status_of(&router, authenticate_call(&resigned)).await,
            StatusCode::ACCEPTED
        );
    }

    #[tokio::test]
    async fn test_policy_changes_apply_immediately() {
        let directory = seeded_directory();
        let router = router_over(directory.clone());
        let station = "rid:pbs:api:station/*".parse().unwrap();

        directory
            .update_policy(
                XYZ_KEY,
                &station,
                &PolicyUpdate {
                    actions: ActionSet::new([Action::Get]).unwrap(),
                },
            )
            .unwrap();
        assert_eq!(
            status_of(&router, authorize_call("PUT", XYZ_KEY, "pbs:api", "station/utmedia")).await,
            StatusCode::FORBIDDEN
        );

        directory
            .upsert_policy(Policy::new(
                XYZ_KEY,
                "rid:pbs:api:station/utmedia".parse().unwrap(),
                ActionSet::new([Action::Put]).unwrap(),
            ))
            .unwrap();
        assert_eq!(
            status_of(&router, authorize_call("PUT", XYZ_KEY, "pbs:api", "station/utmedia")).await,
            StatusCode::ACCEPTED
        );
    }

    #[tokio::test]
    async fn test_new_consumer_can_authenticate() {
        let directory = seeded_directory();
        let router = router_over(directory.clone());
        let consumer = directory
            .create_consumer(NewConsumer::named("Newcomer"))
            .unwrap();

        let signed = sign(
            &consumer.key,
            &consumer.secret,
            SignedRequest::new("POST", "https://api.pbs.org/v1/things")
                .with_header("Content-Type", "application/x-www-form-urlencoded")
                .with_body("a=1&b=two+words"),
        );
        assert_eq!(
            status_of(&router, authenticate_call(&signed)).await,
            StatusCode::ACCEPTED
        );
    }

    #[tokio::test]
    async fn test_deleted_consumer_is_unauthenticated_everywhere() {
        let directory = seeded_directory();
        let router = router_over(directory.clone());
        directory.delete_consumer(XYZ_KEY).unwrap();

        let signed = sign(
            XYZ_KEY,
            XYZ_SECRET,
            SignedRequest::new("GET", "https://api.pbs.org/v1/shows"),
        );
        assert_eq!(
            status_of(&router, authenticate_call(&signed)).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(&router, authorize_call("GET", XYZ_KEY, "pbs:api", "station/utmedia")).await,
            StatusCode::UNAUTHORIZED
        );
        assert!(directory.policies_for(XYZ_KEY).is_empty());
    }
}
