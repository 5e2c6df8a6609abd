//! HTTP handler integration tests
//!
//! Verifies each endpoint's wire contract: status codes, error body shapes,
//! validation ordering, and the canned degraded responses.

#[cfg(test)]
mod tests {
    use crate::common::aws::{
        mock_configuration, mock_model_failure, mock_model_success, mock_start_session,
    };
    use crate::common::{strategy_json, test_config};
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use tiered_gateway::config::{Config, GatewayRole};
    use tiered_gateway::core::TieredRouter;
    use tiered_gateway::server::AppState;
    use tiered_gateway::server::routes::invoke::configure_routes;
    use wiremock::MockServer;

    fn app_state(config: &Config) -> web::Data<AppState> {
        let router = TieredRouter::new(config).unwrap();
        web::Data::new(AppState::new(config.clone(), router))
    }

    /// Offline configuration: endpoints that answer nothing, for handlers
    /// that must not need the network
    fn offline_config() -> Config {
        test_config("http://127.0.0.1:1", "http://127.0.0.1:1")
    }

    /// The degraded tier answers 200 with the exact canned string per use
    /// case, and the default string for anything unrecognized
    #[actix_web::test]
    async fn degraded_returns_the_exact_canned_responses() {
        let state = app_state(&offline_config());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let cases = [
            (
                "general",
                "I'm sorry, but I'm currently experiencing technical difficulties. \
                 Please try again later or contact customer service for immediate assistance.",
            ),
            (
                "product_question",
                "I apologize, but I can't access product information right now. \
                 Please refer to our product documentation or contact customer service \
                 at 1-800-555-1234.",
            ),
            (
                "account_inquiry",
                "I'm unable to process account inquiries at the moment. \
                 For urgent matters, please call our customer service line at 1-800-555-1234.",
            ),
            (
                "anything_else",
                "I'm sorry, but I'm currently experiencing technical difficulties. \
                 Please try again later.",
            ),
        ];

        for (use_case, expected) in cases {
            let req = test::TestRequest::post()
                .uri("/v1/invoke/degraded")
                .set_json(json!({ "prompt": "", "use_case": use_case }))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), 200, "use case {}", use_case);

            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["model_used"], "DEGRADED_SERVICE");
            assert_eq!(body["use_case"], use_case);
            assert_eq!(body["response"], expected);
        }
    }

    /// An empty prompt is rejected by the primary tier before any remote
    /// call is attempted
    #[actix_web::test]
    async fn primary_rejects_an_empty_prompt_without_remote_calls() {
        let bedrock = MockServer::start().await;
        let appconfig = MockServer::start().await;
        let config = test_config(&bedrock.uri(), &appconfig.uri());

        let app = test::init_service(
            App::new()
                .app_data(app_state(&config))
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/invoke/primary")
            .set_json(json!({ "prompt": "" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Prompt is required");

        assert!(bedrock.received_requests().await.unwrap().is_empty());
        assert!(appconfig.received_requests().await.unwrap().is_empty());
    }

    /// The primary tier accepts the API-gateway envelope shape
    #[actix_web::test]
    async fn primary_unwraps_an_enveloped_event() {
        let bedrock = MockServer::start().await;
        mock_model_success(&bedrock, "amazon.nova-lite-v1:0", "nova answer").await;

        let appconfig = MockServer::start().await;
        mock_start_session(&appconfig, "tok-0").await;
        mock_configuration(
            &appconfig,
            "tok-0",
            "tok-1",
            Some(&strategy_json("amazon.nova-lite-v1:0", &[])),
        )
        .await;

        let config = test_config(&bedrock.uri(), &appconfig.uri());
        let app = test::init_service(
            App::new()
                .app_data(app_state(&config))
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/invoke/primary")
            .set_json(json!({
                "body": "{\"prompt\": \"hello\", \"use_case\": \"general\"}",
                "httpMethod": "POST",
                "path": "/invoke"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["model_used"], "amazon.nova-lite-v1:0");
        assert_eq!(body["response"], "nova answer");
    }

    /// A malformed envelope body surfaces as a primary tier failure, not a
    /// client error (the orchestrator owns the retry decision)
    #[actix_web::test]
    async fn primary_reports_a_malformed_envelope_as_tier_failure() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(&offline_config()))
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/invoke/primary")
            .set_json(json!({ "body": "not json" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 502);

        let body: Value = test::read_body_json(res).await;
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Primary model failed: "), "{}", error);
    }

    /// A primary model failure turns into a 502 so the orchestrator can
    /// advance the chain
    #[actix_web::test]
    async fn primary_surfaces_model_failure_as_bad_gateway() {
        let bedrock = MockServer::start().await;
        mock_model_failure(&bedrock, "amazon.nova-lite-v1:0").await;

        let appconfig = MockServer::start().await;
        mock_start_session(&appconfig, "tok-0").await;
        mock_configuration(
            &appconfig,
            "tok-0",
            "tok-1",
            Some(&strategy_json("amazon.nova-lite-v1:0", &[])),
        )
        .await;

        let config = test_config(&bedrock.uri(), &appconfig.uri());
        let app = test::init_service(
            App::new()
                .app_data(app_state(&config))
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/invoke/primary")
            .set_json(json!({ "prompt": "hi" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 502);

        let body: Value = test::read_body_json(res).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Primary model failed: ")
        );
    }

    /// The fallback tier accepts an empty prompt and forwards it
    #[actix_web::test]
    async fn fallback_accepts_an_empty_prompt() {
        let bedrock = MockServer::start().await;
        mock_model_success(&bedrock, "amazon.titan-text-express-v1", "titan answer").await;

        let config = test_config(&bedrock.uri(), "http://127.0.0.1:1");
        let app = test::init_service(
            App::new()
                .app_data(app_state(&config))
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/invoke/fallback")
            .set_json(json!({ "prompt": "" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["model_used"], "FALLBACK:amazon.titan-text-express-v1");
        assert_eq!(body["use_case"], "general");
    }

    /// The self-contained endpoint validates the body and the prompt with
    /// distinct client errors
    #[actix_web::test]
    async fn invoke_validates_body_and_prompt() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(&offline_config()))
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let empty = test::TestRequest::post().uri("/v1/invoke").to_request();
        let res = test::call_service(&app, empty).await;
        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Request body is required");

        let no_prompt = test::TestRequest::post()
            .uri("/v1/invoke")
            .set_json(json!({ "use_case": "general" }))
            .to_request();
        let res = test::call_service(&app, no_prompt).await;
        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Prompt is required");
    }

    /// A body that is not JSON keeps its historical classification as an
    /// internal error rather than a client error
    #[actix_web::test]
    async fn invoke_reports_unparseable_bodies_as_internal() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(&offline_config()))
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/invoke")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 500);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Internal server error");
    }

    /// Self-contained equivalent of the chained walk: primary fails, the
    /// fallback model answers, the reply names the model that served it
    #[actix_web::test]
    async fn invoke_falls_back_within_a_single_request() {
        let bedrock = MockServer::start().await;
        mock_model_failure(&bedrock, "amazon.nova-lite-v1:0").await;
        mock_model_success(&bedrock, "amazon.titan-text-express-v1", "rescued").await;

        let appconfig = MockServer::start().await;
        mock_start_session(&appconfig, "tok-0").await;
        mock_configuration(
            &appconfig,
            "tok-0",
            "tok-1",
            Some(&strategy_json(
                "amazon.nova-lite-v1:0",
                &["amazon.titan-text-express-v1"],
            )),
        )
        .await;

        let config = test_config(&bedrock.uri(), &appconfig.uri());
        let app = test::init_service(
            App::new()
                .app_data(app_state(&config))
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/invoke")
            .set_json(json!({ "prompt": "hi", "use_case": "general" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["model_used"], "amazon.titan-text-express-v1");
        assert_eq!(body["use_case"], "general");
        assert_eq!(body["response"], "rescued");
    }

    /// When every candidate fails the endpoint answers 503 with the last
    /// failure in the message
    #[actix_web::test]
    async fn invoke_answers_service_unavailable_on_exhaustion() {
        let bedrock = MockServer::start().await;
        mock_model_failure(&bedrock, "amazon.nova-lite-v1:0").await;

        let appconfig = MockServer::start().await;
        mock_start_session(&appconfig, "tok-0").await;
        mock_configuration(
            &appconfig,
            "tok-0",
            "tok-1",
            Some(&strategy_json("amazon.nova-lite-v1:0", &[])),
        )
        .await;

        let config = test_config(&bedrock.uri(), &appconfig.uri());
        let app = test::init_service(
            App::new()
                .app_data(app_state(&config))
                .configure(|cfg| configure_routes(cfg, GatewayRole::All)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/invoke")
            .set_json(json!({ "prompt": "hi" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 503);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "All models unavailable");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    /// A role-scoped instance only mounts its own route
    #[actix_web::test]
    async fn role_scoping_hides_the_other_tiers() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(&offline_config()))
                .configure(|cfg| configure_routes(cfg, GatewayRole::Degraded)),
        )
        .await;

        let degraded = test::TestRequest::post()
            .uri("/v1/invoke/degraded")
            .set_json(json!({ "use_case": "general" }))
            .to_request();
        assert_eq!(test::call_service(&app, degraded).await.status(), 200);

        for uri in ["/v1/invoke", "/v1/invoke/primary", "/v1/invoke/fallback"] {
            let req = test::TestRequest::post()
                .uri(uri)
                .set_json(json!({ "prompt": "hi" }))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), 404, "route {} should not be mounted", uri);
        }
    }
}
