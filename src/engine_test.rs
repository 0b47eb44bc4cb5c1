use super::*;
use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::{header, method};
use crate::exposed_headers::ExposedHeaders;
use crate::headers::Headers;
use crate::origin::AllowedOrigins;

fn engine_with(policy: PolicyConfig) -> CorsEngine {
    CorsEngine::new(policy)
}

fn simple_headers(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::Simple(result) => result.headers,
        other => panic!("expected simple decision, got {other:?}"),
    }
}

fn preflight(decision: CorsDecision) -> PreflightResult {
    match decision {
        CorsDecision::Preflight(result) => result,
        other => panic!("expected preflight decision, got {other:?}"),
    }
}

fn rejected(decision: CorsDecision) -> RejectedResult {
    match decision {
        CorsDecision::Rejected(result) => result,
        other => panic!("expected rejected decision, got {other:?}"),
    }
}

mod check {
    use super::*;

    #[test]
    fn should_pass_through_when_origin_missing() {
        // Arrange
        let engine = engine_with(PolicyConfig::new().allowed_origins(AllowedOrigins::any()));
        let request = RequestContext::new(method::GET);

        // Act
        let decision = engine.check(&request);

        // Assert
        assert!(matches!(decision, CorsDecision::Passthrough));
    }

    #[test]
    fn should_pass_through_preflight_shaped_request_without_origin() {
        // Arrange
        let engine = engine_with(PolicyConfig::new().allowed_origins(AllowedOrigins::any()));
        let request = RequestContext::new(method::OPTIONS).with_request_method(method::POST);

        // Act
        let decision = engine.check(&request);

        // Assert
        assert!(matches!(decision, CorsDecision::Passthrough));
    }

    #[test]
    fn should_reject_every_origin_with_default_policy() {
        // Arrange
        let engine = engine_with(PolicyConfig::default());
        let request = RequestContext::new(method::GET).with_origin("https://a.com");

        // Act
        let result = rejected(engine.check(&request));

        // Assert
        assert!(!result.headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert!(!result.short_circuit);
    }

    #[test]
    fn should_flag_short_circuit_when_configured() {
        // Arrange
        let engine = engine_with(
            PolicyConfig::new()
                .allowed_origins(AllowedOrigins::list(["https://a.com"]))
                .reject_unallowed_origins(true),
        );
        let request = RequestContext::new(method::GET).with_origin("https://b.com");

        // Act
        let result = rejected(engine.check(&request));

        // Assert
        assert!(result.short_circuit);
        assert_eq!(result.headers.get(header::VARY), Some(&"Origin".to_string()));
    }

    #[test]
    fn should_reject_preflight_from_unlisted_origin() {
        // Arrange
        let engine =
            engine_with(PolicyConfig::new().allowed_origins(AllowedOrigins::list(["https://a.com"])));
        let request = RequestContext::new(method::OPTIONS)
            .with_origin("https://b.com")
            .with_request_method(method::POST);

        // Act
        let result = rejected(engine.check(&request));

        // Assert
        assert!(!result.headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
        assert!(!result.headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[test]
    fn should_treat_options_without_request_method_as_simple() {
        // Arrange
        let engine = engine_with(PolicyConfig::new().allowed_origins(AllowedOrigins::any()));
        let request = RequestContext::new(method::OPTIONS).with_origin("https://a.com");

        // Act
        let headers = simple_headers(engine.check(&request));

        // Assert
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&"*".to_string())
        );
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[test]
    fn should_detect_preflight_case_insensitively() {
        // Arrange
        let engine = engine_with(PolicyConfig::new().allowed_origins(AllowedOrigins::any()));
        let request = RequestContext::new("options")
            .with_origin("https://a.com")
            .with_request_method(method::GET);

        // Act & Assert
        assert!(matches!(engine.check(&request), CorsDecision::Preflight(_)));
    }
}

mod process_preflight {
    use super::*;

    #[test]
    fn should_answer_with_full_header_set() {
        // Arrange
        let engine = engine_with(
            PolicyConfig::new()
                .allowed_origins(AllowedOrigins::list(["https://a.com"]))
                .allowed_methods(AllowedMethods::list(["GET", "POST"]))
                .allowed_headers(AllowedHeaders::list(["Content-Type"]))
                .exposed_headers(ExposedHeaders::list(["X-Trace"]))
                .allow_credentials(true)
                .max_age(600),
        );
        let request = RequestContext::new(method::OPTIONS)
            .with_origin("https://a.com")
            .with_request_method(method::POST)
            .with_request_headers("Content-Type");

        // Act
        let result = preflight(engine.check(&request));

        // Assert
        assert_eq!(result.status, 204);
        let headers = result.headers;
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&"https://a.com".to_string())
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS),
            Some(&"GET, POST".to_string())
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS),
            Some(&"Content-Type".to_string())
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&"true".to_string())
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_MAX_AGE),
            Some(&"600".to_string())
        );
        assert!(!headers.contains_key(header::ACCESS_CONTROL_EXPOSE_HEADERS));
    }

    #[test]
    fn should_list_all_methods_even_when_requested_method_absent_from_list() {
        // Arrange
        let engine = engine_with(
            PolicyConfig::new()
                .allowed_origins(AllowedOrigins::any())
                .allowed_methods(AllowedMethods::list(["GET"])),
        );
        let request = RequestContext::new(method::OPTIONS)
            .with_origin("https://a.com")
            .with_request_method("DELETE");

        // Act
        let result = preflight(engine.check(&request));

        // Assert
        assert_eq!(
            result.headers.get(header::ACCESS_CONTROL_ALLOW_METHODS),
            Some(&"GET".to_string())
        );
    }

    #[test]
    fn should_use_configured_success_status() {
        // Arrange
        let engine = engine_with(
            PolicyConfig::new()
                .allowed_origins(AllowedOrigins::any())
                .options_success_status(200),
        );
        let request = RequestContext::new(method::OPTIONS)
            .with_origin("https://a.com")
            .with_request_method(method::GET);

        // Act
        let result = preflight(engine.check(&request));

        // Assert
        assert_eq!(result.status, 200);
    }

    #[test]
    fn should_merge_origin_and_request_header_vary_entries() {
        // Arrange
        let engine =
            engine_with(PolicyConfig::new().allowed_origins(AllowedOrigins::list(["https://a.com"])));
        let request = RequestContext::new(method::OPTIONS)
            .with_origin("https://a.com")
            .with_request_method(method::GET)
            .with_request_headers("X-Test");

        // Act
        let result = preflight(engine.check(&request));

        // Assert
        assert_eq!(
            result.headers.get(header::VARY),
            Some(&"Origin, Access-Control-Request-Headers".to_string())
        );
        assert_eq!(
            result.headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS),
            Some(&"X-Test".to_string())
        );
    }
}

mod process_simple {
    use super::*;

    #[test]
    fn should_attach_origin_credentials_and_exposed_headers() {
        // Arrange
        let engine = engine_with(
            PolicyConfig::new()
                .allowed_origins(AllowedOrigins::list(["https://a.com"]))
                .exposed_headers(ExposedHeaders::list(["X-Trace", "X-Count"]))
                .allow_credentials(true)
                .max_age(60),
        );
        let request = RequestContext::new(method::GET).with_origin("https://a.com");

        // Act
        let headers = simple_headers(engine.check(&request));

        // Assert
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&"https://a.com".to_string())
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&"true".to_string())
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_EXPOSE_HEADERS),
            Some(&"X-Trace, X-Count".to_string())
        );
        assert!(!headers.contains_key(header::ACCESS_CONTROL_MAX_AGE));
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[test]
    fn should_echo_origin_for_wildcard_with_credentials() {
        // Arrange
        let engine = engine_with(
            PolicyConfig::new()
                .allowed_origins(AllowedOrigins::any())
                .allow_credentials(true),
        );
        let request = RequestContext::new(method::POST).with_origin("https://x.test");

        // Act
        let headers = simple_headers(engine.check(&request));

        // Assert
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&"https://x.test".to_string())
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&"true".to_string())
        );
    }

    #[test]
    fn should_echo_any_origin_with_vary_when_reflecting() {
        // Arrange
        let engine = engine_with(
            PolicyConfig::new()
                .allowed_origins(AllowedOrigins::reflect())
                .allow_credentials(true),
        );
        let request = RequestContext::new(method::GET).with_origin("https://unlisted.test");

        // Act
        let headers = simple_headers(engine.check(&request));

        // Assert
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&"https://unlisted.test".to_string())
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&"true".to_string())
        );
        assert_eq!(headers.get(header::VARY), Some(&"Origin".to_string()));
    }

    #[test]
    fn should_consult_predicate_per_request() {
        // Arrange
        let engine = engine_with(
            PolicyConfig::new()
                .allowed_origins(AllowedOrigins::predicate(|origin| origin.starts_with("https://"))),
        );

        // Act
        let secure = engine.check(&RequestContext::new(method::GET).with_origin("https://a.com"));
        let plain = engine.check(&RequestContext::new(method::GET).with_origin("http://a.com"));

        // Assert
        assert!(matches!(secure, CorsDecision::Simple(_)));
        assert!(matches!(plain, CorsDecision::Rejected(_)));
    }
}
