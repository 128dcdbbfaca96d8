// Integration tests for FlyAgente

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use flyagente::core::MISSING_FIELDS_MESSAGE;
use flyagente::models::{DealType, ErrorResponse, FaqEntry, LegalResponse, SearchResponse};
use flyagente::routes::{self, AppState};
use flyagente::services::{
    FlightSearchService, GeminiClient, GeminiError, GenerativeModel, ModelOutput, GENERIC_FAILURE_MESSAGE,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const MODEL: &str = "gemini-3-flash-preview";
const GENERATE_PATH: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

fn deals_reply() -> String {
    json!({
        "deals": [
            {
                "type": "cheapest_cash",
                "airline": "TAP Air Portugal",
                "price": "R$ 4.890,00",
                "description": "Voo direto GRU-LIS; o bebê paga 10% da tarifa.",
                "howToBuy": "Reserve pelo Google Flights e finalize no site da TAP.",
                "link": "https://www.flytap.com",
                "isTotalWithTaxes": true
            },
            {
                "type": "cheapest_miles",
                "airline": "Azul",
                "price": "180.000 pontos + R$ 620,00",
                "description": "Emissão via TudoAzul com parceira TAP.",
                "howToBuy": "Acesse TudoAzul e busque por emissão com parceiros.",
                "link": "https://www.voeazul.com.br",
                "isTotalWithTaxes": true
            },
            {
                "type": "most_expensive",
                "airline": "TAP Air Portugal",
                "price": "R$ 21.300,00",
                "description": "Executiva com cama plana.",
                "howToBuy": "Compre diretamente no site da companhia.",
                "link": "https://www.flytap.com",
                "isTotalWithTaxes": false
            }
        ],
        "summary": "Os preços para junho estão estáveis; compre nas próximas semanas."
    })
    .to_string()
}

fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "groundingMetadata": {
                "groundingChunks": [
                    {"web": {"uri": "https://www.google.com/travel/flights", "title": "Google Flights"}}
                ]
            }
        }]
    })
    .to_string()
}

fn gru_lis() -> serde_json::Value {
    json!({
        "origin": "GRU",
        "destination": "LIS",
        "departureDate": "2025-06-01",
        "returnDate": "",
        "adults": 2,
        "children": 0,
        "infants": 1
    })
}

fn gemini_service(url: String) -> FlightSearchService {
    let client = GeminiClient::new(url, Some("test-key".to_string()), MODEL.to_string(), 5, true).unwrap();
    FlightSearchService::new(Arc::new(client))
}

fn app_state(search: FlightSearchService) -> AppState {
    AppState {
        search,
        api_key_configured: true,
        max_passengers_per_kind: 9,
    }
}

/// Model double that counts calls and returns fixed text
struct StubModel {
    text: String,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, _prompt: &str) -> Result<ModelOutput, GeminiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ModelOutput { text: self.text.clone(), grounding_chunks: None })
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn stub(text: &str) -> Arc<StubModel> {
    Arc::new(StubModel { text: text.to_string(), calls: AtomicUsize::new(0) })
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::configure_payload_errors)
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_integration_gru_lis_search() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"generationConfig": {"responseMimeType": "application/json"}})),
            Matcher::Regex("google_search".to_string()),
            Matcher::Regex("Origem: GRU".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(&deals_reply()))
        .expect(1)
        .create_async()
        .await;

    let app = init_app!(app_state(gemini_service(server.url())));

    let req = test::TestRequest::post()
        .uri("/api/v1/search")
        .set_json(gru_lis())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: SearchResponse = test::read_body_json(resp).await;
    assert_eq!(body.deals.len(), 3);
    for deal_type in DealType::ALL {
        assert_eq!(body.deals.iter().filter(|d| d.deal_type == deal_type).count(), 1);
    }
    assert!(!body.summary.is_empty());
    assert_eq!(body.sources().count(), 1);

    mock.assert_async().await;
}

#[actix_web::test]
async fn test_integration_fenced_reply_is_accepted() {
    let mut server = mockito::Server::new_async().await;
    let fenced = format!("```json\n{}\n```", deals_reply());
    server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(&fenced))
        .create_async()
        .await;

    let service = gemini_service(server.url());
    let query = serde_json::from_value(gru_lis()).unwrap();
    let response = service.search(&query).await.unwrap();

    assert_eq!(response.deals[0].deal_type, DealType::CheapestCash);
}

#[actix_web::test]
async fn test_integration_non_json_reply_is_generic_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body("Não encontrei voos para essa data."))
        .create_async()
        .await;

    let app = init_app!(app_state(gemini_service(server.url())));

    let req = test::TestRequest::post()
        .uri("/api/v1/search")
        .set_json(gru_lis())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 502);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "malformed_response");
    assert_eq!(body.message, GENERIC_FAILURE_MESSAGE);
}

#[actix_web::test]
async fn test_integration_api_error_is_search_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GENERATE_PATH)
        .with_status(429)
        .with_body(r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED"}}"#)
        .create_async()
        .await;

    let service = gemini_service(server.url());
    let query = serde_json::from_value(gru_lis()).unwrap();
    let err = service.search(&query).await.unwrap_err();

    assert_eq!(err.code(), "search_failed");
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[actix_web::test]
async fn test_integration_missing_api_key_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", GENERATE_PATH).expect(0).create_async().await;

    let client = GeminiClient::new(server.url(), None, MODEL.to_string(), 5, true).unwrap();
    let service = FlightSearchService::new(Arc::new(client));
    let query = serde_json::from_value(gru_lis()).unwrap();

    let err = service.search(&query).await.unwrap_err();
    assert_eq!(err.code(), "search_failed");
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_integration_validation_blocks_call() {
    let model = stub(&deals_reply());
    let app = init_app!(app_state(FlightSearchService::new(model.clone())));

    let req = test::TestRequest::post()
        .uri("/api/v1/search")
        .set_json(json!({"origin": "GRU", "destination": "", "departureDate": "2025-06-01"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "validation_failed");
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_integration_invalid_json_body() {
    let app = init_app!(app_state(FlightSearchService::new(stub("{}"))));

    let req = test::TestRequest::post()
        .uri("/api/v1/search")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_integration_health_faq_and_legal() {
    let app = init_app!(app_state(FlightSearchService::new(stub("{}"))));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
    assert_eq!(resp.status(), 200);
    let health: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["model"], "stub");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/faq").to_request()).await;
    let faq: Vec<FaqEntry> = test::read_body_json(resp).await;
    assert_eq!(faq.len(), 4);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/legal/terms").to_request()).await;
    let terms: LegalResponse = test::read_body_json(resp).await;
    assert_eq!(terms.title, "Termos de Uso");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/legal/cookies").to_request()).await;
    assert_eq!(resp.status(), 404);
}

async fn page_text<B: MessageBody>(resp: ServiceResponse<B>) -> (u16, String) {
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, String::from_utf8(body.to_vec()).unwrap())
}

macro_rules! call_page {
    ($app:expr, $req:expr) => {
        page_text(test::call_service(&$app, $req).await).await
    };
}

#[actix_web::test]
async fn test_integration_page_search_renders_three_cards() {
    let model = stub(&deals_reply());
    let app = init_app!(app_state(FlightSearchService::new(model.clone())));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([
            ("origin", "GRU"),
            ("destination", "LIS"),
            ("departureDate", "2025-06-01"),
            ("returnDate", ""),
            ("adults", "2"),
            ("children", "0"),
            ("infants", "1"),
            ("action", "search"),
        ])
        .to_request();
    let (status, html) = call_page!(app, req);

    assert_eq!(status, 200);
    assert_eq!(html.matches("<article class=\"deal\"").count(), 3);
    assert_eq!(html.matches("<div class=\"summary\">").count(), 1);
    assert!(!html.contains("role=\"alert\""));
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_integration_page_missing_fields_shows_message() {
    let model = stub(&deals_reply());
    let app = init_app!(app_state(FlightSearchService::new(model.clone())));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("origin", "GRU"), ("action", "search")])
        .to_request();
    let (status, html) = call_page!(app, req);

    assert_eq!(status, 200);
    assert!(html.contains(MISSING_FIELDS_MESSAGE));
    assert!(!html.contains("class=\"deal\""));
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_integration_page_non_json_shows_generic_failure() {
    let app = init_app!(app_state(FlightSearchService::new(stub("<html>erro</html>"))));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([
            ("origin", "GRU"),
            ("destination", "LIS"),
            ("departureDate", "2025-06-01"),
            ("action", "search"),
        ])
        .to_request();
    let (_, html) = call_page!(app, req);

    assert!(html.contains(GENERIC_FAILURE_MESSAGE));
    assert!(!html.contains("class=\"deal\""));
    assert!(!html.contains("class=\"summary\""));
}

#[actix_web::test]
async fn test_integration_page_steppers_clamp() {
    let model = stub("{}");
    let app = init_app!(app_state(FlightSearchService::new(model.clone())));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("adults", "1"), ("infants", "0"), ("action", "dec:adults")])
        .to_request();
    let (_, html) = call_page!(app, req);
    assert!(html.contains("<input type=\"hidden\" name=\"adults\" value=\"1\">"));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("adults", "1"), ("infants", "0"), ("action", "inc:infants")])
        .to_request();
    let (_, html) = call_page!(app, req);
    assert!(html.contains("<input type=\"hidden\" name=\"infants\" value=\"1\">"));
    assert!(html.contains("<strong class=\"total\">2</strong>"));

    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_integration_page_oversized_counts_are_clamped() {
    let model = stub("{}");
    let app = init_app!(app_state(FlightSearchService::new(model.clone())));

    let req = test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload("adults=300&children=1000&infants=0&action=inc%3Aadults")
        .to_request();
    let (status, html) = call_page!(app, req);

    assert_eq!(status, 200);
    assert!(html.contains("<input type=\"hidden\" name=\"adults\" value=\"9\">"));
    assert!(html.contains("<input type=\"hidden\" name=\"children\" value=\"9\">"));
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_integration_page_unknown_action() {
    let app = init_app!(app_state(FlightSearchService::new(stub("{}"))));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("action", "reset")])
        .to_request();
    let (status, _) = call_page!(app, req);
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn test_integration_page_faq_and_legal_toggles() {
    let app = init_app!(app_state(FlightSearchService::new(stub("{}"))));

    let (_, collapsed) = call_page!(app, test::TestRequest::get().uri("/").to_request());
    assert!(!collapsed.contains("class=\"faq-answer\""));

    let (_, opened) = call_page!(app, test::TestRequest::get().uri("/?faq=1").to_request());
    assert_eq!(opened.matches("class=\"faq-answer\"").count(), 1);

    let (_, legal) = call_page!(app, test::TestRequest::get().uri("/?legal=privacy").to_request());
    assert!(legal.contains("data-doc=\"privacy\""));
}
