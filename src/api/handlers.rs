use std::time::Instant;

use actix_web::{web, HttpResponse, Result};

use crate::api::models::{
    DetailRequest, DetailResponse, ErrorResponse, ParseRequest, ParseResponse, SentenceResponse,
};
use crate::engine::ParserEngine;

/// Health check endpoint
pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "rustdp parse API"
    })))
}

/// Parse text endpoint
pub async fn parse_text(
    engine: web::Data<ParserEngine>,
    request: web::Json<ParseRequest>,
) -> Result<HttpResponse> {
    // Validate request
    if request.text.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Text cannot be empty".to_string(),
            error_type: "ValidationError".to_string(),
        }));
    }

    // Parse with timing
    let start_time = Instant::now();
    match engine.parse_result(&request.text) {
        Ok(result) => {
            let duration = start_time.elapsed().as_secs_f32();

            let response = ParseResponse {
                text: request.text.clone(),
                duration,
                sentence_count: result.sentence_count,
                token_count: result.token_count,
                sentences: result.sentences.iter().map(SentenceResponse::from).collect(),
            };

            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::error!("Parse failed: {}", e);
            Ok(HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: format!("Parse failed: {}", e),
                error_type: "ParseError".to_string(),
            }))
        }
    }
}

/// Sentence detail endpoint
pub async fn sentence_detail(
    engine: web::Data<ParserEngine>,
    request: web::Json<DetailRequest>,
) -> Result<HttpResponse> {
    if request.text.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Text cannot be empty".to_string(),
            error_type: "ValidationError".to_string(),
        }));
    }

    match engine.sentence_detail(&request.text) {
        Ok(detail) => Ok(HttpResponse::Ok().json(DetailResponse {
            text: request.text.clone(),
            detail,
        })),
        Err(e) => {
            log::error!("Detail rendering failed: {}", e);
            Ok(HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: format!("Detail rendering failed: {}", e),
                error_type: "ParseError".to_string(),
            }))
        }
    }
}

/// Parser statistics endpoint
pub async fn parser_stats(engine: web::Data<ParserEngine>) -> Result<HttpResponse> {
    let model = engine.model();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "model_name": model.name,
        "tag_count": model.tag_set.len(),
        "label_count": model.label_vocabulary.len(),
        "max_sentence_length": engine.config().max_sentence_length,
    })))
}
