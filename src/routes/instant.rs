use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{PickError, Picker};
use crate::models::{
    vibe_catalog, ErrorResponse, HealthResponse, PickOutfitRequest, PickOutfitResponse,
    ResetSessionRequest, ResetSessionResponse, Vibe, VibeCatalogResponse,
};
use crate::services::{GeneratorClient, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<GeneratorClient>,
    pub sessions: Arc<SessionStore>,
    pub picker: Picker,
}

/// Configure all instant-outfit routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/instant/pick", web::post().to(pick_outfit))
        .route("/instant/reset", web::post().to(reset_session))
        .route("/instant/seen", web::get().to(get_seen_outfits))
        .route("/instant/vibes", web::get().to(list_vibes));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        sessions: state.sessions.entry_count(),
    })
}

/// Vibe catalog endpoint
///
/// GET /api/v1/instant/vibes
async fn list_vibes() -> impl Responder {
    HttpResponse::Ok().json(VibeCatalogResponse {
        vibes: vibe_catalog(),
    })
}

/// Pick one fresh outfit for a vibe
///
/// POST /api/v1/instant/pick
///
/// Request body:
/// ```json
/// {
///   "sessionId": "string (optional)",
///   "vibe": "sunny|cloudy|cold|work|casual|date"
/// }
/// ```
async fn pick_outfit(
    state: web::Data<AppState>,
    req: web::Json<PickOutfitRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for pick request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let vibe = match Vibe::parse(&req.vibe) {
        Some(vibe) => vibe,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_vibe".to_string(),
                message: "Vibe must be one of: sunny, cloudy, cold, work, casual, date"
                    .to_string(),
                status_code: 400,
            });
        }
    };

    let (session_id, session) = state.sessions.get_or_create(req.session_id.as_deref()).await;

    // Snapshot the exclusions under the lock; the retrieval loop runs on the
    // copy so the lock is never held across a generator call.
    let (generation, mut exclusions) = {
        let mut session = session.lock().await;
        let generation = session.begin_pick(vibe);
        (generation, session.exclusions().clone())
    };

    tracing::info!(
        "Picking outfit for session {}, vibe {} ({} excluded)",
        session_id,
        vibe,
        exclusions.len()
    );

    let result = state
        .picker
        .pick(state.generator.as_ref(), vibe, &mut exclusions)
        .await;

    match result {
        Ok(pick) => {
            let mut session = session.lock().await;
            if !session.commit_pick(generation, pick.outfit.clone(), exclusions) {
                // A newer selection or a reset superseded this loop.
                tracing::info!("Discarding stale pick for session {}", session_id);
                return HttpResponse::Conflict().json(ErrorResponse {
                    error: "pick_superseded".to_string(),
                    message: "A newer selection superseded this request.".to_string(),
                    status_code: 409,
                });
            }

            tracing::info!(
                "Returning outfit '{}' for session {} after {} attempt(s)",
                pick.outfit.name,
                session_id,
                pick.attempts
            );

            HttpResponse::Ok().json(PickOutfitResponse {
                session_id,
                outfit: pick.outfit,
                attempts: pick.attempts,
                cycled: pick.cycled,
            })
        }
        Err(err) => {
            // Mid-loop exclusion changes (an exhaustion clear) still apply to
            // the session, under the same staleness guard.
            session.lock().await.sync_exclusions(generation, exclusions);

            match err {
                PickError::Upstream(e) => {
                    tracing::error!(
                        "Generator request failed for session {}: {}",
                        session_id,
                        e
                    );
                    HttpResponse::BadGateway().json(ErrorResponse {
                        error: "generator_unavailable".to_string(),
                        message: "Error fetching instant outfit. Please try again.".to_string(),
                        status_code: 502,
                    })
                }
                PickError::Exhausted { attempts } => {
                    tracing::info!(
                        "Catalog exhausted for session {} after {} attempts",
                        session_id,
                        attempts
                    );
                    HttpResponse::NotFound().json(ErrorResponse {
                        error: "catalog_exhausted".to_string(),
                        message: "We just cycled through every available look - give it \
                                  another moment or try a different vibe."
                            .to_string(),
                        status_code: 404,
                    })
                }
                PickError::NoMatch { attempts } => {
                    tracing::info!(
                        "No outfit found for session {} after {} attempts",
                        session_id,
                        attempts
                    );
                    HttpResponse::NotFound().json(ErrorResponse {
                        error: "no_match".to_string(),
                        message: "No outfit found for that combo. Try another option!"
                            .to_string(),
                        status_code: 404,
                    })
                }
            }
        }
    }
}

/// Reset a session back to its selection state
///
/// POST /api/v1/instant/reset
///
/// Clears the selected vibe and the displayed outfit but keeps the exclusion
/// set, so already-shown outfits stay excluded within the session.
async fn reset_session(
    state: web::Data<AppState>,
    req: web::Json<ResetSessionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.sessions.get(&req.session_id).await {
        Some(session) => {
            session.lock().await.reset();
            tracing::debug!("Reset session {}", req.session_id);
            HttpResponse::Ok().json(ResetSessionResponse {
                success: true,
                session_id: req.session_id.clone(),
            })
        }
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "session_not_found".to_string(),
            message: format!("No session with id {}", req.session_id),
            status_code: 404,
        }),
    }
}

/// Get the outfits a session has already seen
///
/// GET /api/v1/instant/seen?sessionId={sessionId}
///
/// Returns the session's exclusion list, for client-side synchronization and
/// debugging purposes.
async fn get_seen_outfits(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let session_id = match query.get("sessionId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing sessionId parameter".to_string(),
                message: "sessionId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.sessions.get(session_id).await {
        Some(session) => {
            let session = session.lock().await;
            HttpResponse::Ok().json(serde_json::json!({
                "sessionId": session_id,
                "seenOutfits": session.exclusions().names(),
                "count": session.exclusions().len(),
                "vibe": session.vibe().map(|v| v.as_str()),
            }))
        }
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "session_not_found".to_string(),
            message: format!("No session with id {}", session_id),
            status_code: 404,
        }),
    }
}
