#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use actix_web::{get, web, App, HttpResponse, HttpServer};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{AppState, Stats, WorkQuery};
use crate::load_cpu::burn_cpu_ms;
use crate::load_mem::touch_memory_mb;

#[get("/healthz")]
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status":"ok"}))
}

/// Load-generating endpoint: burn CPU for `cpu_ms` milliseconds and touch
/// `mem_mb` MiB once, then count the request. Accepts GET and POST.
pub async fn work(query: web::Query<WorkQuery>, data: web::Data<AppState>) -> HttpResponse {
    let cpu_ms = query.cpu_ms();
    let mem_mb = query.mem_mb();
    debug!(cpu_ms, mem_mb, "work request");
    if cpu_ms > 0 || mem_mb > 0 {
        // Busy work runs on the blocking pool so handler tasks stay responsive.
        let blocked = web::block(move || {
            burn_cpu_ms(cpu_ms);
            touch_memory_mb(usize::try_from(mem_mb).unwrap_or(usize::MAX));
        })
        .await;
        if let Err(e) = blocked {
            error!(error = %e, "load generation task failed");
            return json_error(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "load generation failed",
            );
        }
    }
    data.counter.increment();
    data.metrics.work_requests_total.inc();
    HttpResponse::Ok().json(json!({
        "message": "work done",
        "cpu_ms": cpu_ms,
        "mem_mb": mem_mb,
    }))
}

#[get("/stats")]
pub async fn stats(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(Stats {
        total_requests: data.counter.total(),
    })
}

#[get("/metrics")]
pub async fn scrape_metrics(data: web::Data<AppState>) -> HttpResponse {
    match data.metrics.encode_text() {
        Ok(buf) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buf),
        Err(e) => {
            error!(error = %format!("{e:#}"), "encode metrics failed");
            HttpResponse::InternalServerError().body("encode metrics failed")
        }
    }
}

pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(healthz)
            .service(stats)
            .service(scrape_metrics)
            .route("/work", web::get().to(work))
            .route("/work", web::post().to(work))
    })
    .bind(bind)?
    .run()
    .await
}

fn json_error(code: actix_web::http::StatusCode, reason: &str) -> HttpResponse {
    HttpResponse::build(code).json(json!({"status":"error","reason":reason}))
}
