use crate::{
    api::{analytics, upload},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let upload_limiter = Arc::new(build_limiter(config.rate_upload_per_min));
    let query_limiter = Arc::new(build_limiter(config.rate_query_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::resource("/upload")
                    .wrap(upload_limiter)
                    .route(web::post().to(upload::upload_attendance)),
            )
            .service(
                web::resource("/analytics")
                    .wrap(query_limiter.clone())
                    .route(web::get().to(analytics::get_analytics))
                    .route(web::post().to(analytics::post_analytics)),
            )
            .service(
                web::resource("/employees")
                    .wrap(query_limiter)
                    .route(web::get().to(analytics::list_employees)),
            ),
    );
}
