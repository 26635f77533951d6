pub mod products;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Product routes (reads are public; mutations need `manageProducts`) ──
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(products::get_products))
            .route("", web::post().to(products::create_product))
            .route("/{id}", web::get().to(products::get_product))
            .route("/{id}", web::patch().to(products::update_product))
            .route("/{id}", web::delete().to(products::delete_product)),
    );
}
