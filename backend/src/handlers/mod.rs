pub mod admin;
pub mod health;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod sellers;
pub mod users;

#[cfg(test)]
mod tests;

use actix_web::web;
use voicecart_shared::PrincipalKind;

use crate::error::AppError;
use crate::middleware::AuthMiddleware;

fn user() -> AuthMiddleware {
    AuthMiddleware::require(PrincipalKind::User)
}

fn seller() -> AuthMiddleware {
    AuthMiddleware::require(PrincipalKind::Seller)
}

/// Seller routes that check ownership and accept admins as owners.
fn seller_or_admin() -> AuthMiddleware {
    seller().or_admin()
}

fn admin() -> AuthMiddleware {
    AuthMiddleware::require(PrincipalKind::Admin)
}

/// Extractor failures answer with the same JSON error body as handlers.
fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| AppError::Validation(err.to_string()).into()),
    );
}

/// Registers every route. Protected resources carry their own guard, and
/// catch-all `/{id}` paths come last within a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    extractor_config(cfg);

    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/user")
                .route("/add", web::post().to(users::register))
                .route("/login", web::post().to(users::login))
                .service(
                    web::resource("/profile")
                        .wrap(user())
                        .route(web::get().to(users::get_profile))
                        .route(web::put().to(users::update_profile)),
                )
                .service(
                    web::resource("/wishlist")
                        .wrap(user())
                        .route(web::get().to(users::get_wishlist)),
                )
                .service(
                    web::resource("/wishlist/{product_id}")
                        .wrap(user())
                        .route(web::post().to(users::toggle_wishlist)),
                ),
        )
        .service(
            web::scope("/seller")
                .route("/add", web::post().to(sellers::register))
                .route("/login", web::post().to(sellers::login))
                .service(
                    web::resource("/profile")
                        .wrap(seller())
                        .route(web::get().to(sellers::get_profile)),
                )
                .service(
                    web::resource("/products")
                        .wrap(seller())
                        .route(web::get().to(sellers::get_products)),
                )
                .service(
                    web::resource("/orders")
                        .wrap(seller())
                        .route(web::get().to(sellers::get_orders)),
                )
                .service(
                    web::resource("/orders/{order_id}/items/{item_id}/status")
                        .wrap(seller_or_admin())
                        .route(web::put().to(sellers::update_item_status)),
                ),
        )
        .service(
            web::scope("/product")
                .service(
                    web::resource("/add")
                        .wrap(seller())
                        .route(web::post().to(products::add_product)),
                )
                .route("/getall", web::get().to(products::get_all))
                .route("/featured", web::get().to(products::get_featured))
                .route("/category/{category}", web::get().to(products::get_by_category))
                .route("/search", web::get().to(products::search))
                .service(
                    web::resource("/update/{id}")
                        .wrap(seller_or_admin())
                        .route(web::put().to(products::update_product)),
                )
                .service(
                    web::resource("/delete/{id}")
                        .wrap(seller_or_admin())
                        .route(web::delete().to(products::delete_product)),
                )
                .route("/{id}", web::get().to(products::get_product)),
        )
        .service(
            web::scope("/order")
                .route("/create", web::post().to(orders::create_order))
                .route("/verify-payment", web::post().to(orders::verify_payment))
                .route("/number/{order_number}", web::get().to(orders::get_by_number))
                .service(
                    web::resource("/my-orders")
                        .wrap(user())
                        .route(web::get().to(orders::my_orders)),
                ),
        )
        .service(
            web::scope("/api/reviews")
                .service(
                    web::resource("/submit")
                        .wrap(user())
                        .route(web::post().to(reviews::submit)),
                )
                .route("/product/{product_id}", web::get().to(reviews::for_product)),
        )
        .service(
            web::scope("/api/admin")
                .route("/login", web::post().to(admin::login))
                .service(
                    web::resource("/dashboard")
                        .wrap(admin())
                        .route(web::get().to(admin::dashboard)),
                )
                .service(
                    web::resource("/users")
                        .wrap(admin())
                        .route(web::get().to(admin::list_users)),
                )
                .service(
                    web::resource("/sellers")
                        .wrap(admin())
                        .route(web::get().to(admin::list_sellers)),
                )
                .service(
                    web::resource("/products")
                        .wrap(admin())
                        .route(web::get().to(admin::list_products)),
                )
                .service(
                    web::resource("/sellers/{id}/approve")
                        .wrap(admin())
                        .route(web::put().to(admin::approve_seller)),
                ),
        );
}
