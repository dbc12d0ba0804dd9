// crumbtrail-api/src/main.rs

use rocket::info;

#[rocket::main]
async fn main() {
    info!("CrumbTrail API v{} starting", env!("CARGO_PKG_VERSION"));

    crumbtrail_api::rocket()
        .launch()
        .await
        .expect("Rocket server failed to launch");
}
