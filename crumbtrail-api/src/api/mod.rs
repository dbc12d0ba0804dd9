//! HTTP surface of the CrumbTrail API, one module per resource.
//!
//! Every endpoint replies with the uniform envelope and delegates to exactly
//! one persistence operation; capability checks happen here, never in the
//! entity layer.

use rocket::Route;

pub mod activation;
pub mod company;
pub mod employ;
pub mod extra_serving;
pub mod image;
pub mod login;
pub mod logout;
pub mod profile;
pub mod schedule;
pub mod signup;
pub mod status;

/// Collects the routes of every resource module for mounting under `/api`.
pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(activation::routes());
    routes.extend(company::routes());
    routes.extend(employ::routes());
    routes.extend(extra_serving::routes());
    routes.extend(image::routes());
    routes.extend(login::routes());
    routes.extend(logout::routes());
    routes.extend(profile::routes());
    routes.extend(schedule::routes());
    routes.extend(signup::routes());
    routes.extend(status::routes());
    routes
}
