use actix_web::web;

pub mod home_controller;
pub mod registration_controller;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        //home_controller
        .service(home_controller::index)
        //registration_controller
        .service(registration_controller::create_registration)
        .service(registration_controller::get_submission_status)
        .service(registration_controller::get_connection);
}
