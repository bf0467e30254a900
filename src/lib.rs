// Library exports for wavywalls

pub mod app;
pub mod components;
pub mod config;
pub mod event;
pub mod logging;
pub mod model;
pub mod service;
pub mod service_worker;
pub mod widgets;
