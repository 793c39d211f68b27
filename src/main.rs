//! Task Board Frontend Entry Point

mod app;
mod board;
mod commands;
mod components;
mod config;
mod context;
mod controller;
mod logging;
mod modal;
mod models;
mod task_form;

use app::App;
use config::BoardConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    match BoardConfig::from_document() {
        Ok(config) => {
            logging::init(config.log_level());
            mount_to_body(move || view! { <App config=config /> });
        }
        Err(e) => {
            logging::init(log::LevelFilter::Error);
            log::error!("task board not mounted: {}", e);
        }
    }
}
