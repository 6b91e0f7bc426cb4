use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod builder;
mod game;
mod panel;
mod stepper;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");
