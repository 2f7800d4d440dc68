// src/utils/mod.rs

pub mod cache;
pub mod calendar;
pub mod embargo;
pub mod html;
pub mod presentation;
pub mod style_stripper;
