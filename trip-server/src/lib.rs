//! Trip itinerary planner server.
//!
//! Answers "how do I get from here to there?" across every travel mode at
//! once. Live answers come from TAGO, Kakao Mobility and ODsay when their
//! keys are configured; a built-in catalog covers everything else.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod planner;
pub mod providers;
pub mod trip;
pub mod web;
