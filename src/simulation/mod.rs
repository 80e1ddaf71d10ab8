pub mod states;
pub mod params;
pub mod engine;
pub mod seeding;
pub mod stepper;
pub mod links;
pub mod scenario;
