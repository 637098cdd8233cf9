pub mod auth;
pub mod entries;
pub mod feedback;
pub mod trainers;
pub mod users;
pub mod workouts;
