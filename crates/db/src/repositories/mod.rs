pub mod feedback;
pub mod logs;
pub mod trainers;
pub mod users;
pub mod workouts;
