mod feedback_test;
mod middleware_test;
mod users_test;
