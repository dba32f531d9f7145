#[path = "../test_utils.rs"]
mod test_utils;

mod confirmation_test;
mod friends_test;
mod middleware_test;
mod reservation_test;
mod team_test;
mod user_test;
