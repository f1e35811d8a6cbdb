pub mod board;
pub mod session;
pub mod swagger_main;
pub mod users;

#[cfg(test)]
pub mod test_util;
