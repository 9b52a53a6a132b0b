pub mod cache;
pub mod connection;
pub mod gsheets;

#[cfg(test)]
pub mod testconn;
