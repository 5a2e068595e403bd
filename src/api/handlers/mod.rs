pub mod badge;
pub use self::badge::badge;

pub mod health;
pub use self::health::health;

// axum handler for /
pub async fn root() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
