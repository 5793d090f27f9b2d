//! Page Components

mod checkout;
mod dashboard;

pub use checkout::CheckoutPage;
pub use dashboard::DashboardPage;
