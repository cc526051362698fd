//! Domain services: business rules over the repositories.
//!
//! Each service locks one repository at a time and runs to completion; no
//! internal parallelism. Repositories are shared as `Arc<Mutex<_>>`, which
//! is the per-collection serialization the store layer requires of its
//! host. Lock acquisition uses `expect`: a poisoned lock means another
//! caller panicked mid-operation and the process state is already gone.

mod notification_service;
mod payment_service;
mod report_service;
mod subscription_service;
mod user_service;

pub use notification_service::NotificationService;
pub use payment_service::PaymentService;
pub use report_service::ReportService;
pub use subscription_service::SubscriptionService;
pub use user_service::UserService;
