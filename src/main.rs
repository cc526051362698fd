//! Interactive console front-end.
//!
//! Wires the repositories, services and simulated gateway together, loads
//! the JSON data files, runs the menu loop and saves everything back on
//! exit.

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use subtrackr::config::AppConfig;
use subtrackr::domain::foundation::{NotificationId, PaymentId, SubscriptionId, UserId};
use subtrackr::domain::payment::PaymentStatus;
use subtrackr::domain::report::ReportMonth;
use subtrackr::domain::subscription::RenewalFrequency;
use subtrackr::domain::user::UserRole;
use subtrackr::ports::SimulatedGateway;
use subtrackr::services::{
    NotificationService, PaymentService, ReportService, SubscriptionService, UserService,
};
use subtrackr::store::{
    NotificationRepository, PaymentRepository, SubscriptionRepository, UserRepository,
};

struct App {
    config: AppConfig,
    users: Arc<Mutex<UserRepository>>,
    subscriptions: Arc<Mutex<SubscriptionRepository>>,
    payments: Arc<Mutex<PaymentRepository>>,
    notifications: Arc<Mutex<NotificationRepository>>,
    user_service: UserService,
    subscription_service: SubscriptionService,
    payment_service: PaymentService,
    notification_service: Arc<NotificationService>,
    report_service: ReportService,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let users = Arc::new(Mutex::new(UserRepository::new()));
        let subscriptions = Arc::new(Mutex::new(SubscriptionRepository::new()));
        let payments = Arc::new(Mutex::new(PaymentRepository::new()));
        let notifications = Arc::new(Mutex::new(NotificationRepository::new()));

        let notification_service = Arc::new(NotificationService::new(notifications.clone()));
        let gateway = Arc::new(SimulatedGateway::with_rates(
            config.gateway.charge_success_rate,
            config.gateway.retry_success_rate,
        ));

        Self {
            user_service: UserService::new(users.clone()),
            subscription_service: SubscriptionService::new(
                subscriptions.clone(),
                notification_service.clone(),
            ),
            payment_service: PaymentService::new(
                payments.clone(),
                gateway,
                notification_service.clone(),
            ),
            report_service: ReportService::new(
                users.clone(),
                subscriptions.clone(),
                payments.clone(),
            ),
            notification_service,
            users,
            subscriptions,
            payments,
            notifications,
            config,
        }
    }

    fn load_data(&self) {
        let storage = &self.config.storage;
        self.users
            .lock()
            .expect("user repository lock poisoned")
            .load_from_file(&storage.users_path());
        self.subscriptions
            .lock()
            .expect("subscription repository lock poisoned")
            .load_from_file(&storage.subscriptions_path());
        self.payments
            .lock()
            .expect("payment repository lock poisoned")
            .load_from_file(&storage.payments_path());
        self.notifications
            .lock()
            .expect("notification repository lock poisoned")
            .load_from_file(&storage.notifications_path());
        println!("[INFO] Data loaded successfully");
    }

    fn save_data(&self) {
        let storage = &self.config.storage;
        let results = [
            self.users
                .lock()
                .expect("user repository lock poisoned")
                .save_to_file(&storage.users_path()),
            self.subscriptions
                .lock()
                .expect("subscription repository lock poisoned")
                .save_to_file(&storage.subscriptions_path()),
            self.payments
                .lock()
                .expect("payment repository lock poisoned")
                .save_to_file(&storage.payments_path()),
            self.notifications
                .lock()
                .expect("notification repository lock poisoned")
                .save_to_file(&storage.notifications_path()),
        ];

        let mut failed = false;
        for result in results {
            if let Err(e) = result {
                println!("[ERROR] Failed to save data: {}", e);
                failed = true;
            }
        }
        if !failed {
            println!("\n[INFO] Data saved successfully");
            println!("[INFO] Files saved to: {}", storage.data_dir);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone())),
        )
        .with_writer(io::stderr)
        .init();

    fs::create_dir_all(&config.storage.data_dir)?;

    let app = App::new(config);
    app.load_data();

    println!("╔════════════════════════════════════════╗");
    println!("║   Welcome to SubTrackr System          ║");
    println!("║   Subscription Management Platform     ║");
    println!("╚════════════════════════════════════════╝");
    println!();

    loop {
        match main_menu(&app) {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) => println!("\n[ERROR] {}", e),
        }
    }

    app.save_data();
    println!("\nThank you for using SubTrackr!");
    Ok(())
}

/// Shows the main menu once; returns whether the loop should continue.
fn main_menu(app: &App) -> io::Result<bool> {
    println!("\n╔════════════════════════════════════════╗");
    println!("║           MAIN MENU                    ║");
    println!("╚════════════════════════════════════════╝");
    println!("1. User Management");
    println!("2. Subscription Management");
    println!("3. Payment Processing");
    println!("4. View Notifications");
    println!("5. Generate Reports");
    println!("6. Save & Exit");

    match prompt("\nSelect option: ")?.as_str() {
        "1" => user_menu(app)?,
        "2" => subscription_menu(app)?,
        "3" => payment_menu(app)?,
        "4" => notifications_menu(app)?,
        "5" => reports_menu(app)?,
        "6" => return Ok(false),
        _ => println!("\n[ERROR] Invalid option. Please try again."),
    }
    Ok(true)
}

fn user_menu(app: &App) -> io::Result<()> {
    println!("\n--- USER MANAGEMENT ---");
    println!("1. Add User");
    println!("2. View All Users");
    println!("3. Update User");
    println!("4. Remove User");

    match prompt("Select option: ")?.as_str() {
        "1" => add_user(app)?,
        "2" => view_all_users(app),
        "3" => update_user(app)?,
        "4" => remove_user(app)?,
        _ => {}
    }
    Ok(())
}

fn add_user(app: &App) -> io::Result<()> {
    let name = prompt("Enter name: ")?;
    let email = prompt("Enter email: ")?;

    println!("Select role:");
    println!("1. Customer");
    println!("2. Admin");
    println!("3. System Process");
    let role = match prompt("Choice: ")?.as_str() {
        "2" => UserRole::Admin,
        "3" => UserRole::SystemProcess,
        _ => UserRole::Customer,
    };

    match app.user_service.add_user(&name, &email, role) {
        Ok(user) => println!("\n[SUCCESS] User added successfully! ID: {}", user.id),
        Err(e) => println!("\n[ERROR] {}", e),
    }
    Ok(())
}

fn view_all_users(app: &App) {
    let users = app.user_service.all_users();
    if users.is_empty() {
        println!("\nNo users found.");
        return;
    }

    println!("\n=== ALL USERS ===");
    println!("{:<38} {:<20} {:<30} {:<15}", "ID", "Name", "Email", "Role");
    println!("{}", "-".repeat(105));
    for user in users {
        println!(
            "{:<38} {:<20} {:<30} {:<15}",
            user.id.to_string(),
            user.name,
            user.email,
            user.role.to_string()
        );
    }
}

fn update_user(app: &App) -> io::Result<()> {
    let Some(user_id) = read_id::<UserId>("Enter user ID to update: ")? else {
        return Ok(());
    };
    let Some(user) = app.user_service.get_user(&user_id) else {
        println!("\n[ERROR] User not found.");
        return Ok(());
    };

    let name = prompt(&format!("Enter new name (current: {}): ", user.name))?;
    let name = if name.is_empty() { user.name.clone() } else { name };

    let email = prompt(&format!("Enter new email (current: {}): ", user.email))?;
    let email = if email.is_empty() { user.email.clone() } else { email };

    match app.user_service.update_user(&user_id, &name, &email, user.role) {
        Ok(_) => println!("\n[SUCCESS] User updated successfully!"),
        Err(e) => println!("\n[ERROR] {}", e),
    }
    Ok(())
}

fn remove_user(app: &App) -> io::Result<()> {
    let Some(user_id) = read_id::<UserId>("Enter user ID to remove: ")? else {
        return Ok(());
    };
    app.user_service.remove_user(&user_id);
    println!("\n[SUCCESS] User removed successfully!");
    Ok(())
}

fn subscription_menu(app: &App) -> io::Result<()> {
    println!("\n--- SUBSCRIPTION MANAGEMENT ---");
    println!("1. Create Subscription");
    println!("2. View All Subscriptions");
    println!("3. Update Subscription");
    println!("4. Cancel Subscription");
    println!("5. Renew Subscription");

    match prompt("Select option: ")?.as_str() {
        "1" => create_subscription(app)?,
        "2" => view_all_subscriptions(app),
        "3" => update_subscription(app)?,
        "4" => cancel_subscription(app)?,
        "5" => renew_subscription(app)?,
        _ => {}
    }
    Ok(())
}

fn create_subscription(app: &App) -> io::Result<()> {
    let Some(user_id) = read_id::<UserId>("Enter user ID: ")? else {
        return Ok(());
    };

    println!("Select subscription type:");
    println!("1. Basic");
    println!("2. Premium");
    let kind = if prompt("Choice: ")? == "2" { "premium" } else { "basic" };

    let plan_name = prompt("Enter plan name: ")?;
    let Some(cost) = read_amount("Enter cost: $")? else {
        return Ok(());
    };

    println!("Select renewal frequency:");
    println!("1. Monthly");
    println!("2. Quarterly");
    println!("3. Yearly");
    let frequency = match prompt("Choice: ")?.as_str() {
        "2" => RenewalFrequency::Quarterly,
        "3" => RenewalFrequency::Yearly,
        _ => RenewalFrequency::Monthly,
    };

    match app
        .subscription_service
        .create_subscription(kind, user_id, &plan_name, cost, frequency)
    {
        Ok(sub) => println!("\n[SUCCESS] Subscription created successfully! ID: {}", sub.id),
        Err(e) => println!("\n[ERROR] {}", e),
    }
    Ok(())
}

fn view_all_subscriptions(app: &App) {
    let subscriptions = app.subscription_service.all_subscriptions();
    if subscriptions.is_empty() {
        println!("\nNo subscriptions found.");
        return;
    }

    println!("\n=== ALL SUBSCRIPTIONS ===");
    for sub in subscriptions {
        println!("\n{} - {}", sub.kind_name(), sub.plan_name);
        println!("  ID: {}", sub.id);
        println!("  User ID: {}", sub.user_id);
        println!("  Cost: ${:.2} / {}", sub.cost, sub.renewal_frequency);
        println!("  Status: {}", sub.status);
        println!("  Start: {}", sub.start_date.date_string());
        if let Some(end) = sub.end_date {
            println!("  End: {}", end.date_string());
        }
    }
}

fn update_subscription(app: &App) -> io::Result<()> {
    let Some(sub_id) = read_id::<SubscriptionId>("Enter subscription ID: ")? else {
        return Ok(());
    };
    let plan_name = prompt("Enter new plan name: ")?;
    let Some(cost) = read_amount("Enter new cost: $")? else {
        return Ok(());
    };

    match app.subscription_service.update_subscription(&sub_id, &plan_name, cost) {
        Ok(_) => println!("\n[SUCCESS] Subscription updated successfully!"),
        Err(e) => println!("\n[ERROR] {}", e),
    }
    Ok(())
}

fn cancel_subscription(app: &App) -> io::Result<()> {
    let Some(sub_id) = read_id::<SubscriptionId>("Enter subscription ID: ")? else {
        return Ok(());
    };
    let Some(user_id) = read_id::<UserId>("Enter user ID: ")? else {
        return Ok(());
    };
    let Some(user) = app.user_service.get_user(&user_id) else {
        println!("\n[ERROR] User not found.");
        return Ok(());
    };

    match app.subscription_service.cancel_subscription(&sub_id, &user) {
        Ok(_) => println!("\n[SUCCESS] Subscription cancelled successfully!"),
        Err(e) => println!("\n[ERROR] {}", e),
    }
    Ok(())
}

fn renew_subscription(app: &App) -> io::Result<()> {
    let Some(sub_id) = read_id::<SubscriptionId>("Enter subscription ID: ")? else {
        return Ok(());
    };
    match app.subscription_service.renew_subscription(&sub_id) {
        Ok(_) => println!("\n[SUCCESS] Subscription renewed successfully!"),
        Err(e) => println!("\n[ERROR] {}", e),
    }
    Ok(())
}

fn payment_menu(app: &App) -> io::Result<()> {
    println!("\n--- PAYMENT PROCESSING ---");
    println!("1. Process Payment");
    println!("2. Retry Failed Payment");
    println!("3. View Payment History");

    match prompt("Select option: ")?.as_str() {
        "1" => process_payment(app)?,
        "2" => retry_failed_payment(app)?,
        "3" => view_payment_history(app)?,
        _ => {}
    }
    Ok(())
}

fn process_payment(app: &App) -> io::Result<()> {
    let Some(user_id) = read_id::<UserId>("Enter user ID: ")? else {
        return Ok(());
    };
    let Some(user) = app.user_service.get_user(&user_id) else {
        println!("\n[ERROR] User not found.");
        return Ok(());
    };

    let Some(sub_id) = read_id::<SubscriptionId>("Enter subscription ID: ")? else {
        return Ok(());
    };
    let Some(subscription) = app.subscription_service.get_subscription(&sub_id) else {
        println!("\n[ERROR] Subscription not found.");
        return Ok(());
    };

    let Some(amount) = read_amount("Enter payment amount: $")? else {
        return Ok(());
    };

    match app.payment_service.process_payment(&user, &subscription, amount) {
        Ok(payment) if payment.status == PaymentStatus::Success => {
            println!(
                "\n[SUCCESS] Payment processed! Transaction: {}",
                payment.transaction_reference
            );
        }
        Ok(payment) => {
            let reason = payment.failure_reason.as_deref().unwrap_or("Unknown");
            println!("\n[FAILED] Payment failed: {}", reason);
        }
        Err(e) => println!("\n[ERROR] {}", e),
    }
    Ok(())
}

fn retry_failed_payment(app: &App) -> io::Result<()> {
    let Some(payment_id) = read_id::<PaymentId>("Enter payment ID: ")? else {
        return Ok(());
    };

    match app.payment_service.retry_failed_payment(&payment_id) {
        Ok(true) => println!("\n[SUCCESS] Payment retry successful!"),
        Ok(false) => println!("\n[FAILED] Payment retry failed."),
        Err(e) => println!("\n[ERROR] {}", e),
    }
    Ok(())
}

fn view_payment_history(app: &App) -> io::Result<()> {
    let Some(user_id) = read_id::<UserId>("Enter user ID: ")? else {
        return Ok(());
    };

    let payments = app.payment_service.payment_history(&user_id);
    if payments.is_empty() {
        println!("\nNo payment history found.");
        return Ok(());
    }

    println!("\n=== PAYMENT HISTORY ===");
    for payment in payments {
        println!("\n{}", payment.payment_date.datetime_string());
        println!("  ID: {}", payment.id);
        println!("  Amount: ${:.2}", payment.amount);
        println!("  Status: {}", payment.status);
        println!("  Transaction: {}", payment.transaction_reference);
        if payment.status == PaymentStatus::Failed {
            let reason = payment.failure_reason.as_deref().unwrap_or("Unknown");
            println!("  Reason: {}", reason);
            println!("  Retries: {}", payment.retry_count);
        }
    }
    Ok(())
}

fn notifications_menu(app: &App) -> io::Result<()> {
    let Some(user_id) = read_id::<UserId>("Enter user ID: ")? else {
        return Ok(());
    };

    let notifications = app.notification_service.user_notifications(&user_id);
    if notifications.is_empty() {
        println!("\nNo notifications found.");
        return Ok(());
    }

    println!("\n=== NOTIFICATIONS ===");
    for notification in &notifications {
        let status = if notification.is_read { "[READ]" } else { "[UNREAD]" };
        println!(
            "\n{} {} - {}",
            status,
            notification.kind,
            notification.created_date.date_string()
        );
        println!("  ID: {}", notification.id);
        println!("  {}", notification.message);
    }

    if prompt("\nMark a notification as read? (y/n): ")?.eq_ignore_ascii_case("y") {
        let Some(id) = read_id::<NotificationId>("Enter notification ID: ")? else {
            return Ok(());
        };
        match app.notification_service.mark_as_read(&id) {
            Ok(()) => println!("\n[SUCCESS] Notification marked as read."),
            Err(e) => println!("\n[ERROR] {}", e),
        }
    }
    Ok(())
}

fn reports_menu(app: &App) -> io::Result<()> {
    let Some(user_id) = read_id::<UserId>("Enter user ID: ")? else {
        return Ok(());
    };

    let month_input = prompt("Enter month (1-12): ")?;
    let Ok(month) = month_input.parse::<u32>() else {
        println!("\n[ERROR] Invalid month.");
        return Ok(());
    };

    let year_input = prompt("Enter year: ")?;
    let Ok(year) = year_input.parse::<i32>() else {
        println!("\n[ERROR] Invalid year.");
        return Ok(());
    };

    let period = match ReportMonth::new(year, month) {
        Ok(period) => period,
        Err(e) => {
            println!("\n[ERROR] {}", e);
            return Ok(());
        }
    };

    let report = match app.report_service.generate_monthly_report(&user_id, period) {
        Ok(report) => report,
        Err(e) => {
            println!("\n[ERROR] {}", e);
            return Ok(());
        }
    };

    let text = app.report_service.export_report_to_string(&report);
    println!("\n{}", text);

    if prompt("\nSave report to file? (y/n): ")?.eq_ignore_ascii_case("y") {
        let filename = format!("report_{}_{}{:02}.txt", user_id, year, month);
        match fs::write(&filename, &text) {
            Ok(()) => println!("[SUCCESS] Report saved to {}", filename),
            Err(e) => println!("[ERROR] Failed to save report: {}", e),
        }
    }
    Ok(())
}

/// Prints a prompt and reads one trimmed line from stdin.
fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompts for an id; a line that does not parse prints an error and
/// returns `None` so the caller can bail out of the flow.
fn read_id<T: FromStr>(label: &str) -> io::Result<Option<T>> {
    let input = prompt(label)?;
    match input.parse::<T>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("\n[ERROR] Invalid ID format.");
            Ok(None)
        }
    }
}

/// Prompts for a positive-looking amount; parse failures print an error
/// and return `None`.
fn read_amount(label: &str) -> io::Result<Option<f64>> {
    let input = prompt(label)?;
    match input.parse::<f64>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("\n[ERROR] Invalid amount.");
            Ok(None)
        }
    }
}
