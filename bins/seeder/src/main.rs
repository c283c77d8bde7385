//! Database seeder for Fix & Fit development and testing.
//!
//! Seeds a demo administrator, a demo patient with one appointment, and a
//! couple of published education articles.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, NaiveTime, Utc};

use fixfit_db::repositories::{
    AccountError, CreateAccountInput, CreateAppointmentInput, CreateArticleInput,
};
use fixfit_db::{AccountRepository, AppointmentRepository, ArticleRepository};

const ADMIN_EMAIL: &str = "admin@fixandfit.com";
const DEMO_EMAIL: &str = "demo@fixandfit.com";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = fixfit_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let accounts = AccountRepository::new(db.clone());
    let appointments = AppointmentRepository::new(db.clone());
    let articles = ArticleRepository::new(db);

    println!("Seeding administrator...");
    let admin = match accounts
        .ensure_admin(ADMIN_EMAIL, "admin123", "Admin", "User")
        .await
    {
        Ok(Some(created)) => {
            println!("  Created administrator: {ADMIN_EMAIL} / admin123");
            created
        }
        Ok(None) => {
            println!("  Administrator already exists, skipping...");
            accounts
                .find_by_email(ADMIN_EMAIL)
                .await
                .expect("administrator should be present")
        }
        Err(e) => {
            eprintln!("Failed to seed administrator: {e}");
            return;
        }
    };

    println!("Seeding demo patient...");
    let patient = match accounts
        .create(CreateAccountInput {
            email: DEMO_EMAIL.to_string(),
            password: "demo1234".to_string(),
            first_name: "Demo".to_string(),
            last_name: "Patient".to_string(),
            phone: Some("+1234567890".to_string()),
            patient_number: None,
            date_of_birth: None,
            address: None,
            emergency_contact: None,
            emergency_phone: None,
            is_admin: false,
        })
        .await
    {
        Ok(created) => {
            println!(
                "  Created demo patient: {DEMO_EMAIL} / demo1234 ({})",
                created.patient_number.as_deref().unwrap_or("-")
            );
            Some(created)
        }
        Err(AccountError::EmailTaken) => {
            println!("  Demo patient already exists, skipping...");
            None
        }
        Err(e) => {
            eprintln!("Failed to seed demo patient: {e}");
            None
        }
    };

    if let Some(patient) = patient {
        println!("Seeding demo appointment...");
        let next_week = (Utc::now() + Duration::days(7)).date_naive();
        let created = appointments
            .create(CreateAppointmentInput {
                account_id: patient.id,
                service: "Prosthetic fitting".to_string(),
                date: next_week,
                time: NaiveTime::from_hms_opt(10, 30, 0).expect("valid time"),
                notes: Some("Initial consultation".to_string()),
                attachment: None,
            })
            .await;

        if created.is_some() {
            println!("  Created demo appointment");
        } else {
            eprintln!("Failed to seed demo appointment");
        }
    }

    println!("Seeding education articles...");
    let existing = articles.list_all().await;
    for (title, content) in [
        (
            "Caring for your prosthesis",
            "Clean the socket daily with mild soap and inspect the liner for wear.",
        ),
        (
            "When to book a refitting",
            "Residual limb volume changes over time; book a refitting when the socket \
             feels loose or causes pressure points.",
        ),
    ] {
        if existing.iter().any(|a| a.title == title) {
            println!("  Article already exists, skipping: {title}");
            continue;
        }

        let created = articles
            .create(CreateArticleInput {
                title: title.to_string(),
                content: content.to_string(),
                author_id: admin.id,
                subject_account_id: None,
                published: true,
            })
            .await;

        if created.is_some() {
            println!("  Created article: {title}");
        } else {
            eprintln!("Failed to seed article: {title}");
        }
    }

    println!("Seeding complete!");
}
