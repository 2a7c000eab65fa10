//! Database seeder for Eventra development and testing.
//!
//! Seeds the service catalog, a staff directory, task templates, and a
//! demo event with finance lines for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::str::FromStr;
use uuid::Uuid;

use eventra_db::entities::{
    event_finances, events, sea_orm_active_enums::EventStatus, services, staff, task_templates,
};

/// Demo event ID (consistent for all seeds)
const DEMO_EVENT_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = eventra_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding service catalog...");
    let service_ids = seed_services(&db).await;

    println!("Seeding staff directory...");
    seed_staff(&db).await;

    println!("Seeding task templates...");
    seed_task_templates(&db).await;

    println!("Seeding demo event...");
    seed_demo_event(&db, &service_ids).await;

    println!("Seeding complete!");
}

fn demo_event_id() -> Uuid {
    Uuid::parse_str(DEMO_EVENT_ID).unwrap()
}

fn price(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Seeds the service catalog and returns the created IDs.
async fn seed_services(db: &DatabaseConnection) -> Vec<Uuid> {
    let catalog = [
        ("Sound System", "1000000"),
        ("Lighting", "750000"),
        ("Stage Decoration", "1500000"),
        ("Catering", "2500000"),
        ("Documentation", "800000"),
        ("Master of Ceremony", "500000"),
    ];

    let mut ids = Vec::with_capacity(catalog.len());
    for (name, base_price) in catalog {
        let id = Uuid::new_v4();
        let service = services::ActiveModel {
            id: Set(id),
            service_name: Set(name.to_string()),
            base_price: Set(price(base_price)),
        };

        if let Err(e) = service.insert(db).await {
            eprintln!("Failed to insert service {name}: {e}");
        } else {
            println!("  Created service: {name}");
            ids.push(id);
        }
    }
    ids
}

/// Seeds a few staff directory entries.
async fn seed_staff(db: &DatabaseConnection) {
    let members = [
        ("Andi Pratama", "internal", "Production"),
        ("Bella Santoso", "internal", "Logistics"),
        ("Cahyo Nugroho", "vendor", "Sound"),
        ("Dewi Lestari", "volunteer", "Registration"),
    ];

    for (name, staff_type, department) in members {
        let member = staff::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(name.to_string()),
            staff_type: Set(Some(staff_type.to_string())),
            phone: Set(None),
            department: Set(Some(department.to_string())),
        };

        if let Err(e) = member.insert(db).await {
            eprintln!("Failed to insert staff member {name}: {e}");
        } else {
            println!("  Created staff member: {name}");
        }
    }
}

/// Seeds common task templates.
async fn seed_task_templates(db: &DatabaseConnection) {
    let templates = [
        ("Venue survey", "Visit and document the venue layout"),
        ("Vendor briefing", "Walk vendors through the rundown"),
        ("Equipment check", "Verify sound and lighting equipment"),
        ("Final rehearsal", "Full run-through the day before"),
    ];

    for (name, description) in templates {
        let template = task_templates::ActiveModel {
            id: Set(Uuid::new_v4()),
            task_name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
        };

        if let Err(e) = template.insert(db).await {
            eprintln!("Failed to insert task template {name}: {e}");
        } else {
            println!("  Created task template: {name}");
        }
    }
}

/// Seeds a demo event with two finance lines.
async fn seed_demo_event(db: &DatabaseConnection, service_ids: &[Uuid]) {
    // Check if the demo event already exists
    if events::Entity::find_by_id(demo_event_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo event already exists, skipping...");
        return;
    }

    let event = events::ActiveModel {
        id: Set(demo_event_id()),
        name: Set("Annual Company Gathering".to_string()),
        organizer: Set(Some("Eventra Demo".to_string())),
        start_date: Set(Some((Utc::now() + Duration::days(7)).into())),
        location: Set(Some("Grand Ballroom".to_string())),
        format: Set(Some("offline".to_string())),
        script_link: Set(None),
        timeline_link: Set(None),
        status: Set(EventStatus::Planning),
        outcome_summary: Set(None),
        created_at: Set(Utc::now().into()),
    };

    if let Err(e) = event.insert(db).await {
        eprintln!("Failed to insert demo event: {e}");
        return;
    }
    println!("  Created demo event: Annual Company Gathering");

    // One line linked to the catalog, one free-text line
    let linked = event_finances::ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(demo_event_id()),
        service_id: Set(service_ids.first().copied()),
        service_name: Set(None),
        estimated_amount: Set(price("1000000")),
        estimated_note: Set(Some("Standard package".to_string())),
        extra_amount: Set(price("200000")),
        extra_note: Set(Some("Overtime after 10pm".to_string())),
    };
    let free_text = event_finances::ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(demo_event_id()),
        service_id: Set(None),
        service_name: Set(Some("Custom Decor".to_string())),
        estimated_amount: Set(price("500000")),
        estimated_note: Set(None),
        extra_amount: Set(Decimal::ZERO),
        extra_note: Set(None),
    };

    for line in [linked, free_text] {
        if let Err(e) = line.insert(db).await {
            eprintln!("Failed to insert finance line: {e}");
        } else {
            println!("  Created finance line");
        }
    }
}
