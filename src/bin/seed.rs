use adapter::{
    database::connect_database_with,
    repository::{room::RoomRepositoryImpl, user::UserRepositoryImpl},
};
use anyhow::Result;
use kernel::model::{
    role::Role,
    room::{event::CreateRoom, RoomType},
    user::event::CreateUser,
};
use kernel::repository::{room::RoomRepository, user::UserRepository};
use shared::{config::AppConfig, error::AppError};
use tracing_subscriber::EnvFilter;

struct SampleRoom {
    room_number: &'static str,
    room_type: RoomType,
    price: f64,
    description: &'static str,
    amenities: &'static [&'static str],
}

const SAMPLE_ROOMS: &[SampleRoom] = &[
    SampleRoom {
        room_number: "101",
        room_type: RoomType::Single,
        price: 100.0,
        description: "Cozy single room with city view, perfect for solo travelers",
        amenities: &["WiFi", "TV", "AC", "Mini Fridge"],
    },
    SampleRoom {
        room_number: "102",
        room_type: RoomType::Single,
        price: 100.0,
        description: "Comfortable single room with modern amenities",
        amenities: &["WiFi", "TV", "AC"],
    },
    SampleRoom {
        room_number: "201",
        room_type: RoomType::Double,
        price: 150.0,
        description: "Spacious double room with queen-size bed and balcony",
        amenities: &["WiFi", "TV", "AC", "Mini Fridge", "Balcony"],
    },
    SampleRoom {
        room_number: "202",
        room_type: RoomType::Double,
        price: 150.0,
        description: "Elegant double room with garden view",
        amenities: &["WiFi", "TV", "AC", "Coffee Maker"],
    },
    SampleRoom {
        room_number: "301",
        room_type: RoomType::Suite,
        price: 250.0,
        description: "Luxurious suite with separate living area and premium amenities",
        amenities: &["WiFi", "Smart TV", "AC", "Mini Bar", "Jacuzzi", "Room Service"],
    },
    SampleRoom {
        room_number: "302",
        room_type: RoomType::Suite,
        price: 250.0,
        description: "Executive suite with panoramic city views",
        amenities: &["WiFi", "Smart TV", "AC", "Mini Bar", "Work Desk"],
    },
    SampleRoom {
        room_number: "401",
        room_type: RoomType::Deluxe,
        price: 350.0,
        description: "Premium deluxe room with king-size bed and luxury furnishings",
        amenities: &[
            "WiFi",
            "Smart TV",
            "AC",
            "Mini Bar",
            "Jacuzzi",
            "Room Service",
            "Butler Service",
        ],
    },
    SampleRoom {
        room_number: "402",
        room_type: RoomType::Deluxe,
        price: 350.0,
        description: "Top-floor deluxe room with stunning views and premium services",
        amenities: &[
            "WiFi",
            "Smart TV",
            "AC",
            "Mini Bar",
            "Jacuzzi",
            "Balcony",
            "Room Service",
        ],
    },
];

impl From<&SampleRoom> for CreateRoom {
    fn from(value: &SampleRoom) -> Self {
        CreateRoom::new(
            value.room_number.into(),
            value.room_type,
            value.price,
            value.description.into(),
            value.amenities.iter().map(|a| a.to_string()).collect(),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let app_config = AppConfig::new()?;
    let pool = connect_database_with(&app_config.database);
    pool.migrate().await?;

    let rooms = RoomRepositoryImpl::new(pool.clone());
    for sample in SAMPLE_ROOMS {
        match rooms.create(sample.into()).await {
            Ok(_) => {}
            // 既に同じ部屋番号があれば触らない
            Err(AppError::Conflict(_)) => {
                tracing::info!(room_number = sample.room_number, "room already exists, skipped")
            }
            Err(e) => return Err(e.into()),
        }
    }

    let users = UserRepositoryImpl::new(pool);
    let accounts = [
        ("Admin User", "admin@hotel.com", "admin123", Role::Admin),
        ("Test User", "user@test.com", "user123", Role::User),
    ];
    for (name, email, password, role) in accounts {
        match users
            .create(CreateUser::new(name.into(), email.into(), password.into(), role))
            .await
        {
            Ok(_) => tracing::info!(email, "user created"),
            Err(AppError::Conflict(_)) => tracing::info!(email, "user already exists, skipped"),
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("seeding finished");
    Ok(())
}
