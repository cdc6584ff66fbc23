//! Hotel, province and review commands.

use clap::Subcommand;

use sb_core::config::AppConfig;
use sb_core::error::{SbError, SbResult};
use sb_models::{Hotel, PriceRange, ReviewRequest};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum HotelsAction {
    /// List all hotels.
    List,
    /// Top-rated hotels.
    Best {
        #[arg(short = 'n', long, default_value = "10")]
        limit: u32,
    },
    /// Show one hotel.
    Show { id: i64 },
    /// Hotels of a province.
    Province {
        /// Province id.
        id: i64,
        /// Sort key (e.g. price, rating).
        #[arg(long)]
        sort_by: Option<String>,
    },
    /// List provinces.
    Provinces,
    /// Show one province.
    ProvinceInfo {
        /// Province id.
        id: i64,
    },
    /// Rooms of a hotel.
    Rooms {
        /// Hotel id.
        id: i64,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        sort_by: Option<String>,
    },
    /// Reviews of a hotel or room.
    Reviews {
        #[arg(long)]
        hotel: Option<i64>,
        #[arg(long)]
        room: Option<i64>,
    },
    /// Review a hotel or room as the signed-in user.
    Review {
        #[arg(long)]
        hotel: Option<i64>,
        #[arg(long)]
        room: Option<i64>,
        /// Rating from 1 to 5.
        #[arg(short, long)]
        rating: u8,
        #[arg(short, long)]
        comment: String,
    },
}

pub async fn run(config: AppConfig, action: HotelsAction, format: OutputFormat) -> SbResult<()> {
    let ctx = super::AppContext::init(config)?;
    let api = ctx.api();

    match action {
        HotelsAction::List => {
            let hotels = api.list_hotels().await.map_err(super::fail)?;
            print_hotels(&hotels, format);
        }
        HotelsAction::Best { limit } => {
            let hotels = api.best_hotels(limit).await.map_err(super::fail)?;
            print_hotels(&hotels, format);
        }
        HotelsAction::Province { id, sort_by } => {
            let hotels = api
                .hotels_by_province(id, sort_by.as_deref())
                .await
                .map_err(super::fail)?;
            print_hotels(&hotels, format);
        }
        HotelsAction::Show { id } => {
            let hotel = api.get_hotel(id).await.map_err(super::fail)?;
            match format {
                OutputFormat::Json => super::print_json(&hotel),
                OutputFormat::Text => {
                    println!("{} (#{})", console::style(&hotel.name).bold(), hotel.id);
                    println!("Address:   {}", super::cell(hotel.address.as_deref()));
                    println!("Province:  {}", super::cell(hotel.province_name.as_deref()));
                    if let Some(stars) = hotel.star_rating {
                        println!("Rating:    {stars:.1}");
                    }
                    if let Some(price) = hotel.starting_price {
                        println!("From:      {}", super::format_price(price));
                    }
                    if let Some(desc) = hotel.description.as_deref() {
                        println!("\n{desc}");
                    }
                }
            }
        }
        HotelsAction::Provinces => {
            let provinces = api.list_provinces().await.map_err(super::fail)?;
            match format {
                OutputFormat::Json => super::print_json(&provinces),
                OutputFormat::Text => {
                    let mut table = super::table(vec!["ID", "Province"]);
                    for p in &provinces {
                        table.add_row(vec![p.id.to_string(), p.province_name.clone()]);
                    }
                    println!("{table}");
                }
            }
        }
        HotelsAction::ProvinceInfo { id } => {
            let province = api.get_province(id).await.map_err(super::fail)?;
            match format {
                OutputFormat::Json => super::print_json(&province),
                OutputFormat::Text => {
                    println!("{} (#{})", console::style(&province.province_name).bold(), province.id);
                    println!("Image:     {}", super::cell(province.image_url.as_deref()));
                }
            }
        }
        HotelsAction::Rooms {
            id,
            min_price,
            max_price,
            sort_by,
        } => {
            let range = PriceRange {
                min_price,
                max_price,
            };
            let rooms = api
                .hotel_rooms(id, range, sort_by.as_deref())
                .await
                .map_err(super::fail)?;
            super::rooms::print_rooms(&rooms, format);
        }
        HotelsAction::Reviews { hotel, room } => {
            let reviews = api.list_reviews(hotel, room).await.map_err(super::fail)?;
            match format {
                OutputFormat::Json => super::print_json(&reviews),
                OutputFormat::Text => {
                    if reviews.is_empty() {
                        println!("No reviews.");
                        return Ok(());
                    }
                    let mut table = super::table(vec!["Rating", "By", "Date", "Comment"]);
                    for r in &reviews {
                        table.add_row(vec![
                            "*".repeat(r.rating.min(5) as usize),
                            r.full_name.clone(),
                            r.comment_date
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "-".into()),
                            super::truncate(r.comment.as_deref().unwrap_or("-"), 60),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        HotelsAction::Review {
            hotel,
            room,
            rating,
            comment,
        } => {
            if hotel.is_none() && room.is_none() {
                return Err(SbError::Internal("pass --hotel or --room".into()));
            }
            if !(1..=5).contains(&rating) {
                return Err(SbError::Internal("rating must be between 1 and 5".into()));
            }
            let session = ctx.require_session()?;
            let request = ReviewRequest {
                hotel_id: hotel,
                room_id: room,
                user_id: Some(session.user_id()),
                rating,
                comment,
            };
            let review = api.create_review(&request).await.map_err(super::fail)?;
            match format {
                OutputFormat::Json => super::print_json(&review),
                OutputFormat::Text => println!(
                    "  {} Review #{} posted.",
                    console::style("OK").green().bold(),
                    review.id
                ),
            }
        }
    }

    Ok(())
}

fn print_hotels(hotels: &[Hotel], format: OutputFormat) {
    match format {
        OutputFormat::Json => super::print_json(hotels),
        OutputFormat::Text => {
            if hotels.is_empty() {
                println!("No hotels.");
                return;
            }
            let mut table = super::table(vec!["ID", "Name", "Province", "Rating", "From"]);
            for h in hotels {
                table.add_row(vec![
                    h.id.to_string(),
                    super::truncate(&h.name, 40),
                    super::cell(h.province_name.as_deref()),
                    h.star_rating
                        .map(|s| format!("{s:.1}"))
                        .unwrap_or_else(|| "-".into()),
                    h.starting_price
                        .map(super::format_price)
                        .unwrap_or_else(|| "-".into()),
                ]);
            }
            println!("{table}");
            println!("\n{} hotel(s)", hotels.len());
        }
    }
}
