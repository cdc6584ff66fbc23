//! Room commands.

use clap::Subcommand;
use console::style;

use sb_core::config::AppConfig;
use sb_core::error::SbResult;
use sb_models::{RoomSearchQuery, RoomSummary, SortDirection};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum RoomsAction {
    /// List rooms, optionally filtered by title.
    List {
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Search rooms with filters and paging.
    Search {
        /// Free-text keyword.
        keyword: Option<String>,
        #[arg(long)]
        hotel: Option<i64>,
        #[arg(long)]
        room_type: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        adults: Option<u32>,
        #[arg(long)]
        children: Option<u32>,
        /// Zero-based page number.
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort descending.
        #[arg(long)]
        desc: bool,
    },
    /// Show one room with its images and features.
    Show { id: i64 },
    /// Show one image of a room.
    Image {
        /// Room id.
        room: i64,
        /// Image id.
        image: i64,
    },
}

pub async fn run(config: AppConfig, action: RoomsAction, format: OutputFormat) -> SbResult<()> {
    let ctx = super::AppContext::init(config)?;
    let api = ctx.api();

    match action {
        RoomsAction::List { title } => {
            let rooms = api.list_rooms(title.as_deref()).await.map_err(super::fail)?;
            print_rooms(&rooms, format);
        }
        RoomsAction::Search {
            keyword,
            hotel,
            room_type,
            min_price,
            max_price,
            adults,
            children,
            page,
            size,
            sort_by,
            desc,
        } => {
            let sort_direction = match (&sort_by, desc) {
                (_, true) => Some(SortDirection::Desc),
                (Some(_), false) => Some(SortDirection::Asc),
                (None, false) => None,
            };
            let query = RoomSearchQuery {
                keyword,
                hotel_id: hotel,
                room_type,
                min_price,
                max_price,
                max_adults: adults,
                max_children: children,
                page,
                size,
                sort_by,
                sort_direction,
            };

            let pb = super::spinner("Searching rooms...");
            let result = api.search_rooms(&query).await;
            pb.finish_and_clear();
            let page = result.map_err(super::fail)?;

            match format {
                OutputFormat::Json => super::print_json(&page),
                OutputFormat::Text => {
                    print_rooms(&page.content, format);
                    println!(
                        "Page {} of {} ({} room(s) total)",
                        page.page + 1,
                        page.total_pages.max(1),
                        page.total_elements
                    );
                }
            }
        }
        RoomsAction::Show { id } => {
            let room = api.get_room(id).await.map_err(super::fail)?;
            match format {
                OutputFormat::Json => super::print_json(&room),
                OutputFormat::Text => {
                    println!("{} (#{})", style(&room.title).bold(), room.id);
                    println!("Hotel:     {}", super::cell(room.hotel_name.as_deref()));
                    println!("Price:     {}", super::format_price(room.price));
                    println!(
                        "Sleeps:    {} guest(s), {} bedroom(s), {} bed(s), {} bathroom(s)",
                        room.guest_count, room.bedroom_count, room.bed_count, room.bath_room_count
                    );
                    if !room.features.is_empty() {
                        let names: Vec<_> = room.features.iter().map(|f| f.title.as_str()).collect();
                        println!("Features:  {}", names.join(", "));
                    }
                    println!("Images:    {}", room.images.len());
                    for image in &room.images {
                        println!("  #{:<6} {}", image.id, image.image_url);
                    }
                    if let Some(desc) = room.description.as_deref() {
                        println!("\n{desc}");
                    }
                }
            }
        }
        RoomsAction::Image { room, image } => {
            let image = api.room_image(room, image).await.map_err(super::fail)?;
            match format {
                OutputFormat::Json => super::print_json(&image),
                OutputFormat::Text => {
                    println!("Image #{} of room #{room}", image.id);
                    println!("URL:       {}", image.image_url);
                    println!("Size:      {}", super::cell(image.size.as_deref()));
                }
            }
        }
    }

    Ok(())
}

pub fn print_rooms(rooms: &[RoomSummary], format: OutputFormat) {
    match format {
        OutputFormat::Json => super::print_json(rooms),
        OutputFormat::Text => {
            if rooms.is_empty() {
                println!("No rooms.");
                return;
            }
            let mut table = super::table(vec!["ID", "Room", "Hotel", "Price"]);
            for r in rooms {
                table.add_row(vec![
                    r.id.to_string(),
                    super::truncate(&r.title, 40),
                    super::cell(r.hotel_name.as_deref()),
                    super::format_price(r.price),
                ]);
            }
            println!("{table}");
        }
    }
}
