//! Booking and payment method commands.

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;

use sb_core::config::AppConfig;
use sb_core::error::{SbError, SbResult};
use sb_models::{BookingRequest, BookingStatus};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum BookingsAction {
    /// List the signed-in user's bookings.
    List {
        /// Filter by status (pending, confirmed, cancelled).
        #[arg(short, long)]
        status: Option<BookingStatus>,
    },
    /// Book a room.
    Create {
        #[arg(long)]
        room: i64,
        #[arg(long)]
        hotel: i64,
        /// Check-in date (YYYY-MM-DD).
        #[arg(long)]
        check_in: NaiveDate,
        /// Check-out date (YYYY-MM-DD).
        #[arg(long)]
        check_out: NaiveDate,
        #[arg(long, default_value = "1")]
        adults: u32,
        #[arg(long, default_value = "0")]
        children: u32,
        #[arg(long, default_value = "0")]
        infants: u32,
        /// Payment method id (see `bookings payment-methods`).
        #[arg(long)]
        payment_method: i64,
        #[arg(long)]
        payment_option: Option<String>,
    },
    /// List accepted payment methods.
    PaymentMethods,
}

pub async fn run(config: AppConfig, action: BookingsAction, format: OutputFormat) -> SbResult<()> {
    let ctx = super::AppContext::init(config)?;
    let api = ctx.api();

    match action {
        BookingsAction::List { status } => {
            let session = ctx.require_session()?;
            let bookings = api
                .list_bookings(session.user_id(), status)
                .await
                .map_err(super::fail)?;

            match format {
                OutputFormat::Json => super::print_json(&bookings),
                OutputFormat::Text => {
                    if bookings.is_empty() {
                        println!("No bookings.");
                        return Ok(());
                    }
                    let mut table =
                        super::table(vec!["ID", "Hotel", "Room", "Check-in", "Check-out", "Status"]);
                    for b in &bookings {
                        table.add_row(vec![
                            b.booking_id.to_string(),
                            super::cell(b.hotel_name.as_deref()),
                            super::cell(b.room_name.as_deref()),
                            b.check_in_date.to_string(),
                            b.check_out_date.to_string(),
                            b.status.as_str().to_string(),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        BookingsAction::Create {
            room,
            hotel,
            check_in,
            check_out,
            adults,
            children,
            infants,
            payment_method,
            payment_option,
        } => {
            if check_out <= check_in {
                return Err(SbError::Internal(
                    "check-out date must be after check-in date".into(),
                ));
            }
            let session = ctx.require_session()?;
            let request = BookingRequest {
                user_id: session.user_id(),
                room_id: room,
                hotel_id: hotel,
                check_in_date: check_in,
                check_out_date: check_out,
                adults,
                children,
                infants,
                payment_option,
                payment_method_id: payment_method,
            };

            let pb = super::spinner("Booking...");
            let result = api.create_booking(&request).await;
            pb.finish_and_clear();
            let booking = result.map_err(super::fail)?;

            match format {
                OutputFormat::Json => super::print_json(&booking),
                OutputFormat::Text => println!(
                    "  {} Booking #{} {} ({} to {}).",
                    style("OK").green().bold(),
                    booking.booking_id,
                    booking.status.as_str().to_lowercase(),
                    booking.check_in_date,
                    booking.check_out_date
                ),
            }
        }
        BookingsAction::PaymentMethods => {
            let methods = api.list_payment_methods().await.map_err(super::fail)?;
            match format {
                OutputFormat::Json => super::print_json(&methods),
                OutputFormat::Text => {
                    let mut table = super::table(vec!["ID", "Code", "Name"]);
                    for m in &methods {
                        table.add_row(vec![
                            m.id.to_string(),
                            super::cell(m.code.as_deref()),
                            m.name.clone(),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
    }

    Ok(())
}
