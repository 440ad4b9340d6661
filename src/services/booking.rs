// src/services/booking.rs
//! Search form and booking form rules: date bounds, price summary, card
//! field clean-up and the simulated reservation call.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use super::auth::is_valid_email;
use crate::error::ValidationError;

pub const DEFAULT_NIGHTLY_PRICE: f64 = 1500.0;
pub const DEFAULT_CURRENCY: &str = "EGP";
pub const LISTING_CURRENCY: &str = "USD";

/// A host listing the booking form can be opened for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub property_types: Vec<String>,
    #[serde(default)]
    pub guests: Option<u32>,
}

/// Form values derived from a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPrefill {
    pub destination: String,
    pub property_type: Option<String>,
    pub guests: Option<u32>,
}

pub fn property_type_value(label: &str) -> String {
    let label = label.to_lowercase();
    match label.as_str() {
        "hotels" => "hotel",
        "apartments" => "apartment",
        "villas" => "villa",
        "resorts" => "resort",
        "bed & breakfast" => "bed-breakfast",
        "guest houses" => "guest-house",
        "hostels" => "hostel",
        other => other,
    }
    .to_string()
}

impl Listing {
    pub fn prefill(&self) -> ListingPrefill {
        ListingPrefill {
            destination: self.title.clone().unwrap_or_default(),
            property_type: self.property_types.first().map(|t| property_type_value(t)),
            guests: self.guests,
        }
    }
}

/// Earliest allowed checkout for a check-in date.
pub fn min_checkout(check_in: NaiveDate) -> NaiveDate {
    check_in.succ_opt().unwrap_or(check_in)
}

/// Move a checkout earlier than the minimum up to it.
pub fn clamp_checkout(check_in: NaiveDate, check_out: NaiveDate) -> NaiveDate {
    check_out.max(min_checkout(check_in))
}

pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    (check_out - check_in).num_days().unsigned_abs() as u32
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Two decimals with comma thousands separators, e.g. `12,345.50`.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac}")
}

fn plural(count: u32, singular: &str) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingDraft {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub listing: Option<Listing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub rooms: String,
    pub nights: u32,
    pub currency: String,
    pub total: f64,
    pub total_display: String,
    /// Form values to pre-fill when the booking was started from a listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefill: Option<ListingPrefill>,
}

pub fn summarize(draft: &BookingDraft) -> BookingSummary {
    let destination = draft
        .destination
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .or_else(|| draft.listing.as_ref().and_then(|l| l.title.clone()))
        .unwrap_or_else(|| "-".to_string());

    let (currency, nightly) = match &draft.listing {
        Some(listing) => (
            LISTING_CURRENCY,
            listing
                .price
                .filter(|p| *p != 0.0)
                .unwrap_or(DEFAULT_NIGHTLY_PRICE),
        ),
        None => (DEFAULT_CURRENCY, DEFAULT_NIGHTLY_PRICE),
    };

    let (nights, total) = match (draft.check_in, draft.check_out, draft.rooms) {
        (Some(check_in), Some(check_out), Some(rooms)) => {
            let nights = nights_between(check_in, check_out);
            (nights, f64::from(nights) * f64::from(rooms.max(1)) * nightly)
        }
        _ => (0, 0.0),
    };

    BookingSummary {
        destination,
        check_in: draft.check_in.map(format_date).unwrap_or_else(|| "-".into()),
        check_out: draft.check_out.map(format_date).unwrap_or_else(|| "-".into()),
        guests: draft.guests.map(|g| plural(g, "Guest")).unwrap_or_else(|| "-".into()),
        rooms: draft.rooms.map(|r| plural(r, "Room")).unwrap_or_else(|| "-".into()),
        nights,
        currency: currency.to_string(),
        total,
        total_display: format!("{currency} {}", format_amount(total)),
        prefill: draft.listing.as_ref().map(Listing::prefill),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaySearch {
    pub destination: String,
    pub check_in: NaiveDate,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    pub guests: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub check_out: NaiveDate,
    pub min_check_out: NaiveDate,
    pub description: String,
}

/// Validate the home page search form. A missing or too-early checkout is
/// moved to the day after check-in.
pub fn search_summary(search: &StaySearch, today: NaiveDate) -> Result<SearchSummary, ValidationError> {
    if search.check_in < today {
        return Err(ValidationError::CheckinInPast);
    }
    let min_check_out = min_checkout(search.check_in);
    let check_out = search
        .check_out
        .map(|c| clamp_checkout(search.check_in, c))
        .unwrap_or(min_check_out);

    let description = format!(
        "Searching for:\nDestination: {}\nCheck-in: {}\nCheck-out: {}\nGuests: {}",
        search.destination, search.check_in, check_out, search.guests
    );
    Ok(SearchSummary { check_out, min_check_out, description })
}

/// Keep digits only and group them in fours.
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    digits
        .chunks(4)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn sanitize_cvv(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Expiry-year choices: this year and the nine after it.
pub fn expiry_years(today: NaiveDate) -> Vec<i32> {
    let year = today.year();
    (year..year + 10).collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub destination: String,
    pub property_type: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub rooms: Option<u32>,
    pub room_type: String,
    pub card_name: String,
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
    pub special_requests: String,
    pub newsletter: bool,
    pub listing: Option<Listing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub title: String,
    pub message: String,
    pub summary: BookingSummary,
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

impl BookingSubmission {
    pub fn validate(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ValidationError> {
        require(&self.first_name, "first name")?;
        require(&self.last_name, "last name")?;
        require(&self.email, "email")?;
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        require(&self.phone, "phone")?;
        require(&self.destination, "destination")?;
        let check_in = self.check_in.ok_or(ValidationError::MissingField("check-in"))?;
        let check_out = self.check_out.ok_or(ValidationError::MissingField("check-out"))?;
        self.guests.ok_or(ValidationError::MissingField("guests"))?;
        self.rooms.ok_or(ValidationError::MissingField("rooms"))?;
        require(&self.card_name, "name on card")?;
        require(&self.card_number, "card number")?;
        require(&self.expiry_month, "expiry month")?;
        require(&self.expiry_year, "expiry year")?;
        require(&self.cvv, "CVV")?;

        if check_in < today {
            return Err(ValidationError::CheckinInPast);
        }
        if check_out < min_checkout(check_in) {
            return Err(ValidationError::CheckoutBeforeCheckin);
        }
        Ok((check_in, check_out))
    }

    fn draft(&self) -> BookingDraft {
        BookingDraft {
            destination: Some(self.destination.clone()),
            check_in: self.check_in,
            check_out: self.check_out,
            guests: self.guests,
            rooms: self.rooms,
            listing: self.listing.clone(),
        }
    }
}

/// Validate and "process" a reservation. Nothing is charged or stored.
pub async fn submit_booking(
    submission: &BookingSubmission,
    today: NaiveDate,
    latency: Duration,
) -> Result<BookingConfirmation, ValidationError> {
    submission.validate(today)?;
    sleep(latency).await;

    let summary = summarize(&submission.draft());
    tracing::info!(
        destination = %summary.destination,
        nights = summary.nights,
        total = %summary.total_display,
        "booking submitted"
    );

    Ok(BookingConfirmation {
        title: "Booking Confirmed!".to_string(),
        message: format!(
            "Your reservation has been successfully submitted. A confirmation email will be sent to {}",
            submission.email.trim()
        ),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_price_is_egp_per_room_night() {
        let draft = BookingDraft {
            destination: Some("Cairo".into()),
            check_in: Some(date(2026, 3, 1)),
            check_out: Some(date(2026, 3, 4)),
            guests: Some(2),
            rooms: Some(2),
            listing: None,
        };
        let summary = summarize(&draft);
        assert_eq!(summary.nights, 3);
        assert_eq!(summary.total, 9000.0);
        assert_eq!(summary.total_display, "EGP 9,000.00");
        assert_eq!(summary.check_in, "Mar 1, 2026");
        assert_eq!(summary.guests, "2 Guests");
        assert_eq!(summary.rooms, "2 Rooms");
        assert!(summary.prefill.is_none());
    }

    #[test]
    fn listing_price_switches_to_usd() {
        let draft = BookingDraft {
            check_in: Some(date(2026, 3, 1)),
            check_out: Some(date(2026, 3, 2)),
            rooms: Some(1),
            guests: Some(1),
            listing: Some(Listing {
                id: "l1".into(),
                title: Some("Nile View Loft".into()),
                price: Some(120.5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let summary = summarize(&draft);
        assert_eq!(summary.destination, "Nile View Loft");
        assert_eq!(summary.total_display, "USD 120.50");
        assert_eq!(summary.guests, "1 Guest");
        assert_eq!(summary.rooms, "1 Room");
        let prefill = summary.prefill.unwrap();
        assert_eq!(prefill.destination, "Nile View Loft");
        assert_eq!(prefill.property_type, None);
    }

    #[test]
    fn incomplete_draft_shows_placeholders() {
        let summary = summarize(&BookingDraft::default());
        assert_eq!(summary.destination, "-");
        assert_eq!(summary.check_in, "-");
        assert_eq!(summary.guests, "-");
        assert_eq!(summary.total_display, "EGP 0.00");

        let with_listing = BookingDraft {
            listing: Some(Listing::default()),
            ..Default::default()
        };
        assert_eq!(summarize(&with_listing).total_display, "USD 0.00");
    }

    #[test]
    fn zero_listing_price_uses_default_rate() {
        let draft = BookingDraft {
            check_in: Some(date(2026, 3, 1)),
            check_out: Some(date(2026, 3, 3)),
            rooms: Some(1),
            listing: Some(Listing {
                id: "free".into(),
                price: Some(0.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let summary = summarize(&draft);
        assert_eq!(summary.total, 3000.0);
        assert_eq!(summary.total_display, "USD 3,000.00");
    }

    #[test]
    fn reversed_dates_count_absolute_nights() {
        assert_eq!(nights_between(date(2026, 3, 5), date(2026, 3, 1)), 4);
    }

    #[test]
    fn zero_rooms_count_as_one() {
        let draft = BookingDraft {
            check_in: Some(date(2026, 3, 1)),
            check_out: Some(date(2026, 3, 2)),
            rooms: Some(0),
            ..Default::default()
        };
        assert_eq!(summarize(&draft).total, 1500.0);
    }

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234567.5), "1,234,567.50");
    }

    #[test]
    fn checkout_is_clamped_to_day_after_checkin() {
        let check_in = date(2026, 12, 31);
        assert_eq!(min_checkout(check_in), date(2027, 1, 1));
        assert_eq!(clamp_checkout(check_in, date(2026, 12, 30)), date(2027, 1, 1));
        assert_eq!(clamp_checkout(check_in, date(2027, 1, 9)), date(2027, 1, 9));
    }

    #[test]
    fn search_fills_missing_checkout() {
        let search = StaySearch {
            destination: "Luxor".into(),
            check_in: date(2026, 5, 10),
            check_out: None,
            guests: "2".into(),
        };
        let summary = search_summary(&search, date(2026, 5, 1)).unwrap();
        assert_eq!(summary.check_out, date(2026, 5, 11));
        assert_eq!(
            summary.description,
            "Searching for:\nDestination: Luxor\nCheck-in: 2026-05-10\nCheck-out: 2026-05-11\nGuests: 2"
        );

        let err = search_summary(&search, date(2026, 6, 1)).unwrap_err();
        assert_eq!(err, ValidationError::CheckinInPast);
    }

    #[test]
    fn card_fields_are_cleaned() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-11a11 111"), "4111 1111 111");
        assert_eq!(format_card_number(""), "");
        assert_eq!(sanitize_cvv("1a2 3"), "123");
    }

    #[test]
    fn ten_expiry_years() {
        let years = expiry_years(date(2026, 10, 18));
        assert_eq!(years.len(), 10);
        assert_eq!(years[0], 2026);
        assert_eq!(years[9], 2035);
    }

    #[test]
    fn listing_prefill_maps_property_type() {
        let listing = Listing {
            id: "x".into(),
            title: Some("Seaside B&B".into()),
            property_types: vec!["Bed & Breakfast".into(), "Villas".into()],
            guests: Some(3),
            ..Default::default()
        };
        let prefill = listing.prefill();
        assert_eq!(prefill.destination, "Seaside B&B");
        assert_eq!(prefill.property_type.as_deref(), Some("bed-breakfast"));
        assert_eq!(prefill.guests, Some(3));
        assert_eq!(property_type_value("Treehouses"), "treehouses");
    }
}
