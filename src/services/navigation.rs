// src/services/navigation.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Pages the assistant can link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Homepage,
    Profile,
    Booking,
    Listing,
    Flights,
    CarRentals,
    Attractions,
    AirportTaxis,
    Login,
}

impl Destination {
    pub const ALL: [Destination; 9] = [
        Destination::Homepage,
        Destination::Profile,
        Destination::Booking,
        Destination::Listing,
        Destination::Flights,
        Destination::CarRentals,
        Destination::Attractions,
        Destination::AirportTaxis,
        Destination::Login,
    ];

    /// Path of the page relative to the site root.
    pub fn suffix(self) -> &'static str {
        match self {
            Destination::Homepage => "Home Page/index.html",
            Destination::Profile => "profile and bookings/profile&bookings.html",
            Destination::Booking => "Booking Form/booking-form.html",
            Destination::Listing => "listing-page/listing.html",
            Destination::Flights => "Flights/flights.html",
            Destination::CarRentals => "Car Rentals/car-rentals.html",
            Destination::Attractions => "Attractions/attractions.html",
            Destination::AirportTaxis => "Airport Taxis/airport-taxis.html",
            Destination::Login => "Roomify-login/login.html",
        }
    }
}

/// Where the visitor currently is in the site hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub path: String,
    pub depth: usize,
    pub is_home: bool,
}

impl PageLocation {
    /// Parse a page path or absolute URL. Locations that cannot be placed in
    /// the hierarchy are treated as the site root.
    pub fn parse(location: &str) -> Self {
        let without_query = location.split(['?', '#']).next().unwrap_or_default();
        let path = strip_origin(without_query).replace("%20", " ");

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if !path.starts_with('/') || segments.iter().any(|s| *s == "..") {
            tracing::warn!(location, "unrecognized page location, assuming site root");
            return Self { path, depth: 0, is_home: true };
        }

        let depth = segments.len().saturating_sub(1);
        let is_home =
            path.contains("Home Page") || path.contains("index.html") || segments.len() <= 1;

        Self { path, depth, is_home }
    }

    /// Prefix that climbs from this page back to the site root.
    pub fn base_path(&self) -> String {
        if self.depth == 0 {
            "./".to_string()
        } else {
            "../".repeat(self.depth)
        }
    }
}

/// Drop `scheme://host` when the location starts with one.
fn strip_origin(location: &str) -> &str {
    match location.find("://").filter(|&idx| !location[..idx].contains('/')) {
        Some(idx) => {
            let rest = &location[idx + 3..];
            rest.find('/').map(|slash| &rest[slash..]).unwrap_or("/")
        }
        None => location,
    }
}

/// Relative link for every [`Destination`], computed once per page view.
#[derive(Debug, Clone, Serialize)]
pub struct RouteTable {
    routes: HashMap<Destination, String>,
}

impl RouteTable {
    pub fn for_location(location: &PageLocation) -> Self {
        let base = location.base_path();
        let routes = Destination::ALL
            .iter()
            .map(|&dest| {
                let href = match dest {
                    Destination::Homepage if location.is_home => "index.html".to_string(),
                    _ => format!("{base}{}", dest.suffix()),
                };
                (dest, href)
            })
            .collect();
        Self { routes }
    }

    pub fn from_path(path: &str) -> Self {
        Self::for_location(&PageLocation::parse(path))
    }

    pub fn resolve(&self, dest: Destination) -> &str {
        // Built from Destination::ALL, so every key is present.
        self.routes.get(&dest).map(String::as_str).unwrap_or_default()
    }
}
