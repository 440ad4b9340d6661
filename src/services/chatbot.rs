use serde::{Deserialize, Serialize};

use super::navigation::{Destination, RouteTable};
use super::session_manager::{ActionTarget, LinkStyle, MessageBody, QuickAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Greeting,
    Profile,
    Booking,
    Home,
    Search,
    Flights,
    CarRentals,
    Attractions,
    AirportTaxi,
    Listing,
    Help,
    Logout,
    Thanks,
    Unknown,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Greeting => "Greeting",
            Intent::Profile => "Profile",
            Intent::Booking => "Booking",
            Intent::Home => "Home",
            Intent::Search => "Search",
            Intent::Flights => "Flights",
            Intent::CarRentals => "CarRentals",
            Intent::Attractions => "Attractions",
            Intent::AirportTaxi => "AirportTaxi",
            Intent::Listing => "Listing",
            Intent::Help => "Help",
            Intent::Logout => "Logout",
            Intent::Thanks => "Thanks",
            Intent::Unknown => "Unknown",
        }
    }
}

/// Keyword groups in priority order. The first group with a keyword
/// contained in the lower-cased message wins.
pub const KEYWORD_TABLE: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["hello", "hi", "hey"]),
    (Intent::Profile, &["profile", "my account", "account"]),
    (Intent::Booking, &["booking", "book", "reserve"]),
    (Intent::Home, &["home", "homepage", "main"]),
    (Intent::Search, &["search", "find", "stays"]),
    (Intent::Flights, &["flights", "flight"]),
    (Intent::CarRentals, &["car", "rental"]),
    (Intent::Attractions, &["attraction", "activity"]),
    (Intent::AirportTaxi, &["taxi", "airport"]),
    (Intent::Listing, &["listing", "property", "host"]),
    (Intent::Help, &["help", "support", "assist"]),
    (Intent::Logout, &["logout", "log out", "sign out"]),
    (Intent::Thanks, &["thank", "thanks"]),
];

pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();

    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| msg_lower.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Unknown)
}

/// Content the bot appends for one intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub body: MessageBody,
    pub actions: Vec<QuickAction>,
}

const LIST_STYLE: &str = r#"style="margin: 8px 0; padding-left: 20px;""#;

fn bullets(intro: &str, items: &[&str]) -> String {
    let items: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
    format!("<p>{intro}</p><ul {LIST_STYLE}>{items}</ul>")
}

fn follow_up(label: &str, intent: Intent) -> QuickAction {
    QuickAction {
        label: label.to_string(),
        target: ActionTarget::FollowUp { intent },
    }
}

fn single_link(html: String, label: &str, routes: &RouteTable, dest: Destination) -> Reply {
    Reply {
        body: MessageBody::Html(html),
        actions: vec![QuickAction {
            label: label.to_string(),
            target: ActionTarget::Link {
                href: routes.resolve(dest).to_string(),
                style: LinkStyle::Primary,
            },
        }],
    }
}

pub fn generate_reply(intent: Intent, routes: &RouteTable) -> Reply {
    use Intent::*;

    match intent {
        Greeting => Reply {
            body: MessageBody::Html(
                "<p><strong>Hello! 👋</strong></p>\
                 <p>I'm your Roomify assistant. I can help you navigate to different sections of our platform!</p>\
                 <p><strong>What would you like to do?</strong></p>"
                    .to_string(),
            ),
            actions: vec![
                follow_up("🏠 Home", Home),
                follow_up("👤 Profile", Profile),
                follow_up("📅 Book Now", Booking),
                follow_up("✈️ Flights", Flights),
                follow_up("🚗 Car Rentals", CarRentals),
                follow_up("🏛️ Attractions", Attractions),
            ],
        },

        Profile => single_link(
            bullets(
                "Here's your profile page where you can:",
                &["View your bookings", "Edit your profile", "Manage your account settings"],
            ),
            "Go to My Profile →",
            routes,
            Destination::Profile,
        ),

        Booking => single_link(
            bullets(
                "Ready to book your stay? I can take you to the booking form where you can:",
                &["Fill in your details", "Select dates and guests", "Complete your reservation"],
            ),
            "Open Booking Form →",
            routes,
            Destination::Booking,
        ),

        Home => single_link(
            bullets(
                "Let me take you back to the homepage where you can:",
                &["Search for accommodations", "Browse popular destinations", "View special offers"],
            ),
            "Go to Homepage →",
            routes,
            Destination::Homepage,
        ),

        Search => single_link(
            "<p>Search for amazing places to stay! 🔍</p>".to_string(),
            "Start Searching →",
            routes,
            Destination::Homepage,
        ),

        Flights => single_link(
            "<p>Search and book flights to your favorite destinations! ✈️</p>".to_string(),
            "Search Flights →",
            routes,
            Destination::Flights,
        ),

        CarRentals => single_link(
            "<p>Find the perfect car for your journey! 🚗</p>".to_string(),
            "Browse Cars →",
            routes,
            Destination::CarRentals,
        ),

        Attractions => single_link(
            "<p>Discover amazing attractions and activities! 🏛️</p>".to_string(),
            "Explore Attractions →",
            routes,
            Destination::Attractions,
        ),

        AirportTaxi => single_link(
            "<p>Book reliable airport transfer services! 🚕</p>".to_string(),
            "Book Airport Taxi →",
            routes,
            Destination::AirportTaxis,
        ),

        Listing => single_link(
            "<p>Want to become a host? List your property and start earning! 🏡</p>".to_string(),
            "List Your Property →",
            routes,
            Destination::Listing,
        ),

        Help => Reply {
            body: MessageBody::Html(format!(
                "<p><strong>I can help you with:</strong></p><ul {LIST_STYLE}>\
                 <li>Navigating to different pages</li>\
                 <li>Finding bookings and reservations</li>\
                 <li>Accessing your profile</li>\
                 <li>Searching for accommodations</li></ul>\
                 <p>Just tell me what you'd like to do!</p>"
            )),
            actions: Vec::new(),
        },

        Logout => Reply {
            body: MessageBody::Html(
                "<p>Logging out will take you back to the homepage. 👋</p>".to_string(),
            ),
            actions: vec![QuickAction {
                label: "Log Out →".to_string(),
                target: ActionTarget::Link {
                    href: routes.resolve(Destination::Homepage).to_string(),
                    style: LinkStyle::Secondary,
                },
            }],
        },

        Thanks => Reply {
            body: MessageBody::Text(
                "You're welcome! 😊 Is there anything else I can help you with?".to_string(),
            ),
            actions: Vec::new(),
        },

        Unknown => Reply {
            body: MessageBody::Html(
                "<p>I'm not sure I understood that. 😅</p><p>I can help you navigate to:</p>"
                    .to_string(),
            ),
            actions: vec![
                follow_up("Home", Home),
                follow_up("Profile", Profile),
                follow_up("Booking", Booking),
                follow_up("Help", Help),
            ],
        },
    }
}
