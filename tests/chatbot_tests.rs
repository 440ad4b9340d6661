use roomify_assistant::services::chatbot::{Intent, KEYWORD_TABLE, Reply, detect_intent, generate_reply};
use roomify_assistant::services::navigation::{Destination, RouteTable};
use roomify_assistant::services::session_manager::{ActionTarget, LinkStyle, MessageBody};

fn link_href(reply: &Reply) -> &str {
    match &reply.actions[..] {
        [action] => match &action.target {
            ActionTarget::Link { href, .. } => href,
            other => panic!("expected a link, got {other:?}"),
        },
        other => panic!("expected exactly one action, got {other:?}"),
    }
}

#[test]
fn test_detect_intent() {
    assert_eq!(detect_intent("Hello there"), Intent::Greeting);
    assert_eq!(detect_intent("show my profile"), Intent::Profile);
    assert_eq!(detect_intent("I want to reserve"), Intent::Booking);
    assert_eq!(detect_intent("take me home"), Intent::Home);
    assert_eq!(detect_intent("find stays in Cairo"), Intent::Search);
    assert_eq!(detect_intent("show me flights"), Intent::Flights);
    assert_eq!(detect_intent("I want to rent a car"), Intent::CarRentals);
    assert_eq!(detect_intent("any activity nearby?"), Intent::Attractions);
    assert_eq!(detect_intent("I need a taxi to the airport"), Intent::AirportTaxi);
    assert_eq!(detect_intent("list my property"), Intent::Listing);
    assert_eq!(detect_intent("I need support"), Intent::Help);
    assert_eq!(detect_intent("please sign out"), Intent::Logout);
    assert_eq!(detect_intent("thanks a lot"), Intent::Thanks);
    assert_eq!(detect_intent("qwerty"), Intent::Unknown);
}

#[test]
fn test_greeting_keywords_are_case_insensitive() {
    for msg in ["HELLO", "Hi", "hEy you", "well, hello", "oh HI there"] {
        assert_eq!(detect_intent(msg), Intent::Greeting, "{msg}");
    }
}

#[test]
fn test_priority_follows_table_order() {
    // Account is listed before booking.
    assert_eq!(detect_intent("book a hotel for my account"), Intent::Profile);
    // Booking is listed before flights.
    assert_eq!(detect_intent("book a flight"), Intent::Booking);
    // Substrings count: "this" contains "hi".
    assert_eq!(detect_intent("is this the flights page"), Intent::Greeting);

    let order: Vec<Intent> = KEYWORD_TABLE.iter().map(|(intent, _)| *intent).collect();
    assert_eq!(
        order,
        vec![
            Intent::Greeting,
            Intent::Profile,
            Intent::Booking,
            Intent::Home,
            Intent::Search,
            Intent::Flights,
            Intent::CarRentals,
            Intent::Attractions,
            Intent::AirportTaxi,
            Intent::Listing,
            Intent::Help,
            Intent::Logout,
            Intent::Thanks,
        ]
    );
}

#[test]
fn test_single_link_intents_resolve_at_every_depth() {
    let single_link = [
        Intent::Profile,
        Intent::Booking,
        Intent::Home,
        Intent::Search,
        Intent::Flights,
        Intent::CarRentals,
        Intent::Attractions,
        Intent::AirportTaxi,
        Intent::Listing,
        Intent::Logout,
    ];
    for path in ["/index.html", "/Flights/flights.html", "/site/Car Rentals/car-rentals.html"] {
        let routes = RouteTable::from_path(path);
        for intent in single_link {
            let reply = generate_reply(intent, &routes);
            assert!(!link_href(&reply).is_empty(), "{intent:?} at {path}");
        }
    }
}

#[test]
fn test_flights_link_from_home_page() {
    let routes = RouteTable::from_path("/Home Page/index.html");
    let reply = generate_reply(Intent::Flights, &routes);
    assert_eq!(link_href(&reply), "../Flights/flights.html");
    assert_eq!(reply.actions[0].label, "Search Flights →");
}

#[test]
fn test_home_and_search_point_at_homepage() {
    let routes = RouteTable::from_path("/Attractions/attractions.html");
    let home = routes.resolve(Destination::Homepage);
    assert_eq!(home, "../Home Page/index.html");
    assert_eq!(link_href(&generate_reply(Intent::Home, &routes)), home);
    assert_eq!(link_href(&generate_reply(Intent::Search, &routes)), home);
}

#[test]
fn test_menu_replies_offer_follow_ups() {
    let routes = RouteTable::from_path("/index.html");

    let greeting = generate_reply(Intent::Greeting, &routes);
    let targets: Vec<_> = greeting.actions.iter().map(|a| a.target.clone()).collect();
    assert_eq!(
        targets,
        [
            Intent::Home,
            Intent::Profile,
            Intent::Booking,
            Intent::Flights,
            Intent::CarRentals,
            Intent::Attractions,
        ]
        .map(|intent| ActionTarget::FollowUp { intent })
    );
    assert!(greeting.body.as_str().contains("Roomify assistant"));

    let unknown = generate_reply(Intent::Unknown, &routes);
    let labels: Vec<&str> = unknown.actions.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, ["Home", "Profile", "Booking", "Help"]);
}

#[test]
fn test_help_and_thanks_have_no_actions() {
    let routes = RouteTable::from_path("/index.html");

    let help = generate_reply(Intent::Help, &routes);
    assert!(help.actions.is_empty());
    assert!(matches!(help.body, MessageBody::Html(_)));

    let thanks = generate_reply(Intent::Thanks, &routes);
    assert!(thanks.actions.is_empty());
    assert_eq!(
        thanks.body,
        MessageBody::Text("You're welcome! 😊 Is there anything else I can help you with?".to_string())
    );
}

#[test]
fn test_link_styles() {
    let routes = RouteTable::from_path("/index.html");
    let style = |intent| match &generate_reply(intent, &routes).actions[0].target {
        ActionTarget::Link { style, .. } => *style,
        other => panic!("expected link, got {other:?}"),
    };
    assert_eq!(style(Intent::Profile), LinkStyle::Primary);
    assert_eq!(style(Intent::Logout), LinkStyle::Secondary);
}
