use super::*;

#[test]
fn parses_endpoint_command() {
    let cli = Cli::try_parse_from(["dinewise-cli", "endpoint"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Endpoint {
            strict: false,
            assistant: false
        }
    ));
}

#[test]
fn parses_endpoint_strict() {
    let cli = Cli::try_parse_from(["dinewise-cli", "endpoint", "--strict"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Endpoint { strict: true, .. }
    ));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["dinewise-cli"]).is_err());
}

#[test]
fn locations_defaults_to_full_list() {
    let cli = Cli::try_parse_from(["dinewise-cli", "locations"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Locations {
            page: None,
            page_size: 20
        }
    ));
}

#[test]
fn locations_with_page() {
    let cli =
        Cli::try_parse_from(["dinewise-cli", "locations", "--page", "2", "--page-size", "5"])
            .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Locations {
            page: Some(2),
            page_size: 5
        }
    ));
}

#[test]
fn hours_requires_numeric_location_id() {
    let cli = Cli::try_parse_from(["dinewise-cli", "hours", "7"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Hours {
            location_id: 7,
            json: false
        }
    ));
    assert!(Cli::try_parse_from(["dinewise-cli", "hours", "seven"]).is_err());
}

#[test]
fn parses_user_reservations() {
    let cli = Cli::try_parse_from(["dinewise-cli", "user-reservations", "42"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::UserReservations { user_id: 42 }
    ));
}

#[test]
fn chat_defaults_to_anonymous_user() {
    let cli = Cli::try_parse_from(["dinewise-cli", "chat", "pizza near me?"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Chat {
            ref message,
            ref user_id,
            session_id: None,
        } if message == "pizza near me?" && user_id == "anonymous"
    ));
}

#[test]
fn chat_with_session() {
    let cli = Cli::try_parse_from([
        "dinewise-cli",
        "chat",
        "and dessert?",
        "--user-id",
        "u-1",
        "--session-id",
        "s-9",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Chat {
            session_id: Some(ref s),
            ..
        } if s == "s-9"
    ));
}

#[test]
fn assistant_routing() {
    let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;

    assert!(parse(&["dinewise-cli", "chat", "hi"]).uses_assistant());
    assert!(parse(&["dinewise-cli", "health", "--assistant"]).uses_assistant());
    assert!(parse(&["dinewise-cli", "endpoint", "--assistant"]).uses_assistant());
    assert!(!parse(&["dinewise-cli", "health"]).uses_assistant());
    assert!(!parse(&["dinewise-cli", "events"]).uses_assistant());
}

#[test]
fn parses_feedback_rating() {
    let cli = Cli::try_parse_from([
        "dinewise-cli",
        "feedback",
        "s-1",
        "not-helpful",
        "--comment",
        "closed on mondays",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Feedback {
            rating: Rating::NotHelpful,
            comment: Some(ref c),
            ref user_id,
            ..
        } if c == "closed on mondays" && user_id == "anonymous"
    ));
    assert!(Cli::try_parse_from(["dinewise-cli", "feedback", "s-1", "meh"]).is_err());
}

#[test]
fn rating_maps_to_feedback_kind() {
    assert_eq!(FeedbackKind::from(Rating::Wrong), FeedbackKind::Wrong);
    assert_eq!(FeedbackKind::from(Rating::NotHelpful), FeedbackKind::NotHelpful);
}

#[test]
fn session_commands_use_assistant() {
    let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;

    assert!(parse(&["dinewise-cli", "conversation", "s-1"]).uses_assistant());
    assert!(parse(&["dinewise-cli", "suggest", "rest"]).uses_assistant());
    assert!(parse(&["dinewise-cli", "reset-chat", "s-1"]).uses_assistant());
}

#[test]
fn format_schedule_lists_every_day() {
    let mut days: [DayHours; 7] = std::array::from_fn(|_| DayHours::Closed);
    days[0] = DayHours::Open {
        opens: "10:00".to_string(),
        closes: "22:00".to_string(),
    };
    let rendered = format_schedule(&WeeklySchedule { days });

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "Monday     10:00-22:00");
    assert_eq!(lines[6], "Sunday     closed");
}
