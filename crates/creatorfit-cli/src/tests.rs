use super::*;

const URL: &str = "https://www.linkedin.com/in/jane/";

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["creatorfit-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_analyze_with_all_inputs() {
    let cli = Cli::try_parse_from([
        "creatorfit-cli",
        "analyze",
        "--url",
        URL,
        "--topic",
        "observability",
        "--brand",
        "Acme",
        "--creator",
        "Jane Doe",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            ref url,
            ref topic,
            ref brand,
            ref creator,
            json: false,
        }) if url == URL && topic == "observability" && brand == "Acme" && creator == "Jane Doe"
    ));
}

#[test]
fn parses_analyze_json_flag() {
    let cli = Cli::try_parse_from([
        "creatorfit-cli",
        "analyze",
        "--url",
        URL,
        "--topic",
        "t",
        "--brand",
        "b",
        "--creator",
        "c",
        "--json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze { json: true, .. })
    ));
}

#[test]
fn analyze_requires_every_input() {
    let result = Cli::try_parse_from([
        "creatorfit-cli",
        "analyze",
        "--url",
        URL,
        "--topic",
        "t",
        "--brand",
        "b",
    ]);
    assert!(result.is_err(), "missing --creator should be rejected");
}
