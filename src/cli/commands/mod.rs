pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_PORT: &str = "port";
pub const ARG_CATALOG: &str = "catalog";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("releasebadge")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("RELEASEBADGE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_CATALOG)
                .short('c')
                .long("catalog")
                .help("Path to the project catalog (JSON)")
                .long_help(
                    "Path to the project catalog. A JSON document of the form {\"projects\": [...]}, loaded once at startup.",
                )
                .env("RELEASEBADGE_CATALOG")
                .required(true),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "releasebadge");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_port_and_catalog() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "releasebadge",
            "--port",
            "9090",
            "--catalog",
            "/etc/releasebadge/catalog.json",
        ]);

        assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(9090));
        assert_eq!(
            matches.get_one::<String>(ARG_CATALOG).cloned(),
            Some("/etc/releasebadge/catalog.json".to_string())
        );
    }

    #[test]
    fn test_default_port() {
        temp_env::with_vars([("RELEASEBADGE_PORT", None::<String>)], || {
            let matches = new().get_matches_from(vec!["releasebadge", "-c", "catalog.json"]);
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
        });
    }

    #[test]
    fn test_catalog_is_required() {
        temp_env::with_vars([("RELEASEBADGE_CATALOG", None::<String>)], || {
            let result = new().try_get_matches_from(vec!["releasebadge"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("RELEASEBADGE_PORT", Some("443")),
                ("RELEASEBADGE_CATALOG", Some("/srv/catalog.json")),
                ("RELEASEBADGE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["releasebadge"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>(ARG_CATALOG).cloned(),
                    Some("/srv/catalog.json".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("RELEASEBADGE_LOG_LEVEL", Some(level)),
                    ("RELEASEBADGE_CATALOG", Some("catalog.json")),
                ],
                || {
                    let matches = new().get_matches_from(vec!["releasebadge"]);
                    assert_eq!(
                        matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("RELEASEBADGE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "releasebadge".to_string(),
                    "--catalog".to_string(),
                    "catalog.json".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}
