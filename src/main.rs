use clap::{Arg, ArgAction, Command};
use mdfetch::config;
use mdfetch::generator::html2md::{HeadingStyle, LinkStyle};
use mdfetch::NormalizeMode;
use std::path::PathBuf;

fn main() {
    mdfetch::telemetry::init();

    let matches = Command::new("mdfetch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fetch an HTML page and convert it to clean Markdown")
        .arg(
            Arg::new("input")
                .help("URL (http/https) or local HTML file path")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Output file path"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Additional TOML config file"),
        )
        .arg(
            Arg::new("trim-only")
                .long("trim-only")
                .action(ArgAction::SetTrue)
                .help("Only trim leading and trailing whitespace"),
        )
        .arg(
            Arg::new("full")
                .long("full")
                .action(ArgAction::SetTrue)
                .help("Run every Markdown cleanup pass")
                .conflicts_with("trim-only"),
        )
        .arg(
            Arg::new("link-style")
                .long("link-style")
                .value_name("STYLE")
                .value_parser(["inlined", "referenced"])
                .help("How links are rendered"),
        )
        .arg(
            Arg::new("heading-style")
                .long("heading-style")
                .value_name("STYLE")
                .value_parser(["atx", "setext"])
                .help("How headings are rendered"),
        )
        .get_matches();

    let Some(input) = matches.get_one::<String>("input") else {
        eprintln!("Error: input is required");
        std::process::exit(1);
    };

    // a broken config layer is fatal for the CLI
    let explicit_config = matches.get_one::<String>("config").map(PathBuf::from);
    match config::Settings::load(explicit_config.as_deref()) {
        Ok(settings) => config::replace_settings(settings),
        Err(err) => {
            eprintln!("Error: {}", mdfetch::ConvertError::from(err));
            std::process::exit(1);
        }
    }

    // collect CLI overrides
    let output_path_override = matches.get_one::<String>("output").map(PathBuf::from);
    let normalize_override = if matches.get_flag("trim-only") {
        Some(NormalizeMode::TrimOnly)
    } else if matches.get_flag("full") {
        Some(NormalizeMode::Full)
    } else {
        None
    };
    let link_style_override = matches
        .get_one::<String>("link-style")
        .map(|style| match style.as_str() {
            "inlined" => LinkStyle::Inlined,
            _ => LinkStyle::Referenced,
        });
    let heading_style_override = matches
        .get_one::<String>("heading-style")
        .map(|style| match style.as_str() {
            "setext" => HeadingStyle::Setext,
            _ => HeadingStyle::Atx,
        });

    config::update_settings_with_cli_args(
        output_path_override,
        normalize_override,
        link_style_override,
        heading_style_override,
    );

    let settings = config::get_settings();

    match mdfetch::convert_input(input, &settings) {
        Ok(markup) => {
            if let Some(output_path) = &settings.output_path {
                match std::fs::write(output_path, &markup) {
                    Ok(_) => eprintln!("Output written to: {}", output_path.display()),
                    Err(err) => {
                        eprintln!("Error writing to file: {}", err);
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", markup);
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
