use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use homepage::build::build_index;
use homepage::clock::SystemClock;
use homepage::config::Config;
use homepage::site::SiteConfig;
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = App::new("homepage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds the blog post index and the site configuration")
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("project")
                .long("project")
                .short("p")
                .takes_value(true)
                .value_name("DIR")
                .help("Directory to search upward from for `site.yaml` (or, without one, for `docs/blog`); defaults to the current directory"),
        )
        .subcommand(
            SubCommand::with_name("index")
                .about("Writes the post index (the default)")
                .arg(
                    Arg::with_name("source")
                        .long("source")
                        .takes_value(true)
                        .value_name("DIR")
                        .help("Directory containing the post source files"),
                )
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .value_name("FILE")
                        .help("Path of the index file to write"),
                ),
        )
        .subcommand(
            SubCommand::with_name("config")
                .about("Writes the site configuration as JSON")
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .value_name("FILE")
                        .help("Path of the configuration file to write, or `-` for stdout"),
                ),
        )
        .get_matches();

    let project_dir = match matches.value_of("project") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().context("Reading the current directory")?,
    };
    let config = Config::from_directory(&project_dir)?;

    match matches.subcommand() {
        ("config", Some(matches)) => config_cmd(&config, matches),
        ("index", Some(matches)) => index_cmd(&config, Some(matches)),
        _ => index_cmd(&config, None),
    }
}

fn index_cmd(config: &Config, matches: Option<&ArgMatches>) -> Result<()> {
    let source = path_flag(matches, "source").unwrap_or_else(|| config.posts_directory.as_path());
    let output = path_flag(matches, "output").unwrap_or_else(|| config.index_file.as_path());

    build_index(source, output).with_context(|| {
        format!(
            "Building post index from `{}` into `{}`",
            source.display(),
            output.display()
        )
    })
}

fn path_flag<'a>(matches: Option<&'a ArgMatches>, name: &str) -> Option<&'a Path> {
    matches.and_then(|m| m.value_of(name)).map(Path::new)
}

fn config_cmd(config: &Config, matches: &ArgMatches) -> Result<()> {
    match matches.value_of("output") {
        Some("-") => {
            let json = SiteConfig::evaluate(SystemClock).to_json()?;
            writeln!(std::io::stdout(), "{}", json)?;
            Ok(())
        }
        output => {
            let output = output
                .map(Path::new)
                .unwrap_or_else(|| config.site_config_file.as_path());
            homepage::site::write_site_config(SystemClock, output)
                .with_context(|| format!("Writing site configuration to `{}`", output.display()))
        }
    }
}
