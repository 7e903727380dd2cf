use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{bail, Context};
use clap::{command, Arg, ArgAction, ArgMatches, Command};
use log::debug;
use postmeta::{config::Config, feed, render, ArticleParser, FsSource, Library, LoadOptions};

fn dir_arg() -> Arg {
    Arg::new("article_dir")
        .help("Directory path of articles")
        .value_parser(clap::value_parser!(PathBuf))
        .default_value("posts")
}

fn config_from(matches: &ArgMatches) -> anyhow::Result<Config> {
    let article_dir: &PathBuf = matches
        .get_one("article_dir")
        .context("article_dir is missing")?;
    if !article_dir.is_dir() {
        bail!("article_dir must be a directory.");
    }

    let string = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();
    Ok(Config {
        article_dir: article_dir.to_owned(),
        blog_name: string("blog_name"),
        blog_url: string("blog_url"),
        load: LoadOptions {
            extension: string("ext"),
            skip_invalid: matches.get_flag("skip_invalid"),
        },
    })
}

fn load(config: &Config) -> anyhow::Result<Library> {
    let parser = ArticleParser::new(FsSource);
    Library::load(&parser, &config.article_dir, &config.load)
        .with_context(|| format!("while loading {:?}", config.article_dir))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .subcommand_required(true)
        .args(&[
            Arg::new("ext")
                .long("ext")
                .help("Extension of article files")
                .global(true)
                .default_value("md"),
            Arg::new("skip_invalid")
                .long("skip-invalid")
                .help("Skip files that are not valid articles instead of failing")
                .global(true)
                .action(ArgAction::SetTrue),
            Arg::new("blog_name")
                .long("blog-name")
                .env("BLOG_NAME")
                .global(true)
                .default_value(""),
            Arg::new("blog_url")
                .long("blog-url")
                .env("BLOG_URL")
                .global(true)
                .default_value("http://localhost/"),
        ])
        .subcommands([
            Command::new("show")
                .about("Parse a single article")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help("Print an HTML page instead of JSON")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("list")
                .about("List articles, newest first")
                .arg(dir_arg()),
            Command::new("tags")
                .about("Print the tag index")
                .arg(dir_arg()),
            Command::new("feed")
                .about("Print an Atom feed")
                .arg(dir_arg()),
        ])
        .get_matches();

    match matches.subcommand() {
        Some(("show", sub)) => {
            let file: &PathBuf = sub.get_one("file").context("file is missing")?;
            let article = ArticleParser::new(FsSource)
                .parse_article(file)
                .with_context(|| format!("while parsing {file:?}"))?;
            if sub.get_flag("html") {
                let blog_name = sub.get_one::<String>("blog_name").cloned().unwrap_or_default();
                println!("{}", render::article_page(&article, &blog_name));
            } else {
                println!("{}", serde_json::to_string_pretty(&article)?);
            }
        }
        Some(("list", sub)) => {
            let library = load(&config_from(sub)?)?;
            let metadata: Vec<_> = library.articles().iter().map(|a| a.metadata()).collect();
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Some(("tags", sub)) => {
            let library = load(&config_from(sub)?)?;
            let tags: BTreeMap<&str, Vec<&str>> = library
                .tags()
                .into_iter()
                .map(|(tag, articles)| (tag, articles.into_iter().map(|a| a.id()).collect()))
                .collect();
            debug!("{} tags", tags.len());
            println!("{}", serde_json::to_string_pretty(&tags)?);
        }
        Some(("feed", sub)) => {
            let config = config_from(sub)?;
            let library = load(&config)?;
            println!("{}", feed::build_feed(&library, &config).to_string());
        }
        _ => bail!("unknown subcommand"),
    }

    Ok(())
}
